pub mod entities;
pub mod matching;
pub mod use_cases;
