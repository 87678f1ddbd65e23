use serde::{Deserialize, Serialize};

use crate::domain::{entities::alumni::Alumnus, matching::{display_score, Scored}};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub alumnus: Alumnus,
    pub match_score: f64,
    pub reason: String,
}

impl From<Scored<Alumnus>> for Recommendation {
    fn from(scored: Scored<Alumnus>) -> Self {
        Recommendation {
            alumnus: scored.candidate,
            match_score: display_score(scored.ratio),
            reason: scored.reason,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    pub top_k: Option<usize>,
}
