use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Interaction {
    pub id: Uuid,
    pub student_id: Uuid,
    pub alumni_id: Uuid,
    pub rating: Option<f64>,
    pub comment: Option<String>,
    pub reward: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionInsert {
    pub student_id: Uuid,
    pub alumni_id: Uuid,
    pub rating: Option<f64>,
    pub comment: Option<String>,
    pub reward: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewFeedback {
    pub student_id: Uuid,
    pub alumni_id: Uuid,

    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"))]
    pub rating: Option<f64>,

    #[validate(length(max = 2000, message = "Comment is too long"))]
    pub comment: Option<String>,
}

impl NewFeedback {
    /// The reward is derived once here and stored, never recomputed.
    pub fn prepare_for_insert(&self) -> InteractionInsert {
        InteractionInsert {
            student_id: self.student_id,
            alumni_id: self.alumni_id,
            rating: self.rating,
            comment: self.comment.clone(),
            reward: reward_from_rating(self.rating),
        }
    }
}

/// Maps a 1–5 rating onto 0.0–1.0, rounded to three decimals.
pub fn reward_from_rating(rating: Option<f64>) -> Option<f64> {
    rating.map(|r| (r / MAX_RATING * 1000.0).round() / 1000.0)
}
