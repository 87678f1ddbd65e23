use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;


#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub skills: Option<String>,
    pub interests: Option<String>,
    pub career_goal: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct StudentInsert {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub skills: Option<String>,
    pub interests: Option<String>,
    pub career_goal: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewStudent {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Must be at least 8 characters"))]
    pub password: String,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(range(min = 1, max = 10, message = "Year must be between 1 and 10"))]
    pub year: Option<i32>,

    #[validate(length(max = 1000))]
    pub skills: Option<String>,

    #[validate(length(max = 1000))]
    pub interests: Option<String>,

    #[validate(length(max = 500))]
    pub career_goal: Option<String>,
}

impl NewStudent {
    pub fn prepare_for_insert(&self, password_hash: String) -> StudentInsert {
        StudentInsert {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password_hash,
            department: self.department.clone(),
            year: self.year,
            skills: self.skills.clone(),
            interests: self.interests.clone(),
            career_goal: self.career_goal.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginStudent {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Partial profile update. Absent members leave the stored value untouched.
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct StudentUpdate {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(range(min = 1, max = 10, message = "Year must be between 1 and 10"))]
    pub year: Option<i32>,

    #[validate(length(max = 1000))]
    pub skills: Option<String>,

    #[validate(length(max = 1000))]
    pub interests: Option<String>,

    #[validate(length(max = 500))]
    pub career_goal: Option<String>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.year.is_none()
            && self.skills.is_none()
            && self.interests.is_none()
            && self.career_goal.is_none()
    }
}

impl Student {
    /// Applies every member present in `update`, one field at a time.
    pub fn apply_update(&mut self, update: StudentUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(department) = update.department {
            self.department = Some(department);
        }
        if let Some(year) = update.year {
            self.year = Some(year);
        }
        if let Some(skills) = update.skills {
            self.skills = Some(skills);
        }
        if let Some(interests) = update.interests {
            self.interests = Some(interests);
        }
        if let Some(career_goal) = update.career_goal {
            self.career_goal = Some(career_goal);
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub skills: Option<String>,
    pub interests: Option<String>,
    pub career_goal: Option<String>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        StudentResponse {
            id: student.id,
            name: student.name,
            email: student.email,
            department: student.department,
            year: student.year,
            skills: student.skills,
            interests: student.interests,
            career_goal: student.career_goal,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
