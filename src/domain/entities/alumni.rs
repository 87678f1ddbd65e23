use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::student::normalize_email;

const ALUMNI_CODE_PREFIX: &str = "ALU";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Alumnus {
    pub id: Uuid,
    pub alumni_code: String,
    pub name: String,
    pub email: Option<String>,
    pub graduation_year: Option<i32>,
    pub department: Option<String>,
    #[sqlx(rename = "job_role")]
    pub current_role: Option<String>,
    pub company: Option<String>,
    pub experience_years: Option<i32>,
    pub skills: Option<String>,
    pub domain: Option<String>,
    pub location: Option<String>,
    pub mentorship_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlumnusInsert {
    pub alumni_code: String,
    pub name: String,
    pub email: Option<String>,
    pub graduation_year: Option<i32>,
    pub department: Option<String>,
    pub current_role: Option<String>,
    pub company: Option<String>,
    pub experience_years: Option<i32>,
    pub skills: Option<String>,
    pub domain: Option<String>,
    pub location: Option<String>,
    pub mentorship_available: bool,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewAlumnus {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(range(min = 1950, max = 2100, message = "Graduation year is out of range"))]
    pub graduation_year: i32,

    #[validate(length(min = 1, max = 100, message = "Department is required"))]
    pub department: String,

    #[validate(length(max = 100))]
    pub current_role: Option<String>,

    #[validate(length(max = 100))]
    pub company: Option<String>,

    #[validate(range(min = 0, max = 80, message = "Experience must be between 0 and 80 years"))]
    pub experience_years: Option<i32>,

    #[validate(length(max = 1000))]
    pub skills: Option<String>,

    #[validate(length(max = 100))]
    pub domain: Option<String>,

    #[validate(length(max = 100))]
    pub location: Option<String>,
}

impl NewAlumnus {
    /// Self-registered alumni are always open to mentoring.
    pub fn prepare_for_insert(&self, alumni_code: String) -> AlumnusInsert {
        AlumnusInsert {
            alumni_code,
            name: self.name.trim().to_string(),
            email: Some(normalize_email(&self.email)),
            graduation_year: Some(self.graduation_year),
            department: Some(self.department.clone()),
            current_role: self.current_role.clone(),
            company: self.company.clone(),
            experience_years: Some(self.experience_years.unwrap_or(0)),
            skills: self.skills.clone(),
            domain: self.domain.clone(),
            location: self.location.clone(),
            mentorship_available: true,
        }
    }
}

/// One row of the alumni dataset export.
#[derive(Debug, Deserialize)]
pub struct AlumnusCsvRecord {
    #[serde(rename = "ID")]
    pub code: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Grad Year")]
    pub graduation_year: i32,
    #[serde(rename = "Dept")]
    pub department: String,
    #[serde(rename = "Current Role")]
    pub current_role: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Exp (yrs)")]
    pub experience_years: i32,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Mentor Available")]
    pub mentor_available: String,
}

impl From<AlumnusCsvRecord> for AlumnusInsert {
    fn from(record: AlumnusCsvRecord) -> Self {
        AlumnusInsert {
            alumni_code: record.code,
            name: record.name,
            email: None,
            graduation_year: Some(record.graduation_year),
            department: non_empty(record.department),
            current_role: non_empty(record.current_role),
            company: non_empty(record.company),
            experience_years: Some(record.experience_years),
            skills: non_empty(record.skills),
            domain: non_empty(record.domain),
            location: non_empty(record.location),
            mentorship_available: record.mentor_available.trim().eq_ignore_ascii_case("yes"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportSummary {
    AlreadyImported { rows_in_db: u64 },
    Imported { rows_inserted: u64 },
}

/// Generates an external code of the form `ALU<unix-seconds><100..999>`.
pub fn generate_alumni_code() -> String {
    let suffix: u16 = rand::thread_rng().gen_range(100..1000);
    format!("{}{}{}", ALUMNI_CODE_PREFIX, Utc::now().timestamp(), suffix)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_code_has_prefix_and_digits() {
        let code = generate_alumni_code();

        assert!(code.starts_with("ALU"));
        assert!(code[3..].chars().all(|c| c.is_ascii_digit()));
        assert!(code.len() >= 3 + 10 + 3);
    }

    #[test]
    fn registration_defaults_experience_and_availability() {
        let payload = NewAlumnus {
            name: "Meera".into(),
            email: "Meera@Corp.com".into(),
            graduation_year: 2015,
            department: "ECE".into(),
            current_role: None,
            company: None,
            experience_years: None,
            skills: Some("python, leadership".into()),
            domain: None,
            location: None,
        };

        let insert = payload.prepare_for_insert("ALU1".into());
        assert_eq!(insert.experience_years, Some(0));
        assert!(insert.mentorship_available);
        assert_eq!(insert.email.as_deref(), Some("meera@corp.com"));
    }

    #[test]
    fn csv_availability_is_case_insensitive_yes() {
        let record = |flag: &str| AlumnusCsvRecord {
            code: "A001".into(),
            name: "Kiran".into(),
            graduation_year: 2012,
            department: "CSE".into(),
            current_role: "SDE".into(),
            company: "".into(),
            experience_years: 8,
            skills: "Java, Spring".into(),
            domain: "Backend".into(),
            location: "Pune".into(),
            mentor_available: flag.into(),
        };

        assert!(AlumnusInsert::from(record(" YES ")).mentorship_available);
        assert!(!AlumnusInsert::from(record("No")).mentorship_available);
        assert_eq!(AlumnusInsert::from(record("yes")).company, None);
    }

    #[test]
    fn import_summary_serializes_with_status_tag() {
        let json = serde_json::to_value(ImportSummary::AlreadyImported { rows_in_db: 4 }).unwrap();
        assert_eq!(json, serde_json::json!({"status": "already_imported", "rows_in_db": 4}));
    }
}
