use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{alumni::Alumnus, student::Student};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct EmailToMentor {
    pub student_id: Uuid,
    pub alumni_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from_name: String,
    pub from_address: String,
    pub reply_to: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    /// The mentor inbox receives the mail; replies go back to the student.
    pub fn to_mentor(
        student: &Student,
        alumnus: &Alumnus,
        request: &EmailToMentor,
        mentor_inbox: &str,
    ) -> Self {
        let body = format!(
            "Hello Mentor,\n\n\
             You received a new message from a student via MentorBridge.\n\n\
             --- Student Details ---\n\
             Name : {}\n\
             Email: {}\n\
             ID   : {}\n\n\
             --- Selected Alumni (Context) ---\n\
             {}  (ID: {})\n\n\
             --- Student Message ---\n\
             {}\n\n\
             ------------------------\n\
             Sent via MentorBridge Alumni Recommendation System",
            student.name,
            student.email,
            student.id,
            alumnus.name,
            alumnus.alumni_code,
            request.message,
        );

        OutgoingEmail {
            from_name: student.name.clone(),
            from_address: student.email.clone(),
            reply_to: student.email.clone(),
            to: mentor_inbox.to_string(),
            subject: request.subject.clone(),
            body,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EmailSentResponse {
    pub success: bool,
    pub sent_to: String,
    pub reply_to: String,
}
