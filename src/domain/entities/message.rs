use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    Student,
    MentorAgent,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Student => "student",
            ParticipantRole::MentorAgent => "alumni_ai",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub sender_type: String,
    pub receiver_type: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_from_student(&self) -> bool {
        self.sender_type == ParticipantRole::Student.as_str()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageInsert {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub sender_role: ParticipantRole,
    pub receiver_role: ParticipantRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl MessageInsert {
    pub fn from_student(
        student_id: Uuid,
        alumni_id: Uuid,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        MessageInsert {
            sender_id: student_id,
            receiver_id: alumni_id,
            sender_role: ParticipantRole::Student,
            receiver_role: ParticipantRole::MentorAgent,
            content: content.into(),
            created_at,
        }
    }

    pub fn from_mentor(
        alumni_id: Uuid,
        student_id: Uuid,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        MessageInsert {
            sender_id: alumni_id,
            receiver_id: student_id,
            sender_role: ParticipantRole::MentorAgent,
            receiver_role: ParticipantRole::Student,
            content: content.into(),
            created_at,
        }
    }
}

/// Role tags understood by OpenAI-compatible chat-completion APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        ChatTurn { role, content: content.into() }
    }
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        let role = if message.is_from_student() {
            ChatRole::User
        } else {
            ChatRole::Assistant
        };
        ChatTurn::new(role, message.content.clone())
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewChatMessage {
    pub student_id: Uuid,
    pub alumni_id: Uuid,

    #[validate(length(max = 4000, message = "Message is too long"))]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ConversationQuery {
    pub student_id: Uuid,
    pub alumni_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ClearChatResponse {
    pub success: bool,
    pub deleted_messages: u64,
}
