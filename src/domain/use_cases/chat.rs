use chrono::Utc;
use validator::Validate;

use crate::{
    entities::{
        alumni::Alumnus,
        message::{
            ChatReply, ChatRole, ChatTurn, ClearChatResponse, ConversationQuery, Message,
            MessageInsert, NewChatMessage,
        },
    },
    errors::AppError,
    repositories::{
        alumni::AlumniRepository, chat_provider::ChatProvider, message::MessageRepository,
        student::StudentRepository,
    },
};

pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't generate a response. Please rephrase your question.";
const DEFAULT_ROLE: &str = "Experienced Professional";

pub struct ChatHandler<M, S, A, P>
where
    M: MessageRepository,
    S: StudentRepository,
    A: AlumniRepository,
    P: ChatProvider,
{
    pub message_repo: M,
    pub student_repo: S,
    pub alumni_repo: A,
    pub provider: P,
    pub history_limit: usize,
}

impl<M, S, A, P> ChatHandler<M, S, A, P>
where
    M: MessageRepository,
    S: StudentRepository,
    A: AlumniRepository,
    P: ChatProvider,
{
    pub fn new(message_repo: M, student_repo: S, alumni_repo: A, provider: P, history_limit: usize) -> Self {
        ChatHandler {
            message_repo,
            student_repo,
            alumni_repo,
            provider,
            history_limit,
        }
    }

    /// Relays a student's message to the alumnus persona and stores the exchange.
    ///
    /// Nothing is written unless the provider answers.
    pub async fn send(&self, request: NewChatMessage) -> Result<ChatReply, AppError> {
        request.validate()?;

        let content = request.message.trim();
        if content.is_empty() {
            return Err(AppError::InvalidArgument("Message cannot be empty".to_string()));
        }

        if !self.student_repo.student_exists(&request.student_id).await? {
            return Err(AppError::NotFound("Student not found".to_string()));
        }
        let alumnus = self.alumni_repo
            .get_alumnus_by_id(&request.alumni_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alumni not found".to_string()))?;

        let conversation = ConversationQuery {
            student_id: request.student_id,
            alumni_id: request.alumni_id,
        };
        let history = self.message_repo
            .recent_messages(conversation, self.history_limit)
            .await?;

        let asked_at = Utc::now();
        let turns = build_turns(&alumnus, &history, content);

        let reply = self.provider.complete(&turns).await.map_err(|e| {
            tracing::warn!(alumni_id = %alumnus.id, "Chat provider failed: {}", e);
            e
        })?;
        let reply = match reply.trim() {
            "" => EMPTY_REPLY_FALLBACK.to_string(),
            text => text.to_string(),
        };

        let exchange = [
            MessageInsert::from_student(request.student_id, request.alumni_id, content, asked_at),
            MessageInsert::from_mentor(request.alumni_id, request.student_id, reply.as_str(), Utc::now()),
        ];
        self.message_repo.insert_exchange(&exchange).await?;

        tracing::info!(
            student_id = %request.student_id,
            alumni_id = %request.alumni_id,
            "Chat exchange stored"
        );
        Ok(ChatReply { reply })
    }

    pub async fn history(&self, conversation: ConversationQuery) -> Result<Vec<Message>, AppError> {
        self.message_repo.conversation(conversation).await
    }

    pub async fn clear(&self, conversation: ConversationQuery) -> Result<ClearChatResponse, AppError> {
        let deleted_messages = self.message_repo.delete_conversation(conversation).await?;

        tracing::info!(
            student_id = %conversation.student_id,
            alumni_id = %conversation.alumni_id,
            deleted_messages,
            "Chat history cleared"
        );
        Ok(ClearChatResponse { success: true, deleted_messages })
    }
}

/// Casts the model as the alumnus, giving career guidance in the first person.
pub fn persona_prompt(alumnus: &Alumnus) -> String {
    let role = alumnus.current_role.as_deref().unwrap_or(DEFAULT_ROLE);
    let company = alumnus
        .company
        .as_deref()
        .map(|company| format!(" at {}", company))
        .unwrap_or_default();

    format!(
        "You are {}, a {}{}. You are an alumnus mentoring a current student. \
         Give practical, encouraging career guidance drawn from your experience, \
         and keep answers concise.",
        alumnus.name, role, company
    )
}

pub fn build_turns(alumnus: &Alumnus, history: &[Message], message: &str) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(history.len() + 2);
    turns.push(ChatTurn::new(ChatRole::System, persona_prompt(alumnus)));
    turns.extend(history.iter().map(ChatTurn::from));
    turns.push(ChatTurn::new(ChatRole::User, message));
    turns
}
