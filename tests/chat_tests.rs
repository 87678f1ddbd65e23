
use chrono::{Duration, Utc};
use uuid::Uuid;

use mentor_bridge::{
    entities::message::{
        ChatRole, ConversationQuery, MessageInsert, NewChatMessage, ParticipantRole,
    },
    errors::AppError,
    use_cases::chat::{ChatHandler, EMPTY_REPLY_FALLBACK},
};
use test_utils::{
    alumnus, stored_message, MockAlumniRepo, MockMessageRepo, MockProvider, MockStudentRepo,
};

type Handler = ChatHandler<MockMessageRepo, MockStudentRepo, MockAlumniRepo, MockProvider>;

const HISTORY_LIMIT: usize = 10;

fn parties() -> (MockStudentRepo, MockAlumniRepo) {
    let mut students = MockStudentRepo::new();
    students.expect_student_exists().returning(|_| Ok(true));
    let mut alumni = MockAlumniRepo::new();
    alumni.expect_get_alumnus_by_id()
        .returning(|id| Ok(Some(mentor_bridge::entities::alumni::Alumnus {
            id: *id,
            ..alumnus("ALU1", Some("python"), true)
        })));
    (students, alumni)
}

fn handler(messages: MockMessageRepo, provider: MockProvider) -> Handler {
    let (students, alumni) = parties();
    ChatHandler::new(messages, students, alumni, provider, HISTORY_LIMIT)
}

fn chat(message: &str) -> NewChatMessage {
    NewChatMessage {
        student_id: Uuid::new_v4(),
        alumni_id: Uuid::new_v4(),
        message: message.to_string(),
    }
}

#[actix_rt::test]
async fn test_blank_message_is_invalid() {
    let mut provider = MockProvider::new();
    provider.expect_complete().times(0);

    let result = handler(MockMessageRepo::new(), provider).send(chat("   ")).await;

    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
}

#[actix_rt::test]
async fn test_exchange_is_stored_with_roles() {
    let mut messages = MockMessageRepo::new();
    messages.expect_recent_messages()
        .withf(|_, limit| *limit == HISTORY_LIMIT)
        .returning(|_, _| Ok(vec![]));
    messages.expect_insert_exchange()
        .withf(|exchange| {
            exchange.len() == 2
                && exchange[0].sender_role == ParticipantRole::Student
                && exchange[0].content == "How do I get into data science?"
                && exchange[1].sender_role == ParticipantRole::MentorAgent
                && exchange[1].content == "Start with statistics."
                && exchange[0].created_at <= exchange[1].created_at
        })
        .times(1)
        .returning(|exchange| Ok(exchange.iter().map(stored_message).collect()));

    let mut provider = MockProvider::new();
    provider.expect_complete()
        .times(1)
        .returning(|_| Ok("Start with statistics.".to_string()));

    let reply = handler(messages, provider)
        .send(chat("  How do I get into data science?  "))
        .await
        .unwrap();

    assert_eq!(reply.reply, "Start with statistics.");
}

#[actix_rt::test]
async fn test_provider_sees_persona_history_and_new_message() {
    let request = chat("What should I learn next?");
    let earlier = Utc::now() - Duration::minutes(5);
    let history = vec![
        stored_message(&MessageInsert::from_student(
            request.student_id, request.alumni_id, "Hi!", earlier,
        )),
        stored_message(&MessageInsert::from_mentor(
            request.alumni_id, request.student_id, "Hello, how can I help?", earlier,
        )),
    ];

    let mut messages = MockMessageRepo::new();
    messages.expect_recent_messages()
        .returning(move |_, _| Ok(history.clone()));
    messages.expect_insert_exchange()
        .returning(|exchange| Ok(exchange.iter().map(stored_message).collect()));

    let mut provider = MockProvider::new();
    provider.expect_complete()
        .withf(|turns| {
            let roles: Vec<ChatRole> = turns.iter().map(|t| t.role).collect();
            roles == [ChatRole::System, ChatRole::User, ChatRole::Assistant, ChatRole::User]
                && turns[0].content.starts_with("You are Alumnus ALU1, a Data Scientist at Acme")
                && turns[3].content == "What should I learn next?"
        })
        .times(1)
        .returning(|_| Ok("Learn SQL.".to_string()));

    let reply = handler(messages, provider).send(request).await.unwrap();

    assert_eq!(reply.reply, "Learn SQL.");
}

#[actix_rt::test]
async fn test_empty_reply_uses_fallback() {
    let mut messages = MockMessageRepo::new();
    messages.expect_recent_messages().returning(|_, _| Ok(vec![]));
    messages.expect_insert_exchange()
        .withf(|exchange| exchange[1].content == EMPTY_REPLY_FALLBACK)
        .returning(|exchange| Ok(exchange.iter().map(stored_message).collect()));

    let mut provider = MockProvider::new();
    provider.expect_complete().returning(|_| Ok("  ".to_string()));

    let reply = handler(messages, provider).send(chat("Hello")).await.unwrap();

    assert_eq!(reply.reply, EMPTY_REPLY_FALLBACK);
}

#[actix_rt::test]
async fn test_provider_failure_persists_nothing() {
    let mut messages = MockMessageRepo::new();
    messages.expect_recent_messages().returning(|_, _| Ok(vec![]));
    messages.expect_insert_exchange().times(0);

    let mut provider = MockProvider::new();
    provider.expect_complete()
        .returning(|_| Err(AppError::UpstreamUnavailable("API authentication error".into())));

    let result = handler(messages, provider).send(chat("Hello")).await;

    assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
}

#[actix_rt::test]
async fn test_clear_reports_deleted_count() {
    let mut messages = MockMessageRepo::new();
    messages.expect_delete_conversation().returning(|_| Ok(4));

    let response = handler(messages, MockProvider::new())
        .clear(ConversationQuery {
            student_id: Uuid::new_v4(),
            alumni_id: Uuid::new_v4(),
        })
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.deleted_messages, 4);
}
