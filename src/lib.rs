mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, matching, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{auth, chat, db, limiter, mail, utils};

use chat::completion_client::ChatCompletionClient;
use errors::AppError;
use limiter::rate_limiter::SendLimiter;
use mail::smtp::SmtpMailer;
use repositories::sqlx_repo::{
    SqlxAlumniRepo, SqlxConnectionRepo, SqlxFeedbackRepo, SqlxMessageRepo, SqlxStudentRepo,
};
use settings::{ChatSettings, LifecycleSettings, MailSettings};
use shared_repos::SharedRepositories;
use use_cases::{
    alumni::AlumniHandler, chat::ChatHandler, connections::ConnectionHandler,
    email::EmailHandler, feedback::FeedbackHandler, recommend::RecommendHandler,
    students::StudentHandler,
};

pub struct AppState {
    pub repos: SharedRepositories,
    pub student_handler: AppStudentHandler,
    pub alumni_handler: AppAlumniHandler,
    pub recommend_handler: AppRecommendHandler,
    pub feedback_handler: AppFeedbackHandler,
    pub connection_handler: AppConnectionHandler,
    pub chat_handler: AppChatHandler,
    pub email_handler: AppEmailHandler,
    pub send_limiter: SendLimiter,
}

pub type AppStudentHandler = StudentHandler<SqlxStudentRepo>;
pub type AppAlumniHandler = AlumniHandler<SqlxAlumniRepo>;
pub type AppRecommendHandler = RecommendHandler<SqlxStudentRepo, SqlxAlumniRepo>;
pub type AppFeedbackHandler = FeedbackHandler<SqlxFeedbackRepo, SqlxStudentRepo, SqlxAlumniRepo>;
pub type AppConnectionHandler = ConnectionHandler<SqlxConnectionRepo, SqlxStudentRepo, SqlxAlumniRepo>;
pub type AppChatHandler =
    ChatHandler<SqlxMessageRepo, SqlxStudentRepo, SqlxAlumniRepo, ChatCompletionClient>;
pub type AppEmailHandler = EmailHandler<SqlxStudentRepo, SqlxAlumniRepo, SmtpMailer>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Result<Self, AppError> {
        let repos = SharedRepositories::new(pool);
        let lifecycle = LifecycleSettings::from(config);
        let chat_settings = ChatSettings::from(config);
        let mail_settings = MailSettings::from(config);

        if chat_settings.api_key.is_none() {
            tracing::warn!("No chat API key configured; /chat/send will report the service unavailable");
        }

        let history_limit = chat_settings.history_limit;
        let chat_client = ChatCompletionClient::new(chat_settings)?;
        let mailer = SmtpMailer::new(&mail_settings)?;

        Ok(AppState {
            student_handler: StudentHandler::new(repos.student_repo.clone()),
            alumni_handler: AlumniHandler::new(repos.alumni_repo.clone()),
            recommend_handler: RecommendHandler::new(
                repos.student_repo.clone(),
                repos.alumni_repo.clone(),
                lifecycle,
            ),
            feedback_handler: FeedbackHandler::new(
                repos.feedback_repo.clone(),
                repos.student_repo.clone(),
                repos.alumni_repo.clone(),
            ),
            connection_handler: ConnectionHandler::new(
                repos.connection_repo.clone(),
                repos.student_repo.clone(),
                repos.alumni_repo.clone(),
                lifecycle,
            ),
            chat_handler: ChatHandler::new(
                repos.message_repo.clone(),
                repos.student_repo.clone(),
                repos.alumni_repo.clone(),
                chat_client,
                history_limit,
            ),
            email_handler: EmailHandler::new(
                repos.student_repo.clone(),
                repos.alumni_repo.clone(),
                mailer,
                mail_settings.mentor_inbox.clone(),
            ),
            send_limiter: SendLimiter::per_minute(config.send_limit_per_minute),
            repos,
        })
    }
}
