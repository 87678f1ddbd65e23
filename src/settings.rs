use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};
use url::Url;
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_auto_accept_after_secs")]
    pub auto_accept_after_secs: u64,

    #[serde(default = "default_top_k")]
    pub recommend_default_top_k: usize,

    #[serde(default = "default_max_top_k")]
    pub recommend_max_top_k: usize,

    #[serde(default)]
    pub chat_api_key: Option<String>,

    #[serde(default = "default_chat_api_url")]
    pub chat_api_url: String,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,

    #[serde(default = "default_chat_max_tokens")]
    pub chat_max_tokens: u32,

    #[serde(default = "default_chat_top_p")]
    pub chat_top_p: f32,

    #[serde(default = "default_chat_history_limit")]
    pub chat_history_limit: usize,

    #[serde(default = "default_chat_timeout_secs")]
    pub chat_timeout_secs: u64,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_username: Option<String>,

    #[serde(default)]
    pub smtp_password: Option<String>,

    #[serde(default = "default_mentor_inbox")]
    pub mentor_inbox: String,

    #[serde(default = "default_send_limit_per_minute")]
    pub send_limit_per_minute: u32,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "MentorBridge-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_max_connections() -> u32 {
    10
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_auto_accept_after_secs() -> u64 {
    60
}
fn default_top_k() -> usize {
    10
}
fn default_max_top_k() -> usize {
    100
}
fn default_chat_api_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_chat_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}
fn default_chat_temperature() -> f32 {
    0.7
}
fn default_chat_max_tokens() -> u32 {
    1024
}
fn default_chat_top_p() -> f32 {
    0.95
}
fn default_chat_history_limit() -> usize {
    10
}
fn default_chat_timeout_secs() -> u64 {
    30
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_smtp_port() -> u16 {
    587
}
fn default_mentor_inbox() -> String {
    "mentor.inbox@example.com".to_string()
}
fn default_send_limit_per_minute() -> u32 {
    10
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.database_url = fill_or_env(config.database_url, "DATABASE_URL")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if Url::parse(&self.chat_api_url).is_err() {
            errors.push("CHAT_API_URL must be a valid URL");
        }
        if self.recommend_default_top_k == 0 {
            errors.push("RECOMMEND_DEFAULT_TOP_K must be at least 1");
        }
        if self.recommend_default_top_k > self.recommend_max_top_k {
            errors.push("RECOMMEND_DEFAULT_TOP_K cannot exceed RECOMMEND_MAX_TOP_K");
        }
        if self.send_limit_per_minute == 0 {
            errors.push("SEND_LIMIT_PER_MINUTE must be at least 1");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Falls back to the unprefixed variable, which is what most hosting
/// platforms inject for the database.
fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            Some(value) => value.as_str().redact(),
            None => "[MISSING]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("auto_accept_after_secs", &self.auto_accept_after_secs)
            .field("recommend_default_top_k", &self.recommend_default_top_k)
            .field("recommend_max_top_k", &self.recommend_max_top_k)
            .field("chat_api_key", &self.chat_api_key.redact())
            .field("chat_api_url", &self.chat_api_url)
            .field("chat_model", &self.chat_model)
            .field("chat_history_limit", &self.chat_history_limit)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &self.smtp_password.redact())
            .field("mentor_inbox", &self.mentor_inbox)
            .field("send_limit_per_minute", &self.send_limit_per_minute)
            .finish()
    }
}

/// Settings for the chat-completion provider.
#[derive(Clone)]
pub struct ChatSettings {
    pub api_key: Option<Zeroizing<String>>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub history_limit: usize,
    pub timeout_secs: u64,
}

impl From<&AppConfig> for ChatSettings {
    fn from(config: &AppConfig) -> Self {
        ChatSettings {
            api_key: config
                .chat_api_key
                .as_ref()
                .filter(|key| !key.trim().is_empty())
                .map(|key| Zeroizing::new(key.clone())),
            api_url: config.chat_api_url.trim_end_matches('/').to_string(),
            model: config.chat_model.clone(),
            temperature: config.chat_temperature,
            max_tokens: config.chat_max_tokens,
            top_p: config.chat_top_p,
            history_limit: config.chat_history_limit,
            timeout_secs: config.chat_timeout_secs,
        }
    }
}

impl fmt::Debug for ChatSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("top_p", &self.top_p)
            .field("history_limit", &self.history_limit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Settings for the SMTP relay and the fixed mentor inbox.
#[derive(Clone)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<Zeroizing<String>>,
    pub mentor_inbox: String,
}

impl From<&AppConfig> for MailSettings {
    fn from(config: &AppConfig) -> Self {
        MailSettings {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username: config.smtp_username.clone(),
            password: config.smtp_password.as_ref().map(|p| Zeroizing::new(p.clone())),
            mentor_inbox: config.mentor_inbox.clone(),
        }
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("mentor_inbox", &self.mentor_inbox)
            .finish()
    }
}

/// Settings for the connection-request lifecycle and recommendations.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleSettings {
    pub auto_accept_after: chrono::Duration,
    pub default_top_k: usize,
    pub max_top_k: usize,
}

impl From<&AppConfig> for LifecycleSettings {
    fn from(config: &AppConfig) -> Self {
        LifecycleSettings {
            auto_accept_after: chrono::Duration::seconds(config.auto_accept_after_secs as i64),
            default_top_k: config.recommend_default_top_k,
            max_top_k: config.recommend_max_top_k,
        }
    }
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        LifecycleSettings {
            auto_accept_after: chrono::Duration::minutes(1),
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: default_name(),
            port: 0,
            host: default_host(),
            worker_count: 1,
            database_url: "postgres://localhost/mentor_bridge_test".into(),
            database_max_connections: 2,
            cors_allowed_origins: default_cors_origins(),
            auto_accept_after_secs: 60,
            recommend_default_top_k: 10,
            recommend_max_top_k: 100,
            chat_api_key: Some("gsk_test_key".into()),
            chat_api_url: "https://api.groq.com/openai/v1/".into(),
            chat_model: default_chat_model(),
            chat_temperature: 0.7,
            chat_max_tokens: 1024,
            chat_top_p: 0.95,
            chat_history_limit: 10,
            chat_timeout_secs: 30,
            smtp_host: default_smtp_host(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: Some("app-password".into()),
            mentor_inbox: default_mentor_inbox(),
            send_limit_per_minute: 10,
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_wildcard_cors_in_production() {
        let mut config = base_config();
        config.env = AppEnvironment::Production;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Wildcard CORS"));
    }

    #[test]
    fn rejects_default_top_k_above_maximum() {
        let mut config = base_config();
        config.recommend_default_top_k = 500;

        assert!(config.validate().is_err());
    }

    #[test]
    fn cors_origins_splits_comma_separated_entries() {
        let mut config = base_config();
        config.cors_allowed_origins = vec!["http://localhost:5500, https://example.com".into()];

        assert_eq!(
            config.cors_origins(),
            vec!["http://localhost:5500".to_string(), "https://example.com".to_string()]
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", base_config());

        assert!(!rendered.contains("gsk_test_key"));
        assert!(!rendered.contains("app-password"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn chat_settings_trim_trailing_slash_and_blank_keys() {
        let mut config = base_config();
        config.chat_api_key = Some("   ".into());

        let chat = ChatSettings::from(&config);
        assert!(chat.api_key.is_none());
        assert_eq!(chat.api_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn lifecycle_settings_convert_seconds() {
        let lifecycle = LifecycleSettings::from(&base_config());
        assert_eq!(lifecycle.auto_accept_after, chrono::Duration::seconds(60));
    }
}
