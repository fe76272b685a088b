use std::env;
use secrecy::SecretString;

pub const DEFAULT_DOCUMENT_TEXT_BUDGET: usize = 12_000;
pub const DEFAULT_VIDEO_TEXT_BUDGET: usize = 15_000;
const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub upload_dir: String,
    pub mistral_api_base: String,
    pub mistral_api_key: SecretString,
    pub mistral_model: String,
    pub groq_api_base: String,
    pub groq_api_key: SecretString,
    pub groq_transcription_model: String,
    pub generation_timeout_secs: u64,
    pub document_text_budget: usize,
    pub video_text_budget: usize,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_var_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: var_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: var_or("MONGO_DB_NAME", "coursequiz-local"),
            web_server_host: var_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: parsed_var_or("WEB_SERVER_PORT", 8080),
            jwt_secret: SecretString::from(var_or("JWT_SECRET", DEV_JWT_SECRET)),
            jwt_expiration_hours: parsed_var_or("JWT_EXPIRATION_HOURS", 24),
            upload_dir: var_or("UPLOAD_DIR", "public/uploads"),
            mistral_api_base: var_or("MISTRAL_API_BASE", "https://api.mistral.ai/v1"),
            mistral_api_key: SecretString::from(var_or("MISTRAL_API_KEY", "")),
            mistral_model: var_or("MISTRAL_MODEL", "mistral-small-latest"),
            groq_api_base: var_or("GROQ_API_BASE", "https://api.groq.com/openai/v1"),
            groq_api_key: SecretString::from(var_or("GROQ_API_KEY", "")),
            groq_transcription_model: var_or("GROQ_TRANSCRIPTION_MODEL", "whisper-large-v3"),
            generation_timeout_secs: parsed_var_or("GENERATION_TIMEOUT_SECS", 120),
            document_text_budget: parsed_var_or(
                "DOCUMENT_TEXT_BUDGET",
                DEFAULT_DOCUMENT_TEXT_BUDGET,
            ),
            video_text_budget: parsed_var_or("VIDEO_TEXT_BUDGET", DEFAULT_VIDEO_TEXT_BUDGET),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.mistral_api_key.expose_secret().is_empty() {
            panic!("FATAL: MISTRAL_API_KEY is not set! Quiz generation cannot work without it.");
        }
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "coursequiz-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            upload_dir: "public/uploads".to_string(),
            mistral_api_base: "http://127.0.0.1:9/v1".to_string(),
            mistral_api_key: SecretString::from("test-mistral-key".to_string()),
            mistral_model: "mistral-small-latest".to_string(),
            groq_api_base: "http://127.0.0.1:9/openai/v1".to_string(),
            groq_api_key: SecretString::from("test-groq-key".to_string()),
            groq_transcription_model: "whisper-large-v3".to_string(),
            generation_timeout_secs: 5,
            document_text_budget: DEFAULT_DOCUMENT_TEXT_BUDGET,
            video_text_budget: DEFAULT_VIDEO_TEXT_BUDGET,
        }
    }
}
