use crate::logger::Logger;
use crate::mailer::Mailer;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
}

/// Email-provider settings.
///
/// `api_key` and `to_address` are deliberately optional: running without
/// them is a valid deployment state that the handler reports as a 500
/// configuration error per request instead of crashing at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub to_address: Option<String>,
    pub from_address: String,
    pub send_confirmation: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CONTACT").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.max_body_size", 65536)? // 64KB, plenty for a form
            .set_default("email.api_url", "https://api.resend.com/emails")?
            .set_default("email.from_address", "Contact Form <noreply@example.com>")?
            .set_default("email.send_confirmation", false)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared application state: the immutable config plus the injected
/// capabilities the handler depends on.
pub struct AppState {
    pub config: Config,
    /// Present only when an API key is configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    pub logger: Arc<dyn Logger>,
}

impl AppState {
    pub fn new(config: Config, mailer: Option<Arc<dyn Mailer>>, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            mailer,
            logger,
        }
    }
}
