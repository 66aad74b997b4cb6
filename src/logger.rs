//! Logging capability.
//!
//! The handler receives a `Logger` through `AppState` instead of printing
//! directly, so tests can assert on what would have been logged.

use crate::config::Config;
use std::net::SocketAddr;

pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default logger writing info to stdout and warnings/errors to stderr.
pub struct StdLogger;

impl Logger for StdLogger {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("[WARN] {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("[ERROR] {message}");
    }
}

pub fn log_server_start(logger: &dyn Logger, addr: &SocketAddr, config: &Config) {
    logger.info("======================================");
    logger.info("Contact API server started successfully");
    logger.info(&format!("Listening on: http://{addr}"));
    logger.info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        logger.info(&format!("Worker threads: {workers}"));
    }
    if config.email.api_key.is_none() {
        logger.warn("Email API key not configured; submissions will be rejected with 500");
    }
    if config.email.to_address.is_none() {
        logger.warn("Email recipient not configured; submissions will be rejected with 500");
    }
    logger.info("======================================\n");
}

pub fn log_request(logger: &dyn Logger, method: &hyper::Method, uri: &hyper::Uri) {
    logger.info(&format!("[Request] {method} {uri}"));
}

pub fn log_response(logger: &dyn Logger, status: u16) {
    logger.info(&format!("[Response] {status}"));
}

pub fn log_connection_error(logger: &dyn Logger, err: &impl std::fmt::Debug) {
    logger.error(&format!("Failed to serve connection: {err:?}"));
}

#[cfg(test)]
pub mod test_support {
    use super::Logger;
    use std::sync::Mutex;

    /// Captures log lines for assertions.
    #[derive(Default)]
    pub struct RecordingLogger {
        pub lines: Mutex<Vec<(&'static str, String)>>,
    }

    impl RecordingLogger {
        pub fn entries(&self) -> Vec<(&'static str, String)> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Logger for RecordingLogger {
        fn info(&self, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push(("info", message.to_string()));
        }

        fn warn(&self, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push(("warn", message.to_string()));
        }

        fn error(&self, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push(("error", message.to_string()));
        }
    }
}
