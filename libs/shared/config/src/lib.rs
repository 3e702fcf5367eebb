use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub notification_sender: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|raw| match raw.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("SERVER_PORT is not a valid port number, using default");
                    None
                }
            })
            .unwrap_or(3000);

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                warn!("SERVER_HOST not set, using default");
                "0.0.0.0".to_string()
            }),
            server_port,
            notification_sender: env::var("NOTIFICATION_SENDER").unwrap_or_else(|_| {
                warn!("NOTIFICATION_SENDER not set, using default");
                "no-reply@sanare.clinic".to_string()
            }),
        }
    }
}
