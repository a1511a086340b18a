use std::time::Duration;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub base_url: String,
    pub scoring_url: String,
    pub scoring_timeout: Duration,
    pub result_delay: Duration,
    pub cors_origins: Option<String>,
    pub analysis_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port: u16 = parse_var("PORT", 3000);

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        let scoring_url = std::env::var("SCORING_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let scoring_timeout = Duration::from_secs(parse_var("SCORING_TIMEOUT_SECS", 10));
        let result_delay = Duration::from_millis(parse_var("RESULT_DELAY_MS", 600));
        let analysis_ttl = Duration::from_secs(parse_var("ANALYSIS_TTL_SECS", 3600));

        let cors_origins = std::env::var("CORS_ORIGINS").ok();

        Self {
            port,
            base_url,
            scoring_url,
            scoring_timeout,
            result_delay,
            cors_origins,
            analysis_ttl,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("[fraudshield] Invalid {} value {:?}, defaulting to {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
