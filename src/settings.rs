use std::env;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub prefix: Option<String>,

    /// Directory receiving the generated design templates
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Directory receiving the rendered outputs
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Artificial latency of the simple generate endpoint
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_env() -> String {
    "file".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("reports/templates")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports/output")
}

fn default_simulated_delay_ms() -> u64 {
    100
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: default_env(),
            host: default_host(),
            port: default_port(),
            prefix: None,
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
            simulated_delay_ms: default_simulated_delay_ms(),
            log_dir: default_log_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Mount point of the API, `/api` unless overridden.
    pub fn api_prefix(&self) -> String {
        let prefix = self.prefix.clone().unwrap_or("/api".to_string());
        let trimmed = prefix.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Where the settings were read from, for the startup log.
    pub fn source(&self) -> &'static str {
        if self.env == "file" {
            ".env file"
        } else {
            "server environment"
        }
    }

    pub fn download_url(&self, report_id: &str) -> String {
        let prefix = self.api_prefix();
        format!(
            "{}/reports/download/{}",
            prefix.trim_end_matches('/'),
            report_id
        )
    }
}

pub fn get_config() -> Result<Config, envy::Error> {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        let _ = dotenvy::dotenv();
    }
    envy::from_env::<Config>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_is_api() {
        let config = Config::default();
        assert_eq!(config.api_prefix(), "/api");
        assert_eq!(config.download_url("abc"), "/api/reports/download/abc");
    }

    #[test]
    fn custom_prefix_trailing_slash_is_trimmed() {
        let config = Config {
            prefix: Some("/v1/".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_prefix(), "/v1");
        assert_eq!(config.download_url("abc"), "/v1/reports/download/abc");
    }

    #[test]
    fn source_follows_env_mode() {
        assert_eq!(Config::default().source(), ".env file");
        let config = Config {
            env: "server".to_string(),
            ..Config::default()
        };
        assert_eq!(config.source(), "server environment");
    }

    #[test]
    fn root_prefix_keeps_single_slash() {
        let config = Config {
            prefix: Some("/".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_prefix(), "/");
        assert_eq!(config.download_url("abc"), "/reports/download/abc");
    }
}
