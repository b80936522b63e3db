use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// REST API root; collections are mounted below it.
    pub base_url: String,
    pub timezone: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Route opened at startup (e.g. `entries/new`).
    pub route: String,
    pub log_file: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api/".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            request_timeout: 30,
            route: String::new(),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn timezone(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|_| AppError::Timezone(self.timezone.clone()))
    }
}

#[derive(Debug, Parser)]
#[command(name = "financas_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000/api/).
    #[arg(long)]
    base_url: Option<String>,
    /// Route to open at startup (e.g. categories, entries/new, entries/3/edit).
    #[arg(long)]
    route: Option<String>,
    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let file = config::File::with_name(config_path).required(false);
    layered(file, environment(None), args)
}

/// `FINANCAS_TUI_*` variables; `vars` replaces the process environment.
fn environment(vars: Option<config::Map<String, String>>) -> config::Environment {
    config::Environment::with_prefix("FINANCAS_TUI").source(vars)
}

/// Defaults, then `file`, then `env`, then the CLI flags.
fn layered<F>(file: F, env: config::Environment, args: Args) -> Result<AppConfig>
where
    F: config::Source + Send + Sync + 'static,
{
    let mut settings: AppConfig = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(route) = args.route {
        settings.route = route;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
        base_url = "http://files.example/api/"
        timezone = "Europe/Lisbon"
        route = "categories"
    "#;

    fn toml() -> config::File<config::FileSourceString, config::FileFormat> {
        config::File::from_str(TOML, config::FileFormat::Toml)
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment(Some(vars))
    }

    fn args(flags: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("financas_tui").chain(flags.iter().copied())).unwrap()
    }

    #[test]
    fn file_values_override_defaults() {
        let config = layered(toml(), env(&[]), args(&[])).unwrap();
        assert_eq!(config.base_url, "http://files.example/api/");
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Lisbon);
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn environment_overrides_the_file() {
        let config = layered(
            toml(),
            env(&[
                ("FINANCAS_TUI_BASE_URL", "http://env.example/api/"),
                ("FINANCAS_TUI_REQUEST_TIMEOUT", "45"),
            ]),
            args(&[]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://env.example/api/");
        assert_eq!(config.request_timeout(), Duration::from_secs(45));
        assert_eq!(config.route, "categories");
    }

    #[test]
    fn flags_override_the_environment() {
        let config = layered(
            toml(),
            env(&[
                ("FINANCAS_TUI_BASE_URL", "http://env.example/api/"),
                ("FINANCAS_TUI_ROUTE", "entries"),
            ]),
            args(&["--base-url", "http://cli.example/api/", "--route", "entries/new"]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://cli.example/api/");
        assert_eq!(config.route, "entries/new");
        assert_eq!(config.timezone, "Europe/Lisbon");
    }

    #[test]
    fn defaults_point_at_a_local_api() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:3000/api/");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.timezone().unwrap(), chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn unknown_timezone_is_reported() {
        let config = AppConfig {
            timezone: "Mars/Olympus".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.timezone(), Err(AppError::Timezone(_))));
    }
}
