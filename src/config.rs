use crate::calendar::DateWindow;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/students";
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Command-line options; every flag can also come from the environment.
#[derive(Debug, Parser)]
#[command(name = "rosterd", version, about = "Student records dashboard sidecar")]
pub struct Cli {
    /// Endpoint returning the initial JSON array of students
    #[arg(long, env = "ROSTERD_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// Skip the startup fetch and load the fallback dataset directly
    #[arg(long, env = "ROSTERD_OFFLINE")]
    pub offline: bool,
    /// JSON file replacing the bundled fallback dataset
    #[arg(long, env = "ROSTERD_FALLBACK_FILE")]
    pub fallback_file: Option<PathBuf>,
    /// Rows per table page
    #[arg(long, env = "ROSTERD_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    /// First selectable date (YYYY-MM-DD)
    #[arg(long, env = "ROSTERD_WINDOW_START", default_value = "2025-07-01")]
    pub window_start: NaiveDate,
    /// Last selectable date (YYYY-MM-DD)
    #[arg(long, env = "ROSTERD_WINDOW_END", default_value = "2025-07-05")]
    pub window_end: NaiveDate,
    /// Timeout for the startup fetch; the client default applies when unset
    #[arg(long, env = "ROSTERD_HTTP_TIMEOUT_SECS")]
    pub http_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    PageSize,
    #[error("date window start {start} is after end {end}")]
    Window { start: NaiveDate, end: NaiveDate },
    #[error("api url must not be empty")]
    EmptyApiUrl,
    #[error("http timeout must be at least 1 second")]
    Timeout,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` in offline mode.
    pub api_url: Option<String>,
    pub fallback_file: Option<PathBuf>,
    pub page_size: usize,
    pub window: DateWindow,
    pub http_timeout: Option<Duration>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.page_size == 0 {
            return Err(ConfigError::PageSize);
        }
        let window = DateWindow::new(cli.window_start, cli.window_end).ok_or(
            ConfigError::Window {
                start: cli.window_start,
                end: cli.window_end,
            },
        )?;
        let api_url = if cli.offline {
            None
        } else {
            let url = cli.api_url.trim();
            if url.is_empty() {
                return Err(ConfigError::EmptyApiUrl);
            }
            Some(url.to_string())
        };
        let http_timeout = match cli.http_timeout_secs {
            Some(0) => return Err(ConfigError::Timeout),
            Some(s) => Some(Duration::from_secs(s)),
            None => None,
        };
        Ok(Self {
            api_url,
            fallback_file: cli.fallback_file,
            page_size: cli.page_size,
            window,
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let mut argv = vec!["rosterd"];
        argv.extend_from_slice(args);
        Config::from_cli(Cli::try_parse_from(argv).expect("cli parse"))
    }

    #[test]
    fn defaults_match_the_dashboard() {
        let cfg = parse(&["--api-url", DEFAULT_API_URL]).expect("config");
        assert_eq!(cfg.api_url.as_deref(), Some(DEFAULT_API_URL));
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.window, DateWindow::default());
        assert!(cfg.http_timeout.is_none());
    }

    #[test]
    fn offline_drops_the_remote_source() {
        let cfg = parse(&["--offline", "--page-size", "10"]).expect("config");
        assert!(cfg.api_url.is_none());
        assert_eq!(cfg.page_size, 10);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            parse(&["--page-size", "0"]).unwrap_err(),
            ConfigError::PageSize
        );
        assert!(matches!(
            parse(&["--window-start", "2025-07-09", "--window-end", "2025-07-01"]),
            Err(ConfigError::Window { .. })
        ));
        assert_eq!(
            parse(&["--api-url", "  "]).unwrap_err(),
            ConfigError::EmptyApiUrl
        );
        assert_eq!(
            parse(&["--http-timeout-secs", "0"]).unwrap_err(),
            ConfigError::Timeout
        );
    }

    #[test]
    fn bad_dates_fail_at_parse_time() {
        assert!(Cli::try_parse_from(["rosterd", "--window-start", "July 1"]).is_err());
    }
}
