mod auth;
mod calendar;
mod chart;
mod config;
mod error;
mod ipc;
mod model;
mod source;
mod store;
mod view;

use anyhow::Context;
use clap::Parser;
use source::{HttpSource, StaticSource, StudentSource};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    let cli = config::Cli::parse();
    let config = config::Config::from_cli(cli).context("invalid configuration")?;
    log::info!(
        "starting rosterd {} (api={}, page_size={}, fallback={})",
        env!("CARGO_PKG_VERSION"),
        config.api_url.as_deref().unwrap_or("offline"),
        config.page_size,
        config
            .fallback_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".to_string()),
    );

    let fallback = match config.fallback_file.as_deref() {
        Some(path) => StaticSource::from_file(path)?,
        None => StaticSource::bundled()?,
    };
    let remote = match config.api_url.as_deref() {
        Some(url) => Some(HttpSource::new(url, config.http_timeout)?),
        None => None,
    };
    let loaded = source::load_initial(
        remote.as_ref().map(|s| s as &dyn StudentSource),
        &fallback,
    );
    let mut state = ipc::AppState::new(&config, loaded);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                log::warn!("stdin closed: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // No id to echo back.
                log::warn!("dropping malformed request: {e}");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{resp}");
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}
