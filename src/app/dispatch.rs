use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use mansite::compliance::MAX_MESSAGE_CHARS;
use mansite::relay::{MessageCheck, Relay, SendRequest};
use mansite::store::{MessageRecord, MessageStore, SqliteMessageStore};
use mansite::{Config, gateway};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;

const PREVIEW_CHARS: usize = 40;

fn render_check(check: &MessageCheck) -> String {
    let mut out = String::new();
    match check.result.rejection() {
        None => {
            let _ = writeln!(out, "Compliant");
        }
        Some(reason) => {
            let _ = writeln!(out, "Rejected ({}): {reason}", reason.code());
        }
    }
    let _ = writeln!(
        out,
        "Length: {}/{MAX_MESSAGE_CHARS} characters, {} segment(s)",
        check.length, check.segment_count
    );
    for segment in &check.segments {
        let _ = writeln!(
            out,
            "  [{}/{}] {}",
            segment.ordinal, segment.total_segments, segment.text
        );
    }
    out
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn render_history(records: &[MessageRecord]) -> String {
    if records.is_empty() {
        return "No messages logged yet.\n".to_string();
    }
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{}  {:<7}  {}  {} seg  {}  {}",
            record.created_at,
            record.status,
            record.phone_number,
            record.segment_count,
            record.provider,
            preview(&record.message)
        );
    }
    out
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting mansite gateway on {host} (random port)");
            } else {
                info!("Starting mansite gateway on {host}:{port}");
            }
            gateway::run_gateway(&host, port, Arc::new(config)).await
        }

        Commands::Check { message } => {
            let check = Relay::check(&message);
            print!("{}", render_check(&check));
            if let Some(reason) = check.result.rejection() {
                bail!("{reason}");
            }
            Ok(())
        }

        Commands::Send { to, message } => {
            let relay = Relay::from_config(&config)
                .await
                .context("create message relay")?;
            let outcome = relay
                .send(SendRequest {
                    phone_number: to,
                    message,
                    ip_address: "cli".into(),
                    user_agent: concat!("mansite-cli/", env!("CARGO_PKG_VERSION")).into(),
                })
                .await?;
            println!(
                "Message queued via {} (id {}, {} segment(s))",
                relay.provider_name(),
                outcome.message_id,
                outcome.segments
            );
            if let Some(record_id) = outcome.record_id {
                println!("Logged as {record_id}");
            }
            Ok(())
        }

        Commands::History { limit } => {
            let store = SqliteMessageStore::connect(&config.database_url())
                .await
                .context("open message log")?;
            let records = store.list_recent(limit).await?;
            print!("{}", render_history(&records));
            Ok(())
        }
    }
}
