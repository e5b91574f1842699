// SPDX-License-Identifier: MPL-2.0
//! Terminal demo: drives the notification service through a short script and
//! prints every published queue state.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use toast_queue::config;
use toast_queue::domain::notifications::{DefaultDuration, MaxActive};
use toast_queue::error::ActionError;
use toast_queue::notifications::{
    service, Action, Avatar, Notification, NotificationOptions, Snapshot, Toaster,
};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
toast_queue demo

USAGE:
  toast_queue [OPTIONS]

OPTIONS:
  --config-dir <DIR>    Directory containing settings.toml
  --max-active <N>      Override the number of active notifications
  --duration-ms <MS>    Override the default auto-dismiss delay
  -h, --help            Print this help
";

struct Flags {
    config_dir: Option<PathBuf>,
    max_active: Option<usize>,
    duration_ms: Option<u64>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        max_active: args.opt_value_from_str("--max-active")?,
        duration_ms: args.opt_value_from_str("--duration-ms")?,
    };
    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("Ignoring unexpected arguments: {:?}", remaining);
    }
    Ok(Some(flags))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let (config, warning) = config::load_with_override(flags.config_dir);
    if let Some(key) = warning {
        tracing::warn!(%key, "Using default configuration");
    }
    let mut settings = config.queue_settings();
    if let Some(max) = flags.max_active {
        settings.max_active = MaxActive::new(max);
    }
    if let Some(ms) = flags.duration_ms {
        settings.default_duration = DefaultDuration::from_millis(ms);
    }

    let toaster = service::spawn(settings);
    let printer = tokio::spawn(print_updates(toaster.subscribe()));

    let outcome = run_script(&toaster).await;
    toaster.shutdown();
    printer.abort();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_script(toaster: &Toaster) -> toast_queue::error::Result<()> {
    let pause = |ms| tokio::time::sleep(Duration::from_millis(ms));

    toaster
        .success("Image saved", NotificationOptions::default())
        .await?;
    pause(400).await;

    let syncing = NotificationOptions {
        description: Some("Uploading 3 files".into()),
        dedupe_key: Some("sync".into()),
        ..NotificationOptions::default()
    };
    let sync_id = toaster.info("Syncing", syncing.clone()).await?;
    pause(400).await;
    toaster
        .info(
            "Syncing",
            NotificationOptions {
                description: Some("Uploading 1 file".into()),
                ..syncing
            },
        )
        .await?;

    let retry = Action::new("Retry", || async {
        Err(ActionError::new("server still unavailable"))
    });
    let failed = toaster
        .error(
            "Upload failed",
            NotificationOptions {
                action: Some(retry),
                duration: Some(Duration::ZERO),
                ..NotificationOptions::default()
            },
        )
        .await?;

    toaster
        .avatar(
            "commented on your photo",
            Avatar::new("Ada Lovelace").with_timestamp("just now"),
            NotificationOptions::default(),
        )
        .await?;

    // Hover over the sync toast for a while.
    toaster.pause_timer(&sync_id);
    pause(2000).await;
    toaster.resume_timer(&sync_id);

    if let Err(err) = toaster.activate_action(&failed).await {
        tracing::info!(error = %err, "Retry failed; toast dismissed anyway");
    }

    pause(3500).await;
    toaster.dismiss(None);
    pause(100).await;
    Ok(())
}

async fn print_updates(mut updates: tokio::sync::watch::Receiver<Snapshot>) {
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        println!("--- {} active", snapshot.len());
        for notification in snapshot.iter() {
            println!("  {}", describe(notification));
        }
    }
}

fn describe(notification: &Notification) -> String {
    let mut line = format!("[{}] {}", notification.category(), notification.title());
    if let Some(avatar) = notification.avatar() {
        line = format!("({}) {} {}", avatar.initials(), avatar.name, line);
    }
    if let Some(description) = notification.description() {
        line.push_str(&format!(" - {description}"));
    }
    if notification.is_persistent() {
        line.push_str(" (sticky)");
    }
    line
}
