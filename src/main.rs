#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::fs;
use std::process;

use anyhow::Error;
use domain::models::Event;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;

fn handle_error(err: Error) {
    eprintln!(
            "{}",
            Paint::red(format!(
                "Oh no! SalesDesk has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
                env!("CARGO_PKG_VERSION"),
                env!("VERGEN_GIT_DESCRIBE"),
                err
            ))
        );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
        eprintln!(
            "\nDebug logs can be enabled with RUST_LOG=salesdesk and are written to {}",
            cli::log_path().to_string_lossy()
        );
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let log_path = cli::log_path();
    let mut _guard = None;
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("salesdesk")
    {
        if let Some(log_dir) = log_path.parent() {
            let _ = fs::create_dir_all(log_dir);
            let file_appender = tracing_appender::rolling::never(log_dir, "debug.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            _guard = Some(guard);

            tracing_subscriber::fmt()
                .json()
                .with_max_level(tracing::Level::DEBUG)
                .with_writer(writer)
                .init();
        }
    }

    match cli::parse().await {
        Ok(true) => {}
        Ok(false) => process::exit(0),
        Err(ready_err) => {
            handle_error(ready_err);
            return;
        }
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    if let Err(err) = ui::start(event_tx, event_rx).await {
        ui::destruct_terminal_for_panic();
        handle_error(err);
    }

    drop(_guard);
    process::exit(0);
}
