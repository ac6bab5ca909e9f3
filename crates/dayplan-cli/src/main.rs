//! Dayplan CLI Application
//!
//! Command-line interface and HTTP API for the dayplan schedule editor.

mod args;
mod cli;
mod renderer;
mod server;

use anyhow::{Context, Result};
use args::{Args, Commands, DateArg, DayArgs};
use clap::Parser;
use cli::Cli;
use dayplan_core::store::DayStoreBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let store = DayStoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize store")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Dayplan started");

    match command {
        Some(Day(args)) => Cli::new(store, renderer).show_day(args).await,
        Some(Event { command }) => {
            Cli::new(store, renderer)
                .handle_event_command(command)
                .await
        }
        Some(Replan(args)) => Cli::new(store, renderer).replan(args).await,
        Some(Task { command }) => {
            Cli::new(store, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Note { command }) => {
            Cli::new(store, renderer)
                .handle_note_command(command)
                .await
        }
        Some(Metrics { command }) => {
            Cli::new(store, renderer)
                .handle_metrics_command(command)
                .await
        }
        Some(Serve(args)) => {
            info!("Starting HTTP API on {}", args.bind);
            server::run_server(store, args.bind)
                .await
                .context("HTTP server failed")
        }
        None => {
            Cli::new(store, renderer)
                .show_day(DayArgs {
                    date: DateArg::default(),
                })
                .await
        }
    }
}
