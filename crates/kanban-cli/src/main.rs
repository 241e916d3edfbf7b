mod cli;
mod context;
mod handlers;
mod output;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use kanban_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}

fn init_logging() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "kanban", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load();
    let file_path = resolve_file(cli.file, &config)?;

    match cli.command {
        Commands::Init(args) => handlers::board::handle_init(&file_path, &config, args).await?,
        Commands::Show => handlers::board::handle_show(&CliContext::load(&file_path).await?)?,
        Commands::Check => handlers::board::handle_check(&CliContext::load(&file_path).await?)?,
        Commands::Apply { actions } => {
            let mut ctx = CliContext::load(&file_path).await?;
            handlers::board::handle_apply(&mut ctx, &actions).await?;
        }
        Commands::Column(column_cmd) => {
            let mut ctx = CliContext::load(&file_path).await?;
            handlers::column::handle(&mut ctx, column_cmd.action).await?;
        }
        Commands::Card(card_cmd) => {
            let mut ctx = CliContext::load(&file_path).await?;
            handlers::card::handle(&mut ctx, card_cmd.action).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn resolve_file(flag: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    flag.or_else(|| config.default_file.clone()).ok_or_else(|| {
        anyhow::anyhow!("--file is required (or set KANBAN_FILE, or default_file in config.toml)")
    })
}
