use std::path::Path;

use crate::cli::InitArgs;
use crate::context::CliContext;
use crate::output;
use kanban_core::AppConfig;
use kanban_domain::seed::DEFAULT_COLUMNS;
use kanban_domain::{generate_board, Board, BoardAction, Column, SeedOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub async fn handle_init(file_path: &Path, config: &AppConfig, args: InitArgs) -> anyhow::Result<()> {
    if !args.force && CliContext::file_exists(file_path).await {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            file_path.display()
        );
    }

    let mut options = SeedOptions::from_config(config);
    if let Some(title) = args.title {
        options.title = title;
    }

    let board = if args.empty {
        Board::from_parts(
            uuid::Uuid::new_v4().to_string(),
            options.title,
            DEFAULT_COLUMNS
                .iter()
                .map(|(id, title)| Column::new(*id, *title)),
            [],
        )
    } else {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generate_board(&mut rng, &options)
    };

    let ctx = CliContext::create(file_path, board);
    ctx.save().await?;
    tracing::info!("Created new board file: {}", file_path.display());
    output::output_success(ctx.board());
    Ok(())
}

pub fn handle_show(ctx: &CliContext) -> anyhow::Result<()> {
    output::output_success(ctx.board());
    Ok(())
}

pub fn handle_check(ctx: &CliContext) -> anyhow::Result<()> {
    ctx.board().validate()?;
    output::output_success(serde_json::json!({
        "consistent": true,
        "columns": ctx.board().column_count(),
        "cards": ctx.board().card_count(),
    }));
    Ok(())
}

/// Replays every parseable entry of a JSON action array. Entries that are
/// not actions are skipped; actions the board ignores are counted, not fatal.
pub async fn handle_apply(ctx: &mut CliContext, actions_path: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read(actions_path).await?;
    let entries: Vec<serde_json::Value> = serde_json::from_slice(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not a JSON array: {}", actions_path.display(), e))?;

    let mut actions = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<BoardAction>(entry) {
            Ok(action) => actions.push(action),
            Err(e) => {
                tracing::warn!(index, "Skipping malformed action: {}", e);
                skipped += 1;
            }
        }
    }

    let applied = actions.len();
    let changed = ctx.context_mut().dispatch_all(actions);
    if changed > 0 {
        ctx.save().await?;
    }

    let history = ctx.history();
    output::output_success(serde_json::json!({
        "applied": applied,
        "changed": changed,
        "skipped": skipped,
        "undoDepth": history.undo_depth(),
        "redoDepth": history.redo_depth(),
    }));
    Ok(())
}
