use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::{BoardAction, Column};

pub async fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Add { title, id } => {
            let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            ctx.dispatch(BoardAction::AddColumn {
                column: Column::new(id.clone(), title),
            })?;
            ctx.save().await?;
            output::output_success(ctx.board().column(&id));
        }
        ColumnAction::List => {
            let columns: Vec<&Column> = ctx.board().columns.iter().map(|c| c.as_ref()).collect();
            output::output_list(columns);
        }
        ColumnAction::Rename { id, title } => {
            ctx.dispatch(BoardAction::update_column(id.clone(), title))?;
            ctx.save().await?;
            output::output_success(ctx.board().column(&id));
        }
        ColumnAction::Delete { id } => {
            let removed_cards = ctx.board().column(&id).map(Column::len).unwrap_or(0);
            ctx.dispatch(BoardAction::delete_column(id.clone()))?;
            ctx.save().await?;
            output::output_success(serde_json::json!({
                "deleted": id,
                "removedCards": removed_cards
            }));
        }
    }
    Ok(())
}
