use crate::cli::{CardAction, CardAddArgs, CardListArgs, CardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_core::KanbanError;
use kanban_domain::filter::visible_cards;
use kanban_domain::{ActiveFilters, BoardAction, Card, CardUpdate, FieldUpdate};

pub async fn handle(ctx: &mut CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Add(args) => {
            let card = build_card(ctx, args.id.clone(), &args)?;
            let id = card.id.clone();
            ctx.dispatch(BoardAction::add_card(args.column, card))?;
            ctx.save().await?;
            output::output_success(ctx.board().card(&id));
        }
        CardAction::List(args) => {
            let filters = build_filters(&args);
            let board = ctx.board();
            let cards: Vec<&Card> = match &args.column {
                Some(column_id) => {
                    if board.column(column_id).is_none() {
                        return Err(column_not_found(column_id).into());
                    }
                    visible_cards(board, column_id, &filters)
                }
                None => board
                    .columns
                    .iter()
                    .flat_map(|column| visible_cards(board, &column.id, &filters))
                    .collect(),
            };
            output::output_list(cards);
        }
        CardAction::Get { id } => match ctx.board().card(&id) {
            Some(card) => output::output_success(serde_json::json!({
                "card": card,
                "columnId": ctx.board().column_of(&id).map(|c| c.id.as_str()),
            })),
            None => output::output_error(&format!("Card not found: {}", id)),
        },
        CardAction::Update(args) => {
            let mut updates = build_card_update(ctx, &args)?;
            if updates.is_empty() {
                output::output_error("Nothing to update");
            }
            updates.updated_at = Some(chrono::Utc::now());
            ctx.dispatch(BoardAction::update_card(args.id.clone(), updates))?;
            ctx.save().await?;
            output::output_success(ctx.board().card(&args.id));
        }
        CardAction::Delete { id, column } => {
            let column = match column {
                Some(column) => column,
                None => current_column(ctx, &id)?,
            };
            ctx.dispatch(BoardAction::delete_card(id.clone(), column))?;
            ctx.save().await?;
            output::output_success(serde_json::json!({"deleted": id}));
        }
        CardAction::Move { id, to, index } => {
            let from = current_column(ctx, &id)?;
            let index = match index {
                Some(index) => index,
                None => ctx
                    .board()
                    .column(&to)
                    .map(|column| column.len())
                    .ok_or_else(|| column_not_found(&to))?,
            };
            ctx.dispatch(BoardAction::move_card(id.clone(), from, to.clone(), index))?;
            ctx.save().await?;
            output::output_success(ctx.board().column(&to));
        }
        CardAction::Reorder { column, from, to } => {
            ctx.dispatch(BoardAction::reorder_card(column.clone(), from, to))?;
            ctx.save().await?;
            output::output_success(ctx.board().column(&column));
        }
    }
    Ok(())
}

fn current_column(ctx: &CliContext, card_id: &str) -> Result<String, KanbanError> {
    ctx.board()
        .column_of(card_id)
        .map(|column| column.id.clone())
        .ok_or_else(|| KanbanError::NotFound(format!("Card not found: {}", card_id)))
}

fn column_not_found(column_id: &str) -> KanbanError {
    KanbanError::NotFound(format!("Column not found: {}", column_id))
}

fn build_card(ctx: &CliContext, id: Option<String>, args: &CardAddArgs) -> Result<Card, KanbanError> {
    let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut card = Card::new(id, args.title.clone()).with_labels(ctx.resolve_labels(&args.labels)?);
    if let Some(priority) = args.priority {
        card = card.with_priority(priority);
    }
    if let Some(description) = &args.description {
        card = card.with_description(description.clone());
    }
    if let Some(assignee) = &args.assignee {
        card = card.with_assignee(assignee.clone());
    }
    Ok(card)
}

fn build_filters(args: &CardListArgs) -> ActiveFilters {
    ActiveFilters {
        labels: args.labels.clone(),
        priority: args.priority,
        search: args.search.clone().unwrap_or_default(),
    }
}

fn optional_field(value: &Option<String>, clear: bool) -> FieldUpdate<String> {
    match (value, clear) {
        (_, true) => FieldUpdate::Clear,
        (Some(value), false) => FieldUpdate::Set(value.clone()),
        (None, false) => FieldUpdate::NoChange,
    }
}

fn build_card_update(ctx: &CliContext, args: &CardUpdateArgs) -> Result<CardUpdate, KanbanError> {
    let labels = if args.clear_labels {
        Some(Vec::new())
    } else if args.labels.is_empty() {
        None
    } else {
        Some(ctx.resolve_labels(&args.labels)?)
    };

    Ok(CardUpdate {
        title: args.title.clone(),
        description: optional_field(&args.description, args.clear_description),
        labels,
        priority: args.priority,
        assignee: optional_field(&args.assignee, args.clear_assignee),
        ..Default::default()
    })
}
