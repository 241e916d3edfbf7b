use std::sync::Arc;

use chrono::{TimeZone, Utc};
use kanban_domain::*;
use proptest::prelude::*;

const COLUMN_POOL: [&str; 5] = ["c0", "c1", "c2", "c3", "ghost"];
const CARD_POOL: [&str; 10] = ["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8", "k9"];

fn initial_board() -> Board {
    Board::from_parts(
        "b1",
        "Property Board",
        [
            Column::new("c0", "Todo").with_cards(["k0", "k1", "k2"]),
            Column::new("c1", "Doing").with_cards(["k3"]),
            Column::new("c2", "Done"),
        ],
        ["k0", "k1", "k2", "k3"].map(|id| {
            let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
            Card::new(id, format!("Card {}", id)).with_timestamps(at, at)
        }),
    )
}

fn arb_column() -> impl Strategy<Value = String> {
    prop::sample::select(COLUMN_POOL.to_vec()).prop_map(str::to_string)
}

fn arb_card() -> impl Strategy<Value = String> {
    prop::sample::select(CARD_POOL.to_vec()).prop_map(str::to_string)
}

fn arb_edit() -> impl Strategy<Value = BoardAction> {
    prop_oneof![
        (arb_column(), arb_card())
            .prop_map(|(column, card)| BoardAction::add_card(column, Card::new(card, "New"))),
        (arb_card(), arb_column()).prop_map(|(card, column)| BoardAction::delete_card(card, column)),
        (arb_card(), "[a-z]{0,6}").prop_map(|(card, title)| BoardAction::update_card(
            card,
            CardUpdate {
                title: Some(title),
                ..Default::default()
            }
        )),
        (arb_card(), arb_column(), arb_column(), 0usize..6)
            .prop_map(|(card, from, to, index)| BoardAction::move_card(card, from, to, index)),
        (arb_column(), 0usize..6, 0usize..6)
            .prop_map(|(column, from, to)| BoardAction::reorder_card(column, from, to)),
        (arb_column(), prop::collection::vec(arb_card(), 0..3)).prop_map(|(column, cards)| {
            BoardAction::AddColumn {
                column: Column::new(column, "Added").with_cards(cards),
            }
        }),
        (arb_column(), "[A-Z][a-z]{0,5}")
            .prop_map(|(column, title)| BoardAction::update_column(column, title)),
        arb_column().prop_map(|column| BoardAction::delete_column(column)),
    ]
}

fn arb_action() -> impl Strategy<Value = BoardAction> {
    prop_oneof![
        6 => arb_edit(),
        1 => Just(BoardAction::Undo),
        1 => Just(BoardAction::Redo),
        1 => prop::option::of(arb_card()).prop_map(BoardAction::SetDraggedCard),
        1 => "[a-z]{0,4}".prop_map(|search| BoardAction::SetFilter(FilterUpdate::search(search))),
    ]
}

fn run(actions: &[BoardAction]) -> Vec<BoardState> {
    let mut states = vec![BoardState::with_board(initial_board())];
    for action in actions {
        let next = reduce(states.last().unwrap(), action);
        states.push(next);
    }
    states
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn referential_integrity_holds(actions in prop::collection::vec(arb_action(), 0..40)) {
        for state in run(&actions) {
            let violations = state.board.integrity_violations();
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
    }

    #[test]
    fn reducer_is_deterministic(actions in prop::collection::vec(arb_action(), 1..20)) {
        let states = run(&actions);
        let replayed = run(&actions);
        prop_assert_eq!(states, replayed);
    }

    #[test]
    fn input_state_is_never_mutated(actions in prop::collection::vec(arb_action(), 1..20)) {
        let mut state = BoardState::with_board(initial_board());
        for action in &actions {
            let before = serde_json::to_value(&*state.board).unwrap();
            let filters_before = state.active_filters.clone();
            let history_len = state.history.len();

            let next = reduce(&state, action);

            prop_assert_eq!(serde_json::to_value(&*state.board).unwrap(), before);
            prop_assert_eq!(&state.active_filters, &filters_before);
            prop_assert_eq!(state.history.len(), history_len);
            state = next;
        }
    }

    #[test]
    fn unknown_column_moves_are_noops(
        actions in prop::collection::vec(arb_action(), 0..15),
        card in arb_card(),
        index in 0usize..6,
    ) {
        let state = run(&actions).pop().unwrap();
        for action in [
            BoardAction::move_card(card.clone(), "ghost", "c0", index),
            BoardAction::move_card(card.clone(), "c0", "ghost", index),
            BoardAction::reorder_card("ghost", index, 0),
        ] {
            let next = reduce(&state, &action);
            prop_assert_eq!(&next, &state);
            prop_assert!(Arc::ptr_eq(&next.board, &state.board));
        }
    }

    #[test]
    fn set_filter_never_changes_board(
        actions in prop::collection::vec(arb_action(), 0..15),
        search in "[a-z]{0,5}",
    ) {
        let state = run(&actions).pop().unwrap();
        let next = reduce(&state, &BoardAction::SetFilter(FilterUpdate::search(search)));
        prop_assert!(Arc::ptr_eq(&next.board, &state.board));
        prop_assert_eq!(next.history, state.history);
    }

    #[test]
    fn every_applied_edit_undoes_exactly(
        actions in prop::collection::vec(arb_action(), 0..15),
        edit in arb_edit(),
    ) {
        let before = run(&actions).pop().unwrap();
        let after = reduce(&before, &edit);
        prop_assume!(!Arc::ptr_eq(&before.board, &after.board));

        let undone = reduce(&after, &BoardAction::Undo);
        prop_assert_eq!(&*undone.board, &*before.board);

        let redone = reduce(&undone, &BoardAction::Redo);
        prop_assert_eq!(&*redone.board, &*after.board);
    }

    #[test]
    fn full_unwind_and_replay(actions in prop::collection::vec(arb_action(), 0..30)) {
        let last = run(&actions).pop().unwrap();
        let depth = last.history.undo_depth();

        let mut state = last.clone();
        for _ in 0..depth {
            state = reduce(&state, &BoardAction::Undo);
        }
        prop_assert_eq!(&*state.board, &initial_board());
        prop_assert!(!state.can_undo());

        for _ in 0..depth {
            state = reduce(&state, &BoardAction::Redo);
        }
        prop_assert_eq!(&*state.board, &*last.board);
    }
}
