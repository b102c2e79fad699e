//! Property tests: the rating/status rule holds after every mutation

use proptest::prelude::*;
use std::sync::Arc;
use ticket_desk_core::reducer::Reducer;
use ticket_desk_testing::{properties, test_clock, test_ids};
use tickets::{
    AppAction, AppReducer, AppState, FormAction, Rating, TicketAction, TicketEnvironment,
    TicketId, TicketReducer, TicketState, TicketStatus,
};

fn env() -> TicketEnvironment {
    TicketEnvironment::new(Arc::new(test_clock()), Arc::new(test_ids()))
}

fn arb_status() -> impl Strategy<Value = TicketStatus> {
    prop::sample::select(TicketStatus::ALL.to_vec())
}

fn arb_rating() -> impl Strategy<Value = Rating> {
    (Rating::MIN..=Rating::MAX).prop_filter_map("in range", |n| Rating::new(n).ok())
}

// Small id space so actions regularly hit existing tickets and regularly miss.
fn arb_id() -> impl Strategy<Value = TicketId> {
    (1u128..=8).prop_map(|n| TicketId::from_uuid(uuid::Uuid::from_u128(n)))
}

fn arb_ticket_action() -> impl Strategy<Value = TicketAction> {
    prop_oneof![
        ("[a-z]{0,6}", arb_status()).prop_map(|(title, status)| TicketAction::Create {
            title,
            description: String::new(),
            status,
        }),
        (arb_id(), "[a-z]{0,6}", arb_status()).prop_map(|(id, title, status)| {
            TicketAction::Update {
                id,
                title,
                description: String::new(),
                status,
            }
        }),
        arb_id().prop_map(|id| TicketAction::Delete { id }),
        (arb_id(), arb_rating()).prop_map(|(id, rating)| TicketAction::Rate { id, rating }),
    ]
}

fn arb_form_action() -> impl Strategy<Value = FormAction> {
    prop_oneof![
        Just(FormAction::OpenForCreate),
        arb_id().prop_map(|id| FormAction::OpenForEdit { id }),
        "[a-z]{0,6}".prop_map(FormAction::SetTitle),
        arb_status().prop_map(FormAction::SetStatus),
        Just(FormAction::Save),
        Just(FormAction::Cancel),
    ]
}

fn arb_app_action() -> impl Strategy<Value = AppAction> {
    prop_oneof![
        arb_ticket_action().prop_map(AppAction::Ticket),
        arb_form_action().prop_map(AppAction::Form),
    ]
}

/// Rating a ticket that is not completed is allowed by the store, so the
/// rule only constrains sequences where ratings are given to completed tickets.
fn rates_only_completed(state: &TicketState, action: &TicketAction) -> bool {
    match action {
        TicketAction::Rate { id, .. } => state.get(id).is_none_or(|t| t.status.is_completed()),
        _ => true,
    }
}

proptest! {
    #[test]
    fn invariant_holds_after_every_ticket_action(
        actions in properties::sequences(arb_ticket_action(), 48),
    ) {
        let env = env();
        let reducer = TicketReducer::new();
        let mut state = TicketState::new();

        for action in actions {
            if !rates_only_completed(&state, &action) {
                continue;
            }
            reducer.reduce(&mut state, action, &env);
            prop_assert!(state.invariant_holds());
        }
    }

    #[test]
    fn reopening_any_ticket_clears_its_rating(
        actions in properties::sequences(arb_ticket_action(), 48),
        reopen_as in prop::sample::select(
            vec![TicketStatus::Created, TicketStatus::UnderAssistance],
        ),
    ) {
        let env = env();
        let reducer = TicketReducer::new();
        let state = properties::run_checked(&reducer, &env, TicketState::new(), actions, |state| {
            // Ids are never duplicated and order is insertion order.
            let ids: Vec<_> = state.iter().map(|t| t.id).collect();
            let mut sorted = ids.clone();
            sorted.sort_by_key(|id| *id.as_uuid());
            sorted.dedup();
            assert_eq!(sorted.len(), ids.len());
        });

        let ids: Vec<_> = state.iter().map(|t| t.id).collect();
        let mut state = state;
        for (position, id) in ids.iter().enumerate() {
            reducer.reduce(
                &mut state,
                TicketAction::Update {
                    id: *id,
                    title: "reopened".into(),
                    description: String::new(),
                    status: reopen_as,
                },
                &env,
            );
            let ticket = state.get(id).unwrap();
            prop_assert_eq!(ticket.rating, None);
            prop_assert_eq!(state.position(id), Some(position));
        }
        prop_assert!(state.invariant_holds());
    }

    #[test]
    fn ui_driven_sequences_keep_invariant(actions in properties::sequences(arb_app_action(), 64)) {
        let env = env();
        let reducer = AppReducer::new();
        let mut state = AppState::default();

        for action in actions {
            // The row only offers the rating control on completed tickets.
            if let AppAction::Ticket(ticket_action) = &action {
                if !rates_only_completed(&state.tickets, ticket_action) {
                    continue;
                }
            }
            reducer.reduce(&mut state, action, &env);
            prop_assert!(state.tickets.invariant_holds());
        }
    }

    #[test]
    fn unknown_ids_never_change_state(
        actions in properties::sequences(arb_ticket_action(), 24),
        miss in 100u128..200,
    ) {
        let env = env();
        let reducer = TicketReducer::new();
        let mut state = TicketState::new();
        for action in actions {
            reducer.reduce(&mut state, action, &env);
        }
        let before = state.clone();
        let missing = TicketId::from_uuid(uuid::Uuid::from_u128(miss));

        reducer.reduce(&mut state, TicketAction::Delete { id: missing }, &env);
        let rating = Rating::new(1).unwrap();
        reducer.reduce(&mut state, TicketAction::Rate { id: missing, rating }, &env);
        reducer.reduce(
            &mut state,
            TicketAction::Update {
                id: missing,
                title: "x".into(),
                description: "y".into(),
                status: TicketStatus::Completed,
            },
            &env,
        );

        prop_assert_eq!(state, before);
    }
}
