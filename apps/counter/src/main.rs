//! Counter demo binary
//!
//! Presses the counter's buttons in a fixed order and redraws the number
//! from the Store's snapshot after each press.

use counter::{CounterAction, CounterEnvironment, CounterReducer, CounterState};
use ticket_desk_runtime::{Store, StoreError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SCRIPT: [CounterAction; 6] = [
    CounterAction::Increment,
    CounterAction::Increment,
    CounterAction::Increment,
    CounterAction::Decrement,
    CounterAction::Reset,
    CounterAction::Decrement,
];

#[tokio::main]
async fn main() -> Result<(), StoreError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,ticket_desk_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = Store::new(
        CounterState::default(),
        CounterReducer::new(),
        CounterEnvironment,
    );
    let mut screen = store.subscribe();

    println!("=== Counter ===");
    println!("[ {:>3} ]", screen.borrow_and_update().count);

    for press in SCRIPT {
        store.send(press).await?;
        println!("{press:?} -> [ {:>3} ]", screen.borrow_and_update().count);
    }

    store.shutdown_default().await
}
