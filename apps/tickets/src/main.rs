//! Ticket list demo binary
//!
//! Walks through a short session on the ticket list (create, edit, rate,
//! delete, cancel) and prints the screen after every interaction.

use clap::Parser;
use std::process::ExitCode;
use thiserror::Error;
use ticket_desk_runtime::{Store, StoreError};
use tickets::{
    AppAction, AppReducer, AppState, Config, FormAction, Rating, TicketAction, TicketEnvironment,
    TicketId, TicketListView, TicketState, TicketStatus,
};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scripted walkthrough of the ticket list screen
#[derive(Debug, Parser)]
#[command(name = "tickets", version, about)]
struct Args {
    /// Print the final state as JSON instead of the last screen
    #[arg(long)]
    json: bool,

    /// Start from an empty list even if `TICKETS_SEED` is set
    #[arg(long)]
    empty: bool,

    /// Status picked for the ticket the walkthrough creates
    /// (created, "under assistance", completed)
    #[arg(long, default_value_t = TicketStatus::Created)]
    status: TicketStatus,
}

/// Why the walkthrough stopped
#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("could not serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

type TicketStore = Store<AppState, AppAction, TicketEnvironment, AppReducer>;

/// Sends button presses and redraws the screen from the latest snapshot
struct Demo {
    store: TicketStore,
    screen: watch::Receiver<AppState>,
    show: bool,
}

impl Demo {
    async fn press(&mut self, label: &str, action: impl Into<AppAction>) -> Result<(), StoreError> {
        self.store.send(action.into()).await?;
        if self.show {
            println!(">>> {label}");
            self.render();
        }
        Ok(())
    }

    fn render(&mut self) {
        let view = TicketListView::from_state(&self.screen.borrow_and_update());
        println!("{}", view.render_text());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("tickets={0},ticket_desk_runtime={0}", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(&args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "ticket demo failed");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: &Args, config: &Config) -> Result<(), DemoError> {
    let env = TicketEnvironment::production();
    let tickets = if config.seed && !args.empty {
        TicketState::seeded(env.clock.as_ref(), env.ids.as_ref())
    } else {
        TicketState::new()
    };
    tracing::info!(tickets = tickets.len(), "starting ticket list");

    let store: TicketStore = Store::with_config(
        AppState::new(tickets),
        AppReducer::new(),
        env,
        config.store_config(),
    );
    let mut demo = Demo {
        screen: store.subscribe(),
        store: store.clone(),
        show: !args.json,
    };

    if demo.show {
        println!("=== Tickets ===\n");
        demo.render();
    }

    demo.press("Add", FormAction::OpenForCreate).await?;
    demo.press("Type title", FormAction::SetTitle("Projector has no signal".into()))
        .await?;
    demo.press(
        "Type description",
        FormAction::SetDescription("Meeting room B, HDMI cable already swapped.".into()),
    )
    .await?;
    if args.status != TicketStatus::default() {
        let label = format!("Select {}", args.status);
        demo.press(&label, FormAction::SetStatus(args.status)).await?;
    }
    demo.press("Save", FormAction::Save).await?;

    let (first, newest) = store
        .state(|s| {
            let first = s.tickets.as_slice().first().map(|t| t.id);
            (first, s.tickets.last().map(|t| t.id))
        })
        .await;

    if let Some(id) = newest {
        demo.press("Edit newest", FormAction::OpenForEdit { id }).await?;
        demo.press("Select Completed", FormAction::SetStatus(TicketStatus::Completed))
            .await?;
        demo.press("Save", FormAction::Save).await?;
        if let Ok(rating) = Rating::new(5) {
            demo.press("Rate 5 stars", TicketAction::Rate { id, rating }).await?;
        }
        demo.press("Edit newest", FormAction::OpenForEdit { id }).await?;
        demo.press(
            "Select Under Assistance",
            FormAction::SetStatus(TicketStatus::UnderAssistance),
        )
        .await?;
        demo.press("Save (rating dropped)", FormAction::Save).await?;
    }

    if let Some(id) = first {
        demo.press("Delete first", TicketAction::Delete { id }).await?;
    }
    demo.press(
        "Delete unknown ticket",
        TicketAction::Delete {
            id: TicketId::from_uuid(uuid::Uuid::nil()),
        },
    )
    .await?;

    demo.press("Add", FormAction::OpenForCreate).await?;
    demo.press("Type title", FormAction::SetTitle("Never mind".into())).await?;
    demo.press("Cancel", FormAction::Cancel).await?;

    if args.json {
        let snapshot = store.snapshot().await;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    store.shutdown_default().await?;
    Ok(())
}
