//! eventbot CLI: serve the bot, ask one-off questions, manage events.

use std::sync::Arc;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use eventbot::admin::AdminState;
use eventbot::catalog::Catalog;
use eventbot::chat::ChatListener;
use eventbot::config::Config;
use eventbot::engine::Resolver;
use eventbot::model::NewEvent;
use eventbot::ports::{ClockPort, FixedClock, FixedRandom, RandomPort, SystemClock, SystemRandom};
use eventbot::service;
use eventbot::storage::{EventStore, JsonFileStore};
use eventbot::telemetry::{TelemetryConfig, init_telemetry};

#[derive(Parser)]
#[command(name = "eventbot", about = "Answers questions about running events")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the admin surface and the chat listener (stdin/stdout)
    Serve,
    /// Resolve a single question and print the reply
    Ask {
        /// The question text
        text: String,
        /// Evaluate as of this local time (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        now: Option<NaiveDateTime>,
        /// Force a reply template (0, 1 or 2)
        #[arg(long)]
        template: Option<usize>,
    },
    /// Event list operations
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
}

#[derive(Subcommand)]
enum EventsAction {
    /// List events
    List,
    /// Append an event
    Add {
        #[arg(long)]
        name: String,
        /// Comma-separated aliases
        #[arg(long, default_value = "")]
        aliases: String,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "")]
        reward: String,
    },
    /// Remove the first event with this name
    Remove { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "eventbot".to_string(),
        default_level: config.log_level.clone(),
    })?;

    let store: Arc<dyn EventStore> = Arc::new(JsonFileStore::open(&config.events_path));

    match cli.command {
        Command::Serve => cmd_serve(&config, store).await,
        Command::Ask {
            text,
            now,
            template,
        } => cmd_ask(store.as_ref(), &text, now, template),
        Command::Events { action } => {
            let catalog = Catalog::new(store);
            match action {
                EventsAction::List => cmd_events_list(&catalog),
                EventsAction::Add {
                    name,
                    aliases,
                    start,
                    end,
                    content,
                    reward,
                } => {
                    let event = NewEvent::new(name, start, end)
                        .aliases_csv(&aliases)
                        .content(content)
                        .reward(reward)
                        .build();
                    catalog.add(event)?;
                    println!("Added.");
                    Ok(())
                }
                EventsAction::Remove { name } => {
                    let removed = catalog.remove(&name)?;
                    println!("Removed: {}", removed.name);
                    Ok(())
                }
            }
        }
    }
}

async fn cmd_serve(config: &Config, store: Arc<dyn EventStore>) -> anyhow::Result<()> {
    let catalog = Arc::new(Catalog::new(Arc::clone(&store)));
    let listener = ChatListener::new(store, Resolver::default());

    tracing::info!(path = %config.events_path.display(), "chat listener reading stdin");
    service::run(
        config.admin_addr(),
        AdminState { catalog },
        listener,
        tokio::io::BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        async {
            tokio::signal::ctrl_c().await.ok();
        },
    )
    .await?;
    Ok(())
}

fn cmd_ask(
    store: &dyn EventStore,
    text: &str,
    now: Option<NaiveDateTime>,
    template: Option<usize>,
) -> anyhow::Result<()> {
    let clock: Arc<dyn ClockPort> = match now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock::new()),
    };
    let random: Arc<dyn RandomPort> = match template {
        Some(index) => Arc::new(FixedRandom(index)),
        None => Arc::new(SystemRandom::new()),
    };

    let events = store.load_events()?;
    let resolution = Resolver::new(clock, random).resolve(text, &events)?;
    if let Some(reply) = resolution.reply() {
        println!("{reply}");
    }
    Ok(())
}

fn cmd_events_list(catalog: &Catalog) -> anyhow::Result<()> {
    let events = catalog.list()?;
    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    println!(
        "{:<20}  {:<10}  {:<10}  ALIASES",
        "NAME", "START", "END"
    );
    println!("{}", "-".repeat(70));
    for event in &events {
        println!(
            "{:<20}  {:<10}  {:<10}  {}",
            event.name,
            event.start,
            event.end,
            event.aliases.join(", ")
        );
    }
    println!("\n{} event(s)", events.len());
    Ok(())
}
