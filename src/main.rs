use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use idea_board::api;
use idea_board::config::ServerConfig;
use idea_board::{IdeaService, Store};

#[derive(Parser)]
#[command(name = "idea-board")]
#[command(about = "Collect ideas, vote on them, and keep notes")]
struct Cli {
    #[command(flatten)]
    config: ServerConfig,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Print every idea, most voted first
    List,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(
        |_| "idea_board=debug,idea_board_core=debug,tower_http=debug".into(),
    ));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&cli.config).await?,
        Commands::List => list(&cli.config)?,
    }

    Ok(())
}

async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Using data directory {}", config.data_dir.display());
    let app = api::app(config)?;

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!("Idea board listening on http://{}", config.addr());

    axum::serve(listener, app).await?;
    Ok(())
}

fn list(config: &ServerConfig) -> anyhow::Result<()> {
    let store = Store::open(config.storage().ideas_file())?;
    let ideas = IdeaService::new(store).list_ideas();

    if ideas.is_empty() {
        println!("No ideas yet.");
        return Ok(());
    }

    for idea in ideas {
        println!(
            "{:>5}  {}  ({} notes, {} files, {})",
            idea.votes,
            idea.title,
            idea.notes.len(),
            idea.files.len(),
            idea.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}
