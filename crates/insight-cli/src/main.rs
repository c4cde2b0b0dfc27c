use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Insight CLI - submit product research and browse saved analyses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit documents, links and product lines for analysis
    Submit {
        /// Text document to include (repeatable)
        #[arg(short, long = "document", value_name = "PATH")]
        documents: Vec<PathBuf>,
        /// Blog or article link to include (repeatable)
        #[arg(short, long = "link", value_name = "URL")]
        links: Vec<String>,
        /// Product line to analyze (repeatable)
        #[arg(short, long = "product", value_name = "NAME")]
        products: Vec<String>,
        /// Save the results to history
        #[arg(long)]
        save: bool,
        /// Title for the saved entry
        #[arg(long, requires = "save")]
        title: Option<String>,
    },
    /// Browse saved research
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved research, newest first
    List,
    /// Show the analyses of a saved entry
    Show { id: String },
    /// Delete a saved entry
    Delete { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config and history file locations
    Path,
    /// Print the effective configuration
    Show,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("insight=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            documents,
            links,
            products,
            save,
            title,
        } => {
            let args = commands::submit::SubmitArgs {
                documents,
                links,
                products,
                save,
                title,
            };
            commands::submit::run(args).await?
        }
        Commands::History { action } => match action {
            HistoryAction::List => commands::history::list().await?,
            HistoryAction::Show { id } => commands::history::show(&id).await?,
            HistoryAction::Delete { id } => commands::history::delete(&id).await?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Show => commands::config::show()?,
        },
    }

    Ok(())
}
