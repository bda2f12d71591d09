use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cropcal-cli", version, about = "Cropcal sowing calendar CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crop sowing rules
    Crop {
        #[command(subcommand)]
        action: commands::crop::CropAction,
    },
    /// Task templates per crop
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Sowing-date validation and event generation
    Sow {
        #[command(subcommand)]
        action: commands::sow::SowAction,
    },
    /// Custom calendar events
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Generated calendar events
    Auto {
        #[command(subcommand)]
        action: commands::auto::AutoAction,
    },
    /// Upcoming events, or everything on one day
    Agenda {
        /// Show only this date instead of the upcoming view
        #[arg(long)]
        on: Option<NaiveDate>,
        /// Act as this user instead of the configured default
        #[arg(long)]
        user: Option<i64>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Crop { action } => commands::crop::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Sow { action } => commands::sow::run(action),
        Commands::Event { action } => commands::event::run(action),
        Commands::Auto { action } => commands::auto::run(action),
        Commands::Agenda { on, user } => commands::agenda::run(on, user),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
