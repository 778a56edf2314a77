//! quizkit CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Validate, list, and score academic quizzes")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every quiz file in the data directory
    Validate {
        /// Directory of quiz JSON files (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// List quizzes grouped by course and lecture
    List {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print a quiz without its answer keys
    Show {
        /// Quiz identifier
        #[arg(long)]
        quiz_id: String,
    },

    /// Score a submission and store the result
    Score {
        /// Quiz identifier
        #[arg(long)]
        quiz_id: String,

        /// Submission JSON file ({"answers": [...], "total_time_sec": ...})
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the stored result for a quiz
    Review {
        /// Quiz identifier
        #[arg(long)]
        quiz_id: String,

        /// Also write the result as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Write the grouped quiz index as an HTML page
    Index {
        /// Output file
        #[arg(long, default_value = "./index.html")]
        output: PathBuf,
    },

    /// Reshuffle multiple-choice options of a quiz in place
    Shuffle {
        /// Quiz identifier
        #[arg(long)]
        quiz_id: String,

        /// RNG seed for a reproducible order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create starter config and a sample quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quizkit_core=info,quizkit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = config::load_config_from(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Validate { data_dir } => commands::validate::execute(&config, data_dir),
            Commands::List { format } => commands::list::execute(&config, format),
            Commands::Show { quiz_id } => commands::show::execute(&config, quiz_id),
            Commands::Score {
                quiz_id,
                answers,
                format,
            } => commands::score::execute(&config, quiz_id, answers, format),
            Commands::Review { quiz_id, html } => commands::review::execute(&config, quiz_id, html),
            Commands::Index { output } => commands::index::execute(&config, output),
            Commands::Shuffle { quiz_id, seed } => commands::shuffle::execute(&config, quiz_id, seed),
            Commands::Init => commands::init::execute(),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
