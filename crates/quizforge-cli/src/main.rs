//! quizforge CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

use commands::QuizArgs;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Turn any text into a graded multiple-choice quiz"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a quiz and take it interactively
    Take {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Hide explanations on the results screen
        #[arg(long)]
        no_explanations: bool,

        /// Hide the progress line while answering
        #[arg(long)]
        no_progress: bool,
    },

    /// Generate a quiz and write the questions as JSON
    Generate {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score saved answers against a saved question set
    Grade {
        /// Question set JSON written by `quizforge generate`
        #[arg(long)]
        questions: PathBuf,

        /// Answers JSON mapping question index to the selected option text
        #[arg(long)]
        answers: PathBuf,

        /// Print the results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and a sample text
    Init,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizforge=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            quiz,
            no_explanations,
            no_progress,
        } => commands::take::execute(quiz, no_explanations, no_progress).await,
        Commands::Generate { quiz, output } => commands::generate::execute(quiz, output).await,
        Commands::Grade {
            questions,
            answers,
            json,
        } => commands::grade::execute(questions, answers, json),
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
