mod app;
mod config;
mod keys;
mod log;
mod quiz;
mod trivia;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use config::{FileSettingsStore, Settings, SettingsStore};
use quiz::{QuizController, RoundTimings};
use quiz::round::{ANSWER_SECONDS, FEEDBACK_SECONDS};
use trivia::{OpenTdbClient, QuestionFeed, TriviaApi};

#[derive(Parser)]
#[command(
    name = "trivium",
    about = "Timed trivia quizzes in your terminal, powered by the Open Trivia Database",
    version
)]
struct Cli {
    /// Config directory override (defaults to ~/.trivium)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Seconds allowed to answer each question
    #[arg(long, global = true, default_value_t = ANSWER_SECONDS)]
    answer_seconds: u32,

    /// Seconds the correct answer is shown before moving on
    #[arg(long, global = true, default_value_t = FEEDBACK_SECONDS)]
    feedback_seconds: u32,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore the default settings
    Reset,
    /// Show debug information
    Debug,
    /// List the trivia categories available upstream
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => config::get_config_dir()?,
    };
    log::initialize(Some(config_dir.as_path()));
    let store = FileSettingsStore::new(&config_dir);

    match cli.command {
        Some(Commands::Reset) => {
            println!("Restoring default settings...");
            store.save(&Settings::default())?;
            println!("Settings reset.");
            Ok(())
        }
        Some(Commands::Debug) => {
            let settings = store.load();
            println!("Debug information:");
            println!("  Config directory: {}", config_dir.display());
            println!("  Settings file: {}", store.path().display());
            println!(
                "  Log file: {}",
                log::log_file_path(Some(config_dir.as_path())).display()
            );
            println!("  Theme: {}", settings.theme);
            println!("  Category: {}", settings.category);
            println!("  Questions: {}", settings.amount);
            println!("  Difficulty: {}", settings.difficulty);
            println!(
                "  Timings: {}s answer, {}s feedback",
                cli.answer_seconds, cli.feedback_seconds
            );
            Ok(())
        }
        Some(Commands::Categories) => {
            let client = OpenTdbClient::from_env()?;
            let categories = client.fetch_categories().await?;
            for category in categories {
                println!("{:>4}  {}", category.id, category.name);
            }
            Ok(())
        }
        None => {
            let api: Arc<dyn TriviaApi> = Arc::new(OpenTdbClient::from_env()?);
            let feed = QuestionFeed::new(api, tokio::runtime::Handle::current());
            let controller = QuizController::new(Box::new(store), Box::new(feed));
            let timings = RoundTimings {
                answer_seconds: cli.answer_seconds,
                feedback_seconds: cli.feedback_seconds,
            };
            // The TUI loop blocks; keep the runtime's other workers free for fetches.
            tokio::task::block_in_place(|| app::run(controller, timings))
        }
    }
}
