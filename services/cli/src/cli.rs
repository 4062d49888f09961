use crate::commands::{
    run_clear, run_delete, run_list, run_ping, run_search, DeleteArgs, ListArgs, SearchArgs,
    StoreArgs,
};
use crate::console::{run_session, SessionSettings};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::info;
use vacancy_scout::config::AppConfig;
use vacancy_scout::error::AppError;
use vacancy_scout::telemetry;
use vacancy_scout::upstream::HeadHunterClient;

#[derive(Parser, Debug)]
#[command(
    name = "vacancy-scout",
    about = "Search hh.ru vacancies and keep them in local JSON or CSV files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prompt for a query and walk through search, ranking and filtering (default command)
    Interactive(InteractiveArgs),
    /// Fetch vacancies, save them and print the selection
    Search(SearchArgs),
    /// Print vacancies stored in a file
    List(ListArgs),
    /// Remove every stored vacancy with the given URL
    Delete(DeleteArgs),
    /// Remove all stored vacancies from a file
    Clear(StoreArgs),
    /// Check that the upstream API answers
    Ping,
}

#[derive(Args, Debug, Default)]
struct InteractiveArgs {
    /// Override the JSON file the session saves into
    #[arg(long)]
    save_to: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Interactive(InteractiveArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "vacancy scout starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Interactive(args) => {
            let client = HeadHunterClient::new(&config.api)?;
            let settings = SessionSettings {
                default_area: config.api.default_area.clone(),
                save_path: args
                    .save_to
                    .unwrap_or_else(|| config.storage.json_path.clone()),
            };
            let stdin = io::stdin();
            let mut input = stdin.lock();
            run_session(&client, &settings, &mut input, &mut out).await
        }
        Command::Search(args) => {
            let client = HeadHunterClient::new(&config.api)?;
            run_search(&client, &config, args, &mut out).await
        }
        Command::List(args) => run_list(&config, args, &mut out),
        Command::Delete(args) => run_delete(&config, args, &mut out),
        Command::Clear(args) => run_clear(&config, args, &mut out),
        Command::Ping => {
            let client = HeadHunterClient::new(&config.api)?;
            run_ping(&client, &mut out).await
        }
    }
}
