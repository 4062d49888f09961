mod cli;
mod commands;
mod console;
mod render;

use vacancy_scout::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
