mod cli;
mod infra;
mod routes;
mod server;

use visa_checklist::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
