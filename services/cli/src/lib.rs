mod cli;
mod demo;
mod render;
mod table;

use fortia_grid::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
