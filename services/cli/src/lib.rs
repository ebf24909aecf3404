mod cli;
mod commands;
mod render;

use dairy_qa::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
