use clap::Parser;
use support_end_notifier::{Cli, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), support_end_notifier::AppError> {
    run(Cli::parse()).await
}
