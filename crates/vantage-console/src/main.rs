use clap::Parser;
use tracing::debug;
use vantage_console::startup::logging::init_logging;
use vantage_console::{Cli, Configuration, Console};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let configuration = Configuration::new(&cli)?;

    // Keep the guard alive so buffered file output is flushed on exit
    let _logging_guard = init_logging(&configuration.logging_config())?;
    debug!(
        "Connecting to {}{}",
        configuration.server_addr(),
        configuration.server_context_path()
    );

    let console = Console::connect(&configuration).await?;
    let output = console.execute(&cli.command).await?;
    println!("{}", output);

    Ok(())
}
