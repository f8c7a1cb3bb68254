use std::io::{self, BufRead, Write};

use activote_app::{cli::Cli, execute, telemetry, AppContext};
use clap::Parser;
use tracing::debug;

fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let guard = telemetry::init(cli.log_file.as_deref());

    let config = cli.resolve_config()?;
    debug!(api_url = %config.api_url, session = %config.session_path.display(), "client configured");
    let ctx = AppContext::from_config(config)?;

    let mut confirm = ask;
    match execute(&cli.command, &ctx, &mut confirm).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            // exit() skips destructors; flush the log file first.
            drop(guard);
            std::process::exit(1);
        }
    }
}
