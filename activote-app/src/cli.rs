use std::path::PathBuf;

use activote_client::ClientConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "activote", version, about = "Command-line client for the Activote voting service")]
pub struct Cli {
    /// Client configuration file (JSON)
    #[arg(short = 'c', long, default_value = "activote.json")]
    pub config: PathBuf,

    /// Override the API base URL, e.g. http://localhost:8080/api
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override where the session is stored
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Check credentials and register with a full profile in one step
    Signup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// Repeat of the password
        #[arg(long)]
        confirm: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Register a voter profile (no password strength check)
    Setup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Forget the stored session
    Logout,
    /// Turnout, candidates, charts and recent blocks
    Dashboard,
    /// Vote for a candidate
    Vote {
        candidate_id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Browse the ledger
    Blockchain {
        /// First block of the window (1-based)
        #[arg(long, default_value_t = 1)]
        start: usize,
        /// Show the details of one block
        #[arg(long)]
        block: Option<u64>,
    },
    /// The signed-in voter and whether they have voted
    Status,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ProfileArgs {
    #[arg(long)]
    pub cellphone: String,
    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: String,
    /// Profile picture to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn resolve_config(&self) -> std::io::Result<ClientConfig> {
        let mut config = ClientConfig::load_or_default(&self.config)?;
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(path) = &self.session {
            config.session_path = path.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vote_and_overrides() {
        let cli = Cli::try_parse_from([
            "activote",
            "--api-url",
            "http://10.1.1.1:8080/api",
            "--config",
            "/nonexistent/activote.json",
            "vote",
            "2",
            "--yes",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Vote { candidate_id: 2, yes: true });

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.api_url, "http://10.1.1.1:8080/api");
        assert_eq!(config.session_path, ClientConfig::default().session_path);
    }

    #[test]
    fn test_parse_blockchain_defaults() {
        let cli = Cli::try_parse_from(["activote", "blockchain"]).unwrap();
        assert_eq!(cli.command, Command::Blockchain { start: 1, block: None });
    }

    #[test]
    fn test_setup_requires_profile_fields() {
        assert!(Cli::try_parse_from(["activote", "setup", "-u", "a", "-p", "b"]).is_err());
        let cli = Cli::try_parse_from([
            "activote", "setup", "-u", "a", "-p", "b", "--cellphone", "555", "--date-of-birth", "1990-01-01",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Setup { profile: ProfileArgs { image: None, .. }, .. }));
    }
}
