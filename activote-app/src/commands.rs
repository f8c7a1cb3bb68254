use std::{path::Path, sync::Arc, time::Duration};

use activote_client::{
    ClientConfig, ClientError, FileSessionStore, HttpApi, LedgerBus, LedgerEvent, SessionContext, VotingApi,
};
use activote_common::{ProfileForm, ProfileImage, ValidationError};
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{
    cli::{Command, ProfileArgs},
    components::UserVoteStatus,
    pages::{
        blockchain::BlockchainPage,
        dashboard::{DashboardPage, VoteError},
        login::LoginPage,
        logout::logout,
        setup::SetupPage,
        signup::{SignupForm, SignupPage},
        PageLoad,
    },
    render,
    routes::{navigate, Route},
};

/// Extra time allowed for the ledger refresh beyond the settle delay.
const REFRESH_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Vote(#[from] VoteError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Message a page showed instead of its content.
    #[error("{0}")]
    Page(String),
    #[error("Please log in first.")]
    LoginRequired,
}

/// Everything a command needs: the API client, the shared session and the
/// ledger event bus.
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn VotingApi>,
    pub session: SessionContext,
    pub config: ClientConfig,
    pub bus: LedgerBus,
}

impl AppContext {
    /// Wires the reqwest client to a file-backed session at `config.session_path`.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let store = Arc::new(FileSessionStore::new(&config.session_path));
        let session = SessionContext::init(store)?;
        let api = Arc::new(HttpApi::new(config.clone(), session.clone())?);
        Ok(Self { api, session, config, bus: LedgerBus::default() })
    }

    fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(
            Arc::clone(&self.api),
            self.session.clone(),
            self.bus.clone(),
            self.config.ledger_settle(),
        )
    }
}

/// Runs one command and returns the text to print. `confirm` answers yes/no
/// prompts such as the vote confirmation.
pub async fn execute(
    command: &Command,
    ctx: &AppContext,
    confirm: &mut (dyn FnMut(&str) -> bool + Send),
) -> Result<String, CommandError> {
    debug!(?command, "executing command");
    match command {
        Command::Login { username, password } => {
            let mut page = LoginPage::new(Arc::clone(&ctx.api), ctx.session.clone());
            match page.submit(username, password).await {
                Some(route) => Ok(format!("Logged in. Next: {}", route.path())),
                None => Err(CommandError::Page(page.error().unwrap_or_default().to_string())),
            }
        }
        Command::Signup { username, password, confirm: repeat, profile } => {
            let mut signup = SignupPage::new();
            let form = SignupForm {
                username: username.clone(),
                password: password.clone(),
                confirm_password: repeat.clone(),
            };
            let (_, draft) = signup.submit(&form)?;
            let form = complete_profile(draft, profile).await?;
            setup(ctx, &form).await
        }
        Command::Setup { username, password, profile } => {
            let draft = ProfileForm {
                username: username.clone(),
                password: password.clone(),
                ..ProfileForm::default()
            };
            let form = complete_profile(draft, profile).await?;
            setup(ctx, &form).await
        }
        Command::Logout => {
            let route = logout(&ctx.session, None)?;
            Ok(format!("Logged out. Next: {}", route.path()))
        }
        Command::Dashboard => {
            if navigate(Route::Dashboard, &ctx.session) != Route::Dashboard {
                return Err(CommandError::LoginRequired);
            }
            let mut page = ctx.dashboard_page();
            expect_ready(page.load().await)?;
            let ledger = page.ledger();
            let viewer = ledger.read().await;
            match page.data() {
                Some(data) => Ok(render::dashboard(data, &viewer)),
                None => Err(CommandError::Page("Failed to load dashboard data.".to_string())),
            }
        }
        Command::Vote { candidate_id, yes } => vote(ctx, *candidate_id, *yes, confirm).await,
        Command::Blockchain { start, block } => {
            let mut page = BlockchainPage::new(Arc::clone(&ctx.api));
            expect_ready(page.load().await)?;
            let viewer = page.viewer_mut();
            viewer.jump_to(start.saturating_sub(1));
            match block {
                Some(id) => viewer
                    .select(*id)
                    .map(|detail| render::block_detail(&detail))
                    .ok_or_else(|| CommandError::Page(format!("Block {} not found.", id))),
                None => Ok(render::ledger(viewer)),
            }
        }
        Command::Status => {
            let status = UserVoteStatus::load(ctx.api.as_ref(), &ctx.session, &ctx.config.origin()).await;
            match status {
                UserVoteStatus::Failed(message) => Err(CommandError::Page(message)),
                ready => Ok(render::vote_status(&ready)),
            }
        }
    }
}

fn expect_ready(load: PageLoad) -> Result<(), CommandError> {
    match load {
        PageLoad::Ready => Ok(()),
        PageLoad::Redirect(_) => Err(CommandError::LoginRequired),
        PageLoad::Failed(message) => Err(CommandError::Page(message)),
    }
}

async fn complete_profile(mut form: ProfileForm, profile: &ProfileArgs) -> Result<ProfileForm, CommandError> {
    form.cellphone = profile.cellphone.clone();
    form.date_of_birth = profile.date_of_birth.clone();
    if let Some(path) = &profile.image {
        form.image = Some(read_image(path).await?);
    }
    Ok(form)
}

async fn read_image(path: &Path) -> Result<ProfileImage, ClientError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "profile".to_string());
    Ok(ProfileImage { file_name, bytes })
}

async fn setup(ctx: &AppContext, form: &ProfileForm) -> Result<String, CommandError> {
    let mut page = SetupPage::new(Arc::clone(&ctx.api), ctx.session.clone());
    match page.submit(form).await.map_err(CommandError::Page)? {
        Route::Dashboard => Ok(format!("Registered and logged in as {}.", form.username)),
        route => Ok(format!("Registered {}. Log in to continue (next: {}).", form.username, route.path())),
    }
}

async fn vote(
    ctx: &AppContext,
    candidate_id: u64,
    yes: bool,
    confirm: &mut (dyn FnMut(&str) -> bool + Send),
) -> Result<String, CommandError> {
    if navigate(Route::Vote, &ctx.session) != Route::Vote {
        return Err(CommandError::LoginRequired);
    }
    let mut page = ctx.dashboard_page();
    expect_ready(page.load().await)?;

    let prompt = page.select(candidate_id)?;
    if !yes && !confirm(&prompt) {
        page.cancel();
        return Ok("Vote cancelled.".to_string());
    }

    let mut events = ctx.bus.subscribe();
    let mut out = page.confirm().await?;
    info!("Vote submitted for candidate {}", candidate_id);

    let wait = ctx.config.ledger_settle() + REFRESH_GRACE;
    match tokio::time::timeout(wait, wait_for_refresh(&mut events)).await {
        Ok(Some(LedgerEvent::Refreshed { .. })) => {
            let ledger = page.ledger();
            let mut viewer = ledger.write().await;
            let last = viewer.len();
            viewer.jump_to(last);
            out.push_str("\n\n");
            out.push_str(&render::ledger(&viewer));
        }
        Ok(Some(LedgerEvent::RefreshFailed { reason })) => {
            warn!("Ledger refresh after vote failed: {}", reason);
        }
        Ok(_) => {}
        Err(_) => warn!("Ledger refresh did not finish within {:?}", wait),
    }
    Ok(out)
}

async fn wait_for_refresh(events: &mut tokio::sync::broadcast::Receiver<LedgerEvent>) -> Option<LedgerEvent> {
    loop {
        match events.recv().await {
            Ok(event @ (LedgerEvent::Refreshed { .. } | LedgerEvent::RefreshFailed { .. })) => return Some(event),
            Ok(_) | Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => return None,
        }
    }
}
