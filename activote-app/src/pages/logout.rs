use activote_client::{ClientError, SessionContext};
use tracing::info;

use crate::{flow::VotingFlow, routes::Route};

/// Removes the stored session and returns to the entry page.
pub fn logout(session: &SessionContext, flow: Option<&mut VotingFlow>) -> Result<Route, ClientError> {
    session.clear()?;
    if let Some(flow) = flow {
        flow.logout();
    }
    info!("Session cleared");
    Ok(Route::Entry)
}
