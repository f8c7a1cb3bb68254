use std::sync::Arc;

use activote_client::{ClientError, Session, SessionContext, VotingApi};
use activote_common::{LoginRequest, ProfileForm};
use tracing::{error, info, warn};

use crate::routes::Route;

/// Profile setup: posts the completed registration, then signs the new voter in.
pub struct SetupPage {
    api: Arc<dyn VotingApi>,
    session: SessionContext,
    loading: bool,
}

impl SetupPage {
    pub fn new(api: Arc<dyn VotingApi>, session: SessionContext) -> Self {
        Self { api, session, loading: false }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the dashboard route when the account was created and the
    /// follow-up login succeeded, the entry page when only the account was
    /// created, or the alert text on failure.
    pub async fn submit(&mut self, form: &ProfileForm) -> Result<Route, String> {
        form.validate().map_err(|e| e.to_string())?;

        self.loading = true;
        let result = self.api.signup(form).await;
        self.loading = false;

        let receipt = result.map_err(|e| {
            error!("Setup failed: {}", e);
            format!("Error: {}", failure_message(&e))
        })?;
        info!(
            "Voter registered: {}",
            receipt.voter.as_ref().map(|v| v.username.as_str()).unwrap_or(form.username.as_str())
        );

        let credentials = LoginRequest { username: form.username.clone(), password: form.password.clone() };
        match self.api.login(&credentials).await {
            Ok(response) => match (response.token(), response.user_id) {
                (Some(token), Some(user_id)) => {
                    if let Err(e) = self.session.set(Session::new(token, user_id)) {
                        warn!("Could not persist session after signup: {}", e);
                        return Ok(Route::Entry);
                    }
                    Ok(Route::Dashboard)
                }
                _ => Ok(Route::Entry),
            },
            Err(e) => {
                warn!("Automatic login after signup failed: {}", e);
                Ok(Route::Entry)
            }
        }
    }
}

fn failure_message(e: &ClientError) -> String {
    match e {
        ClientError::Validation(v) => v.to_string(),
        ClientError::Status { .. } => e
            .server_message()
            .unwrap_or_else(|| "Failed to complete setup".to_string()),
        other => other.to_string(),
    }
}
