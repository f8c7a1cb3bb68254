use std::sync::Arc;

use activote_client::{ClientError, Session, SessionContext, VotingApi};
use activote_common::LoginRequest;
use tracing::{error, info};

use crate::routes::Route;

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password. Please try again.";

pub struct LoginPage {
    api: Arc<dyn VotingApi>,
    session: SessionContext,
    error: Option<String>,
    loading: bool,
}

impl LoginPage {
    pub fn new(api: Arc<dyn VotingApi>, session: SessionContext) -> Self {
        Self { api, session, error: None, loading: false }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Submits the login form. On success the session is stored and the
    /// dashboard route is returned; otherwise `error()` explains why.
    pub async fn submit(&mut self, username: &str, password: &str) -> Option<Route> {
        self.error = None;
        if username.trim().is_empty() || password.is_empty() {
            self.error = Some("Please enter your username and password.".to_string());
            return None;
        }

        self.loading = true;
        let result = self.login(username.trim(), password).await;
        self.loading = false;

        match result {
            Ok(route) => Some(route),
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<Route, String> {
        let credentials = LoginRequest { username: username.to_string(), password: password.to_string() };
        let response = self.api.login(&credentials).await.map_err(|e| {
            error!("Login error: {}", e);
            match &e {
                ClientError::Status { .. } => e.server_message().unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
                _ => INVALID_CREDENTIALS.to_string(),
            }
        })?;

        let (Some(token), Some(user_id)) = (response.token(), response.user_id) else {
            error!("No token received from server");
            return Err(LOGIN_FAILED.to_string());
        };

        self.session
            .set(Session::new(token, user_id))
            .map_err(|e| {
                error!("Could not persist session: {}", e);
                LOGIN_FAILED.to_string()
            })?;
        info!("Logged in as voter {}", user_id);
        Ok(Route::Dashboard)
    }
}
