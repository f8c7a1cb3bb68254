use activote_common::{password_strength, ProfileForm, ValidationError, MAX_PASSWORD_STRENGTH};

use crate::routes::Route;

/// Account credentials chosen on the signup page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// First step of registration. Nothing is sent to the backend here; the
/// accepted credentials pre-fill the profile setup form.
#[derive(Debug, Clone, Default)]
pub struct SignupPage {
    strength: u8,
}

impl SignupPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-scores the password as it is typed.
    pub fn update_password(&mut self, password: &str) -> u8 {
        self.strength = password_strength(password);
        self.strength
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn can_submit(&self) -> bool {
        self.strength >= MAX_PASSWORD_STRENGTH
    }

    pub fn submit(&mut self, form: &SignupForm) -> Result<(Route, ProfileForm), ValidationError> {
        let mut missing = Vec::new();
        if form.username.trim().is_empty() {
            missing.push("username");
        }
        if form.password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let score = self.update_password(&form.password);
        if !self.can_submit() {
            return Err(ValidationError::WeakPassword { score });
        }
        if form.password != form.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        let draft = ProfileForm {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
            ..ProfileForm::default()
        };
        Ok((Route::Setup, draft))
    }
}
