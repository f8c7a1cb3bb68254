use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::lenient;

/// Voter profile as returned by `GET /voters/:id`. The password never comes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    #[serde(deserialize_with = "lenient::id")]
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub cellphone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub user_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool_flag")]
    pub has_voted: bool,
}

/// Image attached to a profile form, sent as the `userImage` multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields collected by the profile setup page and posted to `/voters/signup`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: String,
    pub password: String,
    pub cellphone: String,
    pub date_of_birth: String,
    pub image: Option<ProfileImage>,
}

impl ProfileForm {
    /// All text fields are required; the image is optional.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = [
            ("username", &self.username),
            ("password", &self.password),
            ("cellphone", &self.cellphone),
            ("dateOfBirth", &self.date_of_birth),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

/// Highest score [`password_strength`] can return.
pub const MAX_PASSWORD_STRENGTH: u8 = 4;

/// One point each for: length >= 8, an uppercase letter, a digit, and a
/// character that is not an ASCII letter or digit.
pub fn password_strength(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|passed| **passed).count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProfileForm {
        ProfileForm {
            username: "alice".into(),
            password: "S3cret!pass".into(),
            cellphone: "+15550100".into(),
            date_of_birth: "1990-04-01".into(),
            image: None,
        }
    }

    #[test]
    fn test_valid_form_without_image() {
        assert_eq!(form().validate(), Ok(()));
    }

    #[test]
    fn test_missing_fields_reported() {
        let mut f = form();
        f.cellphone = "".into();
        f.date_of_birth = "   ".into();
        assert_eq!(
            f.validate(),
            Err(ValidationError::MissingFields(vec!["cellphone", "dateOfBirth"]))
        );
        assert_eq!(f.validate().unwrap_err().to_string(), "Please fill in all fields.");
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(password_strength("abcdefgh"), 1);
        assert_eq!(password_strength("Abcdefgh"), 2);
        assert_eq!(password_strength("Abcdefg1"), 3);
        assert_eq!(password_strength("Abcdef1!"), MAX_PASSWORD_STRENGTH);
        assert_eq!(password_strength("A1!"), 3);
    }

    #[test]
    fn test_voter_json() {
        let json = r#"{"id": "9", "username": "carol", "hasVoted": 1, "userImage": "/uploads/c.png"}"#;
        let voter: Voter = serde_json::from_str(json).unwrap();
        assert_eq!(voter.id, 9);
        assert!(voter.has_voted);
        assert_eq!(voter.cellphone, None);
    }
}
