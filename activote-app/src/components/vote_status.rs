use activote_client::{SessionContext, VotingApi};
use activote_common::utils::resolve_user_image;
use tracing::error;

/// The voter's own card: name, picture and whether they have voted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserVoteStatus {
    Ready {
        username: String,
        has_voted: bool,
        image: String,
    },
    Failed(String),
}

impl UserVoteStatus {
    /// Fetches `GET /voters/:id` for the session user. `origin` is the backend
    /// origin used to resolve uploaded images.
    pub async fn load(api: &dyn VotingApi, session: &SessionContext, origin: &str) -> Self {
        let Some(user_id) = session.user_id() else {
            return Self::Failed("User ID not found. Please log in again.".to_string());
        };
        if session.token().is_none() {
            return Self::Failed("No token found. Please log in again.".to_string());
        }

        match api.get_voter(user_id).await {
            Ok(voter) => Self::Ready {
                username: voter.username,
                has_voted: voter.has_voted,
                image: resolve_user_image(origin, voter.user_image.as_deref()),
            },
            Err(e) => {
                error!("Error fetching user data: {}", e);
                Self::Failed("Failed to fetch user data.".to_string())
            }
        }
    }
}
