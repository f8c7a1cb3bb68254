use serde::{Deserialize, Serialize};

use crate::utils::lenient;

/// Response of `GET /voters/statistics?voterId=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingStatistics {
    #[serde(default)]
    pub voted_voters: u64,
    #[serde(default)]
    pub total_voters: u64,
    #[serde(default, deserialize_with = "lenient::bool_flag")]
    pub has_voted: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub user_image: Option<String>,
}

impl VotingStatistics {
    /// Turnout as a percentage string with two decimals; `"0.00"` when no
    /// voters are registered.
    pub fn percentage_voted(&self) -> String {
        percentage(self.voted_voters, self.total_voters, 2)
    }
}

/// `part / whole * 100` rendered with `decimals` digits; `whole == 0` yields zero.
pub fn percentage(part: u64, whole: u64, decimals: usize) -> String {
    let value = if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    };
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_voted() {
        let stats = VotingStatistics {
            voted_voters: 1,
            total_voters: 3,
            has_voted: false,
            username: "alice".into(),
            user_image: None,
        };
        assert_eq!(stats.percentage_voted(), "33.33");
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0, 2), "0.00");
        assert_eq!(percentage(5, 0, 1), "0.0");
        assert_eq!(percentage(3, 8, 1), "37.5");
    }

    #[test]
    fn test_statistics_json_lenient_flag() {
        let json = r#"{"votedVoters": 4, "totalVoters": 10, "hasVoted": "true", "username": "bob", "userImage": "/uploads/bob.png"}"#;
        let stats: VotingStatistics = serde_json::from_str(json).unwrap();
        assert!(stats.has_voted);
        assert_eq!(stats.percentage_voted(), "40.00");
    }
}
