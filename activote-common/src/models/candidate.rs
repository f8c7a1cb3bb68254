use serde::{Deserialize, Serialize};

use crate::utils::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(deserialize_with = "lenient::id")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub vote_count: u64,
}

impl Candidate {
    /// Initials used when no portrait is available ("Alice Johnson" -> "AJ").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Sum of all vote counts.
pub fn total_votes(candidates: &[Candidate]) -> u64 {
    candidates.iter().map(|c| c.vote_count).sum()
}

/// Highest vote count, `0` for an empty slate.
pub fn max_votes(candidates: &[Candidate]) -> u64 {
    candidates.iter().map(|c| c.vote_count).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_json() {
        let json = r#"[{"id":1,"name":"Alice Johnson","party":"Progressive Party","imageUrl":"alice.jpg","voteCount":5},
                       {"id":2,"name":"Bob Smith","party":"Conservative Alliance","imageUrl":null,"voteCount":3}]"#;
        let candidates: Vec<Candidate> = serde_json::from_str(json).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].image_url.as_deref(), Some("alice.jpg"));
        assert_eq!(candidates[1].image_url, None);
        assert_eq!(total_votes(&candidates), 8);
        assert_eq!(max_votes(&candidates), 5);
        assert_eq!(candidates[0].initials(), "AJ");
    }

    #[test]
    fn test_empty_slate() {
        assert_eq!(total_votes(&[]), 0);
        assert_eq!(max_votes(&[]), 0);
    }
}
