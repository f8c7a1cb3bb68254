pub mod http;

use activote_common::{
    Block, Candidate, LoginRequest, LoginResponse, ProfileForm, SignupReceipt, VoteReceipt,
    VoteRequest, Voter, VotingStatistics,
};
use async_trait::async_trait;

use crate::errors::ClientError;

/// Operations the voting backend exposes. One request/response round trip each.
#[async_trait]
pub trait VotingApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ClientError>;
    async fn signup(&self, form: &ProfileForm) -> Result<SignupReceipt, ClientError>;
    async fn get_voter(&self, voter_id: u64) -> Result<Voter, ClientError>;
    async fn get_statistics(&self, voter_id: u64) -> Result<VotingStatistics, ClientError>;
    async fn get_candidates(&self) -> Result<Vec<Candidate>, ClientError>;
    async fn cast_vote(&self, vote: &VoteRequest) -> Result<VoteReceipt, ClientError>;
    async fn get_blockchain(&self) -> Result<Vec<Block>, ClientError>;
}
