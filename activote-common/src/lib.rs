pub mod errors;
pub mod models;
pub mod utils;

pub use errors::ValidationError;
pub use models::{
    block::{Block, BlockTimestamp},
    candidate::Candidate,
    statistics::VotingStatistics,
    voter::{password_strength, ProfileForm, ProfileImage, Voter, MAX_PASSWORD_STRENGTH},
    wire::{ErrorBody, LoginRequest, LoginResponse, SignupReceipt, VoteReceipt, VoteRequest},
};
