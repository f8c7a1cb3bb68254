pub mod cli;
pub mod commands;
pub mod components;
pub mod flow;
pub mod pages;
pub mod render;
pub mod routes;
pub mod telemetry;

pub use commands::{execute, AppContext, CommandError};
pub use flow::{FlowError, VoteState, VotingFlow};
pub use routes::Route;
