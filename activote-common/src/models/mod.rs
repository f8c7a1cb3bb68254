pub mod block;
pub mod candidate;
pub mod statistics;
pub mod voter;
pub mod wire;
