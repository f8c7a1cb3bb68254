pub mod api;
pub mod config;
pub mod errors;
pub mod events;
pub mod session;

pub use api::{http::HttpApi, VotingApi};
pub use config::ClientConfig;
pub use errors::ClientError;
pub use events::{LedgerBus, LedgerEvent};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionContext, SessionStore};
