pub mod images;
pub mod lenient;
pub mod time;

pub use images::{resolve_candidate_image, resolve_user_image};
pub use time::format_timestamp;
