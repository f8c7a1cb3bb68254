pub mod blockchain;
pub mod dashboard;
pub mod ledger;
pub mod login;
pub mod logout;
pub mod setup;
pub mod signup;

use crate::routes::Route;

/// Result of loading a page's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLoad {
    Ready,
    /// The page may not be shown; go to the given route instead.
    Redirect(Route),
    /// Loading failed; the message replaces the page content.
    Failed(String),
}
