use activote_client::SessionContext;

/// Screens of the client. Paths mirror the web front-end's routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Entry,
    Signup,
    Setup,
    Dashboard,
    Vote,
    Blockchain,
    Logout,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Signup => "/auth/signup",
            Route::Setup => "/auth/setup",
            Route::Dashboard => "/dashboard",
            Route::Vote => "/vote",
            Route::Blockchain => "/blockchain",
            Route::Logout => "/auth/logout",
        }
    }

    /// Protected routes need a stored token and user id.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Vote)
    }
}

/// Where a navigation to `target` actually lands given the current session.
pub fn navigate(target: Route, session: &SessionContext) -> Route {
    if target.is_protected() && session.require().is_err() {
        Route::Entry
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activote_client::Session;

    #[test]
    fn test_protected_routes_redirect_without_session() {
        let session = SessionContext::in_memory();
        assert_eq!(navigate(Route::Dashboard, &session), Route::Entry);
        assert_eq!(navigate(Route::Vote, &session), Route::Entry);
        assert_eq!(navigate(Route::Blockchain, &session), Route::Blockchain);
        assert_eq!(navigate(Route::Signup, &session), Route::Signup);

        session.set(Session::new("t", 1)).unwrap();
        assert_eq!(navigate(Route::Dashboard, &session), Route::Dashboard);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Route::Entry.path(), "/");
        assert_eq!(Route::Dashboard.path(), "/dashboard");
    }
}
