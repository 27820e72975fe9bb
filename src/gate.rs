//! Access Gate
//!
//! The password barrier shown while the blog runs in developer mode and the
//! caller has not yet been authorized. The check is a plain shared-string
//! comparison; there are no retry limits.

/// Message surfaced inline when a submission does not match.
pub const INCORRECT_PASSWORD: &str = "Incorrect password. Please try again.";

/// Authorization state of one browser session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthorized,
    Authorized,
}

impl AuthState {
    pub fn is_authorized(self) -> bool {
        matches!(self, AuthState::Authorized)
    }
}

/// Outcome of a password submission. `Denied` is the only error this core
/// produces (an authentication failure) and carries the user-visible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthResult {
    Granted,
    Denied(String),
}

impl AuthResult {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthResult::Granted)
    }
}

/// check_access
///
/// Grants iff the submitted string equals the expected one byte for byte. No
/// trimming, case folding or hashing is applied. When no password is
/// configured, nothing can match, not even the empty string.
pub fn check_access(submitted: &str, expected: Option<&str>) -> AuthResult {
    match expected {
        Some(expected) if submitted == expected => AuthResult::Granted,
        _ => AuthResult::Denied(INCORRECT_PASSWORD.to_string()),
    }
}

/// Session
///
/// Session-scoped holder of `AuthState`. The only transition is
/// `Unauthorized -> Authorized`, fired by a granted submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    auth: AuthState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auth(auth: AuthState) -> Self {
        Self { auth }
    }

    pub fn auth(&self) -> AuthState {
        self.auth
    }

    /// Checks a submission and applies the transition. A denial never
    /// downgrades an authorized session.
    pub fn submit_password(&mut self, submitted: &str, expected: Option<&str>) -> AuthResult {
        let result = check_access(submitted, expected);
        if result.is_granted() {
            self.auth = AuthState::Authorized;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_only_on_exact_match() {
        assert_eq!(check_access("s3cret", Some("s3cret")), AuthResult::Granted);
        assert!(!check_access("S3CRET", Some("s3cret")).is_granted());
        assert!(!check_access(" s3cret", Some("s3cret")).is_granted());
        assert!(!check_access("s3cret\n", Some("s3cret")).is_granted());
        assert!(!check_access("", Some("s3cret")).is_granted());
    }

    #[test]
    fn empty_password_matches_empty_expected() {
        assert!(check_access("", Some("")).is_granted());
    }

    #[test]
    fn absent_expected_password_denies_everything() {
        assert_eq!(
            check_access("", None),
            AuthResult::Denied(INCORRECT_PASSWORD.to_string())
        );
        assert!(!check_access("anything", None).is_granted());
    }

    #[test]
    fn denied_submission_keeps_session_locked() {
        let mut session = Session::new();
        let result = session.submit_password("wrong", Some("right"));
        assert_eq!(result, AuthResult::Denied(INCORRECT_PASSWORD.to_string()));
        assert_eq!(session.auth(), AuthState::Unauthorized);
    }

    #[test]
    fn authorization_is_sticky() {
        let mut session = Session::new();
        assert!(session.submit_password("right", Some("right")).is_granted());
        assert_eq!(session.auth(), AuthState::Authorized);

        session.submit_password("wrong", Some("right"));
        session.submit_password("", None);
        assert_eq!(session.auth(), AuthState::Authorized);
    }
}
