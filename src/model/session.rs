use serde::{Deserialize, Serialize};

/// The caller's login state, passed explicitly into every cart operation.
///
/// Issued by the login flow, which lives outside this crate. Nothing here writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    pub fn from_token(token: Option<String>) -> Self {
        Self {
            token,
            username: None,
        }
    }

    /// The bearer token, or `None` when it is missing or empty.
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_counts_as_missing() {
        assert!(!Session::anonymous().is_authenticated());
        assert!(!Session::from_token(Some(String::new())).is_authenticated());
        assert_eq!(Session::authenticated("t0k", "crio").bearer(), Some("t0k"));
        assert_eq!(Session::authenticated("t0k", "crio").username(), Some("crio"));
        assert_eq!(Session::from_token(Some("t0k".into())).username(), None);
    }
}
