/// Where the client navigates after losing its session.
pub const LOGIN_REDIRECT: &str = "/admin/login";

/// Admin session state. Token presence alone gates access; there is no
/// client-side expiry check; the server's 401 is the source of truth.
#[derive(Debug, Default, Clone)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn store(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_machine() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        session.store("token-123".into());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("token-123"));

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }
}
