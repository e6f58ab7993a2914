use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Enter username and password")]
    MissingCredentials,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated { username: String },
}

/// Presence-only login gate in front of the dashboard. No credential store.
#[derive(Debug, Default)]
pub struct LoginGate {
    session: Session,
}

impl LoginGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<String, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        self.session = Session::Authenticated {
            username: username.to_string(),
        };
        Ok(username.to_string())
    }

    pub fn logout(&mut self) {
        self.session = Session::Unauthenticated;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, Session::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match &self.session {
            Session::Authenticated { username } => Some(username),
            Session::Unauthenticated => None,
        }
    }
}
