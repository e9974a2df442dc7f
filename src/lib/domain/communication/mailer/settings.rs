//! Transport settings

use std::fmt;

/// SMTP login
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name
    pub username: String,

    /// Password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// How to reach the mail server for one message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportSettings {
    /// SMTP host
    pub host: String,

    /// SMTP port, `0` keeps the transport's default
    pub port: u16,

    /// Upgrade the connection with STARTTLS
    pub enable_ssl: bool,

    /// Optional login
    pub credentials: Option<Credentials>,
}
