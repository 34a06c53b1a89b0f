//! Credentials for the Services API.

/// Access credentials issued with a timeanddate.com API subscription.
#[derive(Clone)]
pub struct Authentication {
    access_key: String,
    secret_key: String,
}

impl Authentication {
    /// Creates a credential pair from an access key and its secret key.
    pub fn new(access_key: &str, secret_key: &str) -> Self {
        Self {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
        }
    }

    /// Query parameters carrying the credentials. Assembled before any other
    /// argument so an explicit argument with the same key wins.
    pub(crate) fn query_pairs(&self) -> [(&'static str, &str); 2] {
        [
            ("accesskey", self.access_key.as_str()),
            ("secretkey", self.secret_key.as_str()),
        ]
    }
}

impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secret key stays out of logs.
        f.debug_struct("Authentication")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
