/// Bearer credential for the remote chat-completion API.
#[derive(Clone)]
pub struct ApiKey(String);

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self(value.trim().to_owned())
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<redacted>")
    }
}
