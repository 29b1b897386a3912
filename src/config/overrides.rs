//! Caller-supplied overrides collected from command-line flags.

/// Username and password, which are only ever supplied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword {
    pub username: String,
    pub password: String,
}

/// Values the caller wants to take precedence over the base configuration.
///
/// Setters treat an empty string as "not supplied", so a field cannot be
/// cleared through an override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOverrides {
    endpoint: Option<String>,
    container: Option<String>,
    table_path: Option<String>,
    credentials: Option<UserPassword>,
    access_key: Option<String>,
}

fn supplied(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.is_empty()).then_some(value)
}

impl RawOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = supplied(endpoint);
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = supplied(container);
        self
    }

    pub fn with_table_path(mut self, table_path: impl Into<String>) -> Self {
        self.table_path = supplied(table_path);
        self
    }

    /// Both halves must be non-empty, otherwise the pair counts as not supplied.
    pub fn with_user_password(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = match (supplied(username), supplied(password)) {
            (Some(username), Some(password)) => Some(UserPassword { username, password }),
            _ => None,
        };
        self
    }

    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = supplied(access_key);
        self
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    pub fn table_path(&self) -> Option<&str> {
        self.table_path.as_deref()
    }

    pub fn credentials(&self) -> Option<&UserPassword> {
        self.credentials.as_ref()
    }

    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }
}
