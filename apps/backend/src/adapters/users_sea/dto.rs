//! DTOs for users_sea adapter.

/// Identity seen on an authenticated request.
#[derive(Debug, Clone)]
pub struct UserUpsert {
    pub sub: String,
    pub email: Option<String>,
}

impl UserUpsert {
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: Option<impl Into<String>>) -> Self {
        self.email = email.map(Into::into);
        self
    }
}
