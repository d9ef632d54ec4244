use serde::{Deserialize, Serialize};

/// The logged-in user as the client sees them. The auth provider and its
/// token verification live outside this client; presence of an `AuthUser`
/// is what gates authenticated actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
}

impl AuthUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
