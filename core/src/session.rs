use shared::{Role, SignInResponse};

/// Authenticated session handed out by `POST /api/auth/signin`.
///
/// The session is an explicit value object rather than ambient state: it is
/// created from the sign-in response, carried by the [`crate::ApiClient`],
/// and dropped at sign-out, after a credential update, or when any call
/// comes back 401.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    role: Role,
    user_id: i64,
    full_name: String,
}

impl Session {
    pub fn from_sign_in(response: SignInResponse) -> Self {
        Self {
            token: response.token,
            role: response.role,
            user_id: response.id,
            full_name: response.full_name,
        }
    }

    /// Bearer token attached to every authenticated request.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}
