use shared::{SignInRequest, SignInResponse};
use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::session::Session;

impl ApiClient {
    /// `POST /api/auth/signin`. On success the returned session is also
    /// stored in the client for subsequent authenticated calls.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let request = SignInRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .execute(self.http.post(self.url("/api/auth/signin")).json(&request))
            .await?;
        let payload = response
            .json::<SignInResponse>()
            .await
            .map_err(ApiError::Decode)?;

        info!("signed in as {} ({})", payload.full_name, payload.role);

        let session = Session::from_sign_in(payload);
        self.store_session(session.clone());
        Ok(session)
    }

    /// Drop the held session. Purely local; the backend keeps no session
    /// state beyond token expiry.
    pub fn sign_out(&self) {
        info!("signing out");
        self.clear_session();
    }
}
