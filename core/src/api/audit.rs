use shared::LogEntry;

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /bitacora/lista/`: append-only audit entries, oldest first.
    pub async fn audit_log(&self) -> Result<Vec<LogEntry>, ApiError> {
        self.get_json("/bitacora/lista/").await
    }
}
