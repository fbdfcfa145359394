//! Audit-log reading. The backend appends entries for every mutating
//! action; the client only lists and filters them.

use std::sync::Arc;

use shared::LogEntry;

use crate::api::{ApiClient, ApiError};

#[derive(Clone)]
pub struct AuditService {
    api: Arc<ApiClient>,
}

impl AuditService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Entries newest first. The backend returns oldest first.
    pub async fn entries(&self) -> Result<Vec<LogEntry>, ApiError> {
        let mut entries = self.api.audit_log().await?;
        entries.reverse();
        Ok(entries)
    }

    /// Case-insensitive search over HTTP method, description and acting
    /// username.
    pub fn filter(entries: &[LogEntry], query: &str) -> Vec<LogEntry> {
        let query = query.to_lowercase();
        entries
            .iter()
            .filter(|entry| {
                entry.http_method.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query)
                    || entry.acting_username.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}
