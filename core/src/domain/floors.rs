//! Floor management. Floors are created in bulk after the current last one
//! and can only be deleted while they own no beds. The backend enforces
//! that and answers 409, which is surfaced as a conflict for the screen to
//! explain.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use shared::Floor;

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Error)]
pub enum FloorError {
    #[error("la cantidad de pisos debe ser mayor a 0")]
    InvalidCount,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone)]
pub struct FloorService {
    api: Arc<ApiClient>,
}

impl FloorService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Floor>, ApiError> {
        self.api.list_floors().await
    }

    /// Register `count` new floors after the current last one.
    pub async fn add(&self, count: u32) -> Result<String, FloorError> {
        if count == 0 {
            return Err(FloorError::InvalidCount);
        }

        info!("adding {count} floors");
        let message = self.api.add_floors(count).await?;
        Ok(message)
    }

    /// Delete a floor. A 409 (`FloorError::Api(ApiError::Conflict)`) means
    /// the floor still owns beds that must be removed or relocated first.
    pub async fn delete(&self, floor_id: i64) -> Result<String, FloorError> {
        info!("deleting floor {floor_id}");
        let message = self.api.delete_floor(floor_id).await?;
        Ok(message)
    }
}
