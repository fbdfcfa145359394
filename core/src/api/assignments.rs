use shared::{AssignBedsRequest, BedAssignment};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /asignaciones/listar`: every nurse-to-bed relation.
    pub async fn list_assignments(&self) -> Result<Vec<BedAssignment>, ApiError> {
        self.get_json("/asignaciones/listar").await
    }

    /// `POST /asignaciones/asignar-multiples` assigns a batch of beds to
    /// one nurse.
    pub async fn assign_beds(&self, request: AssignBedsRequest) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .post(self.url("/asignaciones/asignar-multiples"))
                .json(&request),
        )
        .await
    }
}
