use shared::{AddBedsRequest, BedRecord};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /camas/piso/{idPiso}`: raw wire records, sentinels included.
    pub async fn beds_on_floor(&self, floor_id: i64) -> Result<Vec<BedRecord>, ApiError> {
        self.get_json(&format!("/camas/piso/{floor_id}")).await
    }

    /// `POST /camas/insertar` extends the floor's numbered sequence.
    pub async fn add_beds(&self, request: AddBedsRequest) -> Result<String, ApiError> {
        self.send_for_message(self.http.post(self.url("/camas/insertar")).json(&request))
            .await
    }

    /// `DELETE /camas/eliminar/{idCama}`. The backend re-validates occupancy
    /// even when the local policy already allowed the deletion.
    pub async fn delete_bed(&self, bed_id: i64) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .delete(self.url(&format!("/camas/eliminar/{bed_id}"))),
        )
        .await
    }
}
