use shared::{AddFloorsRequest, Floor};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /pisos/listar`
    pub async fn list_floors(&self) -> Result<Vec<Floor>, ApiError> {
        self.get_json("/pisos/listar").await
    }

    /// `POST /pisos/insertar` appends `count` floors after the current
    /// last one.
    pub async fn add_floors(&self, count: u32) -> Result<String, ApiError> {
        let request = AddFloorsRequest { count };
        self.send_for_message(self.http.post(self.url("/pisos/insertar")).json(&request))
            .await
    }

    /// `DELETE /pisos/{id}`. The backend answers 409 while the floor still
    /// owns beds.
    pub async fn delete_floor(&self, floor_id: i64) -> Result<String, ApiError> {
        self.send_for_message(self.http.delete(self.url(&format!("/pisos/{floor_id}"))))
            .await
    }
}
