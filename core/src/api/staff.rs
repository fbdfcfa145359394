use shared::{CreateStaffRequest, StaffMember, UpdateCredentialsRequest, UpdateStaffRequest};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /api/usuarios/persona/enfermeras`
    pub async fn list_nurses(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.get_json("/api/usuarios/persona/enfermeras").await
    }

    /// `GET /api/usuarios/persona/enfermeras/piso/{id}`
    pub async fn nurses_on_floor(&self, floor_id: i64) -> Result<Vec<StaffMember>, ApiError> {
        self.get_json(&format!("/api/usuarios/persona/enfermeras/piso/{floor_id}"))
            .await
    }

    /// `POST /api/usuarios/persona/enfermera`
    pub async fn create_nurse(&self, request: CreateStaffRequest) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .post(self.url("/api/usuarios/persona/enfermera"))
                .json(&request),
        )
        .await
    }

    /// `PUT /api/usuarios/persona/enfermera/{id}`
    pub async fn update_nurse(
        &self,
        nurse_id: i64,
        request: UpdateStaffRequest,
    ) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .put(self.url(&format!("/api/usuarios/persona/enfermera/{nurse_id}")))
                .json(&request),
        )
        .await
    }

    /// `DELETE /api/usuarios/persona/eliminar/enfermera/{id}`: soft-delete.
    /// 409 means the nurse still holds bed assignments.
    pub async fn deactivate_nurse(&self, nurse_id: i64) -> Result<String, ApiError> {
        self.send_for_message(self.http.delete(
            self.url(&format!("/api/usuarios/persona/eliminar/enfermera/{nurse_id}")),
        ))
        .await
    }

    /// `GET /api/usuarios/persona/secretarias`
    pub async fn list_secretaries(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.get_json("/api/usuarios/persona/secretarias").await
    }

    /// `GET /api/usuarios/persona/secretarias/piso/{id}`
    pub async fn secretaries_on_floor(&self, floor_id: i64) -> Result<Vec<StaffMember>, ApiError> {
        self.get_json(&format!(
            "/api/usuarios/persona/secretarias/piso/{floor_id}"
        ))
        .await
    }

    /// `GET /api/usuarios/persona/secretarias/{id}`: a secretary's own
    /// record, used to pin forms to her floor.
    pub async fn secretary_by_id(&self, secretary_id: i64) -> Result<StaffMember, ApiError> {
        self.get_json(&format!("/api/usuarios/persona/secretarias/{secretary_id}"))
            .await
    }

    /// `POST /api/usuarios/secretarias`
    pub async fn create_secretary(&self, request: CreateStaffRequest) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .post(self.url("/api/usuarios/secretarias"))
                .json(&request),
        )
        .await
    }

    /// `PUT /api/usuarios/persona/secretaria/{id}`
    pub async fn update_secretary(
        &self,
        secretary_id: i64,
        request: UpdateStaffRequest,
    ) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .put(self.url(&format!(
                    "/api/usuarios/persona/secretaria/{secretary_id}"
                )))
                .json(&request),
        )
        .await
    }

    /// `DELETE /api/usuarios/persona/eliminar/secretaria/{id}`: soft-delete.
    pub async fn deactivate_secretary(&self, secretary_id: i64) -> Result<String, ApiError> {
        self.send_for_message(self.http.delete(self.url(&format!(
            "/api/usuarios/persona/eliminar/secretaria/{secretary_id}"
        ))))
        .await
    }

    /// `PUT /api/usuarios/persona/activar/{id}` reverses a soft-delete for
    /// either staff kind.
    pub async fn reactivate_staff(&self, person_id: i64) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .put(self.url(&format!("/api/usuarios/persona/activar/{person_id}"))),
        )
        .await
    }

    /// `PUT /api/usuarios/persona/delegar-camas` bulk-moves every bed
    /// assignment from one nurse to another. Parameters travel in the query
    /// string, not the body.
    pub async fn delegate_beds(
        &self,
        from_nurse_id: i64,
        to_nurse_id: i64,
    ) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .put(self.url("/api/usuarios/persona/delegar-camas"))
                .query(&[
                    ("enfermeraActualId", from_nurse_id),
                    ("nuevaEnfermeraId", to_nurse_id),
                ]),
        )
        .await
    }

    /// `PUT /api/usuarios/persona/reasignar-usuario` moves a nurse or
    /// secretary to another floor. 409 for a nurse means she still holds
    /// bed assignments.
    pub async fn reassign_user(
        &self,
        person_id: i64,
        new_floor_id: i64,
    ) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .put(self.url("/api/usuarios/persona/reasignar-usuario"))
                .query(&[("usuarioId", person_id), ("nuevoPisoId", new_floor_id)]),
        )
        .await
    }

    /// `PUT /api/usuarios/persona/info-personal/{id}`: self-service
    /// credential update.
    pub async fn update_credentials(
        &self,
        person_id: i64,
        request: UpdateCredentialsRequest,
    ) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .put(self.url(&format!(
                    "/api/usuarios/persona/info-personal/{person_id}"
                )))
                .json(&request),
        )
        .await
    }
}
