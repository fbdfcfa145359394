use shared::{DischargePatientRequest, Patient, RegisterPatientRequest};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// `POST /pacientes/registrar` admits a patient into a bed, marking it
    /// occupied.
    pub async fn register_patient(
        &self,
        request: RegisterPatientRequest,
    ) -> Result<String, ApiError> {
        self.send_for_message(
            self.http
                .post(self.url("/pacientes/registrar"))
                .json(&request),
        )
        .await
    }

    /// `POST /pacientes/desocupar-cama` discharges the patient and frees
    /// the bed.
    pub async fn discharge_patient(&self, patient_id: i64) -> Result<String, ApiError> {
        let request = DischargePatientRequest { patient_id };
        self.send_for_message(
            self.http
                .post(self.url("/pacientes/desocupar-cama"))
                .json(&request),
        )
        .await
    }

    /// `GET /pacientes/listar`
    pub async fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.get_json("/pacientes/listar").await
    }
}
