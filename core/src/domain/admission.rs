//! Patient admission and discharge.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use shared::{Patient, PatientFormState, PatientValidationError, RegisterPatientRequest};

use crate::api::{ApiClient, ApiError};
use crate::domain::validation;

#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("todos los campos son obligatorios")]
    Form(Vec<PatientValidationError>),
    #[error("selecciona una cama y una enfermera")]
    MissingSelection,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone)]
pub struct PatientService {
    api: Arc<ApiClient>,
}

impl PatientService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Admit a patient into a bed, making it occupied.
    ///
    /// The form is validated before anything is sent; a rejected form never
    /// reaches the network. A backend rejection (e.g. the bed was taken in
    /// the meantime) leaves local state untouched; the caller refreshes
    /// the floor snapshot only after success.
    pub async fn admit(&self, form: &PatientFormState) -> Result<String, AdmissionError> {
        let validation = validation::validate_patient_form(form);
        if !validation.is_valid {
            return Err(AdmissionError::Form(validation.errors));
        }

        let (bed_id, nurse_id) = match (form.bed_id, form.nurse_id) {
            (Some(bed_id), Some(nurse_id)) => (bed_id, nurse_id),
            _ => return Err(AdmissionError::MissingSelection),
        };

        let request = RegisterPatientRequest {
            first_name: form.first_name.trim().to_string(),
            paternal_surname: form.paternal_surname.trim().to_string(),
            maternal_surname: form.maternal_surname.trim().to_string(),
            phone: form.phone.trim().to_string(),
            bed_id,
            nurse_id,
        };

        info!("admitting patient into bed {bed_id}");
        let message = self.api.register_patient(request).await?;
        Ok(message)
    }

    /// Discharge a patient, freeing the bed. The nurse assignment is
    /// intentionally left in place: the nurse keeps the bed for the next
    /// patient.
    pub async fn discharge(&self, patient_id: i64) -> Result<String, ApiError> {
        info!("discharging patient {patient_id}");
        self.api.discharge_patient(patient_id).await
    }

    pub async fn list(&self) -> Result<Vec<Patient>, ApiError> {
        self.api.list_patients().await
    }

    /// Case-insensitive search over name, phone and occupied-bed label, as
    /// the patients screen filters its table.
    pub fn filter(patients: &[Patient], query: &str) -> Vec<Patient> {
        let query = query.to_lowercase();
        patients
            .iter()
            .filter(|patient| {
                patient.full_name().to_lowercase().contains(&query)
                    || patient.phone.contains(&query)
                    || patient.bed_label.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}
