use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted by the backend at sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Secretaria,
    Enfermera,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Secretaria => "secretaria",
            Role::Enfermera => "enfermera",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hospital floor as returned by `GET /pisos/listar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(rename = "idPiso")]
    pub id: i64,
    /// Display name, e.g. "Piso 1"
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "numeroPiso")]
    pub number: i32,
}

/// Request body for `POST /pisos/insertar`; floors are created in bulk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFloorsRequest {
    #[serde(rename = "cantidadPisos")]
    pub count: u32,
}

/// Sentinel the backend uses for a bed with no patient.
pub const NO_PATIENT: &str = "Sin Paciente";
/// Sentinel the backend uses for a bed with no nurse.
pub const NO_NURSE: &str = "Sin Enfermera";

/// A bed exactly as `GET /camas/piso/{idPiso}` returns it, sentinels included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedRecord {
    #[serde(rename = "idCama")]
    pub id: i64,
    /// Sequence label, e.g. "Piso1-3"
    #[serde(rename = "nombre")]
    pub label: String,
    /// "Ocupada" or "Desocupada"
    #[serde(rename = "estadoCama")]
    pub status: String,
    /// Patient display name, or the "Sin Paciente" sentinel
    #[serde(rename = "nombrePaciente")]
    pub patient_name: String,
    /// Nurse display name, or the "Sin Enfermera" sentinel
    #[serde(rename = "nombreEnfermera")]
    pub nurse_name: String,
    #[serde(rename = "idPaciente")]
    pub patient_id: Option<i64>,
}

/// Request body for `POST /camas/insertar`; beds are created in a numbered
/// sequence per floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBedsRequest {
    #[serde(rename = "idPiso")]
    pub floor_id: i64,
    #[serde(rename = "cantidadCamas")]
    pub count: u32,
}

/// Occupancy state derived from the wire record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BedStatus {
    Occupied,
    Free,
}

/// Patient reference carried by an occupied bed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedPatient {
    pub id: i64,
    pub name: String,
}

/// Normalized bed snapshot used by the occupancy policy. The wire sentinels
/// ("Sin Paciente" / "Sin Enfermera") collapse to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bed {
    pub id: i64,
    pub floor_id: i64,
    /// Sequence label, e.g. "Piso1-3"
    pub label: String,
    pub status: BedStatus,
    pub patient: Option<BedPatient>,
    pub nurse_name: Option<String>,
}

impl Bed {
    /// Normalize a wire record into a policy snapshot. Anything other than
    /// "Ocupada" counts as free, matching the original screen's mapping.
    pub fn from_record(floor_id: i64, record: BedRecord) -> Self {
        let status = if record.status == "Ocupada" {
            BedStatus::Occupied
        } else {
            BedStatus::Free
        };
        let patient = match (record.patient_id, record.patient_name.as_str()) {
            (Some(id), name) if name != NO_PATIENT => Some(BedPatient {
                id,
                name: name.to_string(),
            }),
            _ => None,
        };
        let nurse_name = if record.nurse_name == NO_NURSE {
            None
        } else {
            Some(record.nurse_name)
        };
        Bed {
            id: record.id,
            floor_id,
            label: record.label,
            status,
            patient,
            nurse_name,
        }
    }

    /// Parse a sequence label of the form `<prefix>-<integer>` into its parts.
    pub fn parse_label(label: &str) -> Result<(String, u32), BedLabelError> {
        let parts: Vec<&str> = label.split('-').collect();
        if parts.len() != 2 || parts[0].is_empty() {
            return Err(BedLabelError::InvalidFormat);
        }

        let sequence = parts[1]
            .parse::<u32>()
            .map_err(|_| BedLabelError::InvalidSequence)?;

        Ok((parts[0].to_string(), sequence))
    }

    /// Extract the numeric suffix of this bed's label for ordering.
    pub fn sequence_number(&self) -> Result<u32, BedLabelError> {
        Self::parse_label(&self.label).map(|(_, sequence)| sequence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BedLabelError {
    InvalidFormat,
    InvalidSequence,
}

impl fmt::Display for BedLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedLabelError::InvalidFormat => write!(f, "Invalid bed label format"),
            BedLabelError::InvalidSequence => write!(f, "Invalid sequence number in bed label"),
        }
    }
}

impl std::error::Error for BedLabelError {}

/// A nurse or secretary as the staff endpoints return them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "paterno")]
    pub paternal_surname: String,
    #[serde(rename = "materno")]
    pub maternal_surname: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub username: String,
    /// Soft-delete flag: false means deactivated, not removed
    #[serde(rename = "estatus")]
    pub active: bool,
    /// Currently assigned floor; null can appear on freshly imported records
    #[serde(rename = "piso")]
    pub floor: Option<Floor>,
}

impl StaffMember {
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name, self.paternal_surname, self.maternal_surname
        )
    }

    pub fn floor_id(&self) -> Option<i64> {
        self.floor.as_ref().map(|floor| floor.id)
    }
}

/// Floor reference nested in staff create requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorAssignment {
    #[serde(rename = "idPiso")]
    pub floor_id: i64,
}

/// Request body for creating a nurse or secretary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStaffRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "paterno")]
    pub paternal_surname: String,
    #[serde(rename = "materno")]
    pub maternal_surname: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub username: String,
    /// Auto-generated for nurses (Capitalize(first name + paternal surname));
    /// omitted for secretaries, whose credentials the backend issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "pisoAsignado")]
    pub assigned_floor: FloorAssignment,
}

/// Request body for `PUT .../enfermera/{id}` and `PUT .../secretaria/{id}`.
/// Password and floor are changed through dedicated operations, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStaffRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "paterno")]
    pub paternal_surname: String,
    #[serde(rename = "materno")]
    pub maternal_surname: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub username: String,
}

/// Request body for `PUT /api/usuarios/persona/info-personal/{id}`,
/// the self-service credential update. A successful update invalidates the
/// current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCredentialsRequest {
    pub username: String,
    pub password: String,
}

/// A patient as `GET /pacientes/listar` returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "paterno")]
    pub paternal_surname: String,
    #[serde(rename = "materno")]
    pub maternal_surname: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    /// RFC 3339 admission timestamp
    #[serde(rename = "fechaingreso")]
    pub admitted_at: String,
    /// RFC 3339 discharge timestamp, null while still admitted
    #[serde(rename = "fechasalida")]
    pub discharged_at: Option<String>,
    /// Label of the occupied bed
    #[serde(rename = "camaqueocupo")]
    pub bed_label: String,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name, self.paternal_surname, self.maternal_surname
        )
    }
}

/// Request body for `POST /pacientes/registrar`. Admission ties the patient
/// to a bed, making it occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "paterno")]
    pub paternal_surname: String,
    #[serde(rename = "materno")]
    pub maternal_surname: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "camaId")]
    pub bed_id: i64,
    #[serde(rename = "enfermeraId")]
    pub nurse_id: i64,
}

/// Request body for `POST /pacientes/desocupar-cama`. Discharge frees the
/// bed; the nurse assignment stays in place for the next patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargePatientRequest {
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
}

/// Nurse-to-bed relation from `GET /asignaciones/listar`. Many beds may map
/// to one nurse; the relation is a reference, not ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedAssignment {
    #[serde(rename = "idEnfermera")]
    pub nurse_id: i64,
    #[serde(rename = "idCama")]
    pub bed_id: i64,
}

/// Request body for `POST /asignaciones/asignar-multiples`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignBedsRequest {
    #[serde(rename = "enfermeraId")]
    pub nurse_id: i64,
    #[serde(rename = "camasIds")]
    pub bed_ids: Vec<i64>,
}

/// Append-only audit entry from `GET /bitacora/lista/`. Produced by the
/// backend for every mutating action; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339 timestamp of the movement
    #[serde(rename = "fechamovimiento")]
    pub timestamp: String,
    /// HTTP method of the mutating request
    #[serde(rename = "movimiento")]
    pub http_method: String,
    /// Human description of the movement
    #[serde(rename = "metodo")]
    pub description: String,
    #[serde(rename = "nombreUsuario")]
    pub acting_username: String,
}

impl LogEntry {
    /// Parsed timestamp for ordering. `None` when the backend sends a value
    /// that is not RFC 3339.
    pub fn parsed_timestamp(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

/// Request body for `POST /api/auth/signin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Response from `POST /api/auth/signin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    #[serde(rename = "rol")]
    pub role: Role,
    pub id: i64,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
}

/// Field-level validation errors for nurse/secretary forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StaffValidationError {
    InvalidFirstName,
    InvalidPaternalSurname,
    InvalidMaternalSurname,
    InvalidEmail,
    InvalidPhone,
    InvalidUsername,
    MissingFloor,
}

/// Validation outcome for a staff form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffFormValidation {
    pub is_valid: bool,
    pub errors: Vec<StaffValidationError>,
}

/// Field-level validation errors for the patient admission form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatientValidationError {
    InvalidFirstName,
    InvalidPaternalSurname,
    InvalidMaternalSurname,
    InvalidPhone,
}

/// Validation outcome for a patient admission form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientFormValidation {
    pub is_valid: bool,
    pub errors: Vec<PatientValidationError>,
}

/// Validation errors for the self-service credential update form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CredentialsValidationError {
    InvalidUsername,
    PasswordTooShort,
    PasswordMissingLetter,
    PasswordMissingDigit,
    PasswordMissingSymbol,
    PasswordForbiddenCharacter,
}

/// Validation outcome for the credential update form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialsFormValidation {
    pub is_valid: bool,
    pub errors: Vec<CredentialsValidationError>,
}

/// State for the staff create/edit forms. Validation re-runs on every field
/// change; submission stays blocked until every required field passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffFormState {
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub floor_id: Option<i64>,
    pub is_submitting: bool,
    pub errors: Vec<StaffValidationError>,
    pub error_message: Option<String>,
}

/// State for the patient admission form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientFormState {
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub phone: String,
    pub bed_id: Option<i64>,
    pub nurse_id: Option<i64>,
    pub is_submitting: bool,
    pub errors: Vec<PatientValidationError>,
    pub error_message: Option<String>,
}
