//! In-process stand-in for the hospital backend. Serves the endpoints the
//! directory client consumes, re-validates the same rules the real backend
//! enforces (occupied beds, held assignments, floors that still own beds),
//! and records every request so tests can assert which calls were (or
//! were not) made.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use shared::{
    AddBedsRequest, AddFloorsRequest, AssignBedsRequest, BedAssignment, BedRecord,
    CreateStaffRequest, DischargePatientRequest, Floor, LogEntry, Patient,
    RegisterPatientRequest, Role, SignInRequest, SignInResponse, StaffMember,
    UpdateCredentialsRequest, NO_NURSE, NO_PATIENT,
};

pub const TEST_TOKEN: &str = "test-token";

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[derive(Clone, Debug)]
pub struct MockBed {
    pub id: i64,
    pub floor_id: i64,
    pub label: String,
    pub patient: Option<(i64, String)>,
    pub nurse: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    pub floors: Vec<Floor>,
    pub beds: Vec<MockBed>,
    pub nurses: Vec<StaffMember>,
    pub secretaries: Vec<StaffMember>,
    pub assignments: Vec<BedAssignment>,
    pub patients: Vec<Patient>,
    pub log: Vec<LogEntry>,
    /// Every request seen, as "METHOD /path".
    pub requests: Vec<String>,
    /// Answer 401 to every authenticated call.
    pub expire_sessions: bool,
    /// Delegation answers success but leaves the assignments in place,
    /// forcing a second conflict on retry.
    pub sticky_assignments: bool,
    pub next_patient_id: i64,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockHospital {
    pub state: Shared,
    pub base_url: String,
}

impl MockHospital {
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn request_count(&self, needle: &str) -> usize {
        self.requests()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

pub fn floor(id: i64) -> Floor {
    Floor {
        id,
        name: format!("Piso {id}"),
        number: id as i32,
    }
}

pub fn staff(id: i64, name: &str, floor_id: i64, active: bool) -> StaffMember {
    StaffMember {
        id,
        first_name: name.to_string(),
        paternal_surname: "Pérez".to_string(),
        maternal_surname: "Luna".to_string(),
        email: format!("{}@hospital.mx", name.to_lowercase()),
        phone: "5512345678".to_string(),
        username: format!("{}.perez", name.to_lowercase()),
        active,
        floor: Some(floor(floor_id)),
    }
}

pub fn free_bed(id: i64, floor_id: i64, label: &str) -> MockBed {
    MockBed {
        id,
        floor_id,
        label: label.to_string(),
        patient: None,
        nurse: None,
    }
}

pub fn occupied_bed(id: i64, floor_id: i64, label: &str, patient_id: i64, name: &str) -> MockBed {
    MockBed {
        patient: Some((patient_id, name.to_string())),
        ..free_bed(id, floor_id, label)
    }
}

pub fn assigned_bed(id: i64, floor_id: i64, label: &str, nurse: &str) -> MockBed {
    MockBed {
        nurse: Some(nurse.to_string()),
        ..free_bed(id, floor_id, label)
    }
}

pub async fn spawn(state: MockState) -> MockHospital {
    init_tracing();
    let shared: Shared = Arc::new(Mutex::new(state));

    let app = Router::new()
        .route("/api/auth/signin", post(sign_in))
        .route("/pisos/listar", get(list_floors))
        .route("/pisos/insertar", post(add_floors))
        .route("/pisos/:id", delete(delete_floor))
        .route("/camas/piso/:id", get(beds_on_floor))
        .route("/camas/insertar", post(add_beds))
        .route("/camas/eliminar/:id", delete(delete_bed))
        .route("/pacientes/registrar", post(register_patient))
        .route("/pacientes/desocupar-cama", post(discharge_patient))
        .route("/pacientes/listar", get(list_patients))
        .route("/api/usuarios/persona/enfermeras", get(list_nurses))
        .route("/api/usuarios/persona/enfermeras/piso/:id", get(nurses_on_floor))
        .route("/api/usuarios/persona/enfermera", post(create_nurse))
        .route("/api/usuarios/secretarias", post(create_secretary))
        .route(
            "/api/usuarios/persona/info-personal/:id",
            put(update_credentials),
        )
        .route(
            "/api/usuarios/persona/eliminar/enfermera/:id",
            delete(deactivate_nurse),
        )
        .route(
            "/api/usuarios/persona/eliminar/secretaria/:id",
            delete(deactivate_secretary),
        )
        .route("/api/usuarios/persona/activar/:id", put(reactivate))
        .route("/api/usuarios/persona/secretarias", get(list_secretaries))
        .route(
            "/api/usuarios/persona/secretarias/piso/:id",
            get(secretaries_on_floor),
        )
        .route("/api/usuarios/persona/secretarias/:id", get(secretary_by_id))
        .route("/api/usuarios/persona/delegar-camas", put(delegate_beds))
        .route("/api/usuarios/persona/reasignar-usuario", put(reassign_user))
        .route("/asignaciones/listar", get(list_assignments))
        .route("/asignaciones/asignar-multiples", post(assign_beds))
        .route("/bitacora/lista/", get(audit_log))
        .layer(middleware::from_fn_with_state(shared.clone(), track))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    MockHospital {
        state: shared,
        base_url: format!("http://{addr}"),
    }
}

async fn track(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let expire;
    {
        let mut guard = state.lock().unwrap();
        guard
            .requests
            .push(format!("{} {}", request.method(), request.uri().path()));
        expire = guard.expire_sessions;
    }

    if request.uri().path() != "/api/auth/signin" {
        let authorized = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value == format!("Bearer {TEST_TOKEN}"))
            .unwrap_or(false);
        if expire || !authorized {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    next.run(request).await
}

fn conflict(message: &str) -> Response {
    (
        StatusCode::CONFLICT,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}

async fn sign_in(Json(request): Json<SignInRequest>) -> Json<SignInResponse> {
    Json(SignInResponse {
        token: TEST_TOKEN.to_string(),
        role: if request.username.starts_with("sec") {
            Role::Secretaria
        } else {
            Role::Admin
        },
        id: 1,
        full_name: "Usuario De Prueba".to_string(),
    })
}

async fn list_floors(State(state): State<Shared>) -> Json<Vec<Floor>> {
    Json(state.lock().unwrap().floors.clone())
}

async fn add_floors(State(state): State<Shared>, Json(request): Json<AddFloorsRequest>) -> String {
    let mut guard = state.lock().unwrap();
    let start = guard.floors.last().map(|f| f.id).unwrap_or(0);
    for offset in 1..=request.count as i64 {
        guard.floors.push(floor(start + offset));
    }
    format!("{} piso(s) agregado(s) correctamente", request.count)
}

async fn delete_floor(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut guard = state.lock().unwrap();
    if guard.beds.iter().any(|bed| bed.floor_id == id) {
        return conflict("El piso tiene camas asociadas");
    }
    guard.floors.retain(|f| f.id != id);
    "Piso eliminado correctamente".into_response()
}

async fn beds_on_floor(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Vec<BedRecord>> {
    let guard = state.lock().unwrap();
    let records = guard
        .beds
        .iter()
        .filter(|bed| bed.floor_id == id)
        .map(|bed| BedRecord {
            id: bed.id,
            label: bed.label.clone(),
            status: if bed.patient.is_some() {
                "Ocupada".to_string()
            } else {
                "Desocupada".to_string()
            },
            patient_name: bed
                .patient
                .as_ref()
                .map(|(_, name)| name.clone())
                .unwrap_or_else(|| NO_PATIENT.to_string()),
            nurse_name: bed.nurse.clone().unwrap_or_else(|| NO_NURSE.to_string()),
            patient_id: bed.patient.as_ref().map(|(id, _)| *id),
        })
        .collect();
    Json(records)
}

async fn add_beds(State(state): State<Shared>, Json(request): Json<AddBedsRequest>) -> String {
    let mut guard = state.lock().unwrap();
    let next_id = guard.beds.iter().map(|b| b.id).max().unwrap_or(0);
    let next_seq = guard
        .beds
        .iter()
        .filter(|b| b.floor_id == request.floor_id)
        .count() as i64;
    for offset in 1..=request.count as i64 {
        guard.beds.push(free_bed(
            next_id + offset,
            request.floor_id,
            &format!("Piso{}-{}", request.floor_id, next_seq + offset),
        ));
    }
    format!("{} cama(s) agregada(s) correctamente", request.count)
}

async fn delete_bed(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut guard = state.lock().unwrap();
    let Some(bed) = guard.beds.iter().find(|bed| bed.id == id) else {
        return not_found("Cama no encontrada");
    };
    if bed.patient.is_some() {
        return conflict("La cama está ocupada por un paciente");
    }
    if bed.nurse.is_some() {
        return conflict("La cama está asignada a una enfermera");
    }
    guard.beds.retain(|bed| bed.id != id);
    "Cama eliminada correctamente".into_response()
}

async fn register_patient(
    State(state): State<Shared>,
    Json(request): Json<RegisterPatientRequest>,
) -> Response {
    let mut guard = state.lock().unwrap();
    guard.next_patient_id += 1;
    let patient_id = guard.next_patient_id;
    let full_name = format!(
        "{} {} {}",
        request.first_name, request.paternal_surname, request.maternal_surname
    );

    let Some(bed) = guard.beds.iter_mut().find(|bed| bed.id == request.bed_id) else {
        return not_found("Cama no encontrada");
    };
    if bed.patient.is_some() {
        return conflict("La cama ya está ocupada");
    }
    bed.patient = Some((patient_id, full_name));
    let bed_label = bed.label.clone();

    guard.patients.push(Patient {
        id: patient_id,
        first_name: request.first_name,
        paternal_surname: request.paternal_surname,
        maternal_surname: request.maternal_surname,
        phone: request.phone,
        admitted_at: "2025-03-01T08:00:00Z".to_string(),
        discharged_at: None,
        bed_label,
    });

    "Paciente asignado exitosamente".into_response()
}

async fn discharge_patient(
    State(state): State<Shared>,
    Json(request): Json<DischargePatientRequest>,
) -> Response {
    let mut guard = state.lock().unwrap();
    let Some(bed) = guard
        .beds
        .iter_mut()
        .find(|bed| matches!(bed.patient, Some((id, _)) if id == request.patient_id))
    else {
        return not_found("Paciente no encontrado");
    };
    // the nurse keeps the bed
    bed.patient = None;

    if let Some(patient) = guard
        .patients
        .iter_mut()
        .find(|p| p.id == request.patient_id)
    {
        patient.discharged_at = Some("2025-03-02T08:00:00Z".to_string());
    }

    "Paciente dado de alta".into_response()
}

async fn list_patients(State(state): State<Shared>) -> Json<Vec<Patient>> {
    Json(state.lock().unwrap().patients.clone())
}

async fn list_nurses(State(state): State<Shared>) -> Json<Vec<StaffMember>> {
    Json(state.lock().unwrap().nurses.clone())
}

async fn nurses_on_floor(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Vec<StaffMember>> {
    let guard = state.lock().unwrap();
    Json(
        guard
            .nurses
            .iter()
            .filter(|nurse| nurse.floor_id() == Some(id))
            .cloned()
            .collect(),
    )
}

async fn deactivate_nurse(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut guard = state.lock().unwrap();
    if guard.assignments.iter().any(|a| a.nurse_id == id) {
        return conflict("La enfermera aún tiene camas asignadas");
    }
    let Some(nurse) = guard.nurses.iter_mut().find(|n| n.id == id) else {
        return not_found("Enfermera no encontrada");
    };
    nurse.active = false;
    "Enfermera desactivada correctamente".into_response()
}

async fn deactivate_secretary(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut guard = state.lock().unwrap();
    let Some(secretary) = guard.secretaries.iter_mut().find(|s| s.id == id) else {
        return not_found("Secretaria no encontrada");
    };
    secretary.active = false;
    "Secretaria desactivada correctamente".into_response()
}

async fn reactivate(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut guard = state.lock().unwrap();
    if let Some(nurse) = guard.nurses.iter_mut().find(|n| n.id == id) {
        nurse.active = true;
        return "Enfermera reactivada correctamente".into_response();
    }
    if let Some(secretary) = guard.secretaries.iter_mut().find(|s| s.id == id) {
        secretary.active = true;
        return "Secretaria reactivada correctamente".into_response();
    }
    not_found("Persona no encontrada")
}

async fn list_secretaries(State(state): State<Shared>) -> Json<Vec<StaffMember>> {
    Json(state.lock().unwrap().secretaries.clone())
}

async fn secretaries_on_floor(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Json<Vec<StaffMember>> {
    let guard = state.lock().unwrap();
    Json(
        guard
            .secretaries
            .iter()
            .filter(|secretary| secretary.floor_id() == Some(id))
            .cloned()
            .collect(),
    )
}

fn staff_from_request(id: i64, request: CreateStaffRequest) -> StaffMember {
    StaffMember {
        id,
        first_name: request.first_name,
        paternal_surname: request.paternal_surname,
        maternal_surname: request.maternal_surname,
        email: request.email,
        phone: request.phone,
        username: request.username,
        active: true,
        floor: Some(floor(request.assigned_floor.floor_id)),
    }
}

async fn create_nurse(
    State(state): State<Shared>,
    Json(request): Json<CreateStaffRequest>,
) -> String {
    let mut guard = state.lock().unwrap();
    let id = guard.nurses.iter().map(|n| n.id).max().unwrap_or(0) + 1;
    let nurse = staff_from_request(id, request);
    guard.nurses.push(nurse);
    "Enfermera agregada correctamente".to_string()
}

async fn create_secretary(
    State(state): State<Shared>,
    Json(request): Json<CreateStaffRequest>,
) -> String {
    let mut guard = state.lock().unwrap();
    let id = guard.secretaries.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    let secretary = staff_from_request(id, request);
    guard.secretaries.push(secretary);
    "Secretaria agregada correctamente".to_string()
}

async fn update_credentials(
    State(_state): State<Shared>,
    Path(_id): Path<i64>,
    Json(_request): Json<UpdateCredentialsRequest>,
) -> String {
    "Credenciales actualizadas".to_string()
}

async fn secretary_by_id(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let guard = state.lock().unwrap();
    match guard.secretaries.iter().find(|s| s.id == id) {
        Some(secretary) => Json(secretary.clone()).into_response(),
        None => not_found("Secretaria no encontrada"),
    }
}

#[derive(Deserialize)]
struct DelegateParams {
    #[serde(rename = "enfermeraActualId")]
    from: i64,
    #[serde(rename = "nuevaEnfermeraId")]
    to: i64,
}

async fn delegate_beds(
    State(state): State<Shared>,
    Query(params): Query<DelegateParams>,
) -> Response {
    let mut guard = state.lock().unwrap();
    if guard.sticky_assignments {
        return "Camas delegadas correctamente".into_response();
    }

    let new_nurse_name = guard
        .nurses
        .iter()
        .find(|n| n.id == params.to)
        .map(|n| n.full_name());
    let Some(new_nurse_name) = new_nurse_name else {
        return not_found("Enfermera destino no encontrada");
    };

    let moved: Vec<i64> = guard
        .assignments
        .iter()
        .filter(|a| a.nurse_id == params.from)
        .map(|a| a.bed_id)
        .collect();
    for assignment in guard.assignments.iter_mut() {
        if assignment.nurse_id == params.from {
            assignment.nurse_id = params.to;
        }
    }
    for bed in guard.beds.iter_mut() {
        if moved.contains(&bed.id) {
            bed.nurse = Some(new_nurse_name.clone());
        }
    }

    // delegating with nothing left to move is a plain success
    format!("{} cama(s) delegada(s)", moved.len()).into_response()
}

#[derive(Deserialize)]
struct ReassignParams {
    #[serde(rename = "usuarioId")]
    user: i64,
    #[serde(rename = "nuevoPisoId")]
    floor: i64,
}

async fn reassign_user(
    State(state): State<Shared>,
    Query(params): Query<ReassignParams>,
) -> Response {
    let mut guard = state.lock().unwrap();
    let is_nurse = guard.nurses.iter().any(|n| n.id == params.user);
    if is_nurse && guard.assignments.iter().any(|a| a.nurse_id == params.user) {
        return conflict("La enfermera aún tiene camas asignadas");
    }

    let new_floor = floor(params.floor);
    if let Some(nurse) = guard.nurses.iter_mut().find(|n| n.id == params.user) {
        nurse.floor = Some(new_floor);
        return "Enfermera reasignada correctamente".into_response();
    }
    if let Some(secretary) = guard.secretaries.iter_mut().find(|s| s.id == params.user) {
        secretary.floor = Some(new_floor);
        return "Secretaria reasignada correctamente".into_response();
    }
    not_found("Usuario no encontrado")
}

async fn list_assignments(State(state): State<Shared>) -> Json<Vec<BedAssignment>> {
    Json(state.lock().unwrap().assignments.clone())
}

async fn assign_beds(State(state): State<Shared>, Json(request): Json<AssignBedsRequest>) -> Response {
    let mut guard = state.lock().unwrap();
    let nurse_name = guard
        .nurses
        .iter()
        .find(|n| n.id == request.nurse_id)
        .map(|n| n.full_name());
    let Some(nurse_name) = nurse_name else {
        return not_found("Enfermera no encontrada");
    };

    for bed_id in &request.bed_ids {
        guard.assignments.push(BedAssignment {
            nurse_id: request.nurse_id,
            bed_id: *bed_id,
        });
    }
    for bed in guard.beds.iter_mut() {
        if request.bed_ids.contains(&bed.id) {
            bed.nurse = Some(nurse_name.clone());
        }
    }

    "Camas asignadas correctamente".into_response()
}

async fn audit_log(State(state): State<Shared>) -> Json<Vec<LogEntry>> {
    Json(state.lock().unwrap().log.clone())
}
