//! Staff lifecycle policy: soft-delete, reactivation, floor reassignment
//! and bed delegation for nurses and secretaries.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use shared::{
    AssignBedsRequest, BedAssignment, CreateStaffRequest, CredentialsValidationError, Floor,
    FloorAssignment, Role, StaffFormState, StaffMember, StaffValidationError,
    UpdateCredentialsRequest, UpdateStaffRequest,
};

use crate::api::{ApiClient, ApiError};
use crate::domain::delegation::{DelegationEvent, DelegationState};
use crate::domain::validation;

/// Which staff directory an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffKind {
    Nurse,
    Secretary,
}

/// Errors from the staff workflows.
#[derive(Debug, Error)]
pub enum StaffError {
    #[error("es la única persona activa del piso")]
    LastActiveOnFloor,
    #[error("ya está asignada a ese piso")]
    AlreadyOnFloor,
    #[error("no puedes reasignar a la única secretaria del piso")]
    OnlySecretaryOnFloor,
    #[error("no hay enfermeras disponibles")]
    NoEligibleDelegates,
    #[error("el delegado elegido no es válido")]
    InvalidDelegate,
    #[error("la persona no tiene piso asignado")]
    NoFloorAssigned,
    #[error("selecciona al menos una cama")]
    EmptySelection,
    /// The retry after delegating conflicted again; terminal.
    #[error("sigue con camas asignadas: {0}")]
    RetryConflict(String),
    #[error("revisa los campos marcados antes de continuar")]
    Form(Vec<StaffValidationError>),
    #[error("credenciales inválidas")]
    Credentials(Vec<CredentialsValidationError>),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Deny deactivation iff `person` is the unique active entry of the floor
/// roster. Deactivating someone already inactive is a backend no-op and is
/// not blocked here.
pub fn can_deactivate(person: &StaffMember, floor_roster: &[StaffMember]) -> Result<(), StaffError> {
    let other_active = floor_roster
        .iter()
        .any(|member| member.id != person.id && member.active);

    if person.active && !other_active {
        return Err(StaffError::LastActiveOnFloor);
    }
    Ok(())
}

/// Active nurses on the same floor, excluding the source: the only valid
/// delegate targets.
pub fn eligible_delegates(nurse: &StaffMember, floor_roster: &[StaffMember]) -> Vec<StaffMember> {
    floor_roster
        .iter()
        .filter(|member| member.id != nurse.id && member.active)
        .cloned()
        .collect()
}

/// The operation a conflicted flow will retry after delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StaffOperation {
    Deactivate,
    Reassign { new_floor_id: i64 },
}

/// A nurse operation that conflicted on bed assignments and is waiting on a
/// delegate choice. Only the service can construct one, and the single
/// retry consumes it, so the at-most-one-retry rule is carried by the type.
#[derive(Debug)]
pub struct PendingDelegation {
    person: StaffMember,
    operation: StaffOperation,
    state: DelegationState,
    candidates: Vec<StaffMember>,
}

impl PendingDelegation {
    pub fn person(&self) -> &StaffMember {
        &self.person
    }

    /// Delegate targets to offer the user.
    pub fn candidates(&self) -> &[StaffMember] {
        &self.candidates
    }
}

/// Outcome of a deactivation or reassignment request.
#[derive(Debug)]
pub enum StaffFlow {
    /// Went through on the first attempt; backend message included.
    Completed(String),
    /// The person still holds bed assignments: pick a delegate and call
    /// [`StaffService::resolve_with_delegate`].
    NeedsDelegate(PendingDelegation),
}

/// Created-nurse result: the generated credential is surfaced once so the
/// admin can hand it over.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedNurse {
    pub message: String,
    pub generated_password: String,
}

/// Staff directory and lifecycle service.
#[derive(Clone)]
pub struct StaffService {
    api: Arc<ApiClient>,
}

impl StaffService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Full directory for one staff kind.
    pub async fn directory(&self, kind: StaffKind) -> Result<Vec<StaffMember>, ApiError> {
        match kind {
            StaffKind::Nurse => self.api.list_nurses().await,
            StaffKind::Secretary => self.api.list_secretaries().await,
        }
    }

    /// Roster of one floor for one staff kind.
    pub async fn roster(&self, kind: StaffKind, floor_id: i64) -> Result<Vec<StaffMember>, ApiError> {
        match kind {
            StaffKind::Nurse => self.api.nurses_on_floor(floor_id).await,
            StaffKind::Secretary => self.api.secretaries_on_floor(floor_id).await,
        }
    }

    async fn deactivate_call(&self, kind: StaffKind, person_id: i64) -> Result<String, ApiError> {
        match kind {
            StaffKind::Nurse => self.api.deactivate_nurse(person_id).await,
            StaffKind::Secretary => self.api.deactivate_secretary(person_id).await,
        }
    }

    /// Soft-delete a staff member.
    ///
    /// The last-active-on-floor rule is checked locally first. A nurse who
    /// still holds bed assignments conflicts on the backend and the flow
    /// switches to [`StaffFlow::NeedsDelegate`]; with nobody eligible to
    /// delegate to, the operation is unavailable outright.
    pub async fn request_deactivate(
        &self,
        kind: StaffKind,
        person: &StaffMember,
    ) -> Result<StaffFlow, StaffError> {
        let floor_id = person.floor_id().ok_or(StaffError::NoFloorAssigned)?;
        let roster = self.roster(kind, floor_id).await?;
        can_deactivate(person, &roster)?;

        info!("deactivating {} {}", person.full_name(), person.id);
        match self.deactivate_call(kind, person.id).await {
            Ok(message) => Ok(StaffFlow::Completed(message)),
            Err(ApiError::Conflict(reason)) if kind == StaffKind::Nurse => {
                warn!("deactivation of {} conflicted: {reason}", person.id);
                let candidates = eligible_delegates(person, &roster);
                if candidates.is_empty() {
                    return Err(StaffError::NoEligibleDelegates);
                }
                Ok(StaffFlow::NeedsDelegate(PendingDelegation {
                    person: person.clone(),
                    operation: StaffOperation::Deactivate,
                    state: DelegationState::Idle.advance(DelegationEvent::AssignmentConflict),
                    candidates,
                }))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Reverse a soft-delete.
    pub async fn reactivate(&self, person_id: i64) -> Result<String, ApiError> {
        info!("reactivating staff {person_id}");
        self.api.reactivate_staff(person_id).await
    }

    /// Move a staff member to another floor.
    ///
    /// Reassigning to the current floor is rejected locally, with no
    /// network call. Moving the only secretary off a floor is also rejected
    /// locally after confirming the roster. A nurse with bed assignments
    /// conflicts and follows the same delegate-then-retry flow as
    /// deactivation.
    pub async fn request_reassign(
        &self,
        kind: StaffKind,
        person: &StaffMember,
        new_floor_id: i64,
    ) -> Result<StaffFlow, StaffError> {
        let current_floor = person.floor_id().ok_or(StaffError::NoFloorAssigned)?;
        if current_floor == new_floor_id {
            return Err(StaffError::AlreadyOnFloor);
        }

        if kind == StaffKind::Secretary {
            let roster = self.roster(StaffKind::Secretary, current_floor).await?;
            let has_other = roster.iter().any(|member| member.id != person.id);
            if !has_other {
                return Err(StaffError::OnlySecretaryOnFloor);
            }
        }

        info!(
            "reassigning {} {} to floor {new_floor_id}",
            person.full_name(),
            person.id
        );
        match self.api.reassign_user(person.id, new_floor_id).await {
            Ok(message) => Ok(StaffFlow::Completed(message)),
            Err(ApiError::Conflict(reason)) if kind == StaffKind::Nurse => {
                warn!("reassignment of {} conflicted: {reason}", person.id);
                let roster = self.roster(StaffKind::Nurse, current_floor).await?;
                let candidates = eligible_delegates(person, &roster);
                if candidates.is_empty() {
                    return Err(StaffError::NoEligibleDelegates);
                }
                Ok(StaffFlow::NeedsDelegate(PendingDelegation {
                    person: person.clone(),
                    operation: StaffOperation::Reassign { new_floor_id },
                    state: DelegationState::Idle.advance(DelegationEvent::AssignmentConflict),
                    candidates,
                }))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Delegate the conflicted nurse's beds and retry the original
    /// operation exactly once. A second conflict is terminal.
    pub async fn resolve_with_delegate(
        &self,
        pending: PendingDelegation,
        delegate_id: i64,
    ) -> Result<String, StaffError> {
        if !pending
            .candidates
            .iter()
            .any(|candidate| candidate.id == delegate_id)
        {
            return Err(StaffError::InvalidDelegate);
        }

        let state = match self.api.delegate_beds(pending.person.id, delegate_id).await {
            Ok(message) => {
                info!(
                    "delegated beds of {} to {delegate_id}: {message}",
                    pending.person.id
                );
                pending.state.advance(DelegationEvent::DelegateChosen)
            }
            Err(error) => return Err(error.into()),
        };
        debug_assert_eq!(state, DelegationState::Retrying);

        let retried = match pending.operation {
            StaffOperation::Deactivate => self.api.deactivate_nurse(pending.person.id).await,
            StaffOperation::Reassign { new_floor_id } => {
                self.api.reassign_user(pending.person.id, new_floor_id).await
            }
        };

        match retried {
            Ok(message) => Ok(message),
            Err(ApiError::Conflict(reason)) => {
                // Retrying + conflict can only reach Failed: there is never
                // a second retry
                debug_assert!(state
                    .advance(DelegationEvent::AssignmentConflict)
                    .is_terminal());
                warn!(
                    "retry for {} conflicted again, giving up: {reason}",
                    pending.person.id
                );
                Err(StaffError::RetryConflict(reason))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Bulk-move every bed assignment from one nurse to another, outside of
    /// any conflict flow. The target must be a different, active nurse on
    /// the same floor; with nobody eligible the operation is unavailable.
    /// Delegating with nothing left to move is a plain success.
    pub async fn delegate_beds(
        &self,
        from: &StaffMember,
        delegate_id: i64,
    ) -> Result<String, StaffError> {
        let floor_id = from.floor_id().ok_or(StaffError::NoFloorAssigned)?;
        let roster = self.roster(StaffKind::Nurse, floor_id).await?;
        let candidates = eligible_delegates(from, &roster);
        if candidates.is_empty() {
            return Err(StaffError::NoEligibleDelegates);
        }
        if !candidates.iter().any(|candidate| candidate.id == delegate_id) {
            return Err(StaffError::InvalidDelegate);
        }

        info!("delegating beds of {} to {delegate_id}", from.id);
        let message = self.api.delegate_beds(from.id, delegate_id).await?;
        Ok(message)
    }

    /// Create a nurse. Credentials are generated from her name and surfaced
    /// once in the result.
    pub async fn create_nurse(&self, form: &StaffFormState) -> Result<CreatedNurse, StaffError> {
        let validation = validation::validate_staff_form(form);
        if !validation.is_valid {
            return Err(StaffError::Form(validation.errors));
        }

        let generated_password =
            validation::generated_password(&form.first_name, &form.paternal_surname);
        let request = Self::create_request(form, Some(generated_password.clone()));

        let message = self.api.create_nurse(request).await?;
        Ok(CreatedNurse {
            message,
            generated_password,
        })
    }

    /// Create a secretary. The backend issues her credentials.
    pub async fn create_secretary(&self, form: &StaffFormState) -> Result<String, StaffError> {
        let validation = validation::validate_staff_form(form);
        if !validation.is_valid {
            return Err(StaffError::Form(validation.errors));
        }

        let message = self.api.create_secretary(Self::create_request(form, None)).await?;
        Ok(message)
    }

    /// Update personal data. The floor is not editable here, so only the
    /// personal fields are validated.
    pub async fn update(
        &self,
        kind: StaffKind,
        person_id: i64,
        form: &StaffFormState,
    ) -> Result<String, StaffError> {
        let validation = validation::validate_staff_fields(form);
        if !validation.is_valid {
            return Err(StaffError::Form(validation.errors));
        }

        let request = UpdateStaffRequest {
            first_name: form.first_name.trim().to_string(),
            paternal_surname: form.paternal_surname.trim().to_string(),
            maternal_surname: form.maternal_surname.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            username: form.username.trim().to_string(),
        };

        let message = match kind {
            StaffKind::Nurse => self.api.update_nurse(person_id, request).await?,
            StaffKind::Secretary => self.api.update_secretary(person_id, request).await?,
        };
        Ok(message)
    }

    /// Self-service credential update. The stored token no longer matches
    /// the renamed user, so the session is dropped and the user must sign
    /// in again.
    pub async fn update_credentials(
        &self,
        person_id: i64,
        username: &str,
        password: &str,
    ) -> Result<String, StaffError> {
        let validation = validation::validate_credentials(username, password);
        if !validation.is_valid {
            return Err(StaffError::Credentials(validation.errors));
        }

        let request = UpdateCredentialsRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let message = self.api.update_credentials(person_id, request).await?;

        self.api.sign_out();
        Ok(message)
    }

    /// Floor pinned for the signed-in secretary's forms; `None` for other
    /// roles, which choose a floor freely.
    pub async fn own_floor(&self) -> Result<Option<Floor>, StaffError> {
        let session = self.api.session().ok_or(ApiError::NotSignedIn)?;
        if session.role() != Role::Secretaria {
            return Ok(None);
        }

        let record = self.api.secretary_by_id(session.user_id()).await?;
        Ok(record.floor)
    }

    /// Every bed assignment currently held by one nurse.
    pub async fn assignments_of(&self, nurse_id: i64) -> Result<Vec<BedAssignment>, ApiError> {
        let assignments = self.api.list_assignments().await?;
        Ok(assignments
            .into_iter()
            .filter(|assignment| assignment.nurse_id == nurse_id)
            .collect())
    }

    /// Bulk-assign a selection of beds to a nurse.
    pub async fn assign_beds(&self, nurse_id: i64, bed_ids: Vec<i64>) -> Result<String, StaffError> {
        if bed_ids.is_empty() {
            return Err(StaffError::EmptySelection);
        }

        info!("assigning {} beds to nurse {nurse_id}", bed_ids.len());
        let message = self
            .api
            .assign_beds(AssignBedsRequest { nurse_id, bed_ids })
            .await?;
        Ok(message)
    }

    fn create_request(form: &StaffFormState, password: Option<String>) -> CreateStaffRequest {
        CreateStaffRequest {
            first_name: form.first_name.trim().to_string(),
            paternal_surname: form.paternal_surname.trim().to_string(),
            maternal_surname: form.maternal_surname.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            username: form.username.trim().to_string(),
            password,
            assigned_floor: FloorAssignment {
                floor_id: form.floor_id.unwrap_or_default(),
            },
        }
    }
}
