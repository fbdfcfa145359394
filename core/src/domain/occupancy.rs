//! Bed occupancy and deletion policy.
//!
//! Beds form a contiguous numbered sequence per floor; only the first or
//! last bed of the sequence may be removed, and only while no patient
//! occupies it and no nurse is assigned to it. The backend re-validates all
//! of this, but the policy runs locally first so a doomed request is never
//! sent.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use shared::{AddBedsRequest, Bed};

use crate::api::{ApiClient, ApiError};

/// Why a bed deletion is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeleteBedDenial {
    #[error("cama ocupada por un paciente")]
    OccupiedByPatient,
    #[error("cama asignada a una enfermera")]
    AssignedToNurse,
    #[error("no se puede eliminar una cama intermedia")]
    MiddleOfSequence,
    #[error("etiqueta de cama ilegible: {0}")]
    MalformedLabel(String),
}

/// Decide whether `bed` may be deleted given the full floor snapshot.
///
/// A label that does not parse as `<prefix>-<integer>`, on any bed of the
/// floor, denies the deletion outright rather than risking a wrong
/// first/last computation.
pub fn can_delete_bed(bed: &Bed, floor_beds: &[Bed]) -> Result<(), DeleteBedDenial> {
    if bed.patient.is_some() {
        return Err(DeleteBedDenial::OccupiedByPatient);
    }
    if bed.nurse_name.is_some() {
        return Err(DeleteBedDenial::AssignedToNurse);
    }

    let target = bed
        .sequence_number()
        .map_err(|_| DeleteBedDenial::MalformedLabel(bed.label.clone()))?;

    let mut first = target;
    let mut last = target;
    for other in floor_beds {
        let sequence = other
            .sequence_number()
            .map_err(|_| DeleteBedDenial::MalformedLabel(other.label.clone()))?;
        first = first.min(sequence);
        last = last.max(sequence);
    }

    if target != first && target != last {
        return Err(DeleteBedDenial::MiddleOfSequence);
    }

    Ok(())
}

/// Errors from the bed management workflows.
#[derive(Debug, Error)]
pub enum OccupancyError {
    #[error(transparent)]
    Denied(#[from] DeleteBedDenial),
    #[error("la cantidad de camas debe ser mayor a 0")]
    InvalidCount,
    #[error("cama no encontrada en el piso")]
    BedNotFound,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Bed management service: floor snapshots plus the deletion workflow.
#[derive(Clone)]
pub struct BedService {
    api: Arc<ApiClient>,
}

impl BedService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch and normalize the floor's bed snapshot.
    pub async fn beds_on_floor(&self, floor_id: i64) -> Result<Vec<Bed>, ApiError> {
        let records = self.api.beds_on_floor(floor_id).await?;
        Ok(records
            .into_iter()
            .map(|record| Bed::from_record(floor_id, record))
            .collect())
    }

    /// Beds on the floor with no nurse assigned: the candidates for a bulk
    /// assignment.
    pub async fn assignable_beds(&self, floor_id: i64) -> Result<Vec<Bed>, ApiError> {
        let beds = self.beds_on_floor(floor_id).await?;
        Ok(beds.into_iter().filter(|bed| bed.nurse_name.is_none()).collect())
    }

    /// Extend the floor's bed sequence by `count`.
    pub async fn add_beds(&self, floor_id: i64, count: u32) -> Result<String, OccupancyError> {
        if count == 0 {
            return Err(OccupancyError::InvalidCount);
        }

        info!("adding {count} beds to floor {floor_id}");
        let message = self
            .api
            .add_beds(AddBedsRequest { floor_id, count })
            .await?;
        Ok(message)
    }

    /// Delete a bed: policy check against the latest snapshot, then the
    /// request, then a refreshed snapshot of the floor.
    pub async fn delete_bed(&self, floor_id: i64, bed_id: i64) -> Result<Vec<Bed>, OccupancyError> {
        let beds = self.beds_on_floor(floor_id).await?;
        let bed = beds
            .iter()
            .find(|bed| bed.id == bed_id)
            .ok_or(OccupancyError::BedNotFound)?;

        can_delete_bed(bed, &beds)?;

        info!("deleting bed {} ({})", bed.id, bed.label);
        self.api.delete_bed(bed_id).await?;

        let refreshed = self.beds_on_floor(floor_id).await?;
        Ok(refreshed)
    }
}
