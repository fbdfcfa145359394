//! # Domain Module
//!
//! Occupancy and staff-assignment policy for the hospital administration
//! frontend.
//!
//! ## Module Organization
//!
//! - **occupancy**: bed snapshots and the first-or-last, unoccupied
//!   deletion rule
//! - **staff**: soft-delete/reactivation, floor reassignment and bed
//!   delegation for nurses and secretaries
//! - **delegation**: the delegate-then-retry state machine shared by the
//!   staff workflows
//! - **admission**: patient admission and discharge
//! - **floors**: bulk floor creation and deletion
//! - **validation**: the field validation rule set shared by every form
//! - **audit**: audit-log listing and filtering
//!
//! Services wrap an [`crate::ApiClient`] and run each workflow as a strict
//! request/response sequence: local policy check, one request, refresh. The
//! backend stays the single source of truth and re-validates every rule.

pub mod admission;
pub mod audit;
pub mod delegation;
pub mod floors;
pub mod occupancy;
pub mod staff;
pub mod validation;

pub use admission::*;
pub use audit::*;
pub use delegation::*;
pub use floors::*;
pub use occupancy::*;
pub use staff::*;
pub use validation::*;
