//! # Hospital Admin Core
//!
//! Non-UI logic for the hospital administration frontend.
//!
//! This crate brings together the three layers every screen of the
//! application is built on:
//! - **Session**: explicit session value object created at sign-in and
//!   invalidated at sign-out or on a 401
//! - **Api**: typed directory client over the backend REST endpoints,
//!   pure I/O with a uniform error taxonomy
//! - **Domain**: occupancy and staff-assignment policy, validation rules,
//!   and the delegate-then-retry workflow
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//! ```text
//! UI Layer (tables, forms, modals)
//!     ↓
//! Domain Layer (policy, workflows, validation)
//!     ↓
//! Api Layer (directory client)
//!     ↓
//! Remote backend (single source of truth)
//! ```
//!
//! Every domain workflow is strictly sequential: one outstanding request,
//! the next step only after the previous response is observed. The backend
//! re-validates everything; local policy checks exist to give immediate
//! feedback and to avoid doomed requests, not to replace server-side
//! enforcement.

pub mod api;
pub mod domain;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use domain::*;
pub use session::Session;
