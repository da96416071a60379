//! # authentica-reports — Report Lifecycle Manager
//!
//! Owns everything between "the user opens the new-report form" and "the
//! report is resolved":
//!
//! - **Store** (`store.rs`): insertion-ordered, append-only collection of
//!   reports. Records are only ever replaced in place by a status transition.
//! - **Wizard** (`wizard.rs`, `draft.rs`): the three-step form. Forward
//!   movement is gated on the current step's required fields; photos are
//!   optional and managed in step 3.
//! - **Gateway** (`gateway.rs`): the asynchronous submission boundary.
//!   [`SimulatedGateway`] stands in for a backend with a fixed latency.
//! - **Filter** (`filter.rs`): pure, status-scoped projection of the store.
//! - **Session** (`session.rs`): the single controller that owns all of the
//!   above, emits [`NavigationIntent`]s, and produces [`SessionSnapshot`]s
//!   for the presentation layer after every mutation.
//!
//! ## Crate Policy
//!
//! - The session is the only writer to the store.
//! - Store locks are never held across `.await`.
//! - Rendering and navigation are never performed here; they are requested.

pub mod draft;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod intent;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod wizard;

pub use draft::{DraftField, PhotoPolicy, WizardDraft};
pub use error::ReportError;
pub use filter::{filtered_reports, StatusFilter};
pub use gateway::{ReportGateway, SimulatedGateway};
pub use intent::NavigationIntent;
pub use session::{ReportSession, StepOutcome};
pub use snapshot::{ReportView, SessionSnapshot, SubmissionPhase};
pub use store::ReportStore;
pub use wizard::{Advance, StepWizard, WizardStep};
