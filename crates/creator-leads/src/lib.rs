//! Lead intake for the creator partnership site.
//!
//! The [`intake`] module holds the workflow: typed form schemas, the field validator, the
//! step gate, the budget tier classifier, the submission coordinator and the receipt
//! generator. Storage, e-mail and lead scoring are reached through the collaborator traits in
//! [`intake::collaborators`].

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
