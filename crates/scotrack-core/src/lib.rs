//! scotrack-core — SCORM 1.2 data model, LMS gateway, and tracking.
//!
//! This crate mirrors LMS state (objectives, interactions, bookmarks,
//! scores, lesson status) into local objects and pushes mutations back
//! through `cmi.*` key/value calls on an injected LMS connection.

pub mod datamodel;

pub mod error;
pub mod gateway;
pub mod interactions;
pub mod model;
pub mod objectives;
pub mod sco;
pub mod time;
