//! Application state modules.
//!
//! DESIGN
//! ======
//! Each screen owns a plain-Rust state struct held in an `RwSignal`. The
//! transitions live here so they can be tested without a browser; pages only
//! wire them to events and spawned requests.

pub mod auth;
pub mod directory;
pub mod gallery;
pub mod notice;
pub mod query;
pub mod viewer;
