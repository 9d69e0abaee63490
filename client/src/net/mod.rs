//! Networking modules for the remote admin API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the request/response envelope and the `AdminApi` seam, while
//! `types` defines the transport DTOs shared by every screen.

pub mod api;
pub mod types;
