//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod connected_users;
pub mod login;
pub mod user_directory;
pub mod user_viewer;
