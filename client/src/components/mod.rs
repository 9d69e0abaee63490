//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render admin chrome and data panes from props or shared Leptos
//! context; they never call the API themselves.

pub mod analytics_panel;
pub mod confirm_dialog;
pub mod group_list;
pub mod message_thread;
pub mod nav_bar;
pub mod notice_stack;
pub mod user_table;
pub mod user_tile;
