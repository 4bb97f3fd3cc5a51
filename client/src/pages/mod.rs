//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, polling, dialog
//! flags, stream lifecycles) and delegates rendering details to
//! `components`.

pub mod analytics;
pub mod login;
pub mod memories;
pub mod pocket;
pub mod pockets;
pub mod settings;
pub mod tasks;
