//! Utility modules shared by the build stages.

pub mod date;
pub mod exec;
pub mod par;
