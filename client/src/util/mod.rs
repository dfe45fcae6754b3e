//! Presentation helpers shared by dashboard pages.

pub mod delta;
pub mod empty_state;
