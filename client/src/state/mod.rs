//! Client-side state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `cache` stores responses by request path, `revalidate` decides when a
//! cached probe is stale, and `session` ties both to the reconciler and the
//! router.

pub mod cache;
pub mod revalidate;
pub mod session;
