//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues requests, `types` defines payloads and the fetch error
//! model, and `resources` names the dashboard endpoints.

pub mod api;
pub mod resources;
pub mod types;
