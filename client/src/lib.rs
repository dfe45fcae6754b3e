//! Headless Doughbox client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` talks HTTP to the API, `state` holds the response cache and the
//! [`SessionController`] that keeps a router in step with the session, and
//! `util` carries the small presentation helpers the dashboard pages use.

pub mod net;
pub mod router;
pub mod state;
pub mod util;

pub use net::api::{ApiClient, ClientConfig};
pub use net::resources::Resource;
pub use net::types::{FetchError, Payload};
pub use router::{MemoryRouter, Navigator};
pub use state::cache::ResponseCache;
pub use state::revalidate::{RevalidatePolicy, RevalidateTrigger};
pub use state::session::{LoginError, SessionController};
