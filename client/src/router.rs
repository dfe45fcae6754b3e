//! Client-side routing.
//!
//! The location only changes through explicit navigation. The session
//! controller reads it through [`Navigator`] and writes it when the
//! reconciler asks for a redirect.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

/// Anything that owns the current client location.
pub trait Navigator {
    fn location(&self) -> &str;
    fn navigate(&mut self, to: &str);
}

/// In-memory router that records every location it visits.
#[derive(Clone, Debug)]
pub struct MemoryRouter {
    history: Vec<String>,
}

impl MemoryRouter {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self { history: vec![initial.to_owned()] }
    }

    /// Every location visited, oldest first, including the initial one.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.history.len() < 2 {
            return false;
        }
        self.history.pop();
        true
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryRouter {
    fn location(&self) -> &str {
        self.history.last().map_or("/", String::as_str)
    }

    fn navigate(&mut self, to: &str) {
        tracing::debug!(from = %self.location(), %to, "navigate");
        self.history.push(to.to_owned());
    }
}
