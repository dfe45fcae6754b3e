//! Route table consulted by the reconciler.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

pub const LOGIN_ROUTE: &str = "/login";
pub const ROOT_ROUTE: &str = "/";
pub const LANDING_ROUTE: &str = "/dashboard";
pub const PROTECTED_PREFIX: &str = "/dashboard";

/// The handful of client routes that matter for redirects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    pub login: String,
    pub root: String,
    /// Where an authenticated user lands after login.
    pub landing: String,
    /// Everything at or below this path requires a session.
    pub protected_prefix: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            login: LOGIN_ROUTE.to_owned(),
            root: ROOT_ROUTE.to_owned(),
            landing: LANDING_ROUTE.to_owned(),
            protected_prefix: PROTECTED_PREFIX.to_owned(),
        }
    }
}

impl RouteTable {
    #[must_use]
    pub fn is_login(&self, location: &str) -> bool {
        route_path(location) == self.login
    }

    #[must_use]
    pub fn is_root(&self, location: &str) -> bool {
        route_path(location) == self.root
    }

    /// True for the prefix itself and for paths below it at a `/` boundary.
    #[must_use]
    pub fn is_protected(&self, location: &str) -> bool {
        let path = route_path(location);
        match path.strip_prefix(self.protected_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Path portion of a location, without query or fragment. A trailing slash
/// is ignored except on root.
#[must_use]
pub fn route_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else if path.is_empty() {
        ROOT_ROUTE
    } else {
        path
    }
}
