//! Password and API-token checks.

use sha2::{Digest, Sha256};

/// Result of checking a login attempt against the configured password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Accepted,
    /// No password is configured; every attempt is accepted.
    Open,
    Rejected,
}

impl PasswordCheck {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let mut out = [0_u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Compare two secrets by digest so timing does not depend on shared prefix
/// length.
#[must_use]
pub fn secrets_match(candidate: &str, expected: &str) -> bool {
    let a = digest(candidate);
    let b = digest(expected);
    a.iter().zip(b.iter()).fold(0_u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[must_use]
pub fn check_password(configured: Option<&str>, attempt: &str) -> PasswordCheck {
    match configured {
        None => PasswordCheck::Open,
        Some(expected) if secrets_match(attempt, expected) => PasswordCheck::Accepted,
        Some(_) => PasswordCheck::Rejected,
    }
}

/// Extract and verify an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn bearer_matches(header: Option<&str>, configured: Option<&str>) -> bool {
    let (Some(header), Some(expected)) = (header, configured) else {
        return false;
    };
    header
        .strip_prefix("Bearer ")
        .is_some_and(|token| secrets_match(token.trim(), expected))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
