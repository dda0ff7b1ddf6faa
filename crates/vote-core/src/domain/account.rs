// ============================================================================
// Vote Core - Account Entity
// File: crates/vote-core/src/domain/account.rs
// Description: Demo account record held by the identity store
// ============================================================================

use std::fmt;

/// Account record. Seeded at startup, never mutated or deleted.
///
/// The password is stored and compared in plaintext. This is a known weakness
/// of the demo data set and is kept as-is on purpose; moving to hashed
/// credentials changes login behavior and must be done as an explicit change.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    password: String,
}

impl Account {
    pub fn new(id: i64, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact string comparison.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// The fixed demo seed.
    pub fn seed() -> Vec<Account> {
        vec![
            Account::new(1, "user1", "password123"),
            Account::new(2, "user2", "password123"),
        ]
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
