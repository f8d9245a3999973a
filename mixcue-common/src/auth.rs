//! Credentials for the remote catalog service
//!
//! The catalog service authenticates every call with two bearer tokens: a
//! service-level developer token and a per-user library token. Mixcue treats
//! both as opaque — it never inspects, validates, or refreshes them. The
//! authorization handshake that produces them lives outside this codebase.

use serde::{Deserialize, Serialize};

/// Opaque token pair required by every remote catalog call.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// Service-level bearer token (sent as `Authorization: Bearer ...`)
    pub developer_token: String,
    /// Per-user library token (sent as the user-token header)
    pub user_token: String,
}

impl Credentials {
    pub fn new(developer_token: impl Into<String>, user_token: impl Into<String>) -> Self {
        Self {
            developer_token: developer_token.into(),
            user_token: user_token.into(),
        }
    }
}

// Tokens must not end up in logs; Debug shows lengths only.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("developer_token", &format!("<{} bytes>", self.developer_token.len()))
            .field("user_token", &format!("<{} bytes>", self.user_token.len()))
            .finish()
    }
}
