//! Actor snapshot

use serde::{Deserialize, Serialize};

/// Identity snapshot stamped on orders and invoices (`created_by`/`updated_by`).
///
/// Captured at write time from the authenticated context; never re-joined
/// against the user store afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: String,
    #[serde(default)]
    pub name: String,
}

impl Actor {
    /// Actor used by the unauthenticated public/QR order path.
    pub fn guest() -> Self {
        Self {
            user_id: "guest".to_string(),
            role: "GUEST".to_string(),
            name: String::new(),
        }
    }
}
