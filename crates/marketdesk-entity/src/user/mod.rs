//! User identity as seen by the entity configuration provider.

pub mod role;

pub use role::UserRole;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User identifier.
    pub id: Uuid,
    /// Role granted to the user.
    pub role: UserRole,
    /// Contact email, if known.
    #[serde(default)]
    pub email: Option<String>,
}

impl CurrentUser {
    /// Create a user with the given role.
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self {
            id,
            role,
            email: None,
        }
    }
}
