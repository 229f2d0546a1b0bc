//! Display-only player identity.
//!
//! Deserialized from the host platform's init payload when one exists.
//! Progression never reads it; an anonymous session plays the same game.

use serde::{Deserialize, Serialize};

/// Optional player identity used for the header display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: u64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: Option<bool>,
}

/// Name to show in the header; anonymous sessions show "Player".
pub fn display_name(profile: Option<&PlayerProfile>) -> &str {
    profile.map(|p| p.first_name.as_str()).unwrap_or("Player")
}
