use serde::{Deserialize, Serialize};

/// A persisted emergency alert. Append-only; rows are never mutated or
/// deleted. `id` and `created_at` are assigned by the store at append time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SosAlert {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    /// Opaque wallet/account identifier, kept under its wire name.
    #[serde(rename = "walletAddress")]
    pub wallet_address: Option<String>,
    pub message: Option<String>,
    pub created_at: String,
}

/// Payload accepted when appending an alert. Matches the "sos" wire payload:
/// everything beyond `name` is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlert {
    pub name: String,
    pub email: Option<String>,
    #[serde(rename = "walletAddress")]
    pub wallet_address: Option<String>,
    pub message: Option<String>,
}
