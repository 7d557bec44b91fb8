use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorStatus {
    Online,
    Offline,
}

impl VisitorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VisitorStatus::Online => "online",
            VisitorStatus::Offline => "offline",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "online" => Some(VisitorStatus::Online),
            "offline" => Some(VisitorStatus::Offline),
            _ => None,
        }
    }
}

/// One row per visitor registration. `last_seen` is refreshed on every
/// presence change; rows are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorLog {
    pub id: String,
    pub name: String,
    pub aadhar: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    #[serde(rename = "lastSeen")]
    pub last_seen: String,
    pub status: VisitorStatus,
}

/// Check-in form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVisitor {
    pub name: String,
    pub aadhar: String,
    pub phone: String,
    pub address: String,
    pub email: String,
}

/// Presence update. A body with no `status` still refreshes `last_seen`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateVisitor {
    pub status: Option<VisitorStatus>,
}
