//! Types for authentication and the current-user profile

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Account role. The server encodes roles as numeric `role_id` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Provider,
    EndUser,
}

impl Role {
    /// Decode a numeric role id
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Provider),
            3 => Some(Role::EndUser),
            _ => None,
        }
    }

    /// The numeric role id the server expects
    pub fn id(self) -> u8 {
        match self {
            Role::Admin => 1,
            Role::Provider => 2,
            Role::EndUser => 3,
        }
    }

    /// Human-readable role name
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Provider => "Service Provider",
            Role::EndUser => "User",
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u8::deserialize(deserializer)?;
        Role::from_id(id).ok_or_else(|| D::Error::custom(format!("unknown role_id {}", id)))
    }
}

/// The current user's profile, as returned by `GET /me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// The account id
    pub id: i64,

    /// The account email address
    pub email: String,

    /// The account role
    #[serde(rename = "role_id")]
    pub role: Role,

    /// When the email was verified, if ever
    #[serde(default)]
    pub email_verified_at: Option<String>,

    /// Last login timestamp, if the account has ever logged in
    #[serde(default)]
    pub last_logged_in: Option<String>,
}

/// Response to a login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// The bearer token for subsequent requests
    pub token: Option<String>,

    /// The authenticated user, when the server includes it
    #[serde(default)]
    pub user: Option<Profile>,
}
