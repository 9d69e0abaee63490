//! Transport DTOs for the admin API boundary.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON payloads. The rendering layer never
//! persists or validates them beyond display-time derivations, so decoding is
//! lenient: alternate field spellings are accepted and unknown event kinds
//! degrade to [`EventType::Other`] instead of failing the whole response.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A managed account as returned by the admin user listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric account identifier.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    /// Login/display name.
    pub username: String,
    /// Account email address.
    #[serde(default)]
    pub email: String,
    /// Whether the account carries the admin role.
    #[serde(default, alias = "isAdmin")]
    pub is_admin: bool,
    /// Whether the account has an active WhatsApp session link.
    #[serde(default, alias = "whatsappConnected")]
    pub whatsapp_connected: bool,
    /// Creation timestamp as sent by the server (ISO 8601).
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

/// A messaging group owned by the inspected user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub name: String,
}

/// A single chat message. Immutable from the viewer's perspective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(alias = "groupId", deserialize_with = "deserialize_i64_from_number")]
    pub group_id: i64,
    pub sender: String,
    #[serde(alias = "message", alias = "body")]
    pub content: String,
    pub timestamp: String,
}

/// Kind of timeline event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    #[serde(alias = "join", alias = "JOINED", alias = "joined")]
    Join,
    #[serde(alias = "leave", alias = "LEFT", alias = "left")]
    Leave,
    #[serde(alias = "certificate", alias = "CERTIFICATE_REQUEST", alias = "certificate_request")]
    Certificate,
    #[serde(other)]
    Other,
}

/// A discrete timeline occurrence attached to a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(rename = "type", alias = "event_type", alias = "eventType")]
    pub event_type: EventType,
    #[serde(alias = "groupId", deserialize_with = "deserialize_i64_from_number")]
    pub group_id: i64,
    pub timestamp: String,
    /// Member the event concerns, when the server reports it.
    #[serde(default, alias = "memberName")]
    pub member_name: Option<String>,
}

/// Counts scoped to a single group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    #[serde(alias = "groupId", deserialize_with = "deserialize_i64_from_number")]
    pub group_id: i64,
    #[serde(default, alias = "memberCount", alias = "members", deserialize_with = "deserialize_i64_from_number")]
    pub member_count: i64,
    #[serde(default, alias = "messageCount", alias = "messages", deserialize_with = "deserialize_i64_from_number")]
    pub message_count: i64,
    #[serde(default, alias = "activeUsers", deserialize_with = "deserialize_i64_from_number")]
    pub active_users: i64,
}

/// Server-computed analytics consumed by the server-supplied strategy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerAnalytics {
    #[serde(default, alias = "totalMembers", deserialize_with = "deserialize_i64_from_number")]
    pub total_members: i64,
    #[serde(default, alias = "joinCount", alias = "joins", deserialize_with = "deserialize_i64_from_number")]
    pub join_count: i64,
    #[serde(default, alias = "leaveCount", alias = "leaves", deserialize_with = "deserialize_i64_from_number")]
    pub leave_count: i64,
    #[serde(default, alias = "messageCount", deserialize_with = "deserialize_i64_from_number")]
    pub message_count: i64,
    #[serde(default, alias = "activeUsers", deserialize_with = "deserialize_i64_from_number")]
    pub active_users: i64,
    #[serde(default, alias = "certificateCount", alias = "certificates", deserialize_with = "deserialize_i64_from_number")]
    pub certificate_count: i64,
}

/// Aggregate statistics for an inspected user, optionally broken down per group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, alias = "totalMembers", deserialize_with = "deserialize_i64_from_number")]
    pub total_members: i64,
    #[serde(default, alias = "totalMessages", deserialize_with = "deserialize_i64_from_number")]
    pub total_messages: i64,
    #[serde(default, alias = "activeUsers", deserialize_with = "deserialize_i64_from_number")]
    pub active_users: i64,
    #[serde(default)]
    pub groups: Vec<GroupStats>,
    #[serde(default)]
    pub analytics: Option<ServerAnalytics>,
}

impl Stats {
    /// Per-group entry for `group_id`, if the server reported one.
    #[must_use]
    pub fn for_group(&self, group_id: i64) -> Option<&GroupStats> {
        self.groups.iter().find(|g| g.group_id == group_id)
    }
}

/// Successful `/api/auth/login` payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected integer string, got {raw:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}
