use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One guestbook signer.
///
/// `created_at` is RFC 3339 UTC with a fixed number of fractional digits, so
/// ordering by the column text is ordering by time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl Visitor {
    pub fn new(name: String, email: String) -> Self {
        Self::with_created_at(name, email, Utc::now())
    }

    pub fn with_created_at(name: String, email: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            created_at: format_timestamp(created_at),
        }
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Body of a create request. Both fields are optional here so that a missing
/// field becomes a validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct NewVisitor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewVisitor {
    /// Trimmed `(name, email)` if both are present and non-blank.
    pub fn validate(&self) -> Option<(String, String)> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();

        if name.is_empty() || email.is_empty() {
            return None;
        }

        Some((name.to_string(), email.to_string()))
    }
}
