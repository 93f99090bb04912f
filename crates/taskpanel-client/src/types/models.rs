/*
[INPUT]:  Task API JSON schema and serde requirements
[OUTPUT]: Task and TaskExecution structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-14 accept array-encoded LocalDateTime timestamps
*/

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::{Result, TaskApiError};

/// A named shell command bound to an owner and a target server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub command: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub owner: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub server_name: String,
    /// Execution history, oldest first
    #[serde(default, deserialize_with = "serde_helpers::vec_or_empty")]
    pub task_executions: Vec<TaskExecution>,
}

impl Task {
    /// Server-assigned id, refusing tasks that were never persisted
    pub fn require_id(&self) -> Result<&str> {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(TaskApiError::MissingId),
        }
    }

    pub fn has_id(&self) -> bool {
        self.require_id().is_ok()
    }

    /// Most recent execution (the last element of the history)
    pub fn latest_execution(&self) -> Option<&TaskExecution> {
        self.task_executions.last()
    }

    /// Same server identity as `other`; tasks without id never match
    pub fn same_identity(&self, other: &Task) -> bool {
        match (self.require_id(), other.require_id()) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        }
    }
}

/// One historical run of a task's command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskExecution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::timestamp_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::timestamp_text")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl TaskExecution {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.start_time.as_deref().and_then(parse_timestamp)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.end_time.as_deref().and_then(parse_timestamp)
    }

    /// First eight characters of the id, or `N/A`
    pub fn short_id(&self) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.chars().take(8).collect(),
            _ => "N/A".to_string(),
        }
    }
}

/// Parse ISO-8601 text: RFC 3339 with an offset, or a naive local-less
/// timestamp which is taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Timestamps arrive either as text or as `[y, m, d, h, min, s, nanos]`.
    pub fn timestamp_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(text)),
            Value::Array(parts) => {
                let mut numbers = Vec::with_capacity(parts.len());
                for part in &parts {
                    let number = part
                        .as_u64()
                        .ok_or_else(|| serde::de::Error::custom("timestamp part is not a number"))?;
                    numbers.push(number);
                }
                if numbers.len() < 5 {
                    return Err(serde::de::Error::custom("timestamp array is too short"));
                }
                let second = numbers.get(5).copied().unwrap_or(0);
                let mut text = format!(
                    "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                    numbers[0], numbers[1], numbers[2], numbers[3], numbers[4], second
                );
                if let Some(nanos) = numbers.get(6) {
                    text.push_str(&format!(".{nanos:09}"));
                }
                Ok(Some(text))
            }
            other => Err(serde::de::Error::custom(format!(
                "unexpected timestamp value: {other}"
            ))),
        }
    }
}
