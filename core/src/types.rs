//! Domain DTOs for the list/task API.
//!
//! # Design
//! These mirror the server's JSON records but are defined independently of
//! the mock-server crate; the integration suite catches schema drift.
//! Entities are transient copies of server state. Nothing here is cached
//! between renders.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque server-assigned identifier.
///
/// The server issues UUID strings, but integer ids decode too and are kept as
/// their decimal text, so `1` and `"1"` name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => EntityId(s),
            Raw::Signed(n) => EntityId(n.to_string()),
            Raw::Unsigned(n) => EntityId(n.to_string()),
        })
    }
}

/// Task priority, encoded on the wire as its integer value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    No,
    Low,
    Medium,
    High,
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> u8 {
        match priority {
            Priority::No => 0,
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::No),
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(format!("unknown priority {other}")),
        }
    }
}

/// Task progress, encoded on the wire as its integer value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        match status {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Status::Todo),
            1 => Ok(Status::InProgress),
            2 => Ok(Status::Done),
            other => Err(format!("unknown status {other}")),
        }
    }
}

/// A named collection of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A unit of work inside one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    #[serde(default)]
    pub list_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }

    /// Status a completion toggle moves this task to.
    pub fn toggled_status(&self) -> Status {
        toggled(self.is_done())
    }
}

/// `Done` tasks go back to `Todo`; everything else becomes `Done`.
pub fn toggled(done: bool) -> Status {
    if done {
        Status::Todo
    } else {
        Status::Done
    }
}

/// Request payload for creating a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateList {
    pub name: String,
}

/// Request payload for creating a task. The server fills in the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
