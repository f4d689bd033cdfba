//! Error types for the list/task client.
//!
//! # Design
//! `ApiError` is the cause: what went wrong on the wire. `OperationFailed` is
//! the one kind callers of a [`Session`](crate::Session) see; it names which
//! user-facing operation was abandoned and carries the cause. `NotFound` keeps
//! its own variant because single-entity lookups distinguish it.

use std::fmt;

use thiserror::Error;

/// Wire-level failure of a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request never produced a response (network down, CORS, aborted).
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("decoding response failed: {0}")]
    Decode(String),

    #[error("encoding request failed: {0}")]
    Encode(String),
}

/// The user-facing operations a session can abandon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchLists,
    FetchTasks,
    CreateList,
    CreateTask,
    DeleteList,
    DeleteTask,
    ToggleTask,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::FetchLists => "fetch lists",
            Operation::FetchTasks => "fetch tasks",
            Operation::CreateList => "create list",
            Operation::CreateTask => "create task",
            Operation::DeleteList => "delete list",
            Operation::DeleteTask => "delete task",
            Operation::ToggleTask => "toggle task",
        };
        f.write_str(name)
    }
}

/// An operation was abandoned. The view was left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {source}")]
pub struct OperationFailed {
    pub operation: Operation,
    #[source]
    pub source: ApiError,
}

impl OperationFailed {
    pub fn new(operation: Operation, source: ApiError) -> Self {
        Self { operation, source }
    }
}
