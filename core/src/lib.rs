//! Client core for the list/task service.
//!
//! # Overview
//! Keeps a single-page view in sync with two server-owned collections, lists
//! and the tasks of one list. Nothing here performs I/O: requests go out
//! through a [`Transport`] and rendered views land on a [`Surface`], both
//! supplied by the host (the browser crate, or tests).
//!
//! # Design
//! - `TaskClient` is stateless. Each operation is `build_*` (request) plus
//!   `parse_*` (response).
//! - `Renderer::render` is a pure function from `ViewState` to a node tree.
//!   Applying a view replaces whichever view was showing.
//! - Rendered elements carry `data-action` and entity ids; `dispatch` maps
//!   one delegated event to an `Intent`.
//! - `Session` runs intents, logs and returns `OperationFailed` on any
//!   failure, and refreshes from the server after mutations.

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod intent;
pub mod session;
pub mod types;
pub mod view;

pub use client::TaskClient;
pub use config::{ClientConfig, ConfigError, RefreshPolicy};
pub use document::{Document, Surface};
pub use error::{ApiError, Operation, OperationFailed};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use intent::{dispatch, Action, Intent, UiEvent};
pub use session::{Outcome, Session};
pub use types::{CreateList, CreateTask, EntityId, Priority, Status, Task, TaskList};
pub use view::{Element, Node, RenderedView, Renderer, ViewKind, ViewState};
