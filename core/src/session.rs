//! Operation execution and refresh.
//!
//! # Design
//! A `Session` turns intents into HTTP round-trips through a [`Transport`]
//! and, on success, redraws the affected view on a [`Surface`]. It keeps no
//! state between calls: every redraw comes from a fresh fetch, and the ids a
//! mutation needs travel in the intent.
//!
//! Failures are reported once, at the operation boundary, as an `error`
//! event, and returned as [`OperationFailed`]. The surface is never touched
//! on failure. After a successful mutation the [`RefreshPolicy`] decides
//! whether the collection is re-fetched and redrawn.
//!
//! Requests are not ordered against each other. Two quick submissions may
//! resolve their refreshes out of order and the later one to land wins.

use tracing::{debug, error};

use crate::client::TaskClient;
use crate::config::{ClientConfig, RefreshPolicy};
use crate::document::Surface;
use crate::error::{ApiError, Operation, OperationFailed};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::intent::Intent;
use crate::types::{toggled, CreateList, CreateTask, EntityId};
use crate::view::{Renderer, ViewKind, ViewState};

/// What a successful operation did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A view was applied; `skipped` entities had empty names.
    Rendered { view: ViewKind, skipped: usize },
    /// The server accepted a mutation and the view was left as it was.
    Mutated,
}

type Parse<R> = fn(&TaskClient, HttpResponse) -> Result<R, ApiError>;

pub struct Session<T, S> {
    client: TaskClient,
    renderer: Renderer,
    refresh: RefreshPolicy,
    transport: T,
    surface: S,
}

impl<T: Transport, S: Surface> Session<T, S> {
    pub fn new(config: &ClientConfig, transport: T, surface: S) -> Self {
        Self {
            client: TaskClient::new(&config.base_url),
            renderer: Renderer::new(config.lists_title.as_str()),
            refresh: config.refresh,
            transport,
            surface,
        }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub async fn handle(&self, intent: Intent) -> Result<Outcome, OperationFailed> {
        match intent {
            Intent::LoadLists => self.load_lists().await,
            Intent::LoadTasks { list_id, list_name } => self.load_tasks(&list_id, &list_name).await,
            Intent::CreateList { name } => self.create_list(&name).await,
            Intent::CreateTask {
                list_id,
                list_name,
                name,
            } => self.create_task(&list_id, &list_name, &name).await,
            Intent::DeleteList { list_id } => self.delete_list(&list_id).await,
            Intent::DeleteTask {
                list_id,
                list_name,
                task_id,
            } => self.delete_task(&list_id, &list_name, &task_id).await,
            Intent::ToggleTask {
                list_id,
                list_name,
                task_id,
                done,
            } => self.toggle_task(&list_id, &list_name, &task_id, done).await,
        }
    }

    pub async fn load_lists(&self) -> Result<Outcome, OperationFailed> {
        let request = Ok(self.client.build_fetch_lists());
        let lists = self
            .call(Operation::FetchLists, request, TaskClient::parse_fetch_lists)
            .await?;
        debug!(count = lists.len(), "lists loaded");
        Ok(self.show(ViewState::Lists(lists)))
    }

    pub async fn load_tasks(
        &self,
        list_id: &EntityId,
        list_name: &str,
    ) -> Result<Outcome, OperationFailed> {
        let request = Ok(self.client.build_fetch_tasks(list_id));
        let tasks = self
            .call(Operation::FetchTasks, request, TaskClient::parse_fetch_tasks)
            .await?;
        debug!(%list_id, count = tasks.len(), "tasks loaded");
        Ok(self.show(ViewState::Tasks {
            list_id: list_id.clone(),
            list_name: list_name.to_string(),
            tasks,
        }))
    }

    pub async fn create_list(&self, name: &str) -> Result<Outcome, OperationFailed> {
        let input = CreateList {
            name: name.to_string(),
        };
        let request = self.client.build_create_list(&input);
        let created = self
            .call(Operation::CreateList, request, TaskClient::parse_create_list)
            .await?;
        debug!(list_id = %created.id, "list created");
        self.after_list_mutation().await
    }

    pub async fn create_task(
        &self,
        list_id: &EntityId,
        list_name: &str,
        name: &str,
    ) -> Result<Outcome, OperationFailed> {
        let input = CreateTask {
            name: name.to_string(),
        };
        let request = self.client.build_create_task(list_id, &input);
        let created = self
            .call(Operation::CreateTask, request, TaskClient::parse_create_task)
            .await?;
        debug!(%list_id, task_id = %created.id, "task created");
        self.after_task_mutation(list_id, list_name).await
    }

    pub async fn delete_list(&self, list_id: &EntityId) -> Result<Outcome, OperationFailed> {
        let request = Ok(self.client.build_delete_list(list_id));
        self.call(Operation::DeleteList, request, TaskClient::parse_delete_list)
            .await?;
        debug!(%list_id, "list deleted");
        self.after_list_mutation().await
    }

    pub async fn delete_task(
        &self,
        list_id: &EntityId,
        list_name: &str,
        task_id: &EntityId,
    ) -> Result<Outcome, OperationFailed> {
        let request = Ok(self.client.build_delete_task(list_id, task_id));
        self.call(Operation::DeleteTask, request, TaskClient::parse_delete_task)
            .await?;
        debug!(%list_id, %task_id, "task deleted");
        self.after_task_mutation(list_id, list_name).await
    }

    /// `done` is the state the checkbox was rendered with.
    pub async fn toggle_task(
        &self,
        list_id: &EntityId,
        list_name: &str,
        task_id: &EntityId,
        done: bool,
    ) -> Result<Outcome, OperationFailed> {
        let status = toggled(done);
        let request = Ok(self.client.build_set_task_status(list_id, task_id, status));
        let updated = self
            .call(Operation::ToggleTask, request, TaskClient::parse_update_task)
            .await?;
        debug!(%list_id, %task_id, status = ?updated.status, "task toggled");
        self.after_task_mutation(list_id, list_name).await
    }

    async fn after_list_mutation(&self) -> Result<Outcome, OperationFailed> {
        match self.refresh {
            RefreshPolicy::FullRefetch => self.load_lists().await,
            RefreshPolicy::Manual => Ok(Outcome::Mutated),
        }
    }

    async fn after_task_mutation(
        &self,
        list_id: &EntityId,
        list_name: &str,
    ) -> Result<Outcome, OperationFailed> {
        match self.refresh {
            RefreshPolicy::FullRefetch => self.load_tasks(list_id, list_name).await,
            RefreshPolicy::Manual => Ok(Outcome::Mutated),
        }
    }

    fn show(&self, state: ViewState) -> Outcome {
        let view = self.renderer.render(&state);
        self.surface.apply(&view);
        Outcome::Rendered {
            view: view.kind,
            skipped: view.skipped,
        }
    }

    /// One round-trip. The only place failures are logged.
    async fn call<R>(
        &self,
        operation: Operation,
        request: Result<HttpRequest, ApiError>,
        parse: Parse<R>,
    ) -> Result<R, OperationFailed> {
        let result = match request {
            Ok(request) => self
                .transport
                .execute(request)
                .await
                .and_then(|response| parse(&self.client, response)),
            Err(err) => Err(err),
        };
        result.map_err(|source| {
            error!(%operation, error = %source, "operation failed");
            OperationFailed::new(operation, source)
        })
    }
}
