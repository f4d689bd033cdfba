//! Stateless HTTP request builder and response parser for the list/task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip.
//! Any 2xx status is success; everything else is an error carrying the
//! status and body.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateList, CreateTask, EntityId, Priority, Status, Task, TaskList};

/// Unreserved characters from RFC 3986 stay as they are.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Synchronous, stateless client for the list/task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- lists ---

    pub fn build_fetch_lists(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/lists".to_string())
    }

    pub fn build_create_list(&self, input: &CreateList) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/lists".to_string(), input)
    }

    pub fn build_delete_list(&self, list_id: &EntityId) -> HttpRequest {
        self.request(HttpMethod::Delete, list_route(list_id))
    }

    pub fn parse_fetch_lists(&self, response: HttpResponse) -> Result<Vec<TaskList>, ApiError> {
        decode(response)
    }

    pub fn parse_create_list(&self, response: HttpResponse) -> Result<TaskList, ApiError> {
        decode(response)
    }

    pub fn parse_delete_list(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- tasks ---

    pub fn build_fetch_tasks(&self, list_id: &EntityId) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/tasks", list_route(list_id)))
    }

    pub fn build_create_task(
        &self,
        list_id: &EntityId,
        input: &CreateTask,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            format!("{}/tasks", list_route(list_id)),
            input,
        )
    }

    pub fn build_get_task(&self, list_id: &EntityId, task_id: &EntityId) -> HttpRequest {
        self.request(HttpMethod::Get, task_route(list_id, task_id))
    }

    pub fn build_delete_task(&self, list_id: &EntityId, task_id: &EntityId) -> HttpRequest {
        self.request(HttpMethod::Delete, task_route(list_id, task_id))
    }

    pub fn build_rename_task(
        &self,
        list_id: &EntityId,
        task_id: &EntityId,
        new_name: &str,
    ) -> HttpRequest {
        self.update_request(list_id, task_id, "name", new_name)
    }

    pub fn build_set_task_description(
        &self,
        list_id: &EntityId,
        task_id: &EntityId,
        new_description: &str,
    ) -> HttpRequest {
        self.update_request(list_id, task_id, "description", new_description)
    }

    pub fn build_set_task_priority(
        &self,
        list_id: &EntityId,
        task_id: &EntityId,
        priority: Priority,
    ) -> HttpRequest {
        let value = u8::from(priority).to_string();
        self.update_request(list_id, task_id, "priority", &value)
    }

    /// Completion toggles go through here with `Done` or `Todo`.
    pub fn build_set_task_status(
        &self,
        list_id: &EntityId,
        task_id: &EntityId,
        status: Status,
    ) -> HttpRequest {
        let value = u8::from(status).to_string();
        self.update_request(list_id, task_id, "status", &value)
    }

    pub fn parse_fetch_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        decode(response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        decode(response)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        decode(response)
    }

    /// Shared by every `PUT .../{field}` update; the server echoes the task.
    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        decode(response)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- helpers ---

    fn request(&self, method: HttpMethod, route: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{route}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        route: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url: format!("{}{route}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// The server takes single-field updates as `new_{field}` query params.
    fn update_request(
        &self,
        list_id: &EntityId,
        task_id: &EntityId,
        field: &str,
        value: &str,
    ) -> HttpRequest {
        let route = format!(
            "{}/{field}?new_{field}={}",
            task_route(list_id, task_id),
            encode(value)
        );
        self.request(HttpMethod::Put, route)
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

fn list_route(list_id: &EntityId) -> String {
    format!("/lists/{}", encode(list_id.as_str()))
}

fn task_route(list_id: &EntityId, task_id: &EntityId) -> String {
    format!("{}/tasks/{}", list_route(list_id), encode(task_id.as_str()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TaskClient {
        TaskClient::new("http://127.0.0.1:8000")
    }

    #[test]
    fn build_fetch_lists_produces_correct_request() {
        let req = client().build_fetch_lists();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://127.0.0.1:8000/lists");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_list_sends_only_the_name() {
        let input = CreateList {
            name: "Work".to_string(),
        };
        let req = client().build_create_list(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://127.0.0.1:8000/lists");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Work" }));
    }

    #[test]
    fn task_routes_nest_under_the_list() {
        let list = EntityId::from("l1");
        let task = EntityId::from("t9");
        let c = client();

        assert_eq!(c.build_fetch_tasks(&list).url, "http://127.0.0.1:8000/lists/l1/tasks");
        assert_eq!(
            c.build_delete_task(&list, &task).url,
            "http://127.0.0.1:8000/lists/l1/tasks/t9"
        );
        assert_eq!(c.build_delete_task(&list, &task).method, HttpMethod::Delete);
        assert_eq!(c.build_delete_list(&list).url, "http://127.0.0.1:8000/lists/l1");
        assert_eq!(c.build_get_task(&list, &task).method, HttpMethod::Get);
    }

    #[test]
    fn set_status_uses_integer_query_param() {
        let req = client().build_set_task_status(
            &EntityId::from("l1"),
            &EntityId::from("t9"),
            Status::Done,
        );
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(
            req.url,
            "http://127.0.0.1:8000/lists/l1/tasks/t9/status?new_status=2"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn rename_percent_encodes_the_value() {
        let req = client().build_rename_task(
            &EntityId::from("l1"),
            &EntityId::from("t9"),
            "Milk & eggs",
        );
        assert_eq!(
            req.url,
            "http://127.0.0.1:8000/lists/l1/tasks/t9/name?new_name=Milk%20%26%20eggs"
        );
    }

    #[test]
    fn ids_are_encoded_as_path_segments() {
        let req = client().build_fetch_tasks(&EntityId::from("a/b"));
        assert_eq!(req.url, "http://127.0.0.1:8000/lists/a%2Fb/tasks");
    }

    #[test]
    fn parse_fetch_lists_keeps_server_order() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":"b","name":"Second"},{"id":"a","name":"First"}]"#,
        );
        let lists = client().parse_fetch_lists(response).unwrap();
        let names: Vec<&str> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Second", "First"]);
    }

    #[test]
    fn parse_create_accepts_200_and_201() {
        let body = r#"{"id":"x","name":"Work"}"#;
        assert!(client().parse_create_list(HttpResponse::new(200, body)).is_ok());
        assert!(client().parse_create_list(HttpResponse::new(201, body)).is_ok());
    }

    #[test]
    fn parse_fetch_tasks_server_error() {
        let err = client()
            .parse_fetch_tasks(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpStatus {
                status: 500,
                body: "internal error".to_string()
            }
        );
    }

    #[test]
    fn parse_get_task_not_found() {
        let err = client().parse_get_task(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_ignores_the_body() {
        let response = HttpResponse::new(200, r#"{"message":"List deleted successfully"}"#);
        assert!(client().parse_delete_list(response).is_ok());
        assert!(client().parse_delete_task(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn non_2xx_fails_regardless_of_body() {
        let response = HttpResponse::new(400, r#"[{"id":"a","name":"Looks valid"}]"#);
        let err = client().parse_fetch_lists(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 400, .. }));
    }

    #[test]
    fn parse_fetch_lists_bad_json() {
        let err = client()
            .parse_fetch_lists(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TaskClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.build_fetch_lists().url, "http://127.0.0.1:8000/lists");
    }
}
