//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives both the bare
//! `TaskClient` and a full `Session` over real HTTP using ureq. This is where
//! schema drift between the client DTOs and the server would show up.

use tasklist_core::view::{LISTS_CONTAINER_ID, TASKS_CONTAINER_ID, TASKS_HEADING_ID};
use tasklist_core::{
    dispatch, ApiError, ClientConfig, CreateList, CreateTask, Document, HttpMethod, HttpRequest,
    HttpResponse, Intent, Priority, Session, Status, TaskClient, Transport, UiEvent,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Status codes are returned as data; only transport failures are errors.
fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse::new(status, body))
}

struct Ureq;

impl Transport for Ureq {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        execute(request)
    }
}

/// Start the mock server on its own thread and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn client_lifecycle() {
    let client = TaskClient::new(&start_server());

    // Step 1: no lists yet.
    let lists = client
        .parse_fetch_lists(execute(client.build_fetch_lists()).unwrap())
        .unwrap();
    assert!(lists.is_empty(), "expected no lists");

    // Step 2: create a list.
    let req = client
        .build_create_list(&CreateList {
            name: "Groceries".to_string(),
        })
        .unwrap();
    let groceries = client.parse_create_list(execute(req).unwrap()).unwrap();
    assert_eq!(groceries.name, "Groceries");

    // Step 3: create a task in it.
    let req = client
        .build_create_task(
            &groceries.id,
            &CreateTask {
                name: "Milk".to_string(),
            },
        )
        .unwrap();
    let milk = client.parse_create_task(execute(req).unwrap()).unwrap();
    assert_eq!(milk.list_id.as_ref(), Some(&groceries.id));
    assert_eq!(milk.status, Status::Todo);

    // Step 4: single-field updates.
    let req = client.build_set_task_status(&groceries.id, &milk.id, Status::Done);
    let updated = client.parse_update_task(execute(req).unwrap()).unwrap();
    assert!(updated.is_done());

    let req = client.build_set_task_priority(&groceries.id, &milk.id, Priority::High);
    let updated = client.parse_update_task(execute(req).unwrap()).unwrap();
    assert_eq!(updated.priority, Priority::High);

    let req = client.build_rename_task(&groceries.id, &milk.id, "Oat milk & honey");
    let updated = client.parse_update_task(execute(req).unwrap()).unwrap();
    assert_eq!(updated.name, "Oat milk & honey");

    let req = client.build_set_task_description(&groceries.id, &milk.id, "2 litres");
    let updated = client.parse_update_task(execute(req).unwrap()).unwrap();
    assert_eq!(updated.description, "2 litres");

    // Step 5: read it back.
    let req = client.build_get_task(&groceries.id, &milk.id);
    let fetched = client.parse_get_task(execute(req).unwrap()).unwrap();
    assert_eq!(fetched, updated);

    // Step 6: delete the task, then again.
    let req = client.build_delete_task(&groceries.id, &milk.id);
    client.parse_delete_task(execute(req).unwrap()).unwrap();
    let req = client.build_delete_task(&groceries.id, &milk.id);
    let err = client.parse_delete_task(execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 7: delete the list; nothing left.
    let req = client.build_delete_list(&groceries.id);
    client.parse_delete_list(execute(req).unwrap()).unwrap();
    let lists = client
        .parse_fetch_lists(execute(client.build_fetch_lists()).unwrap())
        .unwrap();
    assert!(lists.is_empty(), "expected no lists after delete");
}

#[tokio::test]
async fn session_drives_the_views_end_to_end() {
    let config = ClientConfig::default().with_base_url(start_server());
    let session = Session::new(&config, Ureq, Document::new());
    let doc = session.surface();

    session.load_lists().await.unwrap();
    session
        .handle(Intent::CreateList {
            name: "Groceries".to_string(),
        })
        .await
        .unwrap();

    let container = doc.get_element_by_id(LISTS_CONTAINER_ID).unwrap();
    let link = container.find_all_by_tag("a")[0].clone();
    assert_eq!(link.text_content(), "Groceries");

    // open the list through the rendered link
    let event = UiEvent::from_attrs(link.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))).unwrap();
    session.handle(dispatch(&event).unwrap()).await.unwrap();
    assert_eq!(
        doc.get_element_by_id(TASKS_HEADING_ID).unwrap().text_content(),
        "Groceries"
    );
    assert!(!doc.contains_id(LISTS_CONTAINER_ID));

    // add a task through the rendered form
    let form = doc
        .get_element_by_id(TASKS_CONTAINER_ID)
        .unwrap()
        .find_all_by_tag("form")[0]
        .clone();
    let event = UiEvent::from_attrs(form.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .unwrap()
        .with_value("Milk");
    session.handle(dispatch(&event).unwrap()).await.unwrap();

    let container = doc.get_element_by_id(TASKS_CONTAINER_ID).unwrap();
    let checkbox = container.find_all_by_tag("input")[0].clone();
    assert_eq!(checkbox.get_attr("type"), Some("checkbox"));
    assert!(!checkbox.has_attr("checked"));

    // toggle it done through the rendered checkbox
    let event =
        UiEvent::from_attrs(checkbox.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))).unwrap();
    session.handle(dispatch(&event).unwrap()).await.unwrap();

    let container = doc.get_element_by_id(TASKS_CONTAINER_ID).unwrap();
    let checkbox = container.find_all_by_tag("input")[0].clone();
    assert!(checkbox.has_attr("checked"));

    // delete it through the rendered button
    let button = container.find_all_by_tag("button")[0].clone();
    let event = UiEvent::from_attrs(button.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))).unwrap();
    session.handle(dispatch(&event).unwrap()).await.unwrap();
    let container = doc.get_element_by_id(TASKS_CONTAINER_ID).unwrap();
    assert!(container.find_all_by_tag("li").is_empty());
}

#[tokio::test]
async fn unreachable_server_is_an_operation_failure() {
    // Bind and drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ClientConfig::default().with_base_url(format!("http://{addr}"));
    let session = Session::new(&config, Ureq, Document::new());

    let err = session.load_lists().await.unwrap_err();
    assert!(matches!(err.source, ApiError::Transport(_)));
    assert_eq!(session.surface().applied(), 0);
}
