//! Pure view rendering.
//!
//! # Design
//! `Renderer::render` turns a [`ViewState`] into a [`RenderedView`]: a
//! heading plus a container, built as a plain [`Node`] tree. Nothing here
//! touches a document. A [`Surface`](crate::Surface) applies the result by
//! removing every node listed in [`VIEW_ROOT_IDS`] and appending the new
//! pair, which is what keeps the list view and the task view mutually
//! exclusive.
//!
//! Interactive elements carry a `data-action` attribute plus the entity ids
//! the action needs, so a single delegated handler can map events back to
//! intents (see [`crate::intent`]).

use tracing::warn;

use crate::intent::Action;
use crate::types::{EntityId, Task, TaskList};

pub const LISTS_HEADING_ID: &str = "tasklist-heading";
pub const LISTS_CONTAINER_ID: &str = "list-container";
pub const TASKS_HEADING_ID: &str = "task-heading";
pub const TASKS_CONTAINER_ID: &str = "task-container";
pub const LIST_NAME_INPUT_ID: &str = "list_name";
pub const TASK_NAME_INPUT_ID: &str = "task_name";

/// Ids of every node a view owns. Applying any view removes all of them.
pub const VIEW_ROOT_IDS: [&str; 4] = [
    LISTS_CONTAINER_ID,
    TASKS_CONTAINER_ID,
    LISTS_HEADING_ID,
    TASKS_HEADING_ID,
];

pub const DEFAULT_LISTS_TITLE: &str = "Your Todo Lists";

/// A node of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Concatenated text of all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// This element and every element below it, depth first.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in self.child_elements() {
            out.extend(child.descendants());
        }
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.descendants().into_iter().find(|el| el.id() == Some(id))
    }

    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.tag == tag)
            .collect()
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// What to show: one collection, fresh from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Lists(Vec<TaskList>),
    Tasks {
        list_id: EntityId,
        list_name: String,
        tasks: Vec<Task>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Lists,
    Tasks,
}

impl ViewState {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewState::Lists(_) => ViewKind::Lists,
            ViewState::Tasks { .. } => ViewKind::Tasks,
        }
    }
}

/// The output of one render: ready to be applied to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub kind: ViewKind,
    pub heading: Element,
    pub container: Element,
    /// Entities left out because their name was empty.
    pub skipped: usize,
}

impl RenderedView {
    /// Heading first, then container, as they are appended to the body.
    pub fn roots(&self) -> [&Element; 2] {
        [&self.heading, &self.container]
    }
}

/// Builds view trees. Holds only the fixed list-view title.
#[derive(Debug, Clone)]
pub struct Renderer {
    lists_title: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_LISTS_TITLE)
    }
}

impl Renderer {
    pub fn new(lists_title: impl Into<String>) -> Self {
        Self {
            lists_title: lists_title.into(),
        }
    }

    pub fn render(&self, state: &ViewState) -> RenderedView {
        match state {
            ViewState::Lists(lists) => self.render_lists(lists),
            ViewState::Tasks {
                list_id,
                list_name,
                tasks,
            } => self.render_tasks(tasks, list_name, list_id),
        }
    }

    pub fn render_lists(&self, lists: &[TaskList]) -> RenderedView {
        let heading = heading(LISTS_HEADING_ID, &self.lists_title);

        let mut items = Element::new("ul").attr("class", "list_container");
        let mut skipped = 0;
        for list in lists {
            if list.name.is_empty() {
                warn!(list_id = %list.id, "list name is empty, not rendering it");
                skipped += 1;
                continue;
            }
            items = items.child(list_row(list));
        }

        // The form is the last child of the list itself.
        let items = items.child(creation_form(
            Element::new("form").attr("data-action", Action::CreateList.as_str()),
            LIST_NAME_INPUT_ID,
            "List Name",
        ));

        let container = Element::new("div")
            .attr("id", LISTS_CONTAINER_ID)
            .attr("class", "lists_div")
            .child(items);

        RenderedView {
            kind: ViewKind::Lists,
            heading,
            container,
            skipped,
        }
    }

    pub fn render_tasks(&self, tasks: &[Task], list_name: &str, list_id: &EntityId) -> RenderedView {
        let heading = heading(TASKS_HEADING_ID, list_name);

        let mut items = Element::new("ul").attr("class", "task_container");
        let mut skipped = 0;
        for task in tasks {
            if task.name.is_empty() {
                warn!(task_id = %task.id, %list_id, "task name is empty, not rendering it");
                skipped += 1;
                continue;
            }
            let owner = task.list_id.as_ref().unwrap_or(list_id);
            items = items.child(task_row(task, owner, list_name));
        }

        let items = items.child(creation_form(
            Element::new("form")
                .attr("data-action", Action::CreateTask.as_str())
                .attr("data-list-id", list_id.as_str())
                .attr("data-list-name", list_name),
            TASK_NAME_INPUT_ID,
            "Task Name",
        ));

        let container = Element::new("div")
            .attr("id", TASKS_CONTAINER_ID)
            .attr("class", "tasks_div")
            .child(items);

        RenderedView {
            kind: ViewKind::Tasks,
            heading,
            container,
            skipped,
        }
    }
}

fn heading(id: &str, text: &str) -> Element {
    Element::new("h1")
        .attr("id", id)
        .attr("class", "title")
        .text(text)
}

fn list_row(list: &TaskList) -> Element {
    let link = Element::new("a")
        .attr("href", "#")
        .attr("data-action", Action::OpenList.as_str())
        .attr("data-list-id", list.id.as_str())
        .attr("data-list-name", list.name.as_str())
        .text(list.name.as_str());

    let delete = delete_button(Action::DeleteList).attr("data-list-id", list.id.as_str());

    Element::new("li").child(link).child(delete)
}

fn task_row(task: &Task, list_id: &EntityId, list_name: &str) -> Element {
    let checkbox_id = format!("task-{}", task.id);

    let mut checkbox = Element::new("input")
        .attr("type", "checkbox")
        .attr("id", checkbox_id.as_str())
        .attr("name", task.name.as_str());
    if task.is_done() {
        checkbox = checkbox.attr("checked", "");
    }
    let checkbox = with_task_data(
        checkbox.attr("data-action", Action::ToggleTask.as_str()),
        task,
        list_id,
        list_name,
    )
    .attr("data-done", task.is_done().to_string());

    let label = Element::new("label")
        .attr("for", checkbox_id)
        .text(task.name.as_str());

    let delete = with_task_data(delete_button(Action::DeleteTask), task, list_id, list_name);

    Element::new("li").child(checkbox).child(label).child(delete)
}

fn with_task_data(element: Element, task: &Task, list_id: &EntityId, list_name: &str) -> Element {
    element
        .attr("data-list-id", list_id.as_str())
        .attr("data-list-name", list_name)
        .attr("data-task-id", task.id.as_str())
}

fn delete_button(action: Action) -> Element {
    Element::new("button")
        .attr("type", "button")
        .attr("class", "delete-button")
        .attr("data-action", action.as_str())
        .text("X")
}

fn creation_form(form: Element, input_id: &str, placeholder: &str) -> Element {
    form.child(
        Element::new("input")
            .attr("type", "text")
            .attr("placeholder", placeholder)
            .attr("name", input_id)
            .attr("id", input_id),
    )
}
