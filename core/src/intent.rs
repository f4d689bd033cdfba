//! Event-to-intent mapping.
//!
//! Rendered elements carry `data-action` plus the ids the action needs. A
//! host installs one delegated listener, collects those attributes into a
//! [`UiEvent`] and calls [`dispatch`]. Events that do not resolve to a
//! complete intent are dropped.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::types::EntityId;

/// `data-*` keys (without the prefix) a host must copy into a [`UiEvent`].
pub const DATA_KEYS: [&str; 4] = ["list-id", "list-name", "task-id", "done"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenList,
    DeleteList,
    ToggleTask,
    DeleteTask,
    CreateList,
    CreateTask,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::OpenList => "open-list",
            Action::DeleteList => "delete-list",
            Action::ToggleTask => "toggle-task",
            Action::DeleteTask => "delete-task",
            Action::CreateList => "create-list",
            Action::CreateTask => "create-task",
        }
    }

    /// Form actions fire on submit and read the form's text input.
    pub fn is_submit(self) -> bool {
        matches!(self, Action::CreateList | Action::CreateTask)
    }

    /// Actions whose element has a native default (follow the link, tick
    /// the checkbox, submit the form). Hosts cancel it: the page only
    /// changes when a fetched view is applied.
    pub fn cancels_default(self) -> bool {
        !matches!(self, Action::DeleteList | Action::DeleteTask)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open-list" => Ok(Action::OpenList),
            "delete-list" => Ok(Action::DeleteList),
            "toggle-task" => Ok(Action::ToggleTask),
            "delete-task" => Ok(Action::DeleteTask),
            "create-list" => Ok(Action::CreateList),
            "create-task" => Ok(Action::CreateTask),
            other => Err(format!("unknown action `{other}`")),
        }
    }
}

/// A user interaction as seen by the delegated handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiEvent {
    pub action: String,
    pub data: BTreeMap<String, String>,
    /// Current value of the form's text input, for submit actions.
    pub value: Option<String>,
}

impl UiEvent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Collects `data-action` and the known `data-*` attributes of a
    /// rendered element.
    pub fn from_attrs<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Option<Self> {
        let mut event: Option<UiEvent> = None;
        let mut data = BTreeMap::new();
        for (name, value) in attrs {
            let Some(key) = name.strip_prefix("data-") else {
                continue;
            };
            if key == "action" {
                event = Some(UiEvent::new(value));
            } else if DATA_KEYS.contains(&key) {
                data.insert(key.to_string(), value.to_string());
            }
        }
        event.map(|mut event| {
            event.data = data;
            event
        })
    }

    /// Same as [`from_attrs`](Self::from_attrs), for hosts that can only
    /// look attributes up by name (a live DOM element).
    pub fn from_lookup(mut get: impl FnMut(&str) -> Option<String>) -> Option<Self> {
        let mut event = UiEvent::new(get("data-action")?);
        for key in DATA_KEYS {
            if let Some(value) = get(&format!("data-{key}")) {
                event.data.insert(key.to_string(), value);
            }
        }
        Some(event)
    }

    fn id(&self, key: &str) -> Option<EntityId> {
        self.data.get(key).map(|id| EntityId::from(id.as_str()))
    }

    fn text(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }
}

/// What the user asked for, with every id resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    LoadLists,
    LoadTasks {
        list_id: EntityId,
        list_name: String,
    },
    CreateList {
        name: String,
    },
    CreateTask {
        list_id: EntityId,
        list_name: String,
        name: String,
    },
    DeleteList {
        list_id: EntityId,
    },
    DeleteTask {
        list_id: EntityId,
        list_name: String,
        task_id: EntityId,
    },
    ToggleTask {
        list_id: EntityId,
        list_name: String,
        task_id: EntityId,
        done: bool,
    },
}

impl Intent {
    /// The load that redraws the collection this intent touches. Hosts run
    /// it when the session leaves refreshing to them.
    pub fn reload(&self) -> Intent {
        match self {
            Intent::LoadLists | Intent::CreateList { .. } | Intent::DeleteList { .. } => {
                Intent::LoadLists
            }
            Intent::LoadTasks { list_id, list_name }
            | Intent::CreateTask {
                list_id, list_name, ..
            }
            | Intent::DeleteTask {
                list_id, list_name, ..
            }
            | Intent::ToggleTask {
                list_id, list_name, ..
            } => Intent::LoadTasks {
                list_id: list_id.clone(),
                list_name: list_name.clone(),
            },
        }
    }
}

/// Maps `(action, ids)` to an intent. `None` for unknown actions or missing ids.
pub fn dispatch(event: &UiEvent) -> Option<Intent> {
    let action: Action = event.action.parse().ok()?;
    let intent = match action {
        Action::OpenList => Intent::LoadTasks {
            list_id: event.id("list-id")?,
            list_name: event.text("list-name")?,
        },
        Action::DeleteList => Intent::DeleteList {
            list_id: event.id("list-id")?,
        },
        Action::ToggleTask => Intent::ToggleTask {
            list_id: event.id("list-id")?,
            list_name: event.text("list-name")?,
            task_id: event.id("task-id")?,
            done: event.data.get("done").map(|d| d == "true").unwrap_or(false),
        },
        Action::DeleteTask => Intent::DeleteTask {
            list_id: event.id("list-id")?,
            list_name: event.text("list-name")?,
            task_id: event.id("task-id")?,
        },
        Action::CreateList => Intent::CreateList {
            name: event.value.clone()?,
        },
        Action::CreateTask => Intent::CreateTask {
            list_id: event.id("list-id")?,
            list_name: event.text("list-name")?,
            name: event.value.clone()?,
        },
    };
    Some(intent)
}
