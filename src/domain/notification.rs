// src/domain/notification.rs
//
// Toast notifications shown to the operator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual intent of a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Error,
    Success,
    /// No intent given; rendered with the neutral style
    #[default]
    Unset,
}

/// A fully populated notification, as held in the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// What callers hand to `NotificationCenter::notify`. Every field may be left
/// out; the id is generated when missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialNotification {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<NotificationKind>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl PartialNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: Some(kind),
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Fills in the blanks: a fresh v4 UUID when no id was given, `Unset`
    /// kind, empty title.
    pub fn complete(self) -> Notification {
        Notification {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            kind: self.kind.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Unset => write!(f, "unset"),
        }
    }
}
