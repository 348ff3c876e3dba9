//! Canal de notificaciones (toasts)
//!
//! Cola FIFO compartida por todas las vistas. El cliente la vacía con
//! `drain` después de cada acción.

use std::collections::VecDeque;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NotificationVariant::Destructive,
        }
    }
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    queue: VecDeque<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.queue.push_back(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_is_fifo_and_empties_queue() {
        let mut center = NotificationCenter::new();
        center.push(Notification::success("Primeiro", ""));
        center.push(Notification::destructive("Segundo", ""));

        let drained = center.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].title, "Primeiro");
        assert_eq!(drained[1].variant, NotificationVariant::Destructive);
        assert!(center.is_empty());
    }
}
