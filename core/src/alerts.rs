//! Pending notices and confirmations, shown one at a time in arrival order.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::{IdSequence, TemplateId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AlertId(pub u64);

/// A transition that only runs once the user accepts it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    StartFromTemplate(TemplateId),
    FinishWorkout,
    CancelWorkout,
    DeleteTemplate(TemplateId),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AlertKind {
    Notice,
    Confirm {
        action: PendingAction,
        destructive: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: AlertId,
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn action(&self) -> Option<PendingAction> {
        match self.kind {
            AlertKind::Confirm { action, .. } => Some(action),
            AlertKind::Notice => None,
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(
            self.kind,
            AlertKind::Confirm {
                destructive: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    queue: VecDeque<Alert>,
}

impl AlertQueue {
    pub fn notify(
        &mut self,
        ids: &mut IdSequence,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> AlertId {
        self.push(ids.alert_id(), title.into(), message.into(), AlertKind::Notice)
    }

    /// Queues a confirmation unless the same action is already waiting.
    pub fn confirm(
        &mut self,
        ids: &mut IdSequence,
        action: PendingAction,
        title: impl Into<String>,
        message: impl Into<String>,
        destructive: bool,
    ) -> AlertId {
        if let Some(existing) = self.queue.iter().find(|a| a.action() == Some(action)) {
            return existing.id;
        }
        self.push(
            ids.alert_id(),
            title.into(),
            message.into(),
            AlertKind::Confirm {
                action,
                destructive,
            },
        )
    }

    fn push(&mut self, id: AlertId, title: String, message: String, kind: AlertKind) -> AlertId {
        self.queue.push_back(Alert {
            id,
            title,
            message,
            kind,
        });
        id
    }

    pub fn front(&self) -> Option<&Alert> {
        self.queue.front()
    }

    pub fn pop(&mut self) -> Option<Alert> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
