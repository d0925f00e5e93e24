use serde::Serialize;
use std::collections::VecDeque;

use drill_core::model::SessionStats;

use super::turn::{AnswerResult, Turn};

/// Notifications for the UI layer, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    TurnReady(Turn),
    AnswerResult(AnswerResult),
    SessionComplete(SessionStats),
}

/// FIFO of events not yet taken by the caller.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventQueue {
    pending: VecDeque<SessionEvent>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: SessionEvent) {
        self.pending.push_back(event);
    }

    pub(crate) fn pop(&mut self) -> Option<SessionEvent> {
        self.pending.pop_front()
    }

    pub(crate) fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, SessionEvent> {
        self.pending.drain(..)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
