//! Transient, dismissible user notifications.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use utoipa::ToSchema;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded queue of pending notices; the oldest is dropped once full.
#[derive(Debug)]
pub struct NoticeBoard {
    notices: VecDeque<Notice>,
    capacity: usize,
    next_id: u64,
}

impl NoticeBoard {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            notices: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Queues a notice and returns its id.
    pub fn push(
        &mut self,
        level: NoticeLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.notices.len() == self.capacity {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            id,
            level,
            title: title.into(),
            description: description.into(),
            created_at: Utc::now(),
        });
        id
    }

    /// Pending notices, oldest first.
    pub fn list(&self) -> Vec<Notice> {
        self.notices.iter().cloned().collect()
    }

    /// Removes a notice. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        match self.notices.iter().position(|n| n.id == id) {
            Some(idx) => {
                self.notices.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
