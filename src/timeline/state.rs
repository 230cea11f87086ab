// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline state and change notifications.

use crate::models::source::SourceId;

/// The master clock and the active source selection.
///
/// Only [`TimelineController`](super::controller::TimelineController) writes
/// this; everything else reads it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineState {
    /// Master-clock position in seconds.
    pub current_time: f64,
    pub playing: bool,
    /// Enlarged source, or `None` when every source is a thumbnail.
    /// A lookup key only; the controller never keeps it pointing at a
    /// source that is no longer registered.
    pub active_source_id: Option<SourceId>,
}

impl TimelineState {
    pub fn is_active(&self, id: &SourceId) -> bool {
        self.active_source_id.as_ref() == Some(id)
    }
}

/// Change notification broadcast to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    SourceAdded(SourceId),
    SourceRemoved(SourceId),
    ActiveSourceChanged {
        previous: Option<SourceId>,
        current: Option<SourceId>,
    },
    CurrentTimeChanged(f64),
    PlayingChanged(bool),
}
