// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The single writer of timeline state.
//!
//! Each transition updates [`TimelineState`] first, then fans the change out
//! to every [`VideoAdapter`] in the same call, then notifies subscribers.
//! Nothing here is asynchronous: when a setter returns, every ready handle
//! already reflects the new state.

use super::adapter::{AdapterStatus, MediaHandle, VideoAdapter};
use super::state::{TimelineEvent, TimelineState};
use crate::error::{EngineError, Result};
use crate::models::source::{Source, SourceId};
use std::sync::mpsc::{channel, Receiver, Sender};

#[derive(Debug, Default)]
pub struct TimelineController {
    state: TimelineState,
    /// Registration order is display order.
    adapters: Vec<VideoAdapter>,
    subscribers: Vec<Sender<TimelineEvent>>,
}

impl TimelineController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    /// Receive every change notification from now on.
    pub fn subscribe(&mut self) -> Receiver<TimelineEvent> {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        receiver
    }

    fn publish(&mut self, event: TimelineEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.adapters.iter().map(VideoAdapter::source)
    }

    pub fn source(&self, id: &SourceId) -> Option<&Source> {
        self.adapter(id).map(VideoAdapter::source)
    }

    pub fn adapters(&self) -> &[VideoAdapter] {
        &self.adapters
    }

    pub fn adapter(&self, id: &SourceId) -> Option<&VideoAdapter> {
        self.adapters.iter().find(|a| a.source().id() == id)
    }

    fn adapter_mut(&mut self, id: &SourceId) -> Option<&mut VideoAdapter> {
        self.adapters.iter_mut().find(|a| a.source().id() == id)
    }

    /// The active source, resolved through the registry.
    pub fn active_source(&self) -> Option<&Source> {
        self.state
            .active_source_id
            .as_ref()
            .and_then(|id| self.source(id))
    }

    /// Add a source and bring its adapter in line with the current state:
    /// thumbnail slot, muted, play state and position.
    pub fn register_source(
        &mut self,
        source: Source,
        handle: Option<Box<dyn MediaHandle>>,
    ) -> Result<()> {
        if self.adapter(source.id()).is_some() {
            return Err(EngineError::DuplicateSource(source.id().clone()));
        }

        let id = source.id().clone();
        let mut adapter = VideoAdapter::new(source, handle);
        adapter.resync(&self.state);
        self.adapters.push(adapter);

        log::info!("Registered source {id}, total: {}", self.adapters.len());
        self.publish(TimelineEvent::SourceAdded(id));
        Ok(())
    }

    /// Drop a source. An active reference to it resolves to no active source.
    pub fn remove_source(&mut self, id: &SourceId) -> Option<Source> {
        let index = self.adapters.iter().position(|a| a.source().id() == id)?;
        let adapter = self.adapters.remove(index);

        if self.state.is_active(id) {
            self.state.active_source_id = None;
            self.publish(TimelineEvent::ActiveSourceChanged {
                previous: Some(id.clone()),
                current: None,
            });
        }

        log::info!("Removed source {id}, total: {}", self.adapters.len());
        self.publish(TimelineEvent::SourceRemoved(id.clone()));
        Some(adapter.source().clone())
    }

    /// Enlarge `id`, or return every source to a thumbnail with `None`.
    ///
    /// Leaves the master clock and the play state untouched. An id that is
    /// not registered resolves to `None`.
    pub fn set_active_source(&mut self, id: Option<SourceId>) {
        let id = match id {
            Some(id) if self.adapter(&id).is_none() => {
                log::warn!("Ignoring unknown active source {id}");
                None
            }
            other => other,
        };
        if self.state.active_source_id == id {
            return;
        }

        let previous = std::mem::replace(&mut self.state.active_source_id, id.clone());

        // The previous source goes back to its thumbnail before the new
        // one claims the viewport.
        if let Some(previous_id) = &previous {
            let state = self.state.clone();
            if let Some(adapter) = self.adapter_mut(previous_id) {
                adapter.apply_mount(&state);
            }
        }
        if let Some(current_id) = &id {
            let state = self.state.clone();
            if let Some(adapter) = self.adapter_mut(current_id) {
                adapter.apply_mount(&state);
            }
        }

        log::info!("Active source: {previous:?} -> {id:?}");
        self.publish(TimelineEvent::ActiveSourceChanged {
            previous,
            current: id,
        });
    }

    /// Move the master clock. Not clamped to any source's coverage.
    /// While paused every adapter seeks to `t + offset`.
    pub fn set_current_time(&mut self, t: f64) {
        if !t.is_finite() {
            log::warn!("Ignoring non-finite master time {t}");
            return;
        }
        if self.state.current_time == t {
            return;
        }

        self.state.current_time = t;
        let state = &self.state;
        for adapter in &mut self.adapters {
            adapter.apply_time(state);
        }

        self.publish(TimelineEvent::CurrentTimeChanged(t));
    }

    /// Start or stop every source in the same call.
    ///
    /// On pause every adapter is also re-seeked to the master clock, since
    /// native clocks may have run slightly apart while free-running.
    pub fn set_playing(&mut self, playing: bool) {
        if self.state.playing == playing {
            return;
        }

        self.state.playing = playing;
        let state = &self.state;
        let deferred = self
            .adapters
            .iter_mut()
            .map(|adapter| adapter.apply_playing(state))
            .filter(|status| *status == AdapterStatus::Deferred)
            .count();
        if !playing {
            for adapter in &mut self.adapters {
                adapter.apply_time(state);
            }
        }

        log::info!(
            "{} at {:.3}s ({} source(s) deferred)",
            if playing { "Playing" } else { "Paused" },
            self.state.current_time,
            deferred
        );
        self.publish(TimelineEvent::PlayingChanged(playing));
    }

    pub fn toggle_playing(&mut self) {
        self.set_playing(!self.state.playing);
    }

    /// The native media for `id` reported ready; apply the current state.
    pub fn handle_media_ready(&mut self, id: &SourceId) -> Result<AdapterStatus> {
        let state = self.state.clone();
        let adapter = self
            .adapter_mut(id)
            .ok_or_else(|| EngineError::UnknownSource(id.clone()))?;
        Ok(adapter.resync(&state))
    }

    /// Swap in a (new) native handle for `id` and bring it in line.
    pub fn attach_handle(
        &mut self,
        id: &SourceId,
        handle: Option<Box<dyn MediaHandle>>,
    ) -> Result<AdapterStatus> {
        let state = self.state.clone();
        let adapter = self
            .adapter_mut(id)
            .ok_or_else(|| EngineError::UnknownSource(id.clone()))?;
        adapter.set_handle(handle);
        Ok(adapter.resync(&state))
    }

    /// The rendering collaborator gained or lost the thumbnail slot for `id`.
    pub fn set_mount_available(&mut self, id: &SourceId, available: bool) -> Result<AdapterStatus> {
        let state = self.state.clone();
        let adapter = self
            .adapter_mut(id)
            .ok_or_else(|| EngineError::UnknownSource(id.clone()))?;
        adapter.set_mount_available(available);
        Ok(adapter.apply_mount(&state))
    }

    /// Source whose native clock feeds the master clock: the active source,
    /// else the first source covering the current time, else the first.
    pub fn clock_driver(&self) -> Option<&SourceId> {
        if let Some(active) = self.active_source() {
            return Some(active.id());
        }
        self.sources()
            .find(|source| source.contains(self.state.current_time))
            .or_else(|| self.sources().next())
            .map(Source::id)
    }

    /// Native time update from a playing source. Only the clock driver may
    /// move the master clock; other reports are ignored.
    pub fn report_native_time(&mut self, id: &SourceId, native_position: f64) -> bool {
        if self.clock_driver() != Some(id) {
            return false;
        }
        let Some(master) = self.source(id).map(|s| s.master_time(native_position)) else {
            return false;
        };

        self.set_current_time(master);
        true
    }

    /// Pause everything ahead of teardown.
    pub fn shutdown(&mut self) {
        self.set_playing(false);
        self.subscribers.clear();
    }
}
