// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-source adapter between the master clock and a native media handle.
//!
//! Every adapter follows the play/pause state of the timeline regardless of
//! whether its source is active or even in range. Sources therefore advance
//! together while playing and swapping the active source needs no seek.
//! Positions are only pushed to the native handle while paused.

use crate::models::source::{RangePosition, Source};
use crate::timeline::state::TimelineState;

/// Volume of the active source.
pub const ACTIVE_VOLUME: f32 = 1.0;

/// Viewport slot a native surface can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Small thumbnail in the source list.
    Thumbnail,
    /// The large active viewport.
    Viewport,
}

/// A native playable media handle owned by the media collaborator.
pub trait MediaHandle {
    /// Whether the handle can accept commands yet.
    fn is_ready(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    /// Native position in the source's own seconds.
    fn position(&self) -> f64;
    fn set_position(&mut self, seconds: f64);
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    /// Re-parent the rendering surface into `slot`.
    fn attach(&mut self, slot: Slot);
}

/// Outcome of pushing timeline state into one adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterStatus {
    Applied,
    /// The handle or mount target is not available; retried on the next
    /// state change or when the media reports ready.
    Deferred,
    /// Nothing to do in the current state.
    Skipped,
}

pub struct VideoAdapter {
    source: Source,
    handle: Option<Box<dyn MediaHandle>>,
    mount_available: bool,
    mounted: Option<Slot>,
}

impl std::fmt::Debug for VideoAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoAdapter")
            .field("source", &self.source)
            .field("has_handle", &self.handle.is_some())
            .field("mount_available", &self.mount_available)
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl VideoAdapter {
    pub fn new(source: Source, handle: Option<Box<dyn MediaHandle>>) -> Self {
        Self {
            source,
            handle,
            mount_available: true,
            mounted: None,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn handle(&self) -> Option<&dyn MediaHandle> {
        self.handle.as_deref()
    }

    /// Slot the surface was last attached to.
    pub fn mounted(&self) -> Option<Slot> {
        self.mounted
    }

    pub fn is_active(&self, state: &TimelineState) -> bool {
        state.is_active(self.source.id())
    }

    pub fn range_position(&self, state: &TimelineState) -> RangePosition {
        self.source.range_position(state.current_time)
    }

    /// Native position this source should show at the current master time.
    pub fn target_position(&self, state: &TimelineState) -> f64 {
        self.source.local_time(state.current_time)
    }

    /// Replace the native handle, e.g. once the media collaborator has
    /// finished opening the file.
    pub fn set_handle(&mut self, handle: Option<Box<dyn MediaHandle>>) {
        self.handle = handle;
        self.mounted = None;
    }

    /// Whether the rendering collaborator currently has a slot for this
    /// source. Unavailable mount targets make [`Self::apply_mount`] defer.
    pub fn set_mount_available(&mut self, available: bool) {
        self.mount_available = available;
    }

    fn ready_handle(&mut self) -> Option<&mut (dyn MediaHandle + 'static)> {
        self.handle.as_deref_mut().filter(|handle| handle.is_ready())
    }

    /// Attach the surface to the slot matching its active state.
    ///
    /// Inactive sources go back to their thumbnail with audio muted; the
    /// active source moves to the viewport at full volume.
    pub fn apply_mount(&mut self, state: &TimelineState) -> AdapterStatus {
        let active = self.is_active(state);
        let id = self.source.id().clone();
        if !self.mount_available {
            log::debug!("{id}: no mount target, deferring");
            return AdapterStatus::Deferred;
        }
        let Some(handle) = self.ready_handle() else {
            log::debug!("{id}: media not ready, deferring mount");
            return AdapterStatus::Deferred;
        };

        let slot = if active {
            handle.attach(Slot::Viewport);
            handle.set_volume(ACTIVE_VOLUME);
            Slot::Viewport
        } else {
            handle.attach(Slot::Thumbnail);
            handle.set_volume(0.0);
            Slot::Thumbnail
        };
        self.mounted = Some(slot);
        AdapterStatus::Applied
    }

    /// Start or stop native playback to match `state.playing`.
    pub fn apply_playing(&mut self, state: &TimelineState) -> AdapterStatus {
        let id = self.source.id().clone();
        let Some(handle) = self.ready_handle() else {
            log::debug!("{id}: media not ready, deferring play state");
            return AdapterStatus::Deferred;
        };

        if state.playing {
            handle.play();
        } else {
            handle.pause();
        }
        AdapterStatus::Applied
    }

    /// Seek the native handle to `current_time + offset`. Skipped while
    /// playing so the native clock is never fought.
    pub fn apply_time(&mut self, state: &TimelineState) -> AdapterStatus {
        if state.playing {
            return AdapterStatus::Skipped;
        }

        let target = self.target_position(state);
        let id = self.source.id().clone();
        let Some(handle) = self.ready_handle() else {
            log::debug!("{id}: media not ready, deferring seek");
            return AdapterStatus::Deferred;
        };

        handle.set_position(target);
        AdapterStatus::Applied
    }

    /// Re-apply everything, used when the media reports ready.
    pub fn resync(&mut self, state: &TimelineState) -> AdapterStatus {
        let statuses = [
            self.apply_mount(state),
            self.apply_playing(state),
            self.apply_time(state),
        ];
        if statuses.contains(&AdapterStatus::Deferred) {
            AdapterStatus::Deferred
        } else {
            AdapterStatus::Applied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::HeadlessMedia;
    use crate::models::source::SourceId;

    fn adapter(offset: f64, duration: f64, ready: bool) -> VideoAdapter {
        let source = Source::new(SourceId::from("a"), "A", offset, duration).unwrap();
        let media = if ready {
            HeadlessMedia::new()
        } else {
            HeadlessMedia::loading()
        };
        VideoAdapter::new(source, Some(Box::new(media)))
    }

    fn paused_at(time: f64) -> TimelineState {
        TimelineState {
            current_time: time,
            playing: false,
            active_source_id: None,
        }
    }

    #[test]
    fn test_seek_applies_offset_while_paused() {
        let mut a = adapter(3.0, 20.0, true);
        assert_eq!(a.apply_time(&paused_at(4.0)), AdapterStatus::Applied);
        assert_eq!(a.handle().unwrap().position(), 7.0);
    }

    #[test]
    fn test_seek_skipped_while_playing() {
        let mut a = adapter(3.0, 20.0, true);
        let state = TimelineState {
            playing: true,
            ..paused_at(4.0)
        };
        assert_eq!(a.apply_time(&state), AdapterStatus::Skipped);
        assert_eq!(a.handle().unwrap().position(), 0.0);
    }

    #[test]
    fn test_unready_handle_defers_silently() {
        let mut a = adapter(0.0, 10.0, false);
        let state = paused_at(2.0);
        assert_eq!(a.apply_time(&state), AdapterStatus::Deferred);
        assert_eq!(a.apply_mount(&state), AdapterStatus::Deferred);
        assert_eq!(a.mounted(), None);
    }

    #[test]
    fn test_missing_handle_defers_silently() {
        let source = Source::new(SourceId::from("a"), "A", 0.0, 10.0).unwrap();
        let mut a = VideoAdapter::new(source, None);
        assert_eq!(a.apply_playing(&paused_at(0.0)), AdapterStatus::Deferred);
    }

    #[test]
    fn test_missing_mount_target_defers() {
        let mut a = adapter(0.0, 10.0, true);
        a.set_mount_available(false);
        assert_eq!(a.apply_mount(&paused_at(0.0)), AdapterStatus::Deferred);

        a.set_mount_available(true);
        assert_eq!(a.apply_mount(&paused_at(0.0)), AdapterStatus::Applied);
        assert_eq!(a.mounted(), Some(Slot::Thumbnail));
    }

    #[test]
    fn test_inactive_mount_mutes() {
        let mut a = adapter(0.0, 10.0, true);
        let active = TimelineState {
            active_source_id: Some(SourceId::from("a")),
            ..paused_at(0.0)
        };
        a.apply_mount(&active);
        assert_eq!(a.mounted(), Some(Slot::Viewport));
        assert_eq!(a.handle().unwrap().volume(), ACTIVE_VOLUME);

        a.apply_mount(&paused_at(0.0));
        assert_eq!(a.mounted(), Some(Slot::Thumbnail));
        assert_eq!(a.handle().unwrap().volume(), 0.0);
    }

    #[test]
    fn test_plays_even_when_out_of_range() {
        let mut a = adapter(50.0, 60.0, true);
        let state = TimelineState {
            playing: true,
            ..paused_at(0.0)
        };
        assert_eq!(a.range_position(&state), RangePosition::Before);
        assert_eq!(a.apply_playing(&state), AdapterStatus::Applied);
        assert!(!a.handle().unwrap().is_paused());
    }
}
