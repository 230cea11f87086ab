// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mediation between the live drawing surface and the bookmark store.
//!
//! Documents are copied into the surface, never shared with the store.
//! Edits only flow back on a persistence tick, and a tick while the
//! timeline is playing discards them: the moment being annotated is moving,
//! so there is no stable target to write to.

use super::store::BookmarkStore;
use super::surface::DrawingSurface;
use crate::models::bookmark::{Bookmark, BookmarkId};
use crate::models::drawing::{Drawing, Point, DEFAULT_COLOR};
use crate::models::settings::Settings;
use crate::models::source::SourceId;
use crate::timeline::state::TimelineState;

/// What a persistence tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Written,
    /// No surface is mounted.
    NoSurface,
    NoBookmark,
    /// Timeline is playing; the edit was dropped.
    Playing,
    /// The live bookmark does not belong to the active source.
    InactiveSource,
    /// The store refused the write (bookmark gone or re-keyed).
    Rejected,
}

/// The bookmark currently mounted into the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveBookmark {
    pub id: BookmarkId,
    pub source: SourceId,
}

#[derive(Debug)]
pub struct AnnotationEngine {
    surface: Option<DrawingSurface>,
    live: Option<LiveBookmark>,
    scale: f64,
}

impl Default for AnnotationEngine {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}

impl AnnotationEngine {
    /// Engine with no surface. An unusable `scale` falls back to 1.
    pub fn new(scale: f64) -> Self {
        let scale = if is_valid_scale(scale) {
            scale
        } else {
            log::warn!("Ignoring invalid surface scale {scale}, using 1");
            1.0
        };
        Self {
            surface: None,
            live: None,
            scale,
        }
    }

    pub fn surface(&self) -> Option<&DrawingSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut DrawingSurface> {
        self.surface.as_mut()
    }

    pub fn live_bookmark(&self) -> Option<&LiveBookmark> {
        self.live.as_ref()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Attach a surface: camera at the current scale, red strokes, and the
    /// live bookmark loaded if there is one.
    pub fn mount(&mut self, mut surface: DrawingSurface, store: &BookmarkStore) {
        surface.set_camera(Point::ORIGIN, self.scale);
        surface.set_color(DEFAULT_COLOR);
        self.surface = Some(surface);

        let live = self.live.as_ref().and_then(|live| store.get(&live.id)).cloned();
        match live {
            Some(bookmark) => {
                self.load_document(&bookmark);
            }
            None => self.live = None,
        }
    }

    pub fn unmount(&mut self) -> Option<DrawingSurface> {
        self.surface.take()
    }

    /// Make `bookmark` the live bookmark and load its document.
    pub fn select(&mut self, bookmark: &Bookmark) {
        self.live = Some(LiveBookmark {
            id: bookmark.id,
            source: bookmark.source_id.clone(),
        });
        self.load_document(bookmark);
    }

    /// Drop the live bookmark and blank the surface.
    pub fn deselect(&mut self) {
        self.live = None;
        if let Some(surface) = self.surface.as_mut() {
            surface.load_document(Drawing::blank());
        }
    }

    /// Mount a copy of the bookmark's document into the surface.
    ///
    /// The surface never receives the stored document itself, so abandoned
    /// edits cannot leak into the store. Empty documents reset the surface
    /// to blank. Returns false when no surface is mounted.
    pub fn load_document(&mut self, bookmark: &Bookmark) -> bool {
        let scale = self.scale;
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        if bookmark.drawing.is_empty() {
            surface.load_document(Drawing::blank());
        } else {
            surface.load_document(bookmark.drawing.detached_copy());
        }
        surface.select_none();
        surface.set_camera(Point::ORIGIN, scale);
        true
    }

    /// Container scale changed: reset the camera to `(origin, scale)`.
    pub fn set_scale(&mut self, scale: f64) {
        if !is_valid_scale(scale) {
            log::warn!("Ignoring invalid surface scale {scale}");
            return;
        }
        self.scale = scale;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_camera(Point::ORIGIN, scale);
        }
    }

    /// Persistence tick, run after every edit/settle of the surface.
    pub fn persist(&self, state: &TimelineState, store: &mut BookmarkStore) -> PersistOutcome {
        let Some(surface) = self.surface.as_ref() else {
            return PersistOutcome::NoSurface;
        };
        let Some(live) = self.live.as_ref() else {
            return PersistOutcome::NoBookmark;
        };
        if state.playing {
            log::debug!("Discarding edit on bookmark {} while playing", live.id);
            return PersistOutcome::Playing;
        }
        if !state.is_active(&live.source) {
            return PersistOutcome::InactiveSource;
        }

        match store.set_bookmark_drawing(&live.source, &live.id, surface.document().detached_copy()) {
            Ok(()) => PersistOutcome::Written,
            Err(e) => {
                log::warn!("Failed to persist drawing: {e}");
                PersistOutcome::Rejected
            }
        }
    }

    /// React to a play state change. With `clear_drawings_on_play`, starting
    /// playback wipes the surface but keeps the tool the reviewer had. The
    /// wipe is local: persistence is gated off while playing.
    pub fn on_playing_changed(&mut self, playing: bool, settings: &Settings) -> bool {
        if !(playing && settings.clear_drawings_on_play) {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        let tool = surface.active_tool();
        surface.delete_all();
        surface.select_tool(tool);
        surface.toggle_tool_lock();
        log::debug!("Cleared drawing surface on play");
        true
    }

    /// The live bookmark must belong to the active source; unmount it when
    /// the active source moves elsewhere.
    pub fn on_active_source_changed(&mut self, current: Option<&SourceId>) {
        let stale = self
            .live
            .as_ref()
            .is_some_and(|live| Some(&live.source) != current);
        if stale {
            log::debug!("Active source changed, unmounting live bookmark");
            self.deselect();
        }
    }

    /// The bookmark was deleted from the store.
    pub fn on_bookmark_removed(&mut self, id: &BookmarkId) {
        if self.live.as_ref().is_some_and(|live| &live.id == id) {
            self.deselect();
        }
    }
}
