// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Review session state.
//!
//! A [`ReviewSession`] lives from project open to project close. It owns the
//! timeline controller, the bookmark store and the annotation engine, and it
//! is the state API rendering collaborators call into. After every transition
//! it drains the controller's change notifications and routes them to the
//! annotation engine and the view composer, in the order they were emitted.

use crate::annotation::{AnnotationEngine, BookmarkStore, DrawingSurface, PersistOutcome};
use crate::error::{EngineError, Result};
use crate::models::bookmark::{Bookmark, BookmarkId, TimeKey};
use crate::models::drawing::Drawing;
use crate::models::project::ProjectData;
use crate::models::settings::Settings;
use crate::models::source::{Source, SourceDescriptor, SourceId};
use crate::timeline::{AdapterStatus, MediaHandle, TimelineController, TimelineEvent, TimelineState};
use crate::view::{SourceView, ViewComposer};
use std::sync::mpsc::Receiver;

pub struct ReviewSession {
    timeline: TimelineController,
    events: Receiver<TimelineEvent>,
    views: ViewComposer,
    bookmarks: BookmarkStore,
    annotations: AnnotationEngine,
    settings: Settings,
}

impl ReviewSession {
    /// Empty session with a mounted drawing surface.
    pub fn new(settings: Settings) -> Self {
        let mut timeline = TimelineController::new();
        let events = timeline.subscribe();
        let bookmarks = BookmarkStore::new();
        let mut annotations = AnnotationEngine::new(settings.default_scale);
        annotations.mount(DrawingSurface::new(), &bookmarks);

        Self {
            timeline,
            events,
            views: ViewComposer::new(),
            bookmarks,
            annotations,
            settings,
        }
    }

    /// Open a project. `open_media` supplies the native handle for each
    /// source; `None` means the media is not available yet.
    ///
    /// Sources must be valid. A bookmark whose stored drawing cannot be
    /// parsed is kept with a blank document and a warning.
    pub fn from_project<F>(project: ProjectData, settings: Settings, mut open_media: F) -> Result<Self>
    where
        F: FnMut(&SourceDescriptor) -> Option<Box<dyn MediaHandle>>,
    {
        let mut session = Self::new(settings);

        for descriptor in project.sources {
            let handle = open_media(&descriptor);
            session.add_source(descriptor, handle)?;
        }

        for descriptor in project.bookmarks {
            let id = descriptor.id;
            let source_id = descriptor.source_id.clone();
            let time_key = descriptor.time_key;
            let bookmark = match Bookmark::from_descriptor(descriptor) {
                Ok(bookmark) => bookmark,
                Err(e) => {
                    log::warn!("Loading bookmark {id} with a blank drawing: {e}");
                    Bookmark {
                        id,
                        source_id,
                        time_key,
                        drawing: Drawing::blank(),
                    }
                }
            };
            if session.timeline.source(&bookmark.source_id).is_none() {
                log::warn!("Bookmark {id} refers to unknown source {}", bookmark.source_id);
            }
            session.bookmarks.insert(bookmark);
        }

        log::info!(
            "Opened project: {} source(s), {} bookmark(s)",
            session.timeline.adapters().len(),
            session.bookmarks.len()
        );
        Ok(session)
    }

    pub fn to_project(&self) -> ProjectData {
        ProjectData {
            sources: self.timeline.sources().map(Source::to_descriptor).collect(),
            bookmarks: self.bookmarks.iter().map(Bookmark::to_descriptor).collect(),
        }
    }

    pub fn state(&self) -> &TimelineState {
        self.timeline.state()
    }

    pub fn timeline(&self) -> &TimelineController {
        &self.timeline
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn annotations(&self) -> &AnnotationEngine {
        &self.annotations
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. A changed default scale is applied to the
    /// surface straight away.
    pub fn set_settings(&mut self, settings: Settings) {
        if settings.default_scale != self.settings.default_scale {
            self.annotations.set_scale(settings.default_scale);
        }
        self.settings = settings;
    }

    /// Per-source visibility as of the last transition.
    pub fn views(&self) -> &[SourceView] {
        self.views.views()
    }

    pub fn view_composer(&self) -> &ViewComposer {
        &self.views
    }

    /// Subscribe to timeline change notifications.
    pub fn subscribe(&mut self) -> Receiver<TimelineEvent> {
        self.timeline.subscribe()
    }

    /// Route pending notifications, then recompute the views.
    fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                TimelineEvent::ActiveSourceChanged { current, .. } => {
                    self.annotations.on_active_source_changed(current.as_ref());
                }
                TimelineEvent::PlayingChanged(playing) => {
                    self.annotations.on_playing_changed(playing, &self.settings);
                }
                TimelineEvent::SourceAdded(_)
                | TimelineEvent::SourceRemoved(_)
                | TimelineEvent::CurrentTimeChanged(_) => {}
            }
        }
        self.views.recompose(self.timeline.state(), self.timeline.sources());
    }

    pub fn add_source(
        &mut self,
        descriptor: SourceDescriptor,
        handle: Option<Box<dyn MediaHandle>>,
    ) -> Result<()> {
        let source = Source::try_from(descriptor)?;
        self.timeline.register_source(source, handle)?;
        self.pump();
        Ok(())
    }

    pub fn remove_source(&mut self, id: &SourceId) -> Option<Source> {
        let removed = self.timeline.remove_source(id);
        self.pump();
        removed
    }

    pub fn set_active_source(&mut self, id: Option<SourceId>) {
        self.timeline.set_active_source(id);
        self.pump();
    }

    pub fn set_current_time(&mut self, t: f64) {
        self.timeline.set_current_time(t);
        self.pump();
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.timeline.set_playing(playing);
        self.pump();
    }

    pub fn toggle_playing(&mut self) {
        self.timeline.toggle_playing();
        self.pump();
    }

    /// Native time update from a source's media; see
    /// [`TimelineController::report_native_time`].
    pub fn report_native_time(&mut self, id: &SourceId, native_position: f64) -> bool {
        let applied = self.timeline.report_native_time(id, native_position);
        self.pump();
        applied
    }

    pub fn handle_media_ready(&mut self, id: &SourceId) -> Result<AdapterStatus> {
        self.timeline.handle_media_ready(id)
    }

    /// Hand over a native handle once the media collaborator has opened it.
    pub fn attach_media(
        &mut self,
        id: &SourceId,
        handle: Option<Box<dyn MediaHandle>>,
    ) -> Result<AdapterStatus> {
        self.timeline.attach_handle(id, handle)
    }

    pub fn set_mount_available(&mut self, id: &SourceId, available: bool) -> Result<AdapterStatus> {
        self.timeline.set_mount_available(id, available)
    }

    /// Layout changed the scale of the drawing container.
    pub fn set_scale(&mut self, scale: f64) {
        self.annotations.set_scale(scale);
    }

    pub fn mount_surface(&mut self, surface: DrawingSurface) {
        self.annotations.mount(surface, &self.bookmarks);
    }

    pub fn unmount_surface(&mut self) -> Option<DrawingSurface> {
        self.annotations.unmount()
    }

    /// Mark the current moment of the active source and make the bookmark
    /// live. Marking an already bookmarked moment selects that bookmark.
    pub fn add_bookmark(&mut self) -> Result<BookmarkId> {
        let source = self
            .timeline
            .active_source()
            .map(|s| s.id().clone())
            .ok_or(EngineError::NoActiveSource)?;
        let time_key = TimeKey::from_seconds(self.state().current_time);

        let id = self.bookmarks.create(source, time_key);
        self.select_bookmark(&id)?;
        Ok(id)
    }

    /// Jump to a bookmark: pause, activate its source, move the master clock
    /// to its moment and load its document.
    pub fn select_bookmark(&mut self, id: &BookmarkId) -> Result<()> {
        let bookmark = self
            .bookmarks
            .get(id)
            .cloned()
            .ok_or(EngineError::UnknownBookmark(*id))?;
        if self.timeline.source(&bookmark.source_id).is_none() {
            return Err(EngineError::UnknownSource(bookmark.source_id));
        }

        self.timeline.set_playing(false);
        self.timeline.set_active_source(Some(bookmark.source_id.clone()));
        self.timeline.set_current_time(bookmark.time_key.as_seconds());
        self.pump();

        self.annotations.select(&bookmark);
        log::info!("Selected bookmark {id} on {}", bookmark.source_id);
        Ok(())
    }

    pub fn deselect_bookmark(&mut self) {
        self.annotations.deselect();
    }

    pub fn remove_bookmark(&mut self, id: &BookmarkId) -> Option<Bookmark> {
        let removed = self.bookmarks.remove(id)?;
        self.annotations.on_bookmark_removed(id);
        log::info!("Removed bookmark {id}, total: {}", self.bookmarks.len());
        Some(removed)
    }

    /// Store API: replace a bookmark's document. A write to the live
    /// bookmark is reloaded into the surface. Bookmarks are read-only while
    /// the timeline plays.
    pub fn set_bookmark_drawing(
        &mut self,
        source: &SourceId,
        bookmark: &BookmarkId,
        drawing: Drawing,
    ) -> Result<()> {
        if self.state().playing {
            return Err(EngineError::Playing(*bookmark));
        }
        self.bookmarks.set_bookmark_drawing(source, bookmark, drawing)?;

        let is_live = self
            .annotations
            .live_bookmark()
            .is_some_and(|live| &live.id == bookmark);
        if is_live {
            if let Some(stored) = self.bookmarks.get(bookmark).cloned() {
                self.annotations.load_document(&stored);
            }
        }
        Ok(())
    }

    /// Apply an edit to the surface, then run a persistence tick.
    /// Returns `None` when no surface is mounted.
    pub fn edit_drawing<R>(
        &mut self,
        edit: impl FnOnce(&mut DrawingSurface) -> R,
    ) -> Option<(R, PersistOutcome)> {
        let result = edit(self.annotations.surface_mut()?);
        let outcome = self.persist();
        Some((result, outcome))
    }

    /// Persistence tick.
    pub fn persist(&mut self) -> PersistOutcome {
        self.annotations.persist(self.timeline.state(), &mut self.bookmarks)
    }

    /// Pause all media, drop the surface, and hand back the project.
    pub fn close(mut self) -> ProjectData {
        self.timeline.shutdown();
        self.annotations.unmount();
        let project = self.to_project();
        log::info!(
            "Closed session: {} source(s), {} bookmark(s)",
            project.sources.len(),
            project.bookmarks.len()
        );
        project
    }
}
