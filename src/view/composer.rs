// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-source visibility derived from timeline state.
//!
//! Every source is in exactly one [`Visibility`] at any instant. The rendering
//! collaborator shows one element per source accordingly; the single source in
//! [`Visibility::ResetAffordance`] is the one whose media owns the large
//! viewport.

use crate::models::source::{RangePosition, Source, SourceId};
use crate::timeline::state::TimelineState;

/// Which element represents a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Active: media is in the large viewport, the slot shows a control to
    /// deactivate it.
    ResetAffordance,
    /// Inactive and in range: muted media rendered small, click to activate.
    Thumbnail,
    /// Inactive, master clock before the source starts.
    BeforeRange,
    /// Inactive, master clock after the source ends.
    AfterRange,
}

impl Visibility {
    /// Whether the media surface itself is on screen in the source list.
    pub fn shows_media(self) -> bool {
        matches!(self, Visibility::Thumbnail)
    }

    /// Clicking the slot makes the source active.
    pub fn is_activatable(self) -> bool {
        matches!(self, Visibility::Thumbnail)
    }

    pub fn placeholder_label(self) -> Option<&'static str> {
        match self {
            Visibility::BeforeRange => Some("BEFORE RANGE"),
            Visibility::AfterRange => Some("AFTER RANGE"),
            _ => None,
        }
    }
}

/// Classify one source. Pure function of state and the source's range.
pub fn classify(state: &TimelineState, source: &Source) -> Visibility {
    if state.is_active(source.id()) {
        return Visibility::ResetAffordance;
    }
    match source.range_position(state.current_time) {
        RangePosition::Within => Visibility::Thumbnail,
        RangePosition::Before => Visibility::BeforeRange,
        RangePosition::After => Visibility::AfterRange,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceView {
    pub id: SourceId,
    pub name: String,
    pub visibility: Visibility,
    /// Native position the media shows when paused.
    pub local_time: f64,
}

/// Holds the last composed view list and recomputes it on demand.
#[derive(Debug, Default)]
pub struct ViewComposer {
    views: Vec<SourceView>,
}

impl ViewComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compose<'a>(
        state: &TimelineState,
        sources: impl IntoIterator<Item = &'a Source>,
    ) -> Vec<SourceView> {
        sources
            .into_iter()
            .map(|source| SourceView {
                id: source.id().clone(),
                name: source.name().to_string(),
                visibility: classify(state, source),
                local_time: source.local_time(state.current_time),
            })
            .collect()
    }

    pub fn recompose<'a>(
        &mut self,
        state: &TimelineState,
        sources: impl IntoIterator<Item = &'a Source>,
    ) -> &[SourceView] {
        self.views = Self::compose(state, sources);
        &self.views
    }

    pub fn views(&self) -> &[SourceView] {
        &self.views
    }

    pub fn view(&self, id: &SourceId) -> Option<&SourceView> {
        self.views.iter().find(|view| &view.id == id)
    }

    /// Source whose media occupies the large viewport.
    pub fn viewport_owner(&self) -> Option<&SourceId> {
        self.views
            .iter()
            .find(|view| view.visibility == Visibility::ResetAffordance)
            .map(|view| &view.id)
    }
}
