// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state for serialization.
//!
//! A project is the set of sources placed on the master timeline plus every
//! bookmark recorded against them.

use super::bookmark::BookmarkDescriptor;
use super::source::SourceDescriptor;
use serde::{Deserialize, Serialize};

/// Complete project data for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub sources: Vec<SourceDescriptor>,
    #[serde(default)]
    pub bookmarks: Vec<BookmarkDescriptor>,
}

impl ProjectData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Master-clock span covered by at least one source, if any.
    pub fn coverage(&self) -> Option<(f64, f64)> {
        let start = self
            .sources
            .iter()
            .map(|s| s.offset_normalised)
            .fold(f64::INFINITY, f64::min);
        let end = self
            .sources
            .iter()
            .map(|s| s.duration_normalised)
            .fold(f64::NEG_INFINITY, f64::max);

        (start.is_finite() && end.is_finite()).then_some((start, end))
    }
}
