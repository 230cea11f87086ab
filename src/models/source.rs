// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media source descriptors.
//!
//! A source is one independently recorded video placed on the shared master
//! timeline. Its offset and duration are both expressed in master-clock
//! seconds, so a source covers `[offset_normalised, duration_normalised]`.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a source for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Where the master clock sits relative to a source's coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    Before,
    Within,
    After,
}

/// Descriptor supplied by the import collaborator and persisted in projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub id: SourceId,
    pub name: String,
    /// Path or URI of the media file; resolved by the media collaborator.
    #[serde(default)]
    pub media: String,
    pub offset_normalised: f64,
    pub duration_normalised: f64,
}

/// A validated source. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    id: SourceId,
    name: String,
    media: String,
    offset_normalised: f64,
    duration_normalised: f64,
}

impl Source {
    /// Create a source, checking `0 <= offset <= duration`.
    pub fn new(
        id: SourceId,
        name: impl Into<String>,
        offset_normalised: f64,
        duration_normalised: f64,
    ) -> Result<Self> {
        let valid = offset_normalised.is_finite()
            && duration_normalised.is_finite()
            && offset_normalised >= 0.0
            && offset_normalised <= duration_normalised;
        if !valid {
            return Err(EngineError::InvalidRange {
                id,
                offset: offset_normalised,
                duration: duration_normalised,
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            media: String::new(),
            offset_normalised,
            duration_normalised,
        })
    }

    /// Attach the media location carried through project files.
    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    pub fn id(&self) -> &SourceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media(&self) -> &str {
        &self.media
    }

    pub fn offset_normalised(&self) -> f64 {
        self.offset_normalised
    }

    pub fn duration_normalised(&self) -> f64 {
        self.duration_normalised
    }

    /// Classify the master clock against this source's coverage.
    ///
    /// Both ends are inclusive: a source is in range exactly at its offset
    /// and exactly at its end.
    pub fn range_position(&self, master_time: f64) -> RangePosition {
        if master_time < self.offset_normalised {
            RangePosition::Before
        } else if master_time > self.duration_normalised {
            RangePosition::After
        } else {
            RangePosition::Within
        }
    }

    pub fn contains(&self, master_time: f64) -> bool {
        self.range_position(master_time) == RangePosition::Within
    }

    /// Native playback position for a master-clock time.
    pub fn local_time(&self, master_time: f64) -> f64 {
        master_time + self.offset_normalised
    }

    /// Inverse of [`Source::local_time`].
    pub fn master_time(&self, local_time: f64) -> f64 {
        local_time - self.offset_normalised
    }

    pub fn to_descriptor(&self) -> SourceDescriptor {
        SourceDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            media: self.media.clone(),
            offset_normalised: self.offset_normalised,
            duration_normalised: self.duration_normalised,
        }
    }
}

impl TryFrom<SourceDescriptor> for Source {
    type Error = EngineError;

    fn try_from(descriptor: SourceDescriptor) -> Result<Self> {
        Ok(Source::new(
            descriptor.id,
            descriptor.name,
            descriptor.offset_normalised,
            descriptor.duration_normalised,
        )?
        .with_media(descriptor.media))
    }
}
