// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bookmarks: annotation documents pinned to a moment of one source.

use super::drawing::Drawing;
use super::source::SourceId;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Bookmark identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(pub Uuid);

impl BookmarkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookmarkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Master-clock moment bucketed to whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeKey(pub i64);

impl TimeKey {
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * 1000.0).round() as i64)
    }

    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

/// Persisted form handed to and from the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkDescriptor {
    pub id: BookmarkId,
    pub source_id: SourceId,
    pub time_key: TimeKey,
    #[serde(default)]
    pub drawing: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub source_id: SourceId,
    pub time_key: TimeKey,
    pub drawing: Drawing,
}

impl Bookmark {
    /// New bookmark with a blank document.
    pub fn new(source_id: SourceId, time_key: TimeKey) -> Self {
        Self {
            id: BookmarkId::new(),
            source_id,
            time_key,
            drawing: Drawing::blank(),
        }
    }

    /// Build from a stored descriptor. A null drawing is treated as blank;
    /// anything else must parse as a document.
    pub fn from_descriptor(descriptor: BookmarkDescriptor) -> Result<Self> {
        let drawing = if descriptor.drawing.is_null() {
            Drawing::blank()
        } else {
            Drawing::from_value(descriptor.drawing).map_err(EngineError::MalformedDrawing)?
        };

        Ok(Self {
            id: descriptor.id,
            source_id: descriptor.source_id,
            time_key: descriptor.time_key,
            drawing,
        })
    }

    pub fn to_descriptor(&self) -> BookmarkDescriptor {
        BookmarkDescriptor {
            id: self.id,
            source_id: self.source_id.clone(),
            time_key: self.time_key,
            drawing: self.drawing.to_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_key_buckets_to_milliseconds() {
        assert_eq!(TimeKey::from_seconds(1.2344), TimeKey(1234));
        assert_eq!(TimeKey::from_seconds(1.2346), TimeKey(1235));
        assert_eq!(TimeKey(1500).as_seconds(), 1.5);
    }

    #[test]
    fn test_null_drawing_loads_blank() {
        let descriptor = BookmarkDescriptor {
            id: BookmarkId::new(),
            source_id: SourceId::from("a"),
            time_key: TimeKey(0),
            drawing: serde_json::Value::Null,
        };
        let bookmark = Bookmark::from_descriptor(descriptor).unwrap();
        assert!(bookmark.drawing.is_empty());
    }

    #[test]
    fn test_malformed_drawing_is_an_error() {
        let descriptor = BookmarkDescriptor {
            id: BookmarkId::new(),
            source_id: SourceId::from("a"),
            time_key: TimeKey(0),
            drawing: serde_json::json!("not a document"),
        };
        let err = Bookmark::from_descriptor(descriptor).unwrap_err();
        assert!(matches!(err, EngineError::MalformedDrawing(_)));
    }
}
