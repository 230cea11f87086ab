// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Engine error types.
//!
//! Only caller mistakes surface as errors. Resources that are not ready yet
//! (media handles, mount targets, the drawing surface) never produce an error;
//! the affected operation is skipped and retried on the next state change.

use crate::models::{bookmark::BookmarkId, source::SourceId};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the timeline and annotation engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("source already registered: {0}")]
    DuplicateSource(SourceId),

    #[error("invalid range for source {id}: offset {offset} must be >= 0 and <= duration {duration}")]
    InvalidRange {
        id: SourceId,
        offset: f64,
        duration: f64,
    },

    #[error("unknown source: {0}")]
    UnknownSource(SourceId),

    #[error("unknown bookmark: {0}")]
    UnknownBookmark(BookmarkId),

    #[error("bookmark {bookmark} belongs to source {owner}, not {requested}")]
    BookmarkSourceMismatch {
        bookmark: BookmarkId,
        owner: SourceId,
        requested: SourceId,
    },

    #[error("no active source")]
    NoActiveSource,

    #[error("bookmark {0} cannot change while the timeline is playing")]
    Playing(BookmarkId),

    #[error("malformed drawing document: {0}")]
    MalformedDrawing(#[from] serde_json::Error),
}
