// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VODON - synchronized multi-source video review
//!
//! Several independently recorded videos of the same event are placed on one
//! master timeline and scrubbed together. One source at a time can be
//! enlarged, and reviewers pin freehand drawings to moments of that source.
//!
//! [`ReviewSession`] is the entry point. It owns the
//! [`TimelineController`](timeline::TimelineController), which keeps every
//! native media handle in lockstep, the
//! [`BookmarkStore`](annotation::BookmarkStore), and the
//! [`AnnotationEngine`](annotation::AnnotationEngine) that decides when edits
//! on the drawing surface are written back.

pub mod annotation;
pub mod error;
pub mod io;
pub mod models;
pub mod session;
pub mod timeline;
pub mod util;
pub mod view;

pub use error::{EngineError, Result};
pub use session::ReviewSession;
