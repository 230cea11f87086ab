// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bookmark storage, the live drawing surface, and the engine that gates
//! edits between them.

pub mod engine;
pub mod store;
pub mod surface;

pub use engine::{AnnotationEngine, LiveBookmark, PersistOutcome};
pub use store::BookmarkStore;
pub use surface::{DrawingSurface, Tool};
