// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: sources, bookmarks, annotation documents, projects and settings.

pub mod bookmark;
pub mod drawing;
pub mod project;
pub mod settings;
pub mod source;
