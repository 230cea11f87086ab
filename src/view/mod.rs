// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! View composition for the rendering collaborator.

pub mod composer;

pub use composer::{classify, SourceView, ViewComposer, Visibility};
