// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Reviewer settings supplied from outside the engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wipe the live drawing surface whenever playback starts.
    pub clear_drawings_on_play: bool,
    /// Surface scale used until the layout reports a real one.
    pub default_scale: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clear_drawings_on_play: false,
            default_scale: 1.0,
        }
    }
}
