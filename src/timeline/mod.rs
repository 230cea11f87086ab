// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Master clock, per-source adapters and the controller that keeps them in
//! lockstep.

pub mod adapter;
pub mod controller;
pub mod state;

pub use adapter::{AdapterStatus, MediaHandle, Slot, VideoAdapter};
pub use controller::TimelineController;
pub use state::{TimelineEvent, TimelineState};
