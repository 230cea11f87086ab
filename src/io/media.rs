// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Headless media handles.
//!
//! Decoding is left to the media collaborator. [`HeadlessMedia`] implements
//! [`MediaHandle`] without producing frames: it tracks play state, position,
//! volume and slot so the engine can run from the command line and in tests.

use crate::timeline::adapter::{MediaHandle, Slot};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A command received by a headless handle.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Play,
    Pause,
    Seek(f64),
    Volume(f32),
    Attach(Slot),
}

/// Shared, ordered record of calls across several handles.
#[derive(Debug, Clone, Default)]
pub struct MediaJournal(Rc<RefCell<Vec<(String, MediaCall)>>>);

impl MediaJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, MediaCall)> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn record(&self, label: &str, call: MediaCall) {
        self.0.borrow_mut().push((label.to_string(), call));
    }
}

/// Flips a loading handle to ready from outside the engine, standing in for
/// the native "can play" callback.
#[derive(Debug, Clone)]
pub struct ReadySignal(Rc<Cell<bool>>);

impl ReadySignal {
    pub fn fire(&self) {
        self.0.set(true);
    }
}

#[derive(Debug)]
pub struct HeadlessMedia {
    ready: Rc<Cell<bool>>,
    paused: bool,
    position: f64,
    volume: f32,
    slot: Option<Slot>,
    label: String,
    journal: Option<MediaJournal>,
}

impl Default for HeadlessMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessMedia {
    /// A handle that is ready immediately.
    pub fn new() -> Self {
        Self {
            ready: Rc::new(Cell::new(true)),
            paused: true,
            position: 0.0,
            volume: 1.0,
            slot: None,
            label: String::new(),
            journal: None,
        }
    }

    /// A handle still opening its media; it ignores commands until ready.
    pub fn loading() -> Self {
        let media = Self::new();
        media.ready.set(false);
        media
    }

    /// A loading handle plus the signal that makes it ready.
    pub fn loading_with_signal() -> (Self, ReadySignal) {
        let media = Self::loading();
        let signal = ReadySignal(Rc::clone(&media.ready));
        (media, signal)
    }

    /// Record every received call into `journal` under `label`.
    pub fn with_journal(mut self, label: impl Into<String>, journal: MediaJournal) -> Self {
        self.label = label.into();
        self.journal = Some(journal);
        self
    }

    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    fn record(&self, call: MediaCall) {
        if let Some(journal) = &self.journal {
            journal.record(&self.label, call);
        }
    }
}

impl MediaHandle for HeadlessMedia {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn play(&mut self) {
        self.paused = false;
        self.record(MediaCall::Play);
    }

    fn pause(&mut self) {
        self.paused = true;
        self.record(MediaCall::Pause);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
        self.record(MediaCall::Seek(self.position));
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.record(MediaCall::Volume(self.volume));
    }

    fn attach(&mut self, slot: Slot) {
        self.slot = Some(slot);
        self.record(MediaCall::Attach(slot));
    }
}
