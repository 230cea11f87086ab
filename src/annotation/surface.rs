// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The live, editable drawing surface.
//!
//! The surface owns the document being edited, the camera, the tool state and
//! its own undo/redo history. It knows nothing about bookmarks or the
//! timeline; [`AnnotationEngine`](super::engine::AnnotationEngine) decides
//! what gets loaded into it and whether its edits are kept.

use crate::models::drawing::{Drawing, Point, Shape, ShapeKind, DEFAULT_COLOR};
use crate::util::geometry::{page_to_screen, screen_to_page, Camera};

/// Maximum number of undo states kept.
const HISTORY_LIMIT: usize = 50;

/// Snapshots of the document for undo/redo. Any new edit drops the redo side.
#[derive(Debug, Default)]
struct History {
    past: Vec<Drawing>,
    future: Vec<Drawing>,
}

impl History {
    /// Record `document` as the state before an edit.
    fn push(&mut self, document: Drawing) {
        self.past.push(document);
        if self.past.len() > HISTORY_LIMIT {
            self.past.remove(0);
        }
        self.future.clear();
    }

    fn undo(&mut self, current: Drawing) -> Option<Drawing> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    fn redo(&mut self, current: Drawing) -> Option<Drawing> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

/// Current drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Draw,
    Line,
    Polygon,
    Arrow,
    Erase,
}

impl Tool {
    fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Draw => Some(ShapeKind::Draw),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Polygon => Some(ShapeKind::Polygon),
            Tool::Arrow => Some(ShapeKind::Arrow),
            Tool::Select | Tool::Erase => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DrawingSurface {
    document: Drawing,
    camera: Camera,
    tool: Tool,
    tool_locked: bool,
    color: String,
    selected: Option<String>,
    in_progress: Option<Shape>,
    history: History,
    /// Last `shape-N` suffix handed out.
    shape_counter: usize,
    /// Bumped on every document change.
    revision: u64,
}

impl DrawingSurface {
    pub fn new() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Drawing {
        &self.document
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the document. History and selection start over.
    pub fn load_document(&mut self, document: Drawing) {
        self.document = document;
        self.history.clear();
        self.selected = None;
        self.in_progress = None;
        self.shape_counter = self
            .document
            .shape_ids()
            .filter_map(|id| id.strip_prefix("shape-")?.parse::<usize>().ok())
            .max()
            .unwrap_or(0);
        self.revision += 1;
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Reset the viewport transform. Document content is untouched.
    pub fn set_camera(&mut self, origin: Point, scale: f64) {
        self.camera = Camera::new(origin, scale);
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn active_tool(&self) -> Tool {
        self.tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.in_progress = None;
        self.tool = tool;
    }

    /// Locked tools stay selected after a shape is finished.
    pub fn toggle_tool_lock(&mut self) {
        self.tool_locked = !self.tool_locked;
    }

    pub fn is_tool_locked(&self) -> bool {
        self.tool_locked
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select_shape(&mut self, id: &str) -> bool {
        if self.document.shape(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn select_none(&mut self) {
        self.selected = None;
    }

    /// Viewport pixel to page coordinates through the current camera.
    pub fn pointer_to_page(&self, x: f64, y: f64) -> Point {
        screen_to_page(Point::new(x, y), &self.camera)
    }

    /// Start a shape with the current tool at a viewport position.
    /// Returns false for tools that do not draw.
    pub fn begin_stroke(&mut self, x: f64, y: f64) -> bool {
        let Some(kind) = self.tool.shape_kind() else {
            return false;
        };

        let mut shape = Shape::new(self.next_shape_id(), kind);
        shape.color = Some(self.color.clone());
        shape.add_point(self.pointer_to_page(x, y));
        self.in_progress = Some(shape);
        true
    }

    /// Fresh id; never one already in the document.
    fn next_shape_id(&mut self) -> String {
        loop {
            self.shape_counter += 1;
            let id = format!("shape-{}", self.shape_counter);
            if self.document.shape(&id).is_none() {
                return id;
            }
        }
    }

    pub fn extend_stroke(&mut self, x: f64, y: f64) {
        let point = self.pointer_to_page(x, y);
        if let Some(shape) = self.in_progress.as_mut() {
            shape.add_point(point);
        }
    }

    pub fn cancel_stroke(&mut self) {
        self.in_progress = None;
    }

    /// Commit the in-progress shape. Shapes with fewer than two points are
    /// dropped. Unlocked tools fall back to select afterwards.
    pub fn finish_stroke(&mut self) -> Option<String> {
        let shape = self.in_progress.take()?;
        if shape.points.len() < 2 {
            return None;
        }

        let id = shape.id.clone();
        self.history.push(self.document.clone());
        self.document.insert_shape(shape);
        self.revision += 1;
        if !self.tool_locked {
            self.tool = Tool::Select;
        }
        log::debug!("Added shape {id}, total: {}", self.document.shape_count());
        Some(id)
    }

    /// Remove the first shape with a point within `radius` viewport pixels.
    pub fn erase_at(&mut self, x: f64, y: f64, radius: f64) -> Option<Shape> {
        let camera = self.camera;
        let hit = self
            .document
            .pages
            .values()
            .flat_map(|page| page.shapes.values())
            .find(|shape| {
                shape.points.iter().any(|p| {
                    let screen = page_to_screen(*p, &camera);
                    (screen.x - x).hypot(screen.y - y) <= radius
                })
            })
            .map(|shape| shape.id.clone())?;

        self.history.push(self.document.clone());
        let removed = self.document.remove_shape(&hit);
        if self.selected.as_deref() == Some(hit.as_str()) {
            self.selected = None;
        }
        self.revision += 1;
        removed
    }

    pub fn delete_selected(&mut self) -> Option<Shape> {
        let id = self.selected.take()?;
        self.history.push(self.document.clone());
        self.revision += 1;
        self.document.remove_shape(&id)
    }

    /// Remove every shape. Undoable.
    pub fn delete_all(&mut self) {
        self.in_progress = None;
        self.selected = None;
        if self.document.is_empty() {
            return;
        }
        self.history.push(self.document.clone());
        self.document.clear();
        self.revision += 1;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let current = self.document.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.document = previous;
                self.selected = None;
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.document.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.document = next;
                self.selected = None;
                self.revision += 1;
                true
            }
            None => false,
        }
    }
}
