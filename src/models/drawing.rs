// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation document structures.
//!
//! A [`Drawing`] is the document attached to a bookmark: a set of pages, each
//! holding freehand strokes, lines, polygons and arrows in page coordinates.
//! The timeline engine treats it as opaque apart from [`Drawing::is_empty`].
//!
//! Documents may come from other editors. Fields this crate does not model
//! are kept in `extra` maps and written back unchanged, and shape types it
//! cannot draw load as [`ShapeKind::Other`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Identifier of the page every new document starts with.
pub const DEFAULT_PAGE_ID: &str = "page";

/// Default stroke colour for new shapes.
pub const DEFAULT_COLOR: &str = "#E03131";

/// A 2D point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Kind of shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Draw,
    Line,
    Polygon,
    Arrow,
    /// A type written by another editor, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// A single shape on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    /// Unset on shapes from editors that style them differently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Shape {
    pub fn new(id: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            points: Vec::new(),
            color: Some(DEFAULT_COLOR.to_string()),
            extra: Map::new(),
        }
    }

    /// Stroke colour, falling back to the default.
    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Check if the shape is closed (polygon).
    pub fn is_closed(&self) -> bool {
        matches!(self.kind, ShapeKind::Polygon)
    }
}

/// A page of shapes, keyed by shape id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub shapes: BTreeMap<String, Shape>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Page {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }
}

/// An annotation document.
///
/// All data is owned, so [`Clone`] never shares substructure between the
/// original and the copy. [`Drawing::detached_copy`] names that contract at
/// the call sites where it matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::blank()
    }
}

impl Drawing {
    /// A document with one empty page.
    pub fn blank() -> Self {
        let mut pages = BTreeMap::new();
        pages.insert(DEFAULT_PAGE_ID.to_string(), Page::new(DEFAULT_PAGE_ID));
        Self {
            pages,
            extra: Map::new(),
        }
    }

    /// Parse a document handed over by a storage collaborator.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Storage form. A document that fails to serialize is stored as null,
    /// which loads back blank.
    pub fn to_value(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to serialize drawing, storing it blank: {e}");
                Value::Null
            }
        }
    }

    /// Structurally equal copy sharing no mutable state with `self`.
    ///
    /// Edits applied to the copy never reach the original, and the reverse.
    pub fn detached_copy(&self) -> Self {
        Self {
            pages: self
                .pages
                .iter()
                .map(|(id, page)| (id.clone(), page.clone()))
                .collect(),
            extra: self.extra.clone(),
        }
    }

    /// True when no page holds any shape.
    pub fn is_empty(&self) -> bool {
        self.pages.values().all(|page| page.shapes.is_empty())
    }

    pub fn shape_count(&self) -> usize {
        self.pages.values().map(|page| page.shapes.len()).sum()
    }

    /// The default page, created on demand.
    pub fn page_mut(&mut self) -> &mut Page {
        self.pages
            .entry(DEFAULT_PAGE_ID.to_string())
            .or_insert_with(|| Page::new(DEFAULT_PAGE_ID))
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.pages.values().find_map(|page| page.shapes.get(id))
    }

    pub fn insert_shape(&mut self, shape: Shape) {
        self.page_mut().shapes.insert(shape.id.clone(), shape);
    }

    /// Ids of every shape, on every page.
    pub fn shape_ids(&self) -> impl Iterator<Item = &str> {
        self.pages
            .values()
            .flat_map(|page| page.shapes.keys().map(String::as_str))
    }

    pub fn remove_shape(&mut self, id: &str) -> Option<Shape> {
        self.pages
            .values_mut()
            .find_map(|page| page.shapes.remove(id))
    }

    /// Remove every shape but keep the pages.
    pub fn clear(&mut self) {
        for page in self.pages.values_mut() {
            page.shapes.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(id: &str) -> Shape {
        let mut shape = Shape::new(id, ShapeKind::Draw);
        shape.add_point(Point::new(0.1, 0.2));
        shape.add_point(Point::new(0.3, 0.4));
        shape
    }

    #[test]
    fn test_blank_is_empty() {
        let drawing = Drawing::blank();
        assert!(drawing.is_empty());
        assert_eq!(drawing.pages.len(), 1);
    }

    #[test]
    fn test_detached_copy_does_not_alias() {
        let mut original = Drawing::blank();
        original.insert_shape(stroke("s1"));

        let mut copy = original.detached_copy();
        assert_eq!(copy, original);

        copy.insert_shape(stroke("s2"));
        copy.page_mut()
            .shapes
            .get_mut("s1")
            .unwrap()
            .add_point(Point::new(0.9, 0.9));

        assert_eq!(original.shape_count(), 1);
        assert_eq!(original.shape("s1").unwrap().points.len(), 2);
    }

    #[test]
    fn test_clear_keeps_pages() {
        let mut drawing = Drawing::blank();
        drawing.insert_shape(stroke("s1"));
        drawing.clear();
        assert!(drawing.is_empty());
        assert!(drawing.pages.contains_key(DEFAULT_PAGE_ID));
    }

    #[test]
    fn test_from_value_rejects_malformed_document() {
        let value = serde_json::json!({ "pages": { "page": { "id": "page", "shapes": 3 } } });
        assert!(Drawing::from_value(value).is_err());
    }

    #[test]
    fn test_from_value_fills_default_color() {
        let value = serde_json::json!({
            "pages": {
                "page": {
                    "id": "page",
                    "shapes": {
                        "s1": { "id": "s1", "type": "arrow", "points": [{ "x": 0.0, "y": 0.0 }] }
                    }
                }
            }
        });
        let drawing = Drawing::from_value(value).unwrap();
        let shape = drawing.shape("s1").unwrap();
        assert_eq!(shape.color(), DEFAULT_COLOR);
        assert_eq!(shape.color, None);
    }

    #[test]
    fn test_foreign_fields_survive_reload() {
        let value = serde_json::json!({
            "id": "doc",
            "pageStates": { "page": { "camera": { "x": 0, "y": 0, "z": 1 } } },
            "pages": {
                "page": {
                    "id": "page",
                    "name": "Page 1",
                    "bindings": {},
                    "shapes": {
                        "s1": {
                            "id": "s1",
                            "type": "draw",
                            "points": [{ "x": 1.0, "y": 2.0 }],
                            "style": { "size": "small", "dash": "draw" }
                        },
                        "s2": {
                            "id": "s2",
                            "type": "rectangle",
                            "point": [10, 20],
                            "size": [30, 40]
                        }
                    }
                }
            }
        });

        let drawing = Drawing::from_value(value.clone()).unwrap();
        assert_eq!(drawing.shape_count(), 2);
        assert_eq!(
            drawing.shape("s2").unwrap().kind,
            ShapeKind::Other("rectangle".into())
        );
        assert!(!drawing.is_empty());
        assert_eq!(drawing.detached_copy().to_value(), value);
    }
}
