// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! Pointer input arrives in viewport pixels; drawings are stored in page
//! coordinates. The [`Camera`] maps between the two.

use crate::models::drawing::Point;

/// Viewport transform of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Page point shown at the top-left of the viewport.
    pub origin: Point,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            origin: Point::ORIGIN,
            scale: 1.0,
        }
    }
}

impl Camera {
    pub fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }
}

/// Viewport pixel to page coordinates.
pub fn screen_to_page(screen: Point, camera: &Camera) -> Point {
    Point {
        x: screen.x / camera.scale + camera.origin.x,
        y: screen.y / camera.scale + camera.origin.y,
    }
}

/// Page coordinates to viewport pixel.
pub fn page_to_screen(page: Point, camera: &Camera) -> Point {
    Point {
        x: (page.x - camera.origin.x) * camera.scale,
        y: (page.y - camera.origin.y) * camera.scale,
    }
}
