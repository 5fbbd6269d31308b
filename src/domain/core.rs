//! Core domain types and operations
//!
//! This module defines pure geometry types that work exclusively with
//! physical pixels and have no knowledge of Win32 or DPI concepts.

use std::fmt;

/// Rectangle in physical pixel screen coordinates
///
/// This is the fundamental building block for all geometric calculations.
/// All coordinates are in physical pixels, already DPI-normalized by the
/// platform layer (the process runs per-monitor DPI aware).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Degenerate rectangle used as the fallback for failed bounds queries
    pub const ZERO: Rect = Rect { x: 0, y: 0, w: 0, h: 0 };

    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle from its four edges (Win32 `RECT` layout)
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Returns true if this rectangle contains the given point
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Shrinks the rectangle by the given per-edge margins
    pub fn inset(&self, margins: Margins) -> Rect {
        Rect::from_edges(
            self.x + margins.left,
            self.y + margins.top,
            self.right() - margins.right,
            self.bottom() - margins.bottom,
        )
    }

    /// Grows the rectangle by the given per-edge margins
    pub fn outset(&self, margins: Margins) -> Rect {
        Rect::from_edges(
            self.x - margins.left,
            self.y - margins.top,
            self.right() + margins.right,
            self.bottom() + margins.bottom,
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos=({},{})  size={}×{}", self.x, self.y, self.w, self.h)
    }
}

/// Point in physical pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Per-axis difference `self - other`
    pub fn delta(&self, other: Size) -> (i32, i32) {
        (self.w - other.w, self.h - other.h)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.w, self.h)
    }
}

/// Per-edge thickness between two nested rectangles
///
/// Margins are never negative: transient measurement noise (for example
/// during a minimize/restore animation) can make an inner rectangle poke out
/// of its outer one, and those differences are floored to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub const ZERO: Margins = Margins { left: 0, top: 0, right: 0, bottom: 0 };

    /// Creates margins, clamping every edge to be non-negative
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.max(0),
            top: top.max(0),
            right: right.max(0),
            bottom: bottom.max(0),
        }
    }

    /// Uniform margins on all four edges
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Thickness of `outer` around `inner`, one value per edge, clamped at 0
    pub fn between(outer: &Rect, inner: &Rect) -> Self {
        Self::new(
            inner.x - outer.x,
            inner.y - outer.y,
            outer.right() - inner.right(),
            outer.bottom() - inner.bottom(),
        )
    }

    /// Combined left + right thickness
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Combined top + bottom thickness
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Margins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L={} T={} R={} B={}",
            self.left, self.top, self.right, self.bottom
        )
    }
}
