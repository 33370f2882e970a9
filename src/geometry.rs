//! Core geometry types: Axis, Offset, Size, Region.
//!
//! All lengths are `f32` device units. The solver works one [`Axis`] at a time,
//! so every type here can be read or written per axis.

use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One of the two layout axes.
///
/// `Horizontal` (index 0) sizes columns and widths, `Vertical` (index 1) sizes
/// rows and heights.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both axes in solving order.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// Array index of this axis: 0 for horizontal, 1 for vertical.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }

    /// The other axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[inline]
    pub const fn get(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Set the component along `axis`.
    #[inline]
    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[inline]
    pub const fn get(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Set the extent along `axis`.
    #[inline]
    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Total area (width * height).
    #[inline]
    pub fn area(self) -> f32 {
        self.width * self.height
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

impl Sub for Size {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size { width: self.width - rhs.width, height: self.height - rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle defined by its top-left corner and its size.
///
/// This is what placement produces for every cell, widget and nested layout.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a region from an origin and a size.
    #[inline]
    pub const fn from_parts(origin: Offset, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether `other` lies entirely within this region.
    #[inline]
    pub fn contains_region(self, other: Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether `other` overlaps this region (non-zero intersection area).
    #[inline]
    pub fn overlaps(self, other: Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
