//! Fluent builder for constructing a `Topography`.
//!
//! # Usage
//!
//! ```rust
//! use sir_agent::TopographyBuilder;
//! use sir_core::{Point, Rect};
//!
//! let topography = TopographyBuilder::new(Rect::new(0.0, 0.0, 20.0, 10.0))
//!     .bounding_box_width(1.0)
//!     .pedestrian(Point::new(1.0, 1.0))
//!     .pedestrian(Point::new(2.0, 1.0))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(topography.len(), 2);
//! assert_eq!(topography.attributes().bounding_box_width, 1.0);
//! ```

use sir_core::{CoreError, CoreResult, Point, Rect};

use crate::{Topography, TopographyAttributes};

/// Fluent builder for [`Topography`].
///
/// Pedestrians added here are present *before* any group model registers as
/// a listener, so no events are queued for them; models pick them up in
/// their pre-loop hook instead.
pub struct TopographyBuilder {
    bounds:      Rect,
    attributes:  TopographyAttributes,
    pedestrians: Vec<Point>,
}

impl TopographyBuilder {
    /// Create a builder for a scenario covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            attributes:  TopographyAttributes::default(),
            pedestrians: Vec::new(),
        }
    }

    /// Replace all scenario attributes at once.
    pub fn attributes(mut self, attributes: TopographyAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Side length of the linked-cells buckets used by spatial consumers.
    pub fn bounding_box_width(mut self, width: f64) -> Self {
        self.attributes.bounding_box_width = width;
        self
    }

    /// Add one initial pedestrian.  IDs follow insertion order from 0.
    pub fn pedestrian(mut self, position: Point) -> Self {
        self.pedestrians.push(position);
        self
    }

    /// Add several initial pedestrians.
    pub fn pedestrians<I: IntoIterator<Item = Point>>(mut self, positions: I) -> Self {
        self.pedestrians.extend(positions);
        self
    }

    /// Validate inputs and construct the [`Topography`].
    ///
    /// # Errors
    ///
    /// [`CoreError::Config`] if the bounds have a negative or non-finite size
    /// or the bounding-box width is not a positive finite number.
    pub fn build(self) -> CoreResult<Topography> {
        let Rect { width, height, .. } = self.bounds;
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(CoreError::Config(format!(
                "topography bounds must be non-negative and finite, got {width} x {height}"
            )));
        }
        let cell = self.attributes.bounding_box_width;
        if !cell.is_finite() || cell <= 0.0 {
            return Err(CoreError::Config(format!(
                "bounding_box_width must be positive and finite, got {cell}"
            )));
        }

        let mut topography = Topography::new(self.bounds, self.attributes);
        for position in self.pedestrians {
            topography.add_pedestrian(position);
        }
        Ok(topography)
    }
}
