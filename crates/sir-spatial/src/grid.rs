//! Linked-cells grid: a uniform bucket grid over a rectangular domain.
//!
//! # Data layout
//!
//! The plane is cut into square cells of side `cell_size`, anchored at the
//! domain origin.  A point `p` lives in cell
//!
//! ```text
//! (floor((p.x - origin.x) / cell_size), floor((p.y - origin.y) / cell_size))
//! ```
//!
//! Only occupied cells own a bucket (sparse `FxHashMap`), so points that stray
//! outside the nominal domain are still indexed correctly and an empty grid
//! costs nothing.
//!
//! # Queries
//!
//! A radius query visits the centre cell plus `ceil(radius / cell_size) + 1`
//! rings around it, then checks the Euclidean distance of every candidate.
//! The boundary is inclusive: a point at distance exactly `radius` matches.
//!
//! Usage is insert-all-then-query: the SIR model calls [`build`] once per
//! tick with the infected positions and then issues one query per
//! susceptible pedestrian.
//!
//! [`build`]: LinkedCellsGrid::build

use rustc_hash::FxHashMap;

use sir_core::{Point, Rect};

use crate::{SpatialError, SpatialResult};

/// Integer cell coordinate `(column, row)`.
pub type CellCoord = (i64, i64);

/// Uniform bucket grid mapping cells to the items located in them.
#[derive(Clone, Debug)]
pub struct LinkedCellsGrid<T> {
    bounds:    Rect,
    cell_size: f64,
    buckets:   FxHashMap<CellCoord, Vec<(Point, T)>>,
    len:       usize,
}

impl<T> LinkedCellsGrid<T> {
    /// Create an empty grid covering `bounds` with square cells of side
    /// `cell_size`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidCellSize`] if `cell_size` is not a positive
    /// finite number; [`SpatialError::InvalidExtent`] if the bounds have a
    /// negative or non-finite size.
    pub fn new(bounds: Rect, cell_size: f64) -> SpatialResult<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        let extent_ok = bounds.width.is_finite()
            && bounds.height.is_finite()
            && bounds.width >= 0.0
            && bounds.height >= 0.0;
        if !extent_ok {
            return Err(SpatialError::InvalidExtent {
                width:  bounds.width,
                height: bounds.height,
            });
        }
        Ok(Self {
            bounds,
            cell_size,
            buckets: FxHashMap::default(),
            len: 0,
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.buckets.len()
    }

    /// Cell containing `p`.
    #[inline]
    pub fn cell_of(&self, p: Point) -> CellCoord {
        let col = ((p.x - self.bounds.x) / self.cell_size).floor() as i64;
        let row = ((p.y - self.bounds.y) / self.cell_size).floor() as i64;
        (col, row)
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Remove every item.  Bucket allocations are dropped with them.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Insert one item at `p`.
    pub fn insert(&mut self, p: Point, item: T) {
        let cell = self.cell_of(p);
        self.buckets.entry(cell).or_default().push((p, item));
        self.len += 1;
    }

    /// Discard prior contents and index every `(position, item)` pair.
    pub fn build<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (Point, T)>,
    {
        self.clear();
        for (p, item) in items {
            self.insert(p, item);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every indexed item within `radius` of `center` (inclusive), with its
    /// position.
    ///
    /// A negative or NaN `radius` matches nothing.
    pub fn query(&self, center: Point, radius: f64) -> Vec<(Point, &T)> {
        let mut out = Vec::new();
        self.for_each_within(center, radius, |p, item| out.push((p, item)));
        out
    }

    /// Number of indexed items within `radius` of `center` (inclusive).
    ///
    /// Same semantics as `query(center, radius).len()` without allocating.
    pub fn count_within(&self, center: Point, radius: f64) -> usize {
        let mut n = 0;
        self.for_each_within(center, radius, |_, _| n += 1);
        n
    }

    fn for_each_within<'a, F>(&'a self, center: Point, radius: f64, mut visit: F)
    where
        F: FnMut(Point, &'a T),
    {
        if self.buckets.is_empty() || radius.is_nan() || radius < 0.0 {
            return;
        }
        let (cc, cr) = self.cell_of(center);
        // One spare ring absorbs rounding in the cell division.
        let rings = (radius / self.cell_size).ceil() + 1.0;

        // Unsquared comparison: a point exactly on the circle must match.
        let mut scan = |bucket: &'a Vec<(Point, T)>| {
            for (p, item) in bucket {
                if p.distance(center) <= radius {
                    visit(*p, item);
                }
            }
        };

        // Window side in cells; when it exceeds the number of occupied cells
        // it is cheaper to filter the occupied cells by coordinate.
        let side = 2.0 * rings + 1.0;
        if side * side > self.buckets.len() as f64 {
            let reach = if rings.is_finite() { rings as i64 } else { i64::MAX };
            for (&(col, row), bucket) in &self.buckets {
                if col.abs_diff(cc) <= reach.unsigned_abs()
                    && row.abs_diff(cr) <= reach.unsigned_abs()
                {
                    scan(bucket);
                }
            }
            return;
        }

        let rings = rings as i64;
        for row in cr.saturating_sub(rings)..=cr.saturating_add(rings) {
            for col in cc.saturating_sub(rings)..=cc.saturating_add(rings) {
                if let Some(bucket) = self.buckets.get(&(col, row)) {
                    scan(bucket);
                }
            }
        }
    }
}
