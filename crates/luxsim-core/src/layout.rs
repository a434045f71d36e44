//! Layout Generator
//!
//! Places `N` fixtures on a regular grid with one spacing unit of margin on
//! every side. The grid aspect follows the room: rows run along the length.

use serde::{Deserialize, Serialize};

use crate::math::{self, DVec2, Rect};
use crate::{LightingError, LightingResult};

/// Largest fixture count a layout is generated for by default
pub const DEFAULT_MAX_LAYOUT_FIXTURES: u32 = 100_000;

/// Fixture positions for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlacement {
    /// Grid positions along the length
    pub rows: u32,
    /// Grid positions along the width
    pub cols: u32,
    /// Distance between positions along the length
    pub x_spacing: f64,
    /// Distance between positions along the width
    pub y_spacing: f64,
    /// Row-major positions, exactly one per fixture
    pub positions: Vec<DVec2>,
}

/// Deterministic grid layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutGenerator {
    max_fixtures: u32,
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LAYOUT_FIXTURES)
    }
}

impl LayoutGenerator {
    /// Create a generator refusing layouts of more than `max_fixtures` positions
    pub fn new(max_fixtures: u32) -> Self {
        Self { max_fixtures }
    }

    /// Grid shape `(rows, cols)` for `count` fixtures in a `length x width` space
    pub fn grid_shape(length: f64, width: f64, count: u32) -> LightingResult<(u32, u32)> {
        let rows = math::ceil_count((f64::from(count) * length / width).sqrt(), "layout rows")?;
        let cols = count.div_ceil(rows).max(1);
        Ok((rows, cols))
    }

    /// Place `count` fixtures inside `bounds`
    pub fn generate(&self, bounds: Rect, count: u32) -> LightingResult<LayoutPlacement> {
        let size = bounds.size();
        let (length, width) = (size.x, size.y);
        math::ensure_positive(length, "layout length")?;
        math::ensure_positive(width, "layout width")?;
        if count == 0 {
            return Err(LightingError::InvalidParameter("layout needs at least one fixture".to_string()));
        }
        // Checked before any allocation
        if count > self.max_fixtures {
            return Err(LightingError::ComputationOverflow(format!(
                "layout of {count} fixtures exceeds the limit of {}",
                self.max_fixtures
            )));
        }

        let (rows, cols) = Self::grid_shape(length, width, count)?;
        let x_spacing = length / (f64::from(rows) + 1.0);
        let y_spacing = width / (f64::from(cols) + 1.0);

        let mut positions = Vec::with_capacity(count as usize);
        positions.extend(
            (0..rows)
                .flat_map(|i| (0..cols).map(move |j| (i, j)))
                .take(count as usize)
                .map(|(i, j)| bounds.min + DVec2::new(f64::from(i + 1) * x_spacing, f64::from(j + 1) * y_spacing)),
        );

        debug_assert!(positions.iter().all(|p| bounds.contains_point(*p)));

        log::debug!("Layout: {count} fixtures on a {rows}x{cols} grid ({x_spacing:.2} m x {y_spacing:.2} m)");

        Ok(LayoutPlacement {
            rows,
            cols,
            x_spacing,
            y_spacing,
            positions,
        })
    }
}
