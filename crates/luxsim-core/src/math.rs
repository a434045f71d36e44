//! Math utilities
//!
//! Re-exports from glam plus the small geometric and numeric helpers shared by
//! the calculators.

pub use glam::DVec2;

use crate::{LightingError, LightingResult};

/// Axis-aligned rectangle on the working plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum corner
    pub min: DVec2,
    /// Maximum corner
    pub max: DVec2,
}

impl Rect {
    /// Create a rectangle from min and max corners
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin spanning `length` along x and `width` along y
    pub fn from_dimensions(length: f64, width: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(length, width))
    }

    /// Get the full size of the rectangle
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Get the enclosed area
    pub fn area(&self) -> f64 {
        let size = self.size();
        size.x * size.y
    }

    /// Check if a point is inside the rectangle (edges included)
    pub fn contains_point(&self, point: DVec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Tangent of half the beam angle, with the half-angle capped at `max_half_angle_deg`.
///
/// A beam of 180 degrees or wider has a half-angle at or past 90 degrees where the
/// tangent diverges or turns negative; the cap keeps the result finite and positive.
pub fn tan_half_angle(beam_angle_deg: f64, max_half_angle_deg: f64) -> f64 {
    let half = (beam_angle_deg / 2.0).min(max_half_angle_deg);
    half.to_radians().tan()
}

/// Ceiling of `value` as a fixture count, never below one
pub fn ceil_count(value: f64, what: &str) -> LightingResult<u32> {
    let value = ensure_finite(value, what)?;
    let count = value.ceil().max(1.0);
    if count > f64::from(u32::MAX) {
        return Err(LightingError::ComputationOverflow(format!(
            "{what} needs {count} fixtures, beyond the supported maximum"
        )));
    }
    Ok(count as u32)
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Pass `value` through if finite
pub fn ensure_finite(value: f64, what: &str) -> LightingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LightingError::ComputationOverflow(format!("{what} is not finite ({value})")))
    }
}

/// Pass `value` through if finite and strictly positive
pub fn ensure_positive(value: f64, what: &str) -> LightingResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LightingError::InvalidParameter(format!("{what} must be positive, got {value}")))
    }
}

/// Pass `value` through if it lies in (0, 1]
pub fn ensure_unit_factor(value: f64, what: &str) -> LightingResult<f64> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(LightingError::InvalidParameter(format!("{what} must lie in (0, 1], got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect() {
        let rect = Rect::from_dimensions(5.0, 4.0);
        assert_eq!(rect.area(), 20.0);
        assert_eq!(rect.size(), DVec2::new(5.0, 4.0));
        assert!(rect.contains_point(DVec2::new(5.0, 0.0)));
        assert!(!rect.contains_point(DVec2::new(5.1, 1.0)));
    }

    #[test]
    fn test_tan_half_angle_clamps() {
        assert!((tan_half_angle(90.0, 89.9) - 1.0).abs() < 1e-12);

        let wide = tan_half_angle(180.0, 89.9);
        assert!(wide.is_finite() && wide > 0.0);

        // Past 180 degrees the cap still holds instead of going negative
        assert_eq!(tan_half_angle(300.0, 89.9), wide);
    }

    #[test]
    fn test_ceil_count() {
        assert_eq!(ceil_count(4.87, "count").unwrap(), 5);
        assert_eq!(ceil_count(5.0, "count").unwrap(), 5);
        assert_eq!(ceil_count(0.2, "count").unwrap(), 1);
        assert!(matches!(ceil_count(f64::INFINITY, "count"), Err(LightingError::ComputationOverflow(_))));
        assert!(matches!(ceil_count(1e12, "count"), Err(LightingError::ComputationOverflow(_))));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(2.005001, 2), 2.01);
    }

    #[test]
    fn test_guards() {
        assert!(ensure_positive(1.0, "x").is_ok());
        assert!(ensure_positive(0.0, "x").is_err());
        assert!(ensure_positive(f64::NAN, "x").is_err());
        assert!(ensure_unit_factor(1.0, "mf").is_ok());
        assert!(ensure_unit_factor(0.0, "mf").is_err());
        assert!(ensure_unit_factor(f64::NAN, "mf").is_err());
    }
}
