//! # Section Geometry Formulas
//!
//! Geometric quantities of a rectangular reinforced concrete section.
//! Effective depths depend on the bar diameter currently being tried, so
//! they are recomputed on every search step rather than stored.
//!
//! ## Notation
//!
//! - `b` = Section width
//! - `h` = Overall section depth
//! - `c` = Nominal cover to the links
//! - `φ` = Longitudinal bar diameter
//! - `φw` = Link diameter
//! - `d` = Effective depth of the tension steel
//! - `d2` = Depth to the centroid of the compression steel
//!
//! ```text
//!     ┌───────────────┐  ─┬─
//!     │  ○         ○  │   │ d2
//!     │               │   │
//!   h │               │   │ d
//!     │               │   │
//!     │  ●   ●   ●    │  ─┴─
//!     └───────────────┘
//!             b
//! ```
//!
//! ## References
//!
//! - EN 1992-1-1:2004 Section 8.2 (spacing of bars)
//! - EN 1992-1-1:2004 Section 9.2.2 (shear reinforcement)

use crate::units::{Millimeters, SqMm};

/// Cross-sectional area A = b × h
///
/// # Example
/// ```rust
/// use rcbeam_core::equations::section::rectangular_area;
///
/// let area = rectangular_area(350.0, 350.0);
/// assert_eq!(area, 122_500.0);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Outer perimeter u = 2(b + h)
#[inline]
pub fn rectangular_perimeter(b: f64, h: f64) -> f64 {
    2.0 * (b + h)
}

/// Effective depth of the tension steel
///
/// # Formula
/// d = h − c − φw − φ/2
///
/// # Example
/// ```rust
/// use rcbeam_core::equations::section::effective_depth;
///
/// // 350 deep, 35 cover, 10 link, 16 bar
/// assert_eq!(effective_depth(350.0, 35.0, 10.0, 16.0), 297.0);
/// ```
#[inline]
pub fn effective_depth(h: f64, cover: f64, link_dia: f64, bar_dia: f64) -> f64 {
    let h = Millimeters(h);
    (h - Millimeters(cover) - Millimeters(link_dia) - Millimeters(bar_dia) / 2.0).value()
}

/// Depth to the centroid of the compression steel
///
/// # Formula
/// d2 = c + φw + φ2/2
#[inline]
pub fn compression_depth(cover: f64, link_dia: f64, bar_dia: f64) -> f64 {
    (Millimeters(cover) + Millimeters(link_dia) + Millimeters(bar_dia) / 2.0).value()
}

/// Width available for a row of bars, measured between the inside faces
/// of the links: b − 2c − 2φw
#[inline]
pub fn bar_row_width(b: f64, cover: f64, link_dia: f64) -> f64 {
    b - 2.0 * cover - 2.0 * link_dia
}

/// Clear spacing between `count` bars laid in one row
///
/// # Formula
/// s = (b − 2c − 2φw)/(n − 1) − φ
///
/// For a single bar there is no gap and the row width less the bar is
/// returned.
#[inline]
pub fn clear_bar_spacing(b: f64, cover: f64, link_dia: f64, bar_dia: f64, count: u32) -> f64 {
    let row = bar_row_width(b, cover, link_dia);
    if count <= 1 {
        return row - bar_dia;
    }
    row / f64::from(count - 1) - bar_dia
}

/// Governing minimum clear spacing between bars
///
/// # Formula
/// s_min = max(s_user, min(25, φ))
///
/// EN 1992-1-1 8.2(2) takes the larger of the bar diameter and 25 mm
/// (aggregate allowance omitted); the user option can only raise it.
#[inline]
pub fn minimum_clear_spacing(user_min: f64, bar_dia: f64) -> f64 {
    user_min.max(bar_dia.min(25.0))
}

/// Clear span between the outermost link legs: b − 2c − φw
#[inline]
pub fn link_leg_span(b: f64, cover: f64, link_dia: f64) -> f64 {
    b - 2.0 * cover - link_dia
}

/// Transverse spacing between `legs` link legs across the leg span
#[inline]
pub fn tangential_leg_spacing(span: f64, legs: u32) -> f64 {
    if legs <= 1 {
        return span;
    }
    span / f64::from(legs - 1)
}

/// Reinforcement ratio ρ = As / (b × h)
#[inline]
pub fn reinforcement_ratio(area: SqMm, b: f64, h: f64) -> f64 {
    area.value() / rectangular_area(b, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_and_perimeter() {
        assert_eq!(rectangular_area(300.0, 500.0), 150_000.0);
        assert_eq!(rectangular_perimeter(300.0, 500.0), 1600.0);
    }

    #[test]
    fn test_depths() {
        assert_eq!(effective_depth(350.0, 35.0, 10.0, 16.0), 297.0);
        assert_eq!(compression_depth(35.0, 10.0, 16.0), 53.0);
    }

    #[test]
    fn test_clear_spacing_decreases_with_count() {
        let mut last = f64::INFINITY;
        for n in 2..10 {
            let s = clear_bar_spacing(350.0, 35.0, 10.0, 16.0, n);
            assert!(s < last);
            last = s;
        }
        // (350 - 70 - 20)/1 - 16
        assert_eq!(clear_bar_spacing(350.0, 35.0, 10.0, 16.0, 2), 244.0);
    }

    #[test]
    fn test_minimum_clear_spacing() {
        assert_eq!(minimum_clear_spacing(50.0, 16.0), 50.0);
        assert_eq!(minimum_clear_spacing(10.0, 16.0), 16.0);
        assert_eq!(minimum_clear_spacing(10.0, 32.0), 25.0);
    }

    #[test]
    fn test_link_geometry() {
        assert_eq!(link_leg_span(350.0, 35.0, 10.0), 270.0);
        assert_eq!(tangential_leg_spacing(270.0, 3), 135.0);
        assert_eq!(tangential_leg_spacing(270.0, 1), 270.0);
    }

    #[test]
    fn test_reinforcement_ratio() {
        let rho = reinforcement_ratio(SqMm(1225.0), 350.0, 350.0);
        assert!((rho - 0.01).abs() < 1e-12);
    }
}
