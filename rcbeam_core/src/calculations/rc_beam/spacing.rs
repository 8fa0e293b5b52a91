//! Bar count for one reinforcement layer.
//!
//! Bars are laid in a single row between the links. The count grows from
//! two until the area is met, unless the clear gap falls below the
//! governing minimum first. A result of zero tells the bar search that the
//! current diameter cannot work and the next catalog size must be tried.

use crate::equations::section::{bar_row_width, clear_bar_spacing, minimum_clear_spacing};
use crate::materials::bars_area;

/// Smallest layer the designer places
pub const MIN_BARS_PER_LAYER: u32 = 2;

/// Number of bars of `bar_dia` needed to provide `area_required`, or zero
/// when they cannot be spaced across the section.
///
/// # Arguments
/// * `area_required` - Required steel area (mm²)
/// * `bar_dia` - Bar diameter being tried (mm)
/// * `min_spacing` - User minimum clear spacing (mm)
/// * `cover` - Nominal cover (mm)
/// * `width` - Section width (mm)
/// * `link_dia` - Link diameter (mm)
///
/// # Example
/// ```rust
/// use rcbeam_core::calculations::rc_beam::spacing::bars_required;
///
/// // 189 mm² in a 350 wide beam: two 16 mm bars
/// assert_eq!(bars_required(189.2, 16.0, 50.0, 35.0, 350.0, 10.0), 2);
/// ```
pub fn bars_required(
    area_required: f64,
    bar_dia: f64,
    min_spacing: f64,
    cover: f64,
    width: f64,
    link_dia: f64,
) -> u32 {
    let governing = minimum_clear_spacing(min_spacing, bar_dia);
    let row = bar_row_width(width, cover, link_dia);

    // n ≤ row/(φ + s) + 1 is the most that can fit; one more than that
    // always fails the spacing test and closes the loop.
    let fit = (row / (bar_dia + governing)).floor().max(0.0) as u32 + 1;
    let max_count = fit.max(MIN_BARS_PER_LAYER) + 1;

    for count in MIN_BARS_PER_LAYER..=max_count {
        if clear_bar_spacing(width, cover, link_dia, bar_dia, count) < governing {
            return 0;
        }
        if bars_area(count, bar_dia) >= area_required {
            return count;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_two_bars() {
        assert_eq!(bars_required(10.0, 16.0, 50.0, 35.0, 350.0, 10.0), 2);
        assert_eq!(bars_required(0.0, 16.0, 50.0, 35.0, 350.0, 10.0), 2);
    }

    #[test]
    fn test_count_grows_with_area() {
        // 3 × 201.06 = 603.2 mm²
        assert_eq!(bars_required(600.0, 16.0, 50.0, 35.0, 350.0, 10.0), 3);
        assert_eq!(bars_required(610.0, 16.0, 50.0, 35.0, 350.0, 10.0), 4);
    }

    #[test]
    fn test_zero_when_spacing_fails() {
        // Row width 260: 4 × 16 gives 260/3 - 16 = 70.7, 5 gives 49 < 50
        assert_eq!(bars_required(804.0, 16.0, 50.0, 35.0, 350.0, 10.0), 4);
        assert_eq!(bars_required(900.0, 16.0, 50.0, 35.0, 350.0, 10.0), 0);
    }

    #[test]
    fn test_zero_when_section_too_narrow() {
        assert_eq!(bars_required(100.0, 16.0, 50.0, 35.0, 100.0, 10.0), 0);
        assert_eq!(bars_required(100.0, 16.0, 50.0, 60.0, 100.0, 10.0), 0);
    }

    #[test]
    fn test_unbounded_demand_terminates() {
        assert_eq!(bars_required(f64::INFINITY, 16.0, 50.0, 35.0, 350.0, 10.0), 0);
        assert_eq!(bars_required(f64::NAN, 16.0, 50.0, 35.0, 350.0, 10.0), 0);
    }

    #[test]
    fn test_larger_bars_fewer_count() {
        let small = bars_required(1200.0, 16.0, 25.0, 35.0, 500.0, 10.0);
        let large = bars_required(1200.0, 25.0, 25.0, 35.0, 500.0, 10.0);
        assert!(small > 0 && large > 0);
        assert!(large < small);
    }
}
