//! # Shear Link Design
//!
//! Chooses the number of legs and the longitudinal spacing of vertical
//! links of the selected diameter.
//!
//! ## Procedure
//!
//! 1. Start from two legs at the largest 25 mm multiple not above 0.75d.
//! 2. Add legs until the transverse leg spacing is within s_t,max.
//! 3. Tighten until the minimum link ratio is met, then until
//!    V_Rd,s > V_Ed.
//!
//! Tightening reduces the spacing by 25 mm. When that would take it below
//! the minimum link spacing, a leg is added instead and the spacing goes
//! back to its base value. A leg can only be added while the legs stay at
//! least the minimum spacing apart, so the search always ends.

use serde::{Deserialize, Serialize};

use crate::equations::registry::Equation;
use crate::equations::section::{link_leg_span, tangential_leg_spacing};
use crate::equations::shear_torsion::{
    link_area, link_base_spacing, link_ratio, link_resistance, max_leg_spacing, minimum_link_ratio,
};
use crate::trace::{DesignTrace, TraceEntry};

use super::{DesignFailure, SectionContext};

/// Step by which the link spacing is reduced (mm)
pub const SPACING_STEP_MM: f64 = 25.0;

/// Fewest legs a link can have
pub const MIN_LEGS: u32 = 2;

const NARROW_SECTION: &str = "Section cannot accommodate shear link, increase section width";
const SHALLOW_SECTION: &str = "Section cannot accommodate shear link spacing, increase section depth";
const OVERLOADED: &str = "Shear link cannot accommodate load, try increasing link diameter or section size";

/// Accepted shear link arrangement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkSelection {
    /// Link diameter (mm)
    pub diameter_mm: f64,
    /// Number of vertical legs
    pub legs: u32,
    /// Longitudinal spacing (mm)
    pub spacing_mm: f64,
    /// Transverse spacing between legs (mm)
    pub leg_spacing_mm: f64,
    /// Shear reinforcement ratio ρw
    pub rho_w: f64,
    /// Minimum ratio ρw,min
    pub rho_w_min: f64,
    /// Link resistance V_Rd,s (kN)
    pub v_rds_kn: f64,
}

/// Link geometry limits for one section
#[derive(Debug, Clone, Copy)]
struct LinkLimits {
    span: f64,
    base_spacing: f64,
    min_spacing: f64,
    max_leg_spacing: f64,
}

/// Current legs and spacing
#[derive(Debug, Clone, Copy)]
struct LinkLayout {
    legs: u32,
    spacing: f64,
    base_spacing: f64,
}

impl LinkLayout {
    fn can_add_leg(&self, limits: &LinkLimits) -> bool {
        tangential_leg_spacing(limits.span, self.legs + 1) >= limits.min_spacing
    }

    /// Reduce the spacing, or add a leg once the spacing is at its minimum.
    /// `false` when neither is possible.
    fn tighten(&mut self, limits: &LinkLimits) -> bool {
        if self.spacing - SPACING_STEP_MM < limits.min_spacing {
            if !self.can_add_leg(limits) {
                return false;
            }
            self.legs += 1;
            self.spacing = self.base_spacing;
        } else {
            self.spacing -= SPACING_STEP_MM;
        }
        true
    }
}

/// Design the links for the accepted strut angle and lever arm.
///
/// # Arguments
/// * `ctx` - Section, materials and demand
/// * `d` - Effective depth (mm)
/// * `z` - Lever arm (mm)
/// * `theta` - Strut angle (rad)
///
/// # Errors
///
/// `DesignFailure::ReinforcementLayoutInfeasible` when the section is too
/// narrow or shallow for links, or no arrangement reaches V_Ed.
pub fn solve(
    ctx: &SectionContext,
    d: f64,
    z: f64,
    theta: f64,
    trace: &mut DesignTrace,
) -> Result<LinkSelection, DesignFailure> {
    let dia = ctx.link_diameter;
    let b = ctx.width;
    let v_ed = ctx.shear.value();
    let fyd = ctx.materials.rebar.fyd;

    let span = link_leg_span(b, ctx.cover, dia);
    if span <= 0.0 {
        return Err(fail(
            trace,
            TraceEntry::new(NARROW_SECTION).expr(format!("b - 2c - \\phi_link = {:.1} mm <= 0", span)),
            "No room for two link legs",
        ));
    }

    let limits = LinkLimits {
        span,
        base_spacing: link_base_spacing(d),
        min_spacing: ctx.min_link_spacing,
        max_leg_spacing: max_leg_spacing(d),
    };
    if limits.base_spacing < limits.min_spacing {
        return Err(fail(
            trace,
            TraceEntry::new(SHALLOW_SECTION)
                .reference(Equation::LinkSpacing.clause())
                .expr(format!(
                    "s_l,max = {:.0} mm < s_min = {:.0} mm",
                    limits.base_spacing, limits.min_spacing
                )),
            "Maximum link spacing is below the minimum link spacing",
        ));
    }

    let mut layout = LinkLayout {
        legs: MIN_LEGS,
        spacing: limits.base_spacing,
        base_spacing: limits.base_spacing,
    };

    while tangential_leg_spacing(span, layout.legs) > limits.max_leg_spacing {
        if !layout.can_add_leg(&limits) {
            return Err(fail(
                trace,
                TraceEntry::new(NARROW_SECTION)
                    .reference(Equation::LinkSpacing.clause())
                    .expr(format!(
                        "s_t = {:.1} mm > s_t,max = {:.1} mm",
                        tangential_leg_spacing(span, layout.legs),
                        limits.max_leg_spacing
                    )),
                "Leg spacing limits cannot both be met",
            ));
        }
        layout.legs += 1;
    }

    let rho_w_min = minimum_link_ratio(ctx.materials.fck, ctx.materials.rebar.fyk);
    let rho_w = |l: &LinkLayout| link_ratio(link_area(l.legs, dia), l.spacing, b);
    while rho_w(&layout) < rho_w_min {
        if !layout.tighten(&limits) {
            return Err(fail(
                trace,
                TraceEntry::new(OVERLOADED)
                    .reference(Equation::MinimumLinkRatio.clause())
                    .expr(format!("\\rho_w = {:.4} < \\rho_w,min = {:.4}", rho_w(&layout), rho_w_min)),
                "Minimum link ratio cannot be provided",
            ));
        }
    }
    // Later resets must not drop back below the minimum ratio
    layout.base_spacing = layout.spacing;

    let v_rds = |l: &LinkLayout| link_resistance(link_area(l.legs, dia), l.spacing, z, fyd, theta).value();
    while v_rds(&layout) <= v_ed {
        if !layout.tighten(&limits) {
            return Err(fail(
                trace,
                TraceEntry::new(OVERLOADED)
                    .reference(Equation::LinkResistance.clause())
                    .expr(format!(
                        "V_Rd,s = {:.2} kN <= V_Ed = {:.2} kN with {} legs at {:.0} mm",
                        v_rds(&layout),
                        v_ed,
                        layout.legs,
                        layout.spacing
                    )),
                "Links cannot reach the design shear",
            ));
        }
    }

    let selection = LinkSelection {
        diameter_mm: dia,
        legs: layout.legs,
        spacing_mm: layout.spacing,
        leg_spacing_mm: tangential_leg_spacing(span, layout.legs),
        rho_w: rho_w(&layout),
        rho_w_min,
        v_rds_kn: v_rds(&layout),
    };
    trace.push(
        TraceEntry::new("Shear link requirements")
            .reference(Equation::LinkResistance.clause())
            .expr(format!("link diameter = {:.0} mm", selection.diameter_mm))
            .expr(format!("s = {:.0} mm", selection.spacing_mm))
            .expr(format!("n_legs = {}", selection.legs))
            .expr(format!(
                "\\rho_w = {:.4} >= \\rho_w,min = {:.4}",
                selection.rho_w, selection.rho_w_min
            ))
            .expr(format!(
                "V_Rd,s = (A_sw/s) z f_ywd cot\\theta = {:.2} kN",
                selection.v_rds_kn
            ))
            .conclusion("Pass")
            .pass(),
    );
    Ok(selection)
}

fn fail(trace: &mut DesignTrace, entry: TraceEntry, reason: &str) -> DesignFailure {
    trace.push(entry.conclusion("Fail").fail());
    DesignFailure::ReinforcementLayoutInfeasible {
        element: "links".to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::rc_beam::test_support::{context, context_with_loads};
    use crate::equations::shear_torsion::{THETA_MAX, THETA_MIN};
    use crate::trace::TraceStatus;

    #[test]
    fn test_light_shear_three_legs() {
        let ctx = context(350.0, 350.0, 10.0);
        let mut trace = DesignTrace::new();
        let links = solve(&ctx, 297.0, 282.15, THETA_MIN, &mut trace).unwrap();

        // 270 mm span exceeds s_t,max = 222.75 with two legs
        assert_eq!(links.legs, 3);
        assert_eq!(links.spacing_mm, 200.0);
        assert!((links.v_rds_kn - 348.9).abs() < 0.5);
        assert!(links.rho_w >= links.rho_w_min);

        let entry = trace.last().unwrap();
        assert_eq!(entry.narrative, "Shear link requirements");
        assert_eq!(entry.reference.as_deref(), Some("(6.8)"));
        assert_eq!(entry.status, TraceStatus::Pass);
    }

    #[test]
    fn test_spacing_tightens_before_adding_legs() {
        // 348.9 kN at 200 mm is not enough for 390 kN, 398.7 kN at 175 mm is
        let ctx = context_with_loads(350.0, 350.0, 10.0, 390.0, 0.0);
        let mut trace = DesignTrace::new();
        let links = solve(&ctx, 297.0, 282.15, THETA_MIN, &mut trace).unwrap();

        assert_eq!(links.legs, 3);
        assert_eq!(links.spacing_mm, 175.0);
        assert!(links.v_rds_kn > 390.0);
    }

    #[test]
    fn test_leg_added_at_minimum_spacing() {
        // Three legs at 100 mm give ~698 kN at π/8; demand above that needs a
        // fourth leg, which fits in a 500 wide section
        let ctx = context_with_loads(500.0, 350.0, 10.0, 720.0, 0.0);
        let mut trace = DesignTrace::new();
        let links = solve(&ctx, 297.0, 282.15, THETA_MIN, &mut trace).unwrap();

        assert_eq!(links.legs, 4);
        assert_eq!(links.spacing_mm, 125.0);
        assert!(links.v_rds_kn > 720.0);
    }

    #[test]
    fn test_load_beyond_links() {
        let ctx = context_with_loads(350.0, 350.0, 10.0, 5000.0, 0.0);
        let mut trace = DesignTrace::new();
        let failure = solve(&ctx, 297.0, 282.15, THETA_MAX, &mut trace).unwrap_err();

        assert!(matches!(failure, DesignFailure::ReinforcementLayoutInfeasible { .. }));
        let entry = trace.last().unwrap();
        assert_eq!(entry.narrative, OVERLOADED);
        assert_eq!(entry.status, TraceStatus::Fail);
    }

    #[test]
    fn test_section_too_narrow() {
        let ctx = context(80.0, 350.0, 10.0);
        let mut trace = DesignTrace::new();
        let failure = solve(&ctx, 297.0, 282.15, THETA_MIN, &mut trace).unwrap_err();

        assert!(matches!(failure, DesignFailure::ReinforcementLayoutInfeasible { .. }));
        assert_eq!(trace.last().unwrap().narrative, NARROW_SECTION);
    }

    #[test]
    fn test_shallow_section() {
        // 0.75 × 120 = 90 -> 75 mm < 100 mm minimum
        let ctx = context(350.0, 200.0, 1.0);
        let mut trace = DesignTrace::new();
        let failure = solve(&ctx, 120.0, 114.0, THETA_MIN, &mut trace).unwrap_err();

        assert!(matches!(failure, DesignFailure::ReinforcementLayoutInfeasible { .. }));
        assert_eq!(trace.last().unwrap().narrative, SHALLOW_SECTION);
    }

    #[test]
    fn test_layout_tighten() {
        let limits = LinkLimits {
            span: 420.0,
            base_spacing: 200.0,
            min_spacing: 100.0,
            max_leg_spacing: 222.75,
        };
        let mut layout = LinkLayout {
            legs: 3,
            spacing: 125.0,
            base_spacing: 200.0,
        };
        assert!(layout.tighten(&limits));
        assert_eq!(layout.spacing, 100.0);
        // 100 - 25 < 100: add a leg and reset
        assert!(layout.tighten(&limits));
        assert_eq!((layout.legs, layout.spacing), (4, 200.0));

        // 420/5 = 84 < 100: no sixth leg
        layout.legs = 5;
        layout.spacing = 100.0;
        assert!(!layout.tighten(&limits));
    }
}
