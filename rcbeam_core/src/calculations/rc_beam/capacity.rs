//! # Shear and Torsion Capacity
//!
//! Two checks run after bending is settled:
//!
//! 1. **Strut crushing** - the strut angle θ is increased from π/8 in
//!    0.01 rad steps until the combined shear and torsion utilisation
//!    against V_Rd,max and T_Rd,max drops below one. The last step is
//!    clamped to π/4; failing there means the section is too small.
//! 2. **Concrete resistance** - if the unreinforced section cannot carry
//!    the torsion together with the shear, longitudinal torsion steel is
//!    sized at the accepted θ.
//!
//! The accepted θ and lever arm are handed on to the link design.

use serde::{Deserialize, Serialize};

use crate::equations::registry::Equation;
use crate::equations::section::reinforcement_ratio;
use crate::equations::shear_torsion::{
    interaction_ratio, longitudinal_torsion_steel, shear_resistance_concrete, shear_resistance_max,
    torsion_resistance_concrete, torsion_resistance_max, torsion_section, TorsionSection, THETA_MAX,
    THETA_MIN, THETA_STEP,
};
use crate::trace::{DesignTrace, TraceEntry};
use crate::units::{Degrees, Radians, SqMm};

use super::bending::BendingSummary;
use super::{DesignFailure, SectionContext};

/// Strut crushing check at one angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrutCheck {
    /// Strut angle θ (rad)
    pub theta_rad: f64,
    /// T_Rd,max (kNm)
    pub t_rd_max_knm: f64,
    /// V_Rd,max (kN)
    pub v_rd_max_kn: f64,
    /// T_Ed/T_Rd,max + V_Ed/V_Rd,max
    pub ratio: f64,
}

impl StrutCheck {
    pub fn theta_degrees(&self) -> f64 {
        Degrees::from(Radians(self.theta_rad)).value()
    }

    pub fn passes(&self) -> bool {
        self.ratio < 1.0
    }
}

/// Numbers of the shear and torsion stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySummary {
    /// Equivalent thin-walled section
    pub section: TorsionSection,
    /// Accepted strut check
    pub strut: StrutCheck,
    /// Concrete torsional resistance T_Rd,c (kNm)
    pub t_rd_c_knm: f64,
    /// Concrete shear resistance V_Rd,c (kN)
    pub v_rd_c_kn: f64,
    /// T_Ed/T_Rd,c + V_Ed/V_Rd,c
    pub concrete_ratio: f64,
    /// Additional longitudinal torsion steel ΣA_sl (mm²), when required
    pub a_sl_mm2: Option<f64>,
}

impl CapacitySummary {
    /// Accepted strut angle (rad)
    pub fn theta(&self) -> f64 {
        self.strut.theta_rad
    }
}

/// Largest number of angle evaluations between π/8 and π/4
pub fn max_angle_steps() -> usize {
    ((THETA_MAX - THETA_MIN) / THETA_STEP).ceil() as usize + 1
}

/// Evaluate the strut crushing check at `theta`.
pub fn strut_check(ctx: &SectionContext, section: &TorsionSection, z: f64, theta: f64) -> StrutCheck {
    let fck = ctx.materials.fck;
    let fcd = ctx.materials.fcd;
    let t_rd_max = torsion_resistance_max(section, fck, fcd, theta).value();
    let v_rd_max = shear_resistance_max(ctx.width, z, fck, fcd, theta).value();
    StrutCheck {
        theta_rad: theta,
        t_rd_max_knm: t_rd_max,
        v_rd_max_kn: v_rd_max,
        ratio: interaction_ratio(ctx.shear.value(), v_rd_max, ctx.torsion.value(), t_rd_max),
    }
}

/// Walk θ from π/8 towards π/4 until the strut check passes.
///
/// Returns the passing check, or the check at π/4 when none passes.
pub fn search_strut_angle(ctx: &SectionContext, section: &TorsionSection, z: f64) -> Result<StrutCheck, StrutCheck> {
    let mut theta = THETA_MIN;
    let mut check = strut_check(ctx, section, z, theta);

    for _ in 0..max_angle_steps() {
        if check.passes() {
            return Ok(check);
        }
        if theta >= THETA_MAX {
            break;
        }
        theta = (theta + THETA_STEP).min(THETA_MAX);
        check = strut_check(ctx, section, z, theta);
    }

    if check.passes() {
        Ok(check)
    } else {
        Err(check)
    }
}

/// Run both capacity checks and record them in the trace.
///
/// # Errors
///
/// `DesignFailure::SectionCapacityExceeded` when the strut check fails at π/4.
pub fn solve(
    ctx: &SectionContext,
    bending: &BendingSummary,
    trace: &mut DesignTrace,
) -> Result<CapacitySummary, DesignFailure> {
    let section = torsion_section(
        ctx.width,
        ctx.depth,
        ctx.cover,
        ctx.link_diameter,
        bending.tension.diameter_mm,
    );

    let strut = match search_strut_angle(ctx, &section, bending.flexure.z) {
        Ok(strut) => {
            trace.push(strut_entry(&section, &strut).conclusion("Pass").pass());
            strut
        }
        Err(strut) => {
            trace.push(
                strut_entry(&section, &strut)
                    .conclusion("Max capacity of section exceeded, Increase section size")
                    .fail(),
            );
            return Err(DesignFailure::SectionCapacityExceeded { ratio: strut.ratio });
        }
    };

    let t_rd_c = torsion_resistance_concrete(&section, ctx.materials.fctd).value();
    let rho_l = reinforcement_ratio(SqMm(bending.as_prov_mm2), ctx.width, ctx.depth);
    let v_rd_c = shear_resistance_concrete(ctx.width, bending.flexure.d, rho_l, ctx.materials.fck).value();
    let concrete_ratio = interaction_ratio(ctx.shear.value(), v_rd_c, ctx.torsion.value(), t_rd_c);

    let mut summary = CapacitySummary {
        section,
        strut,
        t_rd_c_knm: t_rd_c,
        v_rd_c_kn: v_rd_c,
        concrete_ratio,
        a_sl_mm2: None,
    };

    if ctx.torsion.value() > 0.0 && concrete_ratio > 1.0 {
        trace.push(
            concrete_entry(&summary, "> 1").conclusion("Additional torsional reinforcement required"),
        );

        let a_sl = longitudinal_torsion_steel(ctx.torsion, strut.theta_rad, &section, ctx.materials.rebar.fyd);
        summary.a_sl_mm2 = Some(a_sl);
        trace.push(
            TraceEntry::new("Additional steel requirements")
                .reference(Equation::TorsionLongitudinalSteel.clause())
                .expr(format!(
                    "A_sl = (T_Ed cot\\theta u_k)/(2 f_yd A_k) = {:.2} mm^2",
                    a_sl
                ))
                .conclusion("Additional steel to be distributed around section perimeter"),
        );
    } else {
        trace.push(
            concrete_entry(&summary, "<= 1")
                .conclusion("No additional torsion reinforcement required")
                .pass(),
        );
    }

    Ok(summary)
}

fn strut_entry(section: &TorsionSection, strut: &StrutCheck) -> TraceEntry {
    let bound = if strut.passes() { "< 1" } else { ">= 1" };
    TraceEntry::new("Shear and Torsional max capacity")
        .reference(Equation::ShearTorsionMax.clause())
        .expr(format!("t_ef = max(A/u, 2(c + \\phi_link + 0.5\\phi)) = {:.1} mm", section.t_eff))
        .expr(format!("A_k = (b - t_ef)(h - t_ef) = {:.1} mm^2", section.a_k))
        .expr(format!("u_k = 2(b + h - 2t_ef) = {:.1} mm", section.u_k))
        .expr(format!("\\theta = {:.4} deg", strut.theta_degrees()))
        .expr(format!(
            "T_Rd,max = 2 \\nu \\alpha_cw f_cd A_k t_ef sin\\theta cos\\theta = {:.2} kNm",
            strut.t_rd_max_knm
        ))
        .expr(format!(
            "V_Rd,max = (\\alpha_cw b_w z \\nu_1 f_cd)/(cot\\theta + tan\\theta) = {:.2} kN",
            strut.v_rd_max_kn
        ))
        .expr(format!("T_Ed/T_Rd,max + V_Ed/V_Rd,max = {:.4} {}", strut.ratio, bound))
}

fn concrete_entry(summary: &CapacitySummary, bound: &str) -> TraceEntry {
    TraceEntry::new("Shear and Torsional resistance concrete")
        .reference(Equation::ShearTorsionConcrete.clause())
        .expr(format!("T_Rd,c = 4 (2 f_ctd A_k t_ef) = {:.2} kNm", summary.t_rd_c_knm))
        .expr(format!("V_Rd,c = b_w d C_Rd,c k (100 \\rho_l f_ck)^(1/3) = {:.2} kN", summary.v_rd_c_kn))
        .expr(format!("T_Ed/T_Rd,c + V_Ed/V_Rd,c = {:.3} {}", summary.concrete_ratio, bound))
}
