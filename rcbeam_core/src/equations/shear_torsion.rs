//! # Shear and Torsion Formulas (EN 1992-1-1 Sections 6.2 and 6.3)
//!
//! Variable strut inclination truss model for members with shear
//! reinforcement, the thin-walled closed section model for torsion, and
//! the concrete-only resistances used to decide whether torsion steel is
//! needed.
//!
//! ## Units
//!
//! Inputs are in mm and N/mm². Forces are returned in kN and torsional
//! moments in kNm, matching the load demand.
//!
//! ## Notation
//!
//! - `θ` = Angle between the concrete struts and the beam axis
//! - `t_ef` = Effective wall thickness of the equivalent hollow section
//! - `A_k` = Area enclosed by the wall centre-line
//! - `u_k` = Perimeter of `A_k`
//! - `ν`, `ν1` = Strength reduction factors for concrete cracked in shear

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::materials::GAMMA_C;
use crate::units::{KilonewtonMeters, Kilonewtons, Millimeters, NewtonMillimeters, Newtons, SqMm};

use super::section::{rectangular_area, rectangular_perimeter};

/// Lower bound of the strut angle search, cot θ = 2.5 (21.8°) rounded to π/8
pub const THETA_MIN: f64 = PI / 8.0;

/// Upper bound of the strut angle search, cot θ = 1
pub const THETA_MAX: f64 = PI / 4.0;

/// Strut angle increment (rad)
pub const THETA_STEP: f64 = 0.01;

/// Upper limit of ρl in the concrete shear resistance
pub const RHO_L_MAX: f64 = 0.02;

/// Coefficient for the stress state in the compression chord, αcw
const ALPHA_CW: f64 = 1.0;

/// Effective hollow section used for torsion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorsionSection {
    /// Effective wall thickness t_ef (mm)
    pub t_eff: f64,
    /// Enclosed area A_k (mm²)
    pub a_k: f64,
    /// Perimeter of the enclosed area u_k (mm)
    pub u_k: f64,
}

/// Thin-walled section properties (EN 1992-1-1 6.3.2(1))
///
/// # Formula
/// ```text
/// t_ef = max(A/u, 2·(c + φw + φ/2))
/// A_k  = (b − t_ef)(h − t_ef)
/// u_k  = 2(b + h − 2·t_ef)
/// ```
///
/// The lower bound on t_ef is twice the distance from the face to the
/// centre of the longitudinal bars.
pub fn torsion_section(b: f64, h: f64, cover: f64, link_dia: f64, bar_dia: f64) -> TorsionSection {
    let t_from_area = rectangular_area(b, h) / rectangular_perimeter(b, h);
    let t_from_bars = 2.0 * (cover + link_dia + bar_dia / 2.0);
    let t_eff = t_from_area.max(t_from_bars);
    TorsionSection {
        t_eff,
        a_k: (b - t_eff) * (h - t_eff),
        u_k: 2.0 * (b + h - 2.0 * t_eff),
    }
}

/// Strength reduction factor for torsion, ν = 0.6(1 − fck/250)
pub fn nu(fck: f64) -> f64 {
    0.6 * (1.0 - fck / 250.0)
}

/// Strength reduction factor for shear, ν1 (EN 1992-1-1 6.2.3(3) Note 1)
///
/// 0.6 for fck ≤ 60, otherwise 0.9 − fck/250.
pub fn nu1(fck: f64) -> f64 {
    if fck > 60.0 {
        0.9 - fck / 250.0
    } else {
        0.6
    }
}

/// Maximum torsional resistance moment (6.30)
///
/// # Formula
/// T_Rd,max = 2·ν·αcw·fcd·A_k·t_ef·sin θ·cos θ
pub fn torsion_resistance_max(section: &TorsionSection, fck: f64, fcd: f64, theta: f64) -> KilonewtonMeters {
    let t = 2.0 * nu(fck) * ALPHA_CW * fcd * section.a_k * section.t_eff * theta.sin() * theta.cos();
    NewtonMillimeters(t).into()
}

/// Maximum shear resistance limited by strut crushing (6.9)
///
/// # Formula
/// V_Rd,max = αcw·b·z·ν1·fcd / (cot θ + tan θ)
pub fn shear_resistance_max(b: f64, z: f64, fck: f64, fcd: f64, theta: f64) -> Kilonewtons {
    let v = ALPHA_CW * b * z * nu1(fck) * fcd / (theta.tan() + 1.0 / theta.tan());
    Newtons(v).into()
}

/// Combined utilisation V/V_Rd + T/T_Rd (6.29 and 6.31)
///
/// A term with zero demand contributes nothing, whatever its resistance.
/// Demand against a non-positive resistance is unbounded.
///
/// # Example
/// ```rust
/// use rcbeam_core::equations::shear_torsion::interaction_ratio;
///
/// assert_eq!(interaction_ratio(50.0, 100.0, 0.0, 20.0), 0.5);
/// assert_eq!(interaction_ratio(50.0, 100.0, 0.0, 0.0), 0.5);
/// ```
pub fn interaction_ratio(v_ed: f64, v_rd: f64, t_ed: f64, t_rd: f64) -> f64 {
    let term = |demand: f64, resistance: f64| match (demand > 0.0, resistance > 0.0) {
        (false, _) => 0.0,
        (true, true) => demand / resistance,
        (true, false) => f64::INFINITY,
    };
    term(v_ed, v_rd) + term(t_ed, t_rd)
}

/// Torsional cracking moment of the concrete section
///
/// # Formula
/// T_Rd,c = 4 × (2·A_k·fctd·t_ef)
///
/// The shear flow capacity of one wall is multiplied by the four walls of
/// the rectangle.
pub fn torsion_resistance_concrete(section: &TorsionSection, fctd: f64) -> KilonewtonMeters {
    let t = 4.0 * (2.0 * section.a_k * fctd * section.t_eff);
    NewtonMillimeters(t).into()
}

/// Size effect factor k = min(1 + √(200/d), 2)
pub fn size_factor(d: f64) -> f64 {
    (1.0 + (200.0 / d).sqrt()).min(2.0)
}

/// Design shear stress resistance without shear reinforcement (6.2.2(1))
///
/// # Formula
/// ```text
/// v_Rd,c = max(C_Rd,c·k·(100·ρl·fck)^(1/3), v_min)
/// C_Rd,c = 0.18/γc
/// v_min  = 0.035·k^(3/2)·fck^(1/2)
/// ```
///
/// ρl is capped at 0.02.
pub fn shear_stress_resistance_concrete(rho_l: f64, d: f64, fck: f64) -> f64 {
    let k = size_factor(d);
    let rho_l = rho_l.min(RHO_L_MAX);
    let c_rdc = 0.18 / GAMMA_C;
    let v_rdc = c_rdc * k * (100.0 * rho_l * fck).cbrt();
    let v_min = 0.035 * k.powf(1.5) * fck.sqrt();
    v_rdc.max(v_min)
}

/// Shear resistance of the concrete section, V_Rd,c = b·d·v_Rd,c
pub fn shear_resistance_concrete(b: f64, d: f64, rho_l: f64, fck: f64) -> Kilonewtons {
    Newtons(b * d * shear_stress_resistance_concrete(rho_l, d, fck)).into()
}

/// Additional longitudinal steel for torsion (6.28)
///
/// # Formula
/// ΣA_sl = T_Ed·cot θ·u_k / (2·A_k·fyd)
pub fn longitudinal_torsion_steel(t_ed: KilonewtonMeters, theta: f64, section: &TorsionSection, fyd: f64) -> f64 {
    let t = NewtonMillimeters::from(t_ed).value();
    t / theta.tan() * section.u_k / (2.0 * section.a_k * fyd)
}

// =============================================================================
// SHEAR LINKS
// =============================================================================

/// Maximum longitudinal link spacing s_l,max = 0.75d, rounded down to a
/// 25 mm multiple (9.2.2(6))
pub fn link_base_spacing(d: f64) -> f64 {
    (0.75 * d / 25.0).floor() * 25.0
}

/// Maximum transverse spacing of link legs s_t,max = min(0.75d, 600) (9.2.2(8))
pub fn max_leg_spacing(d: f64) -> f64 {
    (0.75 * d).min(600.0)
}

/// Link area per spacing A_sw = n·π/4·φw²
pub fn link_area(legs: u32, link_dia: f64) -> f64 {
    SqMm::of_bar(Millimeters(link_dia)).value() * f64::from(legs)
}

/// Shear reinforcement ratio ρw = A_sw / (s·b) (9.4)
pub fn link_ratio(asw: f64, spacing: f64, b: f64) -> f64 {
    asw / (spacing * b)
}

/// Minimum shear reinforcement ratio ρw,min = 0.08·√fck / fyk (9.5N)
pub fn minimum_link_ratio(fck: f64, fyk: f64) -> f64 {
    0.08 * fck.sqrt() / fyk
}

/// Shear resistance of vertical links (6.8)
///
/// # Formula
/// V_Rd,s = (A_sw/s)·z·fywd·cot θ
pub fn link_resistance(asw: f64, spacing: f64, z: f64, fywd: f64, theta: f64) -> Kilonewtons {
    Newtons(asw / spacing * z * fywd / theta.tan()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_350() -> TorsionSection {
        torsion_section(350.0, 350.0, 35.0, 10.0, 16.0)
    }

    #[test]
    fn test_torsion_section() {
        let s = section_350();
        // 2(35 + 10 + 8) = 106 governs over A/u = 87.5
        assert!((s.t_eff - 106.0).abs() < 1e-9);
        assert!((s.a_k - 244.0 * 244.0).abs() < 1e-9);
        assert!((s.u_k - 976.0).abs() < 1e-9);
    }

    #[test]
    fn test_nu_factors() {
        assert!((nu(40.0) - 0.504).abs() < 1e-12);
        assert_eq!(nu1(40.0), 0.6);
        assert_eq!(nu1(60.0), 0.6);
        assert!((nu1(70.0) - 0.62).abs() < 1e-12);
    }

    #[test]
    fn test_shear_resistance_max() {
        let fcd = 0.85 * 40.0 / 1.5;
        let v = shear_resistance_max(350.0, 282.15, 40.0, fcd, THETA_MIN);
        assert!((v.value() - 474.8).abs() < 0.5);

        // Resistance peaks at 45 degrees
        let v45 = shear_resistance_max(350.0, 282.15, 40.0, fcd, THETA_MAX);
        assert!(v45.value() > v.value());
        assert!((v45.value() - 671.5).abs() < 0.5);
    }

    #[test]
    fn test_torsion_resistance_max_grows_with_theta() {
        let s = section_350();
        let fcd = 0.85 * 40.0 / 1.5;
        let t1 = torsion_resistance_max(&s, 40.0, fcd, THETA_MIN);
        let t2 = torsion_resistance_max(&s, 40.0, fcd, THETA_MAX);
        assert!(t2.value() > t1.value());
    }

    #[test]
    fn test_concrete_shear_resistance() {
        // 2 × 16 mm in 350 x 350 at C40, d = 297
        let rho = 402.12 / 122_500.0;
        let v = shear_resistance_concrete(350.0, 297.0, rho, 40.0);
        assert!((v.value() - 56.5).abs() < 0.5);
    }

    #[test]
    fn test_size_factor_capped() {
        assert_eq!(size_factor(100.0), 2.0);
        assert!(size_factor(800.0) < 2.0);
    }

    #[test]
    fn test_rho_l_capped() {
        let a = shear_stress_resistance_concrete(0.02, 300.0, 40.0);
        let b = shear_stress_resistance_concrete(0.05, 300.0, 40.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_link_spacing_limits() {
        // 0.75 × 297 = 222.75 -> 200
        assert_eq!(link_base_spacing(297.0), 200.0);
        assert_eq!(link_base_spacing(400.0), 300.0);
        assert_eq!(max_leg_spacing(297.0), 222.75);
        assert_eq!(max_leg_spacing(1000.0), 600.0);
    }

    #[test]
    fn test_link_resistance() {
        let asw = link_area(3, 10.0);
        let fyd = 500.0 / 1.15;
        let v = link_resistance(asw, 200.0, 282.15, fyd, THETA_MIN);
        assert!((v.value() - 348.9).abs() < 0.5);
    }

    #[test]
    fn test_minimum_link_ratio() {
        let rho_min = minimum_link_ratio(40.0, 500.0);
        assert!((rho_min - 0.001012).abs() < 1e-6);
        let rho = link_ratio(link_area(2, 10.0), 200.0, 350.0);
        assert!(rho > rho_min);
    }
}
