//! # Flexural Design Formulas (EN 1992-1-1 Section 6.1)
//!
//! Rectangular stress block design of a singly or doubly reinforced
//! rectangular section, following the simplified K-method.
//!
//! ## Notation
//!
//! - `M` = Design moment (N·mm)
//! - `K` = M / (b·d²·fck), normalised moment
//! - `K'` = Limit of K for a singly reinforced section
//! - `z` = Lever arm
//! - `η` = Strength reduction applied to the stress block for fck > 50
//!
//! All functions are pure: they take the trial geometry and material
//! strengths and return numbers. The discrete bar search lives in
//! `calculations::rc_beam::bending`.

use serde::{Deserialize, Serialize};

use crate::materials::MaterialProperties;
use crate::units::{KilonewtonMeters, NewtonMillimeters};

/// Absolute upper limit on K' (The Concrete Centre guidance)
pub const K_PRIME_MAX: f64 = 0.168;

/// Stress block reduction for high-strength concrete
///
/// # Formula
/// For fck ≤ 50: η = 1
///
/// For fck > 50:
/// ```text
/// ρc = (0.8 − (fck − 50)/400) / 0.8
/// nc = 1 − (fck − 50)/200
/// η  = ρc · nc · (1 / (0.5·ρc)) / 2.5
/// ```
pub fn strength_reduction(fck: f64) -> f64 {
    if fck <= 50.0 {
        return 1.0;
    }
    let rho_c = (0.8 - (fck - 50.0) / 400.0) / 0.8;
    let n_c = 1.0 - (fck - 50.0) / 200.0;
    let x_red = (1.0 / (rho_c * 0.5)) / 2.5;
    rho_c * n_c * x_red
}

/// Normalised moment K = M / (b·d²·fck)
///
/// # Arguments
/// * `moment` - Design moment
/// * `b` - Section width (mm)
/// * `d` - Effective depth (mm)
/// * `fck` - Characteristic strength (MPa)
///
/// # Example
/// ```rust
/// use rcbeam_core::equations::flexure::moment_ratio;
/// use rcbeam_core::units::KilonewtonMeters;
///
/// let k = moment_ratio(KilonewtonMeters(10.0), 350.0, 297.0, 40.0);
/// assert!((k - 0.0081).abs() < 1e-4);
/// ```
pub fn moment_ratio(moment: KilonewtonMeters, b: f64, d: f64, fck: f64) -> f64 {
    let m: NewtonMillimeters = moment.into();
    m.value() / (b * d * d * fck)
}

/// Largest K any section can carry before the compression zone is exhausted
///
/// # Formula
/// K_max = 1 / (3.53·η)
///
/// Beyond this the lever arm expression has no real root.
pub fn k_ceiling(eta: f64) -> f64 {
    1.0 / (3.53 * eta)
}

/// Singly reinforced limit K'
///
/// # Formula
/// ```text
/// k1 = 0.4
/// k2 = 0.6 + 0.0014/εcu2
/// xu = εcu3·d / (εcu3 + fyd/200)
/// δ  = min(k1 + k2·xu/d, 1)
/// K' = min(0.6δ − 0.18δ² − 0.21, 0.168)
/// ```
///
/// Strains are in per mille.
pub fn k_prime(d: f64, eps_cu2: f64, eps_cu3: f64, fyd: f64) -> f64 {
    let k1 = 0.4;
    let k2 = 0.6 + 0.0014 / (eps_cu2 / 1000.0);
    let xu = eps_cu3 * d / (eps_cu3 + fyd / 200.0);
    let delta = (k1 + k2 * xu / d).min(1.0);
    (0.6 * delta - 0.18 * delta * delta - 0.21).min(K_PRIME_MAX)
}

/// Lever arm z = d/2·(1 + √(1 − 3.53·η·K))
pub fn lever_arm(d: f64, eta: f64, k: f64) -> f64 {
    d / 2.0 * (1.0 + (1.0 - 3.53 * eta * k).sqrt())
}

/// Minimum tension steel (EN 1992-1-1 9.2.1.1(1))
///
/// # Formula
/// As,min = max(0.26·fctm·b·d/fyk, 0.0013·b·d)
pub fn minimum_tension_area(fctm: f64, fyk: f64, b: f64, d: f64) -> f64 {
    (0.26 * fctm * b * d / fyk).max(0.0013 * b * d)
}

/// Trial geometry for one evaluation of the section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexureTrial {
    /// Design moment
    pub moment: KilonewtonMeters,
    /// Section width b (mm)
    pub width: f64,
    /// Effective depth of tension steel d (mm)
    pub d: f64,
    /// Depth to compression steel d2 (mm)
    pub d2: f64,
}

/// Numeric outcome of a trial that the concrete can carry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexureDesign {
    /// Effective depth used (mm)
    pub d: f64,
    /// Compression steel depth used (mm)
    pub d2: f64,
    /// Normalised moment
    pub k: f64,
    /// Singly reinforced limit
    pub k_prime: f64,
    /// Lever arm (mm)
    pub z: f64,
    /// Minimum tension area (mm²)
    pub as_min: f64,
    /// Required tension area (mm²)
    pub as_req: f64,
    /// Required compression area (mm²), zero when singly reinforced
    pub as2_req: f64,
}

impl FlexureDesign {
    /// Whether compression steel is needed
    pub fn is_doubly_reinforced(&self) -> bool {
        self.as2_req > 0.0
    }
}

/// Result of evaluating one trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlexureOutcome {
    /// Reinforcement areas could be derived
    Designed(FlexureDesign),
    /// K is above the ceiling and no reinforcement helps
    ConcreteFailure { k: f64, k_limit: f64 },
}

/// Required reinforcement areas for a trial section
///
/// # Formula
/// Singly reinforced (K ≤ K'):
/// ```text
/// z  = min(d/2·(1 + √(1 − 3.53ηK)), 0.95d)
/// As = max(M/(fyd·z), As,min)
/// ```
///
/// Doubly reinforced (K > K'):
/// ```text
/// z   = d/2·(1 + √(1 − 3.53ηK'))
/// M'  = b·d²·fck·(K − K')
/// As2 = M'/(fyd·(d − d2))
/// As  = max(K'·fck·b·d²/(fyd·z) + As2, As,min)
/// ```
///
/// When d ≤ d2 the compression steel cannot act and As2 is infinite, which
/// the bar search reads as "no layout fits".
pub fn design_section(trial: &FlexureTrial, materials: &MaterialProperties) -> FlexureOutcome {
    let FlexureTrial { moment, width: b, d, d2 } = *trial;
    let fck = materials.fck;
    let fyd = materials.rebar.fyd;

    let eta = strength_reduction(fck);
    let k = moment_ratio(moment, b, d, fck);
    let k_limit = k_ceiling(eta);
    if k > k_limit {
        return FlexureOutcome::ConcreteFailure { k, k_limit };
    }

    let k_prime = k_prime(d, materials.eps_cu2, materials.eps_cu3, fyd);
    let as_min = minimum_tension_area(materials.fctm, materials.rebar.fyk, b, d);
    let m = NewtonMillimeters::from(moment).value();

    let design = if k <= k_prime {
        let z = lever_arm(d, eta, k).min(0.95 * d);
        FlexureDesign {
            d,
            d2,
            k,
            k_prime,
            z,
            as_min,
            as_req: (m / (fyd * z)).max(as_min),
            as2_req: 0.0,
        }
    } else {
        let z = lever_arm(d, eta, k_prime);
        let m_dash = b * d * d * fck * (k - k_prime);
        let as2_req = if d > d2 {
            m_dash / (fyd * (d - d2))
        } else {
            f64::INFINITY
        };
        let as_req = (k_prime * fck * b * d * d / (fyd * z) + as2_req).max(as_min);
        FlexureDesign {
            d,
            d2,
            k,
            k_prime,
            z,
            as_min,
            as_req,
            as2_req,
        }
    };

    FlexureOutcome::Designed(design)
}
