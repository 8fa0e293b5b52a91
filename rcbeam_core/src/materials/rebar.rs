//! Reinforcing Steel

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};

use super::GAMMA_S;

/// Design strengths of the reinforcement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarProperties {
    /// Characteristic yield strength fyk (MPa)
    pub fyk: f64,
    /// Design yield strength fyd = fyk / γs (MPa)
    pub fyd: f64,
}

impl RebarProperties {
    /// Derive design values from the characteristic yield strength.
    pub fn from_yield(fyk: f64) -> CalcResult<Self> {
        require_positive("rebar_fyk_mpa", fyk, "Rebar yield strength must be positive")?;
        Ok(RebarProperties {
            fyk,
            fyd: fyk / GAMMA_S,
        })
    }
}
