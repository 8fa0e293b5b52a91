//! # Materials Database
//!
//! Concrete and reinforcement properties for Eurocode 2 section design.
//!
//! ## Contents
//!
//! - **Concrete**: strength classes C30/37 to C90/105 per EN 1992-1-1 Table 3.1
//! - **Rebar**: characteristic and design yield strength
//! - **Catalog**: the standard bar and link diameters searched by the solver
//!
//! ## High-Strength Cap
//!
//! Shear and torsion expressions may not use concrete strength above C50/60
//! (EN 1992-1-1 3.1.2(2)P). When a stronger grade is selected the design
//! values are resolved from the C50 row. Both the selected and the
//! design-basis grade are kept in [`MaterialProperties`], so consumers can
//! show either.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::materials::{ConcreteGrade, MaterialProperties};
//!
//! let props = MaterialProperties::resolve(ConcreteGrade::C70, 500.0).unwrap();
//! assert_eq!(props.selected_fck, 70.0);
//! assert_eq!(props.fck, 50.0);
//! assert!(props.capped);
//! ```

pub mod catalog;
pub mod concrete;
pub mod rebar;

pub use catalog::{bars_area, Catalog, CatalogKind, BAR_DIAMETERS_MM, LINK_DIAMETERS_MM};
pub use concrete::{ConcreteGrade, ConcreteProperties};
pub use rebar::RebarProperties;

use serde::{Deserialize, Serialize};

use crate::equations::registry::Equation;
use crate::errors::CalcResult;
use crate::trace::{DesignTrace, TraceEntry};

/// Partial factor for concrete γc (persistent and transient)
pub const GAMMA_C: f64 = 1.5;

/// Partial factor for reinforcing steel γs
pub const GAMMA_S: f64 = 1.15;

/// Long-term coefficient on compressive strength αcc.
///
/// 0.85 is used throughout because the struts are in permanent compression.
pub const ALPHA_CC: f64 = 0.85;

/// Long-term coefficient on tensile strength αct
pub const ALPHA_CT: f64 = 1.0;

/// Resolved design strengths for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Grade requested by the user
    pub selected_grade: ConcreteGrade,
    /// Grade whose table row the design values come from
    pub design_basis_grade: ConcreteGrade,
    /// fck of the requested grade (MPa)
    pub selected_fck: f64,
    /// fck used in design (MPa), capped at 50
    pub fck: f64,
    /// Design compressive strength fcd = αcc·fck/γc (MPa)
    pub fcd: f64,
    /// Mean tensile strength fctm (MPa)
    pub fctm: f64,
    /// 5% fractile tensile strength fctk,0.05 (MPa)
    pub fctk_005: f64,
    /// Design tensile strength fctd = αct·fctk,0.05/γc (MPa)
    pub fctd: f64,
    /// Ultimate strain εcu2 (‰)
    pub eps_cu2: f64,
    /// Ultimate strain εcu3 (‰)
    pub eps_cu3: f64,
    /// Selected grade lies in the high-strength region (fck > 50)
    pub high_strength: bool,
    /// Design values were taken from a lower grade than selected
    pub capped: bool,
    /// Reinforcement strengths
    pub rebar: RebarProperties,
}

impl MaterialProperties {
    /// Resolve design strengths for a grade and rebar yield strength.
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidInput` if `fyk` is not a positive number.
    pub fn resolve(grade: ConcreteGrade, fyk: f64) -> CalcResult<Self> {
        let rebar = RebarProperties::from_yield(fyk)?;
        let capped = grade > ConcreteGrade::SHEAR_STRENGTH_LIMIT;
        let basis = if capped {
            ConcreteGrade::SHEAR_STRENGTH_LIMIT
        } else {
            grade
        };
        let row = basis.properties();

        Ok(MaterialProperties {
            selected_grade: grade,
            design_basis_grade: basis,
            selected_fck: grade.fck_mpa(),
            fck: row.fck,
            fcd: ALPHA_CC * row.fck / GAMMA_C,
            fctm: row.fctm,
            fctk_005: row.fctk_005,
            fctd: ALPHA_CT * row.fctk_005 / GAMMA_C,
            eps_cu2: row.eps_cu2,
            eps_cu3: row.eps_cu3,
            high_strength: grade.is_high_strength(),
            capped,
            rebar,
        })
    }

    /// Append the cap note (when applicable) and the strengths summary.
    pub fn record(&self, trace: &mut DesignTrace) {
        if self.capped {
            trace.push(
                TraceEntry::new("Note: the shear strength of concrete is limited to C50/60")
                    .expr(format!(
                        "Selected {} (f_ck = {:.0} N/mm^2), design based on {}",
                        self.selected_grade, self.selected_fck, self.design_basis_grade
                    ))
                    .reference(Equation::StrengthClassLimit.clause()),
            );
        }

        trace.push(
            TraceEntry::new("Concrete and reinforcement strength")
                .expr(format!("f_ck = {:.1} N/mm^2", self.fck))
                .expr(format!("f_cd = {:.1} N/mm^2", self.fcd))
                .expr(format!("f_ctm = {:.1} N/mm^2", self.fctm))
                .expr(format!("f_ctd = {:.1} N/mm^2", self.fctd))
                .expr(format!("f_yd = {:.1} N/mm^2", self.rebar.fyd)),
        );
    }
}
