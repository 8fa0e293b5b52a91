//! # Reinforced Concrete Beam Section Design
//!
//! Designs the reinforcement of a rectangular beam section for bending,
//! shear and torsion to EN 1992-1-1.
//!
//! ## Stages
//!
//! 1. [`MaterialProperties::resolve`] - design strengths, C50/60 cap
//! 2. [`bending`] - tension (and compression) bars from the bar catalog
//! 3. [`capacity`] - strut angle search, concrete resistance, torsion steel
//! 4. [`links`] - shear link legs and spacing
//!
//! Each stage appends to the [`DesignTrace`]. A stage that cannot find a
//! design stops the run; the result then carries the [`DesignFailure`] and
//! the trace up to and including the failing check.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::calculations::rc_beam::{design, DesignOptions, LoadDemand, RcBeamInput, SectionGeometry};
//! use rcbeam_core::materials::ConcreteGrade;
//!
//! let input = RcBeamInput {
//!     label: "B-1".to_string(),
//!     geometry: SectionGeometry { width_mm: 350.0, depth_mm: 350.0, cover_mm: 35.0 },
//!     concrete_grade: ConcreteGrade::C40,
//!     rebar_fyk_mpa: 500.0,
//!     loads: LoadDemand { moment_knm: 10.0, shear_kn: 10.0, torsion_knm: 0.0 },
//!     options: DesignOptions::default(),
//! };
//!
//! let result = design(&input).unwrap();
//! assert!(result.passes());
//! println!("{}", result.trace);
//! ```

pub mod bending;
pub mod capacity;
pub mod links;
pub mod spacing;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::equations::section::{effective_depth, rectangular_area, rectangular_perimeter};
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};
use crate::materials::{Catalog, ConcreteGrade, MaterialProperties};
use crate::trace::{DesignTrace, TraceEntry};
use crate::units::{KilonewtonMeters, Kilonewtons};

pub use bending::{BarSelection, BendingSummary, Layer};
pub use capacity::{CapacitySummary, StrutCheck};
pub use links::LinkSelection;

// =============================================================================
// INPUT
// =============================================================================

/// Rectangular section dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Section width b (mm)
    pub width_mm: f64,
    /// Overall depth h (mm)
    pub depth_mm: f64,
    /// Nominal cover to the links (mm)
    pub cover_mm: f64,
}

/// Design actions. Signs are ignored; magnitudes are designed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadDemand {
    /// Bending moment M_Ed (kNm)
    #[serde(default)]
    pub moment_knm: f64,
    /// Shear force V_Ed (kN)
    #[serde(default)]
    pub shear_kn: f64,
    /// Torsional moment T_Ed (kNm)
    #[serde(default)]
    pub torsion_knm: f64,
}

/// Detailing choices. Every field has a default so partial JSON works.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignOptions {
    /// Smallest longitudinal bar tried (mm); must be in the bar catalog
    pub min_bar_diameter_mm: f64,
    /// Link diameter (mm); must be in the link catalog
    pub link_diameter_mm: f64,
    /// Minimum longitudinal and transverse link spacing (mm)
    pub min_link_spacing_mm: f64,
    /// Minimum clear spacing between bars (mm)
    pub min_bar_spacing_mm: f64,
}

impl Default for DesignOptions {
    fn default() -> Self {
        DesignOptions {
            min_bar_diameter_mm: 16.0,
            link_diameter_mm: 10.0,
            min_link_spacing_mm: 100.0,
            min_bar_spacing_mm: 50.0,
        }
    }
}

/// Input parameters for one section design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "geometry": { "width_mm": 350.0, "depth_mm": 350.0, "cover_mm": 35.0 },
///   "concrete_grade": "40",
///   "rebar_fyk_mpa": 500.0,
///   "loads": { "moment_knm": 10.0, "shear_kn": 10.0, "torsion_knm": 0.0 },
///   "options": { "min_bar_diameter_mm": 16.0, "link_diameter_mm": 10.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RcBeamInput {
    /// User label for this section (e.g., "B-1", "Transfer beam grid 4")
    pub label: String,
    pub geometry: SectionGeometry,
    /// Concrete strength class
    pub concrete_grade: ConcreteGrade,
    /// Characteristic yield strength of the reinforcement fyk (MPa)
    pub rebar_fyk_mpa: f64,
    pub loads: LoadDemand,
    #[serde(default)]
    pub options: DesignOptions,
}

impl RcBeamInput {
    /// Validate input parameters.
    ///
    /// Rejects anything the solver cannot start from: non-positive or
    /// non-finite geometry, cover leaving no effective depth, diameters
    /// outside the catalogs and non-finite loads.
    pub fn validate(&self) -> CalcResult<()> {
        let g = &self.geometry;
        require_positive("width_mm", g.width_mm, "Width must be positive")?;
        require_positive("depth_mm", g.depth_mm, "Depth must be positive")?;
        require_positive("cover_mm", g.cover_mm, "Cover must be positive")?;
        require_positive("rebar_fyk_mpa", self.rebar_fyk_mpa, "Yield strength must be positive")?;

        require_finite("moment_knm", self.loads.moment_knm)?;
        require_finite("shear_kn", self.loads.shear_kn)?;
        require_finite("torsion_knm", self.loads.torsion_knm)?;

        let o = &self.options;
        Catalog::bars().index_of(o.min_bar_diameter_mm)?;
        Catalog::links().index_of(o.link_diameter_mm)?;
        require_positive("min_link_spacing_mm", o.min_link_spacing_mm, "Link spacing must be positive")?;
        require_positive("min_bar_spacing_mm", o.min_bar_spacing_mm, "Bar spacing must be positive")?;

        let d = effective_depth(g.depth_mm, g.cover_mm, o.link_diameter_mm, o.min_bar_diameter_mm);
        if d <= 0.0 {
            return Err(CalcError::invalid_input(
                "cover_mm",
                g.cover_mm.to_string(),
                "Cover leaves no effective depth for the links and bars",
            ));
        }
        if 2.0 * g.cover_mm >= g.width_mm {
            return Err(CalcError::invalid_input(
                "cover_mm",
                g.cover_mm.to_string(),
                "Cover on both faces exceeds the section width",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// SOLVER CONTEXT
// =============================================================================

/// Everything the stages read, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionContext {
    pub width: f64,
    pub depth: f64,
    pub cover: f64,
    pub link_diameter: f64,
    /// Bar catalog index of the smallest bar tried
    pub min_bar_index: usize,
    pub min_bar_diameter: f64,
    pub min_bar_spacing: f64,
    pub min_link_spacing: f64,
    pub moment: KilonewtonMeters,
    pub shear: Kilonewtons,
    pub torsion: KilonewtonMeters,
    pub materials: MaterialProperties,
}

impl SectionContext {
    /// Build the context from validated input and resolved materials.
    pub fn new(input: &RcBeamInput, materials: MaterialProperties) -> CalcResult<Self> {
        let g = &input.geometry;
        let o = &input.options;
        Ok(SectionContext {
            width: g.width_mm,
            depth: g.depth_mm,
            cover: g.cover_mm,
            link_diameter: o.link_diameter_mm,
            min_bar_index: Catalog::bars().index_of(o.min_bar_diameter_mm)?,
            min_bar_diameter: o.min_bar_diameter_mm,
            min_bar_spacing: o.min_bar_spacing_mm,
            min_link_spacing: o.min_link_spacing_mm,
            moment: KilonewtonMeters(input.loads.moment_knm.abs()),
            shear: Kilonewtons(input.loads.shear_kn.abs()),
            torsion: KilonewtonMeters(input.loads.torsion_knm.abs()),
            materials,
        })
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Why a design could not be completed.
///
/// Distinct from [`CalcError`]: the input was valid, the section simply
/// does not work.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum DesignFailure {
    /// K exceeds the absolute ceiling; the concrete crushes
    #[error("Concrete failure: K = {k:.4} exceeds {k_limit:.4}")]
    ConcreteCapacityExceeded { k: f64, k_limit: f64 },

    /// No catalog arrangement fits the section or meets the demand
    #[error("No feasible {element} layout: {reason}")]
    ReinforcementLayoutInfeasible { element: String, reason: String },

    /// Strut crushing governs even at the steepest strut angle
    #[error("Section capacity exceeded: utilisation {ratio:.3} at the largest strut angle")]
    SectionCapacityExceeded { ratio: f64 },
}

impl DesignFailure {
    /// Short code for programmatic handling
    pub fn failure_code(&self) -> &'static str {
        match self {
            DesignFailure::ConcreteCapacityExceeded { .. } => "CONCRETE_CAPACITY_EXCEEDED",
            DesignFailure::ReinforcementLayoutInfeasible { .. } => "LAYOUT_INFEASIBLE",
            DesignFailure::SectionCapacityExceeded { .. } => "SECTION_CAPACITY_EXCEEDED",
        }
    }
}

/// Overall verdict of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "failure")]
pub enum DesignOutcome {
    Pass,
    Fail(DesignFailure),
}

/// Results of a section design.
///
/// Stage summaries are present for every stage that completed. The final
/// reinforcement selections are only set when the whole design passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    /// Label from input
    pub label: String,
    pub outcome: DesignOutcome,
    /// Resolved design strengths
    pub materials: MaterialProperties,
    /// Bending stage numbers
    pub bending: Option<BendingSummary>,
    /// Shear and torsion stage numbers
    pub capacity: Option<CapacitySummary>,
    /// Final tension bars
    pub tension: Option<BarSelection>,
    /// Final compression bars, when K > K'
    pub compression: Option<BarSelection>,
    /// Final shear links
    pub links: Option<LinkSelection>,
    /// Accepted strut angle θ (rad)
    pub theta_rad: Option<f64>,
    /// Every check, in the order it was made
    pub trace: DesignTrace,
}

impl DesignResult {
    /// Check if every stage passed
    pub fn passes(&self) -> bool {
        matches!(self.outcome, DesignOutcome::Pass)
    }

    /// The failure that stopped the run, if any
    pub fn failure(&self) -> Option<&DesignFailure> {
        match &self.outcome {
            DesignOutcome::Pass => None,
            DesignOutcome::Fail(failure) => Some(failure),
        }
    }

    /// Accepted strut angle in degrees
    pub fn theta_degrees(&self) -> Option<f64> {
        self.theta_rad.map(f64::to_degrees)
    }

    fn stopped(mut self, failure: DesignFailure) -> Self {
        self.outcome = DesignOutcome::Fail(failure);
        self
    }
}

// =============================================================================
// DESIGN
// =============================================================================

/// Design the reinforcement of one section.
///
/// # Arguments
///
/// * `input` - Section, materials, actions and detailing options
///
/// # Returns
///
/// * `Ok(DesignResult)` - for passing and failing designs alike
/// * `Err(CalcError)` - if the input is invalid
pub fn design(input: &RcBeamInput) -> CalcResult<DesignResult> {
    input.validate()?;

    let materials = MaterialProperties::resolve(input.concrete_grade, input.rebar_fyk_mpa)?;
    let ctx = SectionContext::new(input, materials)?;

    let mut trace = DesignTrace::new();
    record_geometry(&ctx, &mut trace);
    materials.record(&mut trace);

    let mut result = DesignResult {
        label: input.label.clone(),
        outcome: DesignOutcome::Pass,
        materials,
        bending: None,
        capacity: None,
        tension: None,
        compression: None,
        links: None,
        theta_rad: None,
        trace: DesignTrace::new(),
    };

    let bending = match bending::solve(&ctx, &mut trace) {
        Ok(summary) => summary,
        Err(failure) => return Ok(finish(result, trace).stopped(failure)),
    };
    result.bending = Some(bending);

    let capacity = match capacity::solve(&ctx, &bending, &mut trace) {
        Ok(summary) => summary,
        Err(failure) => return Ok(finish(result, trace).stopped(failure)),
    };
    result.capacity = Some(capacity);

    let links = match links::solve(&ctx, bending.flexure.d, bending.flexure.z, capacity.theta(), &mut trace) {
        Ok(selection) => selection,
        Err(failure) => return Ok(finish(result, trace).stopped(failure)),
    };

    result.tension = Some(bending.tension);
    result.compression = bending.compression;
    result.links = Some(links);
    result.theta_rad = Some(capacity.theta());
    Ok(finish(result, trace))
}

fn finish(mut result: DesignResult, trace: DesignTrace) -> DesignResult {
    result.trace = trace;
    result
}

fn record_geometry(ctx: &SectionContext, trace: &mut DesignTrace) {
    trace.push(
        TraceEntry::new("Geometry")
            .expr(format!("b = {} mm, h = {} mm, c = {} mm", ctx.width, ctx.depth, ctx.cover))
            .expr(format!("A = b h = {:.0} mm^2", rectangular_area(ctx.width, ctx.depth)))
            .expr(format!("u = 2(b + h) = {:.0} mm", rectangular_perimeter(ctx.width, ctx.depth))),
    );
}
