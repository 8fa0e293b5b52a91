//! # Bending Reinforcement Search
//!
//! Finds the smallest catalog diameter, and the bar count for it, that
//! provides the tension steel (and compression steel when K > K') required
//! by [`design_section`].
//!
//! Tension and compression are searched by two independent [`BarSearch`]
//! states. Changing the tension diameter moves the effective depth, which
//! invalidates any compression sizing done at the old depth. When that
//! happens the compression search is reset, the reset is traced and another
//! pass is made; the result records that a re-validation took place.
//!
//! Every pass either advances the tension diameter or ends the search, so
//! the number of passes is bounded by the catalog length.

use serde::{Deserialize, Serialize};

use crate::equations::flexure::{design_section, FlexureDesign, FlexureOutcome, FlexureTrial};
use crate::equations::registry::Equation;
use crate::equations::section::{compression_depth, effective_depth, reinforcement_ratio};
use crate::materials::{bars_area, Catalog};
use crate::trace::{DesignTrace, TraceEntry};
use crate::units::SqMm;

use super::spacing::bars_required;
use super::{DesignFailure, SectionContext};

/// Total steel ratio above which the trace carries a warning
pub const RHO_WARNING_LIMIT: f64 = 0.04;

/// Which layer of longitudinal steel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Tension,
    Compression,
}

impl Layer {
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Tension => "tension",
            Layer::Compression => "compression",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Layer::Tension => "Tension",
            Layer::Compression => "Compression",
        }
    }
}

/// Diameter and number of bars in one layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSelection {
    /// Bar diameter (mm)
    pub diameter_mm: f64,
    /// Number of bars
    pub count: u32,
}

impl BarSelection {
    /// Provided area (mm²)
    pub fn area_mm2(&self) -> f64 {
        bars_area(self.count, self.diameter_mm)
    }
}

impl std::fmt::Display for BarSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {} mm", self.count, self.diameter_mm)
    }
}

/// Position of one layer's search in the bar catalog.
#[derive(Debug, Clone, Copy)]
struct BarSearch {
    catalog: Catalog,
    start: usize,
    index: usize,
    diameter: f64,
    count: u32,
}

impl BarSearch {
    fn new(catalog: Catalog, start: usize, diameter: f64) -> Self {
        BarSearch {
            catalog,
            start,
            index: start,
            diameter,
            count: 0,
        }
    }

    /// Move to the next larger diameter. `false` once the catalog is spent.
    fn advance(&mut self) -> bool {
        let next = self
            .catalog
            .next_index(self.index)
            .and_then(|i| self.catalog.get(i).map(|d| (i, d)));
        match next {
            Some((index, diameter)) => {
                self.index = index;
                self.diameter = diameter;
                self.count = 0;
                true
            }
            None => false,
        }
    }

    fn reset(&mut self, diameter: f64) {
        self.index = self.start;
        self.diameter = diameter;
        self.count = 0;
    }

    fn provided(&self) -> f64 {
        bars_area(self.count, self.diameter)
    }

    fn selection(&self) -> BarSelection {
        BarSelection {
            diameter_mm: self.diameter,
            count: self.count,
        }
    }
}

/// Numbers of the accepted bending layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendingSummary {
    /// Final trial evaluation
    pub flexure: FlexureDesign,
    /// Tension layer
    pub tension: BarSelection,
    /// Compression layer, present only when K > K'
    pub compression: Option<BarSelection>,
    /// Provided tension area (mm²)
    pub as_prov_mm2: f64,
    /// Provided compression area (mm²)
    pub as2_prov_mm2: f64,
    /// (As,prov + As2,prov) / (b·h)
    pub rho_total: f64,
    /// Compression steel was re-sized after the effective depth changed
    pub revalidated: bool,
}

/// Size the bending reinforcement and record the outcome in the trace.
///
/// # Errors
///
/// * `DesignFailure::ConcreteCapacityExceeded` - K above 1/(3.53η) at some trial
/// * `DesignFailure::ReinforcementLayoutInfeasible` - no catalog diameter fits
pub fn solve(ctx: &SectionContext, trace: &mut DesignTrace) -> Result<BendingSummary, DesignFailure> {
    match search(ctx, trace) {
        Ok(summary) => {
            trace.push(accepted_entry(&summary));
            Ok(summary)
        }
        Err(failure) => {
            trace.push(failure_entry(&failure));
            Err(failure)
        }
    }
}

fn search(ctx: &SectionContext, trace: &mut DesignTrace) -> Result<BendingSummary, DesignFailure> {
    let catalog = Catalog::bars();
    let start = ctx.min_bar_index;
    let min_dia = ctx.min_bar_diameter;

    let mut tension = BarSearch::new(catalog, start, min_dia);
    let mut compression = BarSearch::new(catalog, start, min_dia);
    let mut revalidated = false;

    let mut design = evaluate(ctx, &tension, &compression)?;
    tension.count = size_layer(ctx, design.as_req, tension.diameter);
    compression.count = compression_count(ctx, &design, compression.diameter);

    for _pass in 0..=catalog.len() {
        let d_base = design.d;

        while design.is_doubly_reinforced() && compression.provided() < design.as2_req {
            let rejected = compression.diameter;
            if !compression.advance() {
                return Err(exhausted(Layer::Compression));
            }
            design = evaluate(ctx, &tension, &compression)?;
            compression.count = compression_count(ctx, &design, compression.diameter);
            tension.count = size_layer(ctx, design.as_req, tension.diameter);
            trace.push(advance_entry(Layer::Compression, rejected, &compression));
        }

        while tension.provided() < design.as_req {
            let rejected = tension.diameter;
            if !tension.advance() {
                return Err(exhausted(Layer::Tension));
            }
            design = evaluate(ctx, &tension, &compression)?;
            tension.count = size_layer(ctx, design.as_req, tension.diameter);
            trace.push(advance_entry(Layer::Tension, rejected, &tension));
        }

        if design.is_doubly_reinforced() && design.d != d_base {
            // Compression was sized at the old depth
            revalidated = true;
            compression.reset(min_dia);
            design = evaluate(ctx, &tension, &compression)?;
            compression.count = compression_count(ctx, &design, compression.diameter);
            tension.count = size_layer(ctx, design.as_req, tension.diameter);
            trace.push(reset_entry(design.d, &compression));
            continue;
        }

        let compression = design.is_doubly_reinforced().then(|| compression.selection());
        let as_prov = tension.provided();
        let as2_prov = compression.map_or(0.0, |c| c.area_mm2());
        return Ok(BendingSummary {
            flexure: design,
            tension: tension.selection(),
            compression,
            as_prov_mm2: as_prov,
            as2_prov_mm2: as2_prov,
            rho_total: reinforcement_ratio(SqMm(as_prov + as2_prov), ctx.width, ctx.depth),
            revalidated,
        });
    }

    Err(DesignFailure::ReinforcementLayoutInfeasible {
        element: Layer::Tension.name().to_string(),
        reason: "Bar search did not settle on a layout".to_string(),
    })
}

fn evaluate(ctx: &SectionContext, tension: &BarSearch, compression: &BarSearch) -> Result<FlexureDesign, DesignFailure> {
    let trial = FlexureTrial {
        moment: ctx.moment,
        width: ctx.width,
        d: effective_depth(ctx.depth, ctx.cover, ctx.link_diameter, tension.diameter),
        d2: compression_depth(ctx.cover, ctx.link_diameter, compression.diameter),
    };
    match design_section(&trial, &ctx.materials) {
        FlexureOutcome::Designed(design) => Ok(design),
        FlexureOutcome::ConcreteFailure { k, k_limit } => Err(DesignFailure::ConcreteCapacityExceeded { k, k_limit }),
    }
}

fn size_layer(ctx: &SectionContext, area: f64, diameter: f64) -> u32 {
    bars_required(area, diameter, ctx.min_bar_spacing, ctx.cover, ctx.width, ctx.link_diameter)
}

fn compression_count(ctx: &SectionContext, design: &FlexureDesign, diameter: f64) -> u32 {
    if design.is_doubly_reinforced() {
        size_layer(ctx, design.as2_req, diameter)
    } else {
        0
    }
}

fn exhausted(layer: Layer) -> DesignFailure {
    DesignFailure::ReinforcementLayoutInfeasible {
        element: layer.name().to_string(),
        reason: "No bar diameter in the catalog fits the required area".to_string(),
    }
}

// =============================================================================
// TRACE
// =============================================================================

fn advance_entry(layer: Layer, rejected: f64, search: &BarSearch) -> TraceEntry {
    TraceEntry::new(format!("{} bar diameter increased", layer.title()))
        .expr(format!("\\phi = {} mm cannot provide the required area", rejected))
        .expr(format!("Trying \\phi = {} mm, n = {}", search.diameter, search.count))
}

fn reset_entry(d: f64, search: &BarSearch) -> TraceEntry {
    TraceEntry::new("Compression steel re-sized")
        .expr(format!("Effective depth changed to d = {} mm", d))
        .expr(format!("Trying \\phi = {} mm, n = {}", search.diameter, search.count))
}

fn accepted_entry(summary: &BendingSummary) -> TraceEntry {
    let f = &summary.flexure;
    let mut entry = TraceEntry::new("Bending Reinforcement check")
        .reference(Equation::BendingDesign.clause())
        .expr(format!("d = h - c - \\phi_link - 0.5\\phi = {} mm", f.d))
        .expr(format!("K = M/(f_ck b d^2) = {:.4}", f.k))
        .expr(format!("K' = {:.4}", f.k_prime));

    match summary.compression {
        Some(compression) => {
            entry = entry
                .expr("K > K'")
                .expr(format!("d2 = c + \\phi_link + 0.5\\phi_2 = {} mm", f.d2))
                .expr(format!("z = (d/2)(1 + (1 - 3.53K')^0.5) = {:.1} mm", f.z))
                .expr("M' = b d^2 f_ck (K - K')")
                .expr(format!("A_sc,req = M'/(f_yd (d - d2)) = {:.1} mm^2", f.as2_req))
                .expr(format!("A_sc,prov = {} = {:.1} mm^2", compression, summary.as2_prov_mm2))
                .expr(format!(
                    "A_s,min = max(0.26 f_ctm b d/f_yk, 0.0013 b d) = {:.1} mm^2",
                    f.as_min
                ))
                .expr(format!("A_s,req = (K' f_ck b d^2)/(f_yd z) + A_sc,req = {:.1} mm^2", f.as_req));
        }
        None => {
            entry = entry
                .expr("K <= K'")
                .expr(format!("z = (d/2)(1 + (1 - 3.53K)^0.5) <= 0.95d = {:.1} mm", f.z))
                .expr(format!(
                    "A_s,min = max(0.26 f_ctm b d/f_yk, 0.0013 b d) = {:.1} mm^2",
                    f.as_min
                ))
                .expr(format!("A_s,req = M/(f_yd z) = {:.1} mm^2", f.as_req));
        }
    }

    entry = entry.expr(format!("A_s,prov = {} = {:.1} mm^2", summary.tension, summary.as_prov_mm2));

    if summary.rho_total > RHO_WARNING_LIMIT {
        entry = entry.expr(format!("\\rho = {:.6} > {} Warning!", summary.rho_total, RHO_WARNING_LIMIT));
    } else {
        entry = entry.expr(format!("\\rho = {:.6}", summary.rho_total));
    }

    entry.conclusion("Pass").pass()
}

fn failure_entry(failure: &DesignFailure) -> TraceEntry {
    match failure {
        DesignFailure::ConcreteCapacityExceeded { k, k_limit } => TraceEntry::new("Bending Concrete check")
            .reference(Equation::BendingDesign.clause())
            .expr(format!("K = {:.4} > 1/(3.53\\eta) = {:.4}", k, k_limit))
            .conclusion("Fail - Concrete failure in beam")
            .fail(),
        _ => TraceEntry::new("Bending Reinforcement check")
            .reference(Equation::BendingDesign.clause())
            .expr(failure.to_string())
            .conclusion("Fail - Not able to find suitable reinforcement layout")
            .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::rc_beam::test_support::context;
    use crate::trace::TraceStatus;

    #[test]
    fn test_small_moment_two_16mm_bars() {
        let ctx = context(350.0, 350.0, 10.0);
        let mut trace = DesignTrace::new();
        let summary = solve(&ctx, &mut trace).unwrap();

        assert_eq!(summary.tension, BarSelection { diameter_mm: 16.0, count: 2 });
        assert!(summary.compression.is_none());
        assert!(!summary.revalidated);
        assert_eq!(summary.flexure.d, 297.0);
        assert!(summary.as_prov_mm2 >= summary.flexure.as_req);

        assert_eq!(trace.len(), 1);
        let entry = &trace.entries()[0];
        assert_eq!(entry.narrative, "Bending Reinforcement check");
        assert_eq!(entry.reference.as_deref(), Some("6.1"));
        assert_eq!(entry.status, TraceStatus::Pass);
    }

    #[test]
    fn test_larger_moment_advances_diameter() {
        // 150 kNm on 350 x 350 needs ~1300 mm²: more than four 16 mm bars fit
        let ctx = context(350.0, 350.0, 150.0);
        let mut trace = DesignTrace::new();
        let summary = solve(&ctx, &mut trace).unwrap();

        assert!(summary.tension.diameter_mm > 16.0);
        assert!(summary.as_prov_mm2 >= summary.flexure.as_req);
        assert!(trace.len() > 1);
        assert!(trace.entries()[..trace.len() - 1]
            .iter()
            .all(|e| e.status == TraceStatus::None && e.narrative.starts_with("Tension")));
    }

    #[test]
    fn test_doubly_reinforced_layout() {
        let ctx = context(350.0, 500.0, 550.0);
        let mut trace = DesignTrace::new();
        let summary = solve(&ctx, &mut trace).unwrap();

        let compression = summary.compression.expect("compression steel expected");
        assert!(summary.flexure.k > summary.flexure.k_prime);
        assert!(compression.count >= 2);
        assert!(summary.as2_prov_mm2 >= summary.flexure.as2_req);
        assert!(summary.as_prov_mm2 >= summary.flexure.as_req);
        // Tension bars grew after compression was first sized
        assert!(summary.revalidated);
        let last = trace.last().unwrap();
        assert!(last.expressions.iter().any(|e| e == "K > K'"));
    }

    #[test]
    fn test_concrete_failure() {
        let ctx = context(350.0, 350.0, 10_000.0);
        let mut trace = DesignTrace::new();
        let failure = solve(&ctx, &mut trace).unwrap_err();

        assert!(matches!(failure, DesignFailure::ConcreteCapacityExceeded { .. }));
        let last = trace.last().unwrap();
        assert_eq!(last.narrative, "Bending Concrete check");
        assert_eq!(last.conclusion.as_deref(), Some("Fail - Concrete failure in beam"));
        assert_eq!(last.status, TraceStatus::Fail);
    }

    #[test]
    fn test_narrow_section_exhausts_catalog() {
        // Two bars never fit in a 120 wide beam with 35 cover and 10 links
        let ctx = context(120.0, 400.0, 20.0);
        let mut trace = DesignTrace::new();
        let failure = solve(&ctx, &mut trace).unwrap_err();

        assert!(matches!(failure, DesignFailure::ReinforcementLayoutInfeasible { .. }));
        let last = trace.last().unwrap();
        assert_eq!(
            last.conclusion.as_deref(),
            Some("Fail - Not able to find suitable reinforcement layout")
        );
    }

    #[test]
    fn test_rho_warning() {
        // 300 x 250 at 115 kNm: 3 x 32 tension and 4 x 16 compression,
        // rho = 3217 / 75000 = 0.0429
        let ctx = context(300.0, 250.0, 115.0);
        let mut trace = DesignTrace::new();
        let summary = solve(&ctx, &mut trace).unwrap();

        assert_eq!(summary.tension, BarSelection { diameter_mm: 32.0, count: 3 });
        assert_eq!(summary.compression, Some(BarSelection { diameter_mm: 16.0, count: 4 }));
        assert!(summary.rho_total > RHO_WARNING_LIMIT);

        let rho_line = trace.last().unwrap().expressions.last().unwrap();
        assert!(rho_line.ends_with("> 0.04 Warning!"), "{}", rho_line);
    }

    #[test]
    fn test_rho_below_limit_no_warning() {
        let ctx = context(350.0, 350.0, 10.0);
        let mut trace = DesignTrace::new();
        let summary = solve(&ctx, &mut trace).unwrap();

        assert!(summary.rho_total < RHO_WARNING_LIMIT);
        let rho_line = trace.last().unwrap().expressions.last().unwrap();
        assert!(rho_line.starts_with("\\rho = "));
        assert!(!rho_line.contains("Warning"));
    }

    #[test]
    fn test_revalidation_traced() {
        // Tension walks 16 -> 32 mm, so d drops from 197 to 189 mm and the
        // compression layer is sized again from 16 mm
        let ctx = context(300.0, 250.0, 115.0);
        let mut trace = DesignTrace::new();
        let summary = solve(&ctx, &mut trace).unwrap();

        assert!(summary.revalidated);
        let reset = trace.find("Compression steel re-sized").unwrap();
        assert_eq!(reset.status, TraceStatus::None);
        assert_eq!(reset.expressions[0], "Effective depth changed to d = 189 mm");
        assert_eq!(reset.expressions[1], "Trying \\phi = 16 mm, n = 4");

        let names: Vec<&str> = trace.iter().map(|e| e.narrative.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Tension bar diameter increased",
                "Tension bar diameter increased",
                "Tension bar diameter increased",
                "Compression steel re-sized",
                "Bending Reinforcement check",
            ]
        );
    }

    #[test]
    fn test_bar_search_reset() {
        let mut search = BarSearch::new(Catalog::bars(), 2, 16.0);
        assert!(search.advance());
        assert_eq!(search.diameter, 20.0);
        search.reset(16.0);
        assert_eq!(search.index, 2);
        assert_eq!(search.diameter, 16.0);

        let mut last = BarSearch::new(Catalog::bars(), 6, 40.0);
        assert!(!last.advance());
        assert_eq!(last.diameter, 40.0);
    }
}
