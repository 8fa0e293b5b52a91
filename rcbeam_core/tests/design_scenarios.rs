//! End-to-end section designs through the public API.

use rcbeam_core::calculations::rc_beam::{
    design, BarSelection, DesignFailure, DesignOptions, DesignResult, LoadDemand, RcBeamInput, SectionGeometry,
};
use rcbeam_core::materials::ConcreteGrade;
use rcbeam_core::{CalcError, CalculationItem, TraceStatus};

fn beam(width: f64, depth: f64, grade: ConcreteGrade, moment: f64, shear: f64, torsion: f64) -> RcBeamInput {
    RcBeamInput {
        label: "B-1".to_string(),
        geometry: SectionGeometry {
            width_mm: width,
            depth_mm: depth,
            cover_mm: 35.0,
        },
        concrete_grade: grade,
        rebar_fyk_mpa: 500.0,
        loads: LoadDemand {
            moment_knm: moment,
            shear_kn: shear,
            torsion_knm: torsion,
        },
        options: DesignOptions::default(),
    }
}

fn narratives(result: &DesignResult) -> Vec<&str> {
    result.trace.iter().map(|e| e.narrative.as_str()).collect()
}

// =============================================================================
// Passing designs
// =============================================================================

#[test]
fn test_square_beam_light_loads() {
    let result = design(&beam(350.0, 350.0, ConcreteGrade::C40, 10.0, 10.0, 0.0)).unwrap();

    assert!(result.passes());
    assert_eq!(result.tension, Some(BarSelection { diameter_mm: 16.0, count: 2 }));

    let bending = result.bending.unwrap();
    assert_eq!(bending.flexure.d, 297.0);
    assert!((bending.flexure.as_min - 189.2).abs() < 0.5);

    let max_capacity = result.trace.find("Shear and Torsional max capacity").unwrap();
    assert_eq!(max_capacity.status, TraceStatus::Pass);

    let concrete = result.trace.find("Shear and Torsional resistance concrete").unwrap();
    assert_eq!(
        concrete.conclusion.as_deref(),
        Some("No additional torsion reinforcement required")
    );
    assert!(result.trace.find("Additional steel requirements").is_none());

    let links = result.links.unwrap();
    assert!(links.legs >= 2);
    assert!(links.v_rds_kn > 10.0);
    assert_eq!(result.trace.last().unwrap().narrative, "Shear link requirements");
    assert_eq!(result.trace.last().unwrap().status, TraceStatus::Pass);
}

#[test]
fn test_torsion_needs_longitudinal_steel() {
    let result = design(&beam(350.0, 350.0, ConcreteGrade::C40, 10.0, 50.0, 20.0)).unwrap();

    assert!(result.passes());
    let capacity = result.capacity.unwrap();
    assert!(capacity.concrete_ratio > 1.0);
    assert!(capacity.a_sl_mm2.unwrap() > 0.0);

    let names = narratives(&result);
    let concrete = names
        .iter()
        .position(|n| *n == "Shear and Torsional resistance concrete")
        .unwrap();
    assert_eq!(names[concrete + 1], "Additional steel requirements");
}

#[test]
fn test_doubly_reinforced_beam() {
    let result = design(&beam(350.0, 500.0, ConcreteGrade::C40, 550.0, 10.0, 0.0)).unwrap();

    assert!(result.passes());
    let bending = result.bending.unwrap();
    assert!(bending.flexure.k > bending.flexure.k_prime);
    assert!(result.compression.is_some());
    assert!(bending.as_prov_mm2 >= bending.flexure.as_req);
    assert!(bending.as2_prov_mm2 >= bending.flexure.as2_req);
}

#[test]
fn test_high_strength_grade_capped() {
    let result = design(&beam(350.0, 350.0, ConcreteGrade::C60, 10.0, 10.0, 0.0)).unwrap();

    assert!(result.materials.capped);
    assert_eq!(result.materials.selected_fck, 60.0);
    assert_eq!(result.materials.fck, 50.0);
    assert_eq!(result.materials.design_basis_grade, ConcreteGrade::C50);

    let names = narratives(&result);
    assert_eq!(names[1], "Note: the shear strength of concrete is limited to C50/60");
    assert_eq!(names[2], "Concrete and reinforcement strength");
    assert_eq!(result.trace.entries()[1].reference.as_deref(), Some("3.1.2(2)P"));
}

#[test]
fn test_capped_grade_designs_like_c50() {
    let c50 = design(&beam(300.0, 500.0, ConcreteGrade::C50, 150.0, 120.0, 5.0)).unwrap();
    let c90 = design(&beam(300.0, 500.0, ConcreteGrade::C90, 150.0, 120.0, 5.0)).unwrap();

    assert_eq!(c50.tension, c90.tension);
    assert_eq!(c50.links, c90.links);
    assert_eq!(c50.theta_rad, c90.theta_rad);
}

#[test]
fn test_higher_shear_raises_strut_angle() {
    let light = design(&beam(300.0, 500.0, ConcreteGrade::C30, 100.0, 50.0, 0.0)).unwrap();
    let heavy = design(&beam(300.0, 500.0, ConcreteGrade::C30, 100.0, 500.0, 0.0)).unwrap();

    let light_theta = light.theta_rad.unwrap();
    let heavy_theta = heavy.theta_rad.unwrap_or(std::f64::consts::FRAC_PI_4);
    assert!(heavy_theta > light_theta);
}

// =============================================================================
// Failing designs
// =============================================================================

#[test]
fn test_excessive_moment_crushes_concrete() {
    let result = design(&beam(350.0, 350.0, ConcreteGrade::C40, 10_000.0, 10.0, 0.0)).unwrap();

    assert!(!result.passes());
    assert!(matches!(
        result.failure(),
        Some(DesignFailure::ConcreteCapacityExceeded { .. })
    ));
    assert!(result.tension.is_none());
    assert!(result.compression.is_none());

    let last = result.trace.last().unwrap();
    assert_eq!(last.narrative, "Bending Concrete check");
    assert_eq!(last.conclusion.as_deref(), Some("Fail - Concrete failure in beam"));
    assert_eq!(last.status, TraceStatus::Fail);
}

#[test]
fn test_excessive_shear_exceeds_section() {
    let result = design(&beam(350.0, 350.0, ConcreteGrade::C40, 10.0, 5000.0, 0.0)).unwrap();

    assert!(matches!(
        result.failure(),
        Some(DesignFailure::SectionCapacityExceeded { ratio }) if *ratio >= 1.0
    ));
    let last = result.trace.last().unwrap();
    assert_eq!(last.narrative, "Shear and Torsional max capacity");
    assert_eq!(
        last.conclusion.as_deref(),
        Some("Max capacity of section exceeded, Increase section size")
    );
    assert!(last.expressions.iter().any(|e| e.contains("45.0000 deg")));
}

#[test]
fn test_narrow_beam_has_no_bar_layout() {
    let result = design(&beam(120.0, 400.0, ConcreteGrade::C40, 20.0, 10.0, 0.0)).unwrap();

    assert!(matches!(
        result.failure(),
        Some(DesignFailure::ReinforcementLayoutInfeasible { .. })
    ));
    let last = result.trace.last().unwrap();
    assert_eq!(last.narrative, "Bending Reinforcement check");
    assert_eq!(
        last.conclusion.as_deref(),
        Some("Fail - Not able to find suitable reinforcement layout")
    );
}

#[test]
fn test_single_failing_entry_ends_trace() {
    let result = design(&beam(350.0, 350.0, ConcreteGrade::C40, 10_000.0, 10.0, 0.0)).unwrap();
    let failures = result.trace.iter().filter(|e| e.status == TraceStatus::Fail).count();
    assert_eq!(failures, 1);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_invalid_geometry_rejected() {
    let mut input = beam(350.0, 350.0, ConcreteGrade::C40, 10.0, 10.0, 0.0);
    input.geometry.depth_mm = 0.0;
    match design(&input) {
        Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "depth_mm"),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_unknown_link_diameter_rejected() {
    let mut input = beam(350.0, 350.0, ConcreteGrade::C40, 10.0, 10.0, 0.0);
    input.options.link_diameter_mm = 6.0;
    assert!(matches!(design(&input), Err(CalcError::UnknownDiameter { .. })));
}

#[test]
fn test_unknown_grade_rejected() {
    assert!(matches!(
        ConcreteGrade::from_str_flexible("55"),
        Err(CalcError::MaterialNotFound { .. })
    ));

    let json = r#"{
        "label": "B-1",
        "geometry": { "width_mm": 350.0, "depth_mm": 350.0, "cover_mm": 35.0 },
        "concrete_grade": "25",
        "rebar_fyk_mpa": 500.0,
        "loads": { "moment_knm": 10.0 }
    }"#;
    assert!(serde_json::from_str::<RcBeamInput>(json).is_err());
}

// =============================================================================
// Determinism and serialization
// =============================================================================

#[test]
fn test_design_is_repeatable() {
    let input = beam(300.0, 600.0, ConcreteGrade::C35, 280.0, 210.0, 12.0);
    assert_eq!(design(&input).unwrap(), design(&input).unwrap());
}

#[test]
fn test_input_from_json() {
    let json = r#"{
        "label": "B-2",
        "geometry": { "width_mm": 350.0, "depth_mm": 350.0, "cover_mm": 35.0 },
        "concrete_grade": "40",
        "rebar_fyk_mpa": 500.0,
        "loads": { "moment_knm": 10.0, "shear_kn": 10.0 }
    }"#;
    let input: RcBeamInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.options, DesignOptions::default());
    assert_eq!(input.loads.torsion_knm, 0.0);
    assert!(design(&input).unwrap().passes());
}

#[test]
fn test_result_json_roundtrip() {
    let result = design(&beam(350.0, 350.0, ConcreteGrade::C40, 10.0, 50.0, 20.0)).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: DesignResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_calculation_item_runs() {
    let item = CalculationItem::RcBeamSection(beam(350.0, 350.0, ConcreteGrade::C40, 10.0, 10.0, 0.0));
    let result = item.run().unwrap();
    assert_eq!(result.label, item.label());
    assert!(result.passes());
}
