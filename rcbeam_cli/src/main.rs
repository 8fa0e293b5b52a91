//! # RC Beam CLI
//!
//! Designs one rectangular reinforced concrete beam section from command
//! line flags or a JSON input file and prints the results and the design
//! trace.
//!
//! **Usage:**
//! ```text
//! rcbeam --width 350 --depth 350 --cover 35 --grade C40 --moment 10 --shear 10
//! rcbeam --input beam.json --json
//! rcbeam --equations EQUATIONS.md
//! ```
//!
//! Exits with 1 when the design fails and 2 when the input is invalid.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rcbeam_core::calculations::rc_beam::{
    design, DesignOptions, DesignResult, LoadDemand, RcBeamInput, SectionGeometry,
};
use rcbeam_core::equations::generate_equations_markdown;
use rcbeam_core::errors::{CalcError, CalcResult};
use rcbeam_core::materials::ConcreteGrade;

/// The section was designed but at least one check fails
const EXIT_DESIGN_FAILED: i32 = 1;
/// The input could not be read or does not describe a designable section
const EXIT_INVALID_INPUT: i32 = 2;

/// Design the reinforcement of a rectangular RC beam section (EN 1992-1-1).
#[derive(Parser)]
#[command(name = "rcbeam", about = "Reinforced concrete beam section design to Eurocode 2")]
struct Args {
    /// JSON file holding a complete design input; overrides the section flags
    #[arg(long)]
    input: Option<PathBuf>,

    /// Print the result as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Write the equations reference (markdown) to a file, or stdout with "-"
    #[arg(long, value_name = "PATH")]
    equations: Option<PathBuf>,

    /// Section label
    #[arg(long, default_value = "B-1")]
    label: String,

    /// Section width b (mm)
    #[arg(long, default_value_t = 350.0)]
    width: f64,

    /// Overall depth h (mm)
    #[arg(long, default_value_t = 350.0)]
    depth: f64,

    /// Nominal cover (mm)
    #[arg(long, default_value_t = 35.0)]
    cover: f64,

    /// Concrete grade ("40", "C40" or "C40/50")
    #[arg(long, default_value = "C40")]
    grade: String,

    /// Reinforcement yield strength fyk (MPa)
    #[arg(long, default_value_t = 500.0)]
    fyk: f64,

    /// Design moment M_Ed (kNm)
    #[arg(long, default_value_t = 0.0)]
    moment: f64,

    /// Design shear V_Ed (kN)
    #[arg(long, default_value_t = 0.0)]
    shear: f64,

    /// Design torsion T_Ed (kNm)
    #[arg(long, default_value_t = 0.0)]
    torsion: f64,

    /// Smallest bar diameter tried (mm)
    #[arg(long)]
    min_bar: Option<f64>,

    /// Link diameter (mm)
    #[arg(long)]
    link: Option<f64>,

    /// Minimum link spacing (mm)
    #[arg(long)]
    min_link_spacing: Option<f64>,

    /// Minimum clear bar spacing (mm)
    #[arg(long)]
    min_bar_spacing: Option<f64>,
}

impl Args {
    fn to_input(&self) -> CalcResult<RcBeamInput> {
        if let Some(path) = &self.input {
            let text = fs::read_to_string(path)
                .map_err(|e| CalcError::invalid_input("input", path.display().to_string(), e.to_string()))?;
            return Ok(serde_json::from_str(&text)?);
        }

        let defaults = DesignOptions::default();
        Ok(RcBeamInput {
            label: self.label.clone(),
            geometry: SectionGeometry {
                width_mm: self.width,
                depth_mm: self.depth,
                cover_mm: self.cover,
            },
            concrete_grade: ConcreteGrade::from_str_flexible(&self.grade)?,
            rebar_fyk_mpa: self.fyk,
            loads: LoadDemand {
                moment_knm: self.moment,
                shear_kn: self.shear,
                torsion_knm: self.torsion,
            },
            options: DesignOptions {
                min_bar_diameter_mm: self.min_bar.unwrap_or(defaults.min_bar_diameter_mm),
                link_diameter_mm: self.link.unwrap_or(defaults.link_diameter_mm),
                min_link_spacing_mm: self.min_link_spacing.unwrap_or(defaults.min_link_spacing_mm),
                min_bar_spacing_mm: self.min_bar_spacing.unwrap_or(defaults.min_bar_spacing_mm),
            },
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let code = run(&args)?;
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}

/// Run one invocation and return the process exit code.
fn run(args: &Args) -> Result<i32> {
    if let Some(path) = &args.equations {
        let markdown = generate_equations_markdown();
        if path.as_os_str() == "-" {
            print!("{}", markdown);
        } else {
            fs::write(path, &markdown).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {} bytes to {}", markdown.len(), path.display());
        }
        return Ok(0);
    }

    let designed = args.to_input().and_then(|input| design(&input).map(|result| (input, result)));
    let (input, result) = match designed {
        Ok(designed) => designed,
        Err(e) => {
            eprintln!("Error: {}", e);
            if args.json {
                eprintln!("{}", serde_json::to_string_pretty(&e)?);
            }
            return Ok(EXIT_INVALID_INPUT);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&input, &result);
    }

    if !result.passes() {
        return Ok(EXIT_DESIGN_FAILED);
    }
    Ok(0)
}

fn print_report(input: &RcBeamInput, result: &DesignResult) {
    let g = &input.geometry;
    let m = &result.materials;

    println!("═══════════════════════════════════════");
    println!("  RC BEAM SECTION DESIGN: {}", result.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Section:  {:.0} x {:.0} mm, cover {:.0} mm", g.width_mm, g.depth_mm, g.cover_mm);
    println!("  Concrete: {} (design basis {})", m.selected_grade, m.design_basis_grade);
    println!("  Rebar:    f_yk = {:.0} MPa", m.rebar.fyk);
    println!(
        "  Actions:  M = {:.1} kNm, V = {:.1} kN, T = {:.1} kNm",
        input.loads.moment_knm, input.loads.shear_kn, input.loads.torsion_knm
    );
    println!();

    println!("Reinforcement:");
    match result.tension {
        Some(tension) => println!("  Tension:     {} ({:.0} mm^2)", tension, tension.area_mm2()),
        None => println!("  Tension:     -"),
    }
    if let Some(compression) = result.compression {
        println!("  Compression: {} ({:.0} mm^2)", compression, compression.area_mm2());
    }
    match result.links {
        Some(links) => println!(
            "  Links:       {:.0} mm, {} legs at {:.0} mm",
            links.diameter_mm, links.legs, links.spacing_mm
        ),
        None => println!("  Links:       -"),
    }
    if let Some(a_sl) = result.capacity.and_then(|c| c.a_sl_mm2) {
        println!("  Torsion A_sl: {:.0} mm^2 around the perimeter", a_sl);
    }
    if let Some(theta) = result.theta_degrees() {
        println!("  Strut angle: {:.2} deg", theta);
    }
    println!();

    println!("Design trace:");
    println!("{}", result.trace);

    println!("═══════════════════════════════════════");
    match result.failure() {
        None => println!("  RESULT: PASS"),
        Some(failure) => println!("  RESULT: FAIL ({})", failure),
    }
    println!("═══════════════════════════════════════");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(flags: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("rcbeam").chain(flags.iter().copied())).unwrap()
    }

    #[test]
    fn test_passing_design_exits_zero() {
        assert_eq!(run(&args(&["--moment", "10", "--shear", "10"])).unwrap(), 0);
    }

    #[test]
    fn test_failing_design_exit_code() {
        let code = run(&args(&["--moment", "10000", "--shear", "10"])).unwrap();
        assert_eq!(code, EXIT_DESIGN_FAILED);
    }

    #[test]
    fn test_unknown_grade_is_invalid_input() {
        let a = args(&["--grade", "55", "--moment", "10", "--shear", "10"]);
        assert!(matches!(a.to_input(), Err(CalcError::MaterialNotFound { .. })));
        assert_eq!(run(&a).unwrap(), EXIT_INVALID_INPUT);
    }

    #[test]
    fn test_bad_geometry_is_invalid_input() {
        let code = run(&args(&["--cover", "200", "--moment", "10"])).unwrap();
        assert_eq!(code, EXIT_INVALID_INPUT);
    }

    #[test]
    fn test_unreadable_input_file_is_invalid_input() {
        let missing = std::env::temp_dir().join(format!("rcbeam-missing-{}.json", process::id()));
        let a = args(&["--input", missing.to_str().unwrap()]);
        assert!(matches!(a.to_input(), Err(CalcError::InvalidInput { .. })));
        assert_eq!(run(&a).unwrap(), EXIT_INVALID_INPUT);
    }

    #[test]
    fn test_malformed_input_file_is_invalid_input() {
        let path = std::env::temp_dir().join(format!("rcbeam-malformed-{}.json", process::id()));
        fs::write(&path, r#"{ "label": "B-1", "geometry": "#).unwrap();
        let a = args(&["--input", path.to_str().unwrap(), "--json"]);
        let parsed = a.to_input();
        let code = run(&a).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(matches!(parsed, Err(CalcError::SerializationError { .. })));
        assert_eq!(code, EXIT_INVALID_INPUT);
    }
}
