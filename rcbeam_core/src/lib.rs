//! # rcbeam_core - Reinforced Concrete Beam Section Design
//!
//! Designs the longitudinal and shear reinforcement of rectangular
//! reinforced concrete beam sections to EN 1992-1-1 (Eurocode 2). Given the
//! section, the concrete grade, the reinforcement yield strength and the
//! design moment, shear and torsion, the solver walks a catalog of standard
//! bar and link diameters until every check is met, and records each check
//! in a design trace.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one pure `design` call per section, no shared state
//! - **JSON-First**: all inputs, results and traces implement Serialize/Deserialize
//! - **Rich Errors**: invalid input is a [`CalcError`]; a section that does
//!   not work is a [`DesignFailure`](calculations::rc_beam::DesignFailure)
//!   inside the result
//! - **Traceable**: every intermediate value is in the [`trace::DesignTrace`]
//!
//! ## Quick Start
//!
//! ```rust
//! use rcbeam_core::calculations::rc_beam::{design, DesignOptions, LoadDemand, RcBeamInput, SectionGeometry};
//! use rcbeam_core::materials::ConcreteGrade;
//!
//! let input = RcBeamInput {
//!     label: "B-1".to_string(),
//!     geometry: SectionGeometry { width_mm: 300.0, depth_mm: 500.0, cover_mm: 30.0 },
//!     concrete_grade: ConcreteGrade::C30,
//!     rebar_fyk_mpa: 500.0,
//!     loads: LoadDemand { moment_knm: 120.0, shear_kn: 90.0, torsion_knm: 0.0 },
//!     options: DesignOptions::default(),
//! };
//!
//! let result = design(&input).unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("Bending Reinforcement check"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The section designer and its stages
//! - [`equations`] - Eurocode 2 formulas and clause references
//! - [`materials`] - Concrete grades, reinforcement, bar and link catalogs
//! - [`trace`] - Ordered record of every check
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod trace;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::rc_beam::{design, DesignFailure, DesignOutcome, DesignResult, RcBeamInput};
pub use calculations::CalculationItem;
pub use errors::{CalcError, CalcResult};
pub use trace::{DesignTrace, TraceEntry, TraceStatus};
