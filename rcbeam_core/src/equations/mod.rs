//! # Eurocode 2 Design Equations
//!
//! The pure formulas behind the section designer. Keeping them in one place
//! lets each expression be checked against its clause and tested with
//! plain numbers, separate from the search loops and the trace text.
//!
//! ## Modules
//!
//! - [`section`] - Rectangular section geometry, effective depths, bar spacing
//! - [`flexure`] - K-method bending design
//! - [`shear_torsion`] - Strut angle model, torsion, concrete resistance, links
//! - [`registry`] - Equation metadata and clause references
//!
//! ## Units
//!
//! - **Lengths**: mm
//! - **Stresses**: N/mm²
//! - **Forces**: kN at the function boundary
//! - **Moments**: kNm at the function boundary
//! - **Angles**: radians
//!
//! ## References
//!
//! - EN 1992-1-1:2004 Eurocode 2: Design of concrete structures
//! - The Concrete Centre, How to Design Concrete Structures using Eurocode 2

pub mod flexure;
pub mod registry;
pub mod section;
pub mod shear_torsion;

// Re-export commonly used items
pub use flexure::{design_section, FlexureDesign, FlexureOutcome, FlexureTrial};
pub use registry::{
    generate_equations_markdown, CodeReference, Equation, EquationCategory, EquationMetadata, ALL_EQUATIONS,
};
pub use shear_torsion::{torsion_section, TorsionSection, THETA_MAX, THETA_MIN, THETA_STEP};
