//! # Equation Registry
//!
//! Central registry of the Eurocode 2 expressions used by the section
//! designer. Each equation carries its clause reference, a plain-text
//! formula and variable definitions, so a reviewer can audit the trace
//! against the code without reading the solver.
//!
//! ## Usage
//!
//! ```rust
//! use rcbeam_core::equations::registry::Equation;
//!
//! // Reference string attached to trace entries
//! assert_eq!(Equation::LinkResistance.clause(), "(6.8)");
//!
//! // Full metadata for documentation
//! let meta = Equation::LinkResistance.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a design code or guidance document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// EN 1992-1-1:2004 Design of concrete structures, general rules
    EN1992 { clause: &'static str },
    /// The Concrete Centre, How to Design Concrete Structures using Eurocode 2
    ConcreteCentre { chapter: &'static str },
    /// Fundamental mechanics (no specific code reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::EN1992 { clause } => format!("EN 1992-1-1:2004 {}", clause),
            CodeReference::ConcreteCentre { chapter } => {
                format!("Concrete Centre, How to Design to EC2, {}", chapter)
            }
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::EN1992 { .. } => "EC2",
            CodeReference::ConcreteCentre { .. } => "TCC",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Material strengths and limits
    Materials,
    /// Section geometry and detailing rules
    SectionProperties,
    /// Bending design
    Flexure,
    /// Shear and torsion resistance
    ShearTorsion,
    /// Shear link design
    ShearLinks,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Materials => "Materials",
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::Flexure => "Flexure",
            EquationCategory::ShearTorsion => "Shear and Torsion",
            EquationCategory::ShearLinks => "Shear Links",
        }
    }

    /// Sort order for documentation (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Materials => 1,
            EquationCategory::SectionProperties => 2,
            EquationCategory::Flexure => 3,
            EquationCategory::ShearTorsion => 4,
            EquationCategory::ShearLinks => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "K", "d", "f_cd")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "mm", "N/mm^2")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one design expression.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All design expressions used by the section designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Materials
    // -------------------------------------------------------------------------
    /// Shear strength may not exceed that of C50/60
    StrengthClassLimit,
    /// fcd = αcc fck / γc
    DesignCompressiveStrength,

    // -------------------------------------------------------------------------
    // Section
    // -------------------------------------------------------------------------
    /// d = h - c - φw - φ/2
    EffectiveDepth,
    /// Minimum clear spacing between bars
    BarSpacing,

    // -------------------------------------------------------------------------
    // Flexure
    // -------------------------------------------------------------------------
    /// K = M/(b d² fck) and K' limit
    BendingDesign,
    /// z = d/2 (1 + √(1 - 3.53K))
    LeverArm,
    /// As,min = max(0.26 fctm b d/fyk, 0.0013 b d)
    MinimumTensionSteel,

    // -------------------------------------------------------------------------
    // Shear and torsion
    // -------------------------------------------------------------------------
    /// t_ef, A_k, u_k of the equivalent hollow section
    TorsionSection,
    /// V/V_Rd,max + T/T_Rd,max ≤ 1
    ShearTorsionMax,
    /// V/V_Rd,c + T/T_Rd,c ≤ 1
    ShearTorsionConcrete,
    /// ΣA_sl = T cot θ u_k/(2 A_k fyd)
    TorsionLongitudinalSteel,

    // -------------------------------------------------------------------------
    // Shear links
    // -------------------------------------------------------------------------
    /// V_Rd,s = (A_sw/s) z fywd cot θ
    LinkResistance,
    /// ρw,min = 0.08 √fck / fyk
    MinimumLinkRatio,
    /// s_l,max and s_t,max
    LinkSpacing,
}

impl Equation {
    /// Clause or expression number as printed in trace entries
    pub fn clause(&self) -> &'static str {
        match self {
            Equation::StrengthClassLimit => "3.1.2(2)P",
            Equation::DesignCompressiveStrength => "(3.15)",
            Equation::EffectiveDepth => "Fig 6.1",
            Equation::BarSpacing => "8.2(2)",
            Equation::BendingDesign => "6.1",
            Equation::LeverArm => "6.1",
            Equation::MinimumTensionSteel => "(9.1N)",
            Equation::TorsionSection => "6.3.2(1)",
            Equation::ShearTorsionMax => "(6.29)",
            Equation::ShearTorsionConcrete => "(6.31)",
            Equation::TorsionLongitudinalSteel => "(6.28)",
            Equation::LinkResistance => "(6.8)",
            Equation::MinimumLinkRatio => "(9.5N)",
            Equation::LinkSpacing => "9.2.2(6)",
        }
    }

    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        let reference = CodeReference::EN1992 { clause: self.clause() };
        match self {
            Equation::StrengthClassLimit => EquationMetadata {
                name: "Shear Strength Class Limit",
                description: "Concrete above C50/60 is designed with C50/60 strengths for shear and torsion",
                formula_plain: "f_ck,design = min(f_ck, 50)",
                reference,
                variables: vec![Variable::new("f_ck", "Characteristic cylinder strength", "N/mm^2")],
                category: EquationCategory::Materials,
                source_module: "materials/mod.rs",
                source_function: "MaterialProperties::resolve",
            },

            Equation::DesignCompressiveStrength => EquationMetadata {
                name: "Design Strengths",
                description: "Design compressive, tensile and yield strengths from characteristic values",
                formula_plain: "f_cd = 0.85 f_ck/1.5, f_ctd = f_ctk,0.05/1.5, f_yd = f_yk/1.15",
                reference,
                variables: vec![
                    Variable::new("f_cd", "Design compressive strength", "N/mm^2"),
                    Variable::new("f_ctd", "Design tensile strength", "N/mm^2"),
                    Variable::new("f_yd", "Design yield strength", "N/mm^2"),
                ],
                category: EquationCategory::Materials,
                source_module: "materials/mod.rs",
                source_function: "MaterialProperties::resolve",
            },

            Equation::EffectiveDepth => EquationMetadata {
                name: "Effective Depth",
                description: "Depth from the compression face to the centroid of each steel layer",
                formula_plain: "d = h - c - phi_w - phi/2, d2 = c + phi_w + phi2/2",
                reference,
                variables: vec![
                    Variable::new("h", "Section depth", "mm"),
                    Variable::new("c", "Nominal cover", "mm"),
                    Variable::new("phi_w", "Link diameter", "mm"),
                    Variable::new("phi", "Bar diameter", "mm"),
                ],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "effective_depth",
            },

            Equation::BarSpacing => EquationMetadata {
                name: "Clear Bar Spacing",
                description: "Clear gap between bars in one row against the governing minimum",
                formula_plain: "s = (b - 2c - 2phi_w)/(n - 1) - phi >= max(s_min, min(25, phi))",
                reference,
                variables: vec![
                    Variable::new("n", "Number of bars in the row", "-"),
                    Variable::new("s_min", "User minimum clear spacing", "mm"),
                ],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "clear_bar_spacing",
            },

            Equation::BendingDesign => EquationMetadata {
                name: "Bending Design",
                description: "Normalised moment and the singly reinforced limit",
                formula_plain: "K = M/(b d^2 f_ck), K' = min(0.6delta - 0.18delta^2 - 0.21, 0.168)",
                reference,
                variables: vec![
                    Variable::new("M", "Design moment", "kNm"),
                    Variable::new("K", "Normalised moment", "-"),
                    Variable::new("K'", "Singly reinforced limit", "-"),
                    Variable::new("delta", "Moment redistribution ratio", "-"),
                ],
                category: EquationCategory::Flexure,
                source_module: "equations/flexure.rs",
                source_function: "design_section",
            },

            Equation::LeverArm => EquationMetadata {
                name: "Lever Arm",
                description: "Lever arm of the internal couple, capped at 0.95d when singly reinforced",
                formula_plain: "z = d/2 (1 + sqrt(1 - 3.53 eta K)) <= 0.95d",
                reference: CodeReference::ConcreteCentre { chapter: "Beams" },
                variables: vec![
                    Variable::new("z", "Lever arm", "mm"),
                    Variable::new("eta", "High-strength stress block reduction", "-"),
                ],
                category: EquationCategory::Flexure,
                source_module: "equations/flexure.rs",
                source_function: "lever_arm",
            },

            Equation::MinimumTensionSteel => EquationMetadata {
                name: "Minimum Tension Reinforcement",
                description: "Lower bound on longitudinal tension steel",
                formula_plain: "A_s,min = max(0.26 f_ctm b d/f_yk, 0.0013 b d)",
                reference,
                variables: vec![
                    Variable::new("f_ctm", "Mean tensile strength", "N/mm^2"),
                    Variable::new("f_yk", "Characteristic yield strength", "N/mm^2"),
                ],
                category: EquationCategory::Flexure,
                source_module: "equations/flexure.rs",
                source_function: "minimum_tension_area",
            },

            Equation::TorsionSection => EquationMetadata {
                name: "Equivalent Thin-Walled Section",
                description: "Wall thickness, enclosed area and perimeter for torsion",
                formula_plain: "t_ef = max(A/u, 2(c + phi_w + phi/2)), A_k = (b - t_ef)(h - t_ef), u_k = 2(b + h - 2t_ef)",
                reference,
                variables: vec![
                    Variable::new("t_ef", "Effective wall thickness", "mm"),
                    Variable::new("A_k", "Enclosed area", "mm^2"),
                    Variable::new("u_k", "Perimeter of A_k", "mm"),
                ],
                category: EquationCategory::ShearTorsion,
                source_module: "equations/shear_torsion.rs",
                source_function: "torsion_section",
            },

            Equation::ShearTorsionMax => EquationMetadata {
                name: "Maximum Shear and Torsion",
                description: "Strut crushing interaction for combined shear and torsion",
                formula_plain: "T/T_Rd,max + V/V_Rd,max <= 1",
                reference,
                variables: vec![
                    Variable::new("T_Rd,max", "2 nu f_cd A_k t_ef sin(theta) cos(theta)", "kNm"),
                    Variable::new("V_Rd,max", "b z nu1 f_cd/(cot(theta) + tan(theta))", "kN"),
                    Variable::new("theta", "Strut angle", "rad"),
                ],
                category: EquationCategory::ShearTorsion,
                source_module: "equations/shear_torsion.rs",
                source_function: "interaction_ratio",
            },

            Equation::ShearTorsionConcrete => EquationMetadata {
                name: "Concrete Shear and Torsion Resistance",
                description: "Whether the unreinforced section carries the combined action",
                formula_plain: "T/T_Rd,c + V/V_Rd,c <= 1",
                reference,
                variables: vec![
                    Variable::new("T_Rd,c", "Torsional cracking moment", "kNm"),
                    Variable::new("V_Rd,c", "b d v_Rd,c", "kN"),
                    Variable::new("rho_l", "Tension steel ratio, <= 0.02", "-"),
                ],
                category: EquationCategory::ShearTorsion,
                source_module: "equations/shear_torsion.rs",
                source_function: "shear_resistance_concrete",
            },

            Equation::TorsionLongitudinalSteel => EquationMetadata {
                name: "Longitudinal Torsion Reinforcement",
                description: "Additional longitudinal steel distributed around the perimeter",
                formula_plain: "A_sl = T cot(theta) u_k/(2 A_k f_yd)",
                reference,
                variables: vec![Variable::new("A_sl", "Additional longitudinal steel", "mm^2")],
                category: EquationCategory::ShearTorsion,
                source_module: "equations/shear_torsion.rs",
                source_function: "longitudinal_torsion_steel",
            },

            Equation::LinkResistance => EquationMetadata {
                name: "Shear Link Resistance",
                description: "Shear carried by vertical links through the truss model",
                formula_plain: "V_Rd,s = (A_sw/s) z f_ywd cot(theta)",
                reference,
                variables: vec![
                    Variable::new("A_sw", "Area of link legs", "mm^2"),
                    Variable::new("s", "Link spacing", "mm"),
                    Variable::new("f_ywd", "Design yield strength of links", "N/mm^2"),
                ],
                category: EquationCategory::ShearLinks,
                source_module: "equations/shear_torsion.rs",
                source_function: "link_resistance",
            },

            Equation::MinimumLinkRatio => EquationMetadata {
                name: "Minimum Link Ratio",
                description: "Lower bound on the shear reinforcement ratio",
                formula_plain: "rho_w = A_sw/(s b) >= 0.08 sqrt(f_ck)/f_yk",
                reference,
                variables: vec![Variable::new("rho_w", "Shear reinforcement ratio", "-")],
                category: EquationCategory::ShearLinks,
                source_module: "equations/shear_torsion.rs",
                source_function: "minimum_link_ratio",
            },

            Equation::LinkSpacing => EquationMetadata {
                name: "Link Spacing Limits",
                description: "Maximum longitudinal and transverse spacing of link legs",
                formula_plain: "s_l,max = 0.75d, s_t,max = min(0.75d, 600)",
                reference,
                variables: vec![
                    Variable::new("s_l,max", "Maximum spacing along the beam", "mm"),
                    Variable::new("s_t,max", "Maximum spacing across the section", "mm"),
                ],
                category: EquationCategory::ShearLinks,
                source_module: "equations/shear_torsion.rs",
                source_function: "max_leg_spacing",
            },
        }
    }

    /// Get all equations in a category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// All categories in documentation order
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut categories = vec![
            EquationCategory::Materials,
            EquationCategory::SectionProperties,
            EquationCategory::Flexure,
            EquationCategory::ShearTorsion,
            EquationCategory::ShearLinks,
        ];
        categories.sort_by_key(|c| c.sort_order());
        categories
    }
}

/// Every registered equation, in documentation order
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::StrengthClassLimit,
    Equation::DesignCompressiveStrength,
    Equation::EffectiveDepth,
    Equation::BarSpacing,
    Equation::BendingDesign,
    Equation::LeverArm,
    Equation::MinimumTensionSteel,
    Equation::TorsionSection,
    Equation::ShearTorsionMax,
    Equation::ShearTorsionConcrete,
    Equation::TorsionLongitudinalSteel,
    Equation::LinkResistance,
    Equation::MinimumLinkRatio,
    Equation::LinkSpacing,
];

/// Render the registry as a markdown reference
pub fn generate_equations_markdown() -> String {
    let mut md = String::new();
    md.push_str("# RC Beam Equations Reference\n\n");
    md.push_str("Expressions used by the section designer, grouped by category.\n\n");

    for category in Equation::all_categories() {
        md.push_str(&format!("## {}\n\n", category.display_name()));
        for eq in Equation::in_category(category) {
            let meta = eq.metadata();
            md.push_str(&format!("### {}\n\n", meta.name));
            md.push_str(&format!("{}\n\n", meta.description));
            md.push_str(&format!("`{}`\n\n", meta.formula_plain));
            md.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            if !meta.variables.is_empty() {
                md.push_str("| Symbol | Description | Units |\n|---|---|---|\n");
                for var in &meta.variables {
                    md.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                md.push('\n');
            }
            md.push_str(&format!(
                "**Source:** `{}::{}`\n\n",
                meta.source_module, meta.source_function
            ));
        }
    }

    md.push_str(&format!("**Total Equations:** {}\n", ALL_EQUATIONS.len()));
    md
}
