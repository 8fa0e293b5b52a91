//! # Section Design Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Results and trace (JSON-serializable)
//! - `design(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! A valid input that does not produce a workable section still returns
//! `Ok`; the failure is part of the result.
//!
//! ## Available Calculations
//!
//! - [`rc_beam`] - Rectangular reinforced concrete beam section (EN 1992-1-1)

pub mod rc_beam;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use rc_beam::{DesignFailure, DesignOutcome, DesignResult, RcBeamInput};

/// Enum wrapper for all calculation types.
///
/// Lets collaborators keep mixed calculations in one collection while
/// keeping clean tagged JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Rectangular RC beam section design
    RcBeamSection(RcBeamInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::RcBeamSection(b) => &b.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::RcBeamSection(_) => "RcBeamSection",
        }
    }

    /// Run the calculation
    pub fn run(&self) -> CalcResult<DesignResult> {
        match self {
            CalculationItem::RcBeamSection(input) => rc_beam::design(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::rc_beam::test_support::input;

    #[test]
    fn test_item_tagged_json() {
        let item = CalculationItem::RcBeamSection(input(300.0, 450.0, 50.0, 40.0, 0.0));
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"RcBeamSection\""));

        let back: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
        assert_eq!(back.label(), "Test");
        assert_eq!(back.calc_type(), "RcBeamSection");
    }

    #[test]
    fn test_item_runs_design() {
        let item = CalculationItem::RcBeamSection(input(350.0, 350.0, 10.0, 10.0, 0.0));
        assert!(item.run().unwrap().passes());
    }
}
