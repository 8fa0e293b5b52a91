//! Concrete Strength Classes (EN 1992-1-1 Table 3.1)
//!
//! Strength and deformation characteristics for normal-weight concrete.
//! Only the classes offered in the section designer are tabulated; the
//! selection list is fixed and anything else is rejected before design.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Concrete strength class, identified by characteristic cylinder strength fck.
///
/// Serializes as the fck number string (`"40"`), the same token users pick
/// from the grade list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConcreteGrade {
    #[serde(rename = "30")]
    C30,
    #[serde(rename = "35")]
    C35,
    #[serde(rename = "40")]
    C40,
    #[serde(rename = "45")]
    C45,
    #[serde(rename = "50")]
    C50,
    #[serde(rename = "60")]
    C60,
    #[serde(rename = "70")]
    C70,
    #[serde(rename = "80")]
    C80,
    #[serde(rename = "90")]
    C90,
}

impl ConcreteGrade {
    /// All grades for UI selection, weakest first
    pub const ALL: [ConcreteGrade; 9] = [
        ConcreteGrade::C30,
        ConcreteGrade::C35,
        ConcreteGrade::C40,
        ConcreteGrade::C45,
        ConcreteGrade::C50,
        ConcreteGrade::C60,
        ConcreteGrade::C70,
        ConcreteGrade::C80,
        ConcreteGrade::C90,
    ];

    /// Highest grade whose strength may be used for shear and torsion
    pub const SHEAR_STRENGTH_LIMIT: ConcreteGrade = ConcreteGrade::C50;

    /// Characteristic cylinder strength fck (MPa)
    pub fn fck_mpa(&self) -> f64 {
        match self {
            ConcreteGrade::C30 => 30.0,
            ConcreteGrade::C35 => 35.0,
            ConcreteGrade::C40 => 40.0,
            ConcreteGrade::C45 => 45.0,
            ConcreteGrade::C50 => 50.0,
            ConcreteGrade::C60 => 60.0,
            ConcreteGrade::C70 => 70.0,
            ConcreteGrade::C80 => 80.0,
            ConcreteGrade::C90 => 90.0,
        }
    }

    /// Parse from common string representations ("40", "C40", "C40/50")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let token = s.trim().to_uppercase();
        let token = token.strip_prefix('C').unwrap_or(token.as_str());
        let fck = token.split('/').next().unwrap_or_default();
        match fck {
            "30" => Ok(ConcreteGrade::C30),
            "35" => Ok(ConcreteGrade::C35),
            "40" => Ok(ConcreteGrade::C40),
            "45" => Ok(ConcreteGrade::C45),
            "50" => Ok(ConcreteGrade::C50),
            "60" => Ok(ConcreteGrade::C60),
            "70" => Ok(ConcreteGrade::C70),
            "80" => Ok(ConcreteGrade::C80),
            "90" => Ok(ConcreteGrade::C90),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Display name with the cube strength, e.g. "C40/50"
    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteGrade::C30 => "C30/37",
            ConcreteGrade::C35 => "C35/45",
            ConcreteGrade::C40 => "C40/50",
            ConcreteGrade::C45 => "C45/55",
            ConcreteGrade::C50 => "C50/60",
            ConcreteGrade::C60 => "C60/75",
            ConcreteGrade::C70 => "C70/85",
            ConcreteGrade::C80 => "C80/95",
            ConcreteGrade::C90 => "C90/105",
        }
    }

    /// Whether this grade lies in the high-strength region (fck > 50 MPa)
    pub fn is_high_strength(&self) -> bool {
        self.fck_mpa() > 50.0
    }

    /// Look up the tabulated properties for this grade
    pub fn properties(&self) -> ConcreteProperties {
        ConcreteProperties::lookup(*self)
    }
}

impl Default for ConcreteGrade {
    fn default() -> Self {
        ConcreteGrade::C40
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ConcreteGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}

/// Tabulated strength and strain values for one concrete class.
///
/// Stresses in MPa, strains in per mille (‰), modulus in GPa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteProperties {
    /// Grade the row belongs to
    pub grade: ConcreteGrade,
    /// Characteristic cylinder strength fck
    pub fck: f64,
    /// Mean axial tensile strength fctm
    pub fctm: f64,
    /// 5% fractile tensile strength fctk,0.05
    pub fctk_005: f64,
    /// Ultimate strain εcu2 (parabola-rectangle diagram)
    pub eps_cu2: f64,
    /// Ultimate strain εcu3 (bilinear diagram)
    pub eps_cu3: f64,
    /// Secant modulus of elasticity Ecm (GPa)
    pub ecm_gpa: f64,
}

impl ConcreteProperties {
    /// Look up EN 1992-1-1 Table 3.1 values for a grade.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rcbeam_core::materials::{ConcreteGrade, ConcreteProperties};
    ///
    /// let props = ConcreteProperties::lookup(ConcreteGrade::C40);
    /// assert_eq!(props.fctm, 3.5);
    /// ```
    pub fn lookup(grade: ConcreteGrade) -> Self {
        let (fctm, fctk_005, eps_cu2, eps_cu3, ecm_gpa) = match grade {
            ConcreteGrade::C30 => (2.9, 2.0, 3.5, 3.5, 33.0),
            ConcreteGrade::C35 => (3.2, 2.2, 3.5, 3.5, 34.0),
            ConcreteGrade::C40 => (3.5, 2.5, 3.5, 3.5, 35.0),
            ConcreteGrade::C45 => (3.8, 2.7, 3.5, 3.5, 36.0),
            ConcreteGrade::C50 => (4.1, 2.9, 3.5, 3.5, 37.0),
            ConcreteGrade::C60 => (4.4, 3.1, 2.9, 2.9, 39.0),
            ConcreteGrade::C70 => (4.6, 3.2, 2.7, 2.7, 41.0),
            ConcreteGrade::C80 => (4.8, 3.4, 2.6, 2.6, 42.0),
            ConcreteGrade::C90 => (5.0, 3.5, 2.6, 2.6, 44.0),
        };
        ConcreteProperties {
            grade,
            fck: grade.fck_mpa(),
            fctm,
            fctk_005,
            eps_cu2,
            eps_cu3,
            ecm_gpa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parsing() {
        assert_eq!(ConcreteGrade::from_str_flexible("40").unwrap(), ConcreteGrade::C40);
        assert_eq!(ConcreteGrade::from_str_flexible("C40").unwrap(), ConcreteGrade::C40);
        assert_eq!(ConcreteGrade::from_str_flexible("c40/50").unwrap(), ConcreteGrade::C40);
        assert_eq!(" 90 ".parse::<ConcreteGrade>().unwrap(), ConcreteGrade::C90);
    }

    #[test]
    fn test_unknown_grade_rejected() {
        let err = ConcreteGrade::from_str_flexible("55").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
        assert!(ConcreteGrade::from_str_flexible("25").is_err());
        assert!(ConcreteGrade::from_str_flexible("").is_err());
    }

    #[test]
    fn test_table_lookup() {
        let c30 = ConcreteProperties::lookup(ConcreteGrade::C30);
        assert_eq!(c30.fck, 30.0);
        assert_eq!(c30.fctk_005, 2.0);

        let c70 = ConcreteProperties::lookup(ConcreteGrade::C70);
        assert_eq!(c70.eps_cu3, 2.7);
    }

    #[test]
    fn test_tensile_strength_increases_with_grade() {
        let fctm: Vec<f64> = ConcreteGrade::ALL.iter().map(|g| g.properties().fctm).collect();
        assert!(fctm.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_high_strength_region() {
        assert!(!ConcreteGrade::C50.is_high_strength());
        assert!(ConcreteGrade::C60.is_high_strength());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ConcreteGrade::C45).unwrap();
        assert_eq!(json, "\"45\"");
        let parsed: ConcreteGrade = serde_json::from_str("\"80\"").unwrap();
        assert_eq!(parsed, ConcreteGrade::C80);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConcreteGrade::C40.to_string(), "C40/50");
    }
}
