//! Standard Bar and Link Diameters
//!
//! The discrete diameters the section designer may choose from. Both lists
//! are ordered smallest first; every diameter search in the solver walks
//! them by index and treats the last entry as the end of the search.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Millimeters, SqMm};

/// Longitudinal bar diameters (mm)
pub const BAR_DIAMETERS_MM: [f64; 7] = [10.0, 12.0, 16.0, 20.0, 25.0, 32.0, 40.0];

/// Shear link diameters (mm)
pub const LINK_DIAMETERS_MM: [f64; 8] = [8.0, 10.0, 12.0, 16.0, 20.0, 25.0, 32.0, 40.0];

/// Which list a diameter comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogKind {
    Bar,
    Link,
}

impl CatalogKind {
    fn name(&self) -> &'static str {
        match self {
            CatalogKind::Bar => "bar",
            CatalogKind::Link => "link",
        }
    }
}

/// Read-only view over one of the diameter lists.
///
/// `Copy` and borrow-free, so concurrent design runs can share it freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Catalog {
    kind: CatalogKind,
    diameters: &'static [f64],
}

impl Catalog {
    /// Longitudinal bar catalog
    pub const fn bars() -> Self {
        Catalog {
            kind: CatalogKind::Bar,
            diameters: &BAR_DIAMETERS_MM,
        }
    }

    /// Shear link catalog
    pub const fn links() -> Self {
        Catalog {
            kind: CatalogKind::Link,
            diameters: &LINK_DIAMETERS_MM,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.diameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diameters.is_empty()
    }

    pub fn diameters(&self) -> &'static [f64] {
        self.diameters
    }

    /// Diameter at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<f64> {
        self.diameters.get(index).copied()
    }

    /// Index of an exact catalog diameter.
    ///
    /// # Errors
    ///
    /// `CalcError::UnknownDiameter` if the size is not stocked.
    pub fn index_of(&self, diameter_mm: f64) -> CalcResult<usize> {
        self.diameters
            .iter()
            .position(|&d| d == diameter_mm)
            .ok_or_else(|| CalcError::unknown_diameter(self.kind.name(), diameter_mm))
    }

    /// Index of the next larger diameter, or `None` at the end of the list
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.diameters.len()).then_some(next)
    }
}

/// Cross-sectional area of `count` bars of one diameter (mm²)
pub fn bars_area(count: u32, diameter_mm: f64) -> f64 {
    SqMm::of_bar(Millimeters(diameter_mm)).value() * f64::from(count)
}
