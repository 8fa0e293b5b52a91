//! # Design Trace
//!
//! The audit record of a design run: one [`TraceEntry`] per resolved check,
//! in the order the checks resolved.
//!
//! Entries are built with a small builder and handed to [`DesignTrace::push`].
//! After that they can only be read. There is no `&mut` access to a stored
//! entry, so the record a caller receives is exactly what each solver stage
//! reported when it made its decision.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::trace::{DesignTrace, TraceEntry, TraceStatus};
//!
//! let mut trace = DesignTrace::new();
//! trace.push(
//!     TraceEntry::new("Shear link requirements")
//!         .expr("s = 200 mm")
//!         .reference("(6.8)")
//!         .conclusion("Pass")
//!         .pass(),
//! );
//!
//! assert_eq!(trace.len(), 1);
//! assert_eq!(trace.entries()[0].status, TraceStatus::Pass);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome flag attached to a trace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceStatus {
    /// Informational entry (no check verdict)
    #[default]
    None,
    /// Check satisfied
    Pass,
    /// Check failed; a failing entry ends the run
    Fail,
}

impl TraceStatus {
    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            TraceStatus::None => "",
            TraceStatus::Pass => "PASS",
            TraceStatus::Fail => "FAIL",
        }
    }
}

/// One recorded check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// What was checked, in words
    pub narrative: String,
    /// Formatted expressions, in the order they were evaluated
    pub expressions: Vec<String>,
    /// Code clause or expression number, e.g. "(6.29)"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Verdict text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    pub status: TraceStatus,
}

impl TraceEntry {
    pub fn new(narrative: impl Into<String>) -> Self {
        TraceEntry {
            narrative: narrative.into(),
            expressions: Vec::new(),
            reference: None,
            conclusion: None,
            status: TraceStatus::None,
        }
    }

    /// Append a formatted expression
    pub fn expr(mut self, expression: impl Into<String>) -> Self {
        self.expressions.push(expression.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn conclusion(mut self, conclusion: impl Into<String>) -> Self {
        self.conclusion = Some(conclusion.into());
        self
    }

    pub fn pass(mut self) -> Self {
        self.status = TraceStatus::Pass;
        self
    }

    pub fn fail(mut self) -> Self {
        self.status = TraceStatus::Fail;
        self
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.narrative)?;
        if let Some(reference) = &self.reference {
            write!(f, "  [{}]", reference)?;
        }
        writeln!(f)?;
        for expression in &self.expressions {
            writeln!(f, "    {}", expression)?;
        }
        match (&self.conclusion, self.status) {
            (Some(conclusion), TraceStatus::None) => writeln!(f, "  => {}", conclusion)?,
            (Some(conclusion), status) => writeln!(f, "  => {} [{}]", conclusion, status.label())?,
            (None, TraceStatus::None) => {}
            (None, status) => writeln!(f, "  => [{}]", status.label())?,
        }
        Ok(())
    }
}

/// Append-only, ordered sequence of trace entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignTrace {
    entries: Vec<TraceEntry>,
}

impl DesignTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved check
    pub fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    /// All entries in creation order
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    /// First entry whose narrative matches exactly
    pub fn find(&self, narrative: &str) -> Option<&TraceEntry> {
        self.entries.iter().find(|e| e.narrative == narrative)
    }

    /// Whether any entry carries a failing verdict
    pub fn has_failure(&self) -> bool {
        self.entries.iter().any(|e| e.status == TraceStatus::Fail)
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a DesignTrace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for DesignTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
