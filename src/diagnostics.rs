//! Structured reporting of degraded, non-fatal conversion and synchronization paths.

use core::fmt;

/// How serious a [`Diagnostic`] is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Severity {
    /// Informational, nothing was lost.
    Info,
    /// Something was skipped or only partially supported.
    Warning,
}

/// The degraded path a [`Diagnostic`] reports.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum DiagnosticKind {
    /// A plane collision shape was dropped: planes have no canonical geometry yet.
    UnsupportedPlane {
        /// The entity (or link) owning the plane.
        owner: String,
    },
    /// A component exposes several collision shapes and was split into parts.
    ///
    /// Attachment and ordering of such objects are best-effort only.
    MultipleShapes {
        /// The entity (or link) owning the shapes.
        owner: String,
        /// The number of shapes.
        count: usize,
    },
    /// The reserved ground entity had no collision shape and was skipped.
    IgnoredGround {
        /// The name of the ground entity.
        name: String,
    },
    /// The live shape count of a composite object no longer matches its parts.
    ShapeCountMismatch {
        /// The composite object.
        name: String,
        /// Number of parts registered at construction.
        expected: usize,
        /// Number of shapes found in the simulation.
        found: usize,
    },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnsupportedPlane { owner } => {
                write!(f, "no support for plane collision shapes yet (dropped from '{owner}')")
            }
            DiagnosticKind::MultipleShapes { owner, count } => write!(
                f,
                "got {count} collision shapes for '{owner}': only one shape per component is \
                 properly supported, attached-object features may not work for it"
            ),
            DiagnosticKind::IgnoredGround { name } => {
                write!(f, "ignoring '{name}': it has no collision shape")
            }
            DiagnosticKind::ShapeCountMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "composite object '{name}' was built with {expected} shapes but the simulation now has {found}"
            ),
        }
    }
}

/// A single diagnostic record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// The severity of this diagnostic.
    pub severity: Severity,
    /// What happened.
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.severity, self.kind)
    }
}

/// An ordered collection of diagnostics.
///
/// Every pushed diagnostic is also forwarded to the `log` facade.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic with the given severity.
    pub fn push(&mut self, severity: Severity, kind: DiagnosticKind) {
        match severity {
            Severity::Info => log::info!("{kind}"),
            Severity::Warning => log::warn!("{kind}"),
        }
        self.records.push(Diagnostic { severity, kind });
    }

    /// Records a [`Severity::Warning`].
    pub fn warn(&mut self, kind: DiagnosticKind) {
        self.push(Severity::Warning, kind)
    }

    /// Moves every diagnostic of `other` at the end of `self`, without logging them again.
    pub fn append(&mut self, other: &mut Diagnostics) {
        self.records.append(&mut other.records)
    }

    /// The recorded diagnostics, oldest first.
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Iterates through the diagnostics with at least the given severity.
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(move |d| d.severity >= severity)
    }

    /// Removes and returns every recorded diagnostic.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        core::mem::take(&mut self.records)
    }

    /// The number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is this collection empty?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
