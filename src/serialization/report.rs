//! Per-member report records and their line rendering.
//!
//! Each validated member becomes one [`MemberReport`]. Its [`std::fmt::Display`] output is the
//! report line:
//!
//! ```text
//! Name: "X", Type: "System.Int32", Is Value: True
//! ERROR: INVALID: Setter isn't public!
//! ```
//!
//! Reports are handed to a [`ReportEmitter`] one at a time; [`LineEmitter`] writes the lines to
//! any [`std::io::Write`].

use std::{fmt, io::Write};

use crate::{
    metadata::{token::Token, typesystem::MemberDescriptor},
    serialization::{Eligibility, IneligibleReason},
    Result,
};

/// The verdict for one member, detached from the descriptors it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberReport {
    /// Token of the field or property
    pub token: Token,
    /// Full name of the declaring type
    pub declaring_type: String,
    /// Member name
    pub name: String,
    /// `Field` or `Property`
    pub kind: &'static str,
    /// Validation result
    pub eligibility: Eligibility,
}

impl MemberReport {
    /// Creates the report of `member` with its validation result.
    #[must_use]
    pub fn new(member: &MemberDescriptor, eligibility: Eligibility) -> Self {
        MemberReport {
            token: member.token,
            declaring_type: member.declaring_type.name.clone(),
            name: member.name.clone(),
            kind: member.kind.label(),
            eligibility,
        }
    }

    /// Returns `true` if the member is serialized.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.eligibility.is_eligible()
    }

    /// The rejection reason, `None` for eligible members.
    #[must_use]
    pub fn reason(&self) -> Option<IneligibleReason> {
        self.eligibility.reason()
    }
}

impl fmt::Display for MemberReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.eligibility {
            Eligibility::Eligible {
                declared_type_name,
                is_value_type,
            } => write!(
                f,
                "Name: \"{}\", Type: \"{}\", Is Value: {}",
                self.name,
                declared_type_name,
                if *is_value_type { "True" } else { "False" }
            ),
            Eligibility::Ineligible(reason) => write!(f, "ERROR: {reason}"),
        }
    }
}

/// Receives member reports in walk order.
pub trait ReportEmitter {
    /// Handles the next report.
    ///
    /// # Errors
    /// Returns an error if the report cannot be written.
    fn emit(&mut self, report: &MemberReport) -> Result<()>;

    /// Called once after the last report.
    ///
    /// # Errors
    /// Returns an error if buffered output cannot be written.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects reports in memory.
impl ReportEmitter for Vec<MemberReport> {
    fn emit(&mut self, report: &MemberReport) -> Result<()> {
        self.push(report.clone());
        Ok(())
    }
}

/// Writes one line per report.
pub struct LineEmitter<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> LineEmitter<W> {
    /// Creates an emitter writing to `writer`.
    pub fn new(writer: W) -> Self {
        LineEmitter { writer, lines: 0 }
    }

    /// Number of lines written so far.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportEmitter for LineEmitter<W> {
    fn emit(&mut self, report: &MemberReport) -> Result<()> {
        writeln!(self.writer, "{report}")?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Hands every report of `reports` to `emitter`, then finishes it.
///
/// # Errors
/// Returns the first error of the emitter.
pub fn emit_all<'a, E>(
    emitter: &mut E,
    reports: impl IntoIterator<Item = &'a MemberReport>,
) -> Result<()>
where
    E: ReportEmitter + ?Sized,
{
    for report in reports {
        emitter.emit(report)?;
    }
    emitter.finish()
}
