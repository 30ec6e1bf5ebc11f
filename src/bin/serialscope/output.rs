use std::io::Write;

use serde::Serialize;
use serialscope::serialization::{Eligibility, MemberReport};

use crate::app::GlobalOptions;

/// Write `data` as JSON (if `--json`) to `out`, or call `display_fn` for the report lines.
pub fn print_output<T: Serialize, W: Write>(
    out: &mut W,
    data: &T,
    opts: &GlobalOptions,
    display_fn: impl FnOnce(&mut W, &T) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    if opts.json {
        serde_json::to_writer_pretty(&mut *out, data)?;
        writeln!(out)?;
        Ok(())
    } else {
        display_fn(out, data)
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MemberEntry {
    pub token: String,
    pub declaring_type: String,
    pub name: String,
    pub kind: &'static str,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_value_type: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<&MemberReport> for MemberEntry {
    fn from(report: &MemberReport) -> Self {
        let mut entry = MemberEntry {
            token: report.token.to_string(),
            declaring_type: report.declaring_type.clone(),
            name: report.name.clone(),
            kind: report.kind,
            eligible: report.is_eligible(),
            declared_type: None,
            is_value_type: None,
            reason: None,
            message: None,
        };

        match &report.eligibility {
            Eligibility::Eligible {
                declared_type_name,
                is_value_type,
            } => {
                entry.declared_type = Some(declared_type_name.clone());
                entry.is_value_type = Some(*is_value_type);
            }
            Eligibility::Ineligible(reason) => {
                entry.reason = Some(reason.into());
                entry.message = Some(reason.message());
            }
        }

        entry
    }
}

#[derive(Debug, Serialize)]
pub struct TypeOutput {
    #[serde(rename = "type")]
    pub type_name: String,
    pub members: Vec<MemberEntry>,
    pub eligible: usize,
}

impl TypeOutput {
    pub fn new(type_name: &str, reports: &[MemberReport]) -> Self {
        TypeOutput {
            type_name: type_name.to_string(),
            members: reports.iter().map(MemberEntry::from).collect(),
            eligible: reports.iter().filter(|report| report.is_eligible()).count(),
        }
    }
}
