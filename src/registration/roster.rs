//! Bulk audit of registration rosters exported as CSV.
//!
//! Admin exports carry a `Registration Number` column and an optional
//! `Full Name` column. Every row is assessed against the same policy and
//! calendar year; bad registration numbers are reported per row, so the only
//! hard failures are unreadable files or malformed CSV.

use super::{RegistrationAssessment, RegistrationResolver};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterAuditError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterAuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterAuditError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterAuditError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
        }
    }
}

impl std::error::Error for RosterAuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterAuditError::Io(err) => Some(err),
            RosterAuditError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterAuditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterAuditError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Registration Number")]
    registration_number: String,
    #[serde(
        rename = "Full Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    full_name: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// One audited roster row; `record` is the 1-based data row number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub record: u64,
    pub registration_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub assessment: RegistrationAssessment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub total: usize,
    pub valid: usize,
    pub submission_eligible: usize,
    pub flagged: usize,
}

pub struct RosterAudit {
    entries: Vec<RosterEntry>,
}

impl RosterAudit {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        resolver: &RegistrationResolver,
        current_year: i32,
    ) -> Result<Self, RosterAuditError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, resolver, current_year)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        resolver: &RegistrationResolver,
        current_year: i32,
    ) -> Result<Self, RosterAuditError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = row?;
            let assessment = resolver.assess(&row.registration_number, current_year);
            entries.push(RosterEntry {
                record: index as u64 + 1,
                registration_number: row.registration_number,
                full_name: row.full_name,
                assessment,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Rows whose registration number was rejected outright.
    pub fn flagged(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries
            .iter()
            .filter(|entry| !entry.assessment.is_valid)
    }

    pub fn summary(&self) -> RosterSummary {
        let valid = self
            .entries
            .iter()
            .filter(|entry| entry.assessment.is_valid)
            .count();
        let submission_eligible = self
            .entries
            .iter()
            .filter(|entry| entry.assessment.can_submit)
            .count();

        RosterSummary {
            total: self.entries.len(),
            valid,
            submission_eligible,
            flagged: self.entries.len() - valid,
        }
    }
}
