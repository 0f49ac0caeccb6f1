//! Registration identity parsing and submission eligibility.
//!
//! The archive keys every student profile on a registration number of the
//! form `COURSE/LEVEL/NUMBER/YEAR` (e.g. `ITE/D/01-06605/2023`). This module
//! parses that grammar, derives the year of study from the intake year, and
//! decides whether the student may submit a project. Everything here is pure
//! and deterministic for a given calendar year: failures are carried as data
//! on the assessment, never raised as errors.

pub mod catalog;
mod eligibility;
mod identity;
mod issue;
mod ordinal;
pub mod roster;
mod staff;

pub use eligibility::EligibilityConfig;
pub use identity::RegistrationIdentity;
pub use issue::RegistrationIssue;
pub use ordinal::ordinal_suffix;
pub use staff::{validate_staff_id, StaffAssessment, StaffIssue};

use catalog::{course_title, level_title};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// Stateless resolver applying the eligibility policy to registration numbers.
pub struct RegistrationResolver {
    config: EligibilityConfig,
}

impl RegistrationResolver {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Assesses a registration number against an explicit calendar year.
    ///
    /// The year is a parameter so the function stays pure and testable; use
    /// [`RegistrationResolver::assess_now`] at the edges where wall-clock
    /// time is wanted.
    pub fn assess(&self, raw: &str, current_year: i32) -> RegistrationAssessment {
        if raw.trim().is_empty() {
            return RegistrationAssessment::rejected(RegistrationIssue::EmptyInput);
        }

        let normalized = raw.trim().to_uppercase();
        let Some(identity) = RegistrationIdentity::parse(&normalized) else {
            return RegistrationAssessment::rejected(RegistrationIssue::FormatMismatch);
        };

        if identity.intake_year < self.config.min_intake_year
            || identity.intake_year > current_year
        {
            return RegistrationAssessment::rejected(RegistrationIssue::YearOutOfRange);
        }

        let Some(level) = level_title(identity.level_code) else {
            return RegistrationAssessment::rejected(RegistrationIssue::UnknownLevelCode);
        };

        let year_of_study = current_year - identity.intake_year + 1;
        let course_name = match course_title(&identity.course_code) {
            Some(title) => format!("{level} in {title}"),
            None => format!("{level} - {} Program", identity.course_code),
        };

        // Current-year intakes are first-years regardless of the arithmetic:
        // the format checks out but the student cannot register yet.
        if identity.intake_year == current_year {
            return RegistrationAssessment {
                is_valid: false,
                year_of_study: Some(1),
                course_name: Some(course_name),
                level_of_study: Some(level.to_string()),
                can_submit: false,
                issue: Some(RegistrationIssue::FirstYearIneligible),
            };
        }

        let can_submit = self.config.submission_years.contains(&year_of_study);
        let issue = if can_submit {
            None
        } else {
            Some(RegistrationIssue::BelowEligibleYear {
                year_of_study,
                eligible_years: self.config.submission_years.clone(),
            })
        };

        RegistrationAssessment {
            is_valid: true,
            year_of_study: Some(year_of_study),
            course_name: Some(course_name),
            level_of_study: Some(level.to_string()),
            can_submit,
            issue,
        }
    }

    /// Assesses against the wall-clock year.
    pub fn assess_now(&self, raw: &str) -> RegistrationAssessment {
        self.assess(raw, Local::now().year())
    }
}

impl Default for RegistrationResolver {
    fn default() -> Self {
        Self::new(EligibilityConfig::default())
    }
}

/// Outcome of checking a single registration number.
///
/// A rejected number carries `is_valid = false` and no derived fields; the
/// first-year case keeps the derived fields so the form can still show the
/// course, but is likewise not valid for registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationAssessment {
    pub is_valid: bool,
    pub year_of_study: Option<i32>,
    pub course_name: Option<String>,
    pub level_of_study: Option<String>,
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<RegistrationIssue>,
}

impl RegistrationAssessment {
    fn rejected(issue: RegistrationIssue) -> Self {
        Self {
            is_valid: false,
            year_of_study: None,
            course_name: None,
            level_of_study: None,
            can_submit: false,
            issue: Some(issue),
        }
    }

    /// Human-readable explanation when the assessment carries an issue.
    pub fn message(&self) -> Option<String> {
        self.issue.as_ref().map(RegistrationIssue::summary)
    }
}
