use super::ordinal::ordinal_suffix;
use serde::{Deserialize, Serialize};

/// Why a registration number was rejected or limited, phrased so the form can
/// surface `summary()` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistrationIssue {
    EmptyInput,
    FormatMismatch,
    YearOutOfRange,
    UnknownLevelCode,
    FirstYearIneligible,
    BelowEligibleYear {
        year_of_study: i32,
        eligible_years: Vec<i32>,
    },
}

impl RegistrationIssue {
    pub fn summary(&self) -> String {
        match self {
            RegistrationIssue::EmptyInput => "Registration number is required".to_string(),
            RegistrationIssue::FormatMismatch => {
                "Invalid format. Expected: COURSE/LEVEL/NUMBER/YEAR (e.g., ITE/D/01-06605/2023)"
                    .to_string()
            }
            RegistrationIssue::YearOutOfRange => {
                "Invalid intake year in registration number".to_string()
            }
            RegistrationIssue::UnknownLevelCode => {
                "Invalid level code. Use D for Diploma, B for Degree".to_string()
            }
            RegistrationIssue::FirstYearIneligible => {
                "First-year students are not eligible to register".to_string()
            }
            RegistrationIssue::BelowEligibleYear {
                year_of_study,
                eligible_years,
            } => {
                let allowed = join_ordinals(eligible_years);
                format!(
                    "Year {year_of_study} students can view but cannot submit projects. \
                     Only {allowed} year students may submit."
                )
            }
        }
    }

    /// True when the registration number itself is unusable, as opposed to a
    /// well-formed number that merely lacks submission rights.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, RegistrationIssue::BelowEligibleYear { .. })
    }
}

fn join_ordinals(years: &[i32]) -> String {
    match years {
        [] => "no".to_string(),
        [only] => ordinal_suffix(*only),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(|year| ordinal_suffix(*year))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head} and {}", ordinal_suffix(*last))
        }
    }
}
