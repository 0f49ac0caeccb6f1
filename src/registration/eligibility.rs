use serde::{Deserialize, Serialize};

/// Policy knobs for submission eligibility.
///
/// The defaults encode the archive rules: cohorts from 2000 onwards, with
/// project submission restricted to 3rd and 5th year students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Years of study allowed to submit projects.
    pub submission_years: Vec<i32>,
    /// Oldest intake year the grammar accepts.
    pub min_intake_year: i32,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            submission_years: vec![3, 5],
            min_intake_year: 2000,
        }
    }
}
