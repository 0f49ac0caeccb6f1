use serde::{Deserialize, Serialize};

/// Outcome of checking a staff identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAssessment {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<StaffIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaffIssue {
    EmptyInput,
    FormatMismatch,
}

impl StaffIssue {
    pub fn summary(&self) -> &'static str {
        match self {
            StaffIssue::EmptyInput => "Staff ID is required",
            StaffIssue::FormatMismatch => "Staff ID must be 4-10 digits only (e.g., 123456)",
        }
    }
}

/// Staff IDs are opaque numeric identifiers, 4 to 10 digits after trimming.
/// Nothing further (role, department) is derived from them.
pub fn validate_staff_id(raw: &str) -> StaffAssessment {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return StaffAssessment {
            is_valid: false,
            issue: Some(StaffIssue::EmptyInput),
        };
    }

    let well_formed =
        (4..=10).contains(&cleaned.len()) && cleaned.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return StaffAssessment {
            is_valid: false,
            issue: Some(StaffIssue::FormatMismatch),
        };
    }

    StaffAssessment {
        is_valid: true,
        issue: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_four_to_ten_digit_ids() {
        assert!(validate_staff_id("1234").is_valid);
        assert!(validate_staff_id("12345").is_valid);
        assert!(validate_staff_id("1234567890").is_valid);
        assert!(validate_staff_id("  123456  ").is_valid);
    }

    #[test]
    fn rejects_empty_input() {
        let outcome = validate_staff_id("   ");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.issue, Some(StaffIssue::EmptyInput));
    }

    #[test]
    fn rejects_wrong_length_or_non_digits() {
        assert_eq!(
            validate_staff_id("12").issue,
            Some(StaffIssue::FormatMismatch)
        );
        assert_eq!(
            validate_staff_id("12345678901").issue,
            Some(StaffIssue::FormatMismatch)
        );
        assert_eq!(
            validate_staff_id("12a45").issue,
            Some(StaffIssue::FormatMismatch)
        );
    }
}
