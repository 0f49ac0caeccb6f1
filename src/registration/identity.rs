use serde::{Deserialize, Serialize};

/// Structured fields of a registration number such as `ITE/D/01-06605/2023`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationIdentity {
    pub course_code: String,
    pub level_code: char,
    pub serial_number: String,
    pub intake_year: i32,
}

impl RegistrationIdentity {
    /// Parses a normalized (trimmed, uppercased) registration number.
    ///
    /// The whole string must match `COURSE/LEVEL/NN-NNNN[NN]/YYYY`; partial
    /// matches are rejected outright rather than salvaged.
    pub fn parse(normalized: &str) -> Option<Self> {
        let mut segments = normalized.split('/');
        let course = segments.next()?;
        let level = segments.next()?;
        let serial = segments.next()?;
        let year = segments.next()?;
        if segments.next().is_some() {
            return None;
        }

        if course.is_empty() || !course.bytes().all(|b| b.is_ascii_uppercase()) {
            return None;
        }

        let mut level_chars = level.chars();
        let level_code = level_chars.next()?;
        if level_chars.next().is_some() || !level_code.is_ascii_uppercase() {
            return None;
        }

        if !serial_well_formed(serial) {
            return None;
        }

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let intake_year = year.parse().ok()?;

        Some(Self {
            course_code: course.to_string(),
            level_code,
            serial_number: serial.to_string(),
            intake_year,
        })
    }
}

// Serial numbers run `NN-NNNN` through `NN-NNNNNN` and stay opaque beyond
// this shape check.
fn serial_well_formed(serial: &str) -> bool {
    let Some((prefix, suffix)) = serial.split_once('-') else {
        return false;
    };

    prefix.len() == 2
        && prefix.bytes().all(|b| b.is_ascii_digit())
        && (4..=6).contains(&suffix.len())
        && suffix.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_canonical_example() {
        let identity = RegistrationIdentity::parse("ITE/D/01-06605/2023").expect("parses");
        assert_eq!(identity.course_code, "ITE");
        assert_eq!(identity.level_code, 'D');
        assert_eq!(identity.serial_number, "01-06605");
        assert_eq!(identity.intake_year, 2023);
    }

    #[test]
    fn accepts_serial_suffixes_from_four_to_six_digits() {
        assert!(RegistrationIdentity::parse("BCS/B/12-3456/2022").is_some());
        assert!(RegistrationIdentity::parse("BCS/B/12-345678/2022").is_some());
        assert!(RegistrationIdentity::parse("BCS/B/12-345/2022").is_none());
        assert!(RegistrationIdentity::parse("BCS/B/12-3456789/2022").is_none());
    }

    #[test]
    fn rejects_wrong_separators_and_extra_segments() {
        assert!(RegistrationIdentity::parse("ITE-D-01-06605-2023").is_none());
        assert!(RegistrationIdentity::parse("ITE/D/01-06605/2023/extra").is_none());
        assert!(RegistrationIdentity::parse("ITE/D/01-06605").is_none());
    }

    #[test]
    fn rejects_malformed_fields() {
        // lowercase input must be normalized before parsing
        assert!(RegistrationIdentity::parse("ite/d/01-06605/2023").is_none());
        assert!(RegistrationIdentity::parse("IT3/D/01-06605/2023").is_none());
        assert!(RegistrationIdentity::parse("ITE/DD/01-06605/2023").is_none());
        assert!(RegistrationIdentity::parse("ITE/D/1-06605/2023").is_none());
        assert!(RegistrationIdentity::parse("ITE/D/01-06605/23").is_none());
        assert!(RegistrationIdentity::parse("ITE/D/01-06605/20233").is_none());
        assert!(RegistrationIdentity::parse("ITE//01-06605/2023").is_none());
    }
}
