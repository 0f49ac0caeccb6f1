//! Static course and level tables backing the registration grammar.
//!
//! Extending either table is a data change only. Unknown course codes are a
//! soft miss (the resolver synthesizes a fallback label); unknown level codes
//! are a hard reject.

pub const COURSES: &[(&str, &str)] = &[
    ("ITE", "Information Technology"),
    ("BCS", "Computer Science"),
    ("BBIT", "Business Information Technology"),
    ("BIT", "Information Technology"),
    ("BSE", "Software Engineering"),
    ("BCE", "Computer Engineering"),
    ("CS", "Computer Science"),
    ("IT", "Information Technology"),
    ("SE", "Software Engineering"),
    ("IS", "Information Systems"),
    ("DS", "Data Science"),
    ("AI", "Artificial Intelligence"),
    ("CY", "Cyber Security"),
];

pub const LEVELS: &[(char, &str)] = &[
    ('D', "Diploma"),
    ('B', "Degree"),
    ('M', "Masters"),
    ('P', "PhD"),
];

pub fn course_title(code: &str) -> Option<&'static str> {
    COURSES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, title)| *title)
}

pub fn level_title(code: char) -> Option<&'static str> {
    LEVELS
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, title)| *title)
}
