/// Formats an academic year ordinal for display ("1st", "2nd", "3rd", "4th").
///
/// Deliberately naive: every year outside 1-3 takes the "th" suffix, so 11
/// renders as "11th" but 21 renders as "21th". Registration copy has always
/// been worded this way; keep the rule stable rather than fixing the English.
pub fn ordinal_suffix(year: i32) -> String {
    match year {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        other => format!("{other}th"),
    }
}
