//! Normalization of free-text cell input.

/// Canonical form of a category name as typed into a cell.
///
/// Whitespace runs collapse to a single space, leading and trailing
/// whitespace is dropped, the first character is title-cased and the rest
/// lower-cased: `"  dark   ROAST "` becomes `"Dark roast"`.
pub fn normalize_category_name(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let Some(first) = collapsed.chars().next() else {
        return String::new();
    };
    // Lower-case the whole string so final sigma sees its context.
    let lowered = collapsed.to_lowercase();
    let mut out = titlecase(first);
    out.extend(lowered.chars().skip(first.to_lowercase().count()));
    out
}

/// Title case of a single character. Differs from upper case for the
/// digraphs and for characters whose upper case expands (`ß` gives `Ss`).
fn titlecase(c: char) -> String {
    match c {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}'.to_string(),
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}'.to_string(),
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}'.to_string(),
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}'.to_string(),
        _ => {
            let mut upper = c.to_uppercase();
            let mut out: String = upper.next().into_iter().collect();
            out.extend(upper.flat_map(char::to_lowercase));
            out
        }
    }
}

/// Parse an integer cell. Surrounding whitespace is ignored.
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
