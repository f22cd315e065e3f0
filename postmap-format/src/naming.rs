//! Key naming convention
//!
//! Field identifiers are declared in capitalized-word form (`ReturnPath`,
//! `IPAddress`) or already in snake_case; wire keys are always lowercase words
//! joined by single underscores.

/// Convert an identifier to its wire key
///
/// - A word starts at an uppercase letter that follows a lowercase letter or
///   a digit, and at the last letter of an uppercase run that is followed by
///   a lowercase letter, so `IPAddress` becomes `ip_address`.
/// - Digits stay attached to the word before them.
/// - Underscores and other non-alphanumeric characters act as separators;
///   separators never double up and never lead or trail.
///
/// Snake_case input is returned unchanged.
pub fn to_snake_case(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(identifier.len() + 4);

    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            push_separator(&mut out);
            continue;
        }

        if ch.is_uppercase() {
            let prev = idx.checked_sub(1).and_then(|p| chars.get(p)).copied();
            let next = chars.get(idx + 1).copied();
            let starts_word = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if starts_word {
                push_separator(&mut out);
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with('_') {
        out.push('_');
    }
}
