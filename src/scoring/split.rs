//! Compound-name splitting
//!
//! Breaks a camelCase / snake_case / digit-suffixed identifier into its
//! sub-tokens so the semantic axis can compare names word by word.
//! Boundaries: underscores, lower-to-upper transitions, letter/digit
//! transitions, and the end of an acronym run (`HTTPServer` -> HTTP,
//! Server).

/// Split an identifier into sub-tokens, preserving original case.
/// An identifier with no boundaries comes back as a single token.
pub fn split_identifier(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = name.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' {
            flush(&mut tokens, &mut current);
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let case_boundary = prev.is_lowercase() && ch.is_uppercase();
            let digit_boundary = prev.is_ascii_digit() != ch.is_ascii_digit()
                && (prev.is_alphanumeric() && ch.is_alphanumeric());
            // End of an acronym run: "HTTPServer" splits before 'S'
            let acronym_boundary = prev.is_uppercase()
                && ch.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());

            if case_boundary || digit_boundary || acronym_boundary {
                flush(&mut tokens, &mut current);
            }
        }
        current.push(ch);
    }
    flush(&mut tokens, &mut current);
    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}
