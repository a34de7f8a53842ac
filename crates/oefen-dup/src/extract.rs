use std::collections::BTreeSet;

/// Frequent Dutch words that never count as context words.
pub const STOPWORDS: [&str; 28] = [
    "alle", "antwoord", "bereken", "deze", "door", "elke", "geef", "heeft", "hebben", "hoeveel",
    "keer", "kies", "maar", "meer", "naar", "niet", "over", "samen", "schrijf", "totaal", "waar",
    "welk", "welke", "wordt", "worden", "zijn", "zoveel", "hoeveelste",
];

/// Minimum length of a context word, in characters.
pub const MIN_CONTEXT_LEN: usize = 4;

/// Ordered tuple of numeric tokens in a prompt.
///
/// A comma between two digits is read as a decimal separator and rewritten to
/// a period. A token holds at most one separator, so `3,4,5` reads as `3.4`
/// and `5`. A `-` directly before a digit is kept as a sign unless it follows
/// a letter or digit (then it is a hyphen or a minus operator). Everything
/// that is not part of a number is ignored.
pub fn numeric_core(prompt: &str) -> Vec<String> {
    let chars: Vec<char> = prompt.chars().collect();
    let mut tokens = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        let ch = chars[idx];
        let signed = ch == '-'
            && chars.get(idx + 1).map_or(false, char::is_ascii_digit)
            && (idx == 0 || !chars[idx - 1].is_alphanumeric());
        if !ch.is_ascii_digit() && !signed {
            idx += 1;
            continue;
        }
        let mut token = String::new();
        let mut separated = false;
        if signed {
            token.push('-');
            idx += 1;
        }
        while idx < chars.len() {
            let ch = chars[idx];
            let separator_then_digit = !separated
                && (ch == ',' || ch == '.')
                && chars.get(idx + 1).map_or(false, char::is_ascii_digit);
            if ch.is_ascii_digit() {
                token.push(ch);
            } else if separator_then_digit {
                token.push('.');
                separated = true;
            } else {
                break;
            }
            idx += 1;
        }
        tokens.push(token);
    }
    tokens
}

/// Distinct lowercase context words of a prompt.
pub fn context_tokens(prompt: &str) -> BTreeSet<String> {
    prompt
        .split(|ch: char| !ch.is_alphabetic())
        .filter(|word| word.chars().count() >= MIN_CONTEXT_LEN)
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}
