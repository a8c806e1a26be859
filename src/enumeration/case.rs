//! Word splitting and case joining for variant names

/// Splits a variant name into words.
///
/// - Names containing `_` or `-` are split on those characters
/// - Names without both upper and lower case letters are one word
/// - Anything else is split before each uppercase letter
///
/// Empty words are dropped. Words are lowercased.
pub fn tokenize(name: &str) -> Vec<String> {
    if name.contains(['_', '-']) {
        return name
            .split(['_', '-'])
            .filter(|word| !word.trim().is_empty())
            .map(str::to_lowercase)
            .collect();
    }

    let has_upper = name.chars().any(char::is_uppercase);
    let has_lower = name.chars().any(char::is_lowercase);
    if !(has_upper && has_lower) {
        if name.trim().is_empty() {
            return Vec::new();
        }
        return vec![name.to_lowercase()];
    }

    let mut words = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn join_upper(words: &[String], separator: &str) -> String {
    words
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn join_lower(words: &[String], separator: &str) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn join_pascal(words: &[String]) -> String {
    words.iter().map(|w| capitalize(&w.to_lowercase())).collect()
}

pub fn join_camel(words: &[String]) -> String {
    let pascal = join_pascal(words);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
