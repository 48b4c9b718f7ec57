//! Turns free-form model output into a short list of bullet insights.

/// Maximum number of insights kept from one response.
const MAX_INSIGHTS: usize = 5;

/// Lines this short are headings or noise, not insights.
const MIN_INSIGHT_CHARS: usize = 10;

/// Split `text` into at most five `• `-prefixed sentences.
///
/// Leading list markers (digits, `.`, `*`, `-`, spaces) are stripped, short
/// lines are dropped, and each insight is capitalised and ends with a period.
/// May return an empty list.
#[must_use]
pub fn parse_insights(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .map(|line| line.trim_start_matches(|c: char| c.is_ascii_digit() || ".*- ".contains(c)))
        .filter(|line| line.chars().count() > MIN_INSIGHT_CHARS)
        .map(normalise_sentence)
        .take(MAX_INSIGHTS)
        .map(|insight| format!("• {insight}"))
        .collect()
}

fn normalise_sentence(line: &str) -> String {
    let mut chars = line.chars();
    let mut sentence: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if !sentence.ends_with('.') {
        sentence.push('.');
    }
    sentence
}
