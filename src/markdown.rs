//! Presentation-boundary formatter for provider output.
//!
//! Providers return loosely structured text with `Category:` section labels.
//! This pass turns those sections into markdown headings and normalizes
//! every entry into a list item.

const SECTION_LABELS: &[&str] = &[
    "Breaking Changes",
    "Features",
    "Improvements",
    "Bug Fixes",
    "Security",
    "Performance",
    "Documentation",
    "Dependencies",
    "Refactor",
    "Tests",
    "Other",
];

/// Keyword table for `#keyword` sub-item labels, matched case-insensitively.
/// Unknown keywords fall through to the neutral tag.
const KEYWORD_TAGS: &[(&str, &str)] = &[
    ("feature", "Feature"),
    ("feat", "Feature"),
    ("fix", "Fix"),
    ("bugfix", "Fix"),
    ("security", "Security"),
    ("perf", "Performance"),
    ("performance", "Performance"),
    ("docs", "Docs"),
    ("doc", "Docs"),
    ("deps", "Dependencies"),
    ("dependencies", "Dependencies"),
    ("refactor", "Refactor"),
    ("test", "Test"),
    ("tests", "Test"),
    ("ci", "CI"),
    ("build", "Build"),
    ("chore", "Chore"),
    ("style", "Style"),
    ("i18n", "I18n"),
    ("a11y", "A11y"),
    ("ui", "UI"),
    ("ux", "UX"),
];

const NEUTRAL_TAG: &str = "Change";

pub fn to_markdown(raw: &str) -> String {
    let mut output = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(label) = section_label(trimmed) {
            if !output.is_empty() {
                output.push(String::new());
            }
            output.push(format!("### {label}"));
            output.push(String::new());
            continue;
        }

        let content = strip_bullet(trimmed);
        if content.is_empty() {
            continue;
        }

        if let Some(rest) = content.strip_prefix('#') {
            let (keyword, text) = split_keyword(rest);
            let tag = keyword_tag(keyword);
            output.push(format!("- **{tag}:** {}", text.trim()));
        } else {
            output.push(format!("- {content}"));
        }
    }

    output.join("\n")
}

/// Matches a section header by exact label, e.g. `Features:`.
fn section_label(line: &str) -> Option<&'static str> {
    let name = line.strip_suffix(':')?;
    SECTION_LABELS.iter().find(|label| **label == name).copied()
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', '*', '•', ' ', '\t'])
}

fn split_keyword(rest: &str) -> (&str, &str) {
    match rest.find(|c: char| c == ':' || c.is_whitespace()) {
        Some(pos) => (&rest[..pos], rest[pos..].trim_start_matches([':', ' ', '\t'])),
        None => (rest, ""),
    }
}

fn keyword_tag(keyword: &str) -> &'static str {
    let lowered = keyword.to_lowercase();
    KEYWORD_TAGS
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, tag)| *tag)
        .unwrap_or(NEUTRAL_TAG)
}
