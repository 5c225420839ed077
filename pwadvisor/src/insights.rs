//! Plain-language explanations for the patterns the strength estimator finds.

use crate::strength::{PatternKind, PatternMatch, StrengthReport};

/// Explains why `m` makes the password easier to guess.
///
/// Brute-force segments carry no structure worth explaining and yield `None`.
pub fn insight(m: &PatternMatch) -> Option<String> {
    let token = &m.token;
    let message = match m.kind {
        PatternKind::Dictionary => format!(
            "Contains the dictionary word \u{201c}{token}\u{201d}, \
             which guessing models try early."
        ),
        PatternKind::Date => format!(
            "Includes the date \u{201c}{token}\u{201d}, \
             the kind of value found in public records."
        ),
        PatternKind::Repeat => {
            format!("Repeats \u{201c}{token}\u{201d}, which makes it predictable.")
        }
        PatternKind::Sequence => {
            format!("Sequential characters \u{201c}{token}\u{201d} are trivial to predict.")
        }
        PatternKind::Regex => format!("Common pattern \u{201c}{token}\u{201d} detected."),
        PatternKind::Spatial => {
            format!("Keyboard walk \u{201c}{token}\u{201d} is one of the first things guessed.")
        }
        PatternKind::BruteForce => return None,
    };
    Some(message)
}

/// Explanations for every explainable match in `report`, in password order.
pub fn insights(report: &StrengthReport) -> Vec<String> {
    report.matches.iter().filter_map(insight).collect()
}
