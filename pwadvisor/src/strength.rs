use serde::Serialize;
use tracing::debug;
use zxcvbn::matching::Match;
use zxcvbn::matching::patterns::MatchPattern;

/// Coarse strength bucket for a 0-4 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    /// Scores above 4 are treated as 4.
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => StrengthLevel::VeryWeak,
            1 => StrengthLevel::Weak,
            2 => StrengthLevel::Fair,
            3 => StrengthLevel::Strong,
            _ => StrengthLevel::VeryStrong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }

    /// Fill of a strength meter, 20% for the weakest bucket up to 100%.
    pub fn meter_percent(self) -> u8 {
        (self as u8 + 1) * 20
    }
}

/// The kind of guessable structure the estimator found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Dictionary,
    Date,
    Repeat,
    Sequence,
    Regex,
    Spatial,
    BruteForce,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub kind: PatternKind,
    /// The part of the password the pattern covers.
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthReport {
    pub score: u8,
    pub level: StrengthLevel,
    pub matches: Vec<PatternMatch>,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
    /// Human readable time to crack with fast offline hashing (1e10 guesses/s).
    pub crack_time: String,
}

/// External strength estimator.
pub trait StrengthOracle: Send + Sync {
    /// Returns `None` when the estimator cannot score `password` (e.g. it is empty).
    fn estimate(&self, password: &str) -> Option<StrengthReport>;
}

/// [`StrengthOracle`] backed by the zxcvbn estimator.
#[derive(Debug, Clone, Default)]
pub struct ZxcvbnOracle {
    user_inputs: Vec<String>,
}

impl ZxcvbnOracle {
    /// Words the estimator should treat as known to an attacker, such as parts of
    /// the user's email address.
    pub fn with_user_inputs(user_inputs: Vec<String>) -> Self {
        Self { user_inputs }
    }
}

impl StrengthOracle for ZxcvbnOracle {
    fn estimate(&self, password: &str) -> Option<StrengthReport> {
        let user_inputs: Vec<&str> = self.user_inputs.iter().map(String::as_str).collect();
        let entropy = match zxcvbn::zxcvbn(password, &user_inputs) {
            Ok(entropy) => entropy,
            Err(e) => {
                debug!(error = %e, "strength estimate unavailable");
                return None;
            }
        };

        let (warning, suggestions) = match entropy.feedback() {
            Some(feedback) => (
                feedback.warning().map(|w| w.to_string()),
                feedback.suggestions().iter().map(|s| s.to_string()).collect(),
            ),
            None => (None, Vec::new()),
        };

        Some(StrengthReport {
            score: entropy.score(),
            level: StrengthLevel::from_score(entropy.score()),
            matches: entropy.sequence().iter().map(pattern_match).collect(),
            warning,
            suggestions,
            crack_time: entropy.crack_times().offline_fast_hashing_1e10_per_second().to_string(),
        })
    }
}

fn pattern_match(m: &Match) -> PatternMatch {
    let kind = match m.pattern {
        MatchPattern::Dictionary(_) => PatternKind::Dictionary,
        MatchPattern::Date(_) => PatternKind::Date,
        MatchPattern::Repeat(_) => PatternKind::Repeat,
        MatchPattern::Sequence(_) => PatternKind::Sequence,
        MatchPattern::Regex(_) => PatternKind::Regex,
        MatchPattern::Spatial(_) => PatternKind::Spatial,
        MatchPattern::BruteForce => PatternKind::BruteForce,
    };
    PatternMatch { kind, token: m.token.clone() }
}
