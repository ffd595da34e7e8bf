//! Mood labeling for transcripts.
//!
//! A [`PolarityScorer`] yields a compound score in `[-1, 1]`; [`Mood::from_score`]
//! buckets it with strict thresholds at `±0.2`, so a score of exactly `0.2` or
//! `-0.2` is [`Mood::Neutral`].

use serde::Serialize;
use std::collections::HashMap;

/// Scores above this are happy, scores below its negation are sad.
pub const MOOD_THRESHOLD: f64 = 0.2;

/// Produces a compound polarity score in `[-1, 1]`.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    Happy,
    Sad,
    Neutral,
}

impl Mood {
    pub fn from_score(score: f64) -> Self {
        if score > MOOD_THRESHOLD {
            Mood::Happy
        } else if score < -MOOD_THRESHOLD {
            Mood::Sad
        } else {
            Mood::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Neutral => "Neutral",
        }
    }

    /// Companion suggestion shown alongside the mood.
    pub fn suggestion(self) -> &'static str {
        match self {
            Mood::Happy => "Keep the momentum going",
            Mood::Sad => "Take a break and talk to someone you trust",
            Mood::Neutral => "Reflect",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const NEGATION_SCALAR: f64 = -0.74;
const BOOST: f64 = 0.293;
const EXCLAMATION_BOOST: f64 = 0.292;
const NORMALIZATION_ALPHA: f64 = 15.0;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "none", "neither", "nor", "cannot", "dont",
    "don't", "isnt", "isn't", "wasnt", "wasn't", "cant", "can't", "wont", "won't", "didnt",
    "didn't", "aint", "ain't", "without",
];

const BOOSTERS: &[&str] = &[
    "very", "really", "extremely", "so", "incredibly", "totally", "absolutely", "super",
    "deeply", "truly",
];

const LEXICON: &[(&str, f64)] = &[
    ("happy", 2.7),
    ("glad", 2.0),
    ("great", 3.1),
    ("good", 1.9),
    ("awesome", 3.1),
    ("amazing", 2.8),
    ("excited", 1.4),
    ("love", 3.2),
    ("loved", 2.9),
    ("like", 1.5),
    ("enjoy", 2.2),
    ("fun", 2.3),
    ("proud", 2.1),
    ("grateful", 2.0),
    ("thankful", 2.0),
    ("thanks", 1.9),
    ("calm", 1.3),
    ("confident", 2.2),
    ("hopeful", 1.9),
    ("hope", 1.9),
    ("win", 2.8),
    ("won", 2.7),
    ("success", 2.7),
    ("nice", 1.8),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("relaxed", 2.2),
    ("best", 3.2),
    ("better", 1.9),
    ("improve", 1.9),
    ("motivated", 1.8),
    ("smile", 1.5),
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("lonely", -2.0),
    ("alone", -1.0),
    ("tired", -1.9),
    ("exhausted", -1.5),
    ("stressed", -1.4),
    ("stress", -1.8),
    ("anxious", -1.0),
    ("worried", -1.2),
    ("worry", -1.9),
    ("afraid", -2.2),
    ("scared", -1.9),
    ("angry", -2.3),
    ("upset", -1.6),
    ("depressed", -2.3),
    ("hate", -2.7),
    ("bad", -2.5),
    ("awful", -2.0),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("lost", -1.3),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("cry", -2.1),
    ("problem", -1.7),
    ("difficult", -1.5),
    ("hard", -0.4),
    ("overwhelmed", -1.5),
    ("frustrated", -2.4),
    ("bored", -1.1),
];

/// Small lexicon-based analyzer with negation, intensifier and `!` handling.
pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|t| {
                t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|t| !t.is_empty())
            .collect();

        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&valence) = self.lexicon.get(token.as_str()) else {
                continue;
            };
            let mut valence = valence;

            if i > 0 && BOOSTERS.contains(&tokens[i - 1].as_str()) {
                valence += BOOST * valence.signum();
            }

            let window = &tokens[i.saturating_sub(3)..i];
            if window.iter().any(|w| NEGATIONS.contains(&w.as_str())) {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }

        if sum != 0.0 {
            let exclamations = text.matches('!').count().min(4) as f64;
            sum += exclamations * EXCLAMATION_BOOST * sum.signum();
        }

        normalize(sum)
    }
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}
