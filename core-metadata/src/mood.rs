//! Keyword-driven mood classification for catalog tracks.
//!
//! Classification is intentionally shallow: a fixed set of keyword groups is
//! tested against the lowercased title and channel name, first match wins.
//! The tag feeds theming downstream; it never influences playback.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Mood tag attached to a track for presentation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTag {
    Energetic,
    Calm,
    Happy,
    Melancholic,
    Romantic,
    Aggressive,
    Spiritual,
    Festive,
    Nostalgic,
    Default,
}

impl MoodTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTag::Energetic => "energetic",
            MoodTag::Calm => "calm",
            MoodTag::Happy => "happy",
            MoodTag::Melancholic => "melancholic",
            MoodTag::Romantic => "romantic",
            MoodTag::Aggressive => "aggressive",
            MoodTag::Spiritual => "spiritual",
            MoodTag::Festive => "festive",
            MoodTag::Nostalgic => "nostalgic",
            MoodTag::Default => "default",
        }
    }
}

impl Default for MoodTag {
    fn default() -> Self {
        MoodTag::Default
    }
}

/// Keyword groups in priority order. Each group carries two alternation
/// sets; matching either one assigns the tag. Inputs are lowercased before
/// testing, so the patterns stay lowercase.
fn mood_rules() -> &'static Vec<(MoodTag, [Regex; 2])> {
    static RULES: OnceLock<Vec<(MoodTag, [Regex; 2])>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rule = |tag, a: &str, b: &str| {
            (tag, [Regex::new(a).unwrap(), Regex::new(b).unwrap()])
        };
        vec![
            rule(
                MoodTag::Energetic,
                r"\b(edm|electronic|dance|techno|house|dubstep|trance|remix|bass|drop|beat|party|club|rave)\b",
                r"\b(energy|power|pump|hype|fire|lit|bangers?)\b",
            ),
            rule(
                MoodTag::Calm,
                r"\b(calm|relax|chill|peaceful|meditation|ambient|soft|gentle|soothing|sleep|study)\b",
                r"\b(piano|acoustic|instrumental|classical|nature|rain|ocean)\b",
            ),
            rule(
                MoodTag::Happy,
                r"\b(happy|joy|celebration|upbeat|cheerful|bright|sunny|smile|laugh|fun|good vibes)\b",
                r"\b(pop|uplifting|positive|feel good|good mood)\b",
            ),
            rule(
                MoodTag::Melancholic,
                r"\b(sad|melancholy|depression|lonely|heartbreak|tears|cry|sorrow|pain|loss|goodbye)\b",
                r"\b(blues|minor|slow|emotional|deep|dark)\b",
            ),
            rule(
                MoodTag::Romantic,
                r"\b(love|romantic|romance|heart|valentine|wedding|couple|kiss|together|forever)\b",
                r"\b(ballad|serenade|intimate|tender|sweet)\b",
            ),
            rule(
                MoodTag::Aggressive,
                r"\b(rock|metal|punk|hardcore|aggressive|angry|rage|fight|war|battle|heavy)\b",
                r"\b(guitar|drums|scream|loud|intense|brutal)\b",
            ),
            rule(
                MoodTag::Spiritual,
                r"\b(spiritual|devotional|bhajan|kirtan|prayer|god|divine|sacred|temple|church|meditation)\b",
                r"\b(mantra|chant|religious|holy|blessed|peace|soul)\b",
            ),
            rule(
                MoodTag::Festive,
                r"\b(festival|celebration|party|wedding|birthday|holiday|christmas|diwali|holi|new year)\b",
                r"\b(festive|carnival|parade|dance|traditional|folk)\b",
            ),
            rule(
                MoodTag::Nostalgic,
                r"\b(nostalgic|retro|vintage|old|classic|memories|childhood|90s|80s|70s|golden)\b",
                r"\b(throwback|remember|past|history|traditional)\b",
            ),
        ]
    })
}

/// Classify a track's mood from its title and channel name.
///
/// Deterministic and total: the same inputs always produce the same tag,
/// and unmatched inputs produce [`MoodTag::Default`].
pub fn classify_mood(title: &str, channel_name: &str) -> MoodTag {
    let combined = format!("{} {}", title.to_lowercase(), channel_name.to_lowercase());

    for (tag, patterns) in mood_rules() {
        if patterns.iter().any(|re| re.is_match(&combined)) {
            return *tag;
        }
    }

    MoodTag::Default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energetic_outranks_calm() {
        // "edm" (group 1) and "chill" (group 2) both match; priority wins.
        assert_eq!(classify_mood("Chill EDM Mix", "SomeChannel"), MoodTag::Energetic);
    }

    #[test]
    fn channel_name_contributes_keywords() {
        assert_eq!(
            classify_mood("Morning Raga", "Devotional Bhajans"),
            MoodTag::Spiritual
        );
    }

    #[test]
    fn keywords_are_word_bounded() {
        // "popcorn" must not trigger the "pop" keyword.
        assert_eq!(classify_mood("Popcorn Crunch ASMR", "Snacks"), MoodTag::Default);
    }

    #[test]
    fn unmatched_input_is_default() {
        assert_eq!(classify_mood("Tum Hi Ho", "T-Series"), MoodTag::Default);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_mood("HEARTBREAK Anthem", "X"), MoodTag::Melancholic);
    }
}
