//! Display-artist derivation from catalog titles and channel names.
//!
//! Upload titles carry artist information in wildly inconsistent shapes:
//! labeled credits ("Singer: ..."), `Title - Artist` separators, or nothing
//! at all beyond the uploading channel's name. This module runs a fixed
//! cascade of heuristics, most reliable first, and falls back to a sentinel
//! when nothing plausible is found. The function is total and pure; callers
//! can bake the result into a [`Track`](crate::model::Track) without
//! re-checking it.

use regex::Regex;
use std::sync::OnceLock;

/// Sentinel returned when no heuristic produces a plausible name.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

fn labeled_credit_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)(?:sung by|singer|vocals?)[:\s]+([^|,\-()\[\]]+)",
            r"(?i)(?:by|artist)[:\s]+([^|,\-()\[\]]+)",
            r"(?i)(?:ft\.?|feat\.?|featuring)[:\s]+([^|,\-()\[\]]+)",
            r"(?i)(?:music director|music)[:\s]+([^|,\-()\[\]]+)",
            r"(?i)(?:composed by|composer)[:\s]+([^|,\-()\[\]]+)",
            r"(?i)(?:lyrics|lyricist)[:\s]+([^|,\-()\[\]]+)",
            r"(?i)(?:voice|voice of)[:\s]+([^|,\-()\[\]]+)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

fn parenthetical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.*?\)|\[.*?\]").unwrap())
}

fn boilerplate_suffix_res() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"(?i)official.*$").unwrap(),
            Regex::new(r"(?i)video.*$").unwrap(),
            Regex::new(r"(?i)song.*$").unwrap(),
        ]
    })
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn capitalized_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z][a-z]+ [A-Z][a-z]+)").unwrap())
}

/// Channel-name fragments that mark a label or company account rather than
/// an individual artist.
const CHANNEL_EXCLUDE_WORDS: &[&str] = &[
    "records",
    "music",
    "entertainment",
    "official",
    "label",
    "productions",
    "studios",
    "films",
    "movies",
    "channel",
    "tv",
    "media",
    "digital",
    "bollywood",
    "hollywood",
    "south",
    "tamil",
    "telugu",
    "hindi",
    "punjabi",
    "bhojpuri",
    "gujarati",
    "marathi",
    "bengali",
    "malayalam",
    "kannada",
    "company",
    "corp",
    "ltd",
    "inc",
    "pvt",
    "limited",
];

/// Strip trailing upload boilerplate ("official ...", "video ...",
/// "song ...") and collapse whitespace.
fn strip_boilerplate(fragment: &str) -> String {
    let mut out = fragment.trim().to_string();
    for re in boilerplate_suffix_res() {
        out = re.replace(&out, "").to_string();
    }
    whitespace_re().replace_all(out.trim(), " ").to_string()
}

/// A delimiter segment qualifies as an artist name when it is free of
/// obvious upload boilerplate and has a name-like length.
fn segment_candidate(segment: &str) -> Option<String> {
    let cleaned = strip_boilerplate(segment);
    let lower = cleaned.to_lowercase();
    if !cleaned.is_empty()
        && !lower.contains("official")
        && !lower.contains("video")
        && !lower.contains("lyrical")
        && cleaned.len() > 2
        && cleaned.len() < 50
    {
        Some(cleaned)
    } else {
        None
    }
}

/// Derive a best-effort display artist from a title and uploading channel.
///
/// Heuristics run in fixed priority order; the first hit wins:
///
/// 1. Labeled credits in the title ("sung by", "feat.", "composer", ...).
/// 2. Delimiter split on `" - "`, `" | "`, `" : "`, `" by "`, preferring the
///    segment after the delimiter (the dominant `Title - Artist` upload
///    convention), falling back to the leading segment.
/// 3. The channel name, unless it reads like a label or company account.
/// 4. A loose `Firstname Lastname` pattern anywhere in the title.
/// 5. The [`UNKNOWN_ARTIST`] sentinel.
///
/// Parenthesized and bracketed spans are stripped before any title-based
/// matching.
pub fn derive_artist(title: &str, channel_name: &str) -> String {
    let clean_title = parenthetical_re().replace_all(title, "");
    let clean_title = clean_title.trim();

    for pattern in labeled_credit_patterns() {
        if let Some(caps) = pattern.captures(clean_title) {
            if let Some(m) = caps.get(1) {
                let extracted = strip_boilerplate(m.as_str());
                if extracted.len() > 1 {
                    return extracted;
                }
            }
        }
    }

    for separator in [" - ", " | ", " : ", " by "] {
        if !clean_title.contains(separator) {
            continue;
        }
        let parts: Vec<&str> = clean_title.split(separator).collect();
        if parts.len() < 2 {
            continue;
        }
        if let Some(artist) = segment_candidate(parts[1]) {
            return artist;
        }
        if let Some(artist) = segment_candidate(parts[0]) {
            return artist;
        }
    }

    let channel_lower = channel_name.to_lowercase();
    let looks_like_label = CHANNEL_EXCLUDE_WORDS
        .iter()
        .any(|word| channel_lower.contains(word));
    if !looks_like_label
        && channel_name.len() > 2
        && channel_name.len() < 30
        && !channel_name.contains('&')
        && !channel_name.contains('|')
    {
        return channel_name.to_string();
    }

    if let Some(caps) = capitalized_name_re().captures(clean_title) {
        if let Some(m) = caps.get(1) {
            let name = m.as_str().trim();
            if name.len() > 5 && name.len() < 30 {
                return name.to_string();
            }
        }
    }

    UNKNOWN_ARTIST.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_credit_wins() {
        assert_eq!(
            derive_artist("Soulful Melody | Singer: Shreya Ghoshal", "SomeLabel Records"),
            "Shreya Ghoshal"
        );
    }

    #[test]
    fn delimiter_prefers_trailing_segment() {
        assert_eq!(
            derive_artist("Tum Hi Ho - Arijit Singh", "T-Series"),
            "Arijit Singh"
        );
    }

    #[test]
    fn delimiter_falls_back_to_leading_segment() {
        // Trailing segment is pure boilerplate, so the leading one is used.
        assert_eq!(
            derive_artist("Coldplay - Official Video", "Random Records"),
            "Coldplay"
        );
    }

    #[test]
    fn parentheticals_are_stripped_before_matching() {
        assert_eq!(
            derive_artist("Perfect (Lyric Video) - Ed Sheeran", "Warner Music"),
            "Ed Sheeran"
        );
    }

    #[test]
    fn plain_channel_name_is_used() {
        assert_eq!(derive_artist("Some Obscure Title", "Arijit Singh"), "Arijit Singh");
    }

    #[test]
    fn label_channel_is_rejected() {
        // "T-Series" survives the exclude list, but counts only when the
        // title offers nothing; here the title has no usable structure and
        // the channel has an excluded word.
        assert_eq!(derive_artist("xyzabc", "Sony Music Entertainment"), UNKNOWN_ARTIST);
    }

    #[test]
    fn capitalized_pair_in_title_is_last_resort() {
        assert_eq!(
            derive_artist("bekhayali Sachet Tandon version", "Zee Music Company"),
            "Sachet Tandon"
        );
    }

    #[test]
    fn empty_inputs_yield_sentinel() {
        assert_eq!(derive_artist("", ""), UNKNOWN_ARTIST);
    }
}
