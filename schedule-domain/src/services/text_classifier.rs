// Calendar summary classifier
// Splits free-text feed summaries into sport, home/away, opponent and title

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::DEFAULT_OPPONENT;
use crate::value_objects::HomeOrAway;

pub const DEFAULT_SUMMARY_MARKER: &str = "Poland Seminary High School";
pub const OPEN_PLACEHOLDER: &str = "OPEN";
const EXTRAS_SEPARATOR: &str = " - ";

const SPORT_CODES: &[(&str, &str)] = &[
    ("Soccer B", "Boys Soccer"),
    ("Soccer G", "Girls Soccer"),
    ("Tennis G", "Girls Tennis"),
    ("Cross Country C", "Cross Country"),
    ("Football B", "Football"),
    ("Golf B", "Boys Golf"),
    ("Golf G", "Girls Golf"),
    ("Volleyball G", "Volleyball"),
    ("Basketball B", "Boys Basketball"),
    ("Basketball G", "Girls Basketball"),
    ("Swim & Dive C", "Swim & Dive"),
    ("Wrestling B", "Boys Wrestling"),
    ("Wrestling G", "Girls Wrestling"),
    ("Baseball B", "Baseball"),
    ("Softball G", "Softball"),
    ("Lacrosse G", "Girls Lacrosse"),
    ("Lacrosse B", "Boys Lacrosse"),
    ("Track C", "Track & Field"),
    ("Tennis B", "Boys Tennis"),
];

static SPORT_NAMES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SPORT_CODES.iter().copied().collect());

static TBA_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(^|\W)Time:\s*(TBA|TBD)\b").expect("valid regex"));
static TBA_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Time:\s*(TBA|TBD)\s*-\s*").expect("valid regex"));
static PAREN_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("valid regex"));
static PAREN_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEvent {
    pub sport_code: String,
    pub sport: String,
    pub home_or_away: HomeOrAway,
    pub opponent: String,
    pub title: String,
    pub extras: Option<String>,
    pub time_tba_tag: bool,
}

/// Display name for a sport code; unknown codes pass through unchanged.
pub fn sport_display_name(code: &str) -> String {
    SPORT_NAMES
        .get(code)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| code.to_string())
}

#[derive(Debug, Clone)]
pub struct TextClassifier {
    marker: String,
}

impl Default for TextClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_MARKER)
    }
}

impl TextClassifier {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: format!("{} ", marker.trim()),
        }
    }

    pub fn classify(&self, summary: &str) -> Option<ClassifiedEvent> {
        let time_tba_tag = TBA_TAG.is_match(summary);
        let summary = TBA_PREFIX.replace(summary, "");

        // Anything ahead of the marker is feed noise.
        let idx = summary.find(&self.marker)?;
        let remainder = summary[idx + self.marker.len()..].trim();

        let lowered = remainder.to_lowercase();
        if lowered.contains("scrimmage") || lowered.contains("practice") {
            return None;
        }

        let tokens: Vec<&str> = remainder.split_whitespace().collect();
        let (split, home_or_away) = tokens
            .iter()
            .enumerate()
            .find_map(|(idx, token)| HomeOrAway::from_token(token).map(|side| (idx, side)))?;
        let sport_code = tokens[..split].join(" ");
        let opponent_phrase = tokens[split + 1..].join(" ");

        let groups: Vec<String> = PAREN_GROUP
            .captures_iter(&opponent_phrase)
            .map(|caps| caps[1].trim().to_string())
            .collect();
        if groups.iter().any(|group| group.to_lowercase().contains("scrimmage")) {
            return None;
        }
        let extras = Some(
            groups
                .into_iter()
                .filter(|group| !group.is_empty())
                .collect::<Vec<_>>()
                .join(EXTRAS_SEPARATOR),
        )
        .filter(|joined| !joined.is_empty());

        let stripped = PAREN_STRIP.replace_all(&opponent_phrase, "").trim().to_string();
        let opponent = if stripped.is_empty() {
            DEFAULT_OPPONENT.to_string()
        } else {
            stripped
        };

        let (opponent, title) = if opponent.eq_ignore_ascii_case(OPEN_PLACEHOLDER) {
            let title = extras
                .clone()
                .unwrap_or_else(|| OPEN_PLACEHOLDER.to_string());
            (title.clone(), title)
        } else {
            let title = match &extras {
                Some(extra) => format!("{} ({})", opponent, extra),
                None => opponent.clone(),
            };
            (opponent, title)
        };

        Some(ClassifiedEvent {
            sport: sport_display_name(&sport_code),
            sport_code,
            home_or_away,
            opponent,
            title,
            extras,
            time_tba_tag,
        })
    }
}
