// Home/away value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomeOrAway {
    Home,
    Away,
}

impl HomeOrAway {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeOrAway::Home => "Home",
            HomeOrAway::Away => "Away",
        }
    }

    /// Display token derived from the flag; never stored independently.
    pub fn vs_or_at(&self) -> &'static str {
        match self {
            HomeOrAway::Home => "vs",
            HomeOrAway::Away => "@",
        }
    }

    /// Exact-token match used by the summary tokenizer.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Home" => Some(HomeOrAway::Home),
            "Away" => Some(HomeOrAway::Away),
            _ => None,
        }
    }
}

impl From<&str> for HomeOrAway {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "home" => HomeOrAway::Home,
            _ => HomeOrAway::Away,
        }
    }
}

impl fmt::Display for HomeOrAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
