/// `"Boys Soccer"` -> `"boys-soccer"`; whitespace runs collapse to one dash.
pub fn sport_slug(sport_title: &str) -> String {
    sport_title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_whitespace() {
        assert_eq!(sport_slug("Boys Soccer"), "boys-soccer");
        assert_eq!(sport_slug("Track  & Field"), "track-&-field");
        assert_eq!(sport_slug("Football"), "football");
    }

    #[test]
    fn non_empty_drops_blank() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" Canfield ")), Some("Canfield".to_string()));
    }
}
