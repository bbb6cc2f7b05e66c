use anyhow::{anyhow, Result};
use chrono::NaiveDate;

/// `YYYY-MM-DD`, as accepted by `--today`.
pub fn parse_iso_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|err| anyhow!("invalid date '{}': {}", date, err))
}
