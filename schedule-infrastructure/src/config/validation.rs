use anyhow::{anyhow, Result};

use schedule_domain::EVENT_ID_PLACEHOLDER;

pub fn validate_http_url(key: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("{} must not be empty", key));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!("{} must be an http(s) url", key));
    }
    Ok(())
}

pub fn validate_url_template(template: &str) -> Result<()> {
    validate_http_url("event_url_template", template)?;
    if !template.contains(EVENT_ID_PLACEHOLDER) {
        return Err(anyhow!(
            "event_url_template must contain {}",
            EVENT_ID_PLACEHOLDER
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_need_http_scheme() {
        assert!(validate_http_url("feed_url", "https://example.test/a.ics").is_ok());
        assert!(validate_http_url("feed_url", "webcal://example.test/a.ics").is_err());
        assert!(validate_http_url("feed_url", " ").is_err());
    }

    #[test]
    fn template_needs_placeholder() {
        assert!(validate_url_template("https://example.test/{event_id}/").is_ok());
        assert!(validate_url_template("https://example.test/").is_err());
    }
}
