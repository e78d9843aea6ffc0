//! "Add to Calendar" links for the featured event

use crate::config::EventDetails;
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use reqwest::Url;

const GOOGLE_BASE: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_BASE: &str = "https://outlook.office.com/calendar/0/deeplink/compose";

/// Google Calendar template link; times are sent as compact UTC stamps
pub fn google_calendar_url(event: &EventDetails) -> Result<Url> {
    let stamp = |t: &chrono::DateTime<chrono::FixedOffset>| {
        t.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
    };
    let dates = format!("{}/{}", stamp(&event.starts_at), stamp(&event.ends_at));

    Ok(Url::parse_with_params(
        GOOGLE_BASE,
        &[
            ("action", "TEMPLATE"),
            ("text", event.title.as_str()),
            ("dates", dates.as_str()),
            ("details", event.description.as_str()),
            ("location", event.location.as_str()),
            ("sf", "true"),
            ("output", "xml"),
        ],
    )?)
}

/// Outlook / Office 365 compose link
pub fn outlook_calendar_url(event: &EventDetails) -> Result<Url> {
    let iso = |t: &chrono::DateTime<chrono::FixedOffset>| {
        t.with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    };
    let start = iso(&event.starts_at);
    let end = iso(&event.ends_at);

    Ok(Url::parse_with_params(
        OUTLOOK_BASE,
        &[
            ("subject", event.title.as_str()),
            ("startdt", start.as_str()),
            ("enddt", end.as_str()),
            ("body", event.description.as_str()),
            ("location", event.location.as_str()),
        ],
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_google_link() {
        let event = EventDetails::default();
        let url = google_calendar_url(&event).unwrap();
        let params = query(&url);

        assert_eq!(url.host_str(), Some("calendar.google.com"));
        assert_eq!(params["action"], "TEMPLATE");
        assert_eq!(params["text"], event.title);
        // 18:00 IST is 12:30 UTC
        assert_eq!(params["dates"], "20250715T123000Z/20250715T153000Z");
        assert_eq!(params["location"], "TechHub Coworking, Ahmedabad");
    }

    #[test]
    fn test_outlook_link() {
        let event = EventDetails::default();
        let url = outlook_calendar_url(&event).unwrap();
        let params = query(&url);

        assert_eq!(url.path(), "/calendar/0/deeplink/compose");
        assert_eq!(params["subject"], event.title);
        assert_eq!(params["startdt"], "2025-07-15T12:30:00Z");
        assert_eq!(params["enddt"], "2025-07-15T15:30:00Z");
        assert_eq!(params["body"], event.description);
    }

    #[test]
    fn test_special_characters_are_encoded() {
        let event = EventDetails {
            title: "Rust & Node: Q&A #3".to_string(),
            ..Default::default()
        };
        let url = google_calendar_url(&event).unwrap();
        assert!(!url.as_str().contains("Q&A"));
        assert_eq!(query(&url)["text"], "Rust & Node: Q&A #3");
    }
}
