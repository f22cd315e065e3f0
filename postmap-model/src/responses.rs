//! Decoding of list response bodies
//!
//! Bodies arrive already parsed; nothing here performs I/O.

use crate::message_events::MessageEvent;
use crate::suppression::Suppression;
use chrono::{DateTime, NaiveDateTime};
use postmap_format::constants::TIMESTAMP_FORMAT;
use postmap_format::{Result, WireValue};
use serde::Deserialize;
use tracing::debug;

/// Pagination links of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageLink {
    /// URL of the next page, if there is one
    pub next: Option<String>,
}

/// Page of suppression list entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSuppressionResponse {
    /// Entries on this page
    pub suppressions: Vec<Suppression>,
    /// Pagination links
    pub links: PageLink,
    /// Total number of matching entries
    pub total_count: u64,
}

impl ListSuppressionResponse {
    /// Decode the body of a list request
    pub fn from_body(body: &WireValue) -> Self {
        let response = Self {
            suppressions: suppressions_from(body.get("results")),
            links: suppression_links(body.get("links")),
            total_count: body
                .get("total_count")
                .and_then(WireValue::as_u64)
                .unwrap_or_default(),
        };
        debug!(
            count = response.suppressions.len(),
            total = response.total_count,
            "decoded suppression list"
        );
        response
    }

    /// Decode the body of a single-address lookup
    ///
    /// A lookup that found nothing is an empty page, not an error.
    pub fn from_retrieve(found: bool, body: &WireValue) -> Self {
        if !found {
            return Self::default();
        }
        Self {
            suppressions: suppressions_from(body.get("results")),
            ..Self::default()
        }
    }
}

// Links arrive as a list of {href, rel}; only rel == "next" matters.
fn suppression_links(links: Option<&WireValue>) -> PageLink {
    let next = links
        .and_then(WireValue::as_array)
        .into_iter()
        .flatten()
        .filter(|link| link.get("rel").and_then(WireValue::as_str) == Some("next"))
        .filter_map(|link| link.get("href").and_then(WireValue::as_str))
        .last()
        .map(str::to_string);
    PageLink { next }
}

fn suppressions_from(results: Option<&WireValue>) -> Vec<Suppression> {
    results
        .and_then(WireValue::as_array)
        .map(|items| items.iter().map(suppression_from).collect())
        .unwrap_or_default()
}

fn suppression_from(result: &WireValue) -> Suppression {
    let text = |key: &str| result.get(key).and_then(WireValue::as_str).map(str::to_string);
    let flag = |key: &str| result.get(key) == Some(&WireValue::Bool(true));
    Suppression {
        email: text("recipient"),
        transactional: flag("transactional"),
        non_transactional: flag("non_transactional"),
        source: text("source"),
        description: text("description"),
        created: result.get("created").and_then(parse_timestamp),
        updated: result.get("updated").and_then(parse_timestamp),
    }
}

fn parse_timestamp(value: &WireValue) -> Option<NaiveDateTime> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT))
        .ok()
}

/// Page of message events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListMessageEventsResponse {
    /// Events on this page
    pub message_events: Vec<MessageEvent>,
    /// Pagination links
    pub links: PageLink,
    /// Total number of matching events
    pub total_count: u64,
}

#[derive(Deserialize)]
struct MessageEventsBody {
    #[serde(default)]
    results: Option<Vec<MessageEvent>>,
    #[serde(default)]
    links: Option<PageLink>,
    #[serde(default)]
    total_count: Option<u64>,
}

impl ListMessageEventsResponse {
    /// Decode the body of a message event search
    pub fn from_body(body: &WireValue) -> Result<Self> {
        let body = MessageEventsBody::deserialize(body)?;
        let response = Self {
            message_events: body.results.unwrap_or_default(),
            links: body.links.unwrap_or_default(),
            total_count: body.total_count.unwrap_or_default(),
        };
        debug!(
            count = response.message_events.len(),
            total = response.total_count,
            "decoded message events"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_suppression_list_decoding() {
        let body = json!({
            "results": [
                {
                    "recipient": "a@example.com",
                    "transactional": true,
                    "non_transactional": "true",
                    "source": "Manually Added",
                    "description": "complaint",
                    "created": "2016-03-08T18:58:04+00:00",
                    "updated": "2016-03-09T10:00:00"
                },
                {"recipient": "b@example.com"}
            ],
            "links": [
                {"href": "/suppression-list?page=1", "rel": "first"},
                {"href": "/suppression-list?page=2", "rel": "next"}
            ],
            "total_count": 42
        });
        let response = ListSuppressionResponse::from_body(&body);

        assert_eq!(response.total_count, 42);
        assert_eq!(response.links.next.as_deref(), Some("/suppression-list?page=2"));
        assert_eq!(response.suppressions.len(), 2);

        let first = &response.suppressions[0];
        assert_eq!(first.email.as_deref(), Some("a@example.com"));
        assert!(first.transactional);
        assert!(!first.non_transactional);
        assert_eq!(
            first.created.map(|ts| ts.to_string()).as_deref(),
            Some("2016-03-08 18:58:04")
        );
        assert!(first.updated.is_some());

        let second = &response.suppressions[1];
        assert!(!second.transactional);
        assert!(second.created.is_none());
    }

    #[test]
    fn test_suppression_list_without_results() {
        let response = ListSuppressionResponse::from_body(&json!({}));
        assert!(response.suppressions.is_empty());
        assert_eq!(response.links, PageLink::default());
        assert_eq!(response.total_count, 0);
    }

    #[test]
    fn test_retrieve_not_found_is_empty() {
        let body = json!({"errors": [{"message": "Recipient could not be found"}]});
        assert!(ListSuppressionResponse::from_retrieve(false, &body)
            .suppressions
            .is_empty());

        let found = json!({"results": [{"recipient": "a@example.com", "transactional": true}]});
        let response = ListSuppressionResponse::from_retrieve(true, &found);
        assert_eq!(response.suppressions.len(), 1);
        assert!(response.suppressions[0].transactional);
    }

    #[test]
    fn test_message_events_decoding() {
        let body = json!({
            "results": [
                {"type": "bounce", "bounce_class": "10", "rcpt_to": "a@example.com"},
                {"type": "delivery", "msg_size": 512}
            ],
            "links": {"next": "/events/message?cursor=abc"},
            "total_count": 2
        });
        let response = ListMessageEventsResponse::from_body(&body).unwrap();
        assert_eq!(response.total_count, 2);
        assert_eq!(response.links.next.as_deref(), Some("/events/message?cursor=abc"));
        assert_eq!(response.message_events[0].bounce_class.as_deref(), Some("10"));
        assert_eq!(response.message_events[1].message_size.as_deref(), Some("512"));
    }

    #[test]
    fn test_message_events_rejects_malformed_results() {
        let body = json!({"results": "not a list"});
        assert!(ListMessageEventsResponse::from_body(&body).is_err());
    }
}
