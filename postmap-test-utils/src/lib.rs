//! postmap Test Utilities
//!
//! This crate provides shared fixtures and builders for the postmap tests.

use chrono::{DateTime, FixedOffset};
use postmap_model::{
    Address, Content, File, Options, Recipient, RecipientList, RecipientType, Suppression,
    Transmission, WireMapping,
};
use serde_json::{json, Value};

/// Builder for transmissions with common patterns
pub struct TransmissionBuilder {
    transmission: Transmission,
}

impl TransmissionBuilder {
    /// Create a builder for an empty transmission
    pub fn new() -> Self {
        Self {
            transmission: Transmission::default(),
        }
    }

    /// Add a recipient of the given type
    pub fn recipient(mut self, email: &str, recipient_type: RecipientType) -> Self {
        self.transmission
            .recipients
            .push(Recipient::with_type(email, recipient_type));
        self
    }

    /// Add a primary recipient
    pub fn to(self, email: &str) -> Self {
        self.recipient(email, RecipientType::To)
    }

    /// Add a carbon-copy recipient
    pub fn cc(self, email: &str) -> Self {
        self.recipient(email, RecipientType::Cc)
    }

    /// Add a blind-copy recipient
    pub fn bcc(self, email: &str) -> Self {
        self.recipient(email, RecipientType::Bcc)
    }

    /// Send to a stored recipient list
    pub fn list_id(mut self, list_id: &str) -> Self {
        self.transmission.list_id = Some(list_id.to_string());
        self
    }

    /// Set the campaign label
    pub fn campaign(mut self, campaign_id: &str) -> Self {
        self.transmission.campaign_id = Some(campaign_id.to_string());
        self
    }

    /// Set the sender and subject
    pub fn from(mut self, email: &str, subject: &str) -> Self {
        self.transmission.content.from = Some(Address::new(email));
        self.transmission.content.subject = Some(subject.to_string());
        self
    }

    /// Add an extra content header
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.transmission
            .content
            .headers
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Add a transmission-level substitution value
    pub fn substitution(mut self, key: &str, value: Value) -> Self {
        self.transmission
            .substitution_data
            .insert(key.to_string(), value);
        self
    }

    /// Replace the options bundle
    pub fn options(mut self, options: Options) -> Self {
        self.transmission.options = options;
        self
    }

    /// Build the transmission
    pub fn build(self) -> Transmission {
        self.transmission
    }
}

impl Default for TransmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Canned domain objects and response bodies
pub struct Fixtures;

impl Fixtures {
    /// Recipient list with id `test-name` and two members
    pub fn recipient_list() -> RecipientList {
        RecipientList {
            id: Some("test-name".to_string()),
            name: Some("Test Name".to_string()),
            description: Some("Test Description".to_string()),
            recipients: vec![
                Recipient::to("test@test.com"),
                Recipient::to("test2@test.com"),
            ],
            ..RecipientList::default()
        }
    }

    /// Transmission exercising content, attachments, copies and options
    pub fn transmission() -> Transmission {
        let mut transmission = TransmissionBuilder::new()
            .to("primary@example.com")
            .cc("copy@example.com")
            .bcc("hidden@example.com")
            .campaign("spring-sale")
            .from("sender@example.com", "Spring sale")
            .header("X-Customer-Campaign-ID", "spring")
            .substitution("discount", json!(20))
            .options(Options {
                open_tracking: Some(true),
                start_time: Some(Self::start_time()),
                ..Options::default()
            })
            .build();
        transmission.content.html = Some("<p>Hello {{name}}</p>".to_string());
        transmission.content.attachments = vec![File::new("text/plain", "terms.txt", "dGVybXM=").into()];
        transmission.content.inline_images = vec![File::new("image/png", "logo", "iVBORw0K").into()];
        transmission
    }

    /// Fixed send time with a +02:00 offset
    pub fn start_time() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2015-03-01T10:00:00+02:00")
            .unwrap_or_else(|_| DateTime::default())
    }

    /// Content using a stored template
    pub fn template_content() -> Content {
        Content {
            template_id: Some("welcome".to_string()),
            use_draft_template: Some(false),
            ..Content::default()
        }
    }

    /// Suppression entries with varied flags
    pub fn suppressions() -> Vec<Suppression> {
        vec![
            Suppression::everywhere("gone@example.com"),
            Suppression {
                email: Some("marketing-only@example.com".to_string()),
                non_transactional: true,
                source: Some("Manually Added".to_string()),
                ..Suppression::default()
            },
        ]
    }

    /// Body of a suppression list response with a next page
    pub fn suppression_list_body() -> Value {
        json!({
            "results": [
                {
                    "recipient": "gone@example.com",
                    "transactional": true,
                    "non_transactional": true,
                    "source": "Spam Complaint",
                    "created": "2016-03-08T18:58:04+00:00",
                    "updated": "2016-03-08T18:58:04+00:00"
                },
                {
                    "recipient": "marketing-only@example.com",
                    "transactional": false,
                    "non_transactional": true,
                    "source": "Manually Added"
                }
            ],
            "links": [
                {"href": "/api/v1/suppression-list?page=1&per_page=2", "rel": "first"},
                {"href": "/api/v1/suppression-list?page=2&per_page=2", "rel": "next"}
            ],
            "total_count": 3
        })
    }

    /// Body of a message event search response with a next page
    pub fn message_events_body() -> Value {
        json!({
            "results": [
                {
                    "type": "delivery",
                    "campaign_id": "spring-sale",
                    "delv_method": "esmtp",
                    "msg_from": "sender@example.com",
                    "msg_size": "1337",
                    "num_retries": "0",
                    "rcpt_to": "primary@example.com",
                    "rcpt_type": "cc",
                    "raw_rcpt_to": "Primary@Example.com",
                    "remote_addr": "10.0.0.1",
                    "rcpt_meta": {"customer_id": "42"},
                    "rcpt_tags": ["vip"],
                    "timestamp": "2016-04-27T10:53:08.000-07:00"
                }
            ],
            "links": {"next": "/api/v1/events/message?cursor=WycyMDE4"},
            "total_count": 1
        })
    }

    /// Unwrap a JSON object into a mapping; anything else gives an empty one
    pub fn mapping(value: Value) -> WireMapping {
        match value {
            Value::Object(map) => map,
            _ => WireMapping::new(),
        }
    }
}
