//! Message event search: the query bundle and the decoded events

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use postmap_codec::{Describe, Field, ToField, WireMapping, WireValue};
use serde::{Deserialize, Deserializer};

/// Filters for searching message events
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessageEventsQuery {
    /// Event types (`delivery`, `bounce`, ...)
    pub events: Vec<String>,
    /// Bounce classification codes
    pub bounce_classes: Vec<String>,
    /// Campaign labels
    pub campaign_ids: Vec<String>,
    /// Friendly-from addresses
    pub friendly_froms: Vec<String>,
    /// Message ids
    pub message_ids: Vec<String>,
    /// Recipient addresses
    pub recipients: Vec<String>,
    /// Subaccount ids
    pub subaccounts: Vec<String>,
    /// Template ids
    pub template_ids: Vec<String>,
    /// Transmission ids
    pub transmission_ids: Vec<String>,
    /// Start of the search window
    pub from: Option<NaiveDateTime>,
    /// End of the search window
    pub to: Option<NaiveDateTime>,
    /// Page number
    pub page: Option<u32>,
    /// Results per page
    pub per_page: Option<u32>,
    /// Bounce or failure reason substring
    pub reason: Option<String>,
    /// Time zone of `from` and `to`
    pub timezone: Option<String>,
}

impl MessageEventsQuery {
    /// List-valued fields, flattened into delimited strings on the wire
    pub fn list_fields(&self) -> [(&'static str, &[String]); 9] {
        [
            ("events", &self.events),
            ("bounce_classes", &self.bounce_classes),
            ("campaign_ids", &self.campaign_ids),
            ("friendly_froms", &self.friendly_froms),
            ("message_ids", &self.message_ids),
            ("recipients", &self.recipients),
            ("subaccounts", &self.subaccounts),
            ("template_ids", &self.template_ids),
            ("transmission_ids", &self.transmission_ids),
        ]
    }
}

impl Describe for MessageEventsQuery {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Events", self.events.to_field()),
            Field::new("BounceClasses", self.bounce_classes.to_field()),
            Field::new("CampaignIds", self.campaign_ids.to_field()),
            Field::new("FriendlyFroms", self.friendly_froms.to_field()),
            Field::new("MessageIds", self.message_ids.to_field()),
            Field::new("Recipients", self.recipients.to_field()),
            Field::new("Subaccounts", self.subaccounts.to_field()),
            Field::new("TemplateIds", self.template_ids.to_field()),
            Field::new("TransmissionIds", self.transmission_ids.to_field()),
            Field::new("From", self.from.to_field()),
            Field::new("To", self.to.to_field()),
            Field::new("Page", self.page.to_field()),
            Field::new("PerPage", self.per_page.to_field()),
            Field::new("Reason", self.reason.to_field()),
            Field::new("Timezone", self.timezone.to_field()),
        ]
    }
}

/// One event returned by a message event search
///
/// The service reports several numeric fields as strings and vice versa, so
/// scalar fields are decoded leniently into text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessageEvent {
    /// Event type
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub event_type: Option<String>,
    /// Bounce class
    #[serde(deserialize_with = "lenient_string")]
    pub bounce_class: Option<String>,
    /// Campaign id
    #[serde(deserialize_with = "lenient_string")]
    pub campaign_id: Option<String>,
    /// Customer id
    #[serde(deserialize_with = "lenient_string")]
    pub customer_id: Option<String>,
    /// Delivery method
    #[serde(rename = "delv_method", deserialize_with = "lenient_string")]
    pub delivery_method: Option<String>,
    /// Device token
    #[serde(deserialize_with = "lenient_string")]
    pub device_token: Option<String>,
    /// Error code
    #[serde(deserialize_with = "lenient_string")]
    pub error_code: Option<String>,
    /// Originating IP address
    #[serde(deserialize_with = "lenient_string")]
    pub ip_address: Option<String>,
    /// Message id
    #[serde(deserialize_with = "lenient_string")]
    pub message_id: Option<String>,
    /// Message from
    #[serde(rename = "msg_from", deserialize_with = "lenient_string")]
    pub message_from: Option<String>,
    /// Message size
    #[serde(rename = "msg_size", deserialize_with = "lenient_string")]
    pub message_size: Option<String>,
    /// Number of retries
    #[serde(rename = "num_retries", deserialize_with = "lenient_string")]
    pub number_of_retries: Option<String>,
    /// Recipient to
    #[serde(rename = "rcpt_to", deserialize_with = "lenient_string")]
    pub recipient_to: Option<String>,
    /// Recipient type
    #[serde(rename = "rcpt_type", deserialize_with = "lenient_string")]
    pub recipient_type: Option<String>,
    /// Raw reason
    #[serde(deserialize_with = "lenient_string")]
    pub raw_reason: Option<String>,
    /// Reason
    #[serde(deserialize_with = "lenient_string")]
    pub reason: Option<String>,
    /// Routing domain
    #[serde(deserialize_with = "lenient_string")]
    pub routing_domain: Option<String>,
    /// Subject
    #[serde(deserialize_with = "lenient_string")]
    pub subject: Option<String>,
    /// Template id
    #[serde(deserialize_with = "lenient_string")]
    pub template_id: Option<String>,
    /// Template version
    #[serde(deserialize_with = "lenient_string")]
    pub template_version: Option<String>,
    /// When the event happened
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// Transmission id
    #[serde(deserialize_with = "lenient_string")]
    pub transmission_id: Option<String>,
    /// Event id
    #[serde(deserialize_with = "lenient_string")]
    pub event_id: Option<String>,
    /// Friendly from
    #[serde(deserialize_with = "lenient_string")]
    pub friendly_from: Option<String>,
    /// Ip pool
    #[serde(deserialize_with = "lenient_string")]
    pub ip_pool: Option<String>,
    /// Queue time
    #[serde(deserialize_with = "lenient_string")]
    pub queue_time: Option<String>,
    /// Raw recipient to
    #[serde(rename = "raw_rcpt_to", deserialize_with = "lenient_string")]
    pub raw_recipient_to: Option<String>,
    /// Sending ip
    #[serde(deserialize_with = "lenient_string")]
    pub sending_ip: Option<String>,
    /// Transactional
    #[serde(deserialize_with = "lenient_string")]
    pub transactional: Option<String>,
    /// Remote address
    #[serde(rename = "remote_addr", deserialize_with = "lenient_string")]
    pub remote_address: Option<String>,
    /// Recipient metadata
    #[serde(rename = "rcpt_meta", deserialize_with = "null_as_default")]
    pub metadata: WireMapping,
    /// Target link url
    #[serde(deserialize_with = "lenient_string")]
    pub target_link_url: Option<String>,
    /// Recipient tags
    #[serde(rename = "rcpt_tags", deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match WireValue::deserialize(deserializer)? {
        WireValue::Null => None,
        WireValue::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
