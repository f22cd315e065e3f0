//! Transmissions (send requests) and their options bundle

use crate::content::Content;
use crate::recipient::Recipient;
use chrono::{DateTime, FixedOffset};
use postmap_codec::{Describe, Field, FieldValue, ToField, WireMapping};
use serde::Deserialize;

/// Delivery options; sent only when at least one is set
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Scheduled send time
    pub start_time: Option<DateTime<FixedOffset>>,
    /// Track opens
    pub open_tracking: Option<bool>,
    /// Track clicks
    pub click_tracking: Option<bool>,
    /// Transactional (bypasses non-transactional suppressions)
    pub transactional: Option<bool>,
    /// Send through the sandbox domain
    pub sandbox: Option<bool>,
    /// Ignore the suppression list
    pub skip_suppression: Option<bool>,
    /// Inline CSS into the HTML body
    pub inline_css: Option<bool>,
    /// Dedicated IP pool
    pub ip_pool: Option<String>,
}

impl Describe for Options {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("StartTime", self.start_time.to_field()),
            Field::new("OpenTracking", self.open_tracking.to_field()),
            Field::new("ClickTracking", self.click_tracking.to_field()),
            Field::new("Transactional", self.transactional.to_field()),
            Field::new("Sandbox", self.sandbox.to_field()),
            Field::new("SkipSuppression", self.skip_suppression.to_field()),
            Field::new("InlineCss", self.inline_css.to_field()),
            Field::new("IpPool", self.ip_pool.to_field()),
        ]
    }
}

/// Root send request
///
/// Recipients are either listed inline or referenced through `list_id`,
/// never both on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transmission {
    /// Server-assigned id
    pub id: Option<String>,
    /// Server-reported state
    pub state: Option<String>,
    /// Delivery options
    pub options: Options,
    /// Inline recipients
    pub recipients: Vec<Recipient>,
    /// Stored recipient list to send to instead of inline recipients
    pub list_id: Option<String>,
    /// Campaign label
    pub campaign_id: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Transmission-level metadata
    pub metadata: WireMapping,
    /// Transmission-level substitution data
    pub substitution_data: WireMapping,
    /// Bounce address
    pub return_path: Option<String>,
    /// Message content
    pub content: Content,
    /// Server-reported counters
    pub total_recipients: Option<u64>,
    /// Server-reported counters
    pub num_generated: Option<u64>,
    /// Server-reported counters
    pub num_failed_generation: Option<u64>,
    /// Server-reported counters
    pub num_invalid_recipients: Option<u64>,
}

impl Describe for Transmission {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Id", self.id.to_field()),
            Field::new("State", self.state.to_field()),
            Field::new("Options", FieldValue::object(&self.options)),
            Field::new("Recipients", FieldValue::objects(&self.recipients)),
            Field::new("ListId", self.list_id.to_field()),
            Field::new("CampaignId", self.campaign_id.to_field()),
            Field::new("Description", self.description.to_field()),
            Field::new("Metadata", self.metadata.to_field()),
            Field::new("SubstitutionData", self.substitution_data.to_field()),
            Field::new("ReturnPath", self.return_path.to_field()),
            Field::new("Content", FieldValue::object(&self.content)),
            Field::new("TotalRecipients", self.total_recipients.to_field()),
            Field::new("NumGenerated", self.num_generated.to_field()),
            Field::new("NumFailedGeneration", self.num_failed_generation.to_field()),
            Field::new("NumInvalidRecipients", self.num_invalid_recipients.to_field()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_start_time_parses_offset() {
        let options: Options =
            serde_json::from_str(r#"{"start_time": "2015-03-01T10:00:00+02:00", "sandbox": true}"#)
                .unwrap();
        let start = options.start_time.unwrap();
        assert_eq!(start.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(options.sandbox, Some(true));
    }

    #[test]
    fn test_transmission_defaults() {
        let transmission = Transmission::default();
        assert!(transmission.recipients.is_empty());
        assert_eq!(transmission.options, Options::default());
        assert!(transmission.content.headers.is_empty());
    }
}
