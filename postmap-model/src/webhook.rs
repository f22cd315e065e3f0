//! Webhook registrations

use chrono::NaiveDateTime;
use postmap_codec::{Describe, Field, ToField, WireValue};
use serde::Deserialize;

/// Endpoint that receives event batches
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Webhook {
    /// Server-assigned id
    pub id: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Target URL
    pub target: Option<String>,
    /// Event types delivered to the target
    pub events: Vec<String>,
    /// `none`, `basic` or `oauth2`
    pub auth_type: Option<String>,
    /// OAuth2 token request details
    pub auth_request_details: Option<WireValue>,
    /// Basic-auth or OAuth2 credentials
    pub auth_credentials: Option<WireValue>,
    /// Token echoed in the `X-MessageSystems-Webhook-Token` header
    pub auth_token: Option<String>,
    /// Last successful delivery
    pub last_successful: Option<NaiveDateTime>,
    /// Last failed delivery
    pub last_failure: Option<NaiveDateTime>,
}

impl Describe for Webhook {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Id", self.id.to_field()),
            Field::new("Name", self.name.to_field()),
            Field::new("Target", self.target.to_field()),
            Field::new("Events", self.events.to_field()),
            Field::new("AuthType", self.auth_type.to_field()),
            Field::new("AuthRequestDetails", self.auth_request_details.to_field()),
            Field::new("AuthCredentials", self.auth_credentials.to_field()),
            Field::new("AuthToken", self.auth_token.to_field()),
            Field::new("LastSuccessful", self.last_successful.to_field()),
            Field::new("LastFailure", self.last_failure.to_field()),
        ]
    }
}
