//! Subaccounts

use postmap_codec::{Describe, EnumValue, Field, FieldValue, ToField};
use serde::Deserialize;

/// Lifecycle state of a subaccount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubaccountStatus {
    /// Sending allowed
    Active,
    /// Sending blocked, may be reactivated
    Suspended,
    /// Permanently closed
    Terminated,
}

impl SubaccountStatus {
    /// Declared variant identifier
    pub fn name(&self) -> &'static str {
        match self {
            SubaccountStatus::Active => "Active",
            SubaccountStatus::Suspended => "Suspended",
            SubaccountStatus::Terminated => "Terminated",
        }
    }
}

impl ToField for SubaccountStatus {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::Enum(EnumValue::named(self.name(), *self as i64))
    }
}

/// Isolated sending account under the master account
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Subaccount {
    /// Server-assigned numeric id
    pub id: Option<i64>,
    /// Display name
    pub name: Option<String>,
    /// API key to create for the subaccount
    pub key: Option<String>,
    /// Label of that key
    pub key_label: Option<String>,
    /// Grants of that key
    pub key_grants: Vec<String>,
    /// IPs allowed to use that key
    pub key_valid_ips: Vec<String>,
    /// Default IP pool
    pub ip_pool: Option<String>,
    /// Lifecycle state
    pub status: Option<SubaccountStatus>,
    /// Compliance review state
    pub compliance_status: Option<String>,
}

impl Describe for Subaccount {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Id", self.id.to_field()),
            Field::new("Name", self.name.to_field()),
            Field::new("Key", self.key.to_field()),
            Field::new("KeyLabel", self.key_label.to_field()),
            Field::new("KeyGrants", self.key_grants.to_field()),
            Field::new("KeyValidIps", self.key_valid_ips.to_field()),
            Field::new("IpPool", self.ip_pool.to_field()),
            Field::new("Status", self.status.to_field()),
            Field::new("ComplianceStatus", self.compliance_status.to_field()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_lowercase() {
        let subaccount: Subaccount =
            serde_json::from_str(r#"{"name": "child", "status": "suspended"}"#).unwrap();
        assert_eq!(subaccount.status, Some(SubaccountStatus::Suspended));
    }

    #[test]
    fn test_status_field_is_named_enum() {
        match SubaccountStatus::Terminated.to_field() {
            FieldValue::Enum(value) => {
                assert_eq!(value.name, Some("Terminated"));
                assert_eq!(value.ordinal, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
