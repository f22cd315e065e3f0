//! Recipients, addresses and stored recipient lists

use postmap_codec::{Describe, EnumValue, Field, FieldValue, ToField, WireMapping};
use serde::Deserialize;

/// E-mail address with optional display name
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Mailbox address
    pub email: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Address shown in the `To` header instead of `email`
    pub header_to: Option<String>,
}

impl Address {
    /// Address with only the mailbox set
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

impl Describe for Address {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Email", self.email.to_field()),
            Field::new("Name", self.name.to_field()),
            Field::new("HeaderTo", self.header_to.to_field()),
        ]
    }
}

/// How a recipient receives the message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    /// Primary recipient
    #[default]
    To,
    /// Carbon copy
    Cc,
    /// Blind carbon copy
    Bcc,
}

impl RecipientType {
    /// Declared variant identifier
    pub fn name(&self) -> &'static str {
        match self {
            RecipientType::To => "To",
            RecipientType::Cc => "CC",
            RecipientType::Bcc => "BCC",
        }
    }

    /// Whether the recipient is a carbon or blind copy
    pub fn is_copy(&self) -> bool {
        matches!(self, RecipientType::Cc | RecipientType::Bcc)
    }
}

impl ToField for RecipientType {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::Enum(EnumValue::named(self.name(), *self as i64))
    }
}

/// One recipient of a transmission or recipient list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Recipient {
    /// Where the message goes
    pub address: Option<Address>,
    /// Bounce address override
    pub return_path: Option<String>,
    /// Free-form labels
    pub tags: Vec<String>,
    /// Per-recipient metadata
    pub metadata: WireMapping,
    /// Per-recipient substitution data
    pub substitution_data: WireMapping,
    /// To, CC or BCC; only used to compute headers, never sent as is
    #[serde(rename = "type")]
    pub recipient_type: RecipientType,
}

impl Recipient {
    /// Primary recipient for an address
    pub fn to(email: impl Into<String>) -> Self {
        Self::with_type(email, RecipientType::To)
    }

    /// Recipient of the given type for an address
    pub fn with_type(email: impl Into<String>, recipient_type: RecipientType) -> Self {
        Self {
            address: Some(Address::new(email)),
            recipient_type,
            ..Self::default()
        }
    }

    /// Mailbox address, if any
    pub fn email(&self) -> Option<&str> {
        self.address.as_ref().and_then(|a| a.email.as_deref())
    }
}

impl Describe for Recipient {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Address", FieldValue::object_opt(&self.address)),
            Field::new("ReturnPath", self.return_path.to_field()),
            Field::new("Tags", self.tags.to_field()),
            Field::new("Metadata", self.metadata.to_field()),
            Field::new("SubstitutionData", self.substitution_data.to_field()),
            Field::new("Type", self.recipient_type.to_field()),
        ]
    }
}

/// Stored, named list of recipients
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecipientList {
    /// Slug identifying the list
    pub id: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Arbitrary list attributes
    pub attributes: WireMapping,
    /// Members
    pub recipients: Vec<Recipient>,
}

impl Describe for RecipientList {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Id", self.id.to_field()),
            Field::new("Name", self.name.to_field()),
            Field::new("Description", self.description.to_field()),
            Field::new("Attributes", self.attributes.to_field()),
            Field::new("Recipients", FieldValue::objects(&self.recipients)),
        ]
    }
}
