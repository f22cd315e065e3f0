//! Suppression list entries and their listing query

use chrono::NaiveDateTime;
use postmap_codec::{Describe, Field, ToField};
use serde::Deserialize;

/// Address excluded from (some) sending
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Suppression {
    /// Suppressed address
    pub email: Option<String>,
    /// Suppressed for transactional messages
    pub transactional: bool,
    /// Suppressed for non-transactional messages
    pub non_transactional: bool,
    /// How the entry was created
    pub source: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Server-reported creation time
    pub created: Option<NaiveDateTime>,
    /// Server-reported update time
    pub updated: Option<NaiveDateTime>,
}

impl Suppression {
    /// Entry suppressing an address for every kind of message
    pub fn everywhere(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            transactional: true,
            non_transactional: true,
            ..Self::default()
        }
    }
}

impl Describe for Suppression {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("Email", self.email.to_field()),
            Field::new("Transactional", self.transactional.to_field()),
            Field::new("NonTransactional", self.non_transactional.to_field()),
            Field::new("Source", self.source.to_field()),
            Field::new("Description", self.description.to_field()),
            Field::new("Created", self.created.to_field()),
            Field::new("Updated", self.updated.to_field()),
        ]
    }
}

/// Filters for listing the suppression list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SuppressionsQuery {
    /// Lower bound on the update time
    pub from: Option<NaiveDateTime>,
    /// Upper bound on the update time
    pub to: Option<NaiveDateTime>,
    /// Restrict to one recipient domain
    pub domain: Option<String>,
    /// Pagination cursor
    pub cursor: Option<String>,
    /// Results per page
    pub per_page: Option<u32>,
    /// Page number
    pub page: Option<u32>,
    /// Entry sources to include
    pub sources: Vec<String>,
    /// Suppression types to include
    pub types: Vec<String>,
    /// Description substring filter
    pub description: Option<String>,
}

impl SuppressionsQuery {
    /// List-valued fields, flattened into delimited strings on the wire
    pub fn list_fields(&self) -> [(&'static str, &[String]); 2] {
        [("sources", &self.sources), ("types", &self.types)]
    }
}

impl Describe for SuppressionsQuery {
    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("From", self.from.to_field()),
            Field::new("To", self.to.to_field()),
            Field::new("Domain", self.domain.to_field()),
            Field::new("Cursor", self.cursor.to_field()),
            Field::new("PerPage", self.per_page.to_field()),
            Field::new("Page", self.page.to_field()),
            Field::new("Sources", self.sources.to_field()),
            Field::new("Types", self.types.to_field()),
            Field::new("Description", self.description.to_field()),
        ]
    }
}
