//! Request payloads assembled around mapped entities

use crate::suppression::Suppression;
use postmap_codec::{DataMapper, Entity, FieldValue, Record};
use postmap_format::WireMapping;
use tracing::debug;

/// Body of a suppression list create-or-update request
///
/// ```
/// use postmap_codec::MapperOptions;
/// use postmap_model::{payloads, routines, Suppression};
///
/// let mapper = routines::data_mapper(MapperOptions::default()).unwrap();
/// let body = payloads::suppression_upsert(&mapper, &[Suppression::everywhere("a@example.com")]);
/// assert_eq!(body["recipients"][0]["email"], "a@example.com");
/// ```
pub fn suppression_upsert(mapper: &DataMapper, suppressions: &[Suppression]) -> WireMapping {
    debug!(count = suppressions.len(), "building suppression upsert");
    let payload = Record::new().with("Recipients", FieldValue::objects(suppressions));
    mapper.apply_conventions_unseeded(&payload)
}

/// Suppress each address for transactional and non-transactional mail
pub fn suppressions_from_emails<I, S>(emails: I) -> Vec<Suppression>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    emails.into_iter().map(Suppression::everywhere).collect()
}

/// Create-or-update body for plain addresses
pub fn suppression_upsert_from_emails<I, S>(mapper: &DataMapper, emails: I) -> WireMapping
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    suppression_upsert(mapper, &suppressions_from_emails(emails))
}

/// Query parameters of a list request; no query means no parameters
pub fn list_query<Q: Entity>(mapper: &DataMapper, query: Option<&Q>) -> WireMapping {
    query
        .and_then(|query| mapper.to_wire(query))
        .unwrap_or_default()
}
