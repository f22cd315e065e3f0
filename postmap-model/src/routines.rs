//! Per-entity conversion routines
//!
//! Each routine seeds the structural mapper with the keys its entity handles
//! differently from the generic convention. [`registry`] registers exactly one
//! routine per entity type.

use crate::cc::apply_copy_headers;
use crate::content::{Attachment, Content, File, InlineImage};
use crate::message_events::MessageEventsQuery;
use crate::recipient::{Address, Recipient, RecipientList};
use crate::subaccount::Subaccount;
use crate::suppression::{Suppression, SuppressionsQuery};
use crate::transmission::{Options, Transmission};
use crate::webhook::Webhook;
use postmap_codec::{
    DataMapper, Describe, FieldValue, MapperOptions, TypeRegistry, TypeRegistryBuilder,
};
use postmap_format::constants::{KEY_LIST_ID, KEY_RECIPIENTS, KEY_SUBSTITUTION_DATA, KEY_TYPE};
use postmap_format::{join_list, Result, WireMapping, WireValue};

/// Registry holding the routine of every domain entity
pub fn registry() -> Result<TypeRegistry> {
    Ok(TypeRegistryBuilder::new()
        .register::<Transmission>("transmission", transmission)?
        .register::<Recipient>("recipient", recipient)?
        .register::<Address>("address", address)?
        .register::<Options>("options", options)?
        .register::<Content>("content", content)?
        .register::<Attachment>("attachment", attachment)?
        .register::<InlineImage>("inline_image", inline_image)?
        .register::<File>("file", file)?
        .register::<Suppression>("suppression", suppression)?
        .register::<Webhook>("webhook", webhook)?
        .register::<Subaccount>("subaccount", subaccount)?
        .register::<RecipientList>("recipient_list", recipient_list)?
        .register::<MessageEventsQuery>("message_events_query", message_events_query)?
        .register::<SuppressionsQuery>("suppressions_query", suppressions_query)?
        .build())
}

/// Mapper over the full domain registry
pub fn data_mapper(options: MapperOptions) -> Result<DataMapper> {
    DataMapper::new(registry()?, options)
}

/// Root send request
///
/// A stored list reference replaces the inline recipients entirely; the id is
/// sent both inside `recipients` and as the top-level `list_id`.
pub fn transmission(mapper: &DataMapper, value: &Transmission) -> Option<WireMapping> {
    let recipients = match &value.list_id {
        Some(list_id) => {
            let mut reference = WireMapping::new();
            reference.insert(KEY_LIST_ID.to_string(), WireValue::String(list_id.clone()));
            WireValue::Object(reference)
        }
        None => mapper
            .resolve(&FieldValue::objects(&value.recipients))
            .unwrap_or(WireValue::Null),
    };

    let mut seed = WireMapping::new();
    seed.insert(
        KEY_SUBSTITUTION_DATA.to_string(),
        non_empty(&value.substitution_data),
    );
    seed.insert(KEY_RECIPIENTS.to_string(), recipients);

    let mut result = mapper.apply_conventions(value, seed);
    apply_copy_headers(value, &mut result);
    Some(result)
}

/// Recipient; the type only drives header computation and is never sent
pub fn recipient(mapper: &DataMapper, value: &Recipient) -> Option<WireMapping> {
    let mut seed = WireMapping::new();
    seed.insert(KEY_TYPE.to_string(), WireValue::Null);
    seed.insert(
        KEY_SUBSTITUTION_DATA.to_string(),
        non_empty(&value.substitution_data),
    );
    Some(mapper.apply_conventions(value, seed))
}

/// Options bundle, absent unless the caller set at least one option
pub fn options(mapper: &DataMapper, value: &Options) -> Option<WireMapping> {
    if !any_values_set(value) {
        return None;
    }
    Some(mapper.apply_conventions_unseeded(value))
}

/// Address
pub fn address(mapper: &DataMapper, value: &Address) -> Option<WireMapping> {
    Some(mapper.apply_conventions_unseeded(value))
}

/// Message content
pub fn content(mapper: &DataMapper, value: &Content) -> Option<WireMapping> {
    Some(mapper.apply_conventions_unseeded(value))
}

/// Attachment, mapped as its file
pub fn attachment(mapper: &DataMapper, value: &Attachment) -> Option<WireMapping> {
    file(mapper, &value.file)
}

/// Inline image, mapped as its file
pub fn inline_image(mapper: &DataMapper, value: &InlineImage) -> Option<WireMapping> {
    file(mapper, &value.file)
}

/// File payload
pub fn file(mapper: &DataMapper, value: &File) -> Option<WireMapping> {
    Some(mapper.apply_conventions_unseeded(value))
}

/// Suppression list entry
pub fn suppression(mapper: &DataMapper, value: &Suppression) -> Option<WireMapping> {
    Some(mapper.apply_conventions_unseeded(value))
}

/// Webhook registration
pub fn webhook(mapper: &DataMapper, value: &Webhook) -> Option<WireMapping> {
    Some(mapper.apply_conventions_unseeded(value))
}

/// Subaccount
pub fn subaccount(mapper: &DataMapper, value: &Subaccount) -> Option<WireMapping> {
    Some(mapper.apply_conventions_unseeded(value))
}

/// Stored recipient list
pub fn recipient_list(mapper: &DataMapper, value: &RecipientList) -> Option<WireMapping> {
    Some(mapper.apply_conventions_unseeded(value))
}

/// Message event search parameters, list fields flattened for the query string
pub fn message_events_query(mapper: &DataMapper, value: &MessageEventsQuery) -> Option<WireMapping> {
    let seed = joined_lists(mapper, &value.list_fields());
    Some(mapper.apply_conventions(value, seed))
}

/// Suppression search parameters, list fields flattened for the query string
pub fn suppressions_query(mapper: &DataMapper, value: &SuppressionsQuery) -> Option<WireMapping> {
    let seed = joined_lists(mapper, &value.list_fields());
    Some(mapper.apply_conventions(value, seed))
}

fn non_empty(map: &WireMapping) -> WireValue {
    if map.is_empty() {
        WireValue::Null
    } else {
        WireValue::Object(map.clone())
    }
}

fn any_values_set<D: Describe + ?Sized>(value: &D) -> bool {
    value.describe().iter().any(|field| !field.value.is_absent())
}

fn joined_lists(mapper: &DataMapper, fields: &[(&'static str, &[String])]) -> WireMapping {
    let delimiter = &mapper.options().list_delimiter;
    fields
        .iter()
        .map(|&(key, items)| (key.to_string(), join_list(items, delimiter)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipient::RecipientType;
    use chrono::{DateTime, NaiveDate};
    use serde_json::json;

    fn mapper() -> DataMapper {
        data_mapper(MapperOptions::default()).unwrap()
    }

    fn object(value: serde_json::Value) -> WireMapping {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_registry_covers_every_entity() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 14);
        assert!(registry.routine_names().contains(&"inline_image"));
        assert!(registry
            .type_name_of("transmission")
            .is_some_and(|name| name.ends_with("Transmission")));
    }

    #[test]
    fn test_data_mapper_validates_options() {
        let options = MapperOptions {
            list_delimiter: String::new(),
            ..MapperOptions::default()
        };
        assert!(data_mapper(options).is_err());
    }

    #[test]
    fn test_recipient_type_never_sent() {
        let value = Recipient::with_type("cc@example.com", RecipientType::Cc);
        let wire = mapper().to_wire(&value).unwrap();
        assert!(!wire.contains_key("type"));
        assert!(!wire.contains_key("substitution_data"));
        assert_eq!(wire["address"], json!({"email": "cc@example.com"}));
    }

    #[test]
    fn test_recipient_keeps_non_empty_substitution_data() {
        let value = Recipient {
            substitution_data: object(json!({"first": "Ada"})),
            tags: vec!["vip".into()],
            ..Recipient::to("a@example.com")
        };
        let wire = mapper().to_wire(&value).unwrap();
        assert_eq!(wire["substitution_data"], json!({"first": "Ada"}));
        assert_eq!(wire["tags"], json!(["vip"]));
    }

    #[test]
    fn test_options_all_or_nothing() {
        assert_eq!(mapper().to_wire(&Options::default()), None);

        let set = Options {
            click_tracking: Some(false),
            ..Options::default()
        };
        assert_eq!(
            mapper().to_wire(&set).map(WireValue::Object),
            Some(json!({"click_tracking": false}))
        );
    }

    #[test]
    fn test_unset_options_leave_no_key() {
        let value = Transmission {
            recipients: vec![Recipient::to("a@example.com")],
            ..Transmission::default()
        };
        let wire = mapper().to_wire(&value).unwrap();
        assert!(!wire.contains_key("options"));
        assert_eq!(wire["recipients"][0]["address"], json!({"email": "a@example.com"}));
    }

    #[test]
    fn test_list_id_replaces_inline_recipients() {
        let value = Transmission {
            list_id: Some("newsletter".into()),
            recipients: vec![Recipient::to("ignored@example.com")],
            ..Transmission::default()
        };
        let wire = mapper().to_wire(&value).unwrap();
        assert_eq!(wire["recipients"], json!({"list_id": "newsletter"}));
        assert_eq!(wire["list_id"], json!("newsletter"));
    }

    #[test]
    fn test_start_time_formats_with_offset() {
        let value = Options {
            start_time: Some(DateTime::parse_from_rfc3339("2015-03-01T10:00:00+02:00").unwrap()),
            ..Options::default()
        };
        let wire = mapper().to_wire(&value).unwrap();
        assert_eq!(wire["start_time"], json!("2015-03-01T10:00:00+02:00"));
    }

    #[test]
    fn test_file_kinds_map_like_files() {
        let file = File::new("text/plain", "a.txt", "aGk=");
        let expected = mapper().to_wire(&file);
        assert_eq!(mapper().to_wire(&Attachment::from(file.clone())), expected);
        assert_eq!(mapper().to_wire(&InlineImage::from(file)), expected);
        assert_eq!(
            expected.map(WireValue::Object),
            Some(json!({"type": "text/plain", "name": "a.txt", "data": "aGk="}))
        );
    }

    #[test]
    fn test_query_lists_joined() {
        let value = MessageEventsQuery {
            events: vec!["bounce".into(), "delivery".into()],
            campaign_ids: vec!["spring".into()],
            per_page: Some(100),
            from: NaiveDate::from_ymd_opt(2016, 1, 2).and_then(|d| d.and_hms_opt(3, 4, 5)),
            ..MessageEventsQuery::default()
        };
        let wire = mapper().to_wire(&value).unwrap();
        assert_eq!(
            serde_json::Value::Object(wire),
            json!({
                "events": "bounce,delivery",
                "bounce_classes": "",
                "campaign_ids": "spring",
                "friendly_froms": "",
                "message_ids": "",
                "recipients": "",
                "subaccounts": "",
                "template_ids": "",
                "transmission_ids": "",
                "per_page": 100,
                "from": "2016-01-02T03:04:05"
            })
        );
    }

    #[test]
    fn test_query_sends_every_list_key() {
        let value = MessageEventsQuery {
            events: vec!["bounce".into()],
            ..MessageEventsQuery::default()
        };
        let wire = mapper().to_wire(&value).unwrap();
        assert_eq!(wire.len(), 9);
        assert_eq!(wire["events"], json!("bounce"));
        for (key, _) in value.list_fields().iter().skip(1) {
            assert_eq!(wire[*key], json!(""), "list key {key}");
        }
    }

    #[test]
    fn test_query_delimiter_is_configurable() {
        let options = MapperOptions {
            list_delimiter: ";".into(),
            ..MapperOptions::default()
        };
        let value = SuppressionsQuery {
            types: vec!["transactional".into(), "non_transactional".into()],
            ..SuppressionsQuery::default()
        };
        let wire = data_mapper(options).unwrap().to_wire(&value).unwrap();
        assert_eq!(wire["types"], json!("transactional;non_transactional"));
        assert_eq!(wire["sources"], json!(""));
    }

    #[test]
    fn test_subaccount_status_snake_cased() {
        let value = Subaccount {
            name: Some("child".into()),
            status: Some(crate::subaccount::SubaccountStatus::Active),
            key_grants: vec!["smtp/inject".into()],
            ..Subaccount::default()
        };
        let wire = mapper().to_wire(&value).unwrap();
        assert_eq!(
            serde_json::Value::Object(wire),
            json!({
                "name": "child",
                "status": "active",
                "key_grants": ["smtp/inject"],
                "key_valid_ips": []
            })
        );
    }
}
