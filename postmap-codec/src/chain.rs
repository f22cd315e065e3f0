//! Value mapper chain
//!
//! An ordered set of rules, each recognizing a value by its declared type and
//! run-time shape. Rules are evaluated strictly in [`Rule::CHAIN`] order and
//! the first rule that can handle a value maps it. More specific rules (named
//! entities, collections of named entities) come before the generic ones so a
//! collection of domain objects is never treated as an opaque sequence.

use crate::field::FieldValue;
use crate::mapper::DataMapper;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use postmap_format::constants::{TIMESTAMP_FORMAT, TIMESTAMP_OFFSET_FORMAT};
use postmap_format::{to_snake_case, WireValue};

/// Value mapping rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Nested object with a registered conversion routine
    SingleEntity,
    /// Collection whose elements all have registered conversion routines
    EntityCollection,
    /// Booleans pass through unchanged
    Boolean,
    /// Enumeration variants become snake_case names, or ordinals
    Enumeration,
    /// Timestamps carrying a UTC offset
    TimestampWithOffset,
    /// Timestamps without offset
    Timestamp,
    /// String-keyed mapping with heterogeneous values, passed through
    DynamicMap,
    /// String-keyed mapping with string values, passed through
    StringMap,
    /// Any other sequence, each element resolved through the whole chain
    Enumerable,
    /// Anonymous records and unregistered objects, mapped structurally
    Anonymous,
}

impl Rule {
    /// Evaluation order
    pub const CHAIN: [Rule; 10] = [
        Rule::SingleEntity,
        Rule::EntityCollection,
        Rule::Boolean,
        Rule::Enumeration,
        Rule::TimestampWithOffset,
        Rule::Timestamp,
        Rule::DynamicMap,
        Rule::StringMap,
        Rule::Enumerable,
        Rule::Anonymous,
    ];

    /// First rule in chain order that can handle the value
    pub fn select(mapper: &DataMapper, value: &FieldValue<'_>) -> Option<Rule> {
        Self::CHAIN
            .into_iter()
            .find(|rule| rule.can_handle(mapper, value))
    }

    /// Stable rule name, for tracing and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Rule::SingleEntity => "single_entity",
            Rule::EntityCollection => "entity_collection",
            Rule::Boolean => "boolean",
            Rule::Enumeration => "enumeration",
            Rule::TimestampWithOffset => "timestamp_with_offset",
            Rule::Timestamp => "timestamp",
            Rule::DynamicMap => "dynamic_map",
            Rule::StringMap => "string_map",
            Rule::Enumerable => "enumerable",
            Rule::Anonymous => "anonymous",
        }
    }

    /// Whether this rule recognizes the value
    pub fn can_handle(&self, mapper: &DataMapper, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Rule::SingleEntity, FieldValue::Object(entity)) => mapper.is_registered(*entity),
            (Rule::EntityCollection, FieldValue::Objects(items)) => {
                items.iter().all(|item| mapper.is_registered(*item))
            }
            (Rule::Boolean, FieldValue::Bool(_)) => true,
            (Rule::Enumeration, FieldValue::Enum(_)) => true,
            (Rule::TimestampWithOffset, FieldValue::TimestampOffset(_)) => true,
            (Rule::Timestamp, FieldValue::Timestamp(_)) => true,
            (Rule::DynamicMap, FieldValue::DynamicMap(_)) => true,
            (Rule::StringMap, FieldValue::StringMap(_)) => true,
            (Rule::Enumerable, FieldValue::Sequence(_) | FieldValue::Objects(_)) => true,
            (Rule::Anonymous, FieldValue::Record(_) | FieldValue::Object(_)) => true,
            _ => false,
        }
    }

    /// Map a value this rule can handle; `None` means absent
    pub fn map(&self, mapper: &DataMapper, value: &FieldValue<'_>) -> Option<WireValue> {
        match (self, value) {
            (Rule::SingleEntity, FieldValue::Object(entity)) => {
                mapper.dispatch(*entity).map(WireValue::Object)
            }
            (Rule::EntityCollection, FieldValue::Objects(items)) => Some(WireValue::Array(
                items
                    .iter()
                    .filter_map(|item| mapper.dispatch(*item))
                    .map(WireValue::Object)
                    .collect(),
            )),
            (Rule::Boolean, FieldValue::Bool(b)) => Some(WireValue::Bool(*b)),
            (Rule::Enumeration, FieldValue::Enum(e)) => Some(match e.name {
                Some(name) => WireValue::String(to_snake_case(name)),
                None => WireValue::from(e.ordinal),
            }),
            (Rule::TimestampWithOffset, FieldValue::TimestampOffset(ts)) => {
                if mapper.options().omit_zero_timestamps && is_zero_offset(ts) {
                    return None;
                }
                Some(WireValue::String(
                    ts.format(TIMESTAMP_OFFSET_FORMAT).to_string(),
                ))
            }
            (Rule::Timestamp, FieldValue::Timestamp(ts)) => {
                if mapper.options().omit_zero_timestamps && is_zero_naive(ts) {
                    return None;
                }
                Some(WireValue::String(ts.format(TIMESTAMP_FORMAT).to_string()))
            }
            (Rule::DynamicMap, FieldValue::DynamicMap(map)) => {
                Some(WireValue::Object((*map).clone()))
            }
            (Rule::StringMap, FieldValue::StringMap(map)) => Some(WireValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), WireValue::String(v.clone())))
                    .collect(),
            )),
            (Rule::Enumerable, FieldValue::Sequence(items)) => Some(WireValue::Array(
                items.iter().filter_map(|item| mapper.resolve(item)).collect(),
            )),
            (Rule::Enumerable, FieldValue::Objects(items)) => Some(WireValue::Array(
                items
                    .iter()
                    .filter_map(|item| mapper.resolve(&FieldValue::Object(*item)))
                    .collect(),
            )),
            (Rule::Anonymous, FieldValue::Record(record)) => {
                Some(WireValue::Object(mapper.apply_conventions_unseeded(record)))
            }
            (Rule::Anonymous, FieldValue::Object(entity)) => {
                Some(WireValue::Object(mapper.apply_conventions_unseeded(*entity)))
            }
            _ => None,
        }
    }
}

// The zero instant doubles as "not set": a default timestamp is never emitted.
fn is_zero_offset(ts: &DateTime<FixedOffset>) -> bool {
    ts.timestamp() == 0 && ts.timestamp_subsec_nanos() == 0
}

fn is_zero_naive(ts: &NaiveDateTime) -> bool {
    let utc = ts.and_utc();
    utc.timestamp() == 0 && utc.timestamp_subsec_nanos() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Describe, EnumValue, Field, Record, ToField};
    use crate::registry::TypeRegistryBuilder;
    use crate::MapperOptions;
    use chrono::{NaiveDate, TimeZone};
    use postmap_format::WireMapping;
    use serde_json::json;
    use std::collections::BTreeMap;

    struct Tag {
        label: String,
    }

    impl Describe for Tag {
        fn describe(&self) -> Vec<Field<'_>> {
            vec![Field::new("Label", self.label.to_field())]
        }
    }

    struct Loose {
        label: String,
    }

    impl Describe for Loose {
        fn describe(&self) -> Vec<Field<'_>> {
            vec![Field::new("LooseLabel", self.label.to_field())]
        }
    }

    fn tag_routine(mapper: &DataMapper, tag: &Tag) -> Option<WireMapping> {
        let mut seed = WireMapping::new();
        seed.insert("label".into(), json!(tag.label.to_uppercase()));
        Some(mapper.apply_conventions(tag, seed))
    }

    fn mapper() -> DataMapper {
        let registry = TypeRegistryBuilder::new()
            .register::<Tag>("tag", tag_routine)
            .unwrap()
            .build();
        DataMapper::new(registry, MapperOptions::default()).unwrap()
    }

    #[test]
    fn test_chain_order_is_fixed() {
        assert_eq!(Rule::CHAIN[0], Rule::SingleEntity);
        assert_eq!(Rule::CHAIN[2], Rule::Boolean);
        assert_eq!(Rule::CHAIN[9], Rule::Anonymous);
        let names: std::collections::HashSet<_> = Rule::CHAIN.iter().map(Rule::name).collect();
        assert_eq!(names.len(), Rule::CHAIN.len());
    }

    #[test]
    fn test_registered_object_uses_single_entity() {
        let mapper = mapper();
        let tag = Tag {
            label: "vip".into(),
        };
        let value = FieldValue::object(&tag);
        assert_eq!(Rule::select(&mapper, &value), Some(Rule::SingleEntity));
        assert_eq!(mapper.resolve(&value), Some(json!({"label": "VIP"})));
    }

    #[test]
    fn test_unregistered_object_falls_to_anonymous() {
        let mapper = mapper();
        let loose = Loose {
            label: "plain".into(),
        };
        let value = FieldValue::object(&loose);
        assert_eq!(Rule::select(&mapper, &value), Some(Rule::Anonymous));
        assert_eq!(mapper.resolve(&value), Some(json!({"loose_label": "plain"})));
    }

    #[test]
    fn test_entity_collection_preserves_order() {
        let mapper = mapper();
        let tags = vec![
            Tag { label: "a".into() },
            Tag { label: "b".into() },
        ];
        let value = FieldValue::objects(&tags);
        assert_eq!(Rule::select(&mapper, &value), Some(Rule::EntityCollection));
        assert_eq!(
            mapper.resolve(&value),
            Some(json!([{"label": "A"}, {"label": "B"}]))
        );
    }

    #[test]
    fn test_empty_entity_collection_is_empty_sequence() {
        let mapper = mapper();
        let tags: Vec<Tag> = Vec::new();
        assert_eq!(mapper.resolve(&FieldValue::objects(&tags)), Some(json!([])));
    }

    #[test]
    fn test_unregistered_collection_is_enumerable() {
        let mapper = mapper();
        let items = vec![Loose { label: "x".into() }];
        let value = FieldValue::objects(&items);
        assert_eq!(Rule::select(&mapper, &value), Some(Rule::Enumerable));
        assert_eq!(mapper.resolve(&value), Some(json!([{"loose_label": "x"}])));
    }

    #[test]
    fn test_boolean_short_circuit() {
        let mapper = mapper();
        let value = FieldValue::Bool(false);
        assert_eq!(Rule::select(&mapper, &value), Some(Rule::Boolean));
        assert_eq!(mapper.resolve(&value), Some(json!(false)));
    }

    #[test]
    fn test_enumeration_names_and_ordinals() {
        let mapper = mapper();
        let named = FieldValue::Enum(EnumValue::named("SandboxMode", 3));
        assert_eq!(mapper.resolve(&named), Some(json!("sandbox_mode")));
        let unnamed = FieldValue::Enum(EnumValue::ordinal(3));
        assert_eq!(mapper.resolve(&unnamed), Some(json!(3)));
    }

    #[test]
    fn test_timestamp_with_offset_format() {
        let mapper = mapper();
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let ts = offset.with_ymd_and_hms(2015, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(
            mapper.resolve(&FieldValue::TimestampOffset(ts)),
            Some(json!("2015-03-01T10:00:00+02:00"))
        );
    }

    #[test]
    fn test_timestamp_without_offset_format() {
        let mapper = mapper();
        let ts = NaiveDate::from_ymd_opt(2015, 3, 1)
            .unwrap()
            .and_hms_opt(10, 30, 5)
            .unwrap();
        assert_eq!(
            mapper.resolve(&FieldValue::Timestamp(ts)),
            Some(json!("2015-03-01T10:30:05"))
        );
    }

    #[test]
    fn test_zero_timestamps_are_absent() {
        let mapper = mapper();
        assert_eq!(
            mapper.resolve(&FieldValue::Timestamp(NaiveDateTime::default())),
            None
        );
        let zero = FixedOffset::east_opt(0).unwrap().timestamp_opt(0, 0).unwrap();
        assert_eq!(mapper.resolve(&FieldValue::TimestampOffset(zero)), None);
    }

    #[test]
    fn test_zero_timestamps_kept_when_configured() {
        let options = MapperOptions {
            omit_zero_timestamps: false,
            ..MapperOptions::default()
        };
        let mapper = DataMapper::new(TypeRegistryBuilder::new().build(), options).unwrap();
        assert_eq!(
            mapper.resolve(&FieldValue::Timestamp(NaiveDateTime::default())),
            Some(json!("1970-01-01T00:00:00"))
        );
    }

    #[test]
    fn test_dynamic_map_passes_through_unchanged() {
        let mapper = mapper();
        let map = json!({"FirstName": "Jo", "nested": {"k": [1, 2]}, "empty": null})
            .as_object()
            .unwrap()
            .clone();
        let value = FieldValue::DynamicMap(&map);
        assert_eq!(Rule::select(&mapper, &value), Some(Rule::DynamicMap));
        assert_eq!(mapper.resolve(&value), Some(WireValue::Object(map.clone())));
    }

    #[test]
    fn test_string_map_passes_through_unchanged() {
        let mapper = mapper();
        let mut headers = BTreeMap::new();
        headers.insert("X-Campaign".to_string(), "spring".to_string());
        assert_eq!(
            mapper.resolve(&FieldValue::StringMap(&headers)),
            Some(json!({"X-Campaign": "spring"}))
        );
    }

    #[test]
    fn test_sequence_resolves_each_element() {
        let mapper = mapper();
        let tag = Tag { label: "t".into() };
        let value = FieldValue::Sequence(vec![
            FieldValue::Str("plain".into()),
            FieldValue::Enum(EnumValue::named("OpenTracking", 1)),
            FieldValue::Absent,
            FieldValue::Object(&tag),
        ]);
        assert_eq!(
            mapper.resolve(&value),
            Some(json!(["plain", "open_tracking", {"label": "T"}]))
        );
    }

    #[test]
    fn test_record_is_anonymous() {
        let mapper = mapper();
        let record = Record::new()
            .with("CampaignId", FieldValue::Str("spring".into()))
            .with("Missing", FieldValue::Absent);
        let value = FieldValue::Record(record);
        assert_eq!(Rule::select(&mapper, &value), Some(Rule::Anonymous));
        assert_eq!(mapper.resolve(&value), Some(json!({"campaign_id": "spring"})));
    }

    #[test]
    fn test_scalars_have_no_rule() {
        let mapper = mapper();
        for value in [
            FieldValue::Str("x".into()),
            FieldValue::Int(-1),
            FieldValue::UInt(1),
            FieldValue::Float(0.5),
            FieldValue::Absent,
        ] {
            assert_eq!(Rule::select(&mapper, &value), None);
        }
        assert_eq!(mapper.resolve(&FieldValue::Absent), None);
        assert_eq!(mapper.resolve(&FieldValue::Float(0.5)), Some(json!(0.5)));
    }
}
