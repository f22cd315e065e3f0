//! Structural mapper
//!
//! The common baseline every conversion routine builds on: walk the fields of
//! an object, convert each name to its wire key, resolve each value through
//! the value mapper chain and prune whatever resolved to absent.

use crate::field::Describe;
use crate::mapper::DataMapper;
use postmap_format::{prune_absent, to_snake_case, WireMapping, WireValue};
use tracing::trace;

impl DataMapper {
    /// Convert `target` field by field on top of a seed mapping
    ///
    /// Keys already present in `seed` are explicit overrides and are never
    /// touched by the generic convention, including `Null` placeholders that
    /// reserve a key only to have it pruned.
    pub fn apply_conventions<D>(&self, target: &D, seed: WireMapping) -> WireMapping
    where
        D: Describe + ?Sized,
    {
        let mut result = seed;
        for field in target.describe() {
            let key = to_snake_case(&field.name);
            if result.contains_key(&key) {
                trace!(key = %key, "seeded key wins over convention");
                continue;
            }
            let value = self.resolve(&field.value).unwrap_or(WireValue::Null);
            result.insert(key, value);
        }
        prune_absent(&mut result);
        result
    }

    /// Generic structural conversion with no overrides
    pub fn apply_conventions_unseeded<D>(&self, target: &D) -> WireMapping
    where
        D: Describe + ?Sized,
    {
        self.apply_conventions(target, WireMapping::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::field::{Describe, Field, FieldValue, ToField};
    use crate::{DataMapper, TypeRegistry};
    use postmap_format::WireMapping;
    use serde_json::json;

    struct Contact {
        first_name: String,
        nickname: Option<String>,
        ip_address: Option<String>,
        active: bool,
    }

    impl Describe for Contact {
        fn describe(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("FirstName", self.first_name.to_field()),
                Field::new("Nickname", self.nickname.to_field()),
                Field::new("IPAddress", self.ip_address.to_field()),
                Field::new("Active", self.active.to_field()),
            ]
        }
    }

    fn contact() -> Contact {
        Contact {
            first_name: "Ada".into(),
            nickname: None,
            ip_address: Some("10.0.0.1".into()),
            active: false,
        }
    }

    fn mapper() -> DataMapper {
        DataMapper::with_registry(TypeRegistry::empty())
    }

    #[test]
    fn test_keys_follow_convention() {
        let result = mapper().apply_conventions_unseeded(&contact());
        assert_eq!(
            serde_json::Value::Object(result),
            json!({"first_name": "Ada", "ip_address": "10.0.0.1", "active": false})
        );
    }

    #[test]
    fn test_absent_fields_are_pruned() {
        let result = mapper().apply_conventions_unseeded(&contact());
        assert!(!result.contains_key("nickname"));
        assert!(result.values().all(|value| !value.is_null()));
    }

    #[test]
    fn test_seed_overrides_win() {
        let mut seed = WireMapping::new();
        seed.insert("first_name".into(), json!("Override"));
        seed.insert("extra".into(), json!(1));
        let result = mapper().apply_conventions(&contact(), seed);
        assert_eq!(result["first_name"], json!("Override"));
        assert_eq!(result["extra"], json!(1));
    }

    #[test]
    fn test_null_seed_reserves_and_prunes_key() {
        let mut seed = WireMapping::new();
        seed.insert("ip_address".into(), serde_json::Value::Null);
        let result = mapper().apply_conventions(&contact(), seed);
        assert!(!result.contains_key("ip_address"));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_works_through_trait_objects() {
        let value = contact();
        let described: &dyn Describe = &value;
        let result = mapper().apply_conventions_unseeded(described);
        assert_eq!(result.len(), 3);
        let record = crate::Record::new().with("Label", FieldValue::Absent);
        assert!(mapper().apply_conventions_unseeded(&record).is_empty());
    }
}
