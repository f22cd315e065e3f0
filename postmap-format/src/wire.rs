//! Wire value helpers

use serde_json::{Map, Value};

/// A value the JSON serializer can encode without further inspection
pub type WireValue = Value;

/// Ordered, string-keyed mapping of wire values
///
/// Once returned from a conversion routine no entry holds `Value::Null`.
pub type WireMapping = Map<String, Value>;

/// Remove every entry whose value is absent
///
/// Only the top level is pruned; nested pass-through mappings are left as the
/// caller supplied them.
pub fn prune_absent(mapping: &mut WireMapping) {
    mapping.retain(|_, value| !value.is_null());
}

/// Join list items into one delimited string; an empty list joins to `""`
pub fn join_list<S: AsRef<str>>(items: &[S], delimiter: &str) -> WireValue {
    let joined = items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(delimiter);
    Value::String(joined)
}
