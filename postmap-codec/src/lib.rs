//! postmap Codec - Object-to-wire mapping engine
//!
//! This crate provides the engine that turns typed domain objects into wire
//! mappings:
//!
//! - Field descriptors (`Describe`, `FieldValue`, anonymous `Record`s)
//! - The value mapper chain (first matching `Rule` wins)
//! - The structural mapper (`DataMapper::apply_conventions`)
//! - The type registry and polymorphic dispatch
//!
//! ```
//! use postmap_codec::{DataMapper, Describe, Field, ToField, TypeRegistry};
//!
//! struct Sender {
//!     first_name: String,
//!     reply_to: Option<String>,
//! }
//!
//! impl Describe for Sender {
//!     fn describe(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("FirstName", self.first_name.to_field()),
//!             Field::new("ReplyTo", self.reply_to.to_field()),
//!         ]
//!     }
//! }
//!
//! let mapper = DataMapper::with_registry(TypeRegistry::empty());
//! let sender = Sender { first_name: "Ada".into(), reply_to: None };
//! let wire = mapper.to_wire(&sender).unwrap();
//! assert_eq!(wire["first_name"], "Ada");
//! assert!(!wire.contains_key("reply_to"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod chain;
pub mod field;
pub mod mapper;
pub mod registry;
pub mod structural;

// Re-export commonly used types
pub use postmap_format::{MapError, Result, WireMapping, WireValue};

// Re-export our own types
pub use chain::Rule;
pub use field::{Describe, EnumValue, Entity, Field, FieldValue, Record, ToField};
pub use mapper::DataMapper;
pub use registry::{RoutineFn, TypeRegistry, TypeRegistryBuilder};

use postmap_format::constants::DEFAULT_LIST_DELIMITER;
use serde::Deserialize;

/// Mapper options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperOptions {
    /// Delimiter used when query bundles flatten list fields
    pub list_delimiter: String,
    /// Treat the zero timestamp as "not set" and omit it
    pub omit_zero_timestamps: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            list_delimiter: DEFAULT_LIST_DELIMITER.to_string(),
            omit_zero_timestamps: true,
        }
    }
}

impl MapperOptions {
    /// Check the options for values the mapper cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.list_delimiter.is_empty() {
            return Err(MapError::InvalidOptions(
                "list_delimiter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = MapperOptions::default();
        assert_eq!(opts.list_delimiter, ",");
        assert!(opts.omit_zero_timestamps);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let opts = MapperOptions {
            list_delimiter: String::new(),
            omit_zero_timestamps: true,
        };
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("list_delimiter"));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: MapperOptions = serde_json::from_str(r#"{"list_delimiter": ";"}"#).unwrap();
        assert_eq!(opts.list_delimiter, ";");
        assert!(opts.omit_zero_timestamps);

        let unknown = serde_json::from_str::<MapperOptions>(r#"{"delimiter": ";"}"#);
        assert!(unknown.is_err());
    }
}
