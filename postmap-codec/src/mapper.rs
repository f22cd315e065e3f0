//! Data mapper

use crate::chain::Rule;
use crate::field::{Entity, FieldValue};
use crate::registry::TypeRegistry;
use crate::MapperOptions;
use postmap_format::{Result, WireMapping, WireValue};
use tracing::trace;

/// Entry point tying the chain, the structural mapper and the registry together
///
/// Immutable after construction; share it by reference or behind an `Arc`.
#[derive(Debug)]
pub struct DataMapper {
    registry: TypeRegistry,
    options: MapperOptions,
}

impl DataMapper {
    /// Create a mapper after validating the options
    pub fn new(registry: TypeRegistry, options: MapperOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { registry, options })
    }

    /// Create a mapper with default options
    ///
    /// Only [`MapperOptions::default`] is accepted here, which always passes
    /// [`MapperOptions::validate`]. Custom options go through [`DataMapper::new`].
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            registry,
            options: MapperOptions::default(),
        }
    }

    /// Mapper options
    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Registered routines
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Convert a typed entity; `None` means the whole entity is absent
    pub fn to_wire<T: Entity>(&self, value: &T) -> Option<WireMapping> {
        self.dispatch(value)
    }

    /// Convert an entity of unknown static type
    ///
    /// Uses the registered routine for the value's concrete type, otherwise
    /// the generic structural conversion.
    pub fn dispatch(&self, value: &dyn Entity) -> Option<WireMapping> {
        match self.registry.invoke(self, value) {
            Some(mapped) => mapped,
            None => Some(self.apply_conventions_unseeded(value)),
        }
    }

    /// Whether the value's concrete type has a registered routine
    pub fn is_registered(&self, value: &dyn Entity) -> bool {
        self.registry.contains(value.as_any().type_id())
    }

    /// Resolve one field value through the chain; `None` means absent
    pub fn resolve(&self, value: &FieldValue<'_>) -> Option<WireValue> {
        match Rule::select(self, value) {
            Some(rule) => {
                trace!(rule = rule.name(), kind = value.kind(), "value mapper matched");
                rule.map(self, value)
            }
            None => value.to_primitive(),
        }
    }
}
