//! Type registry
//!
//! Maps a concrete entity type to its dedicated top-level conversion routine.
//! The table is built once at start-up through [`TypeRegistryBuilder`] and is
//! read-only afterwards, so one registry can serve any number of concurrent
//! conversions. Types without a routine are converted structurally.

use crate::field::Entity;
use crate::mapper::DataMapper;
use ahash::AHashMap;
use postmap_format::{MapError, Result, WireMapping};
use std::any::{Any, TypeId};
use tracing::debug;

/// Top-level conversion routine for one entity type
pub type RoutineFn<T> = fn(&DataMapper, &T) -> Option<WireMapping>;

type ErasedRoutine = Box<dyn Fn(&DataMapper, &dyn Any) -> Option<WireMapping> + Send + Sync>;

struct RegisteredRoutine {
    name: &'static str,
    type_name: &'static str,
    routine: ErasedRoutine,
}

/// Builder collecting one routine per entity type
#[derive(Default)]
pub struct TypeRegistryBuilder {
    routines: AHashMap<TypeId, RegisteredRoutine>,
}

impl TypeRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the routine for entity type `T`
    ///
    /// Fails with [`MapError::DuplicateRoutine`] if `T` already has one.
    pub fn register<T: Entity>(mut self, name: &'static str, routine: RoutineFn<T>) -> Result<Self> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();
        if self.routines.contains_key(&type_id) {
            return Err(MapError::DuplicateRoutine { type_name });
        }

        let erased: ErasedRoutine = Box::new(move |mapper: &DataMapper, value: &dyn Any| {
            value
                .downcast_ref::<T>()
                .and_then(|typed| routine(mapper, typed))
        });
        self.routines.insert(
            type_id,
            RegisteredRoutine {
                name,
                type_name,
                routine: erased,
            },
        );
        Ok(self)
    }

    /// Freeze the table
    pub fn build(self) -> TypeRegistry {
        debug!(
            routines = self.routines.len(),
            names = ?sorted_names(&self.routines),
            "type registry built"
        );
        TypeRegistry {
            routines: self.routines,
        }
    }
}

/// Immutable table from entity type to conversion routine
pub struct TypeRegistry {
    routines: AHashMap<TypeId, RegisteredRoutine>,
}

impl TypeRegistry {
    /// Registry without routines; everything converts structurally
    pub fn empty() -> Self {
        TypeRegistryBuilder::new().build()
    }

    /// Whether a routine is registered for the type
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.routines.contains_key(&type_id)
    }

    /// Number of registered routines
    pub fn len(&self) -> usize {
        self.routines.len()
    }

    /// Whether no routine is registered
    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    /// Registered routine names, sorted
    pub fn routine_names(&self) -> Vec<&'static str> {
        sorted_names(&self.routines)
    }

    /// Rust type name handled by the named routine
    pub fn type_name_of(&self, routine: &str) -> Option<&'static str> {
        self.routines
            .values()
            .find(|entry| entry.name == routine)
            .map(|entry| entry.type_name)
    }

    /// Invoke the routine registered for the value's concrete type
    ///
    /// Returns `None` when no routine is registered, `Some(None)` when the
    /// routine maps the whole value to absent.
    pub(crate) fn invoke(
        &self,
        mapper: &DataMapper,
        value: &dyn Entity,
    ) -> Option<Option<WireMapping>> {
        let any = value.as_any();
        self.routines
            .get(&any.type_id())
            .map(|entry| (entry.routine)(mapper, any))
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("routines", &self.routine_names())
            .finish()
    }
}

fn sorted_names(routines: &AHashMap<TypeId, RegisteredRoutine>) -> Vec<&'static str> {
    let mut names: Vec<_> = routines.values().map(|entry| entry.name).collect();
    names.sort_unstable();
    names
}
