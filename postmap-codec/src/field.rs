//! Field descriptors
//!
//! Domain types expose their public fields through [`Describe`] instead of
//! run-time reflection. Each field carries its declared identifier and a
//! [`FieldValue`], whose variant encodes the declared type of the field.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use postmap_format::{WireMapping, WireValue};
use std::any::Any;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A structured value that can list its public fields
pub trait Describe {
    /// Fields in declaration order
    fn describe(&self) -> Vec<Field<'_>>;
}

/// A named, `'static` structured type that the type registry can look up
pub trait Entity: Describe + Any {
    /// Access the value as `Any` for type lookup and downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T: Describe + Any> Entity for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One public field of a structured value
#[derive(Debug, Clone)]
pub struct Field<'a> {
    /// Declared identifier (`ReturnPath`, `IPAddress`, `list_id`, ...)
    pub name: Cow<'a, str>,
    /// Declared type and run-time value
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// Create a field descriptor
    pub fn new(name: impl Into<Cow<'a, str>>, value: FieldValue<'a>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Symbolic value of an enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    /// Variant identifier, if the enumeration names its variants
    pub name: Option<&'static str>,
    /// Numeric ordinal of the variant
    pub ordinal: i64,
}

impl EnumValue {
    /// Enumeration value with a variant name
    pub fn named(name: &'static str, ordinal: i64) -> Self {
        Self {
            name: Some(name),
            ordinal,
        }
    }

    /// Enumeration value known only by ordinal
    pub fn ordinal(ordinal: i64) -> Self {
        Self {
            name: None,
            ordinal,
        }
    }
}

/// Declared type and run-time value of a field
#[derive(Clone)]
pub enum FieldValue<'a> {
    /// Not set
    Absent,
    /// Text
    Str(Cow<'a, str>),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Enumeration variant
    Enum(EnumValue),
    /// Timestamp with UTC offset
    TimestampOffset(DateTime<FixedOffset>),
    /// Timestamp without offset
    Timestamp(NaiveDateTime),
    /// Single nested object
    Object(&'a dyn Entity),
    /// Collection of nested objects
    Objects(Vec<&'a dyn Entity>),
    /// String-keyed mapping with heterogeneous values
    DynamicMap(&'a WireMapping),
    /// String-keyed mapping with string values
    StringMap(&'a BTreeMap<String, String>),
    /// Ordered sequence of loosely-typed values
    Sequence(Vec<FieldValue<'a>>),
    /// Anonymous record built at the call site
    Record(Record<'a>),
}

impl<'a> FieldValue<'a> {
    /// Nested object field
    pub fn object<T: Entity>(value: &'a T) -> Self {
        FieldValue::Object(value)
    }

    /// Optional nested object field
    pub fn object_opt<T: Entity>(value: &'a Option<T>) -> Self {
        match value {
            Some(inner) => FieldValue::Object(inner),
            None => FieldValue::Absent,
        }
    }

    /// Collection of nested objects
    pub fn objects<T: Entity>(items: &'a [T]) -> Self {
        FieldValue::Objects(items.iter().map(|item| item as &dyn Entity).collect())
    }

    /// Whether the field is unset
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Short name of the variant, for tracing
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Absent => "absent",
            FieldValue::Str(_) => "str",
            FieldValue::Int(_) => "int",
            FieldValue::UInt(_) => "uint",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Enum(_) => "enum",
            FieldValue::TimestampOffset(_) => "timestamp_offset",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Object(_) => "object",
            FieldValue::Objects(_) => "objects",
            FieldValue::DynamicMap(_) => "dynamic_map",
            FieldValue::StringMap(_) => "string_map",
            FieldValue::Sequence(_) => "sequence",
            FieldValue::Record(_) => "record",
        }
    }

    /// Identity mapping for scalars that no chain rule claims
    ///
    /// Composite variants are always claimed by a rule and yield `None` here.
    pub(crate) fn to_primitive(&self) -> Option<WireValue> {
        match self {
            FieldValue::Str(text) => Some(WireValue::String(text.to_string())),
            FieldValue::Int(n) => Some(WireValue::from(*n)),
            FieldValue::UInt(n) => Some(WireValue::from(*n)),
            FieldValue::Float(n) => serde_json::Number::from_f64(*n).map(WireValue::Number),
            FieldValue::Bool(b) => Some(WireValue::Bool(*b)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Str(text) => write!(f, "Str({text:?})"),
            FieldValue::Int(n) => write!(f, "Int({n})"),
            FieldValue::UInt(n) => write!(f, "UInt({n})"),
            FieldValue::Float(n) => write!(f, "Float({n})"),
            FieldValue::Bool(b) => write!(f, "Bool({b})"),
            FieldValue::Enum(e) => write!(f, "Enum({e:?})"),
            FieldValue::TimestampOffset(ts) => write!(f, "TimestampOffset({ts})"),
            FieldValue::Timestamp(ts) => write!(f, "Timestamp({ts})"),
            FieldValue::Objects(items) => write!(f, "Objects(len={})", items.len()),
            FieldValue::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            FieldValue::Record(record) => f.debug_tuple("Record").field(record).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

/// Anonymous, loosely-typed structured value
///
/// ```
/// use postmap_codec::{FieldValue, Record};
///
/// let payload = Record::new()
///     .with("CampaignId", FieldValue::Str("spring".into()))
///     .with("Transactional", FieldValue::Bool(true));
/// assert_eq!(payload.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record<'a> {
    fields: Vec<Field<'a>>,
}

impl<'a> Record<'a> {
    /// Empty record
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field
    pub fn with(mut self, name: impl Into<Cow<'a, str>>, value: FieldValue<'a>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Describe for Record<'_> {
    fn describe(&self) -> Vec<Field<'_>> {
        self.fields.clone()
    }
}

/// Conversion of a declared field type into a [`FieldValue`]
pub trait ToField {
    /// Borrow the value as a field value
    fn to_field(&self) -> FieldValue<'_>;
}

impl ToField for String {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self.as_str()))
    }
}

impl ToField for bool {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

macro_rules! signed_to_field {
    ($($ty:ty),*) => {
        $(impl ToField for $ty {
            fn to_field(&self) -> FieldValue<'_> {
                FieldValue::Int(i64::from(*self))
            }
        })*
    };
}

macro_rules! unsigned_to_field {
    ($($ty:ty),*) => {
        $(impl ToField for $ty {
            fn to_field(&self) -> FieldValue<'_> {
                FieldValue::UInt(u64::from(*self))
            }
        })*
    };
}

signed_to_field!(i8, i16, i32, i64);
unsigned_to_field!(u8, u16, u32, u64);

impl ToField for f64 {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

impl ToField for DateTime<FixedOffset> {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::TimestampOffset(*self)
    }
}

impl ToField for NaiveDateTime {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::Timestamp(*self)
    }
}

impl ToField for WireMapping {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::DynamicMap(self)
    }
}

impl ToField for BTreeMap<String, String> {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::StringMap(self)
    }
}

impl ToField for WireValue {
    fn to_field(&self) -> FieldValue<'_> {
        match self {
            WireValue::Null => FieldValue::Absent,
            WireValue::Bool(b) => FieldValue::Bool(*b),
            WireValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    n.as_f64().map_or(FieldValue::Absent, FieldValue::Float)
                }
            }
            WireValue::String(text) => FieldValue::Str(Cow::Borrowed(text.as_str())),
            WireValue::Array(items) => {
                FieldValue::Sequence(items.iter().map(ToField::to_field).collect())
            }
            WireValue::Object(map) => FieldValue::DynamicMap(map),
        }
    }
}

impl<T: ToField> ToField for Option<T> {
    fn to_field(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.to_field(),
            None => FieldValue::Absent,
        }
    }
}

impl<T: ToField> ToField for Vec<T> {
    fn to_field(&self) -> FieldValue<'_> {
        FieldValue::Sequence(self.iter().map(ToField::to_field).collect())
    }
}
