//! Type, field, and record metadata descriptors.
//!
//! A model's schema is described field by field with [`TypeMeta`] values,
//! paired one-to-one with [`FieldMeta`] attribute records. The metadata graph
//! is built once at registration time and is immutable afterwards.

use std::str::FromStr;

use serde_json::Value;

use crate::error::BuildError;
use crate::model::ModelRef;

/// Avro primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl Primitive {
    /// The Avro type name for this primitive.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bytes => "bytes",
            Primitive::String => "string",
        }
    }
}

impl FromStr for Primitive {
    type Err = BuildError;

    /// Parse a primitive type tag.
    ///
    /// This is the boundary where type tags arrive as strings (descriptors
    /// loaded from external input); anything outside the closed set fails
    /// with [`BuildError::UnknownTypeKind`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Primitive::Null),
            "boolean" => Ok(Primitive::Boolean),
            "int" => Ok(Primitive::Int),
            "long" => Ok(Primitive::Long),
            "float" => Ok(Primitive::Float),
            "double" => Ok(Primitive::Double),
            "bytes" => Ok(Primitive::Bytes),
            "string" => Ok(Primitive::String),
            other => Err(BuildError::UnknownTypeKind(other.to_string())),
        }
    }
}

/// Per-field type descriptor.
///
/// Every variant carries its own `nullable` flag; nullability is owned
/// entirely by the type, never by the field attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMeta {
    /// An explicitly declared primitive type.
    Primitive { primitive: Primitive, nullable: bool },
    /// A forward/external reference resolved only by name.
    Reference { reference: String, nullable: bool },
    /// A reference to another registered model, compiled inline.
    Record { target: ModelRef, nullable: bool },
    /// An inline enum type.
    Enum { meta: EnumMeta, nullable: bool },
    /// An array of items sharing one schema.
    Array {
        items: Box<TypeMeta>,
        default: Option<Value>,
        nullable: bool,
    },
    /// A map with string keys and values sharing one schema.
    Map {
        values: Box<TypeMeta>,
        default: Option<Value>,
        nullable: bool,
    },
    /// An inline fixed-size byte array type.
    Fixed { meta: FixedMeta, nullable: bool },
    /// An ordered union of alternative types.
    Union { members: Vec<TypeMeta>, nullable: bool },
}

impl TypeMeta {
    /// A non-nullable primitive type.
    pub fn primitive(primitive: Primitive) -> Self {
        TypeMeta::Primitive {
            primitive,
            nullable: false,
        }
    }

    /// Parse a primitive type from its string tag.
    ///
    /// Fails with [`BuildError::UnknownTypeKind`] for tags outside the
    /// primitive set.
    pub fn primitive_named(tag: &str) -> Result<Self, BuildError> {
        tag.parse().map(Self::primitive)
    }

    /// Shorthand for the `null` primitive.
    pub fn null() -> Self {
        Self::primitive(Primitive::Null)
    }

    /// Shorthand for the `boolean` primitive.
    pub fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    /// Shorthand for the `int` primitive.
    pub fn int() -> Self {
        Self::primitive(Primitive::Int)
    }

    /// Shorthand for the `long` primitive.
    pub fn long() -> Self {
        Self::primitive(Primitive::Long)
    }

    /// Shorthand for the `float` primitive.
    pub fn float() -> Self {
        Self::primitive(Primitive::Float)
    }

    /// Shorthand for the `double` primitive.
    pub fn double() -> Self {
        Self::primitive(Primitive::Double)
    }

    /// Shorthand for the `bytes` primitive.
    pub fn bytes() -> Self {
        Self::primitive(Primitive::Bytes)
    }

    /// Shorthand for the `string` primitive.
    pub fn string() -> Self {
        Self::primitive(Primitive::String)
    }

    /// A by-name reference to a type defined elsewhere.
    ///
    /// The reference is emitted as a bare name string and never checked
    /// against known types.
    pub fn reference(name: impl Into<String>) -> Self {
        TypeMeta::Reference {
            reference: name.into(),
            nullable: false,
        }
    }

    /// A reference to another registered model, compiled inline.
    pub fn record<T: 'static>() -> Self {
        TypeMeta::Record {
            target: ModelRef::of::<T>(),
            nullable: false,
        }
    }

    /// A record reference through an explicit (possibly deferred) model ref.
    pub fn record_ref(target: ModelRef) -> Self {
        TypeMeta::Record {
            target,
            nullable: false,
        }
    }

    /// An inline enum type.
    pub fn enumeration(meta: EnumMeta) -> Self {
        TypeMeta::Enum {
            meta,
            nullable: false,
        }
    }

    /// An array of `items`.
    pub fn array(items: TypeMeta) -> Self {
        TypeMeta::Array {
            items: Box::new(items),
            default: None,
            nullable: false,
        }
    }

    /// A map of string keys to `values`.
    pub fn map(values: TypeMeta) -> Self {
        TypeMeta::Map {
            values: Box::new(values),
            default: None,
            nullable: false,
        }
    }

    /// An inline fixed type.
    pub fn fixed(meta: FixedMeta) -> Self {
        TypeMeta::Fixed {
            meta,
            nullable: false,
        }
    }

    /// An ordered union of the given member types.
    pub fn union(members: Vec<TypeMeta>) -> Self {
        TypeMeta::Union {
            members,
            nullable: false,
        }
    }

    /// Mark this type as nullable.
    ///
    /// The resolved schema is wrapped in a `["null", ...]` union unless it
    /// already is a union containing `"null"`.
    pub fn nullable(mut self) -> Self {
        match &mut self {
            TypeMeta::Primitive { nullable, .. }
            | TypeMeta::Reference { nullable, .. }
            | TypeMeta::Record { nullable, .. }
            | TypeMeta::Enum { nullable, .. }
            | TypeMeta::Array { nullable, .. }
            | TypeMeta::Map { nullable, .. }
            | TypeMeta::Fixed { nullable, .. }
            | TypeMeta::Union { nullable, .. } => *nullable = true,
        }
        self
    }

    /// Whether this type is marked nullable.
    pub fn is_nullable(&self) -> bool {
        match self {
            TypeMeta::Primitive { nullable, .. }
            | TypeMeta::Reference { nullable, .. }
            | TypeMeta::Record { nullable, .. }
            | TypeMeta::Enum { nullable, .. }
            | TypeMeta::Array { nullable, .. }
            | TypeMeta::Map { nullable, .. }
            | TypeMeta::Fixed { nullable, .. }
            | TypeMeta::Union { nullable, .. } => *nullable,
        }
    }

    /// Set the type-level default value.
    ///
    /// Only array and map types carry a type-level default in the Avro
    /// grammar; on any other variant this leaves the type unchanged.
    /// Enum defaults are set through [`EnumMeta::with_default`].
    pub fn with_default(mut self, value: Value) -> Self {
        match &mut self {
            TypeMeta::Array { default, .. } | TypeMeta::Map { default, .. } => {
                *default = Some(value);
            }
            _ => {}
        }
        self
    }
}

/// Attributes of an inline enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMeta {
    /// The name of the enum.
    pub name: String,
    /// The symbols of the enum, in declaration order.
    pub symbols: Vec<String>,
    /// Optional namespace.
    pub namespace: Option<String>,
    /// Aliases for this enum type.
    pub aliases: Option<Vec<String>>,
    /// Optional documentation.
    pub doc: Option<String>,
    /// Default symbol, used during schema resolution.
    pub default: Option<String>,
}

impl EnumMeta {
    /// Create a new enum descriptor with the given name and symbols.
    pub fn new(name: impl Into<String>, symbols: Vec<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            namespace: None,
            aliases: None,
            doc: None,
            default: None,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the type aliases.
    pub fn with_aliases(mut self, aliases: Vec<impl Into<String>>) -> Self {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the default symbol.
    pub fn with_default(mut self, symbol: impl Into<String>) -> Self {
        self.default = Some(symbol.into());
        self
    }
}

/// Attributes of an inline fixed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedMeta {
    /// The name of the fixed type.
    pub name: String,
    /// The size in bytes.
    pub size: usize,
    /// Optional namespace.
    pub namespace: Option<String>,
    /// Aliases for this fixed type.
    pub aliases: Option<Vec<String>>,
}

impl FixedMeta {
    /// Create a new fixed descriptor with the given name and size.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            namespace: None,
            aliases: None,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the type aliases.
    pub fn with_aliases(mut self, aliases: Vec<impl Into<String>>) -> Self {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }
}

/// Field ordering for record comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrder {
    #[default]
    Ascending,
    Descending,
    Ignore,
}

impl FieldOrder {
    /// The Avro attribute value for this ordering.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldOrder::Ascending => "ascending",
            FieldOrder::Descending => "descending",
            FieldOrder::Ignore => "ignore",
        }
    }
}

/// Attribute record for a single field, independent of its type.
///
/// Optional attributes appear in the output schema only when supplied here;
/// absence is never rendered as a `null` placeholder. A `default` of JSON
/// `null` is an explicit default and is emitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMeta {
    /// The field name as it appears in the schema.
    pub name: String,
    /// Optional documentation.
    pub doc: Option<String>,
    /// Optional default value.
    pub default: Option<Value>,
    /// Optional sort order.
    pub order: Option<FieldOrder>,
    /// Aliases for this field.
    pub aliases: Option<Vec<String>>,
}

impl FieldMeta {
    /// Create field attributes with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the sort order.
    pub fn with_order(mut self, order: FieldOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the field aliases.
    pub fn with_aliases(mut self, aliases: Vec<impl Into<String>>) -> Self {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }
}

/// Record-level attributes of a registered model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordMeta {
    /// The record name.
    pub name: String,
    /// Optional namespace.
    pub namespace: Option<String>,
    /// Optional documentation.
    pub doc: Option<String>,
    /// Aliases for this record type.
    pub aliases: Option<Vec<String>>,
}

impl RecordMeta {
    /// Create record attributes with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the record aliases.
    pub fn with_aliases(mut self, aliases: Vec<impl Into<String>>) -> Self {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }
}
