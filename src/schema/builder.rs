//! Schema builder: compiles registered model metadata into schema trees.
//!
//! The builder walks a model's field-type metadata recursively and produces
//! the output [`AvroSchema`] tree, handling nullability wrapping, default
//! propagation, union assembly, and inline compilation of referenced models.
//! Every invocation rebuilds the tree from scratch; a model referenced twice
//! is compiled twice.

use crate::error::BuildError;
use crate::model::{FieldMeta, ModelId, ModelRegistry, Primitive, TypeMeta};
use crate::schema::{
    ArraySchema, AvroSchema, EnumSchema, FieldSchema, FixedSchema, MapSchema, RecordSchema,
};

/// Compile the schema for one registered model.
///
/// # Errors
/// Returns [`BuildError::MetadataMissing`] when the model is not registered
/// or its record name is empty, [`BuildError::UnresolvableReference`] when a
/// record field points at an unregistered model,
/// [`BuildError::CyclicReference`] when the model references itself directly
/// or through other models, and [`BuildError::FieldResolution`] wrapping any
/// failure inside a field's type.
pub fn build_schema(registry: &ModelRegistry, id: ModelId) -> Result<AvroSchema, BuildError> {
    SchemaBuilder::new(registry).build_model(id)
}

/// Add `"null"` as a union member to represent optionality.
///
/// Idempotent: a union already containing the literal `null` member is
/// returned unchanged. A union without `null` gets it prepended; any other
/// schema is wrapped into the two-member union `["null", schema]`.
pub fn nullify(schema: AvroSchema, nullable: bool) -> AvroSchema {
    if !nullable {
        return schema;
    }
    match schema {
        AvroSchema::Union(members) => {
            if members.iter().any(|m| matches!(m, AvroSchema::Null)) {
                AvroSchema::Union(members)
            } else {
                let mut wrapped = Vec::with_capacity(members.len() + 1);
                wrapped.push(AvroSchema::Null);
                wrapped.extend(members);
                AvroSchema::Union(wrapped)
            }
        }
        other => AvroSchema::Union(vec![AvroSchema::Null, other]),
    }
}

/// Stateful walker over the model metadata graph.
///
/// Holds the registry being read and the stack of models currently being
/// compiled, used to detect cyclic references instead of recursing without
/// bound.
#[derive(Debug)]
pub struct SchemaBuilder<'r> {
    registry: &'r ModelRegistry,
    resolving: Vec<ModelId>,
}

impl<'r> SchemaBuilder<'r> {
    /// Create a builder reading from `registry`.
    pub fn new(registry: &'r ModelRegistry) -> Self {
        Self {
            registry,
            resolving: Vec::new(),
        }
    }

    /// Compile a complete record schema for one model.
    ///
    /// Fields are compiled in declaration order; the first failing field
    /// aborts the whole compile and no partial schema is returned.
    pub fn build_model(&mut self, id: ModelId) -> Result<AvroSchema, BuildError> {
        if self.resolving.contains(&id) {
            let mut path: Vec<&str> = self.resolving.iter().map(ModelId::name).collect();
            path.push(id.name());
            return Err(BuildError::CyclicReference(path.join(" -> ")));
        }

        let descriptor = self
            .registry
            .descriptor(id)
            .ok_or_else(|| BuildError::MetadataMissing(id.name().to_string()))?;

        let record = descriptor.record();
        if record.name.is_empty() {
            return Err(BuildError::MetadataMissing(id.name().to_string()));
        }

        self.resolving.push(id);
        let fields = self.build_fields(id);
        self.resolving.pop();
        let fields = fields?;

        Ok(AvroSchema::Record(RecordSchema {
            name: record.name.clone(),
            namespace: record.namespace.clone(),
            doc: record.doc.clone(),
            aliases: record.aliases.clone(),
            fields,
        }))
    }

    fn build_fields(&mut self, id: ModelId) -> Result<Vec<FieldSchema>, BuildError> {
        let registry = self.registry;
        let field_ids = registry
            .field_ids(id)
            .ok_or_else(|| BuildError::MetadataMissing(id.name().to_string()))?;

        let mut fields = Vec::with_capacity(field_ids.len());
        for field_id in field_ids {
            let meta = registry
                .field_meta(id, field_id)
                .ok_or_else(|| BuildError::MetadataMissing(format!("{id}.{field_id}")))?;
            let ty = registry
                .field_type(id, field_id)
                .ok_or_else(|| BuildError::MetadataMissing(format!("{id}.{field_id}")))?;
            fields.push(self.build_field(meta, ty)?);
        }
        Ok(fields)
    }

    /// Resolve one field: its type schema plus the field attributes.
    ///
    /// A failure inside the type is rewrapped as
    /// [`BuildError::FieldResolution`] carrying the field's name, with the
    /// inner error preserved as source.
    pub fn build_field(
        &mut self,
        meta: &FieldMeta,
        ty: &TypeMeta,
    ) -> Result<FieldSchema, BuildError> {
        let schema = self
            .resolve_type(ty)
            .map_err(|source| BuildError::FieldResolution {
                field: meta.name.clone(),
                source: Box::new(source),
            })?;

        Ok(FieldSchema {
            name: meta.name.clone(),
            schema,
            default: meta.default.clone(),
            doc: meta.doc.clone(),
            order: meta.order,
            aliases: meta.aliases.clone(),
        })
    }

    /// Resolve a type descriptor to its output schema.
    ///
    /// Union members are resolved in order and never flattened: a member that
    /// itself resolves to a union is left nested as-is.
    pub fn resolve_type(&mut self, meta: &TypeMeta) -> Result<AvroSchema, BuildError> {
        match meta {
            TypeMeta::Primitive {
                primitive,
                nullable,
            } => Ok(nullify(AvroSchema::from(*primitive), *nullable)),

            TypeMeta::Reference {
                reference,
                nullable,
            } => Ok(nullify(AvroSchema::Named(reference.clone()), *nullable)),

            TypeMeta::Enum { meta, nullable } => {
                let schema = AvroSchema::Enum(EnumSchema {
                    name: meta.name.clone(),
                    namespace: meta.namespace.clone(),
                    symbols: meta.symbols.clone(),
                    doc: meta.doc.clone(),
                    aliases: meta.aliases.clone(),
                    default: meta.default.clone(),
                });
                Ok(nullify(schema, *nullable))
            }

            TypeMeta::Array {
                items,
                default,
                nullable,
            } => {
                let items = self.resolve_type(items)?;
                let schema = AvroSchema::Array(ArraySchema {
                    items: Box::new(items),
                    default: default.clone(),
                });
                Ok(nullify(schema, *nullable))
            }

            TypeMeta::Map {
                values,
                default,
                nullable,
            } => {
                let values = self.resolve_type(values)?;
                let schema = AvroSchema::Map(MapSchema {
                    values: Box::new(values),
                    default: default.clone(),
                });
                Ok(nullify(schema, *nullable))
            }

            TypeMeta::Fixed { meta, nullable } => {
                let schema = AvroSchema::Fixed(FixedSchema {
                    name: meta.name.clone(),
                    namespace: meta.namespace.clone(),
                    size: meta.size,
                    aliases: meta.aliases.clone(),
                });
                Ok(nullify(schema, *nullable))
            }

            TypeMeta::Union { members, nullable } => {
                let members: Result<Vec<AvroSchema>, BuildError> =
                    members.iter().map(|m| self.resolve_type(m)).collect();
                Ok(nullify(AvroSchema::Union(members?), *nullable))
            }

            TypeMeta::Record { target, nullable } => {
                let id = target.resolve();
                if !self.registry.contains(id) {
                    return Err(BuildError::UnresolvableReference(
                        id.type_name().to_string(),
                    ));
                }
                let schema = self.build_model(id)?;
                Ok(nullify(schema, *nullable))
            }
        }
    }
}

impl From<Primitive> for AvroSchema {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Null => AvroSchema::Null,
            Primitive::Boolean => AvroSchema::Boolean,
            Primitive::Int => AvroSchema::Int,
            Primitive::Long => AvroSchema::Long,
            Primitive::Float => AvroSchema::Float,
            Primitive::Double => AvroSchema::Double,
            Primitive::Bytes => AvroSchema::Bytes,
            Primitive::String => AvroSchema::String,
        }
    }
}
