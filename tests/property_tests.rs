//! Property-based tests for the schema compiler.
//!
//! These tests use proptest to verify universal properties across many
//! generated inputs.

use proptest::prelude::*;

use avrodecl::model::{ModelDescriptor, ModelRegistry, Primitive, RecordMeta, TypeMeta};
use avrodecl::schema::{build_schema, nullify, AvroSchema, EnumSchema, FixedSchema};
use avrodecl::stringify_schema;

// ============================================================================
// Schema Generators
// ============================================================================

/// Generate arbitrary Avro primitive schemas.
fn arb_primitive_schema() -> impl Strategy<Value = AvroSchema> {
    prop_oneof![
        Just(AvroSchema::Null),
        Just(AvroSchema::Boolean),
        Just(AvroSchema::Int),
        Just(AvroSchema::Long),
        Just(AvroSchema::Float),
        Just(AvroSchema::Double),
        Just(AvroSchema::Bytes),
        Just(AvroSchema::String),
    ]
}

/// Generate arbitrary primitive type tags.
fn arb_primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        Just(Primitive::Null),
        Just(Primitive::Boolean),
        Just(Primitive::Int),
        Just(Primitive::Long),
        Just(Primitive::Float),
        Just(Primitive::Double),
        Just(Primitive::Bytes),
        Just(Primitive::String),
    ]
}

/// Generate valid Avro names (must start with [A-Za-z_] and contain only [A-Za-z0-9_]).
fn arb_avro_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}".prop_filter("name must not be empty", |s| !s.is_empty())
}

/// Generate enum symbols (non-empty list of unique valid names).
fn arb_enum_symbols() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_avro_name(), 1..5).prop_filter("symbols must be unique", |symbols| {
        let mut seen = std::collections::HashSet::new();
        symbols.iter().all(|s| seen.insert(s.clone()))
    })
}

/// Generate arbitrary non-union schemas.
fn arb_non_union_schema() -> impl Strategy<Value = AvroSchema> {
    prop_oneof![
        arb_primitive_schema(),
        (arb_avro_name(), arb_enum_symbols())
            .prop_map(|(name, symbols)| AvroSchema::Enum(EnumSchema::new(name, symbols))),
        (arb_avro_name(), 1usize..64)
            .prop_map(|(name, size)| AvroSchema::Fixed(FixedSchema::new(name, size))),
        arb_avro_name().prop_map(AvroSchema::Named),
    ]
}

/// Generate unions of non-null primitive members.
fn arb_union_without_null() -> impl Strategy<Value = AvroSchema> {
    prop::collection::vec(
        prop_oneof![
            Just(AvroSchema::Int),
            Just(AvroSchema::Long),
            Just(AvroSchema::String),
            Just(AvroSchema::Boolean),
        ],
        1..4,
    )
    .prop_map(AvroSchema::Union)
}

// ============================================================================
// Property: Null Wrapping
// ============================================================================

proptest! {
    /// Wrapping with nullable=false never alters the schema.
    #[test]
    fn nullify_without_nullable_is_identity(schema in arb_non_union_schema()) {
        prop_assert_eq!(nullify(schema.clone(), false), schema);
    }

    /// Wrapping a non-union schema produces a two-member union led by null.
    #[test]
    fn nullify_wraps_non_union_schemas(schema in arb_non_union_schema()) {
        let wrapped = nullify(schema.clone(), true);
        match &wrapped {
            AvroSchema::Union(members) => {
                prop_assert_eq!(members.len(), 2);
                prop_assert_eq!(&members[0], &AvroSchema::Null);
                prop_assert_eq!(&members[1], &schema);
            }
            other => prop_assert!(false, "expected union, got {:?}", other),
        }
        prop_assert!(wrapped.contains_null());
    }

    /// Wrapping is idempotent: a second application changes nothing.
    #[test]
    fn nullify_is_idempotent(schema in arb_non_union_schema()) {
        let once = nullify(schema, true);
        prop_assert_eq!(nullify(once.clone(), true), once);
    }

    /// Wrapping a union without a null member prepends null and keeps the
    /// existing members in order.
    #[test]
    fn nullify_prepends_null_to_unions(schema in arb_union_without_null()) {
        let AvroSchema::Union(original) = schema.clone() else {
            return Err(TestCaseError::fail("generator produced a non-union"));
        };

        let wrapped = nullify(schema, true);
        match wrapped {
            AvroSchema::Union(members) => {
                prop_assert_eq!(members.len(), original.len() + 1);
                prop_assert_eq!(&members[0], &AvroSchema::Null);
                prop_assert_eq!(&members[1..], &original[..]);
            }
            other => prop_assert!(false, "expected union, got {:?}", other),
        }
    }
}

// ============================================================================
// Property: Primitive Names
// ============================================================================

proptest! {
    /// Every primitive's name parses back to the same primitive.
    #[test]
    fn primitive_names_round_trip(primitive in arb_primitive()) {
        let parsed: Primitive = primitive.name().parse().unwrap();
        prop_assert_eq!(parsed, primitive);
    }

    /// A primitive schema's display name matches its JSON serialization.
    #[test]
    fn primitive_display_name_matches_json(schema in arb_primitive_schema()) {
        prop_assert_eq!(
            serde_json::json!(schema.display_name()),
            schema.to_json_value()
        );
    }
}

// ============================================================================
// Property: Field Order
// ============================================================================

proptest! {
    /// Compiled records list fields in declaration order, with repeated
    /// identifiers collapsing onto their first position.
    #[test]
    fn field_declaration_order_is_preserved(ids in prop::collection::vec(arb_avro_name(), 1..8)) {
        struct Model;

        let mut descriptor = ModelDescriptor::new(RecordMeta::new("Model"));
        for id in &ids {
            descriptor = descriptor.field(id, TypeMeta::string());
        }

        let mut expected: Vec<String> = Vec::new();
        for id in &ids {
            if !expected.contains(id) {
                expected.push(id.clone());
            }
        }

        let mut registry = ModelRegistry::new();
        let model = registry.register::<Model>(descriptor);

        let schema = build_schema(&registry, model).unwrap();
        let AvroSchema::Record(record) = schema else {
            return Err(TestCaseError::fail("expected record schema"));
        };
        let names: Vec<String> = record.fields.iter().map(|f| f.name.clone()).collect();
        prop_assert_eq!(names, expected);
    }
}

// ============================================================================
// Property: Output Rendering
// ============================================================================

proptest! {
    /// Rendered output parses back to the schema's JSON value and carries
    /// exactly one trailing newline.
    #[test]
    fn stringified_schema_round_trips(schema in arb_non_union_schema()) {
        let text = stringify_schema(&schema);
        prop_assert!(text.ends_with('\n'));
        prop_assert!(!text.ends_with("\n\n"));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, schema.to_json_value());
    }
}
