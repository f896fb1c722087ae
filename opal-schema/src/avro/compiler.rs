use crate::errors::{Result, SchemaError};
use crate::handle::sha256_fingerprint;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Options handed to the Avro compiler
///
/// The compiler mutates the bag it receives: `registry` is filled in place
/// with every named type the compiled document defines, so a later
/// compilation handed the same bag can reference those types by full name.
/// Callers that must not observe state bleeding between unrelated
/// compilations have to hand over a copy; the adapter always does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvroParseOptions {
    /// Strip `logicalType` annotations before compilation instead of keeping
    /// them
    pub ignore_logical_types: bool,
    /// Wrap union values in a branch-naming object; recorded on the bag for
    /// the encode/decode layer, not consulted during compilation
    pub wrap_unions: bool,
    /// Named types visible to the compiler, keyed by full name
    pub registry: HashMap<String, Value>,
}

/// Output of a single compilation
#[derive(Debug)]
pub(crate) struct CompiledAvro {
    pub schema: apache_avro::Schema,
    pub name: Option<String>,
    pub canonical: String,
    pub fingerprint: String,
}

/// Compile a structured Avro document
///
/// Mutates `options.registry` in place (see [`AvroParseOptions`]).
pub(crate) fn compile(document: &Value, options: &mut AvroParseOptions) -> Result<CompiledAvro> {
    let mut document = document.clone();
    if options.ignore_logical_types {
        strip_logical_types(&mut document);
    }

    let mut local = HashMap::new();
    collect_named_types(&document, None, &mut local);

    let canonical = serde_json::to_string(&document)
        .map_err(|e| SchemaError::Compilation(e.to_string()))?;

    let schema = if options.registry.is_empty() {
        apache_avro::Schema::parse_str(&canonical)
            .map_err(|e| SchemaError::Compilation(e.to_string()))?
    } else {
        parse_with_registry(&canonical, &options.registry, &local)?
    };

    // Named types defined here become visible to later compilations sharing
    // this bag.
    options.registry.extend(local);

    let name = schema_name(&schema);
    let fingerprint = sha256_fingerprint(&canonical);
    debug!(name = ?name, fingerprint = %fingerprint, "compiled avro schema");

    Ok(CompiledAvro {
        schema,
        name,
        canonical,
        fingerprint,
    })
}

/// Compile against previously registered named types
///
/// Registry entries redefined by the current document are skipped so the
/// document's own definition wins.
fn parse_with_registry(
    canonical: &str,
    registry: &HashMap<String, Value>,
    local: &HashMap<String, Value>,
) -> Result<apache_avro::Schema> {
    let mut sources = Vec::with_capacity(registry.len() + 1);
    for (name, definition) in registry {
        if local.contains_key(name) {
            continue;
        }
        let source = serde_json::to_string(definition)
            .map_err(|e| SchemaError::Compilation(e.to_string()))?;
        sources.push(source);
    }
    debug!(
        registered = sources.len(),
        "resolving avro references through the named-type registry"
    );
    sources.push(canonical.to_string());

    let inputs: Vec<&str> = sources.iter().map(String::as_str).collect();
    let mut schemata = apache_avro::Schema::parse_list(&inputs)
        .map_err(|e| SchemaError::Compilation(e.to_string()))?;
    schemata
        .pop()
        .ok_or_else(|| SchemaError::Compilation("compiler returned no schema".to_string()))
}

/// Record every named type defined by the document, keyed by full name
///
/// The stored definition carries its effective namespace explicitly so it can
/// later be compiled outside the enclosing document.
fn collect_named_types(value: &Value, enclosing: Option<&str>, out: &mut HashMap<String, Value>) {
    match value {
        Value::Array(branches) => {
            for branch in branches {
                collect_named_types(branch, enclosing, out);
            }
        }
        Value::Object(object) => {
            let namespace = object
                .get("namespace")
                .and_then(Value::as_str)
                .or(enclosing);

            let kind = object.get("type").and_then(Value::as_str);
            if matches!(kind, Some("record" | "error" | "enum" | "fixed")) {
                if let Some(name) = object.get("name").and_then(Value::as_str) {
                    let fullname = match namespace {
                        _ if name.contains('.') => name.to_string(),
                        Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
                        _ => name.to_string(),
                    };
                    let mut definition = object.clone();
                    if !definition.contains_key("namespace") {
                        if let Some(ns) = namespace {
                            definition.insert("namespace".to_string(), Value::from(ns));
                        }
                    }
                    out.insert(fullname, Value::Object(definition));
                }
            }

            if let Some(fields) = object.get("fields").and_then(Value::as_array) {
                for field in fields {
                    if let Some(field_type) = field.get("type") {
                        collect_named_types(field_type, namespace, out);
                    }
                }
            }
            if let Some(items) = object.get("items") {
                collect_named_types(items, namespace, out);
            }
            if let Some(values) = object.get("values") {
                collect_named_types(values, namespace, out);
            }
        }
        _ => {}
    }
}

/// Remove `logicalType` annotations from the whole document
fn strip_logical_types(value: &mut Value) {
    match value {
        Value::Array(branches) => {
            for branch in branches {
                strip_logical_types(branch);
            }
        }
        Value::Object(object) => {
            object.remove("logicalType");
            for (_, nested) in object.iter_mut() {
                strip_logical_types(nested);
            }
        }
        _ => {}
    }
}

/// Full name of the top-level named type, if the schema has one
fn schema_name(schema: &apache_avro::Schema) -> Option<String> {
    match schema {
        apache_avro::Schema::Record(record) => Some(record.name.fullname(None)),
        apache_avro::Schema::Enum(enum_schema) => Some(enum_schema.name.fullname(None)),
        apache_avro::Schema::Fixed(fixed) => Some(fixed.name.fullname(None)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_record() -> Value {
        json!({
            "type": "record",
            "name": "User",
            "namespace": "com.example",
            "fields": [
                {"name": "name", "type": "string"},
                {"name": "age", "type": "int"}
            ]
        })
    }

    #[test]
    fn test_compile_fills_registry_in_place() {
        let mut options = AvroParseOptions::default();
        compile(&user_record(), &mut options).unwrap();

        assert!(options.registry.contains_key("com.example.User"));
    }

    #[test]
    fn test_compile_collects_nested_named_types() {
        let document = json!({
            "type": "record",
            "name": "Order",
            "namespace": "com.example",
            "fields": [
                {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["NEW", "DONE"]}},
                {"name": "lines", "type": {"type": "array", "items": {
                    "type": "record", "name": "Line", "fields": [{"name": "sku", "type": "string"}]
                }}}
            ]
        });

        let mut options = AvroParseOptions::default();
        compile(&document, &mut options).unwrap();

        assert!(options.registry.contains_key("com.example.Order"));
        assert!(options.registry.contains_key("com.example.Status"));
        assert!(options.registry.contains_key("com.example.Line"));
    }

    #[test]
    fn test_registry_resolves_references_across_compilations() {
        let mut options = AvroParseOptions::default();
        compile(&user_record(), &mut options).unwrap();

        let referencing = json!({
            "type": "record",
            "name": "Event",
            "namespace": "com.example",
            "fields": [{"name": "actor", "type": "com.example.User"}]
        });
        let compiled = compile(&referencing, &mut options).unwrap();
        assert_eq!(compiled.name, Some("com.example.Event".to_string()));
    }

    #[test]
    fn test_unresolved_reference_fails_compilation() {
        let referencing = json!({
            "type": "record",
            "name": "Event",
            "namespace": "com.example",
            "fields": [{"name": "actor", "type": "com.example.User"}]
        });
        let mut options = AvroParseOptions::default();
        let err = compile(&referencing, &mut options).unwrap_err();
        assert!(matches!(err, SchemaError::Compilation(_)));
    }

    #[test]
    fn test_redefined_name_prefers_local_definition() {
        let mut options = AvroParseOptions::default();
        compile(&user_record(), &mut options).unwrap();

        // Same full name, different shape: must compile against the local one.
        let redefined = json!({
            "type": "record",
            "name": "User",
            "namespace": "com.example",
            "fields": [{"name": "id", "type": "long"}]
        });
        let compiled = compile(&redefined, &mut options).unwrap();
        assert_eq!(compiled.name, Some("com.example.User".to_string()));
    }

    #[test]
    fn test_strip_logical_types_when_ignored() {
        let document = json!({
            "type": "record",
            "name": "Payment",
            "fields": [
                {"name": "at", "type": {"type": "long", "logicalType": "timestamp-millis"}}
            ]
        });

        let mut options = AvroParseOptions {
            ignore_logical_types: true,
            ..Default::default()
        };
        let compiled = compile(&document, &mut options).unwrap();
        assert!(!compiled.canonical.contains("logicalType"));
    }

    #[test]
    fn test_invalid_document_surfaces_compiler_error() {
        let document = json!({"type": "not_a_type", "name": "User"});
        let mut options = AvroParseOptions::default();
        let err = compile(&document, &mut options).unwrap_err();
        assert!(matches!(err, SchemaError::Compilation(_)));
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let mut first = AvroParseOptions::default();
        let mut second = AvroParseOptions::default();
        let fp1 = compile(&user_record(), &mut first).unwrap().fingerprint;
        let fp2 = compile(&user_record(), &mut second).unwrap().fingerprint;
        assert_eq!(fp1, fp2);
    }
}
