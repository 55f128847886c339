//! Declared-type mapping between Java and Python.
//!
//! Applied uniformly wherever a declared type appears: fields, formal
//! parameters and constructor guards. Cast types are dropped before this
//! table is ever consulted.

/// Map a declared Java type to the Python label used in parameter
/// annotations, field comments and default-value selection.
///
/// Unknown class, array and generic names pass through unchanged.
pub fn map_java_type(java_type: &str) -> String {
    match java_type {
        "int" | "long" | "short" | "byte" => "int".to_string(),
        "float" | "double" => "float".to_string(),
        "boolean" => "bool".to_string(),
        "char" | "String" => "str".to_string(),
        "String[]" => "[]".to_string(),
        other => other.to_string(),
    }
}

/// Default value for a declaration without an initializer, keyed by the
/// *mapped* Python label.
pub fn default_value(py_type: &str) -> &'static str {
    match py_type {
        "int" | "short" | "long" => "0",
        "float" | "double" => "0.0",
        "str" | "char" => "''",
        _ => "None",
    }
}
