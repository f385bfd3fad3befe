//! Flattens a nested, JSON-shaped mapping into dotted key-value pairs.

use serde_json::{Map, Value};

use crate::provider::Settings;

/// Flatten a nested mapping into dotted [`Settings`].
///
/// Keys along each path are joined with `.` under `namespace` (pass `""` for
/// no prefix): `{"server": {"port": 8080}}` → `{"server.port": "8080"}`.
/// Scalars stringify in their natural form: strings keep their text
/// unquoted, numbers and booleans render as written, `null` renders as
/// `"null"`.
///
/// Arrays are not recursed into. An array value stringifies wholesale in
/// JSON text form (`[1,2,3]`), so array elements never get indexed keys.
///
/// Each call builds an independent map from its input alone.
pub fn flatten(nested: &Map<String, Value>, namespace: &str) -> Settings {
    let mut flattened = Settings::new();

    for (key, value) in nested {
        let token = dotted(namespace, key);

        match value {
            Value::Object(child) => flattened.extend(flatten(child, &token)),
            scalar => {
                flattened.insert(token, stringify(scalar));
            }
        }
    }

    flattened
}

fn dotted(namespace: &str, key: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{namespace}.{key}")
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
