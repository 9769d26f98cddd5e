//! JSON documents as nested objects.
//!
//! Object keys are key path segments and string leaves are values:
//!
//! ```json
//! {"server": {"motd": "hello", "port": "25565"}}
//! ```
//!
//! holds `server.motd` and `server.port`. A value stored at a path that also
//! has children lives under the empty-string key of that object, which no
//! segment can collide with.
//!
//! Every value is rendered as a JSON string. Numbers, booleans and arrays
//! are read as their JSON text, so the next write turns `{"port": 25565}`
//! into `{"port": "25565"}`.

use serde_json::{Map, Value as JsonValue};

use persistence_core::{Format, FormatError, KeyPath, TreeModel};

/// Key under which an object keeps its own value.
const SELF_KEY: &str = "";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render indented, one member per line.
    pub fn pretty() -> Self {
        JsonFormat { pretty: true }
    }

    fn flatten(
        model: &mut TreeModel,
        prefix: Option<&KeyPath>,
        map: &Map<String, JsonValue>,
    ) -> Result<(), FormatError> {
        for (name, value) in map {
            if name == SELF_KEY {
                match (prefix, value) {
                    (Some(prefix), JsonValue::String(s)) => {
                        model.insert(prefix.clone(), s.as_str());
                    }
                    (Some(prefix), JsonValue::Null) => {
                        log::debug!("Skipping null value at {}", prefix);
                    }
                    (Some(prefix), other) => {
                        model.insert(prefix.clone(), other.to_string());
                    }
                    (None, _) => {
                        return Err(FormatError::Shape {
                            message: "the top-level object cannot hold a value".to_string(),
                        })
                    }
                }
                continue;
            }

            let key = match prefix {
                Some(prefix) => prefix.child(name),
                None => KeyPath::try_from_segments(vec![name.clone()]),
            }
            .map_err(|e| FormatError::Other(e.into()))?;

            match value {
                JsonValue::Object(children) => Self::flatten(model, Some(&key), children)?,
                JsonValue::String(s) => {
                    model.insert(key, s.as_str());
                }
                JsonValue::Null => {}
                // Numbers, booleans and arrays are kept as their JSON text.
                other => {
                    model.insert(key, other.to_string());
                }
            }
        }
        Ok(())
    }

    fn nest(root: &mut Map<String, JsonValue>, key: &KeyPath, value: &str) {
        let segments = key.segments();
        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => return,
        };

        let mut cursor = root;
        for segment in parents {
            let slot = cursor
                .entry(segment.clone())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            if let JsonValue::String(own) = slot {
                // A value already sits here; move it under the self key.
                let own = std::mem::take(own);
                let mut map = Map::new();
                map.insert(SELF_KEY.to_string(), JsonValue::String(own));
                *slot = JsonValue::Object(map);
            }
            cursor = match slot {
                JsonValue::Object(map) => map,
                _ => return,
            };
        }

        match cursor.get_mut(last) {
            Some(JsonValue::Object(children)) => {
                children.insert(SELF_KEY.to_string(), JsonValue::String(value.to_string()));
            }
            _ => {
                cursor.insert(last.clone(), JsonValue::String(value.to_string()));
            }
        }
    }
}

impl Format for JsonFormat {
    type Model = TreeModel;

    fn parse(&self, raw: &str) -> Result<TreeModel, FormatError> {
        let mut model = TreeModel::new();
        if raw.trim().is_empty() {
            return Ok(model);
        }

        let document: JsonValue = serde_json::from_str(raw).map_err(|e| FormatError::Syntax {
            line: e.line(),
            message: e.to_string(),
        })?;

        match document {
            JsonValue::Object(map) => {
                Self::flatten(&mut model, None, &map)?;
                Ok(model)
            }
            JsonValue::Null => Ok(model),
            other => Err(FormatError::Shape {
                message: format!("expected a top-level object, found {}", other),
            }),
        }
    }

    fn render(&self, model: &TreeModel) -> Result<String, FormatError> {
        let mut root = Map::new();
        for (key, value) in model.iter() {
            Self::nest(&mut root, key, value);
        }

        let document = JsonValue::Object(root);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        rendered.map_err(|e| FormatError::Other(Box::new(e)))
    }

    fn blank(&self) -> String {
        "{}".to_string()
    }
}
