use serde_json::Value;

/// Typed view of the extraction output, used only for display.
/// The raw text stays the source of truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryElements {
    pub characters: Vec<String>,
    pub locations: Vec<String>,
    pub conflict: String,
    pub resolution: String,
    pub symbols: Vec<String>,
}

/// Best-effort decode of model output that was asked to be JSON.
/// Models often wrap it in a markdown fence, and list fields sometimes
/// come back as objects or a single string.
pub fn decode_story_elements(raw: &str) -> Option<StoryElements> {
    let value: Value = serde_json::from_str(strip_code_fence(raw)).ok()?;
    let Value::Object(map) = value else {
        return None;
    };

    Some(StoryElements {
        characters: map.get("characters").map(flatten).unwrap_or_default(),
        locations: map.get("locations").map(flatten).unwrap_or_default(),
        conflict: map.get("conflict").map(render).unwrap_or_default(),
        resolution: map.get("resolution").map(render).unwrap_or_default(),
        symbols: map.get("symbols").map(flatten).unwrap_or_default(),
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string, e.g. "json"
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn flatten(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(render).collect(),
        Value::Null => Vec::new(),
        other => vec![render(other)],
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            if let Some(Value::String(name)) = map.get("name") {
                match map.get("description").or_else(|| map.get("role")) {
                    Some(Value::String(desc)) => format!("{name}: {desc}"),
                    _ => name.clone(),
                }
            } else {
                value.to_string()
            }
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_fenced_json() {
        let raw = "```json\n{\"characters\": [\"Ada\", \"Bram\"], \"locations\": [\"Vault\"], \
                   \"conflict\": \"A stolen map\", \"resolution\": \"A bargain\", \
                   \"symbols\": [\"key\", \"lantern\", \"crow\"]}\n```";
        let e = decode_story_elements(raw).unwrap();
        assert_eq!(e.characters, vec!["Ada", "Bram"]);
        assert_eq!(e.locations, vec!["Vault"]);
        assert_eq!(e.conflict, "A stolen map");
        assert_eq!(e.symbols.len(), 3);
    }

    #[test]
    fn object_entries_are_rendered_by_name() {
        let raw = r#"{"characters": [{"name": "Ada", "description": "a cartographer"}],
                      "locations": "The Spire"}"#;
        let e = decode_story_elements(raw).unwrap();
        assert_eq!(e.characters, vec!["Ada: a cartographer"]);
        assert_eq!(e.locations, vec!["The Spire"]);
        assert!(e.symbols.is_empty());
    }

    #[test]
    fn prose_is_not_decoded() {
        assert_eq!(decode_story_elements("Extraction failed"), None);
        assert_eq!(decode_story_elements("[1, 2]"), None);
    }
}
