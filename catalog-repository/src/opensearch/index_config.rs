//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the product catalog index.

use serde_json::{json, Value};

/// The default name of the catalog index.
pub const DEFAULT_INDEX_NAME: &str = "products";

/// Which index the client reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub name: String,
}

impl IndexConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

/// Get the index settings and mappings for the catalog index.
///
/// The configuration includes:
/// - **completion**: `nameSuggest` backs the prefix suggester
/// - **text**: `name`, `description` and `category` for full-text matching
/// - **double**: `price` for range filters and sorting
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "long"
                },
                "name": {
                    "type": "text",
                    "fields": {
                        "raw": {
                            "type": "keyword"
                        }
                    }
                },
                "nameSuggest": {
                    "type": "completion"
                },
                "price": {
                    "type": "double"
                },
                "description": {
                    "type": "text"
                },
                "category": {
                    "type": "text"
                },
                "isActive": {
                    "type": "boolean"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        let properties = &settings["mappings"]["properties"];
        assert_eq!(properties["nameSuggest"]["type"], "completion");
        assert_eq!(properties["name"]["type"], "text");
        assert_eq!(properties["price"]["type"], "double");
        assert_eq!(properties["isActive"]["type"], "boolean");
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(IndexConfig::default().name, "products");
    }
}
