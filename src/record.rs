//! Registry entry decoding and record extraction
//!
//! A registry file is a stream of JSON values. Only some of them describe a
//! tracked file: operation markers carry no key, removal markers carry no
//! value, and the remaining entries name their source file in one of two
//! schema shapes.

use serde::Deserialize;

/// One decoded value from a registry file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryEntry {
    #[serde(rename = "k", default)]
    pub key: Option<String>,
    #[serde(rename = "v", default)]
    pub value: Option<EntryValue>,
}

/// The state object stored under `v`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryValue {
    #[serde(default)]
    pub meta: Option<EntryMeta>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Metadata block written by the filestream input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryMeta {
    #[serde(default)]
    pub source: Option<String>,
}

/// Where an entry's source path was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    /// `v.meta.source`, written by the filestream input
    Filestream(String),
    /// `v.source`, written by the legacy log input
    LogInput(String),
}

impl Attribution {
    pub fn into_source(self) -> String {
        match self {
            Attribution::Filestream(source) | Attribution::LogInput(source) => source,
        }
    }
}

impl EntryValue {
    /// Resolve the source path, preferring the filestream metadata
    pub fn attribution(&self) -> Option<Attribution> {
        let nested = self
            .meta
            .as_ref()
            .and_then(|meta| non_empty(meta.source.as_deref()));
        if let Some(source) = nested {
            return Some(Attribution::Filestream(source.to_string()));
        }

        non_empty(self.source.as_deref()).map(|source| Attribution::LogInput(source.to_string()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// A registry key attributed to a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub key: String,
    pub source: String,
}

/// Outcome of inspecting a single registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// No key: an operation marker such as `{"op":"set","id":3}`
    NotARecord,
    /// Key without a value: the file is no longer tracked
    Removal,
    /// Value present, but neither schema shape names a source
    Unattributed { key: String },
    Accepted(Record),
}

/// Classify an entry and pull out its record if it has one
pub fn extract(entry: RegistryEntry) -> Extraction {
    let key = match entry.key {
        Some(key) if !key.is_empty() => key,
        _ => return Extraction::NotARecord,
    };

    let value = match entry.value {
        Some(value) => value,
        None => return Extraction::Removal,
    };

    match value.attribution() {
        Some(attribution) => Extraction::Accepted(Record {
            key,
            source: attribution.into_source(),
        }),
        None => Extraction::Unattributed { key },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decode(json: &str) -> Extraction {
        extract(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_nested_attribution() {
        assert_eq!(
            decode(r#"{"k":"a","v":{"meta":{"source":"/var/log/x.log"}}}"#),
            Extraction::Accepted(Record {
                key: "a".to_string(),
                source: "/var/log/x.log".to_string(),
            })
        );
    }

    #[test]
    fn test_flat_attribution() {
        assert_eq!(
            decode(r#"{"k":"b","v":{"source":"/var/log/x.log","offset":42}}"#),
            Extraction::Accepted(Record {
                key: "b".to_string(),
                source: "/var/log/x.log".to_string(),
            })
        );
    }

    #[test]
    fn test_nested_wins_over_flat() {
        let entry: RegistryEntry =
            serde_json::from_str(r#"{"k":"a","v":{"meta":{"source":"/a"},"source":"/b"}}"#)
                .unwrap();
        assert_eq!(
            entry.value.as_ref().unwrap().attribution(),
            Some(Attribution::Filestream("/a".to_string()))
        );
    }

    #[test]
    fn test_empty_nested_falls_back_to_flat() {
        assert_eq!(
            decode(r#"{"k":"a","v":{"meta":{"source":""},"source":"/b"}}"#),
            Extraction::Accepted(Record {
                key: "a".to_string(),
                source: "/b".to_string(),
            })
        );
    }

    #[test]
    fn test_operation_marker_is_not_a_record() {
        assert_eq!(decode(r#"{"op":"set","id":1}"#), Extraction::NotARecord);
        assert_eq!(
            decode(r#"{"k":"","v":{"source":"/x"}}"#),
            Extraction::NotARecord
        );
        assert_eq!(
            decode(r#"{"k":null,"v":{"source":"/x"}}"#),
            Extraction::NotARecord
        );
    }

    #[test]
    fn test_removal_marker() {
        assert_eq!(decode(r#"{"k":"a"}"#), Extraction::Removal);
        assert_eq!(decode(r#"{"k":"a","v":null}"#), Extraction::Removal);
    }

    #[test]
    fn test_unattributed_value() {
        assert_eq!(
            decode(r#"{"k":"d","v":{}}"#),
            Extraction::Unattributed {
                key: "d".to_string()
            }
        );
        assert_eq!(
            decode(r#"{"k":"d","v":{"meta":null,"source":""}}"#),
            Extraction::Unattributed {
                key: "d".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_field_type_fails_to_decode() {
        assert!(serde_json::from_str::<RegistryEntry>(r#"{"k":"a","v":{"source":5}}"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_source_precedence(
            key in "[a-z0-9-]{0,8}",
            nested in proptest::option::of("[a-z/]{0,6}"),
            flat in proptest::option::of("[a-z/]{0,6}"),
        ) {
            let entry = RegistryEntry {
                key: Some(key.clone()),
                value: Some(EntryValue {
                    meta: Some(EntryMeta { source: nested.clone() }),
                    source: flat.clone(),
                }),
            };

            let expected_source = nested
                .clone()
                .filter(|s| !s.is_empty())
                .or_else(|| flat.clone().filter(|s| !s.is_empty()));

            match extract(entry) {
                Extraction::NotARecord => prop_assert!(key.is_empty()),
                Extraction::Removal => prop_assert!(false, "value was present"),
                Extraction::Unattributed { key: k } => {
                    prop_assert_eq!(k, key);
                    prop_assert!(expected_source.is_none());
                }
                Extraction::Accepted(record) => {
                    prop_assert!(!key.is_empty());
                    prop_assert_eq!(Some(record.source), expected_source);
                }
            }
        }
    }
}
