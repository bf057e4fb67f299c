use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::constants::{JSON_EXTENSION, PATH_SEPARATOR, TOML_EXTENSION};
use crate::error::{MapperError, Result};
use crate::value::{Key, Symbol, Value};

/// A property path such as `employees.sellers.Suzie`, split into segments once.
///
/// Symbol paths always have exactly one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Key>,
}

impl FieldPath {
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted.split(PATH_SEPARATOR).map(Key::from).collect(),
        }
    }

    pub fn segments(&self) -> &[Key] {
        &self.segments
    }
}

impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for FieldPath {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<&String> for FieldPath {
    fn from(dotted: &String) -> Self {
        Self::parse(dotted)
    }
}

impl From<Symbol> for FieldPath {
    fn from(symbol: Symbol) -> Self {
        Self {
            segments: vec![Key::Symbol(symbol)],
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(FieldPath::from)
    }
}

/// Options controlling a projection.
///
/// `select` decides which keys are considered; `ignore` is applied afterwards and
/// always wins for keys it names directly. The three defaults replace present
/// `undefined`/`null` properties, most specific option first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    pub copy_arrays: bool,
    pub copy_objects: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<FieldPath>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<FieldPath>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "configured_value"
    )]
    pub default_value_if_undefined: Option<Value>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "configured_value"
    )]
    pub default_value_if_null: Option<Value>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "configured_value"
    )]
    pub default_value_if_null_or_undefined: Option<Value>,
}

// A present `null` is a configured default, not an absent option
fn configured_value<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl ProjectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a config file; the format follows the file extension (`.toml` or `.json`)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MapperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|s| s.to_str()) {
            Some(TOML_EXTENSION) => Self::from_toml_str(&content),
            Some(JSON_EXTENSION) => Self::from_json_str(&content),
            _ => Err(MapperError::Config(format!(
                "Unsupported config file '{}': expected a .{} or .{} file",
                path.display(),
                TOML_EXTENSION,
                JSON_EXTENSION
            ))),
        }
    }

    pub fn with_copy_arrays(mut self, copy_arrays: bool) -> Self {
        self.copy_arrays = copy_arrays;
        self
    }

    pub fn with_copy_objects(mut self, copy_objects: bool) -> Self {
        self.copy_objects = copy_objects;
        self
    }

    pub fn with_select<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        self.select = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_ignore<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        self.ignore = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_default_if_undefined(mut self, value: impl Into<Value>) -> Self {
        self.default_value_if_undefined = Some(value.into());
        self
    }

    pub fn with_default_if_null(mut self, value: impl Into<Value>) -> Self {
        self.default_value_if_null = Some(value.into());
        self
    }

    pub fn with_default_if_null_or_undefined(mut self, value: impl Into<Value>) -> Self {
        self.default_value_if_null_or_undefined = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_paths_split_into_segments() {
        let path = FieldPath::parse("employees.sellers.Suzie");
        let names: Vec<&str> = path.segments().iter().filter_map(Key::as_name).collect();

        assert_eq!(names, vec!["employees", "sellers", "Suzie"]);
        assert_eq!(path.to_string(), "employees.sellers.Suzie");
    }

    #[test]
    fn symbol_paths_have_one_segment() {
        let symbol = Symbol::new("with.dots");
        let path = FieldPath::from(symbol.clone());

        assert_eq!(path.segments(), &[Key::Symbol(symbol)]);
    }

    #[test]
    fn toml_config_uses_defaults_for_missing_fields() {
        let config = ProjectionConfig::from_toml_str(
            r#"
            copy_objects = true
            select = ["id", "education.high"]
            default_value_if_undefined = "n/a"
            "#,
        )
        .unwrap();

        assert!(config.copy_objects);
        assert!(!config.copy_arrays);
        assert_eq!(
            config.select,
            Some(vec![FieldPath::parse("id"), FieldPath::parse("education.high")])
        );
        assert_eq!(config.ignore, None);
        assert_eq!(config.default_value_if_undefined, Some(Value::from("n/a")));
        assert_eq!(config.default_value_if_null, None);
    }

    #[test]
    fn json_null_default_counts_as_configured() {
        let config =
            ProjectionConfig::from_json_str(r#"{"default_value_if_null": null}"#).unwrap();

        assert_eq!(config.default_value_if_null, Some(Value::Null));
        assert_eq!(config.default_value_if_null_or_undefined, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ProjectionConfig::from_json_str(r#"{"copyObjects": true}"#).unwrap_err();
        assert!(matches!(err, MapperError::Json(_)));
    }

    #[test]
    fn builder_matches_parsed_config() {
        let built = ProjectionConfig::new()
            .with_copy_arrays(true)
            .with_ignore(["married", "id"])
            .with_default_if_null_or_undefined(Value::Null);
        let parsed = ProjectionConfig::from_json_str(
            r#"{"copy_arrays": true, "ignore": ["married", "id"], "default_value_if_null_or_undefined": null}"#,
        )
        .unwrap();

        assert_eq!(built, parsed);
    }
}
