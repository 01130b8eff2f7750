//! Typed configuration values and their extraction into Rust types.

use std::fmt;

/// Value types a configuration document may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Boolean,
    Int,
    Long,
    Double
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Boolean => "bool",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Double => "double"
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(ValueKind::String),
            "bool" | "boolean" => Ok(ValueKind::Boolean),
            "int" | "i32" => Ok(ValueKind::Int),
            "long" | "i64" => Ok(ValueKind::Long),
            "double" | "f64" => Ok(ValueKind::Double),
            other => Err(format!(
                "Unknown value type: {}. Valid options: string, bool, int, long, double",
                other
            ))
        }
    }
}

/// A single stored configuration value.
///
/// `Unsupported` carries the name of a stored type outside the five
/// configuration types (arrays, nulls, nested documents). It is never
/// extracted successfully; asking for it reports a type mismatch.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Unsupported(String)
}

impl ConfigValue {
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            ConfigValue::String(_) => Some(ValueKind::String),
            ConfigValue::Boolean(_) => Some(ValueKind::Boolean),
            ConfigValue::Int(_) => Some(ValueKind::Int),
            ConfigValue::Long(_) => Some(ValueKind::Long),
            ConfigValue::Double(_) => Some(ValueKind::Double),
            ConfigValue::Unsupported(_) => None
        }
    }

    /// Name of the stored type, as reported in type mismatch errors.
    pub fn type_name(&self) -> &str {
        match self {
            ConfigValue::Unsupported(name) => name,
            other => other.kind().map_or("unsupported", ValueKind::name)
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(v) => f.write_str(v),
            ConfigValue::Boolean(v) => write!(f, "{}", v),
            ConfigValue::Int(v) => write!(f, "{}", v),
            ConfigValue::Long(v) => write!(f, "{}", v),
            ConfigValue::Double(v) => write!(f, "{}", v),
            ConfigValue::Unsupported(name) => write!(f, "<{}>", name)
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Boolean(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Long(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Double(value)
    }
}

/// Rust types a configuration value can be extracted into.
///
/// Extraction is exact: an `Int` value is not a `Long`, and a `Long` is not
/// narrowed into an `Int`.
pub trait FromConfigValue: Sized {
    const KIND: ValueKind;

    fn from_config_value(value: &ConfigValue) -> Option<Self>;
}

impl FromConfigValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(v) => Some(v.clone()),
            _ => None
        }
    }
}

impl FromConfigValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Boolean(v) => Some(*v),
            _ => None
        }
    }
}

impl FromConfigValue for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Int(v) => Some(*v),
            _ => None
        }
    }
}

impl FromConfigValue for i64 {
    const KIND: ValueKind = ValueKind::Long;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Long(v) => Some(*v),
            _ => None
        }
    }
}

impl FromConfigValue for f64 {
    const KIND: ValueKind = ValueKind::Double;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Double(v) => Some(*v),
            _ => None
        }
    }
}
