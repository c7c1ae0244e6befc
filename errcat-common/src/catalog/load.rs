//! Building catalogs from JSON and TOML.
//!
//! Leaf detection happens here: an object with an own `code` key becomes a
//! [`ErrorDescriptor`], any other object (or array, keyed by index) becomes a
//! [`Category`]. Scalars and nulls that are not descriptors are dropped, since
//! they carry nothing to validate.

use super::{Catalog, CatalogNode, Category, CodeValue, ErrorDescriptor, Level};
use crate::errors::{ErrcatError, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Source format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// `.toml` files are TOML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Catalog {
    /// Builds a catalog from an already-parsed JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => {
                let mut path = Vec::new();
                Ok(Self::new(category_from_map(map, &mut path)?))
            }
            other => Err(ErrcatError::CatalogRootNotObject {
                found: value_kind(&other),
            }),
        }
    }

    /// Parses JSON catalog text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::parse(text, CatalogFormat::Json, "<inline>")
    }

    /// Parses TOML catalog text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, CatalogFormat::Toml, "<inline>")
    }

    /// Parses catalog text in the given format. `origin` names the source in errors.
    pub fn parse(text: &str, format: CatalogFormat, origin: &str) -> Result<Self> {
        let value = match format {
            CatalogFormat::Json => {
                serde_json::from_str::<Value>(text).map_err(|e| ErrcatError::CatalogParse {
                    origin: origin.to_string(),
                    message: e.to_string(),
                })?
            }
            CatalogFormat::Toml => {
                let table = toml::from_str::<toml::Table>(text).map_err(|e| {
                    ErrcatError::CatalogParse {
                        origin: origin.to_string(),
                        message: e.to_string(),
                    }
                })?;
                serde_json::to_value(table).map_err(|e| ErrcatError::CatalogParse {
                    origin: origin.to_string(),
                    message: e.to_string(),
                })?
            }
        };
        Self::from_json_value(value)
    }

    /// Reads and parses a catalog file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ErrcatError::CatalogNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ErrcatError::CatalogRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let format = CatalogFormat::from_path(path);
        let catalog = Self::parse(&text, format, &path.display().to_string())?;
        debug!(
            path = %path.display(),
            ?format,
            descriptors = catalog.descriptor_count(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}

fn category_from_map(map: Map<String, Value>, path: &mut Vec<String>) -> Result<Category> {
    let mut category = Category::new();
    for (key, value) in map {
        path.push(key);
        let node = node_from_value(value, path)?;
        let key = path.pop().unwrap_or_default();
        if let Some(node) = node {
            category.push(key, node);
        }
    }
    Ok(category)
}

fn category_from_array(items: Vec<Value>, path: &mut Vec<String>) -> Result<Category> {
    let mut category = Category::new();
    for (idx, value) in items.into_iter().enumerate() {
        path.push(idx.to_string());
        let node = node_from_value(value, path)?;
        let key = path.pop().unwrap_or_default();
        if let Some(node) = node {
            category.push(key, node);
        }
    }
    Ok(category)
}

fn node_from_value(value: Value, path: &mut Vec<String>) -> Result<Option<CatalogNode>> {
    match value {
        Value::Object(map) if map.contains_key("code") => {
            Ok(Some(CatalogNode::Descriptor(descriptor_from_map(map))))
        }
        Value::Object(map) => Ok(Some(CatalogNode::Category(category_from_map(map, path)?))),
        Value::Array(items) => Ok(Some(CatalogNode::Category(category_from_array(
            items, path,
        )?))),
        _ => Ok(None),
    }
}

fn descriptor_from_map(mut map: Map<String, Value>) -> ErrorDescriptor {
    let code = map.remove("code").map(code_value).unwrap_or_else(|| {
        CodeValue::NonInteger("null".to_string())
    });
    let message = match map.remove("message") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(message)) => message,
        Some(other) => other.to_string(),
    };

    let descriptor = ErrorDescriptor::with_code_value(code, message);
    match map.remove("level") {
        None | Some(Value::Null) => descriptor,
        Some(Value::String(level)) => descriptor.with_level(Level::from(level)),
        Some(other) => descriptor.with_level(Level::Other(other.to_string())),
    }
}

/// Integral numbers (including floats with no fractional part) are codes;
/// everything else is kept verbatim for reporting.
fn code_value(value: Value) -> CodeValue {
    if let Value::Number(number) = &value {
        if let Some(code) = number.as_i64() {
            return CodeValue::Integer(code.into());
        }
        if let Some(code) = number.as_u64() {
            return CodeValue::Integer(code.into());
        }
        if let Some(float) = number.as_f64()
            && float.is_finite()
            && float.fract() == 0.0
            && float >= i128::MIN as f64
            && float < i128::MAX as f64
        {
            return CodeValue::Integer(float as i128);
        }
    }
    CodeValue::NonInteger(value.to_string())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
