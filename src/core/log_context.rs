//! Structured context attached to log entries
//!
//! This module provides:
//! - `ContextValue`: the value side of a context field, covering every shape a
//!   caller may hand the logger
//! - `ExceptionValue`: a captured error with its source chain
//! - `LogContext`: an insertion-ordered map of field name to value

use chrono::{DateTime, FixedOffset, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Reserved context key for a captured error
pub const EXCEPTION_KEY: &str = "exception";

/// A captured error, stored under [`EXCEPTION_KEY`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionValue {
    pub type_name: String,
    pub message: String,
    pub sources: Vec<String>,
}

impl ExceptionValue {
    /// Capture an error, walking its `source()` chain
    pub fn capture<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut sources = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            sources.push(cause.to_string());
            source = cause.source();
        }

        Self {
            type_name: short_type_name(std::any::type_name_of_val(error)).to_string(),
            message: error.to_string(),
            sources,
        }
    }
}

impl fmt::Display for ExceptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

/// Value type for context fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// An object that knows how to print itself
    Stringable { type_name: String, display: String },
    DateTime(DateTime<FixedOffset>),
    /// An opaque object with no string conversion
    Object { type_name: String },
    List(Vec<ContextValue>),
    Map(LogContext),
    Exception(ExceptionValue),
}

impl ContextValue {
    /// Capture a value through its `Display` implementation
    ///
    /// # Examples
    ///
    /// ```
    /// use diagnostics_logger::ContextValue;
    /// use std::net::Ipv4Addr;
    ///
    /// let value = ContextValue::display(&Ipv4Addr::LOCALHOST);
    /// assert!(matches!(value, ContextValue::Stringable { .. }));
    /// ```
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        ContextValue::Stringable {
            type_name: short_type_name(std::any::type_name::<T>()).to_string(),
            display: value.to_string(),
        }
    }

    /// Record only the type of an opaque value
    pub fn object<T: ?Sized>(_value: &T) -> Self {
        ContextValue::Object {
            type_name: short_type_name(std::any::type_name::<T>()).to_string(),
        }
    }

    pub fn exception<E: std::error::Error + ?Sized>(error: &E) -> Self {
        ContextValue::Exception(ExceptionValue::capture(error))
    }

    /// Primitive type name used by the `[<type>]` coercion rule
    pub fn type_name(&self) -> &str {
        match self {
            ContextValue::Null => "null",
            ContextValue::Bool(_) => "bool",
            ContextValue::Int(_) => "int",
            ContextValue::Float(_) => "float",
            ContextValue::String(_) => "string",
            ContextValue::Stringable { type_name, .. } => type_name,
            ContextValue::DateTime(_) => "datetime",
            ContextValue::Object { type_name } => type_name,
            ContextValue::List(_) => "array",
            ContextValue::Map(_) => "map",
            ContextValue::Exception(exception) => &exception.type_name,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&LogContext> {
        match self {
            ContextValue::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, ContextValue::Null)
    }
}

/// Strip the module path from a `std::any::type_name` result
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        ContextValue::String(s)
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        ContextValue::String(s.to_string())
    }
}

impl From<i64> for ContextValue {
    fn from(i: i64) -> Self {
        ContextValue::Int(i)
    }
}

impl From<i32> for ContextValue {
    fn from(i: i32) -> Self {
        ContextValue::Int(i as i64)
    }
}

impl From<u32> for ContextValue {
    fn from(i: u32) -> Self {
        ContextValue::Int(i as i64)
    }
}

impl From<u64> for ContextValue {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(i) => ContextValue::Int(i),
            Err(_) => ContextValue::Float(i as f64),
        }
    }
}

impl From<usize> for ContextValue {
    fn from(i: usize) -> Self {
        ContextValue::from(i as u64)
    }
}

impl From<f64> for ContextValue {
    fn from(f: f64) -> Self {
        ContextValue::Float(f)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        ContextValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for ContextValue {
    fn from(dt: DateTime<Utc>) -> Self {
        ContextValue::DateTime(dt.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for ContextValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        ContextValue::DateTime(dt)
    }
}

impl From<LogContext> for ContextValue {
    fn from(map: LogContext) -> Self {
        ContextValue::Map(map)
    }
}

impl From<ExceptionValue> for ContextValue {
    fn from(exception: ExceptionValue) -> Self {
        ContextValue::Exception(exception)
    }
}

impl<T: Into<ContextValue>> From<Vec<T>> for ContextValue {
    fn from(items: Vec<T>) -> Self {
        ContextValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ContextValue>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ContextValue::Null, Into::into)
    }
}

/// Insertion-ordered context fields
///
/// Keys are unique. Inserting an existing key replaces its value in place,
/// except for [`EXCEPTION_KEY`], which never loses a captured error: an equal
/// error merges away and a different one is stored under `exception.N`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    fields: Vec<(String, ContextValue)>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        let key = key.into();
        let value = value.into();

        if key == EXCEPTION_KEY && matches!(value, ContextValue::Exception(_)) {
            self.add_exception_value(value);
            return;
        }

        match self.position(&key) {
            Some(idx) => self.fields[idx].1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Add a field only when the key is not present yet
    pub fn add_if_absent<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        let key = key.into();
        if self.position(&key).is_none() {
            self.fields.push((key, value.into()));
        }
    }

    /// Attach a captured error under the reserved exception key
    pub fn add_exception(&mut self, exception: ExceptionValue) {
        self.add_exception_value(ContextValue::Exception(exception));
    }

    fn add_exception_value(&mut self, value: ContextValue) {
        let Some(existing) = self.get(EXCEPTION_KEY) else {
            self.fields.push((EXCEPTION_KEY.to_string(), value));
            return;
        };

        if !matches!(existing, ContextValue::Exception(_)) {
            // A plain value squatting on the key keeps its slot; the error moves aside.
            self.push_renamed_exception(value);
            return;
        }

        let duplicate = existing == &value
            || self
                .fields
                .iter()
                .any(|(k, v)| k.starts_with("exception.") && v == &value);
        if !duplicate {
            self.push_renamed_exception(value);
        }
    }

    fn push_renamed_exception(&mut self, value: ContextValue) {
        let mut n = 1;
        while self.position(&format!("{}.{}", EXCEPTION_KEY, n)).is_some() {
            n += 1;
        }
        self.fields.push((format!("{}.{}", EXCEPTION_KEY, n), value));
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.position(key).map(|idx| self.fields.remove(idx).1)
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge another context in, keeping fields already present
    pub fn merge_missing(&mut self, other: LogContext) {
        for (key, value) in other.fields {
            if key == EXCEPTION_KEY {
                self.add_field(key, value);
            } else {
                self.add_if_absent(key, value);
            }
        }
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, super::template::resolve_value(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl Serialize for LogContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = LogContext::new();
        for (key, value) in iter {
            context.add_field(key, value);
        }
        context
    }
}
