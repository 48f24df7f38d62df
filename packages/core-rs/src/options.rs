use crate::dtype::DType;
use crate::error::TransformError;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Extracts the scalar from a sequence element. Receives the element and its index.
pub type Accessor = Arc<dyn Fn(&Value, usize) -> f64 + Send + Sync>;

pub const DEFAULT_SEP: &str = ".";

/// Per-call configuration of [`transform`](crate::transform).
#[derive(Clone)]
pub struct Options {
    accessor: Option<Accessor>,
    dtype: Option<DType>,
    copy: bool,
    path: Option<String>,
    sep: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            accessor: None,
            dtype: None,
            copy: true,
            path: None,
            sep: DEFAULT_SEP.to_string(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("accessor", &self.accessor.as_ref().map(|_| "<fn>"))
            .field("dtype", &self.dtype)
            .field("copy", &self.copy)
            .field("path", &self.path)
            .field("sep", &self.sep)
            .finish()
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&Value, usize) -> f64 + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    pub fn dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(dtype);
        self
    }

    /// Sets the output dtype by name, rejecting names that are not recognized.
    pub fn dtype_name(self, name: &str) -> Result<Self, TransformError> {
        Ok(self.dtype(name.parse()?))
    }

    pub fn copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    pub fn get_accessor(&self) -> Option<&Accessor> {
        self.accessor.as_ref()
    }

    pub fn get_dtype(&self) -> Option<DType> {
        self.dtype
    }

    pub fn get_copy(&self) -> bool {
        self.copy
    }

    pub fn get_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn get_sep(&self) -> &str {
        &self.sep
    }
}

fn json_type_name(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".into(),
        serde_json::Value::Bool(flag) => format!("boolean `{flag}`"),
        serde_json::Value::Number(number) => format!("number `{number}`"),
        serde_json::Value::String(text) => format!("string `{text}`"),
        serde_json::Value::Array(_) => "array".into(),
        serde_json::Value::Object(_) => "object".into(),
    }
}

fn expect_str<'a>(
    value: &'a serde_json::Value,
    key: &'static str,
) -> Result<&'a str, TransformError> {
    value.as_str().ok_or_else(|| TransformError::InvalidOptionType {
        key,
        expected: "string",
        found: json_type_name(value),
    })
}

/// Validates a loosely typed options bag and builds [`Options`] from it.
///
/// A JSON value can never be callable, so any `accessor` key is rejected;
/// accessors are attached with [`Options::accessor`]. Unknown keys are ignored.
pub fn validate_options(raw: &serde_json::Value) -> Result<Options, TransformError> {
    let map = raw.as_object().ok_or_else(|| TransformError::InvalidOptions {
        found: json_type_name(raw),
    })?;
    let mut options = Options::new();

    if let Some(accessor) = map.get("accessor") {
        return Err(TransformError::InvalidAccessor {
            found: json_type_name(accessor),
        });
    }
    if let Some(dtype) = map.get("dtype") {
        options = options.dtype_name(expect_str(dtype, "dtype")?)?;
    }
    if let Some(copy) = map.get("copy") {
        let copy = copy.as_bool().ok_or_else(|| TransformError::InvalidOptionType {
            key: "copy",
            expected: "boolean",
            found: json_type_name(copy),
        })?;
        options = options.copy(copy);
    }
    if let Some(path) = map.get("path") {
        options = options.path(expect_str(path, "path")?);
    }
    if let Some(sep) = map.get("sep") {
        options = options.sep(expect_str(sep, "sep")?);
    }
    Ok(options)
}

impl TryFrom<&serde_json::Value> for Options {
    type Error = TransformError;

    fn try_from(raw: &serde_json::Value) -> Result<Self, Self::Error> {
        validate_options(raw)
    }
}
