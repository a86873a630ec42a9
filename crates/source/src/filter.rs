use gauge_config::FilterConfig;
use serde_json::Value;

/// Turns a fetched JSON document into a number, or `None` when the document
/// doesn't contain one.
pub trait Extract: Send + Sync {
    fn extract(&self, body: &Value) -> Option<f64>;
}

impl<F> Extract for F
where
    F: Fn(&Value) -> Option<f64> + Send + Sync,
{
    fn extract(&self, body: &Value) -> Option<f64> {
        self(body)
    }
}

/// Extraction rules expressible in the config file.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// The number at a JSON Pointer.  Numeric strings are parsed.
    Value { pointer: String },
    /// Number of matching elements in the array at a JSON Pointer.
    Count {
        pointer: String,
        field:   Option<String>,
        any_of:  Vec<String>,
    },
}

impl From<&FilterConfig> for Filter {
    fn from(cfg: &FilterConfig) -> Self {
        match cfg {
            FilterConfig::Value { pointer } => Self::Value {
                pointer: normalize_pointer(pointer),
            },
            FilterConfig::Count { pointer, field, any_of } => Self::Count {
                pointer: normalize_pointer(pointer),
                field:   field.clone(),
                any_of:  any_of.clone(),
            },
        }
    }
}

impl Extract for Filter {
    fn extract(&self, body: &Value) -> Option<f64> {
        match self {
            Self::Value { pointer } => as_number(body.pointer(pointer)?),
            Self::Count { pointer, field, any_of } => {
                let items = body.pointer(pointer)?.as_array()?;
                let count = items
                    .iter()
                    .filter(|item| matches(item, field.as_deref(), any_of))
                    .count();
                Some(count as f64)
            }
        }
    }
}

/// `obs/0/x` and `/obs/0/x` both address the same node; `""` is the root.
fn normalize_pointer(pointer: &str) -> String {
    if pointer.is_empty() || pointer.starts_with('/') {
        pointer.to_string()
    } else {
        format!("/{pointer}")
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn matches(item: &Value, field: Option<&str>, any_of: &[String]) -> bool {
    let Some(field) = field else {
        return true;
    };
    let Some(value) = item.get(field) else {
        return false;
    };
    if any_of.is_empty() {
        is_truthy(value)
    } else {
        value.as_str().is_some_and(|s| any_of.iter().any(|want| want == s))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
