//! Option rows offered by a searchable select.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Value carried by the "no selection" placeholder row.
pub const PLACEHOLDER_VALUE: &str = "";

/// One selectable row as rendered by the hosting page.
///
/// Field names follow the `data-*` attributes of the markup (`data-value`,
/// `data-name`, `data-category-name`, ...). Catalog files use the same keys,
/// with `category_name` accepted alongside `categoryName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OptionRecord {
    /// Unique value written into the hidden field on selection.
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub number: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    /// Category identifier compared against the category filter.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub category: Option<String>,
    #[serde(default, alias = "categoryName")]
    pub category_name: Option<String>,
    /// Available quantity hint copied onto the quantity field.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub available: Option<String>,
    /// Row text used when no `name` is present.
    #[serde(default)]
    pub text: Option<String>,
}

impl OptionRecord {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Builds the placeholder row shown before anything is chosen.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            value: PLACEHOLDER_VALUE.to_string(),
            text: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_category(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.category = Some(id.into());
        self.category_name = Some(name.into());
        self
    }

    pub fn with_available(mut self, available: impl Into<String>) -> Self {
        self.available = Some(available.into());
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.value == PLACEHOLDER_VALUE
    }

    /// Label shown in the input once the row is selected.
    pub fn display_name(&self) -> &str {
        fn non_empty(label: &Option<String>) -> Option<&str> {
            label.as_deref().filter(|label| !label.is_empty())
        }
        non_empty(&self.name).or(non_empty(&self.text)).unwrap_or_default()
    }

    /// Non-empty available quantity, if the row carries one.
    pub fn available_hint(&self) -> Option<&str> {
        self.available.as_deref().filter(|available| !available.is_empty())
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}
