use super::domain::Salary;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One listing as delivered by the upstream API.
///
/// Every field is optional and parsed leniently: a field with an unexpected
/// shape becomes `None` instead of rejecting the whole item.
#[derive(Debug, Default, Deserialize)]
pub struct RawVacancy {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub alternate_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub salary: Option<RawSalary>,
    #[serde(default, deserialize_with = "lenient")]
    pub snippet: Option<RawSnippet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSalary {
    #[serde(default)]
    pub from: Option<Salary>,
    #[serde(default)]
    pub to: Option<Salary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSnippet {
    #[serde(default, deserialize_with = "lenient")]
    pub requirement: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub responsibility: Option<String>,
}

impl RawVacancy {
    /// Returns `None` when the item is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }
}

pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
