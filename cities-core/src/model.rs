use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Login credentials. A missing value is sent as JSON `null` and left for the
/// server to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: Some(email.into()), password: Some(password.into()) }
    }
}

/// Token issued by the login endpoint, valid for one run.
///
/// Whatever the server put in `token` is forwarded as text; only an absent,
/// `null` or empty token counts as not present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionToken {
    header: String,
    present: bool,
}

impl SessionToken {
    pub fn new(token: Option<String>) -> Self {
        match token {
            Some(header) => Self { present: !header.is_empty(), header },
            None => Self::default(),
        }
    }

    pub(crate) fn from_json(token: Option<Value>) -> Self {
        match token {
            None => Self::default(),
            Some(Value::Null) => Self { header: "null".to_string(), present: false },
            Some(value) => Self::new(Some(scalar_text(&value))),
        }
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Value for the `x-access-token` header; empty when the server sent none.
    pub fn header_value(&self) -> &str {
        &self.header
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct City {
    /// Missing or `null` names render as an empty cell; numbers and other
    /// values are shown as their JSON text.
    #[serde(rename = "nome", default, deserialize_with = "lenient_text")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    /// `None` only when the field is absent; an explicit `null` is kept.
    #[serde(default, deserialize_with = "explicit_value")]
    pub token: Option<Value>,
}

fn explicit_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        other => scalar_text(&other),
    })
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
