use crate::domain::Number;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Boolean(bool),
    Number(Number),
    Text(String),
    Other(serde_json::Value),
}

/// Parameters of an EXECUTE command, keyed by their protocol name (`on`, `brightness`, ...).
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, ParamValue>);

impl Params {
    pub fn bool(&self, name: &'static str) -> Result<bool, ParamError> {
        match self.0.get(name) {
            Some(ParamValue::Boolean(value)) => Ok(*value),
            Some(_) => Err(ParamError::InvalidType { name, expected: "boolean" }),
            None => Err(ParamError::Missing { name }),
        }
    }

    pub fn number(&self, name: &'static str) -> Result<Number, ParamError> {
        self.optional_number(name)?.ok_or(ParamError::Missing { name })
    }

    pub fn optional_number(&self, name: &'static str) -> Result<Option<Number>, ParamError> {
        match self.0.get(name) {
            Some(ParamValue::Number(value)) => Ok(Some(*value)),
            Some(_) => Err(ParamError::InvalidType { name, expected: "number" }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
impl Params {
    pub fn new() -> Self {
        Params(HashMap::new())
    }

    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ParamError {
    #[error("missing parameter '{name}'")]
    Missing { name: &'static str },
    #[error("parameter '{name}' must be a {expected}")]
    InvalidType { name: &'static str, expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_mixed_parameter_types() {
        let json = r#"{ "on": true, "brightness": 40, "mode": "heat" }"#;

        let params = serde_json::from_str::<Params>(json).unwrap();

        assert_eq!(params.bool("on"), Ok(true));
        assert_eq!(params.number("brightness"), Ok(Number::PositiveInt(40)));
        assert_eq!(params.get("mode"), Some(&ParamValue::Text("heat".to_string())));
    }

    #[test]
    fn keeps_parameters_of_any_other_shape() {
        let json = r#"{ "color": { "spectrumRGB": 16711680 }, "scenes": [], "extra": null }"#;

        let params = serde_json::from_str::<Params>(json).unwrap();

        assert_eq!(params.get("color"), Some(&ParamValue::Other(serde_json::json!({ "spectrumRGB": 16711680 }))));
        assert_eq!(params.get("extra"), Some(&ParamValue::Other(serde_json::Value::Null)));
        assert_eq!(params.optional_number("color"), Err(ParamError::InvalidType { name: "color", expected: "number" }));
    }

    #[test]
    fn reports_missing_parameters() {
        let params = Params::new();

        assert_eq!(params.bool("on"), Err(ParamError::Missing { name: "on" }));
        assert_eq!(params.optional_number("openPercent"), Ok(None));
    }

    #[test]
    fn reports_parameters_of_the_wrong_type() {
        let params = Params::new().with("on", ParamValue::Text("yes".to_string()));

        assert_eq!(params.bool("on"), Err(ParamError::InvalidType { name: "on", expected: "boolean" }));
    }
}
