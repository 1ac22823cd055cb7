//! Purpose: Define the dispatch envelope handed from the CLI to a kernel.
//! Exports: `Envelope`, `DispatchOptions`, `OptionValue`, `Options`.
//! Role: Single wire contract between argument normalization and kernels.
//! Invariants: Unset option values are `None` but their keys stay present.
//! Invariants: JSON shape is `{name, opts: {_, options, isHelp}, mode}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::mode::ModeConfig;

pub type Options = BTreeMap<String, Option<OptionValue>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(u64),
    Text(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<u16> for OptionValue {
    fn from(value: u16) -> Self {
        OptionValue::Number(u64::from(value))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOptions {
    #[serde(rename = "_")]
    pub args: Vec<String>,
    pub options: Options,
    #[serde(rename = "isHelp")]
    pub is_help: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub name: String,
    pub opts: DispatchOptions,
    #[serde(default)]
    pub mode: ModeConfig,
}

impl Envelope {
    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.opts.options.get(key).and_then(Option::as_ref)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.option(key)
            .and_then(OptionValue::as_bool)
            .unwrap_or(false)
    }
}
