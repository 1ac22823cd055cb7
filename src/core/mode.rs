//! Purpose: Carry the build mode (`NODE_ENV`/`TARO_ENV`) as an explicit value.
//! Exports: `ModeConfig`.
//! Role: Snapshot caller-supplied mode once, then thread it through dispatch.
//! Invariants: Normalization never writes process environment variables.
//! Invariants: A caller-supplied `node_env` is never overridden by defaults.

use serde::{Deserialize, Serialize};

pub const NODE_ENV: &str = "NODE_ENV";
pub const TARO_ENV: &str = "TARO_ENV";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    pub node_env: Option<String>,
    pub taro_env: Option<String>,
}

impl ModeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            node_env: read(NODE_ENV),
            taro_env: read(TARO_ENV),
        }
    }

    pub fn with_node_env(mut self, value: impl Into<String>) -> Self {
        self.node_env = Some(value.into());
        self
    }

    pub fn default_node_env(&mut self, value: &str) {
        if self.node_env.is_none() {
            self.node_env = Some(value.to_string());
        }
    }

    pub fn set_taro_env(&mut self, platform: &str) {
        self.taro_env = Some(platform.to_string());
    }

    /// Variables to export into a kernel process.
    pub fn env_vars(&self) -> Vec<(&'static str, &str)> {
        let mut vars = Vec::new();
        if let Some(node_env) = &self.node_env {
            vars.push((NODE_ENV, node_env.as_str()));
        }
        if let Some(taro_env) = &self.taro_env {
            vars.push((TARO_ENV, taro_env.as_str()));
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::ModeConfig;

    #[test]
    fn empty_values_count_as_unset() {
        let mode = ModeConfig::from_lookup(|key| match key {
            "NODE_ENV" => Some(String::new()),
            "TARO_ENV" => Some("h5".to_string()),
            _ => None,
        });
        assert_eq!(mode.node_env, None);
        assert_eq!(mode.taro_env.as_deref(), Some("h5"));
    }

    #[test]
    fn default_node_env_keeps_caller_value() {
        let mut mode = ModeConfig::default().with_node_env("development");
        mode.default_node_env("production");
        mode.default_node_env("production");
        assert_eq!(mode.node_env.as_deref(), Some("development"));
    }

    #[test]
    fn default_node_env_fills_missing_value_once() {
        let mut mode = ModeConfig::default();
        mode.default_node_env("production");
        mode.default_node_env("test");
        assert_eq!(mode.node_env.as_deref(), Some("production"));
    }

    #[test]
    fn env_vars_skip_unset_entries() {
        let mut mode = ModeConfig::default();
        assert!(mode.env_vars().is_empty());
        mode.set_taro_env("weapp");
        assert_eq!(mode.env_vars(), vec![("TARO_ENV", "weapp")]);
    }
}
