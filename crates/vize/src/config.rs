//! Configuration file loading for vize.
//!
//! Reads `vize.config.json` from the current working directory.
//! Also provides JSON Schema generation for editor autocompletion.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vize_esquisse::GenerateOptions;
use vize_musea::host::{ControllerConfig, DEFAULT_MAX_LOGS, DEFAULT_RENDER_TIMEOUT};
use vize_musea::messages::WrapperRef;

pub const CONFIG_FILE: &str = "vize.config.json";

/// Top-level vize configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VizeConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preview generation and rendering configuration.
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Configuration for the `preview` command and the iframe controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewConfig {
    /// Generate randomized invocations instead of the deterministic defaults.
    pub random: bool,

    /// Seed for random generation. Entropy-seeded when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Milliseconds before a stuck render resets the iframe.
    pub render_timeout_ms: u64,

    /// Maximum number of console entries kept per preview.
    pub max_logs: usize,

    /// Origin and path prefix of the preview server.
    pub base_url: String,

    /// Component wrapping every preview (providers, themes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<WrapperRef>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            random: false,
            seed: None,
            render_timeout_ms: DEFAULT_RENDER_TIMEOUT.as_millis() as u64,
            max_logs: DEFAULT_MAX_LOGS,
            base_url: String::new(),
            wrapper: None,
        }
    }
}

impl PreviewConfig {
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            field_name: None,
            random: self.random,
            seed: self.seed,
        }
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            base_url: self.base_url.clone(),
            render_timeout: Duration::from_millis(self.render_timeout_ms),
            max_logs: self.max_logs,
        }
    }
}

fn base_dir(dir: Option<&Path>) -> PathBuf {
    dir.map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
}

/// Load `vize.config.json` from the given directory (or CWD if None).
///
/// A missing file yields the defaults; an unreadable or invalid file is
/// reported and also yields the defaults.
pub fn load_config(dir: Option<&Path>) -> VizeConfig {
    let config_path = base_dir(dir).join(CONFIG_FILE);

    if !config_path.exists() {
        return VizeConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
            VizeConfig::default()
        }),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            VizeConfig::default()
        }
    }
}

#[inline]
pub fn parse_config(content: &str) -> Result<VizeConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// JSON Schema for `vize.config.json`.
pub const VIZE_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Vize Configuration",
  "description": "Configuration file for vize - Component preview tooling",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "preview": {
      "type": "object",
      "description": "Preview generation and rendering configuration",
      "properties": {
        "random": {
          "type": "boolean",
          "default": false,
          "description": "Generate randomized invocations instead of the deterministic defaults"
        },
        "seed": {
          "type": "integer",
          "minimum": 0,
          "description": "Seed for random generation. Entropy-seeded when omitted."
        },
        "renderTimeoutMs": {
          "type": "integer",
          "minimum": 0,
          "default": 5000,
          "description": "Milliseconds before a stuck render resets the preview iframe"
        },
        "maxLogs": {
          "type": "integer",
          "minimum": 0,
          "default": 500,
          "description": "Maximum number of console entries kept per preview"
        },
        "baseUrl": {
          "type": "string",
          "description": "Origin and path prefix of the preview server",
          "examples": ["http://localhost:3140"]
        },
        "wrapper": {
          "type": "object",
          "description": "Component wrapping every preview",
          "properties": {
            "module": { "type": "string" },
            "name": { "type": "string" }
          },
          "required": ["module", "name"],
          "additionalProperties": false
        }
      },
      "additionalProperties": false
    }
  },
  "additionalProperties": false
}"#;

/// Write the JSON Schema to `node_modules/.vize/vize.config.schema.json`.
pub fn write_schema(dir: Option<&Path>) -> Result<PathBuf, CliError> {
    let schema_dir = base_dir(dir).join("node_modules/.vize");
    let schema_path = schema_dir.join("vize.config.schema.json");
    std::fs::create_dir_all(&schema_dir)
        .and_then(|()| std::fs::write(&schema_path, VIZE_CONFIG_SCHEMA))
        .map_err(|source| CliError::Write {
            path: schema_path.clone(),
            source,
        })?;
    Ok(schema_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_section_missing() {
        let config = parse_config(r#"{ "$schema": "./node_modules/.vize/vize.config.schema.json" }"#)
            .unwrap();
        assert_eq!(config.preview, PreviewConfig::default());
        assert_eq!(config.preview.render_timeout_ms, 5000);
        assert_eq!(config.preview.max_logs, 500);
    }

    #[test]
    fn test_preview_section() {
        let config = parse_config(
            r#"{
              "preview": {
                "random": true,
                "seed": 7,
                "renderTimeoutMs": 2000,
                "baseUrl": "http://localhost:3140/",
                "wrapper": { "module": "/src/Providers.tsx", "name": "Providers" }
              }
            }"#,
        )
        .unwrap();

        let options = config.preview.generate_options();
        assert!(options.random);
        assert_eq!(options.seed, Some(7));

        let controller = config.preview.controller_config();
        assert_eq!(controller.render_timeout, Duration::from_millis(2000));
        assert_eq!(controller.max_logs, 500);
        assert_eq!(controller.base_url, "http://localhost:3140/");
        assert_eq!(
            config.preview.wrapper.map(|wrapper| wrapper.name),
            Some("Providers".to_string())
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected_by_schema_only() {
        // serde ignores unknown keys; the schema is what flags them in editors.
        assert!(parse_config(r#"{ "preview": { "colour": "red" } }"#).is_ok());
        let schema: serde_json::Value = serde_json::from_str(VIZE_CONFIG_SCHEMA).unwrap();
        assert_eq!(schema["properties"]["preview"]["additionalProperties"], false);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = std::env::temp_dir().join("vize-config-missing");
        let config = load_config(Some(&dir));
        assert_eq!(config.preview, PreviewConfig::default());
    }
}
