//! Application-level datagrid settings.
//!
//! ```yaml
//! default_template: "datagrid/default.html"
//! default_form_theme: "datagrid/form_theme.html"
//! configurations:
//!   news:
//!     query_handler: { ... }
//!     columns: { title: ~, published_at: { label: "Published" } }
//! ```

use datagrid_core::{DataGridError, DataGridResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::DataGridRegistry;

/// Code reported by configuration errors raised while loading settings.
const SETTINGS_CODE: &str = "datagrid";

/// Datagrid section of the application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataGridSettings {
	/// Template used by configurations that do not set one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_template: Option<String>,

	/// Form theme used by configurations that do not set one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_form_theme: Option<String>,

	/// Raw datagrid configurations, by code.
	#[serde(default)]
	pub configurations: IndexMap<String, Value>,
}

impl DataGridSettings {
	/// Parses settings from YAML.
	pub fn from_yaml_str(source: &str) -> DataGridResult<Self> {
		serde_yaml::from_str(source)
			.map_err(|e| DataGridError::configuration(SETTINGS_CODE, e.to_string()))
	}

	/// Parses settings from JSON.
	pub fn from_json_str(source: &str) -> DataGridResult<Self> {
		serde_json::from_str(source)
			.map_err(|e| DataGridError::configuration(SETTINGS_CODE, e.to_string()))
	}

	/// Reads settings from an already parsed value.
	pub fn from_value(value: Value) -> DataGridResult<Self> {
		serde_json::from_value(value)
			.map_err(|e| DataGridError::configuration(SETTINGS_CODE, e.to_string()))
	}

	/// Registers every configuration as pending in `registry`, in order.
	///
	/// Configurations without a template or form theme receive the defaults.
	pub fn register(&self, registry: &DataGridRegistry) {
		for (code, configuration) in &self.configurations {
			registry.add_raw_data_grid_configuration(code.as_str(), self.with_defaults(configuration));
		}
	}

	fn with_defaults(&self, configuration: &Value) -> Value {
		let mut configuration = configuration.clone();
		let Some(entries) = configuration.as_object_mut() else {
			return configuration;
		};

		if let Some(template) = &self.default_template
			&& !entries.contains_key("template")
		{
			entries.insert("template".to_string(), Value::String(template.clone()));
		}
		if let Some(form_theme) = &self.default_form_theme
			&& !entries.contains_key("formTheme")
			&& !entries.contains_key("form_theme")
		{
			entries.insert("formTheme".to_string(), Value::String(form_theme.clone()));
		}
		configuration
	}
}
