//! Typed configuration records for datagrids and columns.
//!
//! Raw configuration arrives as a JSON-like record (usually parsed from the
//! host's YAML settings). It is validated into [`DataGridOptions`] once, at
//! construction time. Unknown keys are rejected instead of being silently
//! ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DataGridError, DataGridResult};

/// Free-form, insertion-ordered options record.
pub type OptionsMap = serde_json::Map<String, Value>;

/// Settable attributes of a [`DataGrid`](crate::DataGrid).
///
/// Keys use the camelCase spelling of the configuration files
/// (`templateVars`, `submitButton`, ...); the snake_case spelling is accepted
/// as an alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DataGridOptions {
	/// Column key to column configuration, in display order.
	#[serde(deserialize_with = "null_as_default_entries")]
	pub columns: IndexMap<String, ColumnConfig>,

	/// Template used to render the grid.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub template: Option<String>,

	/// Extra variables passed to the template.
	#[serde(default, alias = "template_vars")]
	pub template_vars: OptionsMap,

	/// Options used by the host when creating the filter form builder.
	#[serde(default, alias = "form_options")]
	pub form_options: OptionsMap,

	/// Action name to control options, in display order.
	#[serde(default, deserialize_with = "null_as_default_entries")]
	pub actions: IndexMap<String, OptionsMap>,

	/// Overrides for the filter submit button.
	#[serde(default, alias = "submit_button")]
	pub submit_button: OptionsMap,

	/// Overrides for the filter reset button.
	#[serde(default, alias = "reset_button")]
	pub reset_button: OptionsMap,

	/// Form theme applied when rendering the filter form.
	#[serde(default, alias = "form_theme", skip_serializing_if = "Option::is_none")]
	pub form_theme: Option<String>,

	/// Name of the column value renderer to use instead of the default one.
	#[serde(
		default,
		alias = "column_value_renderer",
		skip_serializing_if = "Option::is_none"
	)]
	pub column_value_renderer: Option<String>,

	/// Name of the column label renderer to use instead of the default one.
	#[serde(
		default,
		alias = "column_label_renderer",
		skip_serializing_if = "Option::is_none"
	)]
	pub column_label_renderer: Option<String>,
}

impl DataGridOptions {
	/// Validates a raw configuration record for the data-grid `code`.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::Configuration`] when the record is not a
	/// mapping, lacks `columns`, has an unknown key, or has a value of the
	/// wrong shape.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_core::DataGridOptions;
	/// use serde_json::json;
	///
	/// let options = DataGridOptions::from_value(
	///     "news",
	///     json!({ "columns": { "title": null }, "templateVars": { "compact": true } }),
	/// )
	/// .unwrap();
	/// assert_eq!(options.columns.len(), 1);
	/// assert_eq!(options.template_vars["compact"], json!(true));
	///
	/// let error = DataGridOptions::from_value("news", json!({ "columns": {}, "colour": "red" }));
	/// assert!(error.is_err());
	/// ```
	pub fn from_value(code: &str, value: Value) -> DataGridResult<Self> {
		if !value.is_object() {
			return Err(DataGridError::configuration(
				code,
				"configuration must be a mapping",
			));
		}
		serde_json::from_value(value).map_err(|e| DataGridError::configuration(code, e.to_string()))
	}
}

/// Configuration record of a single column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ColumnConfig {
	/// Template used to render cells of this column.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub template: Option<String>,

	/// Header label; a humanized key is used when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,

	/// Dot-separated path of the value inside a row; defaults to the column key.
	#[serde(default, alias = "property_path", skip_serializing_if = "Option::is_none")]
	pub property_path: Option<String>,

	/// Options handed to the value renderer.
	#[serde(default, alias = "formatting_options")]
	pub formatting_options: OptionsMap,

	/// Name of a value renderer overriding the grid's one.
	#[serde(default, alias = "value_renderer", skip_serializing_if = "Option::is_none")]
	pub value_renderer: Option<String>,

	/// Name of a label renderer overriding the grid's one.
	#[serde(default, alias = "label_renderer", skip_serializing_if = "Option::is_none")]
	pub label_renderer: Option<String>,
}

/// Deserializes a map whose values may be null (`title: ~` in YAML).
fn null_as_default_entries<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	let entries = Option::<IndexMap<String, Option<T>>>::deserialize(deserializer)?;
	Ok(entries
		.unwrap_or_default()
		.into_iter()
		.map(|(key, value)| (key, value.unwrap_or_default()))
		.collect())
}
