//! Column value and label rendering

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use serde_json::Value;

use crate::column::Column;
use crate::config::OptionsMap;
use crate::error::{DataGridError, DataGridResult};

/// Renders a cell value.
pub trait ColumnValueRenderer: Send + Sync {
	/// Renders `value` using the column's formatting options.
	fn render_value(&self, value: &Value, options: &OptionsMap) -> String;
}

/// Renders a column header.
pub trait ColumnLabelRenderer: Send + Sync {
	/// Renders the header label of `column`.
	fn render_label(&self, column: &Column) -> String;
}

/// Plain-text value renderer.
///
/// Formatting options:
/// - `decimals`: fixed number of decimals for numbers
/// - `separator`: glue between array elements (default `", "`)
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultColumnValueRenderer;

impl ColumnValueRenderer for DefaultColumnValueRenderer {
	fn render_value(&self, value: &Value, options: &OptionsMap) -> String {
		match value {
			Value::Null => String::new(),
			Value::Bool(true) => "Yes".to_string(),
			Value::Bool(false) => "No".to_string(),
			Value::String(text) => text.clone(),
			Value::Number(number) => {
				let decimals = options.get("decimals").and_then(decimals_option);
				match (decimals, number.as_f64()) {
					(Some(decimals), Some(n)) => format!("{:.*}", usize::from(decimals), n),
					_ => number.to_string(),
				}
			}
			Value::Array(items) => {
				let separator = options
					.get("separator")
					.and_then(Value::as_str)
					.unwrap_or(", ");
				items
					.iter()
					.map(|item| self.render_value(item, options))
					.collect::<Vec<_>>()
					.join(separator)
			}
			Value::Object(_) => value.to_string(),
		}
	}
}

/// Reads a `decimals` option; format precision is limited to `u16`.
pub(crate) fn decimals_option(value: &Value) -> Option<u16> {
	value.as_u64().and_then(|decimals| u16::try_from(decimals).ok())
}

/// Label renderer using the configured label or a humanized column key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultColumnLabelRenderer;

impl ColumnLabelRenderer for DefaultColumnLabelRenderer {
	fn render_label(&self, column: &Column) -> String {
		match column.label() {
			Some(label) => label.to_string(),
			None => humanize(column.key()),
		}
	}
}

/// `created_at` -> `Created at`
fn humanize(key: &str) -> String {
	let spaced = key.replace(['_', '.'], " ");
	let mut chars = spaced.trim().chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Default renderers plus named alternatives selectable from configuration.
#[derive(Clone)]
pub struct Renderers {
	value: Arc<dyn ColumnValueRenderer>,
	label: Arc<dyn ColumnLabelRenderer>,
	value_renderers: HashMap<String, Arc<dyn ColumnValueRenderer>>,
	label_renderers: HashMap<String, Arc<dyn ColumnLabelRenderer>>,
}

impl Default for Renderers {
	fn default() -> Self {
		Self::new(
			Arc::new(DefaultColumnValueRenderer),
			Arc::new(DefaultColumnLabelRenderer),
		)
	}
}

impl Debug for Renderers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut value_names: Vec<_> = self.value_renderers.keys().collect();
		value_names.sort();
		let mut label_names: Vec<_> = self.label_renderers.keys().collect();
		label_names.sort();
		f.debug_struct("Renderers")
			.field("value_renderers", &value_names)
			.field("label_renderers", &label_names)
			.finish_non_exhaustive()
	}
}

impl Renderers {
	/// Creates a set with the given default renderers.
	pub fn new(value: Arc<dyn ColumnValueRenderer>, label: Arc<dyn ColumnLabelRenderer>) -> Self {
		Self {
			value,
			label,
			value_renderers: HashMap::new(),
			label_renderers: HashMap::new(),
		}
	}

	/// Registers a named value renderer.
	pub fn with_value_renderer(
		mut self,
		name: impl Into<String>,
		renderer: Arc<dyn ColumnValueRenderer>,
	) -> Self {
		self.value_renderers.insert(name.into(), renderer);
		self
	}

	/// Registers a named label renderer.
	pub fn with_label_renderer(
		mut self,
		name: impl Into<String>,
		renderer: Arc<dyn ColumnLabelRenderer>,
	) -> Self {
		self.label_renderers.insert(name.into(), renderer);
		self
	}

	/// Returns the named value renderer, or the default one for `None`.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::Configuration`] for `code` if no renderer has
	/// that name.
	pub fn value_renderer(
		&self,
		code: &str,
		name: Option<&str>,
	) -> DataGridResult<Arc<dyn ColumnValueRenderer>> {
		match name {
			None => Ok(Arc::clone(&self.value)),
			Some(name) => self.value_renderers.get(name).cloned().ok_or_else(|| {
				DataGridError::configuration(code, format!("unknown column value renderer '{name}'"))
			}),
		}
	}

	/// Returns the named label renderer, or the default one for `None`.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::Configuration`] for `code` if no renderer has
	/// that name.
	pub fn label_renderer(
		&self,
		code: &str,
		name: Option<&str>,
	) -> DataGridResult<Arc<dyn ColumnLabelRenderer>> {
		match name {
			None => Ok(Arc::clone(&self.label)),
			Some(name) => self.label_renderers.get(name).cloned().ok_or_else(|| {
				DataGridError::configuration(code, format!("unknown column label renderer '{name}'"))
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	struct UppercaseRenderer;

	impl ColumnValueRenderer for UppercaseRenderer {
		fn render_value(&self, value: &Value, _options: &OptionsMap) -> String {
			value.as_str().unwrap_or_default().to_uppercase()
		}
	}

	#[rstest]
	#[case(json!(null), json!({}), "")]
	#[case(json!("plain"), json!({}), "plain")]
	#[case(json!(true), json!({}), "Yes")]
	#[case(json!(false), json!({}), "No")]
	#[case(json!(42), json!({}), "42")]
	#[case(json!(3.14159), json!({ "decimals": 2 }), "3.14")]
	#[case(json!(1.5), json!({ "decimals": 70000 }), "1.5")]
	#[case(json!(1.5), json!({ "decimals": -1 }), "1.5")]
	#[case(json!(["a", 1, true]), json!({}), "a, 1, Yes")]
	#[case(json!(["a", "b"]), json!({ "separator": " / " }), "a / b")]
	#[case(json!({ "k": "v" }), json!({}), "{\"k\":\"v\"}")]
	fn test_default_value_rendering(
		#[case] value: Value,
		#[case] options: Value,
		#[case] expected: &str,
	) {
		let options = options.as_object().cloned().unwrap_or_default();
		assert_eq!(
			DefaultColumnValueRenderer.render_value(&value, &options),
			expected
		);
	}

	#[rstest]
	#[case("created_at", "Created at")]
	#[case("author.name", "Author name")]
	#[case("id", "Id")]
	#[case("", "")]
	fn test_humanize(#[case] key: &str, #[case] expected: &str) {
		assert_eq!(humanize(key), expected);
	}

	#[rstest]
	fn test_named_renderer_lookup() {
		let renderers =
			Renderers::default().with_value_renderer("upper", Arc::new(UppercaseRenderer));

		let upper = renderers.value_renderer("grid", Some("upper")).unwrap();
		assert_eq!(upper.render_value(&json!("abc"), &OptionsMap::new()), "ABC");

		let fallback = renderers.value_renderer("grid", None).unwrap();
		assert_eq!(fallback.render_value(&json!(true), &OptionsMap::new()), "Yes");

		assert!(matches!(
			renderers.label_renderer("grid", Some("fancy")),
			Err(DataGridError::Configuration { .. })
		));
	}
}
