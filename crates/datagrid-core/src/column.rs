//! Datagrid columns
//!
//! A column describes how one cell of each row is extracted and rendered,
//! and how its header is labelled. Columns belong to a single datagrid and
//! keep its code as a back-reference.

use std::fmt::{self, Debug};
use std::sync::Arc;

use serde_json::Value;

use crate::config::{ColumnConfig, OptionsMap};
use crate::datagrid::DataGrid;
use crate::error::{DataGridError, DataGridResult};
use crate::render::{ColumnLabelRenderer, ColumnValueRenderer, Renderers, decimals_option};

/// A named, ordered cell descriptor of a datagrid.
///
/// # Example
///
/// ```rust,ignore
/// use datagrid_core::{Column, ColumnConfig};
///
/// let column = Column::new("title", &grid, ColumnConfig::default())?;
/// grid.add_column(column, Some(0));
/// ```
#[derive(Clone)]
pub struct Column {
	key: String,
	data_grid: String,
	config: ColumnConfig,
	value_renderer: Arc<dyn ColumnValueRenderer>,
	label_renderer: Arc<dyn ColumnLabelRenderer>,
}

impl Column {
	/// Creates a column bound to `data_grid`.
	///
	/// Renderers named in `config` are looked up in the grid's renderer set;
	/// otherwise the grid's own renderers are used.
	///
	/// # Errors
	///
	/// Returns a configuration error if a renderer name is unknown.
	pub fn new(
		key: impl Into<String>,
		data_grid: &DataGrid,
		config: ColumnConfig,
	) -> DataGridResult<Self> {
		Self::bind(
			key.into(),
			data_grid.code(),
			config,
			data_grid.renderers(),
			data_grid.column_value_renderer(),
			data_grid.column_label_renderer(),
		)
	}

	pub(crate) fn bind(
		key: String,
		code: &str,
		config: ColumnConfig,
		renderers: &Renderers,
		grid_value_renderer: &Arc<dyn ColumnValueRenderer>,
		grid_label_renderer: &Arc<dyn ColumnLabelRenderer>,
	) -> DataGridResult<Self> {
		if let Some(decimals) = config.formatting_options.get("decimals")
			&& decimals_option(decimals).is_none()
		{
			return Err(DataGridError::configuration(
				code,
				format!(
					"column '{key}': `decimals` must be an integer between 0 and {}, got {decimals}",
					u16::MAX
				),
			));
		}

		let value_renderer = match config.value_renderer.as_deref() {
			Some(name) => renderers.value_renderer(code, Some(name))?,
			None => Arc::clone(grid_value_renderer),
		};
		let label_renderer = match config.label_renderer.as_deref() {
			Some(name) => renderers.label_renderer(code, Some(name))?,
			None => Arc::clone(grid_label_renderer),
		};
		Ok(Self {
			key,
			data_grid: code.to_string(),
			config,
			value_renderer,
			label_renderer,
		})
	}

	/// Column key, unique within its datagrid by convention.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Code of the datagrid owning this column.
	pub fn data_grid_code(&self) -> &str {
		&self.data_grid
	}

	/// Raw configuration of the column.
	pub fn config(&self) -> &ColumnConfig {
		&self.config
	}

	/// Configured header label.
	pub fn label(&self) -> Option<&str> {
		self.config.label.as_deref()
	}

	/// Configured cell template.
	pub fn template(&self) -> Option<&str> {
		self.config.template.as_deref()
	}

	/// Path of the value inside a row; the key when not configured.
	pub fn property_path(&self) -> &str {
		self.config.property_path.as_deref().unwrap_or(&self.key)
	}

	/// Options handed to the value renderer.
	pub fn formatting_options(&self) -> &OptionsMap {
		&self.config.formatting_options
	}

	/// Extracts this column's value from a row.
	///
	/// Path segments index objects by key and arrays by position.
	pub fn value_of<'a>(&self, row: &'a Value) -> Option<&'a Value> {
		self.property_path()
			.split('.')
			.try_fold(row, |current, segment| match current {
				Value::Object(entries) => entries.get(segment),
				Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
				_ => None,
			})
	}

	/// Renders the cell of this column for `row`.
	pub fn render_value(&self, row: &Value) -> String {
		let value = self.value_of(row).unwrap_or(&Value::Null);
		self.value_renderer
			.render_value(value, self.formatting_options())
	}

	/// Renders the header of this column.
	pub fn render_label(&self) -> String {
		self.label_renderer.render_label(self)
	}
}

impl Debug for Column {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Column")
			.field("key", &self.key)
			.field("data_grid", &self.data_grid)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::{DefaultColumnLabelRenderer, DefaultColumnValueRenderer};
	use rstest::rstest;
	use serde_json::json;

	fn column(key: &str, config: ColumnConfig) -> Column {
		let value: Arc<dyn ColumnValueRenderer> = Arc::new(DefaultColumnValueRenderer);
		let label: Arc<dyn ColumnLabelRenderer> = Arc::new(DefaultColumnLabelRenderer);
		Column::bind(
			key.to_string(),
			"users",
			config,
			&Renderers::default(),
			&value,
			&label,
		)
		.unwrap()
	}

	#[rstest]
	fn test_property_path_defaults_to_key() {
		let column = column("email", ColumnConfig::default());
		assert_eq!(column.property_path(), "email");
		assert_eq!(column.data_grid_code(), "users");
	}

	#[rstest]
	#[case("name", json!("Alice"))]
	#[case("author.name", json!("Bob"))]
	#[case("tags.1", json!("rust"))]
	fn test_value_extraction(#[case] path: &str, #[case] expected: Value) {
		let row = json!({
			"name": "Alice",
			"author": { "name": "Bob" },
			"tags": ["web", "rust"],
		});
		let column = column(
			"cell",
			ColumnConfig {
				property_path: Some(path.to_string()),
				..Default::default()
			},
		);
		assert_eq!(column.value_of(&row), Some(&expected));
	}

	#[rstest]
	fn test_missing_value_renders_empty() {
		let column = column("missing", ColumnConfig::default());
		assert_eq!(column.render_value(&json!({ "name": "Alice" })), "");
	}

	#[rstest]
	fn test_render_label() {
		assert_eq!(
			column("created_at", ColumnConfig::default()).render_label(),
			"Created at"
		);
		let labelled = column(
			"created_at",
			ColumnConfig {
				label: Some("Created".to_string()),
				..Default::default()
			},
		);
		assert_eq!(labelled.render_label(), "Created");
	}

	#[rstest]
	#[case(json!(70000))]
	#[case(json!(-2))]
	#[case(json!("2"))]
	fn test_out_of_range_decimals_rejected(#[case] decimals: Value) {
		let value: Arc<dyn ColumnValueRenderer> = Arc::new(DefaultColumnValueRenderer);
		let label: Arc<dyn ColumnLabelRenderer> = Arc::new(DefaultColumnLabelRenderer);
		let mut formatting_options = OptionsMap::new();
		formatting_options.insert("decimals".to_string(), decimals);

		let result = Column::bind(
			"price".to_string(),
			"users",
			ColumnConfig {
				formatting_options,
				..Default::default()
			},
			&Renderers::default(),
			&value,
			&label,
		);
		match result {
			Err(DataGridError::Configuration { code, message }) => {
				assert_eq!(code, "users");
				assert!(message.contains("decimals"));
			}
			other => panic!("expected configuration error, got {other:?}"),
		}
	}

	#[rstest]
	fn test_decimals_applied_when_in_range() {
		let column = column(
			"price",
			ColumnConfig {
				formatting_options: json!({ "decimals": 1 }).as_object().cloned().unwrap(),
				..Default::default()
			},
		);
		assert_eq!(column.render_value(&json!({ "price": 2.26 })), "2.3");
	}

	#[rstest]
	fn test_unknown_renderer_name_rejected() {
		let value: Arc<dyn ColumnValueRenderer> = Arc::new(DefaultColumnValueRenderer);
		let label: Arc<dyn ColumnLabelRenderer> = Arc::new(DefaultColumnLabelRenderer);
		let result = Column::bind(
			"name".to_string(),
			"users",
			ColumnConfig {
				value_renderer: Some("missing".to_string()),
				..Default::default()
			},
			&Renderers::default(),
			&value,
			&label,
		);
		assert!(result.is_err());
	}
}
