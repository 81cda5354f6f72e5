//! The datagrid model
//!
//! A [`DataGrid`] holds the validated configuration of one list view: its
//! columns, actions, filter buttons and template settings. It declares its
//! controls on the filter form and delegates filtering and pagination to its
//! [`QueryHandler`].

use std::fmt::{self, Debug};
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde_json::{Value, json};

use crate::column::Column;
use crate::config::{DataGridOptions, OptionsMap};
use crate::error::{DataGridError, DataGridResult};
use crate::form::{ControlType, Form, FormBuilder, FormView};
use crate::options::ControlOptions;
use crate::pager::Pager;
use crate::query::{HttpRequest, QueryHandler};
use crate::render::{ColumnLabelRenderer, ColumnValueRenderer, Renderers};

/// Pseudo-action addressing the filter submit button.
pub const SUBMIT_BUTTON: &str = "submit_button";

/// Pseudo-action addressing the filter reset button.
pub const RESET_BUTTON: &str = "reset_button";

/// Key under which route parameters are stored in action records.
pub const ROUTE_PARAMETERS_KEY: &str = "route_parameters";

const RESET_CONTROL: &str = "filterResetButton";
const SUBMIT_CONTROL: &str = "filterSubmitButton";
const ACTIONS_CONTROL: &str = "actions";

/// Datagrid shared between the registry and request handlers.
pub type SharedDataGrid = Arc<RwLock<DataGrid>>;

/// A configured, renderable list view.
pub struct DataGrid {
	code: String,
	query_handler: Arc<dyn QueryHandler>,
	form_theme: Option<String>,
	template: Option<String>,
	template_vars: OptionsMap,
	renderers: Renderers,
	column_value_renderer: Arc<dyn ColumnValueRenderer>,
	column_label_renderer: Arc<dyn ColumnLabelRenderer>,
	columns: Vec<Column>,
	form_options: OptionsMap,
	actions: IndexMap<String, OptionsMap>,
	submit_button: OptionsMap,
	reset_button: OptionsMap,
	form: Option<Arc<dyn Form>>,
	form_view: OnceCell<FormView>,
}

impl DataGrid {
	/// Creates a datagrid from validated options.
	///
	/// One column is created per `options.columns` entry, in order.
	///
	/// # Errors
	///
	/// Returns a configuration error when a renderer named in the options
	/// or in a column is not part of `renderers`.
	pub fn new(
		code: impl Into<String>,
		options: DataGridOptions,
		query_handler: Arc<dyn QueryHandler>,
		renderers: &Renderers,
	) -> DataGridResult<Self> {
		let code = code.into();
		let column_value_renderer =
			renderers.value_renderer(&code, options.column_value_renderer.as_deref())?;
		let column_label_renderer =
			renderers.label_renderer(&code, options.column_label_renderer.as_deref())?;

		let mut data_grid = Self {
			code,
			query_handler,
			form_theme: options.form_theme,
			template: options.template,
			template_vars: options.template_vars,
			renderers: renderers.clone(),
			column_value_renderer,
			column_label_renderer,
			columns: Vec::with_capacity(options.columns.len()),
			form_options: options.form_options,
			actions: options.actions,
			submit_button: options.submit_button,
			reset_button: options.reset_button,
			form: None,
			form_view: OnceCell::new(),
		};

		for (key, column_config) in options.columns {
			let column = Column::bind(
				key,
				&data_grid.code,
				column_config,
				&data_grid.renderers,
				&data_grid.column_value_renderer,
				&data_grid.column_label_renderer,
			)?;
			data_grid.columns.push(column);
		}

		Ok(data_grid)
	}

	/// Creates a datagrid from a raw configuration record.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::Configuration`] if the record is not a
	/// mapping, lacks `columns`, or holds a key that is not a settable
	/// attribute.
	pub fn from_value(
		code: impl Into<String>,
		configuration: Value,
		query_handler: Arc<dyn QueryHandler>,
		renderers: &Renderers,
	) -> DataGridResult<Self> {
		let code = code.into();
		let options = DataGridOptions::from_value(&code, configuration)?;
		Self::new(code, options, query_handler, renderers)
	}

	/// Wraps the datagrid for sharing.
	pub fn into_shared(self) -> SharedDataGrid {
		Arc::new(RwLock::new(self))
	}

	/// Unique code of the datagrid.
	pub fn code(&self) -> &str {
		&self.code
	}

	/// Query handler filtering and paginating the results.
	pub fn query_handler(&self) -> &Arc<dyn QueryHandler> {
		&self.query_handler
	}

	/// Replaces the query handler.
	pub fn set_query_handler(&mut self, query_handler: Arc<dyn QueryHandler>) {
		self.query_handler = query_handler;
	}

	/// Form theme applied to the filter form.
	pub fn form_theme(&self) -> Option<&str> {
		self.form_theme.as_deref()
	}

	/// Sets the form theme.
	pub fn set_form_theme(&mut self, form_theme: Option<String>) {
		self.form_theme = form_theme;
	}

	/// Template rendering the grid.
	pub fn template(&self) -> Option<&str> {
		self.template.as_deref()
	}

	/// Sets the template rendering the grid.
	pub fn set_template(&mut self, template: impl Into<String>) {
		self.template = Some(template.into());
	}

	/// Extra template variables.
	pub fn template_vars(&self) -> &OptionsMap {
		&self.template_vars
	}

	/// Replaces the extra template variables.
	pub fn set_template_vars(&mut self, template_vars: OptionsMap) {
		self.template_vars = template_vars;
	}

	/// Renderer set used to resolve renderer names for new columns.
	pub fn renderers(&self) -> &Renderers {
		&self.renderers
	}

	/// Grid-level column value renderer.
	pub fn column_value_renderer(&self) -> &Arc<dyn ColumnValueRenderer> {
		&self.column_value_renderer
	}

	/// Replaces the grid-level value renderer; existing columns keep theirs.
	pub fn set_column_value_renderer(&mut self, renderer: Arc<dyn ColumnValueRenderer>) {
		self.column_value_renderer = renderer;
	}

	/// Grid-level column label renderer.
	pub fn column_label_renderer(&self) -> &Arc<dyn ColumnLabelRenderer> {
		&self.column_label_renderer
	}

	/// Replaces the grid-level label renderer; existing columns keep theirs.
	pub fn set_column_label_renderer(&mut self, renderer: Arc<dyn ColumnLabelRenderer>) {
		self.column_label_renderer = renderer;
	}

	/// Columns in display order.
	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	/// First column with the given key.
	pub fn column(&self, key: &str) -> Option<&Column> {
		self.columns.iter().find(|column| column.key() == key)
	}

	/// Appends `column`, or inserts it at `index` shifting later columns right.
	///
	/// An index past the end appends. Keys are not de-duplicated.
	pub fn add_column(&mut self, column: Column, index: Option<usize>) {
		match index {
			Some(index) if index < self.columns.len() => self.columns.insert(index, column),
			_ => self.columns.push(column),
		}
	}

	/// Replaces all columns.
	pub fn set_columns(&mut self, columns: Vec<Column>) {
		self.columns = columns;
	}

	/// Actions in display order.
	pub fn actions(&self) -> &IndexMap<String, OptionsMap> {
		&self.actions
	}

	/// Returns the options of an action.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::ActionNotFound`] if no such action exists.
	pub fn action(&self, action: &str) -> DataGridResult<&OptionsMap> {
		self.actions
			.get(action)
			.ok_or_else(|| DataGridError::ActionNotFound(action.to_string()))
	}

	/// Returns true if the action exists.
	pub fn has_action(&self, action: &str) -> bool {
		self.actions.contains_key(action)
	}

	/// Adds or replaces an action.
	pub fn set_action(&mut self, action: impl Into<String>, configuration: OptionsMap) {
		self.actions.insert(action.into(), configuration);
	}

	/// Replaces all actions.
	pub fn set_actions(&mut self, actions: IndexMap<String, OptionsMap>) {
		self.actions = actions;
	}

	/// Submit button overrides.
	pub fn submit_button(&self) -> &OptionsMap {
		&self.submit_button
	}

	/// Replaces the submit button overrides.
	pub fn set_submit_button(&mut self, submit_button: OptionsMap) {
		self.submit_button = submit_button;
	}

	/// Reset button overrides.
	pub fn reset_button(&self) -> &OptionsMap {
		&self.reset_button
	}

	/// Replaces the reset button overrides.
	pub fn set_reset_button(&mut self, reset_button: OptionsMap) {
		self.reset_button = reset_button;
	}

	/// Options for the filter form builder.
	pub fn form_options(&self) -> &OptionsMap {
		&self.form_options
	}

	/// Replaces the filter form builder options.
	pub fn set_form_options(&mut self, form_options: OptionsMap) {
		self.form_options = form_options;
	}

	/// Sets the `route_parameters` of an action or of a filter button.
	///
	/// `submit_button` and `reset_button` address the filter buttons. Any
	/// previous route parameters are replaced; other options are kept.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::ActionNotFound`] for an unknown action.
	pub fn set_action_parameters(&mut self, action: &str, parameters: OptionsMap) -> DataGridResult<()> {
		let target = match action {
			SUBMIT_BUTTON => &mut self.submit_button,
			RESET_BUTTON => &mut self.reset_button,
			_ => self
				.actions
				.get_mut(action)
				.ok_or_else(|| DataGridError::ActionNotFound(action.to_string()))?,
		};
		target.insert(ROUTE_PARAMETERS_KEY.to_string(), Value::Object(parameters));
		Ok(())
	}

	/// Returns the form built by the last [`build_form`](Self::build_form) call.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::FormNotBuilt`] before the form is built.
	pub fn form(&self) -> DataGridResult<Arc<dyn Form>> {
		self.form.clone().ok_or(DataGridError::FormNotBuilt)
	}

	/// Returns the view of the built form, creating it on first access.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::FormNotBuilt`] before the form is built.
	pub fn form_view(&self) -> DataGridResult<&FormView> {
		let form = self.form.as_ref().ok_or(DataGridError::FormNotBuilt)?;
		Ok(self.form_view.get_or_init(|| form.create_view()))
	}

	/// Declares the filter buttons and actions on `builder`, then lets the
	/// query handler build the filter form.
	///
	/// Every call rebuilds the form and discards the cached view.
	pub fn build_form(&mut self, builder: &mut dyn FormBuilder) -> DataGridResult<Arc<dyn Form>> {
		self.build_filter_actions(builder)?;
		self.build_data_grid_actions(builder)?;

		let form = self.query_handler.build_form(builder)?;
		tracing::debug!(code = %self.code, form = form.name(), "built data-grid form");

		self.form = Some(Arc::clone(&form));
		self.form_view = OnceCell::new();
		Ok(form)
	}

	/// Binds the request to the filters.
	pub fn handle_request(&self, request: &HttpRequest) -> DataGridResult<()> {
		self.query_handler.handle_request(request)?;
		Ok(())
	}

	/// Binds a plain record to the filters.
	pub fn handle_array(&self, data: &OptionsMap) -> DataGridResult<()> {
		self.query_handler.handle_array(data)?;
		Ok(())
	}

	/// Returns the current page of results.
	pub fn pager(&self) -> DataGridResult<Pager> {
		Ok(self.query_handler.pager()?)
	}

	fn build_filter_actions(&self, builder: &mut dyn FormBuilder) -> DataGridResult<()> {
		let visible_filters = self
			.query_handler
			.filters()
			.iter()
			.filter(|filter| !filter.is_hidden())
			.count();

		if visible_filters > 0 {
			self.build_reset_action(builder)?;
			self.build_submit_action(builder)?;
		}
		Ok(())
	}

	fn build_reset_action(&self, builder: &mut dyn FormBuilder) -> DataGridResult<()> {
		let uri = match builder.option("action") {
			Some(Value::String(action)) if !action.is_empty() => action.clone(),
			_ => "?".to_string(),
		};
		let defaults = options_map(json!({
			"label": "sidus.datagrid.reset.label",
			"uri": uri,
		}));
		let resolved =
			ControlOptions::resolve(&self.code, ControlType::Link, defaults, &self.reset_button)?;
		builder.add(resolved.into_control(RESET_CONTROL));
		Ok(())
	}

	fn build_submit_action(&self, builder: &mut dyn FormBuilder) -> DataGridResult<()> {
		let defaults = options_map(json!({
			"label": "sidus.datagrid.submit.label",
			"attr": { "class": "btn-primary" },
		}));
		let resolved =
			ControlOptions::resolve(&self.code, ControlType::Submit, defaults, &self.submit_button)?;
		builder.add(resolved.into_control(SUBMIT_CONTROL));
		Ok(())
	}

	fn build_data_grid_actions(&self, builder: &mut dyn FormBuilder) -> DataGridResult<()> {
		let mut actions = builder.create(
			ACTIONS_CONTROL,
			ControlType::Form,
			options_map(json!({ "label": false })),
		);

		for (name, options) in &self.actions {
			let resolved = ControlOptions::resolve(
				&self.code,
				ControlType::Link,
				OptionsMap::new(),
				options,
			)?;
			actions.add(resolved.into_control(name.as_str()));
		}

		builder.add(actions);
		Ok(())
	}
}

fn options_map(value: Value) -> OptionsMap {
	match value {
		Value::Object(entries) => entries,
		_ => OptionsMap::new(),
	}
}

impl Debug for DataGrid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DataGrid")
			.field("code", &self.code)
			.field("query_handler", &self.query_handler.code())
			.field("template", &self.template)
			.field("form_theme", &self.form_theme)
			.field("columns", &self.columns)
			.field("actions", &self.actions)
			.field("form_built", &self.form.is_some())
			.finish_non_exhaustive()
	}
}
