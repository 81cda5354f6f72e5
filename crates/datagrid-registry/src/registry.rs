//! Lazy datagrid registry.
//!
//! Raw configurations are registered as pending entries and only built into a
//! [`DataGrid`] when first requested. A code is built at most once: callers
//! racing on the same pending code wait for a single build and share its
//! result.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use datagrid_core::{
	DataGrid, DataGridError, DataGridResult, QueryHandlerRegistry, Renderers, SharedDataGrid,
};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde_json::Value;

/// Prefix of the keys under which query handlers are registered.
pub const QUERY_HANDLER_PREFIX: &str = "__sidus_datagrid.";

const QUERY_HANDLER_KEY: &str = "query_handler";

/// A configuration waiting to be built.
struct PendingEntry {
	configuration: Value,
	cell: OnceCell<SharedDataGrid>,
}

enum Entry {
	Pending(Arc<PendingEntry>),
	Built(SharedDataGrid),
}

/// Registry of datagrids, built lazily from raw configuration.
pub struct DataGridRegistry {
	query_handler_registry: Arc<dyn QueryHandlerRegistry>,
	renderers: Renderers,
	entries: Mutex<HashMap<String, Entry>>,
}

impl DataGridRegistry {
	/// Creates an empty registry using the default renderers.
	pub fn new(query_handler_registry: Arc<dyn QueryHandlerRegistry>) -> Self {
		Self {
			query_handler_registry,
			renderers: Renderers::default(),
			entries: Mutex::new(HashMap::new()),
		}
	}

	/// Sets the renderers handed to every datagrid built from now on.
	pub fn with_renderers(mut self, renderers: Renderers) -> Self {
		self.renderers = renderers;
		self
	}

	/// Registers a raw configuration to build on first access.
	///
	/// A pending configuration under the same code is replaced. A datagrid
	/// that is already built is kept as is.
	pub fn add_raw_data_grid_configuration(&self, code: impl Into<String>, configuration: Value) {
		let code = code.into();
		let mut entries = self.entries.lock();

		if matches!(entries.get(&code), Some(Entry::Built(_))) {
			tracing::warn!(
				code = %code,
				"data-grid already built, ignoring raw configuration"
			);
			return;
		}

		tracing::debug!(code = %code, "registered pending data-grid configuration");
		let pending = PendingEntry {
			configuration,
			cell: OnceCell::new(),
		};
		entries.insert(code, Entry::Pending(Arc::new(pending)));
	}

	/// Registers a built datagrid under its own code, replacing any entry.
	///
	/// Returns the shared handle later returned by [`data_grid`](Self::data_grid).
	pub fn add_data_grid(&self, data_grid: DataGrid) -> SharedDataGrid {
		let code = data_grid.code().to_string();
		let shared = data_grid.into_shared();
		tracing::debug!(code = %code, "registered built data-grid");
		self.entries
			.lock()
			.insert(code, Entry::Built(Arc::clone(&shared)));
		shared
	}

	/// Returns true if a datagrid is built or pending under `code`.
	pub fn has_data_grid(&self, code: &str) -> bool {
		self.entries.lock().contains_key(code)
	}

	/// Returns the datagrid registered under `code`, building it if needed.
	///
	/// # Errors
	///
	/// - [`DataGridError::DataGridNotFound`] if nothing is registered under
	///   `code`.
	/// - [`DataGridError::Configuration`] if the pending configuration is
	///   invalid. The configuration stays pending.
	/// - [`DataGridError::QueryHandler`] if the query handler cannot be
	///   registered or fetched.
	pub fn data_grid(&self, code: &str) -> DataGridResult<SharedDataGrid> {
		let pending = {
			let entries = self.entries.lock();
			match entries.get(code) {
				Some(Entry::Built(data_grid)) => return Ok(Arc::clone(data_grid)),
				Some(Entry::Pending(pending)) => Arc::clone(pending),
				None => return Err(DataGridError::DataGridNotFound(code.to_string())),
			}
		};

		let data_grid = pending
			.cell
			.get_or_try_init(|| self.build(code, &pending.configuration))?;
		let data_grid = Arc::clone(data_grid);

		// Another configuration may have been registered during the build
		let mut entries = self.entries.lock();
		let unchanged = matches!(
			entries.get(code),
			Some(Entry::Pending(current)) if Arc::ptr_eq(current, &pending)
		);
		if unchanged {
			entries.insert(code.to_string(), Entry::Built(Arc::clone(&data_grid)));
		}

		Ok(data_grid)
	}

	/// Codes of all registered datagrids, built or pending, sorted.
	pub fn codes(&self) -> Vec<String> {
		let mut codes: Vec<String> = self.entries.lock().keys().cloned().collect();
		codes.sort();
		codes
	}

	fn build(&self, code: &str, configuration: &Value) -> DataGridResult<SharedDataGrid> {
		let Some(entries) = configuration.as_object() else {
			return Err(DataGridError::configuration(
				code,
				"configuration must be a mapping",
			));
		};

		let mut options = entries.clone();
		let query_handler_configuration = options.remove(QUERY_HANDLER_KEY).ok_or_else(|| {
			DataGridError::configuration(code, "missing 'query_handler' entry")
		})?;

		let key = format!("{QUERY_HANDLER_PREFIX}{code}");
		self.query_handler_registry
			.add_raw_query_handler_configuration(&key, query_handler_configuration)?;
		let query_handler = self.query_handler_registry.query_handler(&key)?;

		let data_grid =
			DataGrid::from_value(code, Value::Object(options), query_handler, &self.renderers)?;
		tracing::debug!(
			code = %code,
			columns = data_grid.columns().len(),
			"built data-grid"
		);

		Ok(data_grid.into_shared())
	}
}

impl Debug for DataGridRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let entries = self.entries.lock();
		let mut built: Vec<&str> = Vec::new();
		let mut pending: Vec<&str> = Vec::new();
		for (code, entry) in entries.iter() {
			match entry {
				Entry::Built(_) => built.push(code),
				Entry::Pending(_) => pending.push(code),
			}
		}
		built.sort_unstable();
		pending.sort_unstable();

		f.debug_struct("DataGridRegistry")
			.field("built", &built)
			.field("pending", &pending)
			.field("renderers", &self.renderers)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use datagrid_core::{QueryHandler, QueryHandlerError, QueryHandlerResult};
	use rstest::rstest;
	use serde_json::json;

	/// Registry refusing every query handler.
	struct NoQueryHandlers;

	impl QueryHandlerRegistry for NoQueryHandlers {
		fn add_raw_query_handler_configuration(
			&self,
			_code: &str,
			_configuration: Value,
		) -> QueryHandlerResult<()> {
			Ok(())
		}

		fn query_handler(&self, code: &str) -> QueryHandlerResult<Arc<dyn QueryHandler>> {
			Err(QueryHandlerError::MissingFactory(code.to_string()))
		}
	}

	/// Query handler without filters or results.
	struct NoFilters;

	impl QueryHandler for NoFilters {
		fn code(&self) -> &str {
			"none"
		}

		fn filters(&self) -> Vec<datagrid_core::FilterDescriptor> {
			Vec::new()
		}

		fn build_form(
			&self,
			_builder: &mut dyn datagrid_core::FormBuilder,
		) -> QueryHandlerResult<Arc<dyn datagrid_core::Form>> {
			Err(QueryHandlerError::Other("no form".to_string()))
		}

		fn handle_request(&self, _request: &datagrid_core::HttpRequest) -> QueryHandlerResult<()> {
			Ok(())
		}

		fn handle_array(&self, _data: &datagrid_core::OptionsMap) -> QueryHandlerResult<()> {
			Ok(())
		}

		fn pager(&self) -> QueryHandlerResult<datagrid_core::Pager> {
			datagrid_core::Pager::new(Vec::new(), 1, 10, 0)
		}
	}

	fn registry() -> DataGridRegistry {
		DataGridRegistry::new(Arc::new(NoQueryHandlers))
	}

	#[rstest]
	fn test_unknown_code_is_not_found() {
		let error = registry().data_grid("news").unwrap_err();
		assert!(matches!(error, DataGridError::DataGridNotFound(ref code) if code == "news"));
		assert!(error.is_not_found());
	}

	#[rstest]
	#[case(json!(["query_handler"]))]
	#[case(json!({ "columns": {} }))]
	fn test_invalid_raw_configuration(#[case] configuration: Value) {
		let registry = registry();
		registry.add_raw_data_grid_configuration("news", configuration);

		let result = registry.data_grid("news");
		assert!(matches!(result, Err(DataGridError::Configuration { ref code, .. }) if code == "news"));
		assert!(registry.has_data_grid("news"));
	}

	#[rstest]
	fn test_query_handler_errors_propagate() {
		let registry = registry();
		registry.add_raw_data_grid_configuration(
			"news",
			json!({ "query_handler": {}, "columns": {} }),
		);

		let result = registry.data_grid("news");
		assert!(matches!(
			result,
			Err(DataGridError::QueryHandler(QueryHandlerError::MissingFactory(ref key)))
				if key == "__sidus_datagrid.news"
		));
	}

	#[rstest]
	fn test_add_data_grid_while_grid_is_locked() {
		let registry = registry();
		let query_handler: Arc<dyn QueryHandler> = Arc::new(NoFilters);
		let grid = DataGrid::from_value(
			"news",
			json!({ "columns": {} }),
			query_handler,
			&Renderers::default(),
		)
		.unwrap();

		let shared = registry.add_data_grid(grid);
		let mut guard = shared.write();
		guard.set_template("news.html");

		// Lookups go through the registry lock only
		assert!(registry.has_data_grid("news"));
		assert_eq!(registry.codes(), vec!["news"]);
		let found = registry.data_grid("news").unwrap();
		assert!(Arc::ptr_eq(&shared, &found));
		drop(guard);
		assert_eq!(found.read().template(), Some("news.html"));
	}

	#[rstest]
	fn test_codes_are_sorted() {
		let registry = registry();
		registry.add_raw_data_grid_configuration("users", json!({}));
		registry.add_raw_data_grid_configuration("news", json!({}));
		registry.add_raw_data_grid_configuration("news", json!({ "columns": {} }));

		assert_eq!(registry.codes(), vec!["news", "users"]);
		assert!(!registry.has_data_grid("orders"));
	}
}
