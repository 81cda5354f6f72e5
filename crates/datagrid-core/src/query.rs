//! Query handler contracts
//!
//! A query handler owns the filters, form binding and pagination of one
//! result set. Datagrids only delegate to it.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::OptionsMap;
use crate::error::QueryHandlerResult;
use crate::form::{Form, FormBuilder};
use crate::pager::Pager;

/// HTTP request type handed to query handlers.
pub type HttpRequest = http::Request<Bytes>;

/// Filter declared by a query handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
	/// Filter code.
	pub code: String,
	/// Filter options as configured.
	#[serde(default)]
	pub options: OptionsMap,
}

impl FilterDescriptor {
	/// Creates a filter descriptor.
	pub fn new(code: impl Into<String>, options: OptionsMap) -> Self {
		Self {
			code: code.into(),
			options,
		}
	}

	/// Returns an option of this filter.
	pub fn option(&self, name: &str) -> Option<&Value> {
		self.options.get(name)
	}

	/// Returns true when the `hidden` option is set to a truthy value.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_core::FilterDescriptor;
	/// use serde_json::json;
	///
	/// let hidden = FilterDescriptor::new("id", json!({ "hidden": true }).as_object().unwrap().clone());
	/// assert!(hidden.is_hidden());
	///
	/// let visible = FilterDescriptor::new("title", json!({ "hidden": 0 }).as_object().unwrap().clone());
	/// assert!(!visible.is_hidden());
	/// ```
	pub fn is_hidden(&self) -> bool {
		self.option("hidden").is_some_and(is_truthy)
	}
}

/// Loose truthiness used for flag options coming from configuration files.
pub(crate) fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => !text.is_empty() && text != "0",
		Value::Array(items) => !items.is_empty(),
		Value::Object(entries) => !entries.is_empty(),
	}
}

/// Filtering, form binding and pagination engine behind a datagrid.
///
/// Implementations are shared between requests and keep their own state
/// behind interior mutability.
pub trait QueryHandler: Send + Sync {
	/// Code under which the handler was registered.
	fn code(&self) -> &str;

	/// Filters declared by the handler configuration.
	fn filters(&self) -> Vec<FilterDescriptor>;

	/// Declares the filter controls on `builder` and returns the built form.
	fn build_form(&self, builder: &mut dyn FormBuilder) -> QueryHandlerResult<Arc<dyn Form>>;

	/// Binds the request data to the filter form.
	fn handle_request(&self, request: &HttpRequest) -> QueryHandlerResult<()>;

	/// Binds a plain record to the filter form.
	fn handle_array(&self, data: &OptionsMap) -> QueryHandlerResult<()>;

	/// Returns the current page of results.
	fn pager(&self) -> QueryHandlerResult<Pager>;
}

/// Registry building query handlers from raw configuration.
pub trait QueryHandlerRegistry: Send + Sync {
	/// Registers a raw configuration to be built on first access.
	fn add_raw_query_handler_configuration(
		&self,
		code: &str,
		configuration: Value,
	) -> QueryHandlerResult<()>;

	/// Returns the handler registered under `code`, building it if needed.
	fn query_handler(&self, code: &str) -> QueryHandlerResult<Arc<dyn QueryHandler>>;
}
