//! Query handler double

use std::sync::Arc;

use datagrid_core::{
	Control, ControlType, FilterDescriptor, Form, FormBuilder, HttpRequest, OptionsMap, Pager,
	QueryHandler, QueryHandlerError, QueryHandlerResult,
};
use parking_lot::Mutex;
use serde_json::Value;

use crate::form::StubForm;

#[derive(Debug, Default)]
struct StubState {
	data: OptionsMap,
	requests_handled: usize,
	forms_built: usize,
	last_form: Option<Arc<StubForm>>,
}

/// Query handler serving a fixed list of rows.
///
/// Bound data is recorded; the `page` entry selects the page returned by
/// [`QueryHandler::pager`].
#[derive(Debug)]
pub struct StubQueryHandler {
	code: String,
	filters: Vec<FilterDescriptor>,
	rows: Vec<Value>,
	per_page: usize,
	state: Mutex<StubState>,
}

impl StubQueryHandler {
	/// Creates a handler without filters or rows, 10 rows per page.
	pub fn new(code: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			filters: Vec::new(),
			rows: Vec::new(),
			per_page: 10,
			state: Mutex::new(StubState::default()),
		}
	}

	/// Builds a handler from a raw configuration record:
	///
	/// ```yaml
	/// filters: { title: ~, id: { hidden: true } }
	/// rows: [ { title: "First" } ]
	/// per_page: 20
	/// ```
	pub fn from_configuration(code: &str, configuration: &Value) -> QueryHandlerResult<Self> {
		let mut handler = Self::new(code);

		if let Some(filters) = configuration.get("filters") {
			let filters = filters.as_object().ok_or_else(|| {
				QueryHandlerError::Other(format!("filters of '{code}' must be a mapping"))
			})?;
			for (filter_code, options) in filters {
				let options = match options {
					Value::Null => OptionsMap::new(),
					Value::Object(options) => options.clone(),
					_ => return Err(QueryHandlerError::MissingFilter(filter_code.clone())),
				};
				handler
					.filters
					.push(FilterDescriptor::new(filter_code.clone(), options));
			}
		}
		if let Some(rows) = configuration.get("rows").and_then(Value::as_array) {
			handler.rows = rows.clone();
		}
		if let Some(per_page) = configuration.get("per_page").and_then(Value::as_u64) {
			handler.per_page = per_page as usize;
		}
		Ok(handler)
	}

	/// Adds a filter, hidden or not.
	pub fn with_filter(mut self, code: &str, hidden: bool) -> Self {
		let mut options = OptionsMap::new();
		options.insert("hidden".to_string(), Value::Bool(hidden));
		self.filters.push(FilterDescriptor::new(code, options));
		self
	}

	/// Sets the rows served by the handler.
	pub fn with_rows(mut self, rows: Vec<Value>) -> Self {
		self.rows = rows;
		self
	}

	/// Sets the page size.
	pub fn with_per_page(mut self, per_page: usize) -> Self {
		self.per_page = per_page;
		self
	}

	/// Data bound by the last `handle_request` or `handle_array` call.
	pub fn bound_data(&self) -> OptionsMap {
		self.state.lock().data.clone()
	}

	/// Number of requests handled.
	pub fn requests_handled(&self) -> usize {
		self.state.lock().requests_handled
	}

	/// Number of forms built.
	pub fn forms_built(&self) -> usize {
		self.state.lock().forms_built
	}

	/// Form returned by the last `build_form` call.
	pub fn last_form(&self) -> Option<Arc<StubForm>> {
		self.state.lock().last_form.clone()
	}

	fn current_page(&self) -> QueryHandlerResult<usize> {
		match self.state.lock().data.get("page") {
			None => Ok(1),
			Some(Value::Number(page)) => page
				.as_u64()
				.map(|page| page as usize)
				.ok_or_else(|| QueryHandlerError::InvalidPagination(page.to_string())),
			Some(Value::String(page)) => page
				.parse()
				.map_err(|_| QueryHandlerError::InvalidPagination(page.clone())),
			Some(other) => Err(QueryHandlerError::InvalidPagination(other.to_string())),
		}
	}
}

impl QueryHandler for StubQueryHandler {
	fn code(&self) -> &str {
		&self.code
	}

	fn filters(&self) -> Vec<FilterDescriptor> {
		self.filters.clone()
	}

	fn build_form(&self, builder: &mut dyn FormBuilder) -> QueryHandlerResult<Arc<dyn Form>> {
		for filter in &self.filters {
			let control_type = if filter.is_hidden() { "hidden" } else { "filter" };
			builder.add(Control::new(
				filter.code.clone(),
				ControlType::from_tag(control_type),
				filter.options.clone(),
			));
		}

		let fields = self.filters.iter().map(|filter| filter.code.clone()).collect();
		let form = Arc::new(StubForm::new(self.code.clone(), fields));

		let mut state = self.state.lock();
		state.forms_built += 1;
		state.last_form = Some(Arc::clone(&form));
		Ok(form as Arc<dyn Form>)
	}

	fn handle_request(&self, request: &HttpRequest) -> QueryHandlerResult<()> {
		let query = request.uri().query().unwrap_or_default();
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
			.map_err(|e| QueryHandlerError::Other(e.to_string()))?;

		let mut state = self.state.lock();
		state.data = pairs
			.into_iter()
			.map(|(key, value)| (key, Value::String(value)))
			.collect();
		state.requests_handled += 1;
		Ok(())
	}

	fn handle_array(&self, data: &OptionsMap) -> QueryHandlerResult<()> {
		self.state.lock().data = data.clone();
		Ok(())
	}

	fn pager(&self) -> QueryHandlerResult<Pager> {
		let page = self.current_page()?;
		let start = page.saturating_sub(1).saturating_mul(self.per_page);
		let items = self
			.rows
			.iter()
			.skip(start)
			.take(self.per_page)
			.cloned()
			.collect();
		Pager::new(items, page, self.per_page, self.rows.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_from_configuration() {
		let handler = StubQueryHandler::from_configuration(
			"news",
			&json!({
				"filters": { "title": null, "id": { "hidden": true } },
				"rows": [{ "title": "a" }, { "title": "b" }, { "title": "c" }],
				"per_page": 2,
			}),
		)
		.unwrap();

		let filters = handler.filters();
		assert_eq!(filters.len(), 2);
		assert!(!filters[0].is_hidden());
		assert!(filters[1].is_hidden());

		let pager = handler.pager().unwrap();
		assert_eq!(pager.items().len(), 2);
		assert_eq!(pager.total_pages(), 2);
	}

	#[rstest]
	fn test_invalid_filter_configuration() {
		let result = StubQueryHandler::from_configuration(
			"news",
			&json!({ "filters": { "title": 3 } }),
		);
		assert!(matches!(result, Err(QueryHandlerError::MissingFilter(_))));
	}

	#[rstest]
	fn test_page_from_bound_data() {
		let handler = StubQueryHandler::new("news")
			.with_rows((0..5).map(|i| json!(i)).collect())
			.with_per_page(2);
		let mut data = OptionsMap::new();
		data.insert("page".to_string(), json!("3"));
		handler.handle_array(&data).unwrap();

		let pager = handler.pager().unwrap();
		assert_eq!(pager.current_page(), 3);
		assert_eq!(pager.items(), &[json!(4)]);
	}
}
