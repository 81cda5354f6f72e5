//! Parameter sources and declarations.

use std::collections::HashMap;

use datagrid_core::HttpRequest;

/// Parameters available to converters for one request.
#[derive(Debug, Clone, Default)]
pub struct ParamContext {
	/// Parameters extracted from the matched route.
	pub path_params: HashMap<String, String>,
	/// Decoded query string parameters. The last occurrence of a name wins.
	pub query_params: HashMap<String, String>,
}

impl ParamContext {
	/// Creates a context from path and query parameters.
	pub fn new(
		path_params: HashMap<String, String>,
		query_params: HashMap<String, String>,
	) -> Self {
		Self {
			path_params,
			query_params,
		}
	}

	/// Creates a context from route parameters and the request query string.
	///
	/// A query string that cannot be decoded contributes no parameters.
	pub fn from_request(request: &HttpRequest, path_params: HashMap<String, String>) -> Self {
		let query = request.uri().query().unwrap_or_default();
		let query_params = match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
			Ok(pairs) => pairs.into_iter().collect(),
			Err(e) => {
				tracing::debug!(error = %e, "ignoring undecodable query string");
				HashMap::new()
			}
		};
		Self::new(path_params, query_params)
	}

	/// Looks up a parameter, path parameters first.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.path_params
			.get(name)
			.or_else(|| self.query_params.get(name))
			.map(String::as_str)
	}
}

/// Declaration of a controller argument to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamConfiguration {
	/// Name of the request parameter holding the value.
	pub name: String,
	/// Type the argument expects, matched against [`ParamConverter::target_type`].
	///
	/// [`ParamConverter::target_type`]: crate::ParamConverter::target_type
	pub target_type: String,
	/// Whether a missing parameter resolves to `None` instead of failing.
	pub optional: bool,
}

impl ParamConfiguration {
	/// Declares a required parameter.
	pub fn new(name: impl Into<String>, target_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			target_type: target_type.into(),
			optional: false,
		}
	}

	/// Marks the parameter as optional.
	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}
}
