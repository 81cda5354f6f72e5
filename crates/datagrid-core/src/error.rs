//! Error types for datagrid operations.

use thiserror::Error;

/// Errors raised by collaborators behind the [`QueryHandler`](crate::QueryHandler)
/// and [`QueryHandlerRegistry`](crate::QueryHandlerRegistry) traits.
#[derive(Debug, Error)]
pub enum QueryHandlerError {
	/// No query handler registered under the given code.
	#[error("Missing query handler: {0}")]
	MissingQueryHandler(String),

	/// No factory able to build the requested query handler.
	#[error("Missing query handler factory: {0}")]
	MissingFactory(String),

	/// A filter referenced by the configuration does not exist.
	#[error("Missing filter: {0}")]
	MissingFilter(String),

	/// Page number or page size is out of range.
	#[error("Invalid pagination arguments: {0}")]
	InvalidPagination(String),

	/// Any other failure reported by the query engine.
	#[error("Query handler error: {0}")]
	Other(String),
}

/// Result type alias for query handler operations.
pub type QueryHandlerResult<T> = Result<T, QueryHandlerError>;

/// Errors that can occur while configuring or using a datagrid.
#[derive(Debug, Error)]
pub enum DataGridError {
	/// The configuration record is malformed or names an unknown property.
	#[error("Invalid configuration for data-grid '{code}': {message}")]
	Configuration {
		/// Code of the data-grid being configured.
		code: String,
		/// What is wrong with the configuration.
		message: String,
	},

	/// No action registered under the given name.
	#[error("No action with code: '{0}'")]
	ActionNotFound(String),

	/// Neither a built data-grid nor a pending configuration exists for the code.
	#[error("No data-grid with code: {0}")]
	DataGridNotFound(String),

	/// The form was accessed before `build_form()` ran.
	#[error("You must first call build_form()")]
	FormNotBuilt,

	/// Failure propagated from the query handler layer.
	#[error(transparent)]
	QueryHandler(#[from] QueryHandlerError),
}

impl DataGridError {
	/// Creates a configuration error for the given data-grid.
	pub fn configuration(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Configuration {
			code: code.into(),
			message: message.into(),
		}
	}

	/// Returns true for the "not found" family of errors.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::ActionNotFound(_) | Self::DataGridNotFound(_))
	}
}

/// Result type alias for datagrid operations.
pub type DataGridResult<T> = Result<T, DataGridError>;
