//! Error types for parameter conversion

use datagrid_core::DataGridError;
use thiserror::Error;

/// Errors raised while converting a request parameter.
#[derive(Debug, Error)]
pub enum ParamError {
	/// A required parameter is absent from the request.
	#[error("Missing parameter: {0}")]
	MissingParameter(String),

	/// The datagrid lookup failed.
	#[error(transparent)]
	DataGrid(#[from] DataGridError),
}

/// Result type for parameter conversion
pub type ParamResult<T> = Result<T, ParamError>;
