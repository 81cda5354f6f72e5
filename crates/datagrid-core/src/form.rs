//! Form building abstractions
//!
//! The form engine belongs to the host framework. A datagrid only needs to
//! declare controls on a builder, hand the builder to its query handler and
//! keep the resulting [`Form`]. These types describe that contract.

use std::fmt::{self, Debug, Display};

use serde::Serialize;
use serde_json::Value;

use crate::config::OptionsMap;

/// Kind of control declared on a form builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ControlType {
	/// Link rendered as a button.
	Link,
	/// Submit button.
	Submit,
	/// Container grouping child controls.
	Form,
	/// Host-specific control type, identified by its tag.
	Custom(String),
}

impl ControlType {
	/// Parses a `form_type` tag.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_core::ControlType;
	///
	/// assert_eq!(ControlType::from_tag("submit"), ControlType::Submit);
	/// assert_eq!(ControlType::from_tag("choice"), ControlType::Custom("choice".to_string()));
	/// ```
	pub fn from_tag(tag: &str) -> Self {
		match tag {
			"link" => Self::Link,
			"submit" => Self::Submit,
			"form" => Self::Form,
			other => Self::Custom(other.to_string()),
		}
	}

	/// Returns the tag of this control type.
	pub fn tag(&self) -> &str {
		match self {
			Self::Link => "link",
			Self::Submit => "submit",
			Self::Form => "form",
			Self::Custom(tag) => tag,
		}
	}
}

impl Display for ControlType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag())
	}
}

/// A control declared on a form builder.
///
/// Containers act as sub-builders: children are added to them before the
/// container itself is added to the parent builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
	/// Name of the control inside its parent.
	pub name: String,
	/// Kind of control.
	pub control_type: ControlType,
	/// Options handed to the control factory.
	pub options: OptionsMap,
	/// Child controls, for containers.
	pub children: Vec<Control>,
}

impl Control {
	/// Creates a control without children.
	pub fn new(name: impl Into<String>, control_type: ControlType, options: OptionsMap) -> Self {
		Self {
			name: name.into(),
			control_type,
			options,
			children: Vec::new(),
		}
	}

	/// Appends a child control.
	pub fn add(&mut self, child: Control) {
		self.children.push(child);
	}

	/// Returns the child with the given name.
	pub fn child(&self, name: &str) -> Option<&Control> {
		self.children.iter().find(|child| child.name == name)
	}
}

/// Builder receiving the controls of a filter form.
pub trait FormBuilder: Send {
	/// Returns a builder option, such as the form `action` URL.
	fn option(&self, name: &str) -> Option<&Value>;

	/// Adds a control to the form.
	fn add(&mut self, control: Control);

	/// Creates a detached container control to be filled and then added.
	fn create(&self, name: &str, control_type: ControlType, options: OptionsMap) -> Control {
		Control::new(name, control_type, options)
	}
}

/// Form produced by a query handler once its filters are bound.
pub trait Form: Send + Sync + Debug {
	/// Name of the form.
	fn name(&self) -> &str;

	/// Creates the renderable view of this form.
	fn create_view(&self) -> FormView;
}

/// Renderable view of a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormView {
	/// Name of the viewed form or control.
	pub name: String,
	/// Variables exposed to templates.
	pub vars: OptionsMap,
	/// Views of the child controls.
	pub children: Vec<FormView>,
}

impl FormView {
	/// Creates an empty view.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	/// Returns the child view with the given name.
	pub fn child(&self, name: &str) -> Option<&FormView> {
		self.children.iter().find(|child| child.name == name)
	}
}
