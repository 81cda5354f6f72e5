//! Form builder and form doubles

use std::sync::atomic::{AtomicUsize, Ordering};

use datagrid_core::{Control, Form, FormBuilder, FormView, OptionsMap};
use serde_json::Value;

/// Form builder recording every control added to it.
#[derive(Debug, Default)]
pub struct RecordingFormBuilder {
	options: OptionsMap,
	controls: Vec<Control>,
}

impl RecordingFormBuilder {
	/// Creates a builder without options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a builder option, such as `action`.
	pub fn with_option(mut self, name: &str, value: Value) -> Self {
		self.options.insert(name.to_string(), value);
		self
	}

	/// Controls added so far, in order.
	pub fn controls(&self) -> &[Control] {
		&self.controls
	}

	/// Names of the controls added so far, in order.
	pub fn control_names(&self) -> Vec<&str> {
		self.controls.iter().map(|control| control.name.as_str()).collect()
	}

	/// Returns the control with the given name.
	pub fn control(&self, name: &str) -> Option<&Control> {
		self.controls.iter().find(|control| control.name == name)
	}
}

impl FormBuilder for RecordingFormBuilder {
	fn option(&self, name: &str) -> Option<&Value> {
		self.options.get(name)
	}

	fn add(&mut self, control: Control) {
		self.controls.push(control);
	}
}

/// Form counting the views created from it.
#[derive(Debug)]
pub struct StubForm {
	name: String,
	fields: Vec<String>,
	views_created: AtomicUsize,
}

impl StubForm {
	/// Creates a form with the given field names.
	pub fn new(name: impl Into<String>, fields: Vec<String>) -> Self {
		Self {
			name: name.into(),
			fields,
			views_created: AtomicUsize::new(0),
		}
	}

	/// Number of times [`Form::create_view`] was called.
	pub fn views_created(&self) -> usize {
		self.views_created.load(Ordering::SeqCst)
	}
}

impl Form for StubForm {
	fn name(&self) -> &str {
		&self.name
	}

	fn create_view(&self) -> FormView {
		self.views_created.fetch_add(1, Ordering::SeqCst);
		let mut view = FormView::new(self.name.clone());
		view.children = self.fields.iter().map(FormView::new).collect();
		view
	}
}
