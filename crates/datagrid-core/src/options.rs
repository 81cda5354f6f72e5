//! Resolution of control options from defaults and user overrides.
//!
//! Buttons and actions are configured as free-form records. Before a control
//! is declared, the user record is merged over a defaults record and the
//! `form_type` key is taken out to pick the control type.

use serde_json::Value;

use crate::config::OptionsMap;
use crate::error::{DataGridError, DataGridResult};
use crate::form::{Control, ControlType};

/// Key selecting the control type inside an options record.
pub const FORM_TYPE_KEY: &str = "form_type";

/// Control type and options ready to be declared on a form builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlOptions {
	/// Kind of control to declare.
	pub control_type: ControlType,
	/// Options left once `form_type` is consumed.
	pub options: OptionsMap,
}

impl ControlOptions {
	/// Merges `overrides` over `defaults` and consumes `form_type`.
	///
	/// Nested records are merged recursively; for any other value the override
	/// wins. When the merged record has no usable `form_type` (absent, null or
	/// empty), `default_type` is used.
	///
	/// # Errors
	///
	/// Returns [`DataGridError::Configuration`] for `code` when `form_type` is
	/// neither a string nor null.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_core::{ControlOptions, ControlType};
	/// use serde_json::json;
	///
	/// let defaults = json!({ "label": "Search", "attr": { "class": "btn-primary" } });
	/// let overrides = json!({ "attr": { "id": "go" }, "form_type": "link" });
	///
	/// let resolved = ControlOptions::resolve(
	///     "news",
	///     ControlType::Submit,
	///     defaults.as_object().unwrap().clone(),
	///     overrides.as_object().unwrap(),
	/// )
	/// .unwrap();
	///
	/// assert_eq!(resolved.control_type, ControlType::Link);
	/// assert_eq!(resolved.options["attr"], json!({ "class": "btn-primary", "id": "go" }));
	/// assert!(!resolved.options.contains_key("form_type"));
	/// ```
	pub fn resolve(
		code: &str,
		default_type: ControlType,
		defaults: OptionsMap,
		overrides: &OptionsMap,
	) -> DataGridResult<Self> {
		let mut options = defaults;
		merge_options(&mut options, overrides);

		let control_type = match options.remove(FORM_TYPE_KEY) {
			None | Some(Value::Null) => default_type,
			Some(Value::String(tag)) if tag.is_empty() => default_type,
			Some(Value::String(tag)) => ControlType::from_tag(&tag),
			Some(other) => {
				return Err(DataGridError::configuration(
					code,
					format!("`{FORM_TYPE_KEY}` must be a string, got {other}"),
				));
			}
		};

		Ok(Self {
			control_type,
			options,
		})
	}

	/// Turns the resolved options into a control named `name`.
	pub fn into_control(self, name: impl Into<String>) -> Control {
		Control::new(name, self.control_type, self.options)
	}
}

/// Recursively merges `overrides` into `base`; override values win.
pub fn merge_options(base: &mut OptionsMap, overrides: &OptionsMap) {
	for (key, value) in overrides {
		match (base.get_mut(key), value) {
			(Some(Value::Object(existing)), Value::Object(nested)) => {
				merge_options(existing, nested);
			}
			_ => {
				base.insert(key.clone(), value.clone());
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn map(value: Value) -> OptionsMap {
		value.as_object().cloned().unwrap_or_default()
	}

	#[rstest]
	fn test_override_wins_on_scalars() {
		let resolved = ControlOptions::resolve(
			"grid",
			ControlType::Link,
			map(json!({ "label": "Reset", "uri": "?" })),
			&map(json!({ "label": "Clear" })),
		)
		.unwrap();

		assert_eq!(resolved.control_type, ControlType::Link);
		assert_eq!(resolved.options["label"], json!("Clear"));
		assert_eq!(resolved.options["uri"], json!("?"));
	}

	#[rstest]
	#[case(json!({}), ControlType::Link)]
	#[case(json!({ "form_type": null }), ControlType::Link)]
	#[case(json!({ "form_type": "" }), ControlType::Link)]
	#[case(json!({ "form_type": "submit" }), ControlType::Submit)]
	#[case(json!({ "form_type": "modal_link" }), ControlType::Custom("modal_link".to_string()))]
	fn test_form_type_selection(#[case] overrides: Value, #[case] expected: ControlType) {
		let resolved =
			ControlOptions::resolve("grid", ControlType::Link, OptionsMap::new(), &map(overrides))
				.unwrap();
		assert_eq!(resolved.control_type, expected);
		assert!(!resolved.options.contains_key(FORM_TYPE_KEY));
	}

	#[rstest]
	fn test_default_form_type_is_consumed() {
		let resolved = ControlOptions::resolve(
			"grid",
			ControlType::Link,
			map(json!({ "form_type": "submit", "label": "Go" })),
			&OptionsMap::new(),
		)
		.unwrap();

		assert_eq!(resolved.control_type, ControlType::Submit);
		assert_eq!(resolved.options, map(json!({ "label": "Go" })));
	}

	#[rstest]
	fn test_non_string_form_type_rejected() {
		let result = ControlOptions::resolve(
			"grid",
			ControlType::Link,
			OptionsMap::new(),
			&map(json!({ "form_type": 3 })),
		);
		assert!(matches!(result, Err(DataGridError::Configuration { .. })));
	}

	#[rstest]
	fn test_nested_scalar_replaces_record() {
		let mut base = map(json!({ "attr": { "class": "btn" } }));
		merge_options(&mut base, &map(json!({ "attr": false })));
		assert_eq!(base["attr"], json!(false));
	}
}
