//! Reactive-form model: field specs, controls and stock validators.
//!
//! Values are kept as [`serde_json::Value`] so that a whole form can be
//! turned into a JSON record (and a record patched back into the form)
//! without the form knowing the resource type.

use serde_json::{Map, Value};

/// A named constraint attached to a form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validator {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthError {
    pub required_length: usize,
    pub actual_length: usize,
}

/// Failed rules of a single control. Empty means valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub required: bool,
    pub email: bool,
    pub min_length: Option<LengthError>,
    pub max_length: Option<LengthError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        !self.required && !self.email && self.min_length.is_none() && self.max_length.is_none()
    }
}

/// How the presentation layer edits a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Hidden,
    Text,
    Select,
    Toggle,
}

/// Declarative description of one form field.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub initial: Value,
    pub validators: Vec<Validator>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, input: InputKind) -> Self {
        Self {
            name,
            label,
            input,
            initial: Value::Null,
            validators: Vec::new(),
        }
    }

    pub fn hidden(name: &'static str) -> Self {
        Self::new(name, "", InputKind::Hidden)
    }

    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = value.into();
        self
    }

    pub fn validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators = validators.into_iter().collect();
        self
    }
}

#[derive(Clone, Debug)]
pub struct FormControl {
    spec: FieldSpec,
    value: Value,
    touched: bool,
    dirty: bool,
}

impl FormControl {
    fn new(spec: FieldSpec) -> Self {
        Self {
            value: spec.initial.clone(),
            spec,
            touched: false,
            dirty: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn label(&self) -> &'static str {
        self.spec.label
    }

    pub fn input(&self) -> InputKind {
        self.spec.input
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for validator in &self.spec.validators {
            match *validator {
                Validator::Required => errors.required |= is_empty_input(&self.value),
                Validator::Email => errors.email |= !is_valid_email(&self.value),
                Validator::MinLength(required_length) => {
                    if let Some(actual_length) = input_length(&self.value) {
                        if actual_length < required_length {
                            errors.min_length = Some(LengthError {
                                required_length,
                                actual_length,
                            });
                        }
                    }
                }
                Validator::MaxLength(required_length) => {
                    if let Some(actual_length) = input_length(&self.value) {
                        if actual_length > required_length {
                            errors.max_length = Some(LengthError {
                                required_length,
                                actual_length,
                            });
                        }
                    }
                }
            }
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Text shown in an input box for the current value.
    pub fn display_value(&self) -> String {
        match &self.value {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    fn set_value(&mut self, value: Value) {
        self.value = value;
        self.dirty = true;
    }
}

/// Ordered group of controls built from a list of [`FieldSpec`]s.
#[derive(Clone, Debug, Default)]
pub struct Form {
    controls: Vec<FormControl>,
}

impl Form {
    pub fn group(specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            controls: specs.into_iter().map(FormControl::new).collect(),
        }
    }

    pub fn controls(&self) -> &[FormControl] {
        &self.controls
    }

    pub fn get(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().find(|control| control.name() == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut FormControl> {
        self.controls.iter_mut().find(|control| control.name() == name)
    }

    /// Sets a value from user input. Returns `false` for unknown fields.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.get_mut(name) {
            Some(control) => {
                control.set_value(value.into());
                true
            }
            None => false,
        }
    }

    pub fn mark_touched(&mut self, name: &str) {
        if let Some(control) = self.get_mut(name) {
            control.touched = true;
        }
    }

    pub fn mark_all_touched(&mut self) {
        for control in &mut self.controls {
            control.touched = true;
        }
    }

    /// Current values as a JSON object keyed by field name.
    pub fn value(&self) -> Value {
        let map: Map<String, Value> = self
            .controls
            .iter()
            .map(|control| (control.name().to_string(), control.value.clone()))
            .collect();
        Value::Object(map)
    }

    /// Copies every key of `record` that names a control. Other keys are
    /// ignored and controls without a matching key keep their value.
    pub fn patch_value(&mut self, record: &Value) {
        let Value::Object(map) = record else {
            return;
        };
        for control in &mut self.controls {
            if let Some(value) = map.get(control.name()) {
                control.value = value.clone();
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(FormControl::is_valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }
}

fn is_empty_input(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn input_length(value: &Value) -> Option<usize> {
    if is_empty_input(value) {
        return None;
    }
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn is_valid_email(value: &Value) -> bool {
    if is_empty_input(value) {
        return true;
    }
    let Value::String(text) = value else {
        return false;
    };
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !text.chars().any(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
