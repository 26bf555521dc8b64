#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Intake
//!
//! A library for building schema-driven, validated forms in the terminal.
//!
//! Intake maps a declarative field list to a controlled form:
//! - Text inputs, text areas and numeric inputs
//! - Select menus, checkboxes and file-path fields
//! - Per-field validation with inline error messages
//! - Create/edit submission bifurcation with async handlers
//!
//! ## Example
//!
//! ```rust,ignore
//! use intake::{FieldSchema, Form, FormValues, Schema, SelectOption};
//!
//! let schema = Schema::new(vec![
//!     FieldSchema::text("name").label("Product Name").required(true),
//!     FieldSchema::number("price").label("Price").required(true).min(0.0),
//!     FieldSchema::select("categoryId")
//!         .label("Category")
//!         .required(true)
//!         .options(vec![
//!             SelectOption::new("Beverages", "1"),
//!             SelectOption::new("Snacks", "2"),
//!         ]),
//! ])?;
//!
//! let mut form = Form::new(schema, FormValues::new().with("name", "").with("price", 0.0))
//!     .submit_label("Add Product")
//!     .on_submit(|record| Box::pin(async move { save_product(record).await }));
//!
//! // Feed terminal key events into the form, render with `form.view()`,
//! // and call `form.submit().await` when the user confirms.
//! ```
//!
//! The form never decides create-vs-edit by inspecting the data: the caller
//! supplies the mode (and an edit handler) when reusing one schema for both
//! an "add" and an "edit" page.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, ContentStyle};
use serde::Serialize;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------------

/// Errors reported when a field schema is constructed.
///
/// Schema errors are programmer mistakes, not user input problems: they are
/// raised eagerly by [`Schema::new`] so a mis-wired page fails at mount time
/// instead of producing a form whose updates go to the wrong field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field was declared with an empty name.
    ///
    /// Field names are the keys of the collected value object; an empty key
    /// can never be addressed by [`FormController::set_value`].
    #[error("field name must not be empty")]
    EmptyName,

    /// Two fields share the same name.
    ///
    /// Updates for a duplicated name would be ambiguous, so the schema is
    /// rejected instead of silently keeping one of the definitions.
    #[error("duplicate field name: {0}")]
    DuplicateName(String),
}

/// Errors reported by the submission path.
///
/// Validation failures are *not* errors: they are reported through the
/// per-field error map and block submission without raising. `SubmitError`
/// covers configuration mistakes and handler failures only.
///
/// Handler failures pass through untouched ([`SubmitError::Handler`] is
/// transparent over [`anyhow::Error`]); the engine guarantees only that a
/// failed submission never resets the entered values.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// A create submission was requested but no submit handler is configured.
    #[error("no submit handler is configured")]
    MissingSubmitHandler,

    /// An edit submission was requested but no edit handler is configured.
    ///
    /// The engine never falls back to the create handler: an edit form
    /// without an edit handler is a wiring mistake on the calling page.
    #[error("no edit handler is configured")]
    MissingEditHandler,

    /// The submit handler itself failed (network error, rejected write, ...).
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl SubmitError {
    /// Returns true if this error originated in the caller's handler.
    pub fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }

    /// Returns true if this error is a missing-handler configuration mistake.
    pub fn is_missing_handler(&self) -> bool {
        matches!(self, Self::MissingSubmitHandler | Self::MissingEditHandler)
    }
}

/// A specialized [`Result`] type for submission operations.
pub type Result<T> = std::result::Result<T, SubmitError>;

// -----------------------------------------------------------------------------
// Field kinds & schema
// -----------------------------------------------------------------------------

/// The kind of a form field.
///
/// A closed set: the renderer matches on it exhaustively, so adding a kind is
/// a compile-time exercise rather than a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Numeric input; typed characters are coerced to a number before storage.
    Number,
    /// Multi-line text input.
    TextArea,
    /// Enumerated choice restricted to the field's options.
    Select,
    /// Boolean toggle; `required` means "must be checked".
    Checkbox,
    /// File reference; stores a path, not display text.
    File,
}

impl FieldKind {
    /// The value an untouched field of this kind holds.
    pub fn empty_value(self) -> FieldValue {
        match self {
            Self::Text | Self::TextArea => FieldValue::Text(String::new()),
            Self::Checkbox => FieldValue::Bool(false),
            Self::Number | Self::Select | Self::File => FieldValue::Empty,
        }
    }
}

/// An option for select fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// The display text shown to the user.
    pub label: String,
    /// The underlying value the form state stores.
    pub value: String,
}

impl SelectOption {
    /// Creates a new option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Creates options from string values, using each value as its own label.
pub fn new_options<S: Into<String> + Clone>(
    values: impl IntoIterator<Item = S>,
) -> Vec<SelectOption> {
    values
        .into_iter()
        .map(|v| {
            let s: String = v.clone().into();
            SelectOption::new(s.clone(), s)
        })
        .collect()
}

/// A custom validation rule, evaluated after the built-in required/min checks.
///
/// Returns `None` when the value is acceptable, or an error message.
pub type Validator = fn(&FieldValue) -> Option<String>;

/// Declarative description of one form field.
///
/// Built with the per-kind constructors and chainable setters:
///
/// ```rust
/// use intake::FieldSchema;
///
/// let field = FieldSchema::number("price")
///     .label("Price")
///     .required(true)
///     .min(0.0);
/// ```
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Key into the collected value object. Unique within one schema.
    pub name: String,
    /// The field kind; selects the rendering and editing strategy.
    pub kind: FieldKind,
    /// Display label. Checkboxes render it inline next to the toggle.
    pub label: String,
    /// Display hint shown while the field is empty.
    pub placeholder: String,
    /// Longer display hint rendered under the label.
    pub description: String,
    /// When true, an empty value is a validation error at submit time.
    pub required: bool,
    /// Lower bound, meaningful for [`FieldKind::Number`] only.
    pub min: Option<f64>,
    /// Choices for [`FieldKind::Select`]. May be installed later via
    /// [`FormController::set_options`] when the list arrives asynchronously.
    pub options: Vec<SelectOption>,
    /// Custom validation rule, evaluated in addition to required/min.
    pub validate: Option<Validator>,
    /// Rendered greyed out and skipped by focus traversal.
    pub disabled: bool,
    /// Not rendered, but still part of the collected value object.
    pub hidden: bool,
}

impl FieldSchema {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: String::new(),
            placeholder: String::new(),
            description: String::new(),
            required: false,
            min: None,
            options: Vec::new(),
            validate: None,
            disabled: false,
            hidden: false,
        }
    }

    /// Creates a single-line text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Creates a numeric field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Creates a multi-line text field.
    pub fn text_area(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextArea)
    }

    /// Creates a select field.
    pub fn select(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Select)
    }

    /// Creates a checkbox field.
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox)
    }

    /// Creates a file-reference field.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File)
    }

    /// Sets the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the field as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the numeric lower bound. Ignored on non-number kinds.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the options. Ignored on non-select kinds.
    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Sets the custom validation rule.
    pub fn validate(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Marks the field as disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Marks the field as hidden.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The label if set, otherwise the field name. Used in error messages.
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// An immutable, validated list of field schemas.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Validates and wraps a field list.
    ///
    /// Fails fast on empty or duplicate names. A select with an empty options
    /// list is accepted: option lists routinely arrive asynchronously and are
    /// installed later with [`FormController::set_options`]. Options on a
    /// non-select kind (and `min` on a non-number) are ignored with a warning.
    pub fn new(fields: Vec<FieldSchema>) -> std::result::Result<Self, SchemaError> {
        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateName(field.name.clone()));
            }
            if !field.options.is_empty() && field.kind != FieldKind::Select {
                tracing::warn!(field = %field.name, "options are ignored on non-select fields");
            }
            if field.min.is_some() && field.kind != FieldKind::Number {
                tracing::warn!(field = %field.name, "min is ignored on non-number fields");
            }
        }
        Ok(Self { fields })
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FieldSchema> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The value object an untouched form holds: one kind-specific empty
    /// value per field.
    pub fn empty_values(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in &self.fields {
            values.insert(field.name.clone(), field.kind.empty_value());
        }
        values
    }
}

// -----------------------------------------------------------------------------
// Values
// -----------------------------------------------------------------------------

/// A single field's value.
///
/// The variant in use depends on the field kind: `Text` for text, text area
/// and select (a select stores the chosen option's value), `Number` for
/// numeric fields, `Bool` for checkboxes and `File` for file references.
/// `Empty` models "no entry yet": an untouched number, the select
/// placeholder sentinel, or a file field with nothing chosen.
///
/// Serializes untagged (`Empty` becomes null), so a collected value object
/// can be turned into a JSON payload directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No entry.
    Empty,
    /// Text content, or a select's chosen option value.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Checkbox state.
    Bool(bool),
    /// A file reference.
    File(PathBuf),
}

impl FieldValue {
    /// Returns the text content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean content, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the file reference, if any.
    pub fn as_file(&self) -> Option<&Path> {
        match self {
            Self::File(p) => Some(p),
            _ => None,
        }
    }

    /// Whether this value counts as "no entry" for required-checking.
    ///
    /// `Empty` and blank text both qualify; the select sentinel is `Empty`
    /// and therefore equivalent to an empty value.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<PathBuf> for FieldValue {
    fn from(p: PathBuf) -> Self {
        Self::File(p)
    }
}

/// The collected value object: a mapping from field name to current value.
///
/// May carry keys that are not in the schema: a hydrated record's identifier
/// travels through the form untouched and reaches the submit handler, the way
/// an edit page needs it to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    /// Creates an empty value object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder-style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Looks up a value by field name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Returns the text content of a field, if any.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Returns the numeric content of a field, if any.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Returns the boolean content of a field, if any.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// Returns the file reference of a field, if any.
    pub fn get_file(&self, name: &str) -> Option<&Path> {
        self.get(name).and_then(FieldValue::as_file)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlays another value object onto this one; `other` wins on conflict.
    pub fn merge(&mut self, other: &FormValues) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }
}

// -----------------------------------------------------------------------------
// Form state controller
// -----------------------------------------------------------------------------

/// The owner of current values and validation errors for one form instance.
///
/// All mutation flows through the controller: the renderer binds each field's
/// value through [`set_value`](Self::set_value), and validation state is only
/// ever written by [`validate`](Self::validate) /
/// [`validate_field`](Self::validate_field). The controller has no UI
/// dependencies and can be driven directly in tests.
#[derive(Debug)]
pub struct FormController {
    schema: Schema,
    defaults: FormValues,
    values: FormValues,
    errors: BTreeMap<String, String>,
}

impl FormController {
    /// Creates a controller with initial values derived from `defaults`.
    ///
    /// Initial values are the schema's kind-specific empty values overlaid
    /// with `defaults` (defaults win).
    pub fn new(schema: Schema, defaults: FormValues) -> Self {
        let mut values = schema.empty_values();
        values.merge(&defaults);
        Self {
            schema,
            defaults,
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the current value object.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Looks up one field's current value.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns the current error map. Absent key = no error for that field.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Returns one field's current error message, if any.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Overlays externally-loaded values onto the current state.
    ///
    /// This is the late-hydration path: an edit page mounts the form with
    /// defaults, fetches the record, and hydrates once it arrives, without a
    /// remount. External values win on conflict and may include keys outside
    /// the schema (the record identifier). Callable repeatedly as new records
    /// load.
    pub fn hydrate(&mut self, external: &FormValues) {
        tracing::debug!(fields = external.len(), "hydrating form values");
        self.values.merge(external);
    }

    /// Updates one field's value.
    ///
    /// Does not clear the field's error by itself: errors are recomputed at
    /// the next validation pass (blur or submit). An unknown name is a caller
    /// mistake and is ignored with a warning.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) {
        if self.schema.field(name).is_none() {
            tracing::warn!(field = %name, "set_value on unknown field ignored");
            return;
        }
        self.values.insert(name, value);
    }

    /// Installs an asynchronously-fetched option list on a select field.
    ///
    /// The field's current value is left untouched: options arriving after a
    /// value was set (or hydrated) must not clobber it.
    pub fn set_options(&mut self, name: &str, options: Vec<SelectOption>) {
        match self.schema.field_mut(name) {
            Some(field) if field.kind == FieldKind::Select => field.options = options,
            Some(field) => {
                tracing::warn!(field = %field.name, "set_options on non-select field ignored");
            }
            None => tracing::warn!(field = %name, "set_options on unknown field ignored"),
        }
    }

    /// Re-validates a single field, updating its entry in the error map.
    pub fn validate_field(&mut self, name: &str) -> Option<&str> {
        let message = match self.schema.field(name) {
            Some(field) => field_error(field, self.values.get(name)),
            None => return None,
        };
        match message {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
        self.error(name)
    }

    /// Validates every field against the current values.
    ///
    /// Deterministic and side-effect-free beyond rewriting the error map.
    /// An empty map means the form is valid. Display flags (`disabled`,
    /// `hidden`) do not exempt a field.
    pub fn validate(&mut self) -> &BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for field in self.schema.fields() {
            if let Some(message) = field_error(field, self.values.get(&field.name)) {
                errors.insert(field.name.clone(), message);
            }
        }
        self.errors = errors;
        &self.errors
    }

    /// Replaces the values with a fresh copy of the defaults and clears the
    /// error map. Used after a successful submission; idempotent.
    pub fn reset(&mut self) {
        let mut values = self.schema.empty_values();
        values.merge(&self.defaults);
        self.values = values;
        self.errors.clear();
    }
}

/// Evaluates one field's rules against its current value.
///
/// Order: required (kind-specific emptiness), then `min` for numbers, then
/// the custom rule. First failure wins.
fn field_error(field: &FieldSchema, value: Option<&FieldValue>) -> Option<String> {
    let value = value.unwrap_or(&FieldValue::Empty);

    if field.required {
        let missing = match field.kind {
            // A required checkbox must be checked, not merely present.
            FieldKind::Checkbox => !matches!(value, FieldValue::Bool(true)),
            FieldKind::File => !matches!(value, FieldValue::File(_)),
            _ => value.is_empty(),
        };
        if missing {
            return Some(required_message(field));
        }
    }

    if field.kind == FieldKind::Number
        && let (Some(min), Some(n)) = (field.min, value.as_number())
        && n < min
    {
        return Some(format!("must be at least {}", fmt_number(min)));
    }

    if let Some(validate) = field.validate {
        return validate(value);
    }

    None
}

fn required_message(field: &FieldSchema) -> String {
    match field.kind {
        FieldKind::Checkbox => format!("{} must be checked", field.display_name()),
        _ => format!("{} is required", field.display_name()),
    }
}

/// Formats a number the way it was typed: integers without a trailing `.0`.
fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

// -----------------------------------------------------------------------------
// Theme
// -----------------------------------------------------------------------------

/// Styles for one focus state of a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldStyles {
    /// Label style.
    pub label: ContentStyle,
    /// Description style.
    pub description: ContentStyle,
    /// Prompt style (the `> ` before text-ish inputs).
    pub prompt: ContentStyle,
    /// Entered-value style.
    pub value: ContentStyle,
    /// Placeholder style.
    pub placeholder: ContentStyle,
    /// Inline error message style.
    pub error: ContentStyle,
    /// Select cursor style.
    pub select_cursor: ContentStyle,
    /// Unselected option style.
    pub option: ContentStyle,
    /// Selected option style.
    pub selected_option: ContentStyle,
    /// Style for disabled fields' content.
    pub disabled: ContentStyle,
}

/// Collection of styles for form rendering.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Styles for the focused field.
    pub focused: FieldStyles,
    /// Styles for blurred fields.
    pub blurred: FieldStyles,
    /// Submit button style while the form is idle.
    pub submit_button: ContentStyle,
    /// Submit button style while a submission is in flight.
    pub submit_button_disabled: ContentStyle,
    /// Separator between fields.
    pub field_separator: String,
}

impl Default for Theme {
    fn default() -> Self {
        theme_default()
    }
}

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

fn with_attr(mut style: ContentStyle, attr: Attribute) -> ContentStyle {
    style.attributes = style.attributes.with(attr);
    style
}

/// Returns the default theme.
pub fn theme_default() -> Theme {
    let indigo = Color::Rgb {
        r: 0x75,
        g: 0x71,
        b: 0xF9,
    };
    let fuchsia = Color::Rgb {
        r: 0xF7,
        g: 0x80,
        b: 0xE2,
    };
    let green = Color::Rgb {
        r: 0x02,
        g: 0xBF,
        b: 0x87,
    };
    let red = Color::Rgb {
        r: 0xED,
        g: 0x56,
        b: 0x7A,
    };

    let focused = FieldStyles {
        label: with_attr(fg(indigo), Attribute::Bold),
        description: fg(Color::AnsiValue(243)),
        prompt: fg(fuchsia),
        value: fg(Color::AnsiValue(252)),
        placeholder: fg(Color::AnsiValue(238)),
        error: fg(red),
        select_cursor: fg(fuchsia),
        option: fg(Color::AnsiValue(252)),
        selected_option: fg(green),
        disabled: with_attr(fg(Color::AnsiValue(240)), Attribute::Dim),
    };

    let mut blurred = focused;
    blurred.label = fg(Color::AnsiValue(245));
    blurred.prompt = fg(Color::AnsiValue(240));
    blurred.select_cursor = fg(Color::AnsiValue(240));
    blurred.selected_option = fg(Color::AnsiValue(252));

    Theme {
        focused,
        blurred,
        submit_button: with_attr(
            ContentStyle {
                foreground_color: Some(Color::Rgb {
                    r: 0xFF,
                    g: 0xFD,
                    b: 0xF5,
                }),
                background_color: Some(fuchsia),
                ..ContentStyle::default()
            },
            Attribute::Bold,
        ),
        submit_button_disabled: ContentStyle {
            foreground_color: Some(Color::AnsiValue(252)),
            background_color: Some(Color::AnsiValue(237)),
            ..ContentStyle::default()
        },
        field_separator: "\n\n".to_string(),
    }
}

/// Returns a style-free theme for dumb terminals and snapshot-friendly tests.
pub fn theme_plain() -> Theme {
    Theme {
        focused: FieldStyles::default(),
        blurred: FieldStyles::default(),
        submit_button: ContentStyle::default(),
        submit_button_disabled: ContentStyle::default(),
        field_separator: "\n\n".to_string(),
    }
}

// -----------------------------------------------------------------------------
// Submission
// -----------------------------------------------------------------------------

/// Which submission path a valid form takes.
///
/// Caller-supplied; the engine never infers create-vs-edit from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    /// New record: the submit handler receives the values.
    #[default]
    Create,
    /// Existing record: the edit handler receives the values.
    Edit,
}

/// The submission state of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    /// No submission in flight.
    #[default]
    Idle,
    /// A handler is running; further submit requests are no-ops.
    Submitting,
}

/// What a call to [`Form::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the handler for `mode` completed; the form has
    /// been reset to its defaults.
    Submitted(SubmitMode),
    /// Validation failed; errors are in the controller's error map and no
    /// handler was invoked.
    Invalid,
    /// A submission was already in flight; nothing was done.
    InFlight,
}

/// The future a submit handler returns.
pub type SubmitFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// A submit handler: receives the validated value object, returns a future.
///
/// Even synchronous handlers are awaited uniformly, which keeps the
/// submission state machine single-pathed; wrap them with
/// [`Form::on_submit_sync`] / [`Form::on_submit_edit_sync`].
pub type SubmitHandler = Box<dyn FnMut(FormValues) -> SubmitFuture + Send>;

/// An in-flight submission produced by [`Form::begin_submit`].
///
/// The lazy-side-effect shape: the handler has been invoked and the work is
/// captured here, but nothing runs until the job is awaited. The job owns its
/// data, so a host that drops the form mid-flight cannot have the resolution
/// write into a destroyed controller; feed the result back with
/// [`Form::finish_submit`] only while the form is alive.
pub struct SubmitJob {
    mode: SubmitMode,
    future: SubmitFuture,
}

impl SubmitJob {
    /// The mode this submission runs under.
    pub fn mode(&self) -> SubmitMode {
        self.mode
    }

    /// Runs the handler to completion.
    pub async fn run(self) -> anyhow::Result<()> {
        self.future.await
    }
}

impl std::fmt::Debug for SubmitJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitJob")
            .field("mode", &self.mode)
            .field("future", &"<future>")
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Form (renderer/dispatcher)
// -----------------------------------------------------------------------------

/// What [`Form::handle_key`] did with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The event edited a field or moved focus; re-render.
    Handled,
    /// The event is not bound to anything in this form.
    Ignored,
    /// The user asked to submit; call [`Form::submit`] (or
    /// [`Form::begin_submit`] / [`Form::finish_submit`]).
    SubmitRequested,
    /// The user asked to leave the form (esc / ctrl+c).
    Aborted,
}

/// A mounted form: schema-driven rendering, key dispatch and submission.
///
/// Owns one [`FormController`] for its lifetime. Key events edit the focused
/// field through the controller; `view` renders every visible field with its
/// current value and inline error; submission validates, bifurcates on the
/// caller-supplied mode and resets on success.
pub struct Form {
    controller: FormController,
    on_submit: Option<SubmitHandler>,
    on_submit_edit: Option<SubmitHandler>,
    is_edit: bool,
    submit_label: String,
    state: SubmitState,
    focus: usize,
    edit_buffer: Option<String>,
    select_height: usize,
    theme: Theme,
}

impl Form {
    /// Creates a form over a validated schema.
    ///
    /// `defaults` seeds the initial values and is what the form resets to
    /// after a successful submission.
    pub fn new(schema: Schema, defaults: FormValues) -> Self {
        Self {
            controller: FormController::new(schema, defaults),
            on_submit: None,
            on_submit_edit: None,
            is_edit: false,
            submit_label: "Submit".to_string(),
            state: SubmitState::Idle,
            focus: 0,
            edit_buffer: None,
            select_height: 5,
            theme: Theme::default(),
        }
    }

    /// Pre-fills the form with externally-loaded values (the edit record).
    pub fn values(mut self, values: FormValues) -> Self {
        self.controller.hydrate(&values);
        self
    }

    /// Sets the submission mode: `true` routes valid submissions to the edit
    /// handler. Never inferred from the data.
    pub fn edit(mut self, is_edit: bool) -> Self {
        self.is_edit = is_edit;
        self
    }

    /// Sets the create handler.
    pub fn on_submit<F>(mut self, handler: F) -> Self
    where
        F: FnMut(FormValues) -> SubmitFuture + Send + 'static,
    {
        self.on_submit = Some(Box::new(handler));
        self
    }

    /// Sets a synchronous create handler, normalized to the async path.
    pub fn on_submit_sync<F>(self, mut f: F) -> Self
    where
        F: FnMut(FormValues) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_submit(move |values| {
            let result = f(values);
            let future: SubmitFuture = Box::pin(std::future::ready(result));
            future
        })
    }

    /// Sets the edit handler.
    pub fn on_submit_edit<F>(mut self, handler: F) -> Self
    where
        F: FnMut(FormValues) -> SubmitFuture + Send + 'static,
    {
        self.on_submit_edit = Some(Box::new(handler));
        self
    }

    /// Sets a synchronous edit handler, normalized to the async path.
    pub fn on_submit_edit_sync<F>(self, mut f: F) -> Self
    where
        F: FnMut(FormValues) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_submit_edit(move |values| {
            let result = f(values);
            let future: SubmitFuture = Box::pin(std::future::ready(result));
            future
        })
    }

    /// Sets the submit button label.
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Sets the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the number of options a select shows at once.
    pub fn select_height(mut self, height: usize) -> Self {
        self.select_height = height.max(1);
        self
    }

    /// Returns the state controller (values, errors, schema).
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Returns the submission state.
    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Returns whether the form routes to the edit handler.
    pub fn is_edit(&self) -> bool {
        self.is_edit
    }

    /// Late hydration on a mounted form. See [`FormController::hydrate`].
    pub fn hydrate(&mut self, values: &FormValues) {
        self.controller.hydrate(values);
        // The focused field's edit buffer may now be stale.
        self.edit_buffer = None;
    }

    /// Updates one field's value. See [`FormController::set_value`].
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.controller.set_value(name, value);
    }

    /// Installs a late-arriving option list. See
    /// [`FormController::set_options`].
    pub fn set_options(&mut self, name: &str, options: Vec<SelectOption>) {
        self.controller.set_options(name, options);
    }

    /// Validates every field now. See [`FormController::validate`].
    pub fn validate(&mut self) -> &BTreeMap<String, String> {
        self.controller.validate()
    }

    // --- focus -----------------------------------------------------------

    fn focusable(&self) -> Vec<usize> {
        self.controller
            .schema()
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.hidden && !f.disabled)
            .map(|(i, _)| i)
            .collect()
    }

    fn focused_schema_index(&self) -> Option<usize> {
        self.focusable().get(self.focus).copied()
    }

    /// Returns the focused field, if any.
    pub fn focused_field(&self) -> Option<&FieldSchema> {
        let index = self.focused_schema_index()?;
        self.controller.schema().fields().get(index)
    }

    fn focused_id(&self) -> Option<(String, FieldKind)> {
        self.focused_field().map(|f| (f.name.clone(), f.kind))
    }

    fn focused_value(&self) -> Option<&FieldValue> {
        let (name, _) = self.focused_id()?;
        self.controller.value(&name)
    }

    /// Runs the blur-time validation pass on the focused field and drops its
    /// edit buffer.
    fn blur_focused(&mut self) {
        if let Some((name, _)) = self.focused_id() {
            self.controller.validate_field(&name);
        }
        self.edit_buffer = None;
    }

    fn focus_next_wrapping(&mut self) {
        self.blur_focused();
        let count = self.focusable().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    fn focus_prev(&mut self) {
        self.blur_focused();
        self.focus = self.focus.saturating_sub(1);
    }

    fn is_last_focused(&self) -> bool {
        let count = self.focusable().len();
        count == 0 || self.focus + 1 >= count
    }

    // --- key dispatch ----------------------------------------------------

    /// Routes one terminal key event.
    ///
    /// Tab/enter move forward (enter on the last field requests submission),
    /// shift-tab moves back, esc/ctrl+c reports an abort, ctrl+s requests
    /// submission from anywhere. Everything else is dispatched to the focused
    /// field by kind. Only press events are processed.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Ignored;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
            return KeyOutcome::Aborted;
        }
        if ctrl && key.code == KeyCode::Char('s') {
            self.blur_focused();
            return KeyOutcome::SubmitRequested;
        }

        match key.code {
            KeyCode::BackTab => {
                self.focus_prev();
                KeyOutcome::Handled
            }
            KeyCode::Tab => {
                self.focus_next_wrapping();
                KeyOutcome::Handled
            }
            KeyCode::Enter => {
                if self.is_last_focused() {
                    self.blur_focused();
                    KeyOutcome::SubmitRequested
                } else {
                    self.focus_next_wrapping();
                    KeyOutcome::Handled
                }
            }
            _ => self.edit_focused(&key),
        }
    }

    fn edit_focused(&mut self, key: &KeyEvent) -> KeyOutcome {
        let Some((name, kind)) = self.focused_id() else {
            return KeyOutcome::Ignored;
        };
        match kind {
            FieldKind::Text | FieldKind::TextArea => self.edit_text(&name, kind, key),
            FieldKind::Number => self.edit_number(&name, key),
            FieldKind::File => self.edit_file(&name, key),
            FieldKind::Select => self.edit_select(&name, key),
            FieldKind::Checkbox => self.edit_checkbox(&name, key),
        }
    }

    fn edit_text(&mut self, name: &str, kind: FieldKind, key: &KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if kind == FieldKind::TextArea && ctrl && key.code == KeyCode::Char('j') {
            self.push_text(name, '\n');
            return KeyOutcome::Handled;
        }
        match key.code {
            KeyCode::Char(c) if !ctrl => {
                self.push_text(name, c);
                KeyOutcome::Handled
            }
            KeyCode::Backspace => {
                self.pop_text(name);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn push_text(&mut self, name: &str, c: char) {
        let mut text = self
            .controller
            .value(name)
            .and_then(FieldValue::as_str)
            .unwrap_or("")
            .to_string();
        text.push(c);
        self.controller.set_value(name, FieldValue::Text(text));
    }

    fn pop_text(&mut self, name: &str) {
        let mut text = self
            .controller
            .value(name)
            .and_then(FieldValue::as_str)
            .unwrap_or("")
            .to_string();
        text.pop();
        self.controller.set_value(name, FieldValue::Text(text));
    }

    fn edit_number(&mut self, name: &str, key: &KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char(c) if !ctrl && (c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) => {
                self.buffer_mut().push(c);
                self.commit_number(name);
                KeyOutcome::Handled
            }
            KeyCode::Backspace => {
                self.buffer_mut().pop();
                self.commit_number(name);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Coerces the edit buffer to a number before storage. Partial entries
    /// such as `-` or `3.` that do not parse yet store `Empty`.
    fn commit_number(&mut self, name: &str) {
        let value = self
            .edit_buffer
            .as_deref()
            .unwrap_or("")
            .trim()
            .parse::<f64>()
            .map_or(FieldValue::Empty, FieldValue::Number);
        self.controller.set_value(name, value);
    }

    fn edit_file(&mut self, name: &str, key: &KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char(c) if !ctrl => {
                self.buffer_mut().push(c);
                self.commit_file(name);
                KeyOutcome::Handled
            }
            KeyCode::Backspace => {
                self.buffer_mut().pop();
                self.commit_file(name);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Stores a file reference, not display text.
    fn commit_file(&mut self, name: &str) {
        let buffer = self.edit_buffer.as_deref().unwrap_or("");
        let value = if buffer.is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::File(PathBuf::from(buffer))
        };
        self.controller.set_value(name, value);
    }

    fn edit_select(&mut self, name: &str, key: &KeyEvent) -> KeyOutcome {
        let value = {
            let Some(field) = self.controller.schema().field(name) else {
                return KeyOutcome::Ignored;
            };
            let options = &field.options;
            if options.is_empty() {
                return KeyOutcome::Ignored;
            }
            let current = self
                .controller
                .value(name)
                .and_then(FieldValue::as_str)
                .and_then(|v| options.iter().position(|o| o.value == v));
            // `None` is the "Select..." sentinel above the first option.
            let target = match key.code {
                KeyCode::Down => Some(current.map_or(0, |i| (i + 1).min(options.len() - 1))),
                KeyCode::Up => match current {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                },
                _ => return KeyOutcome::Ignored,
            };
            match target.and_then(|i| options.get(i)) {
                Some(option) => FieldValue::Text(option.value.clone()),
                None => FieldValue::Empty,
            }
        };
        self.controller.set_value(name, value);
        KeyOutcome::Handled
    }

    fn edit_checkbox(&mut self, name: &str, key: &KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                let checked = matches!(self.controller.value(name), Some(FieldValue::Bool(true)));
                self.controller.set_value(name, FieldValue::Bool(!checked));
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// The in-progress text for the focused number/file field, seeded from
    /// its current value.
    fn buffer_mut(&mut self) -> &mut String {
        let seed = match self.focused_value() {
            Some(FieldValue::Number(n)) => fmt_number(*n),
            Some(FieldValue::File(path)) => path.display().to_string(),
            _ => String::new(),
        };
        self.edit_buffer.get_or_insert(seed)
    }

    // --- submission ------------------------------------------------------

    /// Starts a submission: validates, bifurcates on the mode and invokes the
    /// matching handler.
    ///
    /// Returns `Ok(None)` when no handler will run: either validation failed
    /// (errors are in the controller's map) or a submission is already in
    /// flight (the re-entrancy guard). Returns a [`SubmitJob`] otherwise;
    /// await it and feed the result to [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<Option<SubmitJob>> {
        if self.state == SubmitState::Submitting {
            tracing::debug!("submit request ignored: already submitting");
            return Ok(None);
        }
        if !self.controller.validate().is_empty() {
            return Ok(None);
        }

        let mode = if self.is_edit {
            SubmitMode::Edit
        } else {
            SubmitMode::Create
        };
        let values = self.controller.values().clone();
        let handler = match mode {
            SubmitMode::Create => self
                .on_submit
                .as_mut()
                .ok_or(SubmitError::MissingSubmitHandler)?,
            SubmitMode::Edit => self
                .on_submit_edit
                .as_mut()
                .ok_or(SubmitError::MissingEditHandler)?,
        };
        let future = handler(values);

        self.state = SubmitState::Submitting;
        tracing::debug!(?mode, "submission started");
        Ok(Some(SubmitJob { mode, future }))
    }

    /// Completes a submission started with [`begin_submit`](Self::begin_submit).
    ///
    /// Success resets the form to its defaults and moves focus back to the
    /// first field. Failure leaves every entered value intact so the user can
    /// correct and retry; surfacing the error is the caller's responsibility.
    pub fn finish_submit(&mut self, result: &anyhow::Result<()>) {
        if self.state != SubmitState::Submitting {
            tracing::debug!("finish_submit without an active submission");
            return;
        }
        self.state = SubmitState::Idle;
        match result {
            Ok(()) => {
                self.controller.reset();
                self.focus = 0;
                self.edit_buffer = None;
                tracing::debug!("submission succeeded");
            }
            Err(error) => {
                tracing::debug!(%error, "submission failed");
            }
        }
    }

    /// Runs a full submission: validate, invoke the mode's handler, await it,
    /// then reset on success.
    ///
    /// Handler errors propagate unswallowed; the values survive them.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.state == SubmitState::Submitting {
            return Ok(SubmitOutcome::InFlight);
        }
        let Some(job) = self.begin_submit()? else {
            return Ok(SubmitOutcome::Invalid);
        };
        let mode = job.mode();
        let result = job.run().await;
        self.finish_submit(&result);
        result.map_err(SubmitError::Handler)?;
        Ok(SubmitOutcome::Submitted(mode))
    }

    // --- rendering -------------------------------------------------------

    /// Renders the whole form: every visible field with its bound value and
    /// inline error, then the submit control reflecting the submission state.
    pub fn view(&self) -> String {
        let focused_index = self.focused_schema_index();
        let mut out = String::new();
        let mut first = true;
        for (index, field) in self.controller.schema().fields().iter().enumerate() {
            if field.hidden {
                continue;
            }
            if !first {
                out.push_str(&self.theme.field_separator);
            }
            first = false;
            self.render_field(field, focused_index == Some(index), &mut out);
        }
        if !first {
            out.push_str(&self.theme.field_separator);
        }
        self.render_button(&mut out);
        out
    }

    fn render_field(&self, field: &FieldSchema, focused: bool, out: &mut String) {
        let styles = if focused {
            &self.theme.focused
        } else {
            &self.theme.blurred
        };

        if !field.label.is_empty() && field.kind != FieldKind::Checkbox {
            out.push_str(&styles.label.apply(&field.label).to_string());
            out.push('\n');
        }
        if !field.description.is_empty() {
            out.push_str(&styles.description.apply(&field.description).to_string());
            out.push('\n');
        }

        let value = self.controller.value(&field.name);
        match field.kind {
            FieldKind::Text | FieldKind::TextArea | FieldKind::Number | FieldKind::File => {
                self.render_input(field, value, focused, styles, out);
            }
            FieldKind::Select => self.render_select(field, value, styles, out),
            FieldKind::Checkbox => Self::render_checkbox(field, value, styles, out),
        }

        if let Some(message) = self.controller.error(&field.name) {
            out.push('\n');
            out.push_str(&styles.error.apply(format!("* {message}")).to_string());
        }
    }

    fn render_input(
        &self,
        field: &FieldSchema,
        value: Option<&FieldValue>,
        focused: bool,
        styles: &FieldStyles,
        out: &mut String,
    ) {
        let display = if focused && field.kind != FieldKind::Text && field.kind != FieldKind::TextArea
        {
            // Number/file edits go through a text buffer; show the partial
            // entry ("3.") rather than its committed coercion.
            self.edit_buffer.clone()
        } else {
            None
        };
        let display = display.unwrap_or_else(|| match value {
            Some(FieldValue::Text(s)) => s.clone(),
            Some(FieldValue::Number(n)) => fmt_number(*n),
            Some(FieldValue::File(path)) => path.display().to_string(),
            _ => String::new(),
        });

        out.push_str(&styles.prompt.apply("> ").to_string());
        if display.is_empty() {
            out.push_str(&styles.placeholder.apply(&field.placeholder).to_string());
        } else {
            let content = if field.disabled {
                styles.disabled.apply(display.replace('\n', "\n  "))
            } else {
                styles.value.apply(display.replace('\n', "\n  "))
            };
            out.push_str(&content.to_string());
        }
    }

    fn render_select(
        &self,
        field: &FieldSchema,
        value: Option<&FieldValue>,
        styles: &FieldStyles,
        out: &mut String,
    ) {
        let chosen = value
            .and_then(FieldValue::as_str)
            .and_then(|v| field.options.iter().position(|o| o.value == v));

        if chosen.is_none() {
            let sentinel = if field.placeholder.is_empty() {
                "Select..."
            } else {
                &field.placeholder
            };
            out.push_str(&styles.select_cursor.apply("> ").to_string());
            out.push_str(&styles.placeholder.apply(sentinel).to_string());
            out.push('\n');
        }

        let height = self.select_height;
        let start = chosen.map_or(0, |i| if i < height { 0 } else { i + 1 - height });
        for (i, option) in field.options.iter().enumerate().skip(start).take(height) {
            if chosen == Some(i) {
                out.push_str(&styles.select_cursor.apply("> ").to_string());
                out.push_str(&styles.selected_option.apply(&option.label).to_string());
            } else {
                out.push_str("  ");
                out.push_str(&styles.option.apply(&option.label).to_string());
            }
            out.push('\n');
        }
        out.pop();
    }

    fn render_checkbox(
        field: &FieldSchema,
        value: Option<&FieldValue>,
        styles: &FieldStyles,
        out: &mut String,
    ) {
        let checked = matches!(value, Some(FieldValue::Bool(true)));
        let glyph = if checked { "[x] " } else { "[ ] " };
        out.push_str(&styles.prompt.apply(glyph).to_string());
        if !field.label.is_empty() {
            let label = if field.disabled {
                styles.disabled.apply(&field.label)
            } else {
                styles.label.apply(&field.label)
            };
            out.push_str(&label.to_string());
        }
    }

    fn render_button(&self, out: &mut String) {
        let (style, label) = if self.state == SubmitState::Submitting {
            (&self.theme.submit_button_disabled, "Submitting...")
        } else {
            (&self.theme.submit_button, self.submit_label.as_str())
        };
        out.push_str(&style.apply(format!("[ {label} ]")).to_string());
    }
}

// -----------------------------------------------------------------------------
// Validators
// -----------------------------------------------------------------------------

/// Fails on empty or whitespace-only values.
///
/// Usually redundant with `required(true)`; useful as a custom rule on fields
/// that are optional-but-not-blank.
pub fn non_blank(value: &FieldValue) -> Option<String> {
    if value.is_empty() {
        Some("must not be blank".to_string())
    } else {
        None
    }
}

/// Validates email format. Empty values pass; pair with `required(true)` to
/// also demand presence.
pub fn email(value: &FieldValue) -> Option<String> {
    let s = match value.as_str() {
        Some(s) if !s.trim().is_empty() => s,
        _ => return None,
    };
    // Must have @ with something before and after, and a dot in the domain.
    let parts: Vec<&str> = s.split('@').collect();
    if parts.len() != 2 {
        return Some("invalid email address".to_string());
    }
    let (local, domain) = (parts[0], parts[1]);
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Some("invalid email address".to_string());
    }
    let domain_parts: Vec<&str> = domain.split('.').collect();
    if domain_parts.len() < 2 || domain_parts.iter().any(|p| p.is_empty()) {
        return Some("invalid email address".to_string());
    }
    None
}

/// Fails on zero or negative numbers. Empty values pass.
pub fn positive_number(value: &FieldValue) -> Option<String> {
    match value.as_number() {
        Some(n) if n <= 0.0 => Some("must be positive".to_string()),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
