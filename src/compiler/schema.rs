//! Input schemas for compiled tools.
//!
//! Every rule is optional: a missing key or a `null` value always passes.

use schemars::schema::{
    ArrayValidation, InstanceType, ObjectValidation, Schema, SchemaObject, SingleOrVec,
};
use serde_json::Value;

use crate::catalog::{HttpMethod, Parameter, SchemaType};

/// Validation rule for a single input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    String,
    Number,
    Boolean,
    /// A sequence of strings
    StringList,
    /// A free-form JSON object
    Object,
    /// Accepts any value
    Unknown,
}

impl FieldRule {
    /// Maps a declared parameter type to its rule.
    pub fn for_type(kind: SchemaType) -> Self {
        match kind {
            SchemaType::String => FieldRule::String,
            SchemaType::Number => FieldRule::Number,
            SchemaType::Boolean => FieldRule::Boolean,
            SchemaType::Array => FieldRule::StringList,
            SchemaType::Object => FieldRule::Object,
        }
    }

    /// Human-readable name of what the rule accepts.
    pub fn expected(self) -> &'static str {
        match self {
            FieldRule::String => "a string",
            FieldRule::Number => "a number",
            FieldRule::Boolean => "a boolean",
            FieldRule::StringList => "an array of strings",
            FieldRule::Object => "an object",
            FieldRule::Unknown => "any value",
        }
    }

    /// Whether `value` satisfies the rule.
    pub fn accepts(self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            FieldRule::String => value.is_string(),
            FieldRule::Number => value.is_number(),
            FieldRule::Boolean => value.is_boolean(),
            FieldRule::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            FieldRule::Object => value.is_object(),
            FieldRule::Unknown => true,
        }
    }

    /// The JSON Schema fragment for this rule.
    pub fn to_schema(self) -> Schema {
        let typed = |kind: InstanceType| SchemaObject {
            instance_type: Some(SingleOrVec::Single(Box::new(kind))),
            ..SchemaObject::default()
        };

        match self {
            FieldRule::String => typed(InstanceType::String).into(),
            FieldRule::Number => typed(InstanceType::Number).into(),
            FieldRule::Boolean => typed(InstanceType::Boolean).into(),
            FieldRule::Object => typed(InstanceType::Object).into(),
            FieldRule::StringList => SchemaObject {
                array: Some(Box::new(ArrayValidation {
                    items: Some(SingleOrVec::Single(Box::new(
                        typed(InstanceType::String).into(),
                    ))),
                    ..ArrayValidation::default()
                })),
                ..typed(InstanceType::Array)
            }
            .into(),
            FieldRule::Unknown => Schema::Bool(true),
        }
    }
}

/// Input rejected by an [`InputSchema`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("expected an object of named arguments")]
    NotAnObject,
    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },
}

/// Ordered field name → rule mapping.
///
/// Inserting an existing name replaces its rule but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSchema {
    fields: Vec<(String, FieldRule)>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule for `name`, returning the rule it replaced.
    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) -> Option<FieldRule> {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, rule)),
            None => {
                self.fields.push((name, rule));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<FieldRule> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, rule)| *rule)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), *rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks a tool input against the schema.
    ///
    /// `null` counts as "no arguments". Keys the schema does not declare are
    /// allowed through.
    pub fn validate(&self, input: &Value) -> Result<(), SchemaViolation> {
        let args = match input {
            Value::Null => return Ok(()),
            Value::Object(args) => args,
            _ => return Err(SchemaViolation::NotAnObject),
        };

        for (name, rule) in self.iter() {
            if let Some(value) = args.get(name) {
                if !rule.accepts(value) {
                    return Err(SchemaViolation::InvalidField {
                        field: name.to_string(),
                        expected: rule.expected(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Renders the schema as a JSON Schema object. No field is required.
    pub fn to_json_schema(&self) -> Value {
        let mut object = ObjectValidation::default();
        for (name, rule) in self.iter() {
            object.properties.insert(name.to_string(), rule.to_schema());
        }

        let schema = SchemaObject {
            instance_type: Some(SingleOrVec::Single(Box::new(InstanceType::Object))),
            object: Some(Box::new(object)),
            ..SchemaObject::default()
        };

        serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
    }
}

/// Builds the input schema for one operation.
///
/// Exposed parameters are added first in declaration order. For methods that
/// send a body, `body_fields` is applied afterwards, so a body field that
/// shares a parameter's name replaces the parameter's rule.
pub fn synthesize(
    parameters: &[Parameter],
    method: HttpMethod,
    body_fields: &[(&str, FieldRule)],
) -> InputSchema {
    let mut schema = InputSchema::new();

    for parameter in parameters.iter().filter(|p| p.location.is_exposed()) {
        schema.insert(parameter.name.as_str(), FieldRule::for_type(parameter.schema_type()));
    }

    if method.sends_body() {
        for (name, rule) in body_fields {
            schema.insert(*name, *rule);
        }
    }

    schema
}
