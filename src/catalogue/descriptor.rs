use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde_json::{json, Map};

/// Primitive type of an operation argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    /// Array of strings
    StringArray,
    /// Either a number or a string
    NumberOrString,
}

impl FieldType {
    fn schema(self) -> JsonValue {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Number => json!({ "type": "number" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
            Self::NumberOrString => json!({ "oneOf": [{ "type": "number" }, { "type": "string" }] }),
        }
    }
}

/// One declared argument of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub description: Option<&'static str>,
}

/// A named operation with its ordered argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl OperationDescriptor {
    pub(crate) fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            fields: Vec::new(),
        }
    }

    pub(crate) fn required(
        self,
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        self.field(name, field_type, true, Some(description))
    }

    pub(crate) fn optional(
        self,
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        self.field(name, field_type, false, Some(description))
    }

    /// Optional field without a description
    pub(crate) fn bare(self, name: &'static str, field_type: FieldType) -> Self {
        self.field(name, field_type, false, None)
    }

    fn field(
        mut self,
        name: &'static str,
        field_type: FieldType,
        required: bool,
        description: Option<&'static str>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name,
            field_type,
            required,
            description,
        });
        self
    }

    /// Names of the required fields, in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// JSON Schema of the argument object
    pub fn input_schema(&self) -> JsonValue {
        let mut properties = Map::new();
        for field in &self.fields {
            let mut schema = field.field_type.schema();
            if let (Some(description), Some(obj)) = (field.description, schema.as_object_mut()) {
                obj.insert("description".to_string(), json!(description));
            }
            properties.insert(field.name.to_string(), schema);
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_fields().collect::<Vec<_>>(),
        })
    }

    /// The descriptor as advertised to protocol clients
    pub fn tool_definition(&self) -> JsonValue {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    /// Check that every required field is present and not null.
    ///
    /// Fails on the first missing field in declaration order.
    pub fn validate(&self, args: &JsonValue) -> Result<()> {
        let object = args
            .as_object()
            .ok_or_else(|| Error::validation("Arguments must be a JSON object"))?;

        for name in self.required_fields() {
            match object.get(name) {
                None | Some(JsonValue::Null) => return Err(Error::missing_field(name)),
                Some(_) => {}
            }
        }
        Ok(())
    }
}
