//! Schema string parsing and field projection
//!
//! A schema string is a comma-separated list of field tokens, each optionally
//! colon-separated into `name[:type[:modifier...]]`:
//!
//! ```text
//! title:string, body:text, views:integer, published:boolean:nullable
//! ```
//!
//! Parsing is strict: an empty token (produced by a leading, trailing, or
//! doubled comma) or an empty colon segment is rejected before anything is
//! rendered or written. A token with only a name defaults its type to
//! `string`.

use crate::error::ScaffoldError;

/// Column names the projector never renders. Frameworks manage these
/// themselves (primary/foreign keys, timestamps, soft deletes), so templates
/// supply them where needed instead of taking them from user input.
const RESERVED_NAMES: [&str; 3] = ["deleted_at", "created_at", "updated_at"];

/// Type assumed for a field token that carries no explicit type.
pub const DEFAULT_FIELD_TYPE: &str = "string";

/// One parsed field: name, type, and any trailing modifiers, in the order
/// they were written. Immutable after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name as written in the schema string
    pub name: String,
    /// Type token (`string`, `integer`, ...), defaulted when omitted
    pub ty: String,
    /// Remaining colon segments (`nullable`, `unique`, ...)
    pub modifiers: Vec<String>,
}

impl FieldDescriptor {
    /// Whether this field is excluded from every rendered field list.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.name.ends_with("_id") || RESERVED_NAMES.contains(&self.name.as_str())
    }

    /// Whether the column admits NULL / the struct field is an `Option`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| m == "nullable" || m == "optional")
    }

    /// Whether the column carries a UNIQUE constraint.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.modifiers.iter().any(|m| m == "unique")
    }

    /// Rust type for the generated struct member.
    #[must_use]
    pub fn rust_type(&self) -> &'static str {
        match self.ty.as_str() {
            "text" => "String",
            "integer" | "int" | "i32" => "i32",
            "biginteger" | "bigint" | "i64" => "i64",
            "boolean" | "bool" => "bool",
            "float" | "f32" => "f32",
            "double" | "decimal" | "f64" => "f64",
            "date" => "chrono::NaiveDate",
            "datetime" => "chrono::NaiveDateTime",
            "timestamp" => "chrono::DateTime<chrono::Utc>",
            "json" => "serde_json::Value",
            "uuid" => "uuid::Uuid",
            // "string" and anything unrecognized
            _ => "String",
        }
    }

    /// SQL column type for the generated migration. Unrecognized type tokens
    /// pass through uppercased rather than failing, since the parser accepts
    /// open-ended types.
    #[must_use]
    pub fn sql_type(&self) -> String {
        match self.ty.as_str() {
            "string" => "VARCHAR(255)".to_string(),
            "text" => "TEXT".to_string(),
            "integer" | "int" | "i32" => "INTEGER".to_string(),
            "biginteger" | "bigint" | "i64" => "BIGINT".to_string(),
            "boolean" | "bool" => "BOOLEAN".to_string(),
            "float" | "f32" => "REAL".to_string(),
            "double" | "f64" => "DOUBLE PRECISION".to_string(),
            "decimal" => "DECIMAL(12, 2)".to_string(),
            "date" => "DATE".to_string(),
            "datetime" | "timestamp" => "TIMESTAMP".to_string(),
            "json" => "JSON".to_string(),
            "uuid" => "UUID".to_string(),
            other => other.to_uppercase(),
        }
    }
}

/// Ordered sequence of parsed fields. Declaration order is preserved through
/// every projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    fields: Vec<FieldDescriptor>,
}

impl SchemaDefinition {
    /// Parse a comma-separated schema string.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MalformedSchema`] when the string is empty,
    /// a comma token is empty after trimming, or a colon segment inside a
    /// token is empty.
    pub fn parse(raw: &str) -> Result<Self, ScaffoldError> {
        if raw.trim().is_empty() {
            return Err(ScaffoldError::MalformedSchema {
                position: 1,
                reason: "schema string is empty".to_string(),
            });
        }

        let fields = raw
            .split(',')
            .enumerate()
            .map(|(idx, token)| Self::parse_token(idx + 1, token))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields })
    }

    fn parse_token(position: usize, token: &str) -> Result<FieldDescriptor, ScaffoldError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ScaffoldError::MalformedSchema {
                position,
                reason: "empty field token".to_string(),
            });
        }

        let mut segments = token.split(':').map(str::trim);
        // split always yields at least one segment
        let name = segments.next().unwrap_or_default();
        if name.is_empty() {
            return Err(ScaffoldError::MalformedSchema {
                position,
                reason: "field name is empty".to_string(),
            });
        }

        let mut ty = DEFAULT_FIELD_TYPE.to_string();
        let mut modifiers = Vec::new();
        for (i, segment) in segments.enumerate() {
            if segment.is_empty() {
                return Err(ScaffoldError::MalformedSchema {
                    position,
                    reason: format!("empty segment in '{token}'"),
                });
            }
            if i == 0 {
                ty = segment.to_string();
            } else {
                modifiers.push(segment.to_string());
            }
        }

        Ok(FieldDescriptor {
            name: name.to_string(),
            ty,
            modifiers,
        })
    }

    /// All parsed fields, reserved ones included, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Fields that survive the reserved-name filter, in declaration order.
    pub fn public_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_reserved())
    }

    /// Project non-reserved field names into template-ready quoted literals
    /// (`'title'`, `'body'`, ...). Pure; order preserved.
    #[must_use]
    pub fn project(&self) -> Vec<String> {
        self.public_fields()
            .map(|f| format!("'{}'", f.name))
            .collect()
    }
}
