//! Template store and renderer
//!
//! Templates are plain text with `{{name}}` placeholder tokens. Rendering is
//! literal substitution of every recognized token from a per-artifact
//! placeholder map; unrecognized tokens pass through untouched. That is a
//! deliberate forward-compatibility policy: a custom stub may carry tokens a
//! newer core knows how to fill, and rendering with an older core must not
//! destroy them.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::ScaffoldError;
use crate::scaffold::naming::NamingContext;
use crate::scaffold::schema::SchemaDefinition;

pub mod files;

/// Placeholder map for one artifact render. Rebuilt per artifact, never
/// shared mutable state.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    values: BTreeMap<&'static str, String>,
}

impl Placeholders {
    /// Build the full placeholder map for a context and parsed schema.
    ///
    /// Recognized tokens: `modelClass`, `modelVar`, `table`,
    /// `controllerClass`, `resourceClass`, `seederClass`, `factoryClass`,
    /// `testClass`, `fields`, `structFields`, `columns`.
    #[must_use]
    pub fn for_artifact(ctx: &NamingContext, schema: &SchemaDefinition) -> Self {
        let mut values = BTreeMap::new();
        values.insert("modelClass", ctx.model_class());
        values.insert("modelVar", ctx.model_var());
        values.insert("table", ctx.table());
        values.insert("controllerClass", ctx.controller_class());
        values.insert("resourceClass", ctx.resource_class());
        values.insert("seederClass", ctx.seeder_class());
        values.insert("factoryClass", ctx.factory_class());
        values.insert("testClass", ctx.test_class());
        values.insert("fields", schema.project().join(","));
        values.insert("structFields", struct_fields(schema));
        values.insert("columns", sql_columns(schema));
        Self { values }
    }

    /// Substitute every recognized token in `body`. Unknown tokens are left
    /// in place. One pass over the body: substituted values are emitted
    /// verbatim and never rescanned, so a value containing `{{...}}` text
    /// cannot trigger a second substitution.
    #[must_use]
    pub fn render(&self, body: &str) -> String {
        let mut rendered = String::with_capacity(body.len());
        let mut rest = body;

        while let Some(start) = rest.find("{{") {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                // unterminated opener; emit it and move on
                rendered.push_str("{{");
                rest = after;
                continue;
            };

            let token = &after[..end];
            if let Some(value) = self.values.get(token) {
                rendered.push_str(value);
            } else {
                rendered.push_str("{{");
                rendered.push_str(token);
                rendered.push_str("}}");
            }
            rest = &after[end + 2..];
        }

        rendered.push_str(rest);
        rendered
    }
}

/// Rust struct member lines for the non-reserved fields, one per line,
/// indented and comma-terminated.
fn struct_fields(schema: &SchemaDefinition) -> String {
    schema
        .public_fields()
        .map(|f| {
            let ty = if f.is_nullable() {
                format!("Option<{}>", f.rust_type())
            } else {
                f.rust_type().to_string()
            };
            format!("    pub {}: {ty},", f.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// SQL column definition lines for the non-reserved fields. The migration
/// stub supplies `id`, `created_at`, and `updated_at` itself.
fn sql_columns(schema: &SchemaDefinition) -> String {
    schema
        .public_fields()
        .map(|f| {
            let mut line = format!("    {} {}", f.name, f.sql_type());
            if !f.is_nullable() {
                line.push_str(" NOT NULL");
            }
            if f.is_unique() {
                line.push_str(" UNIQUE");
            }
            line.push(',');
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Template store: built-in bodies keyed by template id, optionally shadowed
/// by `<templateId>.stub` files in an override directory.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    override_dir: Option<PathBuf>,
}

impl TemplateStore {
    /// Store with built-in templates only.
    #[must_use]
    pub const fn builtin() -> Self {
        Self { override_dir: None }
    }

    /// Store that checks `dir` for `<templateId>.stub` overrides before
    /// falling back to the built-in body.
    #[must_use]
    pub fn with_override_dir(dir: Option<PathBuf>) -> Self {
        Self { override_dir: dir }
    }

    /// Fetch the template body for `template_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnknownTemplate`] when the id has neither a
    /// built-in body nor a readable override file.
    pub fn body(&self, template_id: &str) -> Result<Cow<'static, str>, ScaffoldError> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(format!("{template_id}.stub"));
            if path.is_file() {
                if let Ok(body) = fs::read_to_string(&path) {
                    return Ok(Cow::Owned(body));
                }
            }
        }

        match template_id {
            "model" => Ok(Cow::Borrowed(files::MODEL_STUB)),
            "controller" => Ok(Cow::Borrowed(files::CONTROLLER_STUB)),
            "seeder" => Ok(Cow::Borrowed(files::SEEDER_STUB)),
            "migration" => Ok(Cow::Borrowed(files::MIGRATION_STUB)),
            "resource" => Ok(Cow::Borrowed(files::RESOURCE_STUB)),
            "factory" => Ok(Cow::Borrowed(files::FACTORY_STUB)),
            "test" => Ok(Cow::Borrowed(files::TEST_STUB)),
            other => Err(ScaffoldError::UnknownTemplate(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::planner::ArtifactKind;

    fn fixtures() -> (NamingContext, SchemaDefinition) {
        let ctx = NamingContext::new("Post", Some("Posts")).unwrap();
        let schema =
            SchemaDefinition::parse("title:string, views:integer, user_id:integer").unwrap();
        (ctx, schema)
    }

    #[test]
    fn test_render_substitutes_known_tokens() {
        let (ctx, schema) = fixtures();
        let placeholders = Placeholders::for_artifact(&ctx, &schema);

        let rendered = placeholders.render("pub struct {{modelClass}}; // {{table}}");
        assert_eq!(rendered, "pub struct Post; // posts");
    }

    #[test]
    fn test_render_leaves_unknown_tokens_untouched() {
        let (ctx, schema) = fixtures();
        let placeholders = Placeholders::for_artifact(&ctx, &schema);

        let rendered = placeholders.render("{{modelClass}} uses {{futureToken}}");
        assert_eq!(rendered, "Post uses {{futureToken}}");
    }

    #[test]
    fn test_substituted_values_are_never_rescanned() {
        let ctx = NamingContext::new("Post", None).unwrap();
        // a field whose name spells a token must come through literally
        let schema = SchemaDefinition::parse("{{table}}:string").unwrap();
        let placeholders = Placeholders::for_artifact(&ctx, &schema);

        let rendered = placeholders.render("[{{fields}}] {{table}}");
        assert_eq!(rendered, "['{{table}}'] post");
    }

    #[test]
    fn test_render_tolerates_unterminated_opener() {
        let (ctx, schema) = fixtures();
        let placeholders = Placeholders::for_artifact(&ctx, &schema);

        assert_eq!(placeholders.render("{{modelClass}} {{oops"), "Post {{oops");
    }

    #[test]
    fn test_fields_token_is_quoted_and_filtered() {
        let (ctx, schema) = fixtures();
        let placeholders = Placeholders::for_artifact(&ctx, &schema);

        let rendered = placeholders.render("[{{fields}}]");
        assert_eq!(rendered, "['title','views']");
    }

    #[test]
    fn test_struct_fields_respect_nullability() {
        let ctx = NamingContext::new("Post", None).unwrap();
        let schema = SchemaDefinition::parse("title:string, rank:integer:nullable").unwrap();
        let placeholders = Placeholders::for_artifact(&ctx, &schema);

        let rendered = placeholders.render("{{structFields}}");
        assert_eq!(
            rendered,
            "    pub title: String,\n    pub rank: Option<i32>,"
        );
    }

    #[test]
    fn test_columns_carry_constraints() {
        let ctx = NamingContext::new("User", None).unwrap();
        let schema = SchemaDefinition::parse("email:string:unique, bio:text:nullable").unwrap();
        let placeholders = Placeholders::for_artifact(&ctx, &schema);

        let rendered = placeholders.render("{{columns}}");
        assert_eq!(
            rendered,
            "    email VARCHAR(255) NOT NULL UNIQUE,\n    bio TEXT,"
        );
    }

    #[test]
    fn test_builtin_store_covers_every_kind() {
        let store = TemplateStore::builtin();
        for kind in ArtifactKind::CANONICAL_ORDER {
            assert!(store.body(kind.template_id()).is_ok());
        }
    }

    #[test]
    fn test_unknown_template_id_is_rejected() {
        let store = TemplateStore::builtin();
        assert!(store.body("view").is_err());
    }

    #[test]
    fn test_override_dir_shadows_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model.stub"), "custom {{modelClass}}").unwrap();

        let store = TemplateStore::with_override_dir(Some(dir.path().to_path_buf()));
        assert_eq!(store.body("model").unwrap(), "custom {{modelClass}}");
        // ids without an override still resolve to the built-in body
        assert_eq!(store.body("seeder").unwrap(), files::SEEDER_STUB);
    }

    #[test]
    fn test_rendered_migration_has_no_reserved_columns() {
        let ctx = NamingContext::new("Post", None).unwrap();
        let schema = SchemaDefinition::parse("title, user_id:integer").unwrap();
        let placeholders = Placeholders::for_artifact(&ctx, &schema);

        let rendered = placeholders.render(files::MIGRATION_STUB);
        assert!(rendered.contains("CREATE TABLE post"));
        assert!(rendered.contains("title VARCHAR(255) NOT NULL"));
        assert!(!rendered.contains("user_id"));
        // the template supplies the timestamps itself
        assert!(rendered.contains("created_at TIMESTAMP NOT NULL"));
    }
}
