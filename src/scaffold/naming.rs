//! Name derivation for generated artifacts
//!
//! All class names, variable names, and table names are pure functions of
//! one [`NamingContext`]. Derivation rules:
//!
//! - class form: `PascalCase` of the entity name
//! - variable form: the entity name lowercased verbatim
//! - table form: the table name lowercased verbatim, no word splitting
//!
//! The same rules apply whether the entity is the singular model name or a
//! caller-supplied plural table name.

use convert_case::{Case, Casing};

use crate::error::ScaffoldError;

/// Model and table names an invocation operates on. Read-only once built;
/// every renderer receives it by shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingContext {
    model_name: String,
    table_name: String,
}

impl NamingContext {
    /// Build a context from a model name and an optional table name.
    /// The table name defaults to the model name.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidModelName`] when the model name does
    /// not start with an uppercase letter.
    pub fn new(model_name: &str, table_name: Option<&str>) -> Result<Self, ScaffoldError> {
        if !model_name.chars().next().is_some_and(char::is_uppercase) {
            return Err(ScaffoldError::InvalidModelName(model_name.to_string()));
        }

        Ok(Self {
            model_name: model_name.to_string(),
            table_name: table_name.unwrap_or(model_name).to_string(),
        })
    }

    /// Model name as supplied.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Class form of the model name (`UserProfile`).
    #[must_use]
    pub fn model_class(&self) -> String {
        self.model_name.to_case(Case::Pascal)
    }

    /// Variable form of the model name (`userprofile`).
    #[must_use]
    pub fn model_var(&self) -> String {
        self.model_name.to_lowercase()
    }

    /// Table form of the table name (`posts`).
    #[must_use]
    pub fn table(&self) -> String {
        self.table_name.to_lowercase()
    }

    /// Controller class name (`PostController`).
    #[must_use]
    pub fn controller_class(&self) -> String {
        format!("{}Controller", self.model_class())
    }

    /// API resource class name (`PostResource`).
    #[must_use]
    pub fn resource_class(&self) -> String {
        format!("{}Resource", self.model_class())
    }

    /// Seeder class name (`PostTableSeeder`).
    #[must_use]
    pub fn seeder_class(&self) -> String {
        format!("{}TableSeeder", self.model_class())
    }

    /// Factory class name (`PostFactory`).
    #[must_use]
    pub fn factory_class(&self) -> String {
        format!("{}Factory", self.model_class())
    }

    /// Test class name (`PostTest`).
    #[must_use]
    pub fn test_class(&self) -> String {
        format!("{}Test", self.model_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_defaults_to_model_name() {
        let ctx = NamingContext::new("Post", None).unwrap();
        assert_eq!(ctx.table(), "post");
    }

    #[test]
    fn test_supplied_table_name_is_lowercased_verbatim() {
        let ctx = NamingContext::new("Post", Some("Posts")).unwrap();
        assert_eq!(ctx.table(), "posts");
    }

    #[test]
    fn test_class_forms() {
        let ctx = NamingContext::new("UserProfile", None).unwrap();
        assert_eq!(ctx.model_class(), "UserProfile");
        assert_eq!(ctx.controller_class(), "UserProfileController");
        assert_eq!(ctx.resource_class(), "UserProfileResource");
        assert_eq!(ctx.seeder_class(), "UserProfileTableSeeder");
        assert_eq!(ctx.factory_class(), "UserProfileFactory");
        assert_eq!(ctx.test_class(), "UserProfileTest");
    }

    #[test]
    fn test_variable_form_lowercases_verbatim() {
        let ctx = NamingContext::new("UserProfile", None).unwrap();
        assert_eq!(ctx.model_var(), "userprofile");
        assert_eq!(ctx.table(), "userprofile");
    }

    #[test]
    fn test_rejects_lowercase_model_name() {
        assert!(NamingContext::new("post", None).is_err());
        assert!(NamingContext::new("", None).is_err());
    }
}
