//! Built-in template bodies
//!
//! One stub per artifact kind, compiled into the binary. Placeholders use
//! `{{name}}` tokens; anything the renderer does not recognize is left in
//! place, so custom stubs may carry tokens a newer core fills in.

/// Model stub
pub const MODEL_STUB: &str = r#"//! {{modelClass}} model backed by the `{{table}}` table.

use serde::{Deserialize, Serialize};

/// One row of the `{{table}}` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct {{modelClass}} {
    pub id: i64,
{{structFields}}
}

impl {{modelClass}} {
    /// Table backing this model.
    pub const TABLE: &'static str = "{{table}}";

    /// Columns populated from user input, in declaration order.
    pub const FILLABLE: &'static str = "{{fields}}";
}
"#;

/// Controller stub
pub const CONTROLLER_STUB: &str = r#"//! HTTP endpoints for {{modelClass}} records.

/// CRUD endpoints for `{{modelVar}}` records, rendered through
/// `{{resourceClass}}`.
pub struct {{controllerClass}};

impl {{controllerClass}} {
    /// GET /{{table}}
    pub fn index() {
        todo!("list {{modelVar}} records")
    }

    /// GET /{{table}}/{id}
    pub fn show(id: i64) {
        todo!("render {{resourceClass}} for {{modelVar}} {id}")
    }

    /// POST /{{table}}
    pub fn store() {
        todo!("validate and persist a new {{modelClass}}")
    }

    /// PUT /{{table}}/{id}
    pub fn update(id: i64) {
        todo!("update {{modelVar}} {id}")
    }

    /// DELETE /{{table}}/{id}
    pub fn destroy(id: i64) {
        todo!("delete {{modelVar}} {id}")
    }
}
"#;

/// Seeder stub
pub const SEEDER_STUB: &str = r#"//! Seed data for the `{{table}}` table.

/// Inserts starter rows into `{{table}}`.
pub struct {{seederClass}};

impl {{seederClass}} {
    /// Columns this seeder populates, in declaration order.
    pub const COLUMNS: &'static str = "{{fields}}";

    /// Insert seed rows for {{modelClass}}.
    pub fn run() {
        todo!("insert starter rows into {{table}}")
    }
}
"#;

/// Migration stub (SQL)
pub const MIGRATION_STUB: &str = r"-- Create the {{table}} table.

CREATE TABLE {{table}} (
    id BIGINT PRIMARY KEY,
{{columns}}
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);
";

/// API resource stub
pub const RESOURCE_STUB: &str = r#"//! API representation of {{modelClass}} records.

use serde::Serialize;

/// Serializable view of a {{modelClass}}, returned by {{controllerClass}}.
#[derive(Debug, Serialize)]
pub struct {{resourceClass}} {
    pub id: i64,
{{structFields}}
}
"#;

/// Factory stub
pub const FACTORY_STUB: &str = r#"//! Test-data factory for {{modelClass}}.

/// Builds {{modelClass}} values for tests and seeders.
pub struct {{factoryClass}};

impl {{factoryClass}} {
    /// One {{modelVar}} with placeholder data.
    pub fn make() {
        todo!("construct a {{modelClass}} with test data")
    }
}
"#;

/// Feature test stub
pub const TEST_STUB: &str = r#"//! Feature tests for {{modelClass}}.

#[test]
fn {{modelVar}}_can_be_created() {
    todo!("build a {{modelClass}} via {{factoryClass}} and assert it persists to {{table}}");
}

#[test]
fn {{modelVar}}_can_be_deleted() {
    todo!("delete a {{modelClass}} and assert it is gone from {{table}}");
}
"#;
