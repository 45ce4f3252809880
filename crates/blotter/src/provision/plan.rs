//! Provisioning plans and their rendering to SQL statements.
//!
//! A [`ProvisioningPlan`] models the whole provisioning sequence as data:
//! database, schema, enumerated types, the table with explicit column types,
//! public-privilege revocations, group roles, and users. Rendering is pure;
//! no statement is issued here.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::profile::TableProfile;
use crate::schema::{ColumnSpec, EnumTypeSpec, SqlType, TableSpec, TypePlanner};

/// Execution phase for a provisioning statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Run against the maintenance database, before the target exists.
    Maintenance,
    /// Run against the target database.
    Target,
}

/// A single SQL statement with its execution phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    /// Which connection the statement must run on.
    pub phase: Phase,
    /// The statement text, without trailing semicolon.
    pub sql: String,
}

impl Statement {
    fn maintenance(sql: String) -> Self {
        Self {
            phase: Phase::Maintenance,
            sql,
        }
    }

    fn target(sql: String) -> Self {
        Self {
            phase: Phase::Target,
            sql,
        }
    }
}

/// Table privileges grantable to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privilege {
    Select,
    Insert,
    Update,
    Delete,
}

impl Privilege {
    /// SQL keyword for the privilege.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Privilege::Select => "SELECT",
            Privilege::Insert => "INSERT",
            Privilege::Update => "UPDATE",
            Privilege::Delete => "DELETE",
        }
    }
}

/// A NOLOGIN group role with its table privileges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSpec {
    /// Role name.
    pub name: String,
    /// Privileges granted on all tables in the plan's schema.
    pub privileges: Vec<Privilege>,
}

impl RoleSpec {
    /// A role limited to SELECT.
    pub fn read_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privileges: vec![Privilege::Select],
        }
    }

    /// A role with full data privileges (no DDL).
    pub fn read_write(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privileges: vec![
                Privilege::Select,
                Privilege::Insert,
                Privilege::Update,
                Privilege::Delete,
            ],
        }
    }
}

/// A LOGIN user bound to a group role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSpec {
    /// User name.
    pub name: String,
    /// Group role the user is granted.
    pub role: String,
    /// Login password. When absent, the user is created without a
    /// PASSWORD clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserSpec {
    /// Create a user bound to a role, without a password.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            password: None,
        }
    }
}

/// The complete provisioning sequence for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningPlan {
    /// Target database name.
    pub database: String,
    /// Schema holding the dataset's table.
    pub schema: String,
    /// Enumerated types referenced by the table, created before it.
    pub enum_types: Vec<EnumTypeSpec>,
    /// The dataset table.
    pub table: TableSpec,
    /// Group roles.
    pub roles: Vec<RoleSpec>,
    /// Users bound to the group roles.
    pub users: Vec<UserSpec>,
    /// Whether to revoke the default public privileges first.
    pub revoke_public: bool,
}

impl ProvisioningPlan {
    /// The built-in plan for the crime-report dataset.
    ///
    /// Database `crime_db`, schema `crimes`, enum type `weekday`, table
    /// `boston_crimes` with explicit column types, `readonly` and
    /// `readwrite` group roles, and the `data_analyst` / `data_scientist`
    /// users. Passwords are not baked in; see [`Self::with_password`].
    pub fn crime_reports() -> Self {
        let weekday = EnumTypeSpec::new(
            "weekday",
            [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
        );

        let table = TableSpec::new(
            "boston_crimes",
            vec![
                ColumnSpec::new("incident_number", SqlType::Integer).primary_key(),
                ColumnSpec::new("offense_code", SqlType::SmallInt),
                ColumnSpec::new("description", SqlType::VarChar { length: 100 }),
                ColumnSpec::new("date", SqlType::Date),
                ColumnSpec::new(
                    "day_of_the_week",
                    SqlType::Enum {
                        type_name: "weekday".to_string(),
                    },
                ),
                ColumnSpec::new(
                    "lat",
                    SqlType::Decimal {
                        precision: 10,
                        scale: 8,
                    },
                ),
                ColumnSpec::new(
                    "long",
                    SqlType::Decimal {
                        precision: 10,
                        scale: 8,
                    },
                ),
            ],
        );

        Self {
            database: "crime_db".to_string(),
            schema: "crimes".to_string(),
            enum_types: vec![weekday],
            table,
            roles: vec![
                RoleSpec::read_only("readonly"),
                RoleSpec::read_write("readwrite"),
            ],
            users: vec![
                UserSpec::new("data_analyst", "readonly"),
                UserSpec::new("data_scientist", "readwrite"),
            ],
            revoke_public: true,
        }
    }

    /// Derive a plan from a profiled file, using planned column types.
    ///
    /// The first column becomes the primary key when every row holds a
    /// distinct value in it.
    pub fn from_profile(
        database: impl Into<String>,
        schema: impl Into<String>,
        table_name: impl Into<String>,
        profile: &TableProfile,
        planner: &TypePlanner,
    ) -> Self {
        let plans = planner.plan_table(profile);

        let mut enum_types = Vec::new();
        let mut columns = Vec::new();
        for (idx, plan) in plans.into_iter().enumerate() {
            if let (SqlType::Enum { type_name }, Some(values)) =
                (&plan.sql_type, &plan.enum_values)
            {
                enum_types.push(EnumTypeSpec::new(type_name.clone(), values.clone()));
            }

            let mut column = ColumnSpec::new(plan.name, plan.sql_type);
            if idx == 0 && plan.unique && plan.not_null {
                column = column.primary_key();
            } else if plan.not_null {
                column = column.not_null();
            }
            columns.push(column);
        }

        Self {
            database: database.into(),
            schema: schema.into(),
            enum_types,
            table: TableSpec::new(table_name, columns),
            roles: vec![
                RoleSpec::read_only("readonly"),
                RoleSpec::read_write("readwrite"),
            ],
            users: vec![
                UserSpec::new("data_analyst", "readonly"),
                UserSpec::new("data_scientist", "readwrite"),
            ],
            revoke_public: true,
        }
    }

    /// Set the password for a named user. Unknown names are ignored.
    pub fn with_password(mut self, user: &str, password: impl Into<String>) -> Self {
        if let Some(u) = self.users.iter_mut().find(|u| u.name == user) {
            u.password = Some(password.into());
        }
        self
    }

    /// Render the full statement sequence, in execution order.
    pub fn statements(&self) -> Vec<Statement> {
        let db = quote_ident(&self.database);
        let schema = quote_ident(&self.schema);
        let table = self.qualified_table();

        let mut out = Vec::new();

        out.push(Statement::maintenance(format!("CREATE DATABASE {db}")));

        out.push(Statement::target(format!("CREATE SCHEMA {schema}")));

        for enum_type in &self.enum_types {
            let values: Vec<String> = enum_type
                .values
                .iter()
                .map(|v| quote_literal(v))
                .collect();
            out.push(Statement::target(format!(
                "CREATE TYPE {} AS ENUM ({})",
                quote_ident(&enum_type.name),
                values.join(", ")
            )));
        }

        let column_defs: Vec<String> = self
            .table
            .columns
            .iter()
            .map(|c| {
                let mut def = format!("    {} {}", quote_ident(&c.name), c.sql_type);
                if c.primary_key {
                    def.push_str(" PRIMARY KEY");
                } else if c.not_null {
                    def.push_str(" NOT NULL");
                }
                def
            })
            .collect();
        out.push(Statement::target(format!(
            "CREATE TABLE {table} (\n{}\n)",
            column_defs.join(",\n")
        )));

        if self.revoke_public {
            out.push(Statement::target(
                "REVOKE ALL ON SCHEMA public FROM public".to_string(),
            ));
            out.push(Statement::target(format!(
                "REVOKE ALL ON DATABASE {db} FROM public"
            )));
        }

        for role in &self.roles {
            let name = quote_ident(&role.name);
            let privileges: Vec<&str> = role.privileges.iter().map(|p| p.as_sql()).collect();

            out.push(Statement::target(format!("CREATE ROLE {name} NOLOGIN")));
            out.push(Statement::target(format!(
                "GRANT CONNECT ON DATABASE {db} TO {name}"
            )));
            out.push(Statement::target(format!(
                "GRANT USAGE ON SCHEMA {schema} TO {name}"
            )));
            out.push(Statement::target(format!(
                "GRANT {} ON ALL TABLES IN SCHEMA {schema} TO {name}",
                privileges.join(", ")
            )));
        }

        for user in &self.users {
            let name = quote_ident(&user.name);
            match &user.password {
                Some(password) => out.push(Statement::target(format!(
                    "CREATE USER {name} WITH PASSWORD {}",
                    quote_literal(password)
                ))),
                None => out.push(Statement::target(format!("CREATE USER {name}"))),
            }
            out.push(Statement::target(format!(
                "GRANT {} TO {name}",
                quote_ident(&user.role)
            )));
        }

        out
    }

    /// Render the plan as a SQL script, grouped by phase.
    pub fn script(&self) -> String {
        let mut out = String::new();

        out.push_str("-- Run against the maintenance database.\n");
        for stmt in self.statements() {
            if stmt.phase == Phase::Maintenance {
                out.push_str(&stmt.sql);
                out.push_str(";\n");
            }
        }

        out.push_str(&format!(
            "\n-- Run against the {} database.\n",
            self.database
        ));
        for stmt in self.statements() {
            if stmt.phase == Phase::Target {
                out.push_str(&stmt.sql);
                out.push_str(";\n");
            }
        }

        out
    }

    /// The schema-qualified, quoted table name.
    pub fn qualified_table(&self) -> String {
        format!(
            "{}.{}",
            quote_ident(&self.schema),
            quote_ident(&self.table.name)
        )
    }

    /// COPY statement for bulk-loading the dataset from CSV on stdin.
    pub fn copy_statement(&self) -> String {
        format!(
            "COPY {} FROM STDIN WITH (FORMAT csv, HEADER true)",
            self.qualified_table()
        )
    }

    /// Verification query: total row count.
    pub fn row_count_query(&self) -> String {
        format!("SELECT count(*) FROM {}", self.qualified_table())
    }

    /// Verification query: the first `limit` rows, all columns cast to text.
    pub fn sample_query(&self, limit: usize) -> String {
        let columns: Vec<String> = self
            .table
            .columns
            .iter()
            .map(|c| format!("{}::text", quote_ident(&c.name)))
            .collect();
        format!(
            "SELECT {} FROM {} LIMIT {limit}",
            columns.join(", "),
            self.qualified_table()
        )
    }

    /// Verification query: privileges recorded for the plan's roles.
    pub fn privileges_query(&self) -> String {
        let grantees: Vec<String> = self
            .roles
            .iter()
            .map(|r| quote_literal(&r.name))
            .collect();
        format!(
            "SELECT grantee, privilege_type FROM information_schema.table_privileges \
             WHERE grantee IN ({}) ORDER BY grantee, privilege_type",
            grantees.join(", ")
        )
    }

    /// Names of the enum types the table references but the plan does not
    /// define. Useful as a pre-render sanity check.
    pub fn undefined_enum_types(&self) -> Vec<String> {
        let defined: IndexSet<&str> = self.enum_types.iter().map(|e| e.name.as_str()).collect();
        self.table
            .columns
            .iter()
            .filter_map(|c| match &c.sql_type {
                SqlType::Enum { type_name } if !defined.contains(type_name.as_str()) => {
                    Some(type_name.clone())
                }
                _ => None,
            })
            .collect()
    }
}

/// Quote an identifier for safe inclusion in a statement.
///
/// Plain lowercase identifiers pass through unquoted; anything else is
/// double-quoted with embedded quotes doubled.
pub fn quote_ident(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
