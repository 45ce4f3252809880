//! PostgreSQL execution of provisioning plans.
//!
//! The provisioner connects to the maintenance database, creates the target
//! database when it does not exist, then runs the schema-phase statements on
//! the target one at a time. Any failure aborts the run; nothing is retried.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolCopyExt, PgPoolOptions};
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};

use super::plan::{Phase, ProvisioningPlan};
use crate::error::{BlotterError, Result};

/// Issues provisioning statements and verification queries to PostgreSQL.
pub struct Provisioner {
    options: PgConnectOptions,
    pool: Pool<Postgres>,
}

impl Provisioner {
    /// Connect to the maintenance database named in `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)?;
        let pool = pool_for(options.clone()).await?;
        info!("connected to maintenance database");
        Ok(Self { options, pool })
    }

    /// Whether a database with this name already exists.
    pub async fn database_exists(&self, name: &str) -> Result<bool> {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }

    /// Execute the plan: create the database if absent, then run every
    /// target-phase statement in order.
    pub async fn provision(&self, plan: &ProvisioningPlan) -> Result<()> {
        let missing = plan.undefined_enum_types();
        if !missing.is_empty() {
            return Err(BlotterError::InvalidPlan(format!(
                "table references undefined enum types: {}",
                missing.join(", ")
            )));
        }

        let statements = plan.statements();

        if self.database_exists(&plan.database).await? {
            info!(database = %plan.database, "database already exists, skipping creation");
        } else {
            for stmt in statements.iter().filter(|s| s.phase == Phase::Maintenance) {
                debug!(sql = %stmt.sql, "executing");
                sqlx::raw_sql(&stmt.sql).execute(&self.pool).await?;
            }
            info!(database = %plan.database, "database created");
        }

        let target = self.target_pool(plan).await?;
        for stmt in statements.iter().filter(|s| s.phase == Phase::Target) {
            debug!(sql = %stmt.sql, "executing");
            sqlx::raw_sql(&stmt.sql).execute(&target).await?;
        }
        info!(
            table = %plan.qualified_table(),
            roles = plan.roles.len(),
            users = plan.users.len(),
            "provisioning complete"
        );

        Ok(())
    }

    /// Bulk-load the dataset CSV through `COPY ... FROM STDIN`.
    ///
    /// Returns the number of rows loaded.
    pub async fn load_csv(&self, plan: &ProvisioningPlan, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| BlotterError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let target = self.target_pool(plan).await?;
        let mut copy = target.copy_in_raw(&plan.copy_statement()).await?;
        copy.send(data.as_slice()).await?;
        let rows = copy.finish().await?;

        info!(rows, table = %plan.qualified_table(), "bulk load complete");
        Ok(rows)
    }

    /// Run the verification queries against the target database.
    pub async fn verify(&self, plan: &ProvisioningPlan) -> Result<VerificationReport> {
        let target = self.target_pool(plan).await?;

        let row_count: i64 = sqlx::query_scalar(&plan.row_count_query())
            .fetch_one(&target)
            .await?;

        let sample_rows = sqlx::query(&plan.sample_query(SAMPLE_ROWS))
            .fetch_all(&target)
            .await?
            .into_iter()
            .map(|row| {
                (0..plan.table.columns.len())
                    .map(|i| {
                        row.try_get::<Option<String>, _>(i)
                            .map(Option::unwrap_or_default)
                            .map_err(BlotterError::from)
                    })
                    .collect::<Result<Vec<String>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let grants = sqlx::query(&plan.privileges_query())
            .fetch_all(&target)
            .await?
            .into_iter()
            .map(|row| {
                Ok(GrantRecord {
                    grantee: row.try_get("grantee")?,
                    privilege: row.try_get("privilege_type")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(VerificationReport {
            row_count,
            sample_rows,
            grants,
        })
    }

    async fn target_pool(&self, plan: &ProvisioningPlan) -> Result<Pool<Postgres>> {
        pool_for(self.options.clone().database(&plan.database)).await
    }
}

/// Rows fetched by the sample verification query.
const SAMPLE_ROWS: usize = 5;

async fn pool_for(options: PgConnectOptions) -> Result<Pool<Postgres>> {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .map_err(Into::into)
}

/// One privilege grant observed in `information_schema.table_privileges`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRecord {
    /// Role the privilege was granted to.
    pub grantee: String,
    /// Privilege name as reported by the catalog (e.g. `SELECT`).
    pub privilege: String,
}

/// Result of the post-provisioning verification queries.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    /// Total rows in the dataset table.
    pub row_count: i64,
    /// First rows of the table, all columns rendered as text.
    pub sample_rows: Vec<Vec<String>>,
    /// Privileges recorded for the plan's roles.
    pub grants: Vec<GrantRecord>,
}

impl VerificationReport {
    /// Privileges recorded for one role.
    pub fn privileges_for(&self, grantee: &str) -> Vec<&str> {
        self.grants
            .iter()
            .filter(|g| g.grantee == grantee)
            .map(|g| g.privilege.as_str())
            .collect()
    }
}
