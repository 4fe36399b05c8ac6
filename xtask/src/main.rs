// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! The few cargo invocations this workspace runs locally and in CI, plus a
//! migration check that runs entirely against an in-memory `SQLite` database.
//!
//! - `cargo xtask ci` runs lint, build, tests and migration verification.
//! - `cargo xtask verify-migrations` applies the persistence migrations,
//!   reverts them, re-applies them, and checks that the resulting schema
//!   carries the constraints the publication latch relies on.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

/// Cargo flags shared by every build, lint and test run.
const WORKSPACE_FLAGS: [&str; 3] = ["--workspace", "--all-targets", "--all-features"];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Lint, build, test, then verify migrations
    CI,

    /// Build every crate and test target
    #[command(visible_alias = "b")]
    Build,

    /// Run clippy and check formatting
    #[command(visible_alias = "l")]
    Lint,

    /// Rewrite sources with rustfmt
    Fmt,

    /// Run unit, integration and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Verify that migrations apply, revert, and re-apply cleanly
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => {
                lint()?;
                build()?;
                test()?;
                verify_migrations()
            }
            Self::Build => build(),
            Self::Lint => lint(),
            Self::Fmt => run_cargo_nightly(&["fmt", "--all"]),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn build() -> Result<()> {
    run_cargo(&["build"], &[])
}

fn lint() -> Result<()> {
    run_cargo(&["clippy"], &["--", "-D", "warnings"])?;
    run_cargo_nightly(&["fmt", "--all", "--check"])
}

fn test() -> Result<()> {
    run_cargo(&["test"], &[])?;
    // Doc tests last, they are the slowest.
    cmd!("cargo", "test", "--workspace", "--doc").run_with_trace()?;
    Ok(())
}

/// Runs `cargo <subcommand> <workspace flags> <trailing>`.
fn run_cargo(subcommand: &[&str], trailing: &[&str]) -> Result<()> {
    let args: Vec<&str> = subcommand
        .iter()
        .chain(WORKSPACE_FLAGS.iter())
        .chain(trailing.iter())
        .copied()
        .collect();
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // CARGO is set because xtask itself runs as a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify the persistence migrations against an in-memory `SQLite` database.
///
/// ## What This Command Does
///
/// 1. Applies every migration with foreign keys enforced
/// 2. Introspects the resulting schema
/// 3. Reverts every migration and checks that no tables remain
/// 4. Re-applies the migrations and checks the schema is unchanged
/// 5. Checks the keys and constraints that storage correctness depends on
///
/// ## Failures
///
/// The command fails if any migration fails to apply or revert, if a
/// revert leaves tables behind, or if a required constraint is missing.
fn verify_migrations() -> Result<()> {
    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Migrations applied");

    let applied = introspect_sqlite_schema(&mut conn)?;

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;
    let reverted = introspect_sqlite_schema(&mut conn)?;
    if !reverted.tables.is_empty() {
        let leftover: Vec<&String> = reverted.tables.keys().collect();
        return Err(eyre!(
            "❌ Migration verification FAILED: tables left after revert: {leftover:?}"
        ));
    }
    tracing::info!("Migrations reverted");

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {e}"))?;
    let reapplied = introspect_sqlite_schema(&mut conn)?;
    compare_schemas(&applied, &reapplied)?;
    tracing::info!("Migrations re-applied with an identical schema");

    check_required_constraints(&reapplied)?;

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<UniqueConstraint>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueConstraint {
    columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            unique_constraints: BTreeSet::new(),
            indexes: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    normalized_type: normalize_sqlite_type(&col.r#type),
                    nullable: col.notnull == 0,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            let column_names: Vec<String> = index_columns.into_iter().map(|c| c.name).collect();

            // origin 'u' covers UNIQUE table constraints (sqlite_autoindex_*)
            if idx.origin == "u" {
                table_info.unique_constraints.insert(UniqueConstraint {
                    columns: column_names,
                });
            } else if !idx.name.starts_with("sqlite_autoindex_") {
                table_info.indexes.insert(Index {
                    name: idx.name,
                    columns: column_names,
                });
            }
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Normalize `SQLite` type to common representation
fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let normalized = sqlite_type.to_uppercase();
    if normalized.contains("INT") {
        "integer".to_string()
    } else if normalized.contains("REAL")
        || normalized.contains("FLOA")
        || normalized.contains("DOUB")
    {
        "real".to_string()
    } else if normalized.contains("BLOB") {
        "blob".to_string()
    } else if normalized.contains("BOOL") {
        "boolean".to_string()
    } else {
        "text".to_string()
    }
}

/// Compare the schema from the first application with the re-applied one
fn compare_schemas(applied: &Schema, reapplied: &Schema) -> Result<()> {
    let applied_tables: BTreeSet<_> = applied.tables.keys().collect();
    let reapplied_tables: BTreeSet<_> = reapplied.tables.keys().collect();

    if applied_tables != reapplied_tables {
        let mut errors = Vec::new();

        for table in applied_tables.difference(&reapplied_tables) {
            errors.push(format!("  - Table '{table}' missing after re-apply"));
        }

        for table in reapplied_tables.difference(&applied_tables) {
            errors.push(format!("  - Table '{table}' only present after re-apply"));
        }

        return Err(eyre!(
            "❌ Migration verification FAILED: Table mismatch\n{}",
            errors.join("\n")
        ));
    }

    for table_name in applied_tables {
        let before = &applied.tables[table_name];
        let after = &reapplied.tables[table_name];

        if before != after {
            return Err(eyre!(
                "❌ Migration verification FAILED: table '{table_name}' differs after re-apply\n  first: {before:?}\n  again: {after:?}"
            ));
        }
    }

    Ok(())
}

/// Check the keys and constraints that the store depends on
fn check_required_constraints(schema: &Schema) -> Result<()> {
    let table = |name: &str| {
        schema
            .tables
            .get(name)
            .ok_or_else(|| eyre!("❌ Migration verification FAILED: missing table '{name}'"))
    };

    for name in [
        "projects",
        "published_sessions",
        "signups",
        "certificates",
        "audit_events",
    ] {
        table(name)?;
    }

    // The publication latch is one row per (project, session).
    let published = table("published_sessions")?;
    let latch_key: BTreeSet<String> = ["project_id", "session_key"]
        .into_iter()
        .map(String::from)
        .collect();
    if published.primary_keys != latch_key {
        return Err(eyre!(
            "❌ Migration verification FAILED: published_sessions primary key is {:?}",
            published.primary_keys
        ));
    }

    // At most one certificate per (signup, session).
    let certificates = table("certificates")?;
    let certificate_key = UniqueConstraint {
        columns: vec![String::from("signup_id"), String::from("session_key")],
    };
    if !certificates.unique_constraints.contains(&certificate_key) {
        return Err(eyre!(
            "❌ Migration verification FAILED: certificates lacks UNIQUE (signup_id, session_key)"
        ));
    }

    for (name, column) in [
        ("published_sessions", "project_id"),
        ("signups", "project_id"),
        ("certificates", "project_id"),
        ("audit_events", "project_id"),
    ] {
        let expected = ForeignKey {
            from_column: String::from(column),
            to_table: String::from("projects"),
            to_column: String::from("project_id"),
        };
        if !table(name)?.foreign_keys.contains(&expected) {
            return Err(eyre!(
                "❌ Migration verification FAILED: {name}.{column} does not reference projects"
            ));
        }
    }

    let signup_fk = ForeignKey {
        from_column: String::from("signup_id"),
        to_table: String::from("signups"),
        to_column: String::from("signup_id"),
    };
    if !certificates.foreign_keys.contains(&signup_fk) {
        return Err(eyre!(
            "❌ Migration verification FAILED: certificates.signup_id does not reference signups"
        ));
    }

    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
