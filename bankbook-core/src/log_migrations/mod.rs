//! Event log migrations - embedded SQL files
//!
//! Each migration is a (name, sql) pair applied in order and recorded in
//! `sys_migrations`.

/// All log migrations, embedded at compile time.
///
/// New migrations go at the end as NNN_description.sql.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];

/// The bootstrap migration that creates `sys_migrations` itself
pub const BOOTSTRAP: &str = "000_migrations.sql";
