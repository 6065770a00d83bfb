use anyhow::{Context, Result};
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use super::schema::SCHEMA;
use crate::normalize::round_half_even;

/// Name under which [`round_half_even`] is exposed to SQL
pub const ROUND_FUNCTION: &str = "round_half_even";

/// A short-lived in-memory SQLite database.
///
/// Every report opens its own `Database`, loads the tables it needs and drops
/// it afterwards; nothing is shared between reports.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a fresh, empty in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(Self { conn })
    }

    /// Create the schema and register the custom SQL functions
    pub fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;

        // Both report paths must round with the exact same function, so SQL
        // calls back into Rust instead of using SQLite's ROUND().
        self.conn
            .create_scalar_function(
                ROUND_FUNCTION,
                2,
                FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
                |ctx| {
                    let value: Option<f64> = ctx.get(0)?;
                    let digits: i32 = ctx.get(1)?;
                    Ok(value.map(|v| round_half_even(v, digits)))
                },
            )
            .with_context(|| format!("Failed to register {} function", ROUND_FUNCTION))?;

        Ok(())
    }

    /// Open and initialize in one step
    pub fn open() -> Result<Self> {
        let db = Self::in_memory()?;
        db.initialize()?;
        Ok(db)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
