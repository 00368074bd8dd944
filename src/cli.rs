use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::fs;

use crate::db;
use crate::models::{NewVisitor, Visitor};

pub const USAGE: &str = "usage: guestbook [import <file.json>]";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Serve,
    Import(String),
}

/// Parse the arguments after the program name. `None` means print [`USAGE`].
pub fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [] => Some(Command::Serve),
        [command, file] if command == "import" => Some(Command::Import(file.clone())),
        _ => None,
    }
}

// Document-store exports write dates either as plain strings, as epoch
// milliseconds, or wrapped in `{"$date": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyDate {
    Text(String),
    Millis(i64),
    Extended {
        #[serde(rename = "$date")]
        date: String,
    },
}

impl LegacyDate {
    fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            LegacyDate::Text(s) | LegacyDate::Extended { date: s } => {
                DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|at| at.with_timezone(&Utc))
            }
            LegacyDate::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
        }
    }
}

#[derive(Deserialize)]
struct LegacyVisitor {
    name: Option<String>,
    email: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: Option<LegacyDate>,
}

/// Load visitors from a JSON array exported from the previous store.
///
/// Records without a name or email are skipped. Everything else is inserted
/// in a single transaction; the number inserted is returned.
pub async fn import_visitors(
    pool: &SqlitePool,
    file_path: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;
    let records: Vec<LegacyVisitor> = serde_json::from_str(&content)?;

    let now = Utc::now();
    let mut imported = 0;
    let mut tx = pool.begin().await?;

    for (index, record) in records.into_iter().enumerate() {
        let input = NewVisitor {
            name: record.name,
            email: record.email,
        };
        let Some((name, email)) = input.validate() else {
            tracing::warn!("skipping record {index}: name and email are required");
            continue;
        };

        let created_at = match &record.created_at {
            Some(date) => date.to_utc().unwrap_or_else(|| {
                tracing::warn!("record {index} has an unreadable createdAt, using now");
                now
            }),
            None => now,
        };

        let visitor = Visitor::with_created_at(name, email, created_at);
        db::insert_visitor(&mut *tx, &visitor).await?;
        imported += 1;
    }

    tx.commit().await?;
    println!("Imported {} visitors", imported);
    Ok(imported)
}
