//! Subcommand implementations
//!
//! Every command runs against one [`Session`] and prints either one line per
//! record (tab separated) or JSON when `--json` is given.

use hrdb_core::model::Shared;
use serde::Serialize;

pub mod department;
pub mod employee;
pub mod review;
pub mod schema;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open store plus output settings for one invocation
pub struct Session {
    pub store: hrdb_store::HrStore,
    pub json: bool,
}

impl Session {
    /// Print a single record
    pub fn emit<T, F>(&self, record: &Shared<T>, human: F) -> CommandResult
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        let record = record.borrow();
        if self.json {
            println!("{}", serde_json::to_string(&*record)?);
        } else {
            println!("{}", human(&*record));
        }
        Ok(())
    }

    /// Print a list of records; JSON output is a single array
    pub fn emit_all<T, F>(&self, records: &[Shared<T>], human: F) -> CommandResult
    where
        T: Serialize,
        F: Fn(&T) -> String,
    {
        if self.json {
            let values = records
                .iter()
                .map(|r| serde_json::to_value(&*r.borrow()))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", serde_json::to_string(&values)?);
        } else {
            for record in records {
                println!("{}", human(&*record.borrow()));
            }
        }
        Ok(())
    }

    /// Print a status message (`{"status": ...}` in JSON mode)
    pub fn status(&self, message: &str) -> CommandResult {
        if self.json {
            println!("{}", serde_json::json!({ "status": message }));
        } else {
            println!("{}", message);
        }
        Ok(())
    }
}

/// Render an optional id or foreign key, `-` when unset
pub fn opt_id(id: Option<i64>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}
