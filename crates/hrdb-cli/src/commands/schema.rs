//! Schema commands
//!
//! Usage: hrdb init | hrdb reset

use hrdb_store::DatabaseLocation;

use super::{CommandResult, Session};

/// Execute `init`
pub fn execute_init(session: &mut Session, location: &DatabaseLocation) -> CommandResult {
    session.store.create_tables()?;
    session.status(&format!("initialized {}", describe(location)))
}

/// Execute `reset`
pub fn execute_reset(session: &mut Session, location: &DatabaseLocation) -> CommandResult {
    session.store.reset()?;
    session.status(&format!("reset {}", describe(location)))
}

fn describe(location: &DatabaseLocation) -> String {
    match location {
        DatabaseLocation::Memory => ":memory:".to_string(),
        DatabaseLocation::File(path) => path.display().to_string(),
    }
}
