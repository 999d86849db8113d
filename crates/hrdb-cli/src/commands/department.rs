//! Department commands
//!
//! Usage: hrdb department add --name <NAME> --location <LOCATION>
//!        hrdb department list

use clap::{Args, Subcommand};
use hrdb_core::Department;

use super::{opt_id, CommandResult, Session};

#[derive(Debug, Args)]
pub struct DepartmentArgs {
    #[command(subcommand)]
    pub command: DepartmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    /// Create a department
    Add(AddArgs),
    /// List all departments
    List,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub location: String,
}

/// Execute department command
pub fn execute(session: &mut Session, args: DepartmentArgs) -> CommandResult {
    match args.command {
        DepartmentCommand::Add(add) => {
            let store = &mut session.store;
            let department = store.departments.create(&store.conn, add.name, add.location)?;
            session.emit(&department, render)
        }
        DepartmentCommand::List => {
            let store = &mut session.store;
            let departments = store.departments.get_all(&store.conn)?;
            session.emit_all(&departments, render)
        }
    }
}

fn render(department: &Department) -> String {
    format!(
        "{}\t{}\t{}",
        opt_id(department.id()),
        department.name(),
        department.location()
    )
}
