//! Employee commands
//!
//! Usage: hrdb employee add --name <NAME> --job-title <TITLE> --department-id <ID>
//!        hrdb employee list [--department-id <ID>]
//!        hrdb employee reviews <ID>

use clap::{Args, Subcommand};
use hrdb_core::errors::{ExError, HrError};
use hrdb_core::model::Record;
use hrdb_core::Employee;

use super::{opt_id, review, CommandResult, Session};

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub command: EmployeeCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Create an employee in an existing department
    Add(AddArgs),
    /// List employees, optionally of one department
    List(ListArgs),
    /// List the reviews of one employee
    Reviews(ReviewsArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub job_title: String,

    #[arg(long)]
    pub department_id: i64,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub department_id: Option<i64>,
}

#[derive(Debug, Args)]
pub struct ReviewsArgs {
    /// Employee id
    pub id: i64,
}

/// Execute employee command
pub fn execute(session: &mut Session, args: EmployeeArgs) -> CommandResult {
    match args.command {
        EmployeeCommand::Add(add) => {
            let mut employee = Employee::new(add.name, add.job_title, add.department_id)
                .map_err(ExError::from)?;
            employee.set_department_id(add.department_id, &mut session.store.department_finder())?;

            let store = &mut session.store;
            let employee = store.employees.insert(&store.conn, employee)?;
            session.emit(&employee, render)
        }
        EmployeeCommand::List(list) => {
            let store = &mut session.store;
            let employees = match list.department_id {
                Some(department_id) => store.employees.for_department(&store.conn, department_id)?,
                None => store.employees.get_all(&store.conn)?,
            };
            session.emit_all(&employees, render)
        }
        EmployeeCommand::Reviews(reviews) => {
            let store = &mut session.store;
            let employee = store
                .employees
                .find_by_id(&store.conn, reviews.id)?
                .ok_or_else(|| {
                    ExError::from(HrError::RowNotFound {
                        entity: Employee::ENTITY,
                        id: reviews.id,
                    })
                })?;
            let reviews = store.employee_reviews(&employee)?;
            session.emit_all(&reviews, review::render)
        }
    }
}

fn render(employee: &Employee) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        opt_id(employee.id()),
        employee.name(),
        employee.job_title(),
        opt_id(employee.department_id())
    )
}
