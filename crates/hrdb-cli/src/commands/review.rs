//! Review commands
//!
//! Usage: hrdb review add --year <YEAR> --summary <TEXT> --employee-id <ID>
//!        hrdb review list [--employee-id <ID>]
//!        hrdb review update <ID> [--year <YEAR>] [--summary <TEXT>] [--employee-id <ID>]
//!        hrdb review delete <ID>

use clap::{Args, Subcommand};
use hrdb_core::errors::{ExError, HrError};
use hrdb_core::model::{Record, Shared};
use hrdb_core::Review;

use super::{opt_id, CommandResult, Session};

#[derive(Debug, Args)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    /// Create a review for an existing employee
    Add(AddArgs),
    /// List reviews, optionally of one employee
    List(ListArgs),
    /// Change fields of a review
    Update(UpdateArgs),
    /// Delete a review
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Year, as an integer >= 2000
    #[arg(long)]
    pub year: String,

    #[arg(long)]
    pub summary: String,

    #[arg(long)]
    pub employee_id: i64,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub employee_id: Option<i64>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Review id
    pub id: i64,

    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub summary: Option<String>,

    #[arg(long)]
    pub employee_id: Option<i64>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Review id
    pub id: i64,
}

/// Execute review command
pub fn execute(session: &mut Session, args: ReviewArgs) -> CommandResult {
    match args.command {
        ReviewCommand::Add(add) => {
            let mut review = Review::new(add.year.as_str(), add.summary, add.employee_id)
                .map_err(ExError::from)?;
            review.set_employee_id(add.employee_id, &mut session.store.employee_finder())?;

            let store = &mut session.store;
            let review = store.reviews.insert(&store.conn, review)?;
            session.emit(&review, render)
        }
        ReviewCommand::List(list) => {
            let store = &mut session.store;
            let reviews = match list.employee_id {
                Some(employee_id) => store.reviews.for_employee(&store.conn, employee_id)?,
                None => store.reviews.get_all(&store.conn)?,
            };
            session.emit_all(&reviews, render)
        }
        ReviewCommand::Update(update) => {
            let review = load(session, update.id)?;
            {
                let mut fields = review.borrow_mut();
                if let Some(year) = &update.year {
                    fields.set_year(year.as_str()).map_err(ExError::from)?;
                }
                if let Some(summary) = update.summary {
                    fields.set_summary(summary).map_err(ExError::from)?;
                }
                if let Some(employee_id) = update.employee_id {
                    fields.set_employee_id(employee_id, &mut session.store.employee_finder())?;
                }
            }

            let store = &session.store;
            store.reviews.update(&store.conn, &review)?;
            session.emit(&review, render)
        }
        ReviewCommand::Delete(delete) => {
            let review = load(session, delete.id)?;
            let store = &mut session.store;
            store.reviews.delete(&store.conn, &review)?;
            session.status(&format!("deleted review {}", delete.id))
        }
    }
}

fn load(session: &mut Session, id: i64) -> Result<Shared<Review>, Box<dyn std::error::Error>> {
    let store = &mut session.store;
    let review = store
        .reviews
        .find_by_id(&store.conn, id)?
        .ok_or_else(|| {
            ExError::from(HrError::RowNotFound {
                entity: Review::ENTITY,
                id,
            })
        })?;
    Ok(review)
}

pub(crate) fn render(review: &Review) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        opt_id(review.id()),
        review.year(),
        opt_id(review.employee_id()),
        review.summary()
    )
}
