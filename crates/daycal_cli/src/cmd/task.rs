//! `daycal task ...` handlers.

use super::calendar::task_line;
use super::{CliError, CliResult, Context};
use crate::TaskCommand;
use daycal_core::{format_iso, NewTask};

pub fn run(ctx: &Context, command: TaskCommand) -> CliResult<()> {
    let service = ctx.calendar();
    match command {
        TaskCommand::Add {
            title,
            date,
            category,
            description,
            color,
        } => {
            let task = service.create_task(
                &ctx.owner,
                NewTask {
                    title,
                    date,
                    category_id: category,
                    description,
                    custom_color: color,
                },
            )?;
            println!("{} {} {}", task.id, format_iso(task.date), task.title);
        }
        TaskCommand::List { from, to } => {
            if let (Some(from), Some(to)) = (from, to) {
                if from > to {
                    return Err(CliError::InvalidArgument(format!(
                        "--from {} is after --to {}",
                        format_iso(from),
                        format_iso(to)
                    )));
                }
            }
            let mut tasks = service.calendar_tasks(&ctx.owner)?;
            tasks.retain(|t| {
                from.map_or(true, |from| t.task.date >= from)
                    && to.map_or(true, |to| t.task.date <= to)
            });
            for task in &tasks {
                println!("{} {}", format_iso(task.task.date), task_line(task));
            }
        }
        TaskCommand::Done { id } => {
            let completed = service.toggle_task_completed(&ctx.owner, id)?;
            let state = if completed { "completed" } else { "pending" };
            println!("{id} {state}");
        }
        TaskCommand::Rm { id } => {
            service.delete_task(&ctx.owner, id)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
