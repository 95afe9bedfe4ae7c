//! `daycal category ...` handlers.

use super::{CliResult, Context};
use crate::CategoryCommand;
use log::info;

pub fn run(ctx: &Context, command: CategoryCommand) -> CliResult<()> {
    let service = ctx.calendar();
    match command {
        CategoryCommand::Add { name, color } => {
            let category = service.create_category(&ctx.owner, &name, color.as_deref())?;
            println!("{} {} {}", category.id, category.color, category.name);
        }
        CategoryCommand::List => {
            for summary in service.category_summaries(&ctx.owner)? {
                println!(
                    "{} {} {} ({} tasks, {} pending)",
                    summary.category.id,
                    summary.category.color,
                    summary.category.name,
                    summary.total,
                    summary.pending
                );
            }
        }
        CategoryCommand::Rm { id } => {
            service.delete_category(&ctx.owner, id)?;
            info!("event=cli_category_rm module=cli status=ok");
            println!("deleted {id}");
        }
    }
    Ok(())
}
