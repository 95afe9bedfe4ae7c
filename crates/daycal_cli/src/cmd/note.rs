//! `daycal note ...` handlers.

use super::{CliResult, Context};
use crate::NoteCommand;
use daycal_core::service::note_service::note_card;
use daycal_core::{NoteCard, NoteServiceError};

pub fn run(ctx: &Context, command: NoteCommand) -> CliResult<()> {
    let service = ctx.notes();
    match command {
        NoteCommand::Add { title, body } => {
            let note = service.create_note(&ctx.owner, &title, &body)?;
            println!("{} {}", note.id, note.title);
        }
        NoteCommand::Edit { id, title, body } => {
            let note = service.update_note(&ctx.owner, id, &title, &body)?;
            println!("{} {}", note.id, note.title);
        }
        NoteCommand::List { query } => {
            for card in service.list_note_cards(&ctx.owner, query.as_deref())? {
                let pin = if card.note.pinned { '*' } else { ' ' };
                println!("{pin} {} {}", card.note.id, card.note.title);
            }
        }
        NoteCommand::Pin { id } => {
            let note = service.toggle_pin(&ctx.owner, id)?;
            let state = if note.pinned { "pinned" } else { "unpinned" };
            println!("{id} {state}");
        }
        NoteCommand::Rm { id } => {
            service.delete_note(&ctx.owner, id)?;
            println!("deleted {id}");
        }
        NoteCommand::Show { id } => {
            let note = service
                .get_note(&ctx.owner, id)?
                .ok_or(NoteServiceError::NoteNotFound(id))?;
            print_card(&note_card(note));
        }
    }
    Ok(())
}

fn print_card(card: &NoteCard) {
    let pin = if card.note.pinned { " (pinned)" } else { "" };
    println!("{}{pin}", card.note.title);
    println!();
    println!("{}", card.display_text);
    if !card.copy_items.is_empty() {
        println!();
        for item in &card.copy_items {
            println!("[{}] {}", item.label, item.copy_value);
        }
    }
}
