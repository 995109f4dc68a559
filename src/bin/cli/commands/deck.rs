use anyhow::Result;

use cardbox_lib::{Action, EntityKind};

use crate::app::App;
use crate::commands::confirm;
use crate::{DeckCommand, OutputFormat};

pub fn run(app: &mut App, command: DeckCommand, format: &OutputFormat) -> Result<()> {
    match command {
        DeckCommand::Add { category, name, description } => {
            let category = app.find_category(&category)?;
            app.dispatch(Action::AddDeck {
                category_id: category.id.clone(),
                name,
                description,
            })?;
            let created = app
                .state
                .tree()
                .category(&category.id)
                .and_then(|c| c.decks.last())
                .cloned();
            if let Some(deck) = created {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
                    OutputFormat::Plain => {
                        println!(
                            "Created deck \"{}\" in category \"{}\"",
                            deck.name, category.name
                        );
                        println!("  ID: {}", deck.id);
                    }
                }
            }
        }
        DeckCommand::Edit { category, deck, name, description } => {
            let category = app.find_category(&category)?;
            let existing = app.find_deck(&category, &deck)?;
            app.dispatch(Action::UpdateDeck {
                category_id: category.id.clone(),
                deck_id: existing.id.clone(),
                name: name.unwrap_or(existing.name),
                description: description.unwrap_or(existing.description),
            })?;
            if let Some(updated) = app.state.tree().deck(&existing.id) {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(updated)?),
                    OutputFormat::Plain => println!("Updated deck \"{}\"", updated.name),
                }
            }
        }
        DeckCommand::Rm { category, deck, yes } => {
            let category = app.find_category(&category)?;
            let existing = app.find_deck(&category, &deck)?;
            let message = app.state.tree().delete_confirmation(EntityKind::Deck, &existing.id)?;
            if !confirm(&message, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            app.dispatch(Action::DeleteDeck {
                category_id: category.id.clone(),
                deck_id: existing.id.clone(),
            })?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": existing.id })),
                OutputFormat::Plain => {
                    println!("Deleted deck \"{}\" ({} cards)", existing.name, existing.card_count())
                }
            }
        }
    }

    Ok(())
}
