use anyhow::Result;

use cardbox_lib::{Action, EntityKind};

use crate::app::App;
use crate::commands::confirm;
use crate::render::terminal as renderer;
use crate::{CardCommand, OutputFormat};

pub fn run(
    app: &mut App,
    command: CardCommand,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    match command {
        CardCommand::Add { category, deck, front, back, image } => {
            let category = app.find_category(&category)?;
            let deck = app.find_deck(&category, &deck)?;
            let image = image.map(|path| app.ingest_image(&path)).transpose()?;

            app.dispatch(Action::AddCard {
                deck_id: deck.id.clone(),
                front,
                back,
                image,
            })?;

            let created = app.state.tree().deck(&deck.id).and_then(|d| d.cards.last()).cloned();
            if let Some(card) = created {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
                    OutputFormat::Plain => {
                        let position = deck.card_count();
                        println!("Added to \"{}\":", deck.name);
                        println!("{}", renderer::card_line(position, &card, use_color));
                        println!("  ID: {}", card.id);
                    }
                }
            }
        }
        CardCommand::Edit { category, deck, card, front, back, image, remove_image } => {
            let category = app.find_category(&category)?;
            let deck = app.find_deck(&category, &deck)?;
            let existing = App::find_card(&deck, &card)?;

            let image = match image {
                Some(path) => Some(app.ingest_image(&path)?),
                None if remove_image => None,
                None => existing.image.clone(),
            };

            app.dispatch(Action::UpdateCard {
                deck_id: deck.id.clone(),
                card_id: existing.id.clone(),
                front: front.unwrap_or(existing.front),
                back: back.unwrap_or(existing.back),
                image,
            })?;

            if let Some(updated) = app.state.tree().card(&existing.id) {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(updated)?),
                    OutputFormat::Plain => {
                        let index = deck.cards.iter().position(|c| c.id == updated.id).unwrap_or(0);
                        println!("Updated:");
                        println!("{}", renderer::card_line(index, updated, use_color));
                    }
                }
            }
        }
        CardCommand::Rm { category, deck, card, yes } => {
            let category = app.find_category(&category)?;
            let deck = app.find_deck(&category, &deck)?;
            let existing = App::find_card(&deck, &card)?;

            let message = app.state.tree().delete_confirmation(EntityKind::Card, &existing.id)?;
            if !confirm(&message, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            app.dispatch(Action::DeleteCard {
                deck_id: deck.id.clone(),
                card_id: existing.id.clone(),
            })?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": existing.id })),
                OutputFormat::Plain => println!("Deleted card \"{}\"", existing.front),
            }
        }
    }

    Ok(())
}
