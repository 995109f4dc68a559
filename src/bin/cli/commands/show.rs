use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self as renderer, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    category: &str,
    deck: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let category = app.find_category(category)?;
    let deck = app.find_deck(&category, deck)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "category": category.name,
                "deck": deck,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let title = renderer::paint(&deck.name, Color::BOLD, use_color);
            println!("{} {} / {}", category.icon, category.name, title);
            if !deck.description.is_empty() {
                println!("{}", renderer::paint(&deck.description, Color::DIM, use_color));
            }
            let count = renderer::plural(deck.card_count(), "card");
            println!("{}", renderer::paint(&count, Color::GRAY, use_color));
            println!();

            if deck.cards.is_empty() {
                println!("  No cards yet. Add one with `cardbox-cli card add`.");
            }
            for (i, card) in deck.cards.iter().enumerate() {
                println!("{}", renderer::card_line(i, card, use_color));
            }
        }
    }

    Ok(())
}
