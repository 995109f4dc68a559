use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self as renderer, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let categories = app.state.tree().categories();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = categories.iter().map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "name": c.name,
                    "color": c.color,
                    "icon": c.icon,
                    "deckCount": c.deck_count(),
                    "cardCount": c.card_count(),
                    "decks": c.decks.iter().map(|d| serde_json::json!({
                        "id": d.id,
                        "name": d.name,
                        "description": d.description,
                        "cardCount": d.card_count(),
                    })).collect::<Vec<_>>(),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if categories.is_empty() {
                println!("No categories yet. Create one with `cardbox-cli category add <name>`.");
                return Ok(());
            }

            for category in categories {
                println!("{}", renderer::category_line(category, use_color));
                if category.decks.is_empty() {
                    println!("    {}", renderer::paint("(no decks)", Color::GRAY, use_color));
                }
                for deck in &category.decks {
                    println!("    {}", renderer::deck_line(deck, use_color));
                }
                println!();
            }
        }
    }

    Ok(())
}
