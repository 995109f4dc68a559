use anyhow::Result;

use cardbox_lib::{Action, EntityKind};

use crate::app::App;
use crate::commands::confirm;
use crate::{CategoryCommand, OutputFormat};

pub fn run(app: &mut App, command: CategoryCommand, format: &OutputFormat) -> Result<()> {
    match command {
        CategoryCommand::Add { name, color, icon } => {
            let color = color.unwrap_or_else(|| app.config.default_color.clone());
            let icon = icon.unwrap_or_else(|| app.config.default_icon.clone());
            app.dispatch(Action::AddCategory { name, color, icon })?;
            let created = app.state.tree().categories().last().cloned();
            if let Some(category) = created {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&category)?),
                    OutputFormat::Plain => {
                        println!("Created category {} \"{}\"", category.icon, category.name);
                        println!("  ID: {}", category.id);
                    }
                }
            }
        }
        CategoryCommand::Edit { category, name, color, icon } => {
            let existing = app.find_category(&category)?;
            app.dispatch(Action::UpdateCategory {
                id: existing.id.clone(),
                name: name.unwrap_or(existing.name),
                color: color.unwrap_or(existing.color),
                icon: icon.unwrap_or(existing.icon),
            })?;
            if let Some(updated) = app.state.tree().category(&existing.id) {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(updated)?),
                    OutputFormat::Plain => {
                        println!("Updated category {} \"{}\"", updated.icon, updated.name)
                    }
                }
            }
        }
        CategoryCommand::Rm { category, yes } => {
            let existing = app.find_category(&category)?;
            let message = app.state.tree().delete_confirmation(EntityKind::Category, &existing.id)?;
            if !confirm(&message, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            app.dispatch(Action::DeleteCategory { id: existing.id.clone() })?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": existing.id })),
                OutputFormat::Plain => println!(
                    "Deleted category \"{}\" ({} decks, {} cards)",
                    existing.name,
                    existing.deck_count(),
                    existing.card_count()
                ),
            }
        }
    }

    Ok(())
}
