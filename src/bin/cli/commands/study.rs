use anyhow::{Context, Result};

use cardbox_lib::Action;

use crate::app::App;
use crate::render::terminal::{self as renderer, Color};
use crate::OutputFormat;

const BAR_WIDTH: usize = 20;

/// Walk a deck through a study session, printing each card front then back
pub fn run(
    app: &mut App,
    category: &str,
    deck: &str,
    shuffle: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let category = app.find_category(category)?;
    let deck = app.find_deck(&category, deck)?;

    app.open_deck(&category, &deck)?;
    app.dispatch(Action::EnterStudy)?;
    if shuffle {
        app.dispatch(Action::Shuffle)?;
    }

    match format {
        OutputFormat::Json => {
            let session = app.state.session().context("Study session did not start")?;
            let output = serde_json::json!({
                "deckId": session.deck_id(),
                "title": app.state.title(),
                "shuffled": shuffle,
                "cards": session.cards(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => print_session(app, use_color)?,
    }

    app.dispatch(Action::Back)?;
    Ok(())
}

fn print_session(app: &mut App, use_color: bool) -> Result<()> {
    println!("{}", renderer::paint(&app.state.title(), Color::BOLD, use_color));
    println!();

    loop {
        let session = app.state.session().context("Study session ended early")?;
        let card = session.current().clone();
        let progress = session.progress();
        let last = session.is_last();

        println!("{}", renderer::progress_bar(progress, BAR_WIDTH, use_color));
        println!("  Q: {}", card.front);
        if let Some(label) = renderer::image_label(&card) {
            println!("     {}", renderer::paint(&label, Color::CYAN, use_color));
        }
        println!("  A: {}", renderer::paint(&card.back, Color::GREEN, use_color));
        println!();

        if last {
            break;
        }
        app.dispatch(Action::NextCard)?;
    }

    Ok(())
}
