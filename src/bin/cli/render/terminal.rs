use cardbox_lib::flashcards::{parse_hex_color, Card, Category, Deck};
use cardbox_lib::media::data_url_media_type;
use cardbox_lib::study::Progress;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Truecolor escape for a `#rrggbb` category color
fn hex_escape(hex: &str) -> Option<String> {
    let (r, g, b) = parse_hex_color(hex)?;
    Some(format!("\x1b[38;2;{};{};{}m", r, g, b))
}

pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

pub fn category_line(category: &Category, use_color: bool) -> String {
    let name = match hex_escape(&category.color) {
        Some(escape) if use_color => {
            format!("{}{}{}{}", Color::BOLD, escape, category.name, Color::RESET)
        }
        _ => category.name.clone(),
    };
    let meta = format!(
        "{} • {}",
        plural(category.deck_count(), "deck"),
        plural(category.card_count(), "card")
    );
    format!("{} {}  {}", category.icon, name, paint(&meta, Color::GRAY, use_color))
}

pub fn deck_line(deck: &Deck, use_color: bool) -> String {
    let mut line = format!(
        "{}  {}",
        paint(&deck.name, Color::BOLD, use_color),
        paint(&plural(deck.card_count(), "card"), Color::GRAY, use_color)
    );
    if !deck.description.is_empty() {
        line.push_str(&format!("  {}", paint(&deck.description, Color::DIM, use_color)));
    }
    line
}

pub fn image_label(card: &Card) -> Option<String> {
    card.image
        .as_deref()
        .map(|image| format!("[{}]", data_url_media_type(image).unwrap_or("image")))
}

pub fn card_line(index: usize, card: &Card, use_color: bool) -> String {
    let mut line = format!(
        "{:>3}. {} {} {}",
        index + 1,
        card.front,
        paint("→", Color::GRAY, use_color),
        card.back
    );
    if let Some(label) = image_label(card) {
        line.push(' ');
        line.push_str(&paint(&label, Color::CYAN, use_color));
    }
    line
}

/// `[#####-----] 2 / 4`
pub fn progress_bar(progress: Progress, width: usize, use_color: bool) -> String {
    let filled = ((progress.percentage() / 100.0) * width as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "#".repeat(filled.min(width)),
        "-".repeat(width.saturating_sub(filled))
    );
    format!("[{}] {}", paint(&bar, Color::GREEN, use_color), progress)
}
