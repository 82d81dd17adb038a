use crate::font::TextMeasure;
use crate::units::Pt;

/// Greedily wraps `text` into lines no wider than `max_width` when set at `size`.
///
/// Words are whitespace-separated and are never split: a word that is wider than
/// `max_width` on its own gets a line to itself and overflows. Joining the
/// returned lines with single spaces gives back the input with its whitespace
/// collapsed. Empty or whitespace-only input produces no lines.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: Pt,
    size: Pt,
    measure: &M,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.width_of(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
