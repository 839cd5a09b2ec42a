//! Mood emoji rules shared by the editor and entry creation.

/// Maps the primary (first) emoji to a 1..=5 rating.
///
/// Unknown emojis and an empty selection yield `None`.
pub fn mood_rating_from_emojis<S: AsRef<str>>(emojis: &[S]) -> Option<u8> {
    let primary = emojis.first()?;
    match primary.as_ref() {
        "😀" | "🤩" => Some(5),
        "🙂" | "😎" => Some(4),
        "😐" => Some(3),
        "🙁" | "😤" => Some(2),
        "😢" | "😵" => Some(1),
        _ => None,
    }
}

/// Toggles `emoji` in a bounded selection.
///
/// A present emoji is removed. A new one is appended, evicting the oldest
/// selections once `limit` is exceeded.
pub fn toggle_emoji(current: &[String], emoji: &str, limit: usize) -> Vec<String> {
    if current.iter().any(|value| value == emoji) {
        return current
            .iter()
            .filter(|value| value.as_str() != emoji)
            .cloned()
            .collect();
    }

    let mut appended = current.to_vec();
    appended.push(emoji.to_string());
    let overflow = appended.len().saturating_sub(limit);
    appended.drain(..overflow);
    appended
}
