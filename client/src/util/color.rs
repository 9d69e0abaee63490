//! Decorative avatar colors.
//!
//! Purely cosmetic: the same id always maps to the same palette entry and
//! nothing is persisted.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Fixed avatar palette, indexed by `id mod AVATAR_PALETTE.len()`.
pub const AVATAR_PALETTE: [&str; 8] = [
    "#25d366", "#128c7e", "#34b7f1", "#7e57c2", "#ef6c00", "#d81b60", "#00897b", "#5c6bc0",
];

/// Palette color for a user id. Negative ids wrap instead of panicking.
#[must_use]
pub fn avatar_color(id: i64) -> &'static str {
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = id.rem_euclid(AVATAR_PALETTE.len() as i64) as usize;
    AVATAR_PALETTE[index]
}

/// Up to two uppercase initials for an avatar tile, `?` when the name is blank.
#[must_use]
pub fn initials(name: &str) -> String {
    let mut parts = name.split(|c: char| c.is_whitespace() || c == '_' || c == '.' || c == '-').filter(|p| !p.is_empty());
    let first = parts.next().and_then(|p| p.chars().next());
    let second = parts.next().and_then(|p| p.chars().next());
    match (first, second) {
        (Some(a), Some(b)) => format!("{}{}", a.to_uppercase(), b.to_uppercase()),
        (Some(a), None) => a.to_uppercase().to_string(),
        _ => "?".to_owned(),
    }
}
