// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public identifier formatting
//!
//! Turns an allocated sequence value into the human-readable entry ID
//! printed on forms and certificates. Pure string work, no I/O.

/// Format a sequence value as a public entry identifier.
///
/// The value is zero-padded to `width` digits. A non-empty `prefix` is
/// prepended with a dash (`CAD-000123`). When `group` is set, a dash is
/// inserted every `group` digits from the left, serial-number style
/// (`000-000-001`).
///
/// Values wider than `width` are never truncated; padding is a minimum.
pub fn format_entry_id(prefix: &str, value: u64, width: usize, group: Option<usize>) -> String {
    let digits = format!("{value:0width$}");

    let body = match group {
        Some(g) if g > 0 => {
            let mut grouped = String::with_capacity(digits.len() + digits.len() / g);
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && i % g == 0 {
                    grouped.push('-');
                }
                grouped.push(c);
            }
            grouped
        }
        _ => digits,
    };

    if prefix.is_empty() {
        body
    } else {
        format!("{prefix}-{body}")
    }
}

/// Recover the numeric sequence value from a formatted entry ID.
///
/// Used when seeding a fresh counter from records issued before the
/// atomic allocator existed. Returns `None` for IDs that carry no digits.
pub fn parse_entry_id(entry_id: &str) -> Option<u64> {
    let digits: String = entry_id.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
#[path = "ident_tests.rs"]
mod tests;
