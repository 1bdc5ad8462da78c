//! Thousands grouping

use std::fmt::Display;

/// Separator placed between digit groups
pub const GROUP_SEPARATOR: char = ',';

/// Render a number with `,` between every three digits of its integer part
///
/// ```
/// assert_eq!(utils::format_number(1234567), "1,234,567");
/// assert_eq!(utils::format_number(-1234.5678), "-1,234.5678");
/// ```
pub fn format_number<N: Display>(value: N) -> String {
    format_number_str(&value.to_string())
}

/// Apply thousands grouping to an already rendered number
///
/// Only the leading run of digits (after an optional sign) is grouped.
/// Input that does not start that way is returned unchanged.
pub fn format_number_str(rendered: &str) -> String {
    let (sign, rest) = match rendered.as_bytes().first() {
        Some(b'-') | Some(b'+') => rendered.split_at(1),
        _ => ("", rendered),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return rendered.to_string();
    }
    let (digits, tail) = rest.split_at(digits_end);

    let mut out = String::with_capacity(rendered.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out.push_str(tail);
    out
}
