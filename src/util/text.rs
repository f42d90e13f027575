use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns (CJK and emoji count 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, appending "..." when cut.
///
/// Widths of 3 or less have no room for the ellipsis, so as many whole
/// characters as fit are returned instead. Borrows when nothing is cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(take_columns(s, max_width).to_string());
    }
    let head = take_columns(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{head}{ELLIPSIS}"))
}

/// Longest prefix of `s` that fits in `width` columns.
fn take_columns(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Pad `s` with spaces on both sides to fill `width` columns.
pub fn center_in(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width);
    let slack = width.saturating_sub(display_width(&text));
    let left = slack / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(slack - left))
}

/// Upper-case the first character: "bulbasaur" → "Bulbasaur".
pub fn capitalize(s: &str) -> Cow<'_, str> {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if !first.is_uppercase() => {
            Cow::Owned(first.to_uppercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(s),
    }
}

fn is_stripped_control(b: u8) -> bool {
    b == 0x1b || b == 0x7f || (b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r')
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Names and URLs come from a remote API and are drawn straight into the
/// terminal, so CSI (`ESC [`) and OSC (`ESC ]` .. BEL / ST) sequences, bare
/// ESC, DEL and C0 controls other than tab/newline/CR are removed.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    if !bytes.iter().any(|&b| is_stripped_control(b)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            0x1b if bytes.get(i + 1) == Some(&b'[') => {
                i += 2;
                // Parameter bytes until the final byte 0x40..=0x7e
                while i < bytes.len() {
                    let c = bytes[i];
                    i += 1;
                    if (0x40..=0x7e).contains(&c) {
                        break;
                    }
                }
            }
            0x1b if bytes.get(i + 1) == Some(&b']') => {
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == 0x07 {
                        i += 1;
                        break;
                    }
                    if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            b if is_stripped_control(b) => i += 1,
            _ => {
                let start = i;
                while i < bytes.len() && !is_stripped_control(bytes[i]) {
                    i += 1;
                }
                // Only ASCII bytes stop the run, so this slice is on char boundaries
                out.push_str(&s[start..i]);
            }
        }
    }

    Cow::Owned(out)
}
