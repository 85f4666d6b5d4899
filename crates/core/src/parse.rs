//! Lenient number parsing for values typed into forms or sent loosely by the backend.

/// Parse the leading integer of `input`, the way a browser's `parseInt` does:
/// leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit, and `None` means no digits were found.
///
/// Values beyond `i64` saturate.
pub fn leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    let mut seen = false;
    for d in digits {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(d - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}
