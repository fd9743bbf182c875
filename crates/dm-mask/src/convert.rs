//! Masking rules, one per sensitive type.
//!
//! Rules are pure string transformations over Unicode scalar values: every
//! length, prefix and suffix below counts characters, not bytes. Inputs that
//! are too short for a rule's prefix/suffix window fall back to the fixed
//! [`FULL_MASK`], even when that is longer than the input.

use crate::SensitiveType;

/// Fixed replacement used in the middle of masked values and as the
/// short-input fallback.
pub const FULL_MASK: &str = "******";

/// Placeholder emitted for [`SensitiveType::All`], independent of input length.
pub const ALL_MASK: &str = "***";

const MASK_CHAR: char = '*';

/// Literal kept as-is so genuinely null fields stay visible.
const NULL_LITERAL: &str = "null";

/// Mask `value` according to `sensitive_type`.
///
/// Blank values become the empty string and a literal `null` (any ASCII case)
/// is returned unchanged; both checks run before the category rule.
pub fn convert_msg(sensitive_type: SensitiveType, value: &str) -> String {
    if is_blank(value) {
        return String::new();
    }
    if value.eq_ignore_ascii_case(NULL_LITERAL) {
        return value.to_string();
    }

    match sensitive_type {
        SensitiveType::ChineseName => chinese_name(value),
        SensitiveType::IdCard => id_card(value),
        SensitiveType::FixedPhone => fixed_phone(value),
        SensitiveType::MobilePhone => mobile_phone(value),
        SensitiveType::Address => address(value),
        SensitiveType::Email => email(value),
        SensitiveType::BankCard => bank_card(value),
        SensitiveType::BankName => bank_name(value),
        SensitiveType::CnapsCode => cnaps_code(value),
        SensitiveType::BankCardDate => bank_card_date(value),
        SensitiveType::All => all(value),
        SensitiveType::Null => String::new(),
    }
}

/// Keep the first character and pad with one `*`: `李四` → `李*`.
///
/// Longer names are truncated to two characters.
pub fn chinese_name(full_name: &str) -> String {
    if is_blank(full_name) {
        return full_name.to_string();
    }
    right_pad(left(full_name, 1), 2)
}

/// Keep 3 leading and 3 trailing characters of an identity number.
pub fn id_card(id: &str) -> String {
    keep_both(id, 8, 3, 3)
}

/// Mask all but the last four digits, preserving length: `****1234`.
pub fn fixed_phone(phone: &str) -> String {
    if is_blank(phone) {
        return phone.to_string();
    }
    let len = char_len(phone);
    if len > 4 {
        return left_pad(right(phone, 4), len);
    }
    FULL_MASK.to_string()
}

/// Keep 3 leading and 4 trailing digits of a mobile number.
pub fn mobile_phone(phone: &str) -> String {
    keep_both(phone, 7, 3, 4)
}

/// Keep 2 leading and 2 trailing characters of an address.
pub fn address(address: &str) -> String {
    keep_both(address, 4, 2, 2)
}

/// Hide everything before the last `.`: `test@example.com` → `******.com`.
pub fn email(email: &str) -> String {
    if is_blank(email) {
        return email.to_string();
    }
    match email.rfind('.') {
        Some(dot) if email[..dot].chars().count() > 1 => format!("{FULL_MASK}{}", &email[dot..]),
        _ => FULL_MASK.to_string(),
    }
}

/// Keep 2 leading and 4 trailing digits of a card number.
pub fn bank_card(card_num: &str) -> String {
    keep_both(card_num, 6, 2, 4)
}

/// Keep the first 4 characters (1 for short names), preserving length.
pub fn bank_name(bank_name: &str) -> String {
    if is_blank(bank_name) {
        return bank_name.to_string();
    }
    let len = char_len(bank_name);
    let keep = if len > 4 { 4 } else { 1 };
    right_pad(left(bank_name, keep), len)
}

/// Keep 4 leading and 4 trailing characters of a CNAPS or credit code.
pub fn cnaps_code(code: &str) -> String {
    keep_both(code, 8, 4, 4)
}

/// Keep the first and last characters with `*` between: `0126` → `0**6`.
///
/// The last character is left-padded to the full length and one leading `*`
/// is dropped before the first character is prepended. Two-character inputs
/// come back unchanged; a single character is repeated (`5` → `55`) unless
/// it is itself `*`.
pub fn bank_card_date(date: &str) -> String {
    if is_blank(date) {
        return date.to_string();
    }
    let padded = left_pad(right(date, 1), char_len(date));
    let tail = padded.strip_prefix(MASK_CHAR).unwrap_or(padded.as_str());
    format!("{}{}", left(date, 1), tail)
}

/// Replace the whole value with [`ALL_MASK`].
pub fn all(_data: &str) -> String {
    ALL_MASK.to_string()
}

/// `prefix + FULL_MASK + suffix` when the value is longer than `threshold`,
/// otherwise [`FULL_MASK`]. Blank values are returned unchanged.
fn keep_both(value: &str, threshold: usize, prefix: usize, suffix: usize) -> String {
    if is_blank(value) {
        return value.to_string();
    }
    if char_len(value) > threshold {
        return format!("{}{FULL_MASK}{}", left(value, prefix), right(value, suffix));
    }
    FULL_MASK.to_string()
}

/// Empty or made only of blank characters (see [`is_blank_char`]).
fn is_blank(value: &str) -> bool {
    value.chars().all(is_blank_char)
}

/// Space separators, line and paragraph separators and the ASCII control
/// whitespace. No-break spaces (U+00A0, U+2007, U+202F) and NEL are content.
pub(crate) fn is_blank_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' | '\u{1c}'..='\u{1f}' => true,
        '\u{a0}' | '\u{2007}' | '\u{202f}' => false,
        _ => c.is_whitespace() && !c.is_control(),
    }
}

/// Strip leading and trailing characters at or below U+0020 (spaces and
/// ASCII control characters). Other Unicode whitespace is kept.
pub(crate) fn trim_value(value: &str) -> &str {
    value.trim_matches(|c: char| c <= ' ')
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// First `n` characters of `value` (all of it when shorter).
fn left(value: &str, n: usize) -> &str {
    match value.char_indices().nth(n) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Last `n` characters of `value` (all of it when shorter).
fn right(value: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match value.char_indices().rev().nth(n - 1) {
        Some((start, _)) => &value[start..],
        None => value,
    }
}

/// Pad `value` on the right with `*` up to `size` characters.
fn right_pad(value: &str, size: usize) -> String {
    let pad = size.saturating_sub(char_len(value));
    let mut out = String::with_capacity(value.len() + pad);
    out.push_str(value);
    out.extend(std::iter::repeat(MASK_CHAR).take(pad));
    out
}

/// Pad `value` on the left with `*` up to `size` characters.
fn left_pad(value: &str, size: usize) -> String {
    let pad = size.saturating_sub(char_len(value));
    let mut out = String::with_capacity(value.len() + pad);
    out.extend(std::iter::repeat(MASK_CHAR).take(pad));
    out.push_str(value);
    out
}
