//! Single-pass sensitive value replacer.
//!
//! A flat state machine walks the input once and copies it to the output,
//! substituting the values of registered keys on the way:
//!
//! | State             | Input                  | Next              |
//! |-------------------|------------------------|-------------------|
//! | `Start`           | `"`                    | `InKey`           |
//! | `InKey`           | `"`                    | `AfterKey`        |
//! | `AfterKey`        | `:` / `=`, then `"`    | `InStringValue`   |
//! | `AfterKey`        | `:` / `=`, then `{`/`[`| `Start`           |
//! | `AfterKey`        | `:` / `=`, then other  | `InValue`         |
//! | `InStringValue`   | `"` (mask value)       | `AfterValue`      |
//! | `InValue`         | `,` / `}` (mask value) | `Start`           |
//! | `AfterValue`      | any                    | `Start`           |
//!
//! Nesting depth is never tracked. A container opening right after a
//! separator drops back to `Start`, and `Start` finds the next key at
//! whatever depth it appears, so nested objects and arrays of objects are
//! handled without recursion.

use crate::{convert, FieldTypeRegistry};
use std::iter::Peekable;
use std::str::CharIndices;
use tracing::trace;

/// Mask every registered field value in `text`.
///
/// Unregistered values, keys, punctuation and whitespace are copied through
/// unchanged. Malformed input never fails; it degrades to best-effort output.
pub fn mask<R>(text: &str, registry: &R) -> String
where
    R: FieldTypeRegistry + ?Sized,
{
    if text.is_empty() {
        return String::new();
    }

    let mut scanner = Scanner::new(text, registry);
    scanner.run();
    scanner.finish()
}

/// Like [`mask`], but a missing input stays missing.
pub fn mask_opt<R>(text: Option<&str>, registry: &R) -> Option<String>
where
    R: FieldTypeRegistry + ?Sized,
{
    text.map(|t| mask(t, registry))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InKey,
    AfterKey,
    InStringValue,
    InValue,
    AfterValue,
}

/// Half-open byte range `[start, end)` into the scanned text.
#[derive(Debug, Clone, Copy, Default)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn open(start: usize) -> Self {
        Self { start, end: start }
    }

    fn close(&mut self, end: usize) {
        self.end = end;
    }

    fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

struct Scanner<'a, R: ?Sized> {
    text: &'a str,
    registry: &'a R,
    chars: Peekable<CharIndices<'a>>,
    state: State,
    key: Span,
    value: Span,
    out: String,
    masked: usize,
}

impl<'a, R> Scanner<'a, R>
where
    R: FieldTypeRegistry + ?Sized,
{
    fn new(text: &'a str, registry: &'a R) -> Self {
        Self {
            text,
            registry,
            chars: text.char_indices().peekable(),
            state: State::Start,
            key: Span::default(),
            value: Span::default(),
            out: String::with_capacity(text.len()),
            masked: 0,
        }
    }

    fn run(&mut self) {
        while let Some((i, c)) = self.chars.next() {
            match self.state {
                State::Start => {
                    if c == '"' {
                        self.key = Span::open(i + 1);
                        self.state = State::InKey;
                    }
                    self.out.push(c);
                }
                State::InKey => {
                    if c == '"' {
                        self.key.close(i);
                        self.state = State::AfterKey;
                    }
                    self.out.push(c);
                }
                State::AfterKey => {
                    self.out.push(c);
                    if c == ':' || c == '=' {
                        self.state = self.after_separator();
                    }
                }
                State::InStringValue => {
                    if c == '"' {
                        self.value.close(i);
                        self.emit_value();
                        self.out.push(c);
                        self.state = State::AfterValue;
                    }
                }
                State::InValue => {
                    if c == ',' || c == '}' {
                        self.value.close(i);
                        self.emit_value();
                        self.out.push(c);
                        self.state = State::Start;
                    }
                }
                State::AfterValue => {
                    self.out.push(c);
                    self.state = State::Start;
                }
            }
        }
    }

    /// Echo the whitespace after a separator and sniff the value type.
    fn after_separator(&mut self) -> State {
        while let Some(&(_, c)) = self.chars.peek() {
            if !convert::is_blank_char(c) {
                break;
            }
            self.out.push(c);
            self.chars.next();
        }

        match self.chars.peek().copied() {
            Some((i, '"')) => {
                self.chars.next();
                self.out.push('"');
                self.value = Span::open(i + 1);
                State::InStringValue
            }
            Some((_, c @ ('{' | '['))) => {
                self.chars.next();
                self.out.push(c);
                State::Start
            }
            // Bare value chars are not echoed; emit_value writes them once
            // the delimiter is seen.
            Some((i, _)) => {
                self.value = Span::open(i);
                State::InValue
            }
            None => {
                self.value = Span::open(self.text.len());
                State::InValue
            }
        }
    }

    /// Write the current value, masked if its key is registered.
    fn emit_value(&mut self) {
        if self.value.is_empty() {
            return;
        }

        let raw = self.value.slice(self.text);
        let key = self.key.slice(self.text);
        match self.registry.get(key) {
            Some(sensitive_type) => {
                trace!(key, sensitive_type = %sensitive_type, "Masking field value");
                self.out.push_str(&convert::convert_msg(
                    sensitive_type,
                    convert::trim_value(raw),
                ));
                self.masked += 1;
            }
            None => self.out.push_str(raw),
        }
    }

    /// Flush a value left open by the end of input and return the output.
    fn finish(mut self) -> String {
        if matches!(self.state, State::InValue | State::InStringValue) {
            self.value.close(self.text.len());
            self.emit_value();
        }

        trace!(
            input_len = self.text.len(),
            masked = self.masked,
            "Finished masking scan"
        );
        self.out
    }
}
