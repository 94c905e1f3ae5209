//! Canonical text forms written to call history logs.
//!
//! Arguments are logged as a parenthesised tuple of their `canonical_repr`
//! (`('hello',)`, `(42,)`, `(b'\x00',)`), results as their `canonical_text`
//! (a key logs as the bare key).

/// Text rendering of a value for history logs.
pub trait CanonicalText {
    /// Unambiguous form, used inside argument tuples. Strings are quoted.
    fn canonical_repr(&self) -> String;

    /// Plain form, used for results. Defaults to the repr.
    fn canonical_text(&self) -> String {
        self.canonical_repr()
    }
}

/// An operation's positional arguments, rendered as one tuple.
pub trait CanonicalArgs {
    /// Renders the whole argument list, e.g. `('a', 1)`.
    fn canonical_args(&self) -> String;
}

/// Joins rendered items into tuple syntax; a single item keeps its trailing comma.
pub fn render_tuple(items: &[String]) -> String {
    match items {
        [] => "()".to_string(),
        [single] => format!("({},)", single),
        many => format!("({})", many.join(", ")),
    }
}

/// Quotes text, preferring single quotes unless the text contains one and no double quote.
pub fn quote_text(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Renders bytes as a `b'...'` literal, escaping anything outside printable ASCII.
pub fn quote_bytes(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out.push(quote as char);
    out
}

/// Float form that always shows a fractional part or exponent (`1.0`, `2.5`, `1e300`).
pub fn float_text(value: f64) -> String {
    format!("{:?}", value)
}

impl CanonicalText for String {
    fn canonical_repr(&self) -> String {
        quote_text(self)
    }

    fn canonical_text(&self) -> String {
        self.clone()
    }
}

impl CanonicalText for Vec<u8> {
    fn canonical_repr(&self) -> String {
        quote_bytes(self)
    }
}

impl CanonicalText for i64 {
    fn canonical_repr(&self) -> String {
        self.to_string()
    }
}

impl CanonicalText for u64 {
    fn canonical_repr(&self) -> String {
        self.to_string()
    }
}

impl CanonicalText for f64 {
    fn canonical_repr(&self) -> String {
        float_text(*self)
    }
}

impl CanonicalText for bool {
    fn canonical_repr(&self) -> String {
        let text = if *self { "True" } else { "False" };
        text.to_string()
    }
}

impl CanonicalText for () {
    fn canonical_repr(&self) -> String {
        "None".to_string()
    }
}

impl<T: CanonicalText> CanonicalText for Option<T> {
    fn canonical_repr(&self) -> String {
        self.as_ref()
            .map_or_else(|| "None".to_string(), CanonicalText::canonical_repr)
    }

    fn canonical_text(&self) -> String {
        self.as_ref()
            .map_or_else(|| "None".to_string(), CanonicalText::canonical_text)
    }
}

impl CanonicalArgs for () {
    fn canonical_args(&self) -> String {
        render_tuple(&[])
    }
}

impl<A: CanonicalText> CanonicalArgs for (A,) {
    fn canonical_args(&self) -> String {
        render_tuple(&[self.0.canonical_repr()])
    }
}

impl<A: CanonicalText, B: CanonicalText> CanonicalArgs for (A, B) {
    fn canonical_args(&self) -> String {
        render_tuple(&[self.0.canonical_repr(), self.1.canonical_repr()])
    }
}

impl<A: CanonicalText, B: CanonicalText, C: CanonicalText> CanonicalArgs for (A, B, C) {
    fn canonical_args(&self) -> String {
        render_tuple(&[
            self.0.canonical_repr(),
            self.1.canonical_repr(),
            self.2.canonical_repr(),
        ])
    }
}
