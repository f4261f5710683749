//! Line-ending normalization.

use std::borrow::Cow;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Target line-ending style for generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eol {
    Lf,
    Crlf,
}

impl Eol {
    #[must_use]
    pub const fn sequence(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// The platform's native line ending.
    #[must_use]
    pub const fn platform() -> Self {
        if cfg!(windows) {
            Self::Crlf
        } else {
            Self::Lf
        }
    }
}

impl Default for Eol {
    fn default() -> Self {
        Self::platform()
    }
}

impl FromStr for Eol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lf" | "LF" => Ok(Self::Lf),
            "crlf" | "CRLF" => Ok(Self::Crlf),
            other => Err(Error::Config(format!(
                "unknown line ending '{other}' (expected lf or crlf)"
            ))),
        }
    }
}

/// Rewrite every line-break sequence in `text` to the configured style.
///
/// Rendered templates carry the platform's line endings, so this is a
/// no-op unless the configured target differs from the platform default.
#[must_use]
pub fn normalize(text: &str, eol: Eol) -> Cow<'_, str> {
    if eol == Eol::platform() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(eol.sequence());
            }
            '\n' => out.push_str(eol.sequence()),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_default_is_untouched() {
        let text = "a\nb\r\nc";
        assert!(matches!(normalize(text, Eol::platform()), Cow::Borrowed(_)));
    }

    #[cfg(not(windows))]
    #[test]
    fn crlf_target_rewrites_all_break_styles() {
        assert_eq!(normalize("a\nb\rc\r\nd", Eol::Crlf), "a\r\nb\r\nc\r\nd");
    }

    #[cfg(windows)]
    #[test]
    fn lf_target_rewrites_all_break_styles() {
        assert_eq!(normalize("a\nb\rc\r\nd", Eol::Lf), "a\nb\nc\nd");
    }
}
