//! Directive keywords
//!
//!     Directives are the `%`-prefixed words of the header (`%class`, `%start`, ...) plus the
//!     `%map` directive that opens the state machine body. The scanner matches any `%word`
//!     and resolves it against the static table below, so an unknown directive is reported
//!     by name instead of as a stray `%`.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    Start,
    Class,
    FsmFile,
    FsmClass,
    Header,
    Include,
    Package,
    Import,
    Declare,
    Access,
    Map,
    Return,
}

const TABLE: &[(&str, Keyword)] = &[
    ("%start", Keyword::Start),
    ("%class", Keyword::Class),
    ("%fsmfile", Keyword::FsmFile),
    ("%fsmclass", Keyword::FsmClass),
    ("%header", Keyword::Header),
    ("%include", Keyword::Include),
    ("%package", Keyword::Package),
    ("%import", Keyword::Import),
    ("%declare", Keyword::Declare),
    ("%access", Keyword::Access),
    ("%map", Keyword::Map),
    ("%return", Keyword::Return),
];

static BY_NAME: Lazy<HashMap<&'static str, Keyword>> =
    Lazy::new(|| TABLE.iter().copied().collect());

impl Keyword {
    /// Resolve a `%word` lexeme, leading `%` included.
    pub fn lookup(text: &str) -> Option<Keyword> {
        BY_NAME.get(text).copied()
    }

    pub fn as_str(&self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, keyword)| keyword == self)
            .map(|(text, _)| *text)
            .unwrap_or("%?")
    }

    pub fn all() -> impl Iterator<Item = Keyword> {
        TABLE.iter().map(|(_, keyword)| *keyword)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_round_trips_every_keyword() {
        for keyword in Keyword::all() {
            assert_eq!(Keyword::lookup(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Keyword::lookup("%map"), Some(Keyword::Map));
        assert_eq!(Keyword::lookup("%MAP"), None);
        assert_eq!(Keyword::lookup("map"), None);
    }
}
