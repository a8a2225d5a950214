use logos::Logos;

/// The classes of raw lexemes the input is split into, before they are looked up in the
/// registry.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum RawKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("\\ ")]
    EscapedSpace,

    /// A backslash and the function-name characters after it.
    #[regex(r"\\[a-zA-Z()|]*")]
    Escape,

    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,

    #[regex(r"[a-zA-Z]")]
    Letter,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl RawKind {
    /// Returns true if the lexeme carries no meaning.
    pub fn is_whitespace(self) -> bool {
        matches!(self, RawKind::Whitespace | RawKind::EscapedSpace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Compares the raw lexemes produced for the input to the expected ones.
    fn compare_lexemes<const N: usize>(input: &str, expected: [(RawKind, &str); N]) {
        let mut lexer = RawKind::lexer(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn fraction() {
        compare_lexemes(
            "\\frac{2.5}{x}",
            [
                (RawKind::Escape, "\\frac"),
                (RawKind::Symbol, "{"),
                (RawKind::Number, "2.5"),
                (RawKind::Symbol, "}"),
                (RawKind::Symbol, "{"),
                (RawKind::Letter, "x"),
                (RawKind::Symbol, "}"),
            ],
        );
    }

    #[test]
    fn escapes_run_into_delimiters() {
        compare_lexemes(
            "\\left(8\\ -9\\right)",
            [
                (RawKind::Escape, "\\left("),
                (RawKind::Number, "8"),
                (RawKind::EscapedSpace, "\\ "),
                (RawKind::Symbol, "-"),
                (RawKind::Number, "9"),
                (RawKind::Escape, "\\right)"),
            ],
        );
    }

    #[test]
    fn letters_are_single() {
        compare_lexemes(
            "2xy =  3",
            [
                (RawKind::Number, "2"),
                (RawKind::Letter, "x"),
                (RawKind::Letter, "y"),
                (RawKind::Whitespace, " "),
                (RawKind::Symbol, "="),
                (RawKind::Whitespace, "  "),
                (RawKind::Number, "3"),
            ],
        );
    }
}
