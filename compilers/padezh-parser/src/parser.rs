use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::map,
    IResult,
};
use crate::token::Span;
use crate::Markers;

/// Letters, digits, apostrophes and the combining stress mark make up words.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '\u{301}'
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken<'a> {
    Word(&'a str),
    Space(&'a str),
    Hyphen,
    Punct(&'a str),
    Open,
    Close,
}

/// Lexes the whole input. Every byte ends up in exactly one token, so the
/// spans tile the input.
pub fn parse_with_spans<'a>(original_input: &'a str, markers: &Markers) -> Vec<(Span, RawToken<'a>)> {
    let mut input = original_input;
    let mut result = Vec::new();

    while !input.is_empty() {
        let parse_res: IResult<&str, RawToken> = alt((
            map(tag(markers.open.as_str()), |_| RawToken::Open),
            map(tag(markers.close.as_str()), |_| RawToken::Close),
            map(take_while1(is_word_char), RawToken::Word),
            map(take_while1(char::is_whitespace), RawToken::Space),
            map(char('-'), |_| RawToken::Hyphen),
        ))(input);

        let (next_input, token) = match parse_res {
            Ok(res) => res,
            Err(_) => {
                // Anything else is a one-character punctuation token.
                let len = input.chars().next().map_or(1, char::len_utf8);
                (&input[len..], RawToken::Punct(&input[..len]))
            }
        };

        let start = original_input.len() - input.len();
        let len = input.len() - next_input.len();
        result.push((Span::new(start, start + len), token));
        input = next_input;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_hyphens_and_markers() {
        let tokens: Vec<_> = parse_with_spans("[[Москва]]-сити, да", &Markers::default())
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                RawToken::Open,
                RawToken::Word("Москва"),
                RawToken::Close,
                RawToken::Hyphen,
                RawToken::Word("сити"),
                RawToken::Punct(","),
                RawToken::Space(" "),
                RawToken::Word("да"),
            ]
        );
    }

    #[test]
    fn spans_cover_multibyte_text() {
        let input = "ёж «тут»";
        let spans: Vec<Span> = parse_with_spans(input, &Markers::default())
            .into_iter()
            .map(|(s, _)| s)
            .collect();
        assert_eq!(spans.first().map(|s| s.start), Some(0));
        assert_eq!(spans.last().map(|s| s.end), Some(input.len()));
        assert!(spans.windows(2).all(|w| w[0].end == w[1].start));
    }
}
