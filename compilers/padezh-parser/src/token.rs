#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A word the inflectors may rewrite
    Inflectable,
    /// A word copied through verbatim
    Frozen,
    /// Whitespace, hyphen or punctuation
    Separator,
    /// Bracket markup; kept for layout, never rendered
    Marker,
}

/// Capitalisation of the original word, re-applied to its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasingPattern {
    AllUpper,
    TitleCase,
    AllLower,
    Mixed,
}

impl CasingPattern {
    pub fn detect(text: &str) -> Self {
        let mut letters = text.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return CasingPattern::AllLower;
        };
        let rest: Vec<char> = letters.collect();

        let rest_upper = rest.iter().all(|c| c.is_uppercase());
        let rest_lower = rest.iter().all(|c| c.is_lowercase());

        match (first.is_uppercase(), rest_upper, rest_lower) {
            // A single capital letter reads as a capitalised word.
            (true, _, true) => CasingPattern::TitleCase,
            (true, true, false) => CasingPattern::AllUpper,
            (false, _, true) => CasingPattern::AllLower,
            _ => CasingPattern::Mixed,
        }
    }

    /// Casts `produced` (as returned by the morphology provider) into this
    /// pattern. `original` is the word the pattern was detected on.
    pub fn apply(self, original: &str, produced: &str) -> String {
        match self {
            CasingPattern::AllUpper => produced.to_uppercase(),
            CasingPattern::TitleCase => {
                let mut chars = produced.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            CasingPattern::AllLower => produced.to_string(),
            CasingPattern::Mixed => {
                let mut upper_at = original.chars().map(char::is_uppercase);
                let mut out = String::with_capacity(produced.len());
                for c in produced.chars() {
                    if upper_at.next().unwrap_or(false) {
                        out.extend(c.to_uppercase());
                    } else {
                        out.push(c);
                    }
                }
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub span: Span,
    pub text: &'a str,
    pub kind: SegmentKind,
    pub casing: CasingPattern,
}

impl<'a> Segment<'a> {
    pub fn is_word(&self) -> bool {
        matches!(self.kind, SegmentKind::Inflectable | SegmentKind::Frozen)
    }

    pub fn is_hyphen(&self) -> bool {
        self.kind == SegmentKind::Separator && self.text == "-"
    }
}
