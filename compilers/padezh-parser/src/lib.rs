pub mod parser;
pub mod token;
pub mod form;

use std::fmt;

use tracing::trace;

use crate::parser::{parse_with_spans, RawToken};
use crate::token::{CasingPattern, Segment, SegmentKind};

pub use form::parse_form_codes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupFault {
    Nested,
    Unopened,
    Unclosed,
}

impl fmt::Display for MarkupFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupFault::Nested => write!(f, "marker opened inside a marked span"),
            MarkupFault::Unopened => write!(f, "closing marker without an opening one"),
            MarkupFault::Unclosed => write!(f, "marked span is never closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("malformed markup at byte {position}: {fault}")]
    MalformedMarkup { position: usize, fault: MarkupFault },

    #[error("invalid markers: {0}")]
    InvalidMarkers(String),
}

/// Opening and closing bracket markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self { open: "[[".to_string(), close: "]]".to_string() }
    }
}

impl Markers {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, SegmentError> {
        let markers = Self { open: open.into(), close: close.into() };
        markers.validate()?;
        Ok(markers)
    }

    fn validate(&self) -> Result<(), SegmentError> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(SegmentError::InvalidMarkers("markers must not be empty".to_string()));
        }
        if self.open == self.close {
            return Err(SegmentError::InvalidMarkers(format!(
                "opening and closing markers are both {:?}",
                self.open
            )));
        }
        if self.open.chars().chain(self.close.chars()).any(|c| c.is_alphanumeric()) {
            return Err(SegmentError::InvalidMarkers(
                "markers must not contain word characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// What bracket markup means for the words it encloses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPolicy {
    /// Marked words are exceptions and stay as written.
    FreezeMarked,
    /// Only marked words are inflected.
    InflectMarked,
}

impl MarkerPolicy {
    fn kind_for(self, inside_markers: bool) -> SegmentKind {
        match (self, inside_markers) {
            (MarkerPolicy::FreezeMarked, false) | (MarkerPolicy::InflectMarked, true) => {
                SegmentKind::Inflectable
            }
            _ => SegmentKind::Frozen,
        }
    }
}

pub const DEFAULT_INVARIANT_INFIXES: [&str; 2] = ["на", "и"];

/// Splits phrases into [`Segment`]s.
#[derive(Debug, Clone)]
pub struct Segmenter {
    markers: Markers,
    invariant_infixes: Vec<String>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            invariant_infixes: DEFAULT_INVARIANT_INFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markers(mut self, markers: Markers) -> Result<Self, SegmentError> {
        markers.validate()?;
        self.markers = markers;
        Ok(self)
    }

    /// Words that, inside a hyphenated compound, freeze themselves and the
    /// rest of the compound ("Ростов-на-Дону").
    pub fn with_invariant_infixes<I, S>(mut self, infixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.invariant_infixes = infixes.into_iter().map(|s| s.as_ref().to_lowercase()).collect();
        self
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn segment<'a>(&self, input: &'a str, policy: MarkerPolicy) -> Result<Phrase<'a>, SegmentError> {
        let mut segments = Vec::new();
        let mut open_at: Option<usize> = None;

        for (span, raw) in parse_with_spans(input, &self.markers) {
            let text = &input[span.start..span.end];
            let kind = match raw {
                RawToken::Open => {
                    if open_at.is_some() {
                        return Err(SegmentError::MalformedMarkup {
                            position: span.start,
                            fault: MarkupFault::Nested,
                        });
                    }
                    open_at = Some(span.start);
                    SegmentKind::Marker
                }
                RawToken::Close => {
                    if open_at.take().is_none() {
                        return Err(SegmentError::MalformedMarkup {
                            position: span.start,
                            fault: MarkupFault::Unopened,
                        });
                    }
                    SegmentKind::Marker
                }
                RawToken::Word(_) => policy.kind_for(open_at.is_some()),
                RawToken::Space(_) | RawToken::Hyphen | RawToken::Punct(_) => SegmentKind::Separator,
            };

            segments.push(Segment { span, text, kind, casing: CasingPattern::detect(text) });
        }

        if let Some(position) = open_at {
            return Err(SegmentError::MalformedMarkup { position, fault: MarkupFault::Unclosed });
        }

        self.freeze_compound_tails(&mut segments);
        trace!(input, segments = segments.len(), "segmented phrase");

        Ok(Phrase { source: input, segments })
    }

    /// In "Ростов-на-Дону" only the part before the invariant infix declines.
    fn freeze_compound_tails(&self, segments: &mut [Segment<'_>]) {
        let mut after_word = false;
        let mut after_hyphen = false;
        let mut frozen_tail = false;

        for segment in segments.iter_mut() {
            match segment.kind {
                SegmentKind::Marker => {}
                SegmentKind::Separator if segment.is_hyphen() => {
                    after_hyphen = after_word;
                    after_word = false;
                }
                SegmentKind::Separator => {
                    after_word = false;
                    after_hyphen = false;
                    frozen_tail = false;
                }
                SegmentKind::Inflectable | SegmentKind::Frozen => {
                    if after_hyphen {
                        let lowered = segment.text.to_lowercase();
                        if self.invariant_infixes.iter().any(|infix| *infix == lowered) {
                            frozen_tail = true;
                        }
                    } else {
                        frozen_tail = false;
                    }
                    if frozen_tail {
                        segment.kind = SegmentKind::Frozen;
                    }
                    after_word = true;
                    after_hyphen = false;
                }
            }
        }
    }
}

/// A segmented phrase. Segment spans tile the source string.
#[derive(Debug, Clone)]
pub struct Phrase<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> Phrase<'a> {
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Indices of the segments the inflectors may rewrite.
    pub fn inflectable(&self) -> impl Iterator<Item = (usize, &Segment<'a>)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.kind == SegmentKind::Inflectable)
    }

    /// Concatenation of every segment, markup included.
    pub fn to_source(&self) -> String {
        self.segments.iter().map(|s| s.text).collect()
    }

    /// Output text: markers dropped, inflectable segments passed through
    /// `replace` (returning `None` keeps the original text).
    pub fn render<F>(&self, mut replace: F) -> String
    where
        F: FnMut(usize, &Segment<'a>) -> Option<String>,
    {
        let mut out = String::with_capacity(self.source.len());
        for (i, segment) in self.segments.iter().enumerate() {
            match segment.kind {
                SegmentKind::Marker => {}
                SegmentKind::Inflectable => match replace(i, segment) {
                    Some(text) => out.push_str(&text),
                    None => out.push_str(segment.text),
                },
                SegmentKind::Frozen | SegmentKind::Separator => out.push_str(segment.text),
            }
        }
        out
    }
}
