//! Single-word inflection.

use padezh_morph::{MorphProvider, Parse};
use padezh_parser::token::CasingPattern;
use padezh_protocol::{FormSpec, Grammemes};
use tracing::debug;

/// The parse to inflect: the best one carrying every requested hint, or the
/// best one overall when none does.
pub fn select_parse(parses: &[Parse], hints: Grammemes) -> Option<&Parse> {
    let hints = hints & Grammemes::HINTS;
    if !hints.is_empty() {
        if let Some(parse) = parses.iter().find(|p| p.has_hints(hints)) {
            return Some(parse);
        }
    }
    parses.first()
}

/// Inflects one word. Unknown words and unrealizable forms come back as given.
pub fn inflect_word<P>(provider: &P, word: &str, form: &FormSpec) -> String
where
    P: MorphProvider + ?Sized,
{
    inflect_cased(provider, word, CasingPattern::detect(word), form)
}

/// [`inflect_word`] for a word whose casing is already known.
pub fn inflect_cased<P>(provider: &P, word: &str, casing: CasingPattern, form: &FormSpec) -> String
where
    P: MorphProvider + ?Sized,
{
    if form.is_empty() {
        return word.to_string();
    }
    let parses = provider.analyze(word);
    match select_parse(&parses, form.hints) {
        Some(parse) => realize(provider, word, casing, parse, form),
        None => {
            debug!(word, "not in dictionary, left unchanged");
            word.to_string()
        }
    }
}

/// Produces `form` of an already chosen parse, cast into `casing`.
pub fn realize<P>(
    provider: &P,
    word: &str,
    casing: CasingPattern,
    parse: &Parse,
    form: &FormSpec,
) -> String
where
    P: MorphProvider + ?Sized,
{
    if form.is_empty() {
        return word.to_string();
    }
    match provider.inflect(parse, form) {
        Some(produced) => casing.apply(word, &produced),
        None => {
            debug!(word, "form not realizable, left unchanged");
            word.to_string()
        }
    }
}
