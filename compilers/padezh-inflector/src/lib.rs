//! Phrase-level inflection on top of a [`MorphProvider`].
//!
//! ```text
//! inflect              every unmarked word takes the requested form
//! inflect_marked       only the bracketed words do
//! inflect_collocation  modifiers agree with the head noun
//! plural               the phrase agrees with a count
//! ```

pub mod collocation;
pub mod config;
pub mod error;
pub mod numeral;
pub mod word;

#[cfg(test)]
pub(crate) mod test_support;

pub use collocation::AgreementPlan;
pub use config::InflectorConfig;
pub use error::InflectError;
pub use numeral::NumeralClass;

use padezh_ecs::components::DependencyRole;
use padezh_morph::{MorphProvider, Parse};
use padezh_parser::{parse_form_codes, MarkerPolicy, Phrase, Segmenter};
use padezh_protocol::FormSpec;
use tracing::instrument;

pub struct Inflector<'p, P: MorphProvider + ?Sized> {
    provider: &'p P,
    segmenter: Segmenter,
}

impl<'p, P: MorphProvider + ?Sized> Inflector<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider, segmenter: Segmenter::new() }
    }

    pub fn with_config(provider: &'p P, config: &InflectorConfig) -> Result<Self, InflectError> {
        Ok(Self { provider, segmenter: config.segmenter()? })
    }

    pub fn provider(&self) -> &'p P {
        self.provider
    }

    /// Inflects every word outside `[[...]]` into the form named by `codes`
    /// ("дт", "мн,тв", "пр,имя,ед"). Marked words are kept, markers dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn inflect(&self, phrase: &str, codes: &str) -> Result<String, InflectError> {
        self.inflect_phrase(phrase, &parse_form_codes(codes), false)
    }

    /// Like [`Inflector::inflect`] with the meaning of markup reversed: only
    /// words inside `[[...]]` are inflected.
    #[instrument(level = "debug", skip(self))]
    pub fn inflect_marked(&self, phrase: &str, codes: &str) -> Result<String, InflectError> {
        self.inflect_phrase(phrase, &parse_form_codes(codes), true)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn inflect_collocation(&self, phrase: &str, codes: &str) -> Result<String, InflectError> {
        self.inflect_collocation_to(phrase, &parse_form_codes(codes))
    }

    /// Puts `phrase` into the form that follows the number `count`:
    /// "1 активный пользователь", "2 активных пользователя",
    /// "5 активных пользователей".
    #[instrument(level = "debug", skip(self))]
    pub fn plural(&self, phrase: &str, count: i64) -> Result<String, InflectError> {
        let class = NumeralClass::for_count(count);
        let phrase = self.segmenter.segment(phrase, MarkerPolicy::FreezeMarked)?;

        Ok(self.agree(&phrase, FormSpec::new(), |role, head| match role {
            DependencyRole::Modifier => class.modifier_form(head),
            _ => class.noun_form(),
        }))
    }

    /// Word-by-word inflection. `marked_only` selects which words are touched.
    pub fn inflect_phrase(
        &self,
        phrase: &str,
        form: &FormSpec,
        marked_only: bool,
    ) -> Result<String, InflectError> {
        let policy = if marked_only { MarkerPolicy::InflectMarked } else { MarkerPolicy::FreezeMarked };
        let phrase = self.segmenter.segment(phrase, policy)?;

        Ok(phrase.render(|_, segment| {
            Some(word::inflect_cased(self.provider, segment.text, segment.casing, form))
        }))
    }

    /// Collocation inflection: head and appositions take `form`, modifiers
    /// take its case and agree with the head in the rest.
    pub fn inflect_collocation_to(&self, phrase: &str, form: &FormSpec) -> Result<String, InflectError> {
        let phrase = self.segmenter.segment(phrase, MarkerPolicy::FreezeMarked)?;
        if form.is_empty() {
            return Ok(phrase.render(|_, _| None));
        }

        Ok(self.agree(&phrase, *form, |role, head| match role {
            DependencyRole::Modifier => numeral::agree_with(head, form.case, form.number),
            _ => *form,
        }))
    }

    fn agree<F>(&self, phrase: &Phrase<'_>, form: FormSpec, mut target: F) -> String
    where
        F: FnMut(DependencyRole, &Parse) -> FormSpec,
    {
        match AgreementPlan::build(self.provider, phrase, form.hints) {
            Some(plan) => {
                let head = plan.head().clone();
                plan.render(self.provider, phrase, |role| target(role, &head))
            }
            None => phrase.render(|_, _| None),
        }
    }
}
