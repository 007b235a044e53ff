//! Morphology provider boundary and a dictionary-backed provider.
//!
//! The orchestration crates only talk to [`MorphProvider`]. [`DictionaryAnalyzer`]
//! implements it over a paradigm table: it knows exactly the forms listed in
//! its [`Dictionary`] and does not guess unknown words.

use std::collections::HashMap;

use padezh_protocol::{
    Dictionary, FormSpec, Grammemes, LemmaId, Lexeme, Paradigm, ParadigmId, PartOfSpeech,
};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::Deserialize as _;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum MorphError {
    #[error("form not found for grammemes: {0:?}")]
    FormNotFound(Grammemes),

    #[error("{lexeme} refers to unknown {paradigm}")]
    UnknownParadigm { lexeme: LemmaId, paradigm: ParadigmId },

    #[error("{0} is used more than once")]
    DuplicateLexeme(LemmaId),

    #[error("invalid dictionary archive: {0}")]
    InvalidArchive(String),

    #[error("failed to archive dictionary: {0}")]
    Archive(String),
}

/// One way of reading a surface word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parse {
    /// The analysed word, lower-cased.
    pub word: String,
    pub normal_form: String,
    pub pos: PartOfSpeech,
    /// Form grammemes together with the lexeme's own tags.
    pub grammemes: Grammemes,
    /// Share of this lexeme's weight among all parses of the word.
    pub score: f32,
    pub lemma: LemmaId,
    /// Index of the paradigm ending that produced `word`.
    pub form: usize,
}

impl Parse {
    pub fn is_nominative(&self) -> bool {
        self.grammemes.contains(Grammemes::NOMN)
    }

    pub fn has_hints(&self, hints: Grammemes) -> bool {
        self.grammemes.contains(hints & Grammemes::HINTS)
    }
}

/// The morphology engine seen by the inflection layer.
pub trait MorphProvider {
    /// Candidate parses, best first. Empty for out-of-vocabulary words.
    fn analyze(&self, word: &str) -> Vec<Parse>;

    /// Surface form of `parse`'s lexeme carrying the grammemes of `target`,
    /// or `None` when the lexeme has no such form.
    fn inflect(&self, parse: &Parse, target: &FormSpec) -> Option<String>;
}

/// Generates the word form of `lexeme` that carries `required`.
///
/// Among the matching endings the one sharing most grammemes with `current`
/// wins, so categories the caller left open keep their present value.
pub fn generate(
    lexeme: &Lexeme,
    paradigm: &Paradigm,
    required: Grammemes,
    current: Grammemes,
) -> Result<String, MorphError> {
    let mut best: Option<(u32, &str)> = None;

    for ending in &paradigm.endings {
        if !ending.grammemes.is_compatible(lexeme.tags) {
            continue;
        }
        let full = ending.grammemes | lexeme.tags;
        if !full.is_compatible(required) {
            continue;
        }
        let score = 2 * (full & required).bits().count_ones() + (full & current).bits().count_ones();
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, ending.suffix.as_str()));
        }
    }

    match best {
        Some((_, suffix)) => Ok(format!("{}{}", lexeme.stem, suffix)),
        None => Err(MorphError::FormNotFound(required)),
    }
}

/// Lookup key for a surface form: lower case, `ё` folded into `е`.
pub fn normalize_key(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct FormRef {
    lexeme: usize,
    ending: usize,
}

/// A [`MorphProvider`] over an in-memory [`Dictionary`].
#[derive(Debug)]
pub struct DictionaryAnalyzer {
    dict: Dictionary,
    paradigms: HashMap<ParadigmId, usize>,
    lexemes: HashMap<LemmaId, usize>,
    forms: HashMap<String, Vec<FormRef>>,
}

impl DictionaryAnalyzer {
    /// Indexes every form of every lexeme.
    pub fn new(dict: Dictionary) -> Result<Self, MorphError> {
        let paradigms: HashMap<ParadigmId, usize> = dict
            .paradigms
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();

        let mut lexemes = HashMap::with_capacity(dict.lexemes.len());
        let mut forms: HashMap<String, Vec<FormRef>> = HashMap::new();

        for (li, lexeme) in dict.lexemes.iter().enumerate() {
            if lexemes.insert(lexeme.id, li).is_some() {
                return Err(MorphError::DuplicateLexeme(lexeme.id));
            }
            let paradigm = paradigms
                .get(&lexeme.paradigm)
                .map(|&pi| &dict.paradigms[pi])
                .ok_or(MorphError::UnknownParadigm {
                    lexeme: lexeme.id,
                    paradigm: lexeme.paradigm,
                })?;

            for (ei, ending) in paradigm.endings.iter().enumerate() {
                // Forms that contradict the lexeme (animate accusative of an
                // inanimate noun) do not exist for it.
                if !ending.grammemes.is_compatible(lexeme.tags) {
                    continue;
                }
                let surface = normalize_key(&format!("{}{}", lexeme.stem, ending.suffix));
                forms
                    .entry(surface)
                    .or_default()
                    .push(FormRef { lexeme: li, ending: ei });
            }
        }

        info!(
            version = dict.version,
            lexemes = dict.lexemes.len(),
            paradigms = dict.paradigms.len(),
            forms = forms.len(),
            "dictionary indexed"
        );

        Ok(Self { dict, paradigms, lexemes, forms })
    }

    /// Loads a dictionary compiled with [`to_archive`].
    pub fn from_archive(bytes: &[u8]) -> Result<Self, MorphError> {
        let mut aligned = rkyv::AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        let archived = rkyv::check_archived_root::<Dictionary>(&aligned)
            .map_err(|e| MorphError::InvalidArchive(format!("{e:?}")))?;
        let dict: Dictionary = archived
            .deserialize(&mut rkyv::Infallible)
            .unwrap_or_else(|never| match never {});

        Self::new(dict)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    fn paradigm_of(&self, lexeme: &Lexeme) -> Option<&Paradigm> {
        self.paradigms
            .get(&lexeme.paradigm)
            .map(|&pi| &self.dict.paradigms[pi])
    }

    fn normal_form(&self, lexeme: &Lexeme) -> String {
        match self.paradigm_of(lexeme).and_then(|p| p.endings.first()) {
            Some(ending) => format!("{}{}", lexeme.stem, ending.suffix),
            None => lexeme.stem.clone(),
        }
    }
}

impl MorphProvider for DictionaryAnalyzer {
    fn analyze(&self, word: &str) -> Vec<Parse> {
        let key = normalize_key(word);
        let Some(refs) = self.forms.get(&key) else {
            return Vec::new();
        };

        let total: u32 = refs
            .iter()
            .map(|r| u32::from(self.dict.lexemes[r.lexeme].weight))
            .sum::<u32>()
            .max(1);

        let mut parses: Vec<Parse> = refs
            .iter()
            .filter_map(|r| {
                let lexeme = &self.dict.lexemes[r.lexeme];
                let ending = self.paradigm_of(lexeme)?.endings.get(r.ending)?;
                Some(Parse {
                    word: key.clone(),
                    normal_form: self.normal_form(lexeme),
                    pos: lexeme.pos,
                    grammemes: ending.grammemes | lexeme.tags,
                    score: f32::from(lexeme.weight) / total as f32,
                    lemma: lexeme.id,
                    form: r.ending,
                })
            })
            .collect();

        // Stable: equal scores keep dictionary order.
        parses.sort_by(|a, b| b.score.total_cmp(&a.score));
        parses
    }

    fn inflect(&self, parse: &Parse, target: &FormSpec) -> Option<String> {
        let lexeme = &self.dict.lexemes[*self.lexemes.get(&parse.lemma)?];
        let paradigm = self.paradigm_of(lexeme)?;

        match generate(lexeme, paradigm, target.grammemes(), parse.grammemes) {
            Ok(form) => Some(form),
            Err(err) => {
                debug!(word = %parse.word, lemma = %parse.normal_form, %err, "form not realizable");
                None
            }
        }
    }
}

/// Serializes a dictionary into the archive format read by
/// [`DictionaryAnalyzer::from_archive`].
pub fn to_archive(dict: &Dictionary) -> Result<Vec<u8>, MorphError> {
    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(dict)
        .map_err(|e| MorphError::Archive(format!("{e:?}")))?;
    Ok(serializer.into_serializer().into_inner().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use padezh_protocol::{Animacy, Case, Ending, Number};
    use proptest::prelude::*;

    fn ending(grammemes: Grammemes, suffix: &str) -> Ending {
        Ending { grammemes, suffix: suffix.to_string() }
    }

    fn masc_hard() -> Paradigm {
        let g = Grammemes::SING;
        let p = Grammemes::PLUR;
        Paradigm {
            id: ParadigmId(1),
            endings: vec![
                ending(Grammemes::NOMN | g, ""),
                ending(Grammemes::GENT | g, "а"),
                ending(Grammemes::DATV | g, "у"),
                ending(Grammemes::ACCS | g | Grammemes::ANIM, "а"),
                ending(Grammemes::ACCS | g | Grammemes::INAN, ""),
                ending(Grammemes::ABLT | g, "ом"),
                ending(Grammemes::LOCT | g, "е"),
                ending(Grammemes::NOMN | p, "ы"),
                ending(Grammemes::GENT | p, "ов"),
                ending(Grammemes::DATV | p, "ам"),
                ending(Grammemes::ACCS | p | Grammemes::ANIM, "ов"),
                ending(Grammemes::ACCS | p | Grammemes::INAN, "ы"),
                ending(Grammemes::ABLT | p, "ами"),
                ending(Grammemes::LOCT | p, "ах"),
            ],
        }
    }

    fn lexeme(id: u32, stem: &str, tags: Grammemes, weight: u16) -> Lexeme {
        Lexeme {
            id: LemmaId(id),
            stem: stem.to_string(),
            paradigm: ParadigmId(1),
            pos: PartOfSpeech::Noun,
            tags,
            weight,
        }
    }

    fn analyzer() -> DictionaryAnalyzer {
        DictionaryAnalyzer::new(Dictionary {
            version: 1,
            lexemes: vec![
                lexeme(1, "удав", Grammemes::MASC | Grammemes::ANIM, 1),
                lexeme(2, "тур", Grammemes::MASC | Grammemes::INAN, 1),
                lexeme(3, "петр", Grammemes::MASC | Grammemes::ANIM | Grammemes::NAME, 1),
            ],
            paradigms: vec![masc_hard()],
        })
        .expect("valid dictionary")
    }

    #[test]
    fn analyze_is_case_insensitive_and_folds_yo() {
        let a = analyzer();
        let parses = a.analyze("Пётр");
        assert_eq!(parses.len(), 1);
        assert_eq!(parses[0].normal_form, "петр");
        assert!(parses[0].is_nominative());
        assert!(parses[0].has_hints(Grammemes::NAME));
    }

    #[test]
    fn animacy_filters_accusative_forms() {
        let a = analyzer();
        // "тура" is genitive only: the animate accusative does not exist for "тур".
        let parses = a.analyze("тура");
        assert_eq!(parses.len(), 1);
        assert!(parses[0].grammemes.contains(Grammemes::GENT));

        // "удава" is genitive and animate accusative.
        assert_eq!(a.analyze("удава").len(), 2);
    }

    #[test]
    fn inflect_keeps_open_categories() {
        let a = analyzer();
        let parse = a.analyze("удавов").into_iter().next().expect("known word");
        let target = FormSpec::new().with_case(Case::Dative);
        assert_eq!(a.inflect(&parse, &target).as_deref(), Some("удавам"));

        let target = target.with_number(Number::Singular);
        assert_eq!(a.inflect(&parse, &target).as_deref(), Some("удаву"));
    }

    #[test]
    fn inflect_returns_none_for_missing_form() {
        let a = analyzer();
        let parse = a.analyze("тур").into_iter().next().expect("known word");

        // "тур" is inanimate: no ending carries the animate accusative.
        let target = FormSpec::new()
            .with_case(Case::Accusative)
            .with_animacy(Animacy::Animate);
        assert_eq!(a.inflect(&parse, &target), None);

        let mut stray = parse.clone();
        stray.lemma = LemmaId(404);
        assert_eq!(a.inflect(&stray, &FormSpec::new().with_case(Case::Dative)), None);
    }

    #[test]
    fn generate_reports_missing_form() {
        let a = analyzer();
        let lexeme = &a.dictionary().lexemes[1];
        let required = Grammemes::ACCS | Grammemes::ANIM;
        assert!(matches!(
            generate(lexeme, &masc_hard(), required, Grammemes::empty()),
            Err(MorphError::FormNotFound(g)) if g == required
        ));
    }

    #[test]
    fn unknown_word_has_no_parses() {
        assert!(analyzer().analyze("котопес").is_empty());
    }

    #[test]
    fn heavier_lexeme_ranks_first() {
        let mut dict = analyzer().dict;
        dict.lexemes.push(lexeme(4, "удав", Grammemes::MASC | Grammemes::INAN | Grammemes::SURN, 5));
        let a = DictionaryAnalyzer::new(dict).expect("valid dictionary");
        let parses = a.analyze("удав");
        assert_eq!(parses[0].lemma, LemmaId(4));
        let last = parses.last().expect("several parses");
        assert_eq!(last.lemma, LemmaId(1));
        assert!(parses[0].score > last.score);
    }

    #[test]
    fn rejects_dangling_paradigm() {
        let mut dict = analyzer().dict;
        dict.lexemes[0].paradigm = ParadigmId(99);
        let err = DictionaryAnalyzer::new(dict).unwrap_err();
        assert!(matches!(err, MorphError::UnknownParadigm { .. }));
        assert_eq!(err.to_string(), "lexeme#1 refers to unknown paradigm#99");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut dict = analyzer().dict;
        dict.lexemes[1].id = LemmaId(1);
        assert!(matches!(
            DictionaryAnalyzer::new(dict),
            Err(MorphError::DuplicateLexeme(LemmaId(1)))
        ));
    }

    #[test]
    fn archive_round_trip_preserves_analysis() {
        let a = analyzer();
        let bytes = to_archive(a.dictionary()).expect("archive");
        let restored = DictionaryAnalyzer::from_archive(&bytes).expect("valid archive");
        assert_eq!(restored.analyze("удаве"), a.analyze("удаве"));
    }

    #[test]
    fn garbage_archive_is_rejected() {
        let err = DictionaryAnalyzer::from_archive(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, MorphError::InvalidArchive(_)));
    }

    proptest! {
        #[test]
        fn test_safe_generation(stem in "[а-я]{1,8}", suffix in "[а-я]{1,3}") {
            let lexeme = lexeme(1, &stem, Grammemes::empty(), 1);
            let paradigm = Paradigm {
                id: ParadigmId(1),
                endings: vec![ending(Grammemes::NOMN, &suffix)],
            };

            let result = generate(&lexeme, &paradigm, Grammemes::NOMN, Grammemes::empty());
            prop_assert_eq!(result.unwrap(), format!("{}{}", stem, suffix));
        }

        #[test]
        fn every_indexed_form_analyzes_back(idx in 0usize..14) {
            let a = analyzer();
            let lexeme = &a.dictionary().lexemes[0];
            let ending = &a.dictionary().paradigms[0].endings[idx];
            prop_assume!(ending.grammemes.is_compatible(lexeme.tags));
            let word = format!("{}{}", lexeme.stem, ending.suffix);
            prop_assert!(a.analyze(&word).iter().any(|p| p.form == idx));
        }
    }
}
