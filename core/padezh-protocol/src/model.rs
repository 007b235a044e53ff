use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{LemmaId, ParadigmId};
use crate::grammemes::{Grammemes, PartOfSpeech};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A dictionary headword. Every surface form is `stem` followed by one of the
/// suffixes of its paradigm.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexeme {
    pub id: LemmaId,
    pub stem: String,
    pub paradigm: ParadigmId,
    pub pos: PartOfSpeech,
    /// Grammemes shared by every form: gender and animacy of nouns, name hints.
    #[cfg_attr(feature = "serde", serde(default = "Grammemes::empty"))]
    pub tags: Grammemes,
    /// Relative frequency used to rank homonymous parses.
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: u16,
}

#[cfg(feature = "serde")]
fn default_weight() -> u16 {
    1
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Ending {
    pub grammemes: Grammemes,
    pub suffix: String,
}

/// Ordered list of endings. The first ending yields the normal form.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Paradigm {
    pub id: ParadigmId,
    pub endings: Vec<Ending>,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Dictionary {
    pub version: u32,
    pub lexemes: Vec<Lexeme>,
    pub paradigms: Vec<Paradigm>,
}
