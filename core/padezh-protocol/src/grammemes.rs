use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Case {
    Nominative = 0,
    Genitive = 1,
    Dative = 2,
    Accusative = 3,
    Instrumental = 4,
    Prepositional = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Number {
    Singular = 0,
    Plural = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Gender {
    Masculine = 0,
    Feminine = 1,
    Neuter = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Animacy {
    Animate = 0,
    Inanimate = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    Noun = 0,
    Adjective = 1,
    Participle = 2,
    Numeral = 3,
    Pronoun = 4,
    Verb = 5,
    Adverb = 6,
    Preposition = 7,
    Conjunction = 8,
    Particle = 9,
    Interjection = 10,
}

impl PartOfSpeech {
    /// Words that can head a noun phrase.
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Pronoun)
    }

    /// Words that copy case, number and gender from the noun they modify.
    pub fn is_agreeing_modifier(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Adjective | PartOfSpeech::Participle | PartOfSpeech::Numeral
        )
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Grammemes: u32 {
        // Case (Bits 0-5)
        const NOMN = 1;
        const GENT = 1 << 1;
        const DATV = 1 << 2;
        const ACCS = 1 << 3;
        const ABLT = 1 << 4;
        const LOCT = 1 << 5;

        // Number (Bits 6-7)
        const SING = 1 << 6;
        const PLUR = 1 << 7;

        // Gender (Bits 8-10)
        const MASC = 1 << 8;
        const FEMN = 1 << 9;
        const NEUT = 1 << 10;

        // Animacy (Bits 11-12)
        const ANIM = 1 << 11;
        const INAN = 1 << 12;

        // Lexical hints (Bits 16-19)
        const NAME = 1 << 16;
        const SURN = 1 << 17;
        const PATR = 1 << 18;
        const GEOX = 1 << 19;
    }
}

impl Default for Grammemes {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grammemes {
    pub const CASES: Self = Self::from_bits_retain(
        Self::NOMN.bits()
            | Self::GENT.bits()
            | Self::DATV.bits()
            | Self::ACCS.bits()
            | Self::ABLT.bits()
            | Self::LOCT.bits(),
    );
    pub const NUMBERS: Self = Self::from_bits_retain(Self::SING.bits() | Self::PLUR.bits());
    pub const GENDERS: Self =
        Self::from_bits_retain(Self::MASC.bits() | Self::FEMN.bits() | Self::NEUT.bits());
    pub const ANIMACY: Self = Self::from_bits_retain(Self::ANIM.bits() | Self::INAN.bits());
    pub const HINTS: Self = Self::from_bits_retain(
        Self::NAME.bits() | Self::SURN.bits() | Self::PATR.bits() | Self::GEOX.bits(),
    );

    /// Mutually exclusive categories. A set carries at most one value of each
    /// when it describes a concrete word form.
    pub const CATEGORIES: [Self; 4] = [Self::CASES, Self::NUMBERS, Self::GENDERS, Self::ANIMACY];

    /// Two sets are compatible when no category has a value in both sets
    /// without the values overlapping. A category left empty on either side
    /// matches anything.
    pub fn is_compatible(self, other: Self) -> bool {
        Self::CATEGORIES.iter().all(|category| {
            let ours = self & *category;
            let theirs = other & *category;
            ours.is_empty() || theirs.is_empty() || ours.intersects(theirs)
        })
    }

    pub fn case(self) -> Option<Case> {
        Case::ALL.into_iter().find(|c| self.contains(c.grammeme()))
    }

    pub fn number(self) -> Option<Number> {
        if self.contains(Self::SING) {
            Some(Number::Singular)
        } else if self.contains(Self::PLUR) {
            Some(Number::Plural)
        } else {
            None
        }
    }

    pub fn gender(self) -> Option<Gender> {
        if self.contains(Self::MASC) {
            Some(Gender::Masculine)
        } else if self.contains(Self::FEMN) {
            Some(Gender::Feminine)
        } else if self.contains(Self::NEUT) {
            Some(Gender::Neuter)
        } else {
            None
        }
    }

    pub fn animacy(self) -> Option<Animacy> {
        if self.contains(Self::ANIM) {
            Some(Animacy::Animate)
        } else if self.contains(Self::INAN) {
            Some(Animacy::Inanimate)
        } else {
            None
        }
    }

    /// Looks up a single hint code (`имя`, `фам`, `отч`, `гео` or the
    /// OpenCorpora spelling).
    pub fn hint_from_code(code: &str) -> Option<Self> {
        match code {
            "имя" | "Name" => Some(Self::NAME),
            "фам" | "Surn" => Some(Self::SURN),
            "отч" | "Patr" => Some(Self::PATR),
            "гео" | "Geox" => Some(Self::GEOX),
            _ => None,
        }
    }
}

impl Case {
    pub const ALL: [Case; 6] = [
        Case::Nominative,
        Case::Genitive,
        Case::Dative,
        Case::Accusative,
        Case::Instrumental,
        Case::Prepositional,
    ];

    pub fn grammeme(self) -> Grammemes {
        match self {
            Case::Nominative => Grammemes::NOMN,
            Case::Genitive => Grammemes::GENT,
            Case::Dative => Grammemes::DATV,
            Case::Accusative => Grammemes::ACCS,
            Case::Instrumental => Grammemes::ABLT,
            Case::Prepositional => Grammemes::LOCT,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "им" | "nomn" => Some(Case::Nominative),
            "рд" | "gent" => Some(Case::Genitive),
            "дт" | "datv" => Some(Case::Dative),
            "вн" | "accs" => Some(Case::Accusative),
            "тв" | "ablt" => Some(Case::Instrumental),
            "пр" | "loct" => Some(Case::Prepositional),
            _ => None,
        }
    }
}

impl Number {
    pub fn grammeme(self) -> Grammemes {
        match self {
            Number::Singular => Grammemes::SING,
            Number::Plural => Grammemes::PLUR,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ед" | "sing" => Some(Number::Singular),
            "мн" | "plur" => Some(Number::Plural),
            _ => None,
        }
    }
}

impl Gender {
    pub fn grammeme(self) -> Grammemes {
        match self {
            Gender::Masculine => Grammemes::MASC,
            Gender::Feminine => Grammemes::FEMN,
            Gender::Neuter => Grammemes::NEUT,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "мр" | "masc" => Some(Gender::Masculine),
            "жр" | "femn" => Some(Gender::Feminine),
            "ср" | "neut" => Some(Gender::Neuter),
            _ => None,
        }
    }
}

impl Animacy {
    pub fn grammeme(self) -> Grammemes {
        match self {
            Animacy::Animate => Grammemes::ANIM,
            Animacy::Inanimate => Grammemes::INAN,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "од" | "anim" => Some(Animacy::Animate),
            "неод" | "inan" => Some(Animacy::Inanimate),
            _ => None,
        }
    }
}

// rkyv support for Grammemes
impl Archive for Grammemes {
    type Archived = u32;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::Fallible + ?Sized> Serialize<S> for Grammemes {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<Grammemes, D> for u32 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<Grammemes, D::Error> {
        Ok(Grammemes::from_bits_truncate(*self))
    }
}
