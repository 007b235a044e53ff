#![no_std] // Keeps the model usable from WASM hosts without std

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod grammemes;
pub mod form;

// Re-export core types for convenience
pub use ids::{LemmaId, ParadigmId};
pub use grammemes::*;
pub use form::FormSpec;

pub mod model;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_enum_serialization() {
        let original = Case::Instrumental;

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize Case");
        let deserialized: Case = from_bytes(&bytes).expect("Failed to deserialize Case");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_dictionary_archive_keeps_grammemes() {
        let dict = Dictionary {
            version: 1,
            lexemes: vec![Lexeme {
                id: LemmaId(7),
                stem: "москв".to_string(),
                paradigm: ParadigmId(1),
                pos: PartOfSpeech::Noun,
                tags: Grammemes::FEMN | Grammemes::INAN | Grammemes::GEOX,
                weight: 3,
            }],
            paradigms: vec![Paradigm {
                id: ParadigmId(1),
                endings: vec![Ending {
                    grammemes: Grammemes::LOCT | Grammemes::SING,
                    suffix: "е".to_string(),
                }],
            }],
        };

        let bytes = to_bytes::<_, 1024>(&dict).expect("Failed to serialize Dictionary");
        let restored: Dictionary = from_bytes(&bytes).expect("Failed to deserialize Dictionary");

        assert_eq!(restored.lexemes[0].tags, dict.lexemes[0].tags);
        assert_eq!(restored.lexemes[0].stem, "москв");
        assert_eq!(
            restored.paradigms[0].endings[0].grammemes,
            Grammemes::LOCT | Grammemes::SING
        );
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<LemmaId>(), 4);
    }

    #[test]
    fn compatibility_ignores_unset_categories() {
        let form = Grammemes::DATV | Grammemes::PLUR;
        assert!(form.is_compatible(Grammemes::DATV));
        assert!(form.is_compatible(Grammemes::DATV | Grammemes::MASC));
        assert!(!form.is_compatible(Grammemes::DATV | Grammemes::SING));
        assert!(!form.is_compatible(Grammemes::GENT));
    }

    #[test]
    fn category_accessors() {
        let g = Grammemes::ACCS | Grammemes::SING | Grammemes::FEMN | Grammemes::ANIM;
        assert_eq!(g.case(), Some(Case::Accusative));
        assert_eq!(g.number(), Some(Number::Singular));
        assert_eq!(g.gender(), Some(Gender::Feminine));
        assert_eq!(g.animacy(), Some(Animacy::Animate));
        assert_eq!(Grammemes::empty().case(), None);
    }
}
