use padezh_morph::Parse;
use padezh_protocol::{Case, FormSpec, Gender, Grammemes, Number};

/// How a Russian noun phrase agrees with a cardinal count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralClass {
    /// 1, 21, 101, ... but not 11
    One,
    /// 2-4, 22-24, ... but not 12-14
    Few,
    Many,
}

impl NumeralClass {
    /// Classifies `count` by its absolute value.
    pub fn for_count(count: i64) -> Self {
        let n = count.unsigned_abs();
        let (last, last_two) = (n % 10, n % 100);

        if last == 1 && last_two != 11 {
            NumeralClass::One
        } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
            NumeralClass::Few
        } else {
            NumeralClass::Many
        }
    }

    /// Form of the head noun and of nouns in apposition to it.
    pub fn noun_form(self) -> FormSpec {
        match self {
            NumeralClass::One => FormSpec::new()
                .with_case(Case::Nominative)
                .with_number(Number::Singular),
            NumeralClass::Few => FormSpec::new()
                .with_case(Case::Genitive)
                .with_number(Number::Singular),
            NumeralClass::Many => FormSpec::new()
                .with_case(Case::Genitive)
                .with_number(Number::Plural),
        }
    }

    /// Form of adjectives and participles agreeing with `head`. In the few
    /// class they are nominative plural before feminine nouns ("две зимние
    /// рыбалки") and genitive plural otherwise ("два активных пользователя").
    pub fn modifier_form(self, head: &Parse) -> FormSpec {
        match self {
            NumeralClass::One => agree_with(head, Some(Case::Nominative), Some(Number::Singular)),
            NumeralClass::Few if head.grammemes.gender() == Some(Gender::Feminine) => {
                agree_with(head, Some(Case::Nominative), Some(Number::Plural))
            }
            NumeralClass::Few | NumeralClass::Many => {
                agree_with(head, Some(Case::Genitive), Some(Number::Plural))
            }
        }
    }
}

/// Target of a modifier whose head is `head`. Gender only applies in the
/// singular; animacy picks the accusative variant.
pub(crate) fn agree_with(head: &Parse, case: Option<Case>, number: Option<Number>) -> FormSpec {
    let number = number.or_else(|| head.grammemes.number());
    FormSpec {
        case,
        number,
        gender: head.grammemes.gender().filter(|_| number == Some(Number::Singular)),
        animacy: head.grammemes.animacy(),
        hints: Grammemes::empty(),
    }
}
