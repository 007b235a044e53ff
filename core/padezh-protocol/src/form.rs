use crate::grammemes::{Animacy, Case, Gender, Grammemes, Number};

/// Target of an inflection request.
///
/// `case`, `number`, `gender` and `animacy` are the grammemes the result must
/// carry. `hints` only steer which parse of an ambiguous word is chosen
/// (given name vs. surname, ...) and are never requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormSpec {
    pub case: Option<Case>,
    pub number: Option<Number>,
    pub gender: Option<Gender>,
    pub animacy: Option<Animacy>,
    pub hints: Grammemes,
}

impl FormSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.case = Some(case);
        self
    }

    pub fn with_number(mut self, number: Number) -> Self {
        self.number = Some(number);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_animacy(mut self, animacy: Animacy) -> Self {
        self.animacy = Some(animacy);
        self
    }

    pub fn with_hints(mut self, hints: Grammemes) -> Self {
        self.hints |= hints & Grammemes::HINTS;
        self
    }

    /// Grammemes the inflected form must carry.
    pub fn grammemes(&self) -> Grammemes {
        let mut out = Grammemes::empty();
        if let Some(case) = self.case {
            out |= case.grammeme();
        }
        if let Some(number) = self.number {
            out |= number.grammeme();
        }
        if let Some(gender) = self.gender {
            out |= gender.grammeme();
        }
        if let Some(animacy) = self.animacy {
            out |= animacy.grammeme();
        }
        out
    }

    /// No target grammemes: callers return their input unchanged.
    pub fn is_empty(&self) -> bool {
        self.grammemes().is_empty()
    }
}
