use hecs::Entity;
use padezh_protocol::{Grammemes, PartOfSpeech};

/// Basic data about the token (Source of Truth)
#[derive(Debug, Clone)]
pub struct TokenData {
    pub text: String,
    /// Index of the segment the token came from.
    pub segment: usize,
}

/// Grammemes and part of speech of the parse chosen for the token
#[derive(Debug, Clone, Copy)]
pub struct Morphology {
    pub flags: Grammemes,
    pub pos: PartOfSpeech,
}

impl Morphology {
    pub fn new(flags: Grammemes, pos: PartOfSpeech) -> Self {
        Self { flags, pos }
    }
}

/// The Syntactic Role of a word inside a collocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyRole {
    /// The head noun; its own `Syntax::head` points at itself.
    Root,
    /// Adjective, participle or numeral agreeing with the head
    Modifier,
    /// A noun in apposition (a first name before the patronymic)
    Apposition,
    /// Governed word that keeps its own form
    Complement,
}

/// The Syntactic Tree Structure
#[derive(Debug, Clone, Copy)]
pub struct Syntax {
    pub head: Entity,
    pub role: DependencyRole,
}
