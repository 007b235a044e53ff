pub mod components;
pub mod systems;

use hecs::{World, Entity};
use components::{TokenData, Morphology, Syntax, DependencyRole};
use padezh_protocol::{Grammemes, PartOfSpeech};
use systems::agreement::{check_agreement, AgreementError};
use tracing::debug;

/// The words of one collocation with their chosen parses and roles.
pub struct PhraseWorld {
    world: World,
}

impl Default for PhraseWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseWorld {
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    pub fn inner(&self) -> &World {
        &self.world
    }

    /// Add a word of the phrase
    pub fn add_token(
        &mut self,
        text: String,
        segment: usize,
        pos: PartOfSpeech,
        flags: Grammemes,
    ) -> Entity {
        self.world.spawn((
            TokenData { text, segment },
            Morphology::new(flags, pos),
        ))
    }

    pub fn set_root(&mut self, root: Entity) {
        let _ = self.world.insert_one(root, Syntax { head: root, role: DependencyRole::Root });
    }

    /// Define the syntactic tree structure
    pub fn set_dependency(&mut self, child: Entity, head: Entity, role: DependencyRole) {
        let _ = self.world.insert_one(child, Syntax { head, role });
    }

    pub fn role_of(&self, entity: Entity) -> Option<DependencyRole> {
        self.world.get::<&Syntax>(entity).ok().map(|s| s.role)
    }

    /// Run all validation systems
    pub fn validate(&self) -> Vec<AgreementError> {
        check_agreement(&self.world)
    }

    /// Segments of the words that take the head's case: the root plus every
    /// modifier or apposition without an agreement error, in phrase order.
    pub fn agreeing_segments(&self) -> Vec<usize> {
        let rejected: Vec<Entity> = self
            .validate()
            .into_iter()
            .map(|err| {
                debug!(word = %err.source, head = %err.target, details = %err.details, "word left fixed");
                err.entity
            })
            .collect();

        let mut segments: Vec<usize> = self
            .world
            .query::<(&Syntax, &TokenData)>()
            .iter()
            .filter(|(id, (syntax, _))| {
                syntax.role != DependencyRole::Complement && !rejected.contains(id)
            })
            .map(|(_, (_, token))| token.segment)
            .collect();
        segments.sort_unstable();
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_agreement_check() {
        let mut pw = PhraseWorld::new();

        // "красные конь": plural modifier on a singular head
        let head = pw.add_token(
            "конь".to_string(),
            2,
            PartOfSpeech::Noun,
            Grammemes::NOMN | Grammemes::SING | Grammemes::MASC,
        );
        let modifier = pw.add_token(
            "красные".to_string(),
            0,
            PartOfSpeech::Adjective,
            Grammemes::NOMN | Grammemes::PLUR,
        );

        pw.set_root(head);
        pw.set_dependency(modifier, head, DependencyRole::Modifier);

        let errors = pw.validate();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].details.contains("Number mismatch"));
        assert_eq!(errors[0].entity, modifier);
        assert_eq!(pw.agreeing_segments(), vec![2]);
    }

    #[test]
    fn test_gender_agreement_check() {
        let mut pw = PhraseWorld::new();
        let head = pw.add_token(
            "рыбалка".to_string(),
            2,
            PartOfSpeech::Noun,
            Grammemes::NOMN | Grammemes::SING | Grammemes::FEMN,
        );
        let modifier = pw.add_token(
            "зимний".to_string(),
            0,
            PartOfSpeech::Adjective,
            Grammemes::NOMN | Grammemes::SING | Grammemes::MASC,
        );
        pw.set_root(head);
        pw.set_dependency(modifier, head, DependencyRole::Modifier);

        let errors = pw.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].details.contains("Gender mismatch"));
    }

    #[test]
    fn agreeing_segments_skip_complements_and_keep_order() {
        let mut pw = PhraseWorld::new();
        let flags = Grammemes::NOMN | Grammemes::SING | Grammemes::MASC;
        let head = pw.add_token("Петрович".to_string(), 2, PartOfSpeech::Noun, flags);
        let name = pw.add_token("Сигизмунд".to_string(), 0, PartOfSpeech::Noun, flags);
        let numeral = pw.add_token("два".to_string(), 4, PartOfSpeech::Numeral, Grammemes::NOMN);
        let tail = pw.add_token("отдыха".to_string(), 6, PartOfSpeech::Noun, Grammemes::GENT);

        pw.set_root(head);
        pw.set_dependency(name, head, DependencyRole::Apposition);
        pw.set_dependency(numeral, head, DependencyRole::Modifier);
        pw.set_dependency(tail, head, DependencyRole::Complement);

        assert!(pw.validate().is_empty());
        assert_eq!(pw.role_of(tail), Some(DependencyRole::Complement));
        assert_eq!(pw.agreeing_segments(), vec![0, 2, 4]);
    }
}
