//! Agreement plan of a collocation: which words follow the head noun, and in
//! which role.
//!
//! The plan is a heuristic. It scans the leading run of words that can be read
//! in the nominative and treats the last noun of that run as the head. Words
//! before it are modifiers (adjectives, participles, numerals) or nouns in
//! apposition ("Геннадий Петрович"). Everything after the run keeps its form.

use padezh_ecs::components::DependencyRole;
use padezh_ecs::PhraseWorld;
use padezh_morph::{MorphProvider, Parse};
use padezh_parser::token::{Segment, SegmentKind};
use padezh_parser::Phrase;
use padezh_protocol::{FormSpec, Grammemes};
use tracing::debug;

use crate::word::{realize, select_parse};

#[derive(Debug, Clone)]
struct Member {
    segment: usize,
    /// Nominative readings of the word, best first.
    readings: Vec<Parse>,
    parse: Parse,
    role: DependencyRole,
}

#[derive(Debug, Clone)]
pub struct AgreementPlan {
    members: Vec<Member>,
    head: usize,
    agreeing: Vec<usize>,
}

impl AgreementPlan {
    /// Plans `phrase`. `None` when its first word has no nominative reading,
    /// in which case the phrase is left as it is.
    pub fn build<P>(provider: &P, phrase: &Phrase<'_>, hints: Grammemes) -> Option<Self>
    where
        P: MorphProvider + ?Sized,
    {
        // 1. Leading run of nominative words. Frozen words are skipped,
        // punctuation only ends the run once it has started.
        let mut members: Vec<Member> = Vec::new();
        for (i, segment) in phrase.segments().iter().enumerate() {
            match segment.kind {
                SegmentKind::Marker | SegmentKind::Frozen => continue,
                SegmentKind::Separator if joins_words(segment) || members.is_empty() => continue,
                SegmentKind::Separator => break,
                SegmentKind::Inflectable => {}
            }

            let readings: Vec<Parse> = provider
                .analyze(segment.text)
                .into_iter()
                .filter(Parse::is_nominative)
                .collect();
            let Some(parse) = select_parse(&readings, hints).cloned() else {
                break;
            };
            members.push(Member {
                segment: i,
                readings,
                parse,
                role: DependencyRole::Complement,
            });
        }

        if members.is_empty() {
            debug!(phrase = phrase.source(), "no nominative word to agree with");
            return None;
        }

        // 2. A word right before a patronymic is a given name
        for k in 1..members.len() {
            if !members[k].parse.grammemes.contains(Grammemes::PATR)
                || members[k - 1].parse.has_hints(Grammemes::NAME)
            {
                continue;
            }
            let name = members[k - 1]
                .readings
                .iter()
                .find(|p| p.has_hints(Grammemes::NAME))
                .cloned();
            if let Some(name) = name {
                members[k - 1].parse = name;
            }
        }

        // 3. Head and roles
        let head = members
            .iter()
            .rposition(|m| m.parse.pos.is_nominal())
            .unwrap_or(members.len() - 1);

        for (k, member) in members.iter_mut().enumerate() {
            let pos = member.parse.pos;
            member.role = if k == head {
                DependencyRole::Root
            } else if pos.is_nominal() {
                DependencyRole::Apposition
            } else if pos.is_agreeing_modifier() {
                DependencyRole::Modifier
            } else {
                DependencyRole::Complement
            };
        }

        // 4. Drop modifiers that do not agree with the head
        let mut world = PhraseWorld::new();
        let entities: Vec<_> = members
            .iter()
            .map(|m| world.add_token(m.parse.word.clone(), m.segment, m.parse.pos, m.parse.grammemes))
            .collect();

        let root = entities[head];
        world.set_root(root);
        for (member, &entity) in members.iter().zip(&entities) {
            if member.role != DependencyRole::Root {
                world.set_dependency(entity, root, member.role);
            }
        }
        let agreeing = world.agreeing_segments();

        Some(Self { members, head, agreeing })
    }

    /// Chosen parse of the head word.
    pub fn head(&self) -> &Parse {
        &self.members[self.head].parse
    }

    pub fn role_of(&self, segment: usize) -> Option<DependencyRole> {
        self.members.iter().find(|m| m.segment == segment).map(|m| m.role)
    }

    /// Segments rewritten by [`AgreementPlan::render`], in phrase order.
    pub fn agreeing_segments(&self) -> &[usize] {
        &self.agreeing
    }

    /// Renders `phrase`, inflecting each agreeing word into `target(role)`.
    pub fn render<P, F>(&self, provider: &P, phrase: &Phrase<'_>, mut target: F) -> String
    where
        P: MorphProvider + ?Sized,
        F: FnMut(DependencyRole) -> FormSpec,
    {
        phrase.render(|i, segment| {
            if !self.agreeing.contains(&i) {
                return None;
            }
            let member = self.members.iter().find(|m| m.segment == i)?;
            let form = target(member.role);
            Some(realize(provider, segment.text, segment.casing, &member.parse, &form))
        })
    }
}

fn joins_words(segment: &Segment<'_>) -> bool {
    segment.is_hyphen() || segment.text.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_analyzer;
    use padezh_parser::{MarkerPolicy, Segmenter};

    fn build(text: &str) -> (Phrase<'_>, Option<AgreementPlan>) {
        let dict = sample_analyzer();
        let phrase = Segmenter::new()
            .segment(text, MarkerPolicy::FreezeMarked)
            .unwrap();
        let plan = AgreementPlan::build(&dict, &phrase, Grammemes::empty());
        (phrase, plan)
    }

    #[test]
    fn head_is_last_noun_of_leading_run() {
        let (_, plan) = build("зимняя рыбалка");
        let plan = plan.unwrap();
        assert_eq!(plan.head().normal_form, "рыбалка");
        assert_eq!(plan.role_of(0), Some(DependencyRole::Modifier));
        assert_eq!(plan.role_of(2), Some(DependencyRole::Root));
        assert_eq!(plan.agreeing_segments(), &[0, 2]);
    }

    #[test]
    fn run_stops_at_first_non_nominative_word() {
        let (_, plan) = build("Пакет с пряниками");
        let plan = plan.unwrap();
        assert_eq!(plan.agreeing_segments(), &[0]);
        assert_eq!(plan.role_of(4), None);
    }

    #[test]
    fn name_before_patronymic_is_apposition() {
        let (_, plan) = build("Сигизмунд Петрович");
        let plan = plan.unwrap();
        assert_eq!(plan.head().normal_form, "петрович");
        assert_eq!(plan.role_of(0), Some(DependencyRole::Apposition));
    }

    #[test]
    fn participle_heads_phrase_without_noun() {
        let (_, plan) = build("Летящий на параплане");
        let plan = plan.unwrap();
        assert_eq!(plan.head().pos, padezh_protocol::PartOfSpeech::Participle);
        assert_eq!(plan.agreeing_segments(), &[0]);
    }

    #[test]
    fn leading_punctuation_and_frozen_words_are_skipped() {
        let (_, plan) = build("«зимняя рыбалка»");
        assert_eq!(plan.unwrap().agreeing_segments(), &[1, 3]);

        let (_, plan) = build("[[красный]] конь");
        let plan = plan.unwrap();
        assert_eq!(plan.head().normal_form, "конь");
        assert_eq!(plan.agreeing_segments(), &[4]);
        assert_eq!(plan.role_of(1), None);
    }

    #[test]
    fn punctuation_after_first_word_ends_run() {
        let (_, plan) = build("Москва, деревня");
        assert_eq!(plan.unwrap().agreeing_segments(), &[0]);
    }

    #[test]
    fn phrase_without_nominative_has_no_plan() {
        let (_, plan) = build("Отдыха");
        assert!(plan.is_none());

        let (_, plan) = build("Самосделкино");
        assert!(plan.is_none());
    }

    #[test]
    fn disagreeing_modifier_keeps_its_form() {
        let (phrase, plan) = build("красные конь");
        let plan = plan.unwrap();
        assert_eq!(plan.agreeing_segments(), &[2]);

        let dict = sample_analyzer();
        let out = plan.render(&dict, &phrase, |_| {
            FormSpec::new().with_case(padezh_protocol::Case::Dative)
        });
        assert_eq!(out, "красные коню");
    }
}
