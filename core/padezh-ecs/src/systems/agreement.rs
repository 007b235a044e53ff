use hecs::{Entity, World};
use crate::components::{Morphology, Syntax, DependencyRole, TokenData};
use padezh_protocol::Grammemes;

#[derive(Debug, Clone)]
pub struct AgreementError {
    pub entity: Entity,
    pub source: String,
    pub target: String,
    pub details: String,
}

pub fn check_agreement(world: &World) -> Vec<AgreementError> {
    let mut errors = Vec::new();

    // 1. Number
    errors.extend(check_number_agreement(world));

    // 2. Gender (singular only)
    errors.extend(check_gender_agreement(world));

    errors
}

fn head_text(world: &World, head: Entity) -> String {
    world
        .get::<&TokenData>(head)
        .map(|t| t.text.clone())
        .unwrap_or_else(|_| "Head".to_string())
}

fn check_number_agreement(world: &World) -> Vec<AgreementError> {
    let mut errors = Vec::new();

    for (id, (mod_morph, syntax, mod_token)) in world.query::<(&Morphology, &Syntax, &TokenData)>().iter() {
        if syntax.role != DependencyRole::Modifier {
            continue;
        }
        if let Ok(head_morph) = world.get::<&Morphology>(syntax.head) {
            let mod_num = mod_morph.flags.intersection(Grammemes::NUMBERS);
            let head_num = head_morph.flags.intersection(Grammemes::NUMBERS);

            // Numerals carry no number; only compare when both sides have one.
            if !mod_num.is_empty() && !head_num.is_empty() && mod_num != head_num {
                errors.push(AgreementError {
                    entity: id,
                    source: mod_token.text.clone(),
                    target: head_text(world, syntax.head),
                    details: format!("Number mismatch: {:?} vs {:?}", mod_num, head_num),
                });
            }
        }
    }
    errors
}

fn check_gender_agreement(world: &World) -> Vec<AgreementError> {
    let mut errors = Vec::new();

    for (id, (mod_morph, syntax, mod_token)) in world.query::<(&Morphology, &Syntax, &TokenData)>().iter() {
        if syntax.role != DependencyRole::Modifier {
            continue;
        }
        if let Ok(head_morph) = world.get::<&Morphology>(syntax.head) {
            let both_singular = mod_morph.flags.contains(Grammemes::SING)
                && head_morph.flags.contains(Grammemes::SING);
            if !both_singular {
                continue;
            }

            let mod_gender = mod_morph.flags.intersection(Grammemes::GENDERS);
            let head_gender = head_morph.flags.intersection(Grammemes::GENDERS);

            if !mod_gender.is_empty() && !head_gender.is_empty() && !mod_gender.intersects(head_gender) {
                errors.push(AgreementError {
                    entity: id,
                    source: mod_token.text.clone(),
                    target: head_text(world, syntax.head),
                    details: format!("Gender mismatch: {:?} vs {:?}", mod_gender, head_gender),
                });
            }
        }
    }
    errors
}
