//! Short grammatical codes (`"дт,мн"`, `"пр,имя,ед"`) to [`FormSpec`].

use padezh_protocol::{Animacy, Case, FormSpec, Gender, Grammemes, Number};
use tracing::debug;

/// Parses a comma-separated list of form codes.
///
/// Russian abbreviations and OpenCorpora tags are both understood. Unknown
/// codes are skipped, and a category given twice keeps its last value.
pub fn parse_form_codes(codes: &str) -> FormSpec {
    let mut form = FormSpec::new();

    for code in codes.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if let Some(case) = Case::from_code(code) {
            form.case = Some(case);
        } else if let Some(number) = Number::from_code(code) {
            form.number = Some(number);
        } else if let Some(gender) = Gender::from_code(code) {
            form.gender = Some(gender);
        } else if let Some(animacy) = Animacy::from_code(code) {
            form.animacy = Some(animacy);
        } else if let Some(hint) = Grammemes::hint_from_code(code) {
            form.hints |= hint;
        } else {
            debug!(code, "ignoring unknown form code");
        }
    }

    form
}
