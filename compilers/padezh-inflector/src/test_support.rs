use padezh_morph::DictionaryAnalyzer;
use padezh_protocol::Dictionary;

pub(crate) fn sample_analyzer() -> DictionaryAnalyzer {
    let dict: Dictionary = serde_json::from_str(include_str!("../../../data/ru_sample.json"))
        .expect("sample dictionary is valid JSON");
    DictionaryAnalyzer::new(dict).expect("sample dictionary is consistent")
}
