use padezh_inflector::{Inflector, InflectorConfig};
use padezh_morph::{DictionaryAnalyzer, MorphProvider};
use padezh_protocol::Grammemes;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// One parse as seen from JavaScript.
#[derive(Debug, Serialize)]
pub struct ParseDebug {
    pub word: String,
    pub normal_form: String,
    pub pos: String,
    pub grammemes: String,
    pub score: f32,
    pub lemma_id: u32,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub word: String,
    pub parses: Vec<ParseDebug>,
}

/// Inflection engine for template helpers running in the browser or Node.
/// Host template engines resolve their lazy strings before calling in.
#[wasm_bindgen]
pub struct PadezhEngine {
    dict: DictionaryAnalyzer,
    config: InflectorConfig,
}

#[wasm_bindgen]
impl PadezhEngine {
    /// `data` is a dictionary archive built by `padezh compile` (loaded via fetch() in JS).
    #[wasm_bindgen(constructor)]
    pub fn new(data: &[u8]) -> Result<PadezhEngine, JsError> {
        let dict = DictionaryAnalyzer::from_archive(data)?;
        Ok(Self { dict, config: InflectorConfig::default() })
    }

    /// Replaces the bracket markers, e.g. `setMarkers("{", "}")`.
    #[wasm_bindgen(js_name = setMarkers)]
    pub fn set_markers(&mut self, open: &str, close: &str) -> Result<(), JsError> {
        let config = InflectorConfig {
            open_marker: open.to_string(),
            close_marker: close.to_string(),
            ..self.config.clone()
        };
        config.segmenter()?;
        self.config = config;
        Ok(())
    }

    pub fn inflect(&self, phrase: &str, codes: &str) -> Result<String, JsError> {
        Ok(self.inflector()?.inflect(phrase, codes)?)
    }

    #[wasm_bindgen(js_name = inflectMarked)]
    pub fn inflect_marked(&self, phrase: &str, codes: &str) -> Result<String, JsError> {
        Ok(self.inflector()?.inflect_marked(phrase, codes)?)
    }

    #[wasm_bindgen(js_name = inflectCollocation)]
    pub fn inflect_collocation(&self, phrase: &str, codes: &str) -> Result<String, JsError> {
        Ok(self.inflector()?.inflect_collocation(phrase, codes)?)
    }

    /// Counts arrive as JS numbers; fractions are truncated.
    pub fn plural(&self, phrase: &str, count: f64) -> Result<String, JsError> {
        Ok(self.inflector()?.plural(phrase, count as i64)?)
    }

    /// Debug view of every parse of `word`.
    pub fn analyze(&self, word: &str) -> Result<JsValue, JsError> {
        let report = self.report(word);
        serde_wasm_bindgen::to_value(&report).map_err(|e| JsError::new(&e.to_string()))
    }
}

impl PadezhEngine {
    fn inflector(&self) -> Result<Inflector<'_, DictionaryAnalyzer>, padezh_inflector::InflectError> {
        Inflector::with_config(&self.dict, &self.config)
    }

    fn report(&self, word: &str) -> AnalysisReport {
        let parses = self
            .dict
            .analyze(word)
            .into_iter()
            .map(|p| ParseDebug {
                pos: format!("{:?}", p.pos),
                grammemes: describe(p.grammemes),
                score: p.score,
                lemma_id: p.lemma.0,
                word: p.word,
                normal_form: p.normal_form,
            })
            .collect();

        AnalysisReport { word: word.to_string(), parses }
    }
}

fn describe(flags: Grammemes) -> String {
    flags
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(",")
}
