mod logging;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use padezh_inflector::{Inflector, InflectorConfig};
use padezh_morph::{to_archive, DictionaryAnalyzer, MorphProvider};
use padezh_protocol::Dictionary;
use tracing::info;

use logging::{init_logging, LogFormat};

#[derive(Parser)]
#[command(author, version, about = "Inflects Russian phrases against a paradigm dictionary")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// text or json
    #[arg(long, global = true, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compiles a JSON dictionary into the binary archive format
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Inflects every word outside [[...]]
    Inflect(PhraseArgs),
    /// Inflects only the words inside [[...]]
    InflectMarked(PhraseArgs),
    /// Inflects a collocation, modifiers agreeing with the head noun
    Collocation(PhraseArgs),
    /// Agrees a phrase with a count
    Plural {
        #[command(flatten)]
        source: Source,

        phrase: String,

        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Prints every parse of a word as JSON
    Analyze {
        #[command(flatten)]
        source: Source,

        word: String,
    },
}

#[derive(Args)]
struct Source {
    /// Dictionary, JSON (*.json) or compiled archive
    #[arg(short, long, value_name = "FILE")]
    dict: PathBuf,

    /// Inflector settings as JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct PhraseArgs {
    #[command(flatten)]
    source: Source,

    phrase: String,

    /// Comma separated form codes, e.g. "мн,тв"
    #[arg(default_value = "")]
    codes: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Inflect(args) => {
            let dict = load_dictionary(&args.source.dict)?;
            let config = load_config(args.source.config.as_deref())?;
            let inflector = Inflector::with_config(&dict, &config)?;
            println!("{}", inflector.inflect(&args.phrase, &args.codes)?);
            Ok(())
        }
        Command::InflectMarked(args) => {
            let dict = load_dictionary(&args.source.dict)?;
            let config = load_config(args.source.config.as_deref())?;
            let inflector = Inflector::with_config(&dict, &config)?;
            println!("{}", inflector.inflect_marked(&args.phrase, &args.codes)?);
            Ok(())
        }
        Command::Collocation(args) => {
            let dict = load_dictionary(&args.source.dict)?;
            let config = load_config(args.source.config.as_deref())?;
            let inflector = Inflector::with_config(&dict, &config)?;
            println!("{}", inflector.inflect_collocation(&args.phrase, &args.codes)?);
            Ok(())
        }
        Command::Plural { source, phrase, count } => {
            let dict = load_dictionary(&source.dict)?;
            let config = load_config(source.config.as_deref())?;
            let inflector = Inflector::with_config(&dict, &config)?;
            println!("{}", inflector.plural(&phrase, count)?);
            Ok(())
        }
        Command::Analyze { source, word } => {
            let dict = load_dictionary(&source.dict)?;
            let parses = dict.analyze(&word);
            println!("{}", serde_json::to_string_pretty(&parses)?);
            Ok(())
        }
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    info!(input = %input.display(), "reading dictionary");
    let dict = read_json_dictionary(input)?;

    // Index once so dangling paradigm references fail here, not at load time.
    let analyzer = DictionaryAnalyzer::new(dict)?;
    let dict = analyzer.dictionary();
    info!(
        version = dict.version,
        lexemes = dict.lexemes.len(),
        paradigms = dict.paradigms.len(),
        "compiling"
    );

    let bytes = to_archive(dict)?;
    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;

    println!("{} bytes written to {}", bytes.len(), output.display());
    Ok(())
}

fn read_json_dictionary(path: &Path) -> anyhow::Result<Dictionary> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_dictionary(path: &Path) -> anyhow::Result<DictionaryAnalyzer> {
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let analyzer = if is_json {
        DictionaryAnalyzer::new(read_json_dictionary(path)?)?
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        DictionaryAnalyzer::from_archive(&bytes)
            .with_context(|| format!("loading archive {}", path.display()))?
    };
    Ok(analyzer)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<InflectorConfig> {
    let Some(path) = path else {
        return Ok(InflectorConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
