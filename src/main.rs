use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::json;

use matscope::analysis::{bet, ir, tga, xrd, DataKind};
use matscope::history::{HistoryEntry, HistoryStore};
use matscope::suggest::{self, HttpSuggestionProvider, SuggestionProvider};

const USAGE: &str = "\
Usage: matscope <xrd|ir|bet|tga> <original> [modified] [options]

Options:
  --explanation TEXT   how the material was modified
  --query TEXT         specific question for the summary
  --summarize          request a generated summary (needs GEMINI_API_KEY)

BET input may be a delimited table (.csv) or extracted report text (.txt).";

struct Args {
    kind: DataKind,
    original: PathBuf,
    modified: Option<PathBuf>,
    explanation: String,
    query: String,
    summarize: bool,
}

fn parse_args() -> Result<Args> {
    let mut positional: Vec<String> = Vec::new();
    let mut explanation = String::new();
    let mut query = String::new();
    let mut summarize = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--explanation" => {
                explanation = args.next().context("--explanation needs a value")?;
            }
            "--query" => {
                query = args.next().context("--query needs a value")?;
            }
            "--summarize" => summarize = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n\n{USAGE}"),
            _ => positional.push(arg),
        }
    }

    if positional.len() < 2 {
        bail!("{USAGE}");
    }
    let kind: DataKind = positional[0]
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{e}\n\n{USAGE}"))?;

    Ok(Args {
        kind,
        original: PathBuf::from(&positional[1]),
        modified: positional.get(2).map(PathBuf::from),
        explanation,
        query,
        summarize,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let mut history = HistoryStore::new();

    let (output, features, prompt) = match args.kind {
        DataKind::Xrd => analyze_xrd(&args)?,
        DataKind::Ir => analyze_ir(&args)?,
        DataKind::Bet => analyze_bet(&args)?,
        DataKind::Tga => analyze_tga(&args)?,
    };

    let suggestion = if args.summarize {
        let provider = HttpSuggestionProvider::from_env()?;
        Some(provider.suggest(&prompt)?)
    } else {
        None
    };

    let mut entry = HistoryEntry::new(args.kind, features);
    entry.original_file = Some(args.original.display().to_string());
    entry.modified_file = args.modified.as_ref().map(|p| p.display().to_string());
    entry.user_query = args.query.clone();
    entry.suggestion = suggestion.clone();
    history.append(entry);
    log::info!("history holds {} entries", history.len());

    let mut document = output;
    document["suggestion"] = json!(suggestion);
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn analyze_xrd(args: &Args) -> Result<(serde_json::Value, serde_json::Value, String)> {
    let original = xrd::extract_bytes(&read_bytes(&args.original)?)?;
    let modified = args
        .modified
        .as_deref()
        .map(|p| -> Result<_> { Ok(xrd::extract_bytes(&read_bytes(p)?)?) })
        .transpose()?;

    let modified_peaks = modified.as_ref().map(|m| m.peaks.clone()).unwrap_or_default();
    let prompt = suggest::xrd_prompt(
        &original.peaks,
        &modified_peaks,
        &args.explanation,
        &args.query,
    );
    let features = json!({
        "original_peaks": original.peaks,
        "modified_peaks": modified_peaks,
    });
    let output = json!({
        "kind": "xrd",
        "original": original,
        "modified": modified,
    });
    Ok((output, features, prompt))
}

fn analyze_ir(args: &Args) -> Result<(serde_json::Value, serde_json::Value, String)> {
    let original = ir::extract_bytes(&read_bytes(&args.original)?)?;
    let modified = args
        .modified
        .as_deref()
        .map(|p| -> Result<_> { Ok(ir::extract_bytes(&read_bytes(p)?)?) })
        .transpose()?;

    let modified_peaks = modified.as_ref().map(|m| m.peaks.clone()).unwrap_or_default();
    let prompt = suggest::ir_prompt(
        &original.peaks,
        &modified_peaks,
        &args.explanation,
        &args.query,
    );
    let features = json!({
        "original_peaks": original.peaks,
        "modified_peaks": modified_peaks,
    });
    let output = json!({
        "kind": "ir",
        "original": original,
        "modified": modified,
    });
    Ok((output, features, prompt))
}

/// A BET input is report text when it is not a delimited table file.
fn analyze_bet_file(path: &Path) -> Result<bet::BetExtraction> {
    let is_table = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let result = if is_table {
        bet::extract_bytes(&read_bytes(path)?)
    } else {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        bet::extract_from_text(&text)
    };
    result.with_context(|| format!("analyzing {}", path.display()))
}

fn analyze_bet(args: &Args) -> Result<(serde_json::Value, serde_json::Value, String)> {
    let original = analyze_bet_file(&args.original)?;
    let modified = args
        .modified
        .as_deref()
        .map(analyze_bet_file)
        .transpose()?;

    let original_area = original.surface_area();
    let modified_area = modified.as_ref().map(|m| m.surface_area());
    let prompt = suggest::bet_prompt(
        Some(original_area),
        modified_area,
        &args.explanation,
        &args.query,
    );
    let features = json!({
        "original_surface_area": original_area,
        "modified_surface_area": modified_area,
    });
    let output = json!({
        "kind": "bet",
        "original": original,
        "modified": modified,
    });
    Ok((output, features, prompt))
}

fn analyze_tga(args: &Args) -> Result<(serde_json::Value, serde_json::Value, String)> {
    let results = tga::extract_bytes(&read_bytes(&args.original)?)?;

    let prompt = suggest::tga_prompt(&results, &args.query);
    let features = serde_json::to_value(&results)?;
    let output = json!({
        "kind": "tga",
        "results": results,
    });
    Ok((output, features, prompt))
}
