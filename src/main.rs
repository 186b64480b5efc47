use colored::Colorize;
use serde::Deserialize;
use serde_json::json;
use std::io::{self, IsTerminal, Read};
use token_lens::{
    config::{load_config, save_api_key, validate_target_language, Config, TARGET_LANGUAGES},
    output::{print_error, print_verbose, print_warning},
    render::{render_tokens, render_word_groups},
    security::{preview, redact_secrets},
    session::{Analysis, Session},
    stats::{format_percent, format_ratio, format_signed, Efficiency},
    translator::{RequestTracker, Translator},
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Deserialize)]
struct TextInput {
    text: String,
}

/// Read input from stdin, supporting both JSON and plain text formats
///
/// If stdin is a terminal (no piped input), returns None with an error message.
fn read_text_from_stdin() -> Option<String> {
    if io::stdin().is_terminal() {
        print_error("No input provided. Pipe text to this command:");
        eprintln!("  echo 'your text' | token-lens");
        eprintln!("  echo '{{\"text\": \"your text\"}}' | token-lens --translate");
        return None;
    }

    let mut input = String::new();
    if io::stdin().read_to_string(&mut input).is_err() {
        print_error("Failed to read stdin");
        return None;
    }

    if input.trim().is_empty() {
        return Some(String::new());
    }

    // Try JSON parse, fallback to plain text. Trim either way so both
    // input forms see the same text.
    Some(match serde_json::from_str::<TextInput>(&input) {
        Ok(parsed) => parsed.text.trim().to_string(),
        Err(_) => input.trim().to_string(),
    })
}

/// Enforce the input cap by truncating at a char boundary, with a warning.
fn cap_input(text: String, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    print_warning(&format!(
        "input is {count} chars; truncating to the first {max_chars}"
    ));
    text.chars().take(max_chars).collect()
}

/// Value of a `--flag value` pair, if present
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|s| s == "--verbose" || s == "-v");

    match args.get(1).map(String::as_str) {
        Some("--version" | "-V") => {
            println!("token-lens {VERSION}");
            return;
        }
        Some("--help" | "-h") => {
            print_help();
            return;
        }
        Some("--languages") => {
            for lang in TARGET_LANGUAGES {
                println!("{lang}");
            }
            return;
        }
        Some("--set-key") => {
            handle_set_key(&args);
            return;
        }
        _ => {}
    }

    let json_output = args.iter().any(|s| s == "--json");
    let tokens_only = args.iter().any(|s| s == "--tokenize");
    let words_only = args.iter().any(|s| s == "--words");
    let mut translate = args.iter().any(|s| s == "--translate");

    let mut config = load_config();
    if let Some(lang) = flag_value(&args, "--to") {
        match validate_target_language(&lang) {
            Ok(name) => {
                config.target_language = name.to_string();
                translate = true;
            }
            Err(e) => {
                print_error(&e.to_string());
                std::process::exit(2);
            }
        }
    }

    let text = match read_text_from_stdin() {
        Some(t) => t,
        None => std::process::exit(1),
    };
    let text = cap_input(text, config.max_input_chars);

    print_verbose(&format!("input: {}", preview(&text)), verbose);

    let mut session = Session::new();
    if !text.is_empty() {
        if let Err(e) = session.set_original(&text) {
            print_error(&redact_secrets(&e.to_string()));
            std::process::exit(1);
        }
    }

    let mut translation_error: Option<String> = None;
    if translate && !text.is_empty() {
        let translator = match Translator::from_config(&config) {
            Ok(t) => t,
            Err(e) => {
                print_error(&e.to_string());
                std::process::exit(2);
            }
        };

        print_verbose(
            &format!("translating to {}", config.target_language),
            verbose,
        );
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();
        match translator.translate(&text, &config.target_language).await {
            Ok(translated) => {
                // A stale response must never overwrite a newer one
                if tracker.is_current(ticket) {
                    if let Err(e) = session.set_comparison(&translated) {
                        let msg = e.to_string();
                        print_error(&msg);
                        translation_error = Some(msg);
                    }
                }
            }
            Err(e) => {
                if e.is_translation() {
                    session.clear_comparison();
                }
                let msg = redact_secrets(&e.to_string()).into_owned();
                print_error(&msg);
                translation_error = Some(msg);
            }
        }
    }

    if json_output {
        print_json_report(&session, &config, translation_error.as_deref());
    } else {
        print_report(&session, &config, tokens_only, words_only);
    }

    if translation_error.is_some() {
        std::process::exit(1);
    }
}

fn handle_set_key(args: &[String]) {
    let key = match args.get(2) {
        Some(k) if !k.trim().is_empty() => k,
        _ => {
            print_error("Usage: token-lens --set-key <api-key>");
            std::process::exit(2);
        }
    };
    match save_api_key(key) {
        Ok(path) => println!("{} key saved to {}", "[token-lens]".green(), path.display()),
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn print_side(title: &str, analysis: &Analysis, tokens_only: bool, words_only: bool) {
    println!("{}", title.bold().underline());
    print_side_body(analysis, tokens_only, words_only);
}

fn print_side_body(analysis: &Analysis, tokens_only: bool, words_only: bool) {
    if !words_only {
        println!("{}", render_tokens(&analysis.tokens));
    }
    if !tokens_only {
        println!("{}", render_word_groups(&analysis.mapping));
    }
    println!(
        "{}: {}   {}: {}   {}: {}",
        "Tokens".cyan(),
        analysis.stats.token_count,
        "Words".cyan(),
        analysis.stats.word_count,
        "Tokens/word".cyan(),
        format_ratio(&analysis.stats)
    );
}

fn print_report(session: &Session, config: &Config, tokens_only: bool, words_only: bool) {
    if let Some(name) = session.detection().name() {
        println!("{}: {}", "Detected".cyan(), name);
        println!();
    }

    match session.original() {
        Some(analysis) => print_side("Original", analysis, tokens_only, words_only),
        None => println!("{}", "(tokens will appear here)".dimmed()),
    }

    if let Some(analysis) = session.comparison() {
        println!();
        println!(
            "{}",
            format!("Translation ({})", config.target_language)
                .bold()
                .underline()
        );
        println!("{}", analysis.text);
        print_side_body(analysis, tokens_only, words_only);
    }

    if let Some(comparison) = session.comparison_stats() {
        let winner = match comparison.more_efficient {
            Efficiency::Translation => config.target_language.as_str(),
            verdict => verdict.label(),
        };
        println!();
        println!("{}", "Comparison".bold().underline());
        println!(
            "{}: {}   {}: {}   {}: {}   {}: {}",
            "Token diff".cyan(),
            format_signed(comparison.token_delta),
            "Percent".cyan(),
            format_percent(&comparison),
            "Word diff".cyan(),
            format_signed(comparison.word_delta),
            "More efficient".cyan(),
            winner
        );
    }
}

fn side_json(analysis: Option<&Analysis>) -> serde_json::Value {
    match analysis {
        Some(a) => json!({
            "text": a.text,
            "tokens": a.tokens,
            "words": a.mapping.spans,
            "tokenCount": a.stats.token_count,
            "wordCount": a.stats.word_count,
            "ratio": a.stats.ratio(),
        }),
        None => serde_json::Value::Null,
    }
}

fn print_json_report(session: &Session, config: &Config, translation_error: Option<&str>) {
    let detection = session
        .detection()
        .detected()
        .map(|lang| json!({"code": lang.code, "name": lang.name}));

    let report = json!({
        "original": side_json(session.original()),
        "translation": side_json(session.comparison()),
        "targetLanguage": config.target_language,
        "detectedLanguage": detection,
        "comparison": session.comparison_stats(),
        "translationError": translation_error,
    });

    match serde_json::to_string_pretty(&report) {
        Ok(out) => println!("{out}"),
        Err(e) => print_error(&format!("failed to serialize report: {e}")),
    }
}

fn print_help() {
    println!(
        r#"token-lens {VERSION}
Visualize LLM tokenization and compare translation token efficiency.

USAGE:
  echo 'text' | token-lens [OPTIONS]

OPTIONS:
  --tokenize          Show the token view only
  --words             Show the word-grouped view only
  --translate         Translate the input and compare token counts
  --to <Language>     Target language for translation (implies --translate)
  --json              Machine-readable report
  --set-key <key>     Save the translation API key and exit
  --languages         List available target languages
  -v, --verbose       Verbose diagnostics on stderr
  -V, --version       Print version
  -h, --help          Print this help

INPUT:
  Reads one document from stdin, either plain text or {{"text": "..."}}.
  Input longer than the configured cap (default 500 chars) is truncated.

CONFIG:
  .token-lens.json in the working directory, home directory, or the user
  config directory. Environment overrides: TOKEN_LENS_API_KEY (falls back
  to OPENAI_API_KEY), TOKEN_LENS_TARGET_LANG, TOKEN_LENS_MODEL."#
    );
}
