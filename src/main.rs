use std::path::{Path, PathBuf};

use clap::Parser;
use header_footer_cutter::{
    emit_documents, enumerate_inputs, load_documents, load_settings, write_documents_to_json, write_documents_to_text_file, Cutter, CutterSettings,
    EmptySequencePolicy, Notifier, OutputMeta,
};
use tracing_subscriber::EnvFilter;

/// Strip repeated headers and footers from page text.
#[derive(Parser, Debug)]
#[command(name = "hfcut", version, about)]
struct Cli {
    /// Glob of input files (.txt pages split on form feed, or .jsonl documents)
    #[arg(short, long)]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// YAML settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Output file stem
    #[arg(long, default_value = "documents")]
    name: String,

    #[arg(long)]
    max_lines: Option<usize>,

    #[arg(long)]
    repeat_threshold: Option<f64>,

    #[arg(long)]
    max_differences: Option<usize>,

    /// Dump documents before and after processing
    #[arg(long)]
    debug: bool,

    /// Abort on empty header/footer candidates instead of skipping them
    #[arg(long)]
    fail_on_empty: bool,
}

/// Prints each removal notification as a JSON line on stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{}", serde_json::json!({"tool": "remove_sequence", "notification": message}));
    }
}

fn resolve_settings(cli: &Cli) -> Result<CutterSettings, header_footer_cutter::SettingsError> {
    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => CutterSettings::default(),
    };
    if let Some(n) = cli.max_lines {
        settings.max_lines = n;
    }
    if let Some(t) = cli.repeat_threshold {
        settings.repeat_threshold = t;
    }
    if let Some(d) = cli.max_differences {
        settings.max_differences = d;
    }
    if cli.debug {
        settings.debug_mode = true;
    }
    if cli.fail_on_empty {
        settings.empty_sequences = EmptySequencePolicy::Fail;
    }
    settings.validate()?;
    Ok(settings)
}

fn dump_or_warn(result: Result<(), header_footer_cutter::EmitError>, file: &Path) {
    if let Err(e) = result {
        eprintln!("{}", serde_json::json!({"tool": "dump_steps", "file": file, "error": e.to_string()}));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 1) Settings
    let settings = match resolve_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", serde_json::json!({"tool": "load_settings", "file": cli.settings, "error": e.to_string()}));
            std::process::exit(3);
        }
    };
    eprintln!(
        "{}",
        serde_json::json!({
            "tool": "load_settings",
            "status": "ok",
            "max_lines": settings.max_lines,
            "repeat_threshold": settings.repeat_threshold,
            "max_differences": settings.max_differences,
            "empty_sequences": settings.empty_sequences,
        })
    );

    // 2) Enumerate and load
    let files = match enumerate_inputs(&cli.input) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", serde_json::json!({"tool": "enumerate_inputs", "pattern": cli.input, "error": e.to_string(), "error_code": 1}));
            std::process::exit(1);
        }
    };
    eprintln!("{}", serde_json::json!({"tool": "enumerate_inputs", "count": files.len()}));

    let documents = match load_documents(&files) {
        Ok(docs) => docs,
        Err(e) => {
            eprintln!("{}", serde_json::json!({"tool": "load_documents", "error": e.to_string(), "error_code": 1}));
            std::process::exit(1);
        }
    };
    eprintln!("{}", serde_json::json!({"tool": "load_documents", "documents": documents.len()}));

    let dump_dir = settings.dump_dir.clone();
    if settings.debug_mode {
        let txt = dump_dir.join("docs.txt");
        dump_or_warn(write_documents_to_text_file(&documents, &txt), &txt);
        let json = dump_dir.join("docs.json");
        dump_or_warn(write_documents_to_json(&documents, &json), &json);
    }

    // 3) Remove headers and footers
    let debug_mode = settings.debug_mode;
    let cutter = match Cutter::new(settings) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", serde_json::json!({"tool": "load_settings", "error": e.to_string()}));
            std::process::exit(3);
        }
    };
    let outcome = match cutter.remove_headers_and_footers(&documents, &mut StderrNotifier) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", serde_json::json!({"tool": "remove_headers_and_footers", "error": e.to_string(), "error_code": 4}));
            std::process::exit(4);
        }
    };
    eprintln!(
        "{}",
        serde_json::json!({
            "tool": "remove_headers_and_footers",
            "min_repeating_docs": outcome.detection.min_repeating_docs,
            "headers": outcome.detection.headers,
            "footers": outcome.detection.footers,
            "removed_headers": outcome.report.removed_headers,
            "removed_footers": outcome.report.removed_footers,
        })
    );

    if debug_mode {
        let txt = dump_dir.join("docs_updated.txt");
        dump_or_warn(write_documents_to_text_file(&outcome.documents, &txt), &txt);
    }

    // 4) Emit
    let meta = OutputMeta::new(&outcome.documents, &outcome.report);
    match emit_documents(&outcome.documents, &meta, &cli.output, &cli.name) {
        Ok(paths) => {
            eprintln!(
                "{}",
                serde_json::json!({"tool": "emit_documents", "documents_path": paths.documents_path, "meta_path": paths.meta_path})
            );
        }
        Err(e) => {
            eprintln!("{}", serde_json::json!({"tool": "emit_documents", "error": e.to_string(), "error_code": 6}));
            std::process::exit(6);
        }
    }
}
