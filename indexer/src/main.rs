use anyhow::{bail, Context, Result};
use blogsearch_core::{DocId, DocumentRecord, EngineStats, SearchConfig, SearchEngine};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(default)]
    id: Option<DocId>,
    title: String,
    excerpt: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
    url: String,
    #[serde(default)]
    teaser: Option<String>,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query an in-memory blog post search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load records, build the index and print its statistics
    Build {
        /// Input path (.json, .jsonl, lunr store .js, or a directory of them)
        #[arg(long)]
        input: String,
        /// Search configuration JSON file
        #[arg(long)]
        config: Option<String>,
    },
    /// Build the index and run a single query against it
    Search {
        #[arg(long)]
        input: String,
        #[arg(long)]
        query: String,
        /// Maximum number of hits to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        config: Option<String>,
        /// Abort the query after this many milliseconds
        #[arg(long)]
        budget_ms: Option<u64>,
    },
}

#[derive(Serialize)]
struct BuildReport {
    input: String,
    built_at: String,
    #[serde(flatten)]
    stats: EngineStats,
}

#[derive(Serialize)]
struct HitOut<'a> {
    id: DocId,
    score: f32,
    title: &'a str,
    url: &'a str,
    excerpt: &'a str,
    tags: &'a [String],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, config } => {
            let config = load_config(config.as_deref())?;
            let engine = build_engine(&input, config)?;
            let report = BuildReport {
                input,
                built_at: time::OffsetDateTime::now_utc()
                    .format(&time::format_description::well_known::Rfc3339)
                    .unwrap_or_default(),
                stats: engine.stats(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::Search { input, query, limit, config, budget_ms } => {
            let mut config = load_config(config.as_deref())?;
            if budget_ms.is_some() {
                config.time_budget_ms = budget_ms;
            }
            let engine = build_engine(&input, config)?;
            let hits = engine.search(&query, limit)?;
            let out: Vec<HitOut<'_>> = hits
                .iter()
                .map(|h| HitOut {
                    id: h.record.id,
                    score: h.score,
                    title: &h.record.title,
                    url: &h.record.url,
                    excerpt: &h.record.excerpt,
                    tags: &h.record.tags,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&str>) -> Result<SearchConfig> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p).with_context(|| format!("reading config {p}"))?;
            SearchConfig::from_json_str(&text).with_context(|| format!("parsing config {p}"))
        }
        None => Ok(SearchConfig::default()),
    }
}

fn build_engine(input: &str, config: SearchConfig) -> Result<SearchEngine> {
    let records = load_records(Path::new(input))?;
    tracing::info!(input, num_docs = records.len(), "loaded records");
    Ok(SearchEngine::new(records, config)?)
}

fn load_records(input_path: &Path) -> Result<Vec<DocumentRecord>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        let entries = WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable input entry");
                None
            }
        });
        for entry in entries {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl" | "js") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        bail!("input {} does not exist", input_path.display());
    }

    let mut docs: Vec<InputDoc> = Vec::new();
    for file in files {
        let before = docs.len();
        match file.extension().and_then(|s| s.to_str()) {
            Some("jsonl") => read_jsonl(&file, &mut docs)?,
            Some("js") => read_lunr_store(&file, &mut docs)?,
            _ => read_json(&file, &mut docs)?,
        }
        tracing::debug!(file = %file.display(), count = docs.len() - before, "read input file");
    }
    Ok(assign_ids(docs))
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    push_value(json, docs).with_context(|| format!("reading records from {}", file.display()))
}

/// Parse a `var store = [...];` script by taking its outermost array literal as JSON.
fn read_lunr_store(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("opening {}", file.display()))?;
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        bail!("{} has no array literal", file.display());
    };
    if end < start {
        bail!("{} has no array literal", file.display());
    }
    let json: serde_json::Value = serde_json::from_str(&text[start..=end])
        .with_context(|| format!("parsing store array in {}", file.display()))?;
    push_value(json, docs).with_context(|| format!("reading records from {}", file.display()))
}

fn push_value(json: serde_json::Value, docs: &mut Vec<InputDoc>) -> Result<()> {
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        other => tracing::warn!(kind = ?other, "skipping non-record JSON value"),
    }
    Ok(())
}

/// Give id-less records the lowest ids not claimed explicitly, in load order.
/// Explicit duplicates pass through so the build rejects them.
fn assign_ids(docs: Vec<InputDoc>) -> Vec<DocumentRecord> {
    let claimed: HashSet<DocId> = docs.iter().filter_map(|d| d.id).collect();
    let mut next: DocId = 0;
    docs.into_iter()
        .map(|d| {
            let id = d.id.unwrap_or_else(|| {
                while claimed.contains(&next) { next += 1; }
                let id = next;
                next += 1;
                id
            });
            DocumentRecord {
                id,
                title: d.title,
                excerpt: d.excerpt,
                tags: d.tags,
                categories: d.categories,
                url: d.url,
                teaser: d.teaser,
            }
        })
        .collect()
}
