//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use mldcat::api::{self, ApiKeys, AppState};
use mldcat::compat::{LegacyClient, Outcome, compare_snapshots, local_snapshot};
use mldcat::config::Config;
use mldcat_core::{
    Catalog, DatasetMetadata, DatasetMetadataV1, GraphBuilder, LegacyResponse, MldcatError,
    convert, fetch_dataset,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE HELPERS
// =============================================================================

/// Maximum size of a record file passed to `validate` (10 MB).
const MAX_RECORD_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Upper bound on the number of ids a single `compare` run may request.
const MAX_COMPARE_IDS: usize = 100_000;

/// Read a file after checking it is a regular file below `max_size` bytes.
fn read_bounded(path: &Path, max_size: u64) -> Result<String, MldcatError> {
    let canonical = path.canonicalize().map_err(|e| {
        MldcatError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;
    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| MldcatError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if !metadata.is_file() {
        return Err(MldcatError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_size {
        return Err(MldcatError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }

    std::fs::read_to_string(&canonical)
        .map_err(|e| MldcatError::IoError(format!("Cannot read '{}': {}", path.display(), e)))
}

/// Resolve an output path against its canonicalized parent directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, MldcatError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let canonical_parent = parent.canonicalize().map_err(|e| {
        MldcatError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;
    let filename = path
        .file_name()
        .ok_or_else(|| MldcatError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn load_catalog(config: &Config) -> Result<Catalog, MldcatError> {
    let catalog = Catalog::load(&config.catalog.path)?;
    tracing::info!(
        "Loaded {} dataset(s) from {}",
        catalog.len(),
        config.catalog.path.display()
    );
    Ok(catalog)
}

fn pretty(value: &impl serde::Serialize) -> Result<String, MldcatError> {
    serde_json::to_string_pretty(value).map_err(MldcatError::from)
}

/// Parse `1-131`, `1,2,61` or `61` into a list of ids.
pub fn parse_ids(spec: &str) -> Result<Vec<i64>, MldcatError> {
    let invalid = |part: &str| MldcatError::Validation(format!("invalid dataset id '{part}'"));
    let mut ids = Vec::new();

    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        // A leading '-' is a negative id, not a range.
        let (sign, rest) = match part.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", part),
        };
        match rest.split_once('-') {
            Some((start, end)) => {
                let start: i64 = format!("{sign}{start}")
                    .parse()
                    .map_err(|_| invalid(part))?;
                let end: i64 = end.parse().map_err(|_| invalid(part))?;
                if end < start {
                    return Err(invalid(part));
                }
                let span = end.checked_sub(start).ok_or_else(|| invalid(part))?;
                let count = usize::try_from(span).unwrap_or(usize::MAX);
                if ids.len().saturating_add(count) >= MAX_COMPARE_IDS {
                    return Err(MldcatError::Validation(format!(
                        "more than {MAX_COMPARE_IDS} ids requested"
                    )));
                }
                ids.extend(start..=end);
            }
            None => ids.push(part.parse().map_err(|_| invalid(part))?),
        }
    }

    if ids.is_empty() {
        return Err(MldcatError::Validation("no dataset ids given".to_string()));
    }
    Ok(ids)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), MldcatError> {
    let catalog = load_catalog(config)?;
    let datasets = catalog.len();
    let state = AppState::new(catalog, ApiKeys::new(config.users.clone()));
    let addr = config.server.addr();

    println!("MLDCAT Metadata Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Address:  {}", addr);
    println!("  Catalog:  {} ({} datasets)", config.catalog.path.display(), datasets);
    println!("  Users:    {}", config.users.len());
    println!();
    println!("Endpoints:");
    println!("  GET /old/datasets/{{id}}       - Legacy dataset description");
    println!("  GET /datasets/{{id}}           - Dataset record");
    println!("  GET /mldcat_ap/datasets/{{id}} - MLDCAT-AP JSON-LD graph");
    println!("  GET /health                  - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&addr, state).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Summarize the configured catalog.
pub fn cmd_status(config: &Config, json_mode: bool) -> Result<(), MldcatError> {
    let catalog = load_catalog(config)?;
    let private = catalog.iter().filter(|r| r.is_private()).count();

    if json_mode {
        let output = serde_json::json!({
            "catalog": config.catalog.path.to_string_lossy(),
            "datasets": catalog.len(),
            "private": private,
            "users": config.users.len(),
        });
        println!("{}", pretty(&output)?);
        return Ok(());
    }

    println!("MLDCAT Catalog Status");
    println!("=====================");
    println!("Catalog:  {}", config.catalog.path.display());
    println!();
    println!("Datasets: {}", catalog.len());
    println!("Private:  {}", private);
    println!("Users:    {}", config.users.len());

    Ok(())
}

// =============================================================================
// CONVERT COMMAND
// =============================================================================

/// Print or write the MLDCAT-AP graph of one dataset.
pub fn cmd_convert(
    config: &Config,
    id: i64,
    api_key: Option<&str>,
    output: Option<&Path>,
    no_placeholders: bool,
) -> Result<(), MldcatError> {
    let catalog = load_catalog(config)?;
    let requester = ApiKeys::new(config.users.clone()).resolve(api_key);
    let record = fetch_dataset(&catalog, id, requester)?;

    let builder = if no_placeholders {
        GraphBuilder::without_placeholders()
    } else {
        GraphBuilder::default()
    };
    let graph = builder.build(&record)?;
    let json = pretty(&graph.to_jsonld()?)?;

    match output {
        Some(path) => {
            let path = validate_output_path(path)?;
            std::fs::write(&path, json.as_bytes()).map_err(|e| {
                MldcatError::IoError(format!("Cannot write '{}': {}", path.display(), e))
            })?;
            println!("Wrote {} nodes to {}", graph.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Print one dataset record.
pub fn cmd_show(
    config: &Config,
    id: i64,
    api_key: Option<&str>,
    legacy: bool,
) -> Result<(), MldcatError> {
    let catalog = load_catalog(config)?;
    let requester = ApiKeys::new(config.users.clone()).resolve(api_key);
    let record = fetch_dataset(&catalog, id, requester)?;

    let json = if legacy {
        pretty(&LegacyResponse::from(&record))?
    } else {
        pretty(&record)?
    };
    println!("{json}");
    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Validate one record file, or every record of the catalog.
///
/// A record is valid when it parses, passes the value checks, and converts
/// to a graph.
pub fn cmd_validate(
    config: &Config,
    file: Option<&Path>,
    v1: bool,
    json_mode: bool,
) -> Result<(), MldcatError> {
    let records = match file {
        Some(path) => {
            let text = read_bounded(path, MAX_RECORD_FILE_SIZE)?;
            let record = if v1 {
                let old: DatasetMetadataV1 = serde_json::from_str(&text)?;
                let record = DatasetMetadata::from(old);
                record.validate()?;
                record
            } else {
                DatasetMetadata::from_json(&text)?
            };
            vec![record]
        }
        None => load_catalog(config)?.iter().cloned().collect(),
    };

    let mut failures = Vec::new();
    for record in &records {
        if let Err(e) = convert(record) {
            tracing::warn!(dataset = record.id.0, "Conversion failed: {}", e);
            failures.push((record.id, e.to_string()));
        }
    }

    if json_mode {
        let output = serde_json::json!({
            "checked": records.len(),
            "failed": failures
                .iter()
                .map(|(id, error)| serde_json::json!({"id": id, "error": error}))
                .collect::<Vec<_>>(),
        });
        println!("{}", pretty(&output)?);
    } else {
        println!("Checked {} record(s)", records.len());
        for (id, error) in &failures {
            println!("  dataset {id}: {error}");
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(MldcatError::Validation(format!(
            "{} of {} record(s) failed to convert",
            failures.len(),
            records.len()
        )))
    }
}

// =============================================================================
// COMPARE COMMAND
// =============================================================================

/// Compare the legacy API with the local rendering, dataset by dataset.
pub async fn cmd_compare(config: &Config, ids: &str, json_mode: bool) -> Result<(), MldcatError> {
    let ids = parse_ids(ids)?;
    let catalog = load_catalog(config)?;
    let client = LegacyClient::new(&config.legacy.url)
        .map_err(|e| MldcatError::IoError(e.to_string()))?;

    tracing::info!("Comparing {} dataset(s) against {}", ids.len(), config.legacy.url);

    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        let legacy = client
            .fetch(id)
            .await
            .map_err(|e| MldcatError::IoError(e.to_string()))?;
        let outcome = compare_snapshots(&legacy, &local_snapshot(&catalog, id));
        if !json_mode {
            print_outcome(id, &outcome);
        }
        results.push((id, outcome));
    }

    let incompatible = results.iter().filter(|(_, o)| !o.is_compatible()).count();

    if json_mode {
        let output: Vec<_> = results
            .iter()
            .map(|(id, outcome)| serde_json::json!({"id": id, "result": outcome}))
            .collect();
        println!("{}", pretty(&output)?);
    } else {
        println!();
        println!(
            "{} compared, {} incompatible",
            results.len(),
            incompatible
        );
    }

    if incompatible == 0 {
        Ok(())
    } else {
        Err(MldcatError::Validation(format!(
            "{incompatible} dataset(s) differ from the legacy API"
        )))
    }
}

fn print_outcome(id: i64, outcome: &Outcome) {
    match outcome {
        Outcome::Identical => println!("{id:>6}  ok"),
        Outcome::Skipped { reason } => println!("{id:>6}  skipped ({reason})"),
        Outcome::StatusMismatch { legacy, new } => {
            println!("{id:>6}  status differs: legacy {legacy}, new {new}");
        }
        Outcome::ErrorMismatch { legacy, new } => {
            println!("{id:>6}  error differs: legacy {legacy:?}, new {new:?}");
        }
        Outcome::FieldsDiffer { diffs } => {
            println!("{id:>6}  {} field(s) differ", diffs.len());
            for diff in diffs {
                println!(
                    "          {}: legacy {:?}, new {:?}",
                    diff.field, diff.legacy, diff.new
                );
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
