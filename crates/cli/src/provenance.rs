//! `<stem>.provenance.json` sidecars written next to CLI outputs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What the caller knows about a run: its parameters and the case it belongs to.
pub struct Payload {
    pub params: Value,
    pub case_id: Option<String>,
}

impl Payload {
    pub fn new(params: Value, case_id: Option<String>) -> Self {
        Self { params, case_id }
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    flapcheck_version: &'static str,
    generated_at: DateTime<Utc>,
    callsite: Callsite,
    case_id: Option<&'a str>,
    params: &'a Value,
    outputs: Vec<String>,
    output_bytes: Option<u64>,
}

#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let caller = Location::caller();
    let artifact = artifact.as_ref();
    let target = provenance_path(artifact);
    match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating provenance dir {}", dir.display()))?,
        _ => {}
    }

    let record = Sidecar {
        code_rev: current_git_rev(),
        flapcheck_version: flapcheck::VERSION,
        generated_at: Utc::now(),
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        case_id: payload.case_id.as_deref(),
        params: &payload.params,
        outputs: vec![artifact.display().to_string()],
        output_bytes: fs::metadata(artifact).ok().map(|m| m.len()),
    };
    let body = serde_json::to_vec_pretty(&record)?;
    fs::write(&target, body).with_context(|| format!("writing {}", target.display()))?;
    tracing::debug!(path = %target.display(), "provenance written");
    Ok(target)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Build-time `GIT_COMMIT`, runtime `GIT_COMMIT`, `git rev-parse HEAD`, or "unknown".
pub fn current_git_rev() -> String {
    let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_string());
    option_env!("GIT_COMMIT")
        .and_then(non_empty)
        .or_else(|| std::env::var("GIT_COMMIT").ok().as_deref().and_then(non_empty))
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            if !out.status.success() {
                return None;
            }
            String::from_utf8(out.stdout).ok().as_deref().and_then(non_empty)
        })
        .unwrap_or_else(|| "unknown".to_string())
}
