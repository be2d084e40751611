mod catalog;
mod provenance;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flapcheck::api::{
    apply_corrections, format_sources_with_excerpt, generate_correction_suggestions,
    get_relevant_sources_for_case, validate_flap_drawing, CaseQuery, CorrectionSuggestion,
    FaceLandmarks, FlapSuggestion, ImageDims, Point, PositionMode, PrecomputedLandmarks,
    RelevanceCfg, ScoredMedicalSource, ValidationCfg, ValidationResult, VisionSummary,
};
use provenance::{write_sidecar, Payload};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "flapcheck")]
#[command(about = "Validate flap drawings and rank medical sources for a case")]
struct Cmd {
    /// Optional case identifier; propagated to provenance and logs
    #[arg(long)]
    case_id: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Validate a flap suggestion against landmarks; writes a JSON report
    Validate {
        #[arg(long)]
        input: PathBuf,
        /// ValidationCfg overrides as JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Measure flap position geometrically instead of the presence heuristics
        #[arg(long)]
        geometric: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Rank catalog sources for a case
    RankSources {
        /// Source catalog (.csv or .parquet)
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        region: String,
        #[arg(long = "keyword")]
        keywords: Vec<String>,
        #[arg(long = "structure")]
        structures: Vec<String>,
        #[arg(long)]
        description: Option<String>,
        /// RelevanceCfg overrides as JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also write the prompt reference block here
        #[arg(long)]
        prompt_out: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Validate {
            input,
            config,
            geometric,
            out,
        } => validate(&input, config.as_deref(), geometric, &out, cmd.case_id),
        Action::RankSources {
            catalog,
            region,
            keywords,
            structures,
            description,
            config,
            prompt_out,
            out,
        } => {
            let query = CaseQuery {
                region,
                keywords,
                critical_structures: structures,
                description,
            };
            rank_sources(
                &catalog,
                query,
                config.as_deref(),
                prompt_out.as_deref(),
                &out,
                cmd.case_id,
            )
        }
        Action::Report => report(cmd.case_id),
    }
}

/// `validate --input` document.
#[derive(Debug, Deserialize)]
struct CaseInput {
    /// Landmarks from an upstream detector.
    #[serde(default)]
    landmarks: Option<FaceLandmarks>,
    /// Raw face-mesh keypoints in pixels; used when `landmarks` is absent.
    #[serde(default)]
    mesh: Option<Vec<Point>>,
    #[serde(default)]
    image: ImageDims,
    suggestion: FlapSuggestion,
    #[serde(default)]
    vision: VisionSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateReport {
    validation: ValidationResult,
    corrections: Vec<CorrectionSuggestion>,
    corrected_suggestion: FlapSuggestion,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn validate(
    input: &Path,
    config: Option<&Path>,
    geometric: bool,
    out: &Path,
    case_id: Option<String>,
) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), case_id = ?case_id, "validate");
    let case: CaseInput = read_json(input)?;
    let mut cfg: ValidationCfg = match config {
        Some(p) => read_json(p)?,
        None => ValidationCfg::default(),
    };
    if geometric {
        cfg.position.mode = PositionMode::Geometric;
    }

    let landmarks = case.landmarks.or_else(|| {
        case.mesh
            .as_deref()
            .and_then(|kp| FaceLandmarks::from_mesh(kp, case.image))
    });
    let detector = PrecomputedLandmarks(landmarks);
    let validation =
        validate_flap_drawing(&detector, &(), case.image, &case.suggestion, &case.vision, &cfg);
    let corrections = generate_correction_suggestions(&validation);
    let corrected_suggestion = apply_corrections(&case.suggestion, &corrections);
    tracing::info!(
        consistency = validation.anatomical_consistency.score,
        confidence = validation.ai_confidence.score,
        issues = validation.detected_issues.len(),
        corrections = corrections.len(),
        "validated"
    );

    let report = ValidateReport {
        validation,
        corrections,
        corrected_suggestion,
    };
    write_json(out, &report)?;
    write_sidecar(
        out,
        Payload::new(
            serde_json::json!({
                "command": "validate",
                "input": input.to_string_lossy(),
                "config": cfg,
            }),
            case_id,
        ),
    )?;
    Ok(())
}

fn rank_sources(
    catalog_path: &Path,
    query: CaseQuery,
    config: Option<&Path>,
    prompt_out: Option<&Path>,
    out: &Path,
    case_id: Option<String>,
) -> Result<()> {
    tracing::info!(catalog = %catalog_path.display(), region = %query.region, case_id = ?case_id, "rank-sources");
    let cfg: RelevanceCfg = match config {
        Some(p) => read_json(p)?,
        None => RelevanceCfg::default(),
    };
    let repo = catalog::load_catalog(catalog_path)?;
    let ranked: Vec<ScoredMedicalSource> = get_relevant_sources_for_case(&repo, &query, &cfg);
    tracing::info!(kept = ranked.len(), "ranked");
    write_json(out, &ranked)?;

    let mut outputs = vec![out.to_string_lossy().into_owned()];
    if let Some(p) = prompt_out {
        let block = format_sources_with_excerpt(&ranked, cfg.excerpt_chars);
        fs::write(p, block).with_context(|| format!("writing {}", p.display()))?;
        outputs.push(p.to_string_lossy().into_owned());
    }

    write_sidecar(
        out,
        Payload::new(
            serde_json::json!({
                "command": "rank-sources",
                "catalog": catalog_path.to_string_lossy(),
                "query": query,
                "config": cfg,
                "outputs": outputs,
            }),
            case_id,
        ),
    )?;
    Ok(())
}

fn report(case_id: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "flapcheck_version": flapcheck::VERSION,
        "case_id": case_id,
        "defaults": {
            "validation": ValidationCfg::default(),
            "relevance": RelevanceCfg::default(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
