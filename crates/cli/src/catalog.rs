//! Load a medical source catalog (CSV or Parquet) into an in-memory repository.
//!
//! Columns: `id`, `title` (required); `content`, `source_type`, `source_url`,
//! `keywords`, `region_focus`, `flap_types`, `is_active`, `created_at`,
//! `updated_at` (optional). List columns are native lists in Parquet or
//! `;`-separated strings in CSV. Rows without `id` or `title` are skipped.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use flapcheck::sources::{InMemorySourceRepository, MedicalSource, SourceType};
use flapcheck::RepositoryError;
use polars::prelude::*;
use std::path::Path;

const LIST_SEPARATOR: char = ';';

pub fn load_catalog(path: &Path) -> Result<InMemorySourceRepository> {
    let df = read_frame(path)?;
    let sources = sources_from_frame(&df)?;
    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        loaded = sources.len(),
        "catalog loaded"
    );
    Ok(InMemorySourceRepository::new(sources))
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let lf = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()
            .with_context(|| format!("reading csv {}", path.display()))?,
        "parquet" | "pq" => LazyFrame::scan_parquet(path, ScanArgsParquet::default())
            .with_context(|| format!("reading parquet {}", path.display()))?,
        other => bail!("unsupported catalog format {other:?} (expected csv or parquet)"),
    };
    Ok(lf.collect()?)
}

/// Nullable string cells of a column, or all-`None` when the column is absent.
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let Ok(col) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };
    let as_str = col.cast(&DataType::String)?;
    let ca = as_str.str()?;
    Ok((0..ca.len())
        .map(|i| {
            ca.get(i)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .collect())
}

/// List cells: native list columns, or `;`-separated text.
fn list_column(df: &DataFrame, name: &str) -> Result<Vec<Vec<String>>> {
    let Ok(col) = df.column(name) else {
        return Ok(vec![Vec::new(); df.height()]);
    };
    if matches!(col.dtype(), DataType::List(_)) {
        let ca = col.list()?;
        let mut out = Vec::with_capacity(ca.len());
        for i in 0..ca.len() {
            let items = match ca.get_as_series(i) {
                Some(inner) => {
                    let inner = inner.cast(&DataType::String)?;
                    inner
                        .str()?
                        .into_iter()
                        .flatten()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                }
                None => Vec::new(),
            };
            out.push(items);
        }
        return Ok(out);
    }
    Ok(text_column(df, name)?
        .into_iter()
        .map(|cell| cell.map(|s| split_list(&s)).unwrap_or_default())
        .collect())
}

fn split_list(s: &str) -> Vec<String> {
    s.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "t" => Some(true),
        "false" | "0" | "no" | "f" => Some(false),
        _ => None,
    }
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS[.f]` taken as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn sources_from_frame(df: &DataFrame) -> Result<Vec<MedicalSource>> {
    let ids = text_column(df, "id")?;
    let titles = text_column(df, "title")?;
    let contents = text_column(df, "content")?;
    let types = text_column(df, "source_type")?;
    let urls = text_column(df, "source_url")?;
    let actives = text_column(df, "is_active")?;
    let created = text_column(df, "created_at")?;
    let updated = text_column(df, "updated_at")?;
    let keywords = list_column(df, "keywords")?;
    let regions = list_column(df, "region_focus")?;
    let flaps = list_column(df, "flap_types")?;

    let mut out = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let id = ids[row].clone();
        let (Some(id), Some(title)) = (id.clone(), titles[row].clone()) else {
            let err = RepositoryError::Malformed {
                id: id.unwrap_or_else(|| format!("row {row}")),
                reason: "missing id or title".to_string(),
            };
            tracing::warn!(error = %err, "skipping catalog row");
            continue;
        };
        let source_type = types[row]
            .as_deref()
            .map(SourceType::parse)
            .unwrap_or_default();
        let mut src = MedicalSource::new(id, title, source_type);
        src.content = contents[row].clone().unwrap_or_default();
        src.source_url = urls[row].clone();
        src.keywords = keywords[row].clone();
        src.region_focus = regions[row].clone();
        src.flap_types = flaps[row].clone();
        src.is_active = actives[row].as_deref().and_then(parse_bool).unwrap_or(true);
        src.created_at = created[row].as_deref().and_then(parse_timestamp);
        src.updated_at = updated[row].as_deref().and_then(parse_timestamp);
        out.push(src);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flapcheck::sources::SourceRepository;
    use std::fs;
    use tempfile::tempdir;

    const CSV: &str = "\
id,title,content,source_type,keywords,region_focus,flap_types,is_active,created_at
s1,Nasal flaps,Bilobed flap for nasal tip defects,guideline,nasal;tip,burun,bilobed;nasolabial,true,2024-03-01T08:00:00Z
s2,Cheek repair,Rotation flaps of the cheek,book,cheek,yanak,rotation,true,2024-05-01 09:30:00
s3,Retired,old,article,,burun,,false,2024-06-01T00:00:00Z
,No id,content,text,,,,true,
";

    #[test]
    fn loads_csv_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sources.csv");
        fs::write(&path, CSV).unwrap();

        let repo = load_catalog(&path).unwrap();
        assert_eq!(repo.len(), 3);

        let active = repo.fetch_active_sources(50).unwrap();
        let ids: Vec<_> = active.iter().map(|s| s.id.as_str()).collect();
        // newest first, inactive dropped
        assert_eq!(ids, vec!["s2", "s1"]);

        let s1 = &active[1];
        assert_eq!(s1.source_type, SourceType::Guideline);
        assert_eq!(s1.keywords, vec!["nasal", "tip"]);
        assert_eq!(s1.flap_types, vec!["bilobed", "nasolabial"]);
        assert_eq!(s1.region_focus, vec!["burun"]);
        assert!(s1.created_at.is_some());
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_catalog(Path::new("sources.xlsx")).unwrap_err();
        assert!(err.to_string().contains("unsupported catalog format"));
    }

    #[test]
    fn parses_cells() {
        assert_eq!(split_list(" a ; ;b"), vec!["a", "b"]);
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert!(parse_timestamp("2024-01-02T03:04:05+02:00").is_some());
        assert!(parse_timestamp("2024-01-02 03:04:05.123").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
