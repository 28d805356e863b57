//! Argument groups shared by several commands, and their value parsers

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Args;

use crate::catalog::{CatalogFilter, CatalogSpec, StampZone};
use crate::config::{Settings, SizeUnit};
use crate::error::{ShelfError, ShelfResult};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Where the source and its catalog are
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Catalog folder holding the archives (default: derived from the source folder)
    #[arg(short = 'f', long)]
    pub archive_folder: Option<PathBuf>,

    /// Source name used in archive names (default: source folder name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Source folder (default: current folder)
    #[arg(short, long)]
    pub source_folder: Option<PathBuf>,
}

impl LocationArgs {
    pub fn resolve(&self, settings: &Settings) -> ShelfResult<CatalogSpec> {
        CatalogSpec::resolve(
            settings,
            self.source_folder.as_deref(),
            self.archive_folder.as_deref(),
            self.name.as_deref(),
        )
    }
}

/// Catalog selection options
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Minimum archive age, e.g. 2w or 1d+12H (units: y m w d H M S)
    #[arg(long, value_parser = parse_age)]
    pub age_min: Option<f64>,

    /// Maximum archive age, e.g. 2w or 1d+12H (units: y m w d H M S)
    #[arg(long, value_parser = parse_age)]
    pub age_max: Option<f64>,

    /// Earliest archive date, e.g. 2024-01-31 or "2024-01-31 18:00"
    #[arg(long, value_parser = parse_date)]
    pub date_min: Option<NaiveDateTime>,

    /// Latest archive date, e.g. 2024-01-31 or "2024-01-31 18:00"
    #[arg(long, value_parser = parse_date)]
    pub date_max: Option<NaiveDateTime>,

    /// Minimum interval between neighboring archives, n[HMS]
    #[arg(long, value_parser = parse_interval)]
    pub interval_min: Option<f64>,

    /// Maximum interval between neighboring archives, n[HMS]
    #[arg(long, value_parser = parse_interval)]
    pub interval_max: Option<f64>,

    /// Comma-separated tags that must all be present
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

impl FilterArgs {
    /// Build the catalog filter relative to `now` (epoch seconds)
    ///
    /// The later of `--date-min` and `now - --age-max` is the lower bound; the
    /// earlier of `--date-max` and `now - --age-min` is the upper bound.
    pub fn to_filter(&self, now: f64) -> CatalogFilter {
        let date_min = self.date_min.map(|d| StampZone::Local.to_epoch(d));
        let date_max = self.date_max.map(|d| StampZone::Local.to_epoch(d));
        let age_max = self.age_max.map(|age| now - age);
        let age_min = self.age_min.map(|age| now - age);

        let tags: BTreeSet<String> = self
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        CatalogFilter {
            timestamp_min: [date_min, age_max].into_iter().flatten().reduce(f64::max),
            timestamp_max: [date_max, age_min].into_iter().flatten().reduce(f64::min),
            interval_min: self.interval_min,
            interval_max: self.interval_max,
            tags: (!tags.is_empty()).then_some(tags),
        }
    }
}

/// Size display unit flags
#[derive(Args, Debug, Clone, Default)]
pub struct SizeUnitArgs {
    /// Format sizes as binary 1024-based KiB, MiB, etc.
    #[arg(long)]
    pub size_unit_binary: bool,

    /// Format sizes as decimal 1000-based KB, MB, etc.
    #[arg(long)]
    pub size_unit_decimal: bool,
}

impl SizeUnitArgs {
    pub fn unit(&self, settings: &Settings) -> SizeUnit {
        SizeUnit::from_flags(self.size_unit_binary, self.size_unit_decimal, settings.size_unit)
    }
}

/// Current time as epoch seconds
pub fn now_timestamp() -> f64 {
    Local::now().timestamp() as f64
}

/// Parse an age such as `3d`, `2w+1d` or `1y+6m` into seconds
pub fn parse_age(text: &str) -> Result<f64, String> {
    let mut total = 0.0;
    for part in text.split('+') {
        let part = part.trim();
        let Some(unit) = part.chars().last() else {
            return Err(format!("empty term in age \"{}\"", text));
        };
        let scale = match unit {
            'y' => 365.0 * SECONDS_PER_DAY,
            'm' => 30.0 * SECONDS_PER_DAY,
            'w' => 7.0 * SECONDS_PER_DAY,
            'd' => SECONDS_PER_DAY,
            'H' => 3600.0,
            'M' => 60.0,
            'S' => 1.0,
            _ => {
                return Err(format!(
                    "bad age \"{}\" (expected <number><unit>, unit one of y m w d H M S)",
                    text
                ))
            }
        };
        let number: f64 = part[..part.len() - unit.len_utf8()]
            .parse()
            .map_err(|_| format!("bad number in age \"{}\"", text))?;
        total += number * scale;
    }
    Ok(total)
}

/// Parse an interval such as `90`, `30M` or `2H` into seconds
pub fn parse_interval(text: &str) -> Result<f64, String> {
    let text = text.trim();
    let (number, scale) = match text.chars().last() {
        Some('H') => (&text[..text.len() - 1], 3600.0),
        Some('M') => (&text[..text.len() - 1], 60.0),
        Some('S') => (&text[..text.len() - 1], 1.0),
        _ => (text, 1.0),
    };
    let value: f64 = number
        .parse()
        .map_err(|_| format!("bad interval \"{}\" (expected n[HMS])", text))?;
    if value < 0.0 {
        return Err(format!("interval \"{}\" is negative", text));
    }
    Ok(value * scale)
}

/// Parse a local date with optional time
pub fn parse_date(text: &str) -> Result<NaiveDateTime, String> {
    const DATE_TIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y%m%d-%H%M%S",
    ];

    let text = text.trim();
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            format!(
                "bad date \"{}\" (expected YYYY-MM-DD[ HH:MM[:SS]] or YYYYMMDD-HHMMSS)",
                text
            )
        })
}

/// Require at least one selection option before a destructive catalog command
pub fn require_filter(filter: &CatalogFilter) -> ShelfResult<()> {
    if filter.is_empty() {
        return Err(ShelfError::Config(
            "At least one age, date, interval or tag option is required".into(),
        ));
    }
    Ok(())
}
