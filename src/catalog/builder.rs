//! Catalog selection: source, time range and tag filters plus interval thinning

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{Local, TimeZone};

use super::discovered::DiscoveredArchive;

/// Time format used when showing catalog entries
pub const CATALOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M.%S";

/// Format epoch seconds as local time for display
pub fn format_timestamp(time: f64) -> String {
    let secs = time.floor() as i64;
    match Local.timestamp_opt(secs, 0).earliest() {
        Some(dt) => dt.format(CATALOG_TIME_FORMAT).to_string(),
        None => secs.to_string(),
    }
}

/// A catalog entry as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub path: PathBuf,
    pub method_name: String,
    pub tags: BTreeSet<String>,
    pub size: u64,
    /// Name time stamp, or the file modification time
    pub time: f64,
    /// The archive is a folder rather than a file
    pub is_folder: bool,
}

impl CatalogItem {
    fn from_archive(archive: &DiscoveredArchive) -> Self {
        Self {
            path: archive.path.clone(),
            method_name: archive.method_name.clone(),
            tags: archive.tags().clone(),
            size: archive.file_size,
            time: archive.time_stamp(),
            is_folder: archive.method.is_folder(),
        }
    }

    /// Local time formatted for display
    pub fn time_string(&self) -> String {
        format_timestamp(self.time)
    }

    /// File name, with a trailing slash for folder archives
    pub fn display_name(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.is_folder {
            format!("{}/", name)
        } else {
            name
        }
    }

    /// Tags joined with commas
    pub fn tags_string(&self) -> String {
        self.tags.iter().cloned().collect::<Vec<_>>().join(",")
    }
}

/// Catalog selection criteria
///
/// Unset fields don't filter. Time bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub timestamp_min: Option<f64>,
    pub timestamp_max: Option<f64>,
    /// Minimum seconds between neighboring entries
    pub interval_min: Option<f64>,
    /// Maximum seconds between neighboring entries
    pub interval_max: Option<f64>,
    /// Every tag must be present on a selected archive
    pub tags: Option<BTreeSet<String>>,
}

impl CatalogFilter {
    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.timestamp_min.is_none()
            && self.timestamp_max.is_none()
            && self.interval_min.is_none()
            && self.interval_max.is_none()
            && self.tags.is_none()
    }

    fn accepts(&self, archive: &DiscoveredArchive) -> bool {
        let time = archive.time_stamp();
        if self.timestamp_min.is_some_and(|min| time < min) {
            return false;
        }
        if self.timestamp_max.is_some_and(|max| time > max) {
            return false;
        }
        match &self.tags {
            Some(tags) => tags.is_subset(archive.tags()),
            None => true,
        }
    }

    fn accepts_interval(&self, delta: f64) -> bool {
        self.interval_min.map_or(true, |min| delta >= min)
            && self.interval_max.map_or(true, |max| delta <= max)
    }
}

/// Select the catalog entries for `source_name`, newest first
///
/// With an interval bound set, each entry after the first is kept only when
/// its distance to the entry just before it in the sorted list (kept or not)
/// is within the bounds.
pub fn build_catalog_list(
    archives: &[DiscoveredArchive],
    source_name: &str,
    filter: &CatalogFilter,
) -> Vec<CatalogItem> {
    let mut items: Vec<CatalogItem> = archives
        .iter()
        .filter(|archive| archive.source_name() == source_name && filter.accepts(archive))
        .map(CatalogItem::from_archive)
        .collect();

    // Stable, so equal times keep scan order.
    items.sort_by(|a, b| b.time.total_cmp(&a.time));

    if filter.interval_min.is_none() && filter.interval_max.is_none() {
        return items;
    }

    let mut kept = Vec::with_capacity(items.len());
    let mut previous_time: Option<f64> = None;
    for item in items {
        let keep = match previous_time {
            None => true,
            Some(previous) => filter.accepts_interval(previous - item.time),
        };
        previous_time = Some(item.time);
        if keep {
            kept.push(item);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::name::{StampZone, TimestampMatcher, DEFAULT_TIMESTAMP_FORMAT};
    use crate::methods::{AssumedType, MethodRegistry};

    fn matcher() -> TimestampMatcher {
        TimestampMatcher::new(DEFAULT_TIMESTAMP_FORMAT)
            .unwrap()
            .with_zone(StampZone::Utc)
    }

    /// Synthetic archives under `/my/archives`; a trailing slash marks a folder
    fn fake_archives(names: &[&str]) -> Vec<DiscoveredArchive> {
        let registry = MethodRegistry::builtin();
        let matcher = matcher();
        names
            .iter()
            .map(|name| {
                let (name, assumed) = match name.strip_suffix('/') {
                    Some(folder) => (folder, AssumedType::Folder),
                    None => (*name, AssumedType::File),
                };
                DiscoveredArchive::from_parts(
                    format!("/my/archives/{}", name),
                    assumed,
                    0.0,
                    0,
                    &registry,
                    &matcher,
                )
                .expect("fixture name is claimed by a method")
            })
            .collect()
    }

    fn selected_names(names: &[&str], filter: &CatalogFilter) -> Vec<String> {
        build_catalog_list(&fake_archives(names), "test", filter)
            .iter()
            .map(|item| {
                item.path
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    fn tag_filter(tags: &str) -> CatalogFilter {
        CatalogFilter {
            tags: Some(tags.split(',').map(String::from).collect()),
            ..Default::default()
        }
    }

    const TAG_FIXTURE: &[&str] = &[
        "test_20200327-000000_a,word.zip",
        "test_20200328-000000_the,a.zip",
        "test_20200329-000000.zip",
        "test_20200329-000005_words,blah.zip",
        "test_20200329-000500_abc.zip",
        "test_20200329-010459_sword.zip",
        "test_20200329-020458.fluff,muggle,fluffy.zip",
        "test_20200329-030458_abc,def,ghi.zip",
        "test_20200331-230001_.zip",
        "test_20200401-000000_a,abc.zip",
    ];

    #[test]
    fn test_empty() {
        assert!(build_catalog_list(&[], "test", &CatalogFilter::default()).is_empty());
    }

    #[test]
    fn test_multiple_source_names() {
        let names = ["aaa_20191232-000000.tar.xz", "test_20191232-000000.tar.xz"];
        assert_eq!(
            selected_names(&names, &CatalogFilter::default()),
            vec!["test_20191232-000000.tar.xz"]
        );
    }

    #[test]
    fn test_source_name_prefix_does_not_match() {
        let names = ["testing_20200101-000000.zip", "test_20200101-000000.zip"];
        assert_eq!(
            selected_names(&names, &CatalogFilter::default()),
            vec!["test_20200101-000000.zip"]
        );
    }

    #[test]
    fn test_time_stamp_filtering() {
        let matcher = matcher();
        let names = [
            "test_20200227-000000/",
            "test_20200224-020202/",
            "test_20200311-090909/",
            "test_20200303-123456/",
        ];
        let filter = CatalogFilter {
            timestamp_min: matcher.parse("20200224-020203"),
            timestamp_max: matcher.parse("20200303-123456"),
            ..Default::default()
        };
        assert_eq!(
            selected_names(&names, &filter),
            vec!["test_20200303-123456", "test_20200227-000000"]
        );
    }

    #[test]
    fn test_time_bounds_inclusive() {
        let matcher = matcher();
        let names = ["test_20200101-000000.zip", "test_20200102-000000.zip"];
        let filter = CatalogFilter {
            timestamp_min: matcher.parse("20200101-000000"),
            timestamp_max: matcher.parse("20200102-000000"),
            ..Default::default()
        };
        assert_eq!(selected_names(&names, &filter).len(), 2);
    }

    #[test]
    fn test_interval_filtering() {
        let names = [
            "test_20200327-000000_zzz.zip",
            "test_20200328-000000.zip",
            "test_20200329-000000.zip",
            "test_20200329-000005.zip",
            "test_20200329-000500.zip",
            "test_20200329-010459.zip",
            "test_20200329-020458.zip",
            "test_20200329-030458.zip",
            "test_20200331-230001.zip",
            "test_20200401-000000.zip",
            "test_20200401-000001.zip",
        ];
        let filter = CatalogFilter {
            interval_min: Some(3600.0),
            ..Default::default()
        };
        assert_eq!(
            selected_names(&names, &filter),
            vec![
                "test_20200401-000001.zip",
                "test_20200329-030458.zip",
                "test_20200329-020458.zip",
                "test_20200328-000000.zip",
                "test_20200327-000000_zzz.zip",
            ]
        );
    }

    #[test]
    fn test_interval_max() {
        let names = [
            "test_20200101-000000.zip",
            "test_20200101-000100.zip",
            "test_20200101-010000.zip",
        ];
        let filter = CatalogFilter {
            interval_max: Some(120.0),
            ..Default::default()
        };
        // 01:00:00 is the newest; 00:01:00 is 59 minutes older; 00:00:00 is one
        // minute older than its neighbor.
        assert_eq!(
            selected_names(&names, &filter),
            vec!["test_20200101-010000.zip", "test_20200101-000000.zip"]
        );
    }

    #[test]
    fn test_tag_filtering_no_match() {
        assert!(selected_names(TAG_FIXTURE, &tag_filter("m")).is_empty());
    }

    #[test]
    fn test_tag_filtering_single() {
        assert_eq!(
            selected_names(TAG_FIXTURE, &tag_filter("a")),
            vec![
                "test_20200401-000000_a,abc.zip",
                "test_20200328-000000_the,a.zip",
                "test_20200327-000000_a,word.zip",
            ]
        );
    }

    #[test]
    fn test_tag_filtering_subset() {
        assert_eq!(
            selected_names(TAG_FIXTURE, &tag_filter("a,word")),
            vec!["test_20200327-000000_a,word.zip"]
        );
    }

    #[test]
    fn test_equal_times_keep_scan_order() {
        let names = ["test_first.zip", "test_second.zip"];
        assert_eq!(
            selected_names(&names, &CatalogFilter::default()),
            vec!["test_first.zip", "test_second.zip"]
        );
    }

    #[test]
    fn test_item_display() {
        let items = build_catalog_list(
            &fake_archives(&["test_20200101-000000_b_a/", "test_20200102-000000.zip"]),
            "test",
            &CatalogFilter::default(),
        );
        assert_eq!(items[0].display_name(), "test_20200102-000000.zip");
        assert_eq!(items[0].method_name, "zip");
        assert_eq!(items[1].display_name(), "test_20200101-000000_b_a/");
        assert_eq!(items[1].tags_string(), "a,b");
        assert_eq!(items[1].time_string().len(), "2020-01-01 00:00.00".len());
    }

    #[test]
    fn test_filter_is_empty() {
        assert!(CatalogFilter::default().is_empty());
        assert!(!tag_filter("a").is_empty());
    }
}
