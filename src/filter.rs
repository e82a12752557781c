use crate::schema::{default_datasets, DatasetSpec};
use anyhow::{bail, Result};

/// Resolves which datasets to load based on include/exclude tag filters.
/// Configuration order is kept regardless of filter order.
pub fn resolve_datasets(
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
) -> Result<Vec<DatasetSpec>> {
    let all = default_datasets();

    let (tags, keep) = match (include, exclude) {
        (Some(_), Some(_)) => {
            bail!("Cannot use both --include and --exclude at the same time");
        }
        (Some(include_list), None) => (include_list, true),
        (None, Some(exclude_list)) => (exclude_list, false),
        (None, None) => return Ok(all),
    };

    for tag in &tags {
        if !all.iter().any(|spec| spec.tag.eq_ignore_ascii_case(tag)) {
            bail!("Unknown dataset: {}", tag);
        }
    }

    let selected: Vec<DatasetSpec> = all
        .into_iter()
        .filter(|spec| tags.iter().any(|t| spec.tag.eq_ignore_ascii_case(t)) == keep)
        .collect();

    if selected.is_empty() {
        bail!("No datasets left to load");
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(specs: &[DatasetSpec]) -> Vec<&str> {
        specs.iter().map(|s| s.tag.as_str()).collect()
    }

    #[test]
    fn test_no_filter_keeps_all() {
        let specs = resolve_datasets(None, None).unwrap();
        assert_eq!(tags(&specs), vec!["S1", "S2", "S3", "S4"]);
    }

    #[test]
    fn test_include_keeps_config_order() {
        let specs = resolve_datasets(Some(vec!["S3".into(), "s1".into()]), None).unwrap();
        assert_eq!(tags(&specs), vec!["S1", "S3"]);
    }

    #[test]
    fn test_exclude() {
        let specs = resolve_datasets(None, Some(vec!["S2".into()])).unwrap();
        assert_eq!(tags(&specs), vec!["S1", "S3", "S4"]);
    }

    #[test]
    fn test_rejects_unknown_and_conflicting_filters() {
        assert!(resolve_datasets(Some(vec!["S9".into()]), None).is_err());
        assert!(resolve_datasets(Some(vec!["S1".into()]), Some(vec!["S2".into()])).is_err());
    }

    #[test]
    fn test_exclude_everything_fails() {
        let all = vec!["S1".into(), "S2".into(), "S3".into(), "S4".into()];
        assert!(resolve_datasets(None, Some(all)).is_err());
    }
}
