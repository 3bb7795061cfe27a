use polars::prelude::{col, lit, AnyValue, DataFrame, IntoLazy, UniqueKeepStrategy};
use std::collections::{BTreeMap, HashSet};

pub enum Partition {
    Unpartitioned,
    Partitioned(BTreeMap<Vec<String>, DataFrame>),
}

/// Partition the [`DataFrame`] by unique combination of tag values across multiple tags.
///
/// Values in Tag columns MUST be non-null strings.
///
/// Returns all the sub-DataFrames for each unique combination of tag values as a [`BTreeMap`]
/// where the key is the list of tag values, in the order the tags were given.
///
/// If no tags are provided, returns [`Partition::Unpartitioned`]
pub fn partition_by_tags(data_frame: DataFrame, tags: &[&str]) -> anyhow::Result<Partition> {
    let mut unique_tags = HashSet::with_capacity(tags.len());
    for &tag in tags {
        if tag.is_empty() {
            return Err(anyhow::anyhow!("Empty tag name"));
        }
        if !unique_tags.insert(tag) {
            return Err(anyhow::anyhow!("Duplicate tag name found: {}", tag));
        }
    }
    if tags.is_empty() {
        return Ok(Partition::Unpartitioned);
    }

    // Get unique combinations of all tag values
    let tag_columns: Vec<String> = tags.iter().map(|&tag| tag.to_string()).collect();
    let selectors = data_frame
        .clone()
        .lazy()
        .select(tags.iter().map(|&tag| col(tag)).collect::<Vec<_>>())
        .unique(Some(tag_columns), UniqueKeepStrategy::Any)
        .collect()?;

    let mut partitioned = BTreeMap::new();

    for row_idx in 0..selectors.height() {
        let mut filter_expr = None;
        let mut key = Vec::with_capacity(tags.len());

        for &tag in tags {
            let tag_value = match selectors.column(tag)?.get(row_idx)? {
                AnyValue::String(s) => s.to_string(),
                AnyValue::StringOwned(s) => s.into_string(),
                v => {
                    anyhow::bail!("In Tag Column {tag}, found non String value: {v:?}");
                }
            };

            let tag_filter = col(tag).eq(lit(tag_value.clone()));
            filter_expr = match filter_expr {
                None => Some(tag_filter),
                Some(expr) => Some(expr.and(tag_filter)),
            };
            key.push(tag_value);
        }

        log::debug!(
            "Partition for {}",
            tags.iter()
                .zip(&key)
                .map(|(tag, value)| format!("{tag}={value}"))
                .collect::<Vec<_>>()
                .join(",")
        );

        if let Some(filter) = filter_expr {
            let filtered = data_frame
                .clone()
                .lazy()
                .select([col("*")])
                .filter(filter)
                .collect()?;

            partitioned.insert(key, filtered);
        }
    }

    Ok(Partition::Partitioned(partitioned))
}
