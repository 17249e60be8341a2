//! Merging and reshaping of dated growth series.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use socialdash_client::{GrowthPoint, ViewsPoint};

use crate::PresenterError;

/// How merged values are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesMode {
    /// Per-date values as fetched.
    #[default]
    Daily,
    /// Running totals from the first merged date, per series.
    Cumulative,
}

impl FromStr for SeriesMode {
    type Err = PresenterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(SeriesMode::Daily),
            "cumulative" => Ok(SeriesMode::Cumulative),
            other => Err(PresenterError::UnknownOption {
                kind: "series mode",
                value: other.to_owned(),
            }),
        }
    }
}

/// One date of the organic-versus-paid views chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewsSeriesPoint {
    pub date: NaiveDate,
    pub organic_value: i64,
    pub spark_value: i64,
}

/// Merges the organic and paid growth series by date.
///
/// The output has one point per date present in either input, ascending.
/// A date missing on one side counts as zero there; a date repeated within
/// one input is summed.
#[must_use]
pub fn merge_growth(
    organic: &[GrowthPoint],
    paid: &[GrowthPoint],
    mode: SeriesMode,
) -> Vec<ViewsSeriesPoint> {
    merge_series(
        organic.iter().map(|p| (p.date, p.views_growth)),
        paid.iter().map(|p| (p.date, p.views_growth)),
        mode,
    )
}

/// [`merge_growth`] over plain `(date, value)` pairs.
pub fn merge_series<O, P>(organic: O, paid: P, mode: SeriesMode) -> Vec<ViewsSeriesPoint>
where
    O: IntoIterator<Item = (NaiveDate, i64)>,
    P: IntoIterator<Item = (NaiveDate, i64)>,
{
    let mut by_date: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for (date, value) in organic {
        let sums = by_date.entry(date).or_default();
        sums.0 = sums.0.saturating_add(value);
    }
    for (date, value) in paid {
        let sums = by_date.entry(date).or_default();
        sums.1 = sums.1.saturating_add(value);
    }

    let mut organic_sum = 0_i64;
    let mut spark_sum = 0_i64;
    by_date
        .into_iter()
        .map(|(date, (organic_value, spark_value))| match mode {
            SeriesMode::Daily => ViewsSeriesPoint {
                date,
                organic_value,
                spark_value,
            },
            SeriesMode::Cumulative => {
                organic_sum = organic_sum.saturating_add(organic_value);
                spark_sum = spark_sum.saturating_add(spark_value);
                ViewsSeriesPoint {
                    date,
                    organic_value: organic_sum,
                    spark_value: spark_sum,
                }
            }
        })
        .collect()
}

/// Converts cumulative views into per-day increments. The first point is
/// kept as-is.
#[must_use]
pub fn daily_from_cumulative(points: &[ViewsPoint]) -> Vec<(NaiveDate, i64)> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.date);

    let mut previous: Option<u64> = None;
    sorted
        .into_iter()
        .map(|p| {
            let current = i64::try_from(p.views).unwrap_or(i64::MAX);
            let value = match previous {
                None => current,
                Some(prev) => current.saturating_sub(i64::try_from(prev).unwrap_or(i64::MAX)),
            };
            previous = Some(p.views);
            (p.date, value)
        })
        .collect()
}
