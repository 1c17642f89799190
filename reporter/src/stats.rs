use crate::derive::DerivedRow;
use serde::Serialize;
use std::cmp::Ordering;

/// Columns of the correlation matrix, in display order.
pub const CORRELATION_COLUMNS: [&str; 5] = ["Views", "Likes", "Comments", "Duration_Minutes", "Engagement_Rate"];

const N: usize = CORRELATION_COLUMNS.len();

/// Pairwise Pearson coefficients of the numeric report columns.
///
/// A coefficient is `None` when it is undefined: fewer than two rows or a
/// column without variance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    values: [[Option<f64>; N]; N],
}

impl CorrelationMatrix {
    pub fn from_rows(rows: &[DerivedRow]) -> Self {
        let extractors: [fn(&DerivedRow) -> f64; N] = [
            DerivedRow::views,
            DerivedRow::likes,
            DerivedRow::comments,
            |row| row.duration_minutes,
            |row| row.engagement_rate,
        ];
        let columns = extractors.map(|extract| rows.iter().map(extract).collect::<Vec<_>>());

        let mut values = [[None; N]; N];
        for i in 0..N {
            values[i][i] = pearson(&columns[i], &columns[i]).map(|_| 1.0);
            for j in (i + 1)..N {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { values }
    }

    pub fn labels(&self) -> &'static [&'static str; N] {
        &CORRELATION_COLUMNS
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values[row][col]
    }
}

/// Pearson correlation coefficient of two equally long samples.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Rows in ascending publication order; rows published at the same instant keep their order.
pub fn by_date(rows: &[DerivedRow]) -> Vec<&DerivedRow> {
    let mut sorted = rows.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|row| row.record.published_at);
    sorted
}

/// The `n` most viewed rows, most viewed first. Ties keep dataset order.
pub fn top_by_views(rows: &[DerivedRow], n: usize) -> Vec<&DerivedRow> {
    let mut sorted = rows.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| b.record.view_count.cmp(&a.record.view_count));
    sorted.truncate(n);
    sorted
}

/// Smallest and largest value, ignoring NaN.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((
                match v.partial_cmp(&lo) {
                    Some(Ordering::Less) => v,
                    _ => lo,
                },
                match v.partial_cmp(&hi) {
                    Some(Ordering::Greater) => v,
                    _ => hi,
                },
            )),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use channel_insights_dataset::VideoRecord;
    use chrono::{
        TimeZone,
        Utc,
    };
    use pretty_assertions::assert_eq;

    fn row(title: &str, views: u64, likes: u64, comments: u64, duration: &str, day: u32) -> DerivedRow {
        DerivedRow::new(VideoRecord {
            title: title.to_string(),
            view_count: views,
            like_count: likes,
            comment_count: comments,
            published_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            duration: duration.to_string(),
        })
    }

    fn sample() -> Vec<DerivedRow> {
        vec![
            row("a", 100, 10, 5, "PT2M", 3),
            row("b", 0, 0, 0, "PT1M", 1),
            row("c", 50, 1, 1, "PT10M", 2),
            row("d", 900, 80, 20, "PT4M30S", 5),
            row("e", 400, 25, 9, "PT7M", 4),
        ]
    }

    #[test]
    fn pearson_matches_known_values() {
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), Some(1.0));
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), Some(-1.0));
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]).unwrap();
        assert!((r - 0.8).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_undefined_for_degenerate_input() {
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let matrix = CorrelationMatrix::from_rows(&sample());
        for i in 0..N {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..N {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                let r = matrix.get(i, j).unwrap();
                assert!((-1.0..=1.0).contains(&r));
            }
        }
    }

    #[test]
    fn constant_columns_have_no_coefficients() {
        let rows = vec![row("a", 10, 1, 0, "PT1M", 1), row("b", 20, 2, 0, "PT2M", 2)];
        let matrix = CorrelationMatrix::from_rows(&rows);
        let comments = 2;
        assert_eq!(matrix.get(comments, comments), None);
        assert_eq!(matrix.get(0, comments), None);
        assert_eq!(matrix.get(0, 1), Some(1.0));
    }

    #[test]
    fn sorts_by_publication_date() {
        let rows = sample();
        let sorted = by_date(&rows);
        let titles = sorted.iter().map(|r| r.record.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["b", "c", "a", "e", "d"]);
    }

    #[test]
    fn top_five_by_views() {
        let rows = sample();
        let views = top_by_views(&rows, 5).iter().map(|r| r.record.view_count).collect::<Vec<_>>();
        assert_eq!(views, vec![900, 400, 100, 50, 0]);
        assert_eq!(top_by_views(&rows, 2).len(), 2);
    }

    #[test]
    fn leaderboard_with_few_rows_keeps_all_of_them() {
        let rows = sample();
        assert_eq!(top_by_views(&rows[..3], 5).len(), 3);
        assert!(top_by_views(&[], 5).is_empty());
    }

    #[test]
    fn extent_ignores_nan() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(extent(Vec::new()), None);
    }
}
