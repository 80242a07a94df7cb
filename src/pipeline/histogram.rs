//! Age distribution split by satisfaction

use serde::Serialize;

use super::filter::FilteredView;

/// Number of equal-width buckets used when the view spans more than one age.
pub const DEFAULT_AGE_BINS: usize = 20;

/// One histogram bucket. Buckets are `[left, right)` except the last, which
/// also includes `right`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBucket {
    pub left: f64,
    pub right: f64,
    pub satisfied: usize,
    pub dissatisfied: usize,
}

impl AgeBucket {
    pub fn total(&self) -> usize {
        self.satisfied + self.dissatisfied
    }
}

/// Satisfied and dissatisfied age histograms over a shared set of edges.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HistogramResult {
    pub buckets: Vec<AgeBucket>,
}

impl HistogramResult {
    pub fn satisfied_total(&self) -> usize {
        self.buckets.iter().map(|b| b.satisfied).sum()
    }

    pub fn dissatisfied_total(&self) -> usize {
        self.buckets.iter().map(|b| b.dissatisfied).sum()
    }

    /// Largest per-population count in any bucket.
    pub fn max_count(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| b.satisfied.max(b.dissatisfied))
            .max()
            .unwrap_or(0)
    }
}

/// Bin edges for the age range `[min_age, max_age]`.
///
/// A single age gets the edges `[min_age, min_age + 1]`; otherwise `bins + 1`
/// evenly spaced edges with the last one exactly `max_age`.
pub fn age_bin_edges(min_age: u32, max_age: u32, bins: usize) -> Vec<f64> {
    let start = f64::from(min_age);
    if min_age == max_age || bins == 0 {
        return vec![start, start + 1.0];
    }

    let stop = f64::from(max_age);
    let step = (stop - start) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| start + step * i as f64).collect();
    edges.push(stop);
    edges
}

/// Bucket index of `value`, or `None` if it lies outside the edges.
fn bucket_index(edges: &[f64], value: f64) -> Option<usize> {
    let first = *edges.first()?;
    let last = *edges.last()?;
    if value < first || value > last {
        return None;
    }
    let buckets = edges.len() - 1;
    if value == last {
        return Some(buckets - 1);
    }
    // Number of edges <= value; the bucket starts at the last of them
    let position = edges.partition_point(|&edge| edge <= value);
    Some((position - 1).min(buckets - 1))
}

/// Count satisfied and dissatisfied passengers per age bucket.
///
/// The age range is taken from the whole view so both populations share
/// the same edges. An empty view yields no buckets.
pub fn compute_age_histogram(view: &FilteredView<'_>, bins: usize) -> HistogramResult {
    let ages = view.records().iter().map(|r| r.age());
    let (Some(min_age), Some(max_age)) = (ages.clone().min(), ages.max()) else {
        return HistogramResult::default();
    };

    let edges = age_bin_edges(min_age, max_age, bins);
    let mut buckets: Vec<AgeBucket> = edges
        .windows(2)
        .map(|pair| AgeBucket {
            left: pair[0],
            right: pair[1],
            satisfied: 0,
            dissatisfied: 0,
        })
        .collect();

    for record in view.records() {
        if let Some(index) = bucket_index(&edges, f64::from(record.age())) {
            let bucket = &mut buckets[index];
            if record.satisfaction_flag() {
                bucket.satisfied += 1;
            } else {
                bucket.dissatisfied += 1;
            }
        }
    }

    HistogramResult { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_age_edges() {
        assert_eq!(age_bin_edges(20, 20, DEFAULT_AGE_BINS), vec![20.0, 21.0]);
    }

    #[test]
    fn test_edges_span_range_exactly() {
        let edges = age_bin_edges(7, 85, DEFAULT_AGE_BINS);
        assert_eq!(edges.len(), DEFAULT_AGE_BINS + 1);
        assert_eq!(edges[0], 7.0);
        assert_eq!(edges[DEFAULT_AGE_BINS], 85.0);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bucket_index_last_bucket_is_closed() {
        let edges = vec![0.0, 10.0, 20.0];
        assert_eq!(bucket_index(&edges, 0.0), Some(0));
        assert_eq!(bucket_index(&edges, 9.9), Some(0));
        assert_eq!(bucket_index(&edges, 10.0), Some(1));
        assert_eq!(bucket_index(&edges, 20.0), Some(1));
        assert_eq!(bucket_index(&edges, 20.5), None);
        assert_eq!(bucket_index(&edges, -1.0), None);
    }
}
