//! Tolerance-based clustering of one-dimensional measurements.
//!
//! Two routines share the same greedy scheme: values are visited in a fixed
//! order and join the first existing cluster whose key (its first member) is
//! within tolerance, otherwise they open a new cluster.
//!
//! - [`find_regular_spacing`] clusters consecutive position deltas with an
//!   absolute pixel tolerance (grid detection).
//! - [`find_common_values`] clusters raw measurements with a tolerance
//!   proportional to their magnitude (cross-screen spacing patterns).

use std::collections::BTreeSet;

use crate::normalize::round_to;

/// Pixel tolerance used for grid detection.
pub const DEFAULT_GRID_TOLERANCE: f64 = 2.0;

/// Relative tolerance used for common spacing values.
pub const DEFAULT_COMMON_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone)]
struct Cluster {
    key: f64,
    members: Vec<f64>,
}

impl Cluster {
    fn new(value: f64) -> Self {
        Self {
            key: value,
            members: vec![value],
        }
    }

    fn mean(&self) -> f64 {
        self.members.iter().sum::<f64>() / self.members.len() as f64
    }
}

fn greedy_clusters(values: impl IntoIterator<Item = f64>, joins: impl Fn(f64, f64) -> bool) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for value in values {
        match clusters.iter_mut().find(|c| joins(c.key, value)) {
            Some(cluster) => cluster.members.push(value),
            None => clusters.push(Cluster::new(value)),
        }
    }
    clusters
}

/// The recurring step between sorted positions, if one appears at least twice.
///
/// Deltas no larger than `tolerance` are treated as the same position. Among
/// clusters of deltas the most populated one wins (first one on ties), and
/// its mean is reported.
pub fn find_regular_spacing(positions: &[f64], tolerance: f64) -> Option<f64> {
    if positions.len() < 3 {
        return None;
    }
    let mut sorted: Vec<f64> = positions.iter().copied().filter(|p| p.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let deltas: Vec<f64> = sorted
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|delta| *delta > tolerance)
        .collect();
    if deltas.len() < 2 {
        return None;
    }

    let clusters = greedy_clusters(deltas, |key, value| (value - key).abs() < tolerance);
    let mut best: Option<&Cluster> = None;
    for cluster in &clusters {
        if best.map_or(true, |b| cluster.members.len() > b.members.len()) {
            best = Some(cluster);
        }
    }

    best.filter(|c| c.members.len() >= 2)
        .map(|c| round_to(c.mean(), 2))
}

/// Number of distinct grid cells the positions fall into for a given step.
pub fn count_grid_cells(positions: &[f64], spacing: f64) -> usize {
    if spacing <= 0.0 {
        return 0;
    }
    positions
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| (p / spacing).round() as i64)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Means of the value groups that occur more than once, ascending.
///
/// Values are sorted first, so the result does not depend on input order.
/// A value joins a group when it is within `relative_tolerance` of the larger
/// magnitude of itself and the group's first member.
pub fn find_common_values(values: &[f64], relative_tolerance: f64) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    greedy_clusters(sorted, |key, value| {
        (key - value).abs() <= relative_tolerance * key.abs().max(value.abs())
    })
    .into_iter()
    .filter(|c| c.members.len() > 1)
    .map(|c| round_to(c.mean(), 2))
    .collect()
}
