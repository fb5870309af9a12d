//! Duplicate cluster building over a snapshot of records.
//!
//! Greedy single-linkage: records are visited in input order, each unvisited
//! record becomes the main of a candidate cluster and claims every later
//! unvisited record scoring at or above the threshold against it. The result
//! depends on input order and is not a transitive closure.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::record::NameRecord;
use crate::similarity::similarity;

/// Default similarity threshold for surfacing clusters for review.
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.85;

/// A member of a cluster scored against the cluster's main record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct SimilarRecord<P = serde_json::Value> {
    pub record: NameRecord<P>,
    /// Similarity of this record's key to the main record's key
    pub similarity: f64,
}

/// A group of records believed to name the same exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct Cluster<P = serde_json::Value> {
    /// Representative record (first in input order)
    pub main: NameRecord<P>,
    /// Near-duplicates, sorted by similarity descending
    pub similar: Vec<SimilarRecord<P>>,
    /// Records carrying exactly the same display name as `main`
    pub absorbed: Vec<NameRecord<P>>,
}

impl<P> Cluster<P> {
    /// Main record plus similar members. Absorbed records are not counted.
    pub fn total_count(&self) -> usize {
        1 + self.similar.len()
    }

    /// Every record in the cluster: main, absorbed, then similar members.
    pub fn records(&self) -> impl Iterator<Item = &NameRecord<P>> {
        std::iter::once(&self.main)
            .chain(self.absorbed.iter())
            .chain(self.similar.iter().map(|s| &s.record))
    }
}

/// Partition records into clusters of likely duplicate names.
///
/// Records with no neighbor at or above `threshold` produce no cluster.
/// A `threshold` of 1.0 restricts clustering to identical canonical keys.
pub fn build_clusters<P: Clone>(records: &[NameRecord<P>], threshold: f64) -> Vec<Cluster<P>> {
    if records.is_empty() {
        return vec![];
    }

    let keys = canonical_keys(records);
    let mut clusters: Vec<Cluster<P>> = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();

    for i in 0..records.len() {
        if visited.contains(&i) {
            continue;
        }
        visited.insert(i);

        let main = &records[i];
        let mut similar: Vec<SimilarRecord<P>> = Vec::new();
        let mut absorbed: Vec<NameRecord<P>> = Vec::new();

        for (j, other) in records.iter().enumerate() {
            if j == i || visited.contains(&j) {
                continue;
            }

            if other.name == main.name {
                absorbed.push(other.clone());
                visited.insert(j);
                continue;
            }

            let score = similarity(&keys[i], &keys[j]);
            if score >= threshold {
                tracing::trace!(
                    main = %main.name,
                    other = %other.name,
                    score,
                    "joined cluster"
                );
                similar.push(SimilarRecord {
                    record: other.clone(),
                    similarity: score,
                });
                visited.insert(j);
            }
        }

        if similar.is_empty() {
            continue;
        }

        // Stable: ties keep scan order
        similar.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        clusters.push(Cluster {
            main: main.clone(),
            similar,
            absorbed,
        });
    }

    // Stable: ties keep creation order
    clusters.sort_by(|a, b| b.total_count().cmp(&a.total_count()));

    tracing::debug!(
        records = records.len(),
        clusters = clusters.len(),
        threshold,
        "built duplicate clusters"
    );

    clusters
}

/// Canonical key for every record, computed once per run.
#[cfg(not(feature = "parallel"))]
fn canonical_keys<P>(records: &[NameRecord<P>]) -> Vec<String> {
    records.iter().map(|r| normalize(&r.name)).collect()
}

/// Canonical key for every record, computed once per run.
#[cfg(feature = "parallel")]
fn canonical_keys<P>(records: &[NameRecord<P>]) -> Vec<String> {
    use rayon::prelude::*;

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    names.par_iter().map(|name| normalize(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<NameRecord<()>> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| NameRecord::new(format!("r{}", i), *name))
            .collect()
    }

    fn names<P>(cluster: &Cluster<P>) -> Vec<&str> {
        cluster.similar.iter().map(|s| s.record.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let clusters = build_clusters::<()>(&[], DEFAULT_CLUSTER_THRESHOLD);
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_bench_press_example() {
        let input = records(&["Bench Press", "bench press!", "Squat"]);
        let clusters = build_clusters(&input, 0.85);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].main.name, "Bench Press");
        assert_eq!(names(&clusters[0]), vec!["bench press!"]);
        assert_eq!(clusters[0].similar[0].similarity, 1.0);
        assert_eq!(clusters[0].total_count(), 2);
    }

    #[test]
    fn test_singletons_produce_no_cluster() {
        let input = records(&["Squat", "Deadlift", "Bench Press"]);
        assert!(build_clusters(&input, 0.85).is_empty());
    }

    #[test]
    fn test_similar_sorted_descending() {
        // "squatt" 5/6, "squats" 5/6, "squat" 1.0 against main "Squat!"
        let input = records(&["Squat!", "Squatt", "Squats", "squat"]);
        let clusters = build_clusters(&input, 0.8);

        assert_eq!(clusters.len(), 1);
        assert_eq!(names(&clusters[0]), vec!["squat", "Squatt", "Squats"]);
    }

    #[test]
    fn test_clusters_sorted_by_size_stable() {
        let input = records(&[
            "Row", "Rows", // cluster of 2, created first
            "Curl", "Curls", "curl.", // cluster of 3
            "Dip", "Dips", // cluster of 2, created last
        ]);
        let clusters = build_clusters(&input, 0.75);

        let mains: Vec<&str> = clusters.iter().map(|c| c.main.name.as_str()).collect();
        assert_eq!(mains, vec!["Curl", "Row", "Dip"]);
        assert_eq!(clusters[0].total_count(), 3);
    }

    #[test]
    fn test_greedy_order_dependence() {
        // "abcdf" is within 0.8 of both others; they are 0.6 apart.
        let clusters = build_clusters(&records(&["abcde", "abcdf", "abcgf"]), 0.8);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].main.name, "abcde");
        assert_eq!(names(&clusters[0]), vec!["abcdf"]);

        let clusters = build_clusters(&records(&["abcdf", "abcde", "abcgf"]), 0.8);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].total_count(), 3);
    }

    #[test]
    fn test_threshold_one_is_exact_keys_only() {
        let input = records(&["Lat Pulldown", "lat pulldown", "Lat Pulldowns"]);
        let clusters = build_clusters(&input, 1.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(names(&clusters[0]), vec!["lat pulldown"]);
    }

    #[test]
    fn test_identical_names_are_absorbed() {
        let input = records(&["Squat", "Squat", "Squats", "Squat"]);
        let clusters = build_clusters(&input, 0.8);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].absorbed.len(), 2);
        assert_eq!(names(&clusters[0]), vec!["Squats"]);
        assert_eq!(clusters[0].total_count(), 2);
        assert_eq!(clusters[0].records().count(), 4);
    }

    #[test]
    fn test_only_identical_names_produce_no_cluster() {
        let input = records(&["Squat", "Squat", "Deadlift"]);
        assert!(build_clusters(&input, 0.85).is_empty());
    }

    #[test]
    fn test_partition() {
        let input = records(&[
            "Bench Press", "Bench press", "Bench Pres", "Squat", "Squats", "Squat",
            "Deadlift", "Dead lift", "Row",
        ]);
        let clusters = build_clusters(&input, 0.85);

        let mut seen = HashSet::new();
        for cluster in &clusters {
            for record in cluster.records() {
                assert!(seen.insert(record.id.clone()), "{} in two clusters", record.id);
            }
        }
    }
}
