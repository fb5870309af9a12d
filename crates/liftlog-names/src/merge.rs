//! Merge planning for confirmed or automatic duplicate consolidation.
//!
//! Plans only describe renames; the persistence layer applies them as one
//! transaction. Re-applying a plan is harmless since each rename sets a fixed
//! target name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::error::{NameError, Result};
use crate::record::{NameRecord, RecordId};

/// Default similarity a member must exceed to be merged automatically.
pub const DEFAULT_AUTO_MERGE_THRESHOLD: f64 = 0.9;

/// A single proposed rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct Rename<P = serde_json::Value> {
    pub record: NameRecord<P>,
    pub new_name: String,
}

impl<P> Rename<P> {
    /// Whether applying this rename changes the record's name.
    pub fn is_change(&self) -> bool {
        self.record.name != self.new_name
    }
}

/// Ordered list of renames for the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct MergePlan<P = serde_json::Value> {
    pub renames: Vec<Rename<P>>,
}

impl<P> Default for MergePlan<P> {
    fn default() -> Self {
        Self { renames: vec![] }
    }
}

impl<P> MergePlan<P> {
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rename<P>> {
        self.renames.iter()
    }

    /// Renames that actually alter a name.
    pub fn changes(&self) -> impl Iterator<Item = &Rename<P>> {
        self.renames.iter().filter(|r| r.is_change())
    }
}

impl<P> IntoIterator for MergePlan<P> {
    type Item = Rename<P>;
    type IntoIter = std::vec::IntoIter<Rename<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.renames.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a MergePlan<P> {
    type Item = &'a Rename<P>;
    type IntoIter = std::slice::Iter<'a, Rename<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.renames.iter()
    }
}

/// Plan renaming every selected record to `target_name`.
///
/// The target is trimmed of surrounding whitespace before it is used.
/// Only the selected records are included. Fails with `EmptySelection` when
/// nothing is selected or the target is blank.
pub fn plan_merge<P: Clone>(selected: &[NameRecord<P>], target_name: &str) -> Result<MergePlan<P>> {
    if selected.is_empty() {
        return Err(NameError::EmptySelection(
            "no records selected for merge".to_string(),
        ));
    }

    let target = target_name.trim();
    if target.is_empty() {
        return Err(NameError::EmptySelection(
            "merge target name is blank".to_string(),
        ));
    }

    let renames: Vec<Rename<P>> = selected
        .iter()
        .map(|record| Rename {
            record: record.clone(),
            new_name: target.to_string(),
        })
        .collect();

    tracing::debug!(records = renames.len(), target, "planned merge");
    Ok(MergePlan { renames })
}

/// Plan merges that need no confirmation.
///
/// For each cluster, similar members scoring strictly above `auto_threshold`
/// are renamed to the cluster's main name. The main record, absorbed records,
/// and members at or below the threshold are left untouched.
pub fn plan_auto_merge<P: Clone>(clusters: &[Cluster<P>], auto_threshold: f64) -> MergePlan<P> {
    let renames: Vec<Rename<P>> = clusters
        .iter()
        .flat_map(|cluster| {
            cluster
                .similar
                .iter()
                .filter(move |member| member.similarity > auto_threshold)
                .map(move |member| Rename {
                    record: member.record.clone(),
                    new_name: cluster.main.name.clone(),
                })
        })
        .collect();

    tracing::debug!(
        clusters = clusters.len(),
        renames = renames.len(),
        auto_threshold,
        "planned automatic merge"
    );
    MergePlan { renames }
}

/// Apply a plan to an in-memory snapshot, matching records by id.
///
/// Records not named in the plan are returned unchanged, in input order. When
/// a record appears in several renames the last one wins.
pub fn apply_plan<P: Clone>(records: &[NameRecord<P>], plan: &MergePlan<P>) -> Vec<NameRecord<P>> {
    let targets: HashMap<&RecordId, &str> = plan
        .iter()
        .map(|rename| (&rename.record.id, rename.new_name.as_str()))
        .collect();

    records
        .iter()
        .map(|record| match targets.get(&record.id) {
            Some(name) => record.renamed(*name),
            None => record.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::SimilarRecord;

    fn record(id: &str, name: &str) -> NameRecord<()> {
        NameRecord::new(id, name)
    }

    fn squat_cluster() -> Cluster<()> {
        Cluster {
            main: record("r0", "Squat"),
            similar: vec![
                SimilarRecord {
                    record: record("r1", "Squats"),
                    similarity: 0.92,
                },
                SimilarRecord {
                    record: record("r2", "Squatt"),
                    similarity: 0.85,
                },
            ],
            absorbed: vec![record("r3", "Squat")],
        }
    }

    #[test]
    fn test_plan_merge() {
        let selected = vec![record("a", "Benchpress"), record("b", "bench press")];
        let plan = plan_merge(&selected, "  Bench Press ").unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|r| r.new_name == "Bench Press"));
        assert_eq!(plan.renames[0].record.id, "a");
        assert_eq!(plan.renames[1].record.id, "b");
    }

    #[test]
    fn test_plan_merge_empty_selection() {
        let err = plan_merge::<()>(&[], "Squat").unwrap_err();
        assert!(matches!(err, NameError::EmptySelection(_)));
    }

    #[test]
    fn test_plan_merge_blank_target() {
        let selected = vec![record("a", "Squats")];
        let err = plan_merge(&selected, "   ").unwrap_err();
        assert!(matches!(err, NameError::EmptySelection(_)));
    }

    #[test]
    fn test_plan_changes_skip_noops() {
        let selected = vec![record("a", "Squat"), record("b", "Squats")];
        let plan = plan_merge(&selected, "Squat").unwrap();
        assert_eq!(plan.len(), 2);
        let changed: Vec<&str> = plan.changes().map(|r| r.record.id.as_str()).collect();
        assert_eq!(changed, vec!["b"]);
    }

    #[test]
    fn test_auto_merge_threshold() {
        let plan = plan_auto_merge(&[squat_cluster()], DEFAULT_AUTO_MERGE_THRESHOLD);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.renames[0].record.name, "Squats");
        assert_eq!(plan.renames[0].new_name, "Squat");
    }

    #[test]
    fn test_auto_merge_is_strictly_greater() {
        let plan = plan_auto_merge(&[squat_cluster()], 0.92);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_apply_plan() {
        let records = vec![
            record("r0", "Squat"),
            record("r1", "Squats"),
            record("r2", "Squatt"),
        ];
        let plan = plan_auto_merge(&[squat_cluster()], DEFAULT_AUTO_MERGE_THRESHOLD);
        let applied = apply_plan(&records, &plan);
        let names: Vec<&str> = applied.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Squat", "Squat", "Squatt"]);

        // Idempotent
        let again = apply_plan(&applied, &plan);
        assert_eq!(again, applied);
    }
}
