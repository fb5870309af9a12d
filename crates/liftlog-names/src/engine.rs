//! Configured entry point bundling thresholds and the autocorrect dictionary.
//!
//! The engine holds no state between calls beyond its configuration; every
//! operation works on the snapshot passed in.

use crate::autocorrect::AutoCorrector;
use crate::cluster::{build_clusters, Cluster};
use crate::config::DedupConfig;
use crate::error::{ConfigError, Result};
use crate::merge::{plan_auto_merge, plan_merge, MergePlan};
use crate::record::NameRecord;
use crate::validate::{validate_internal, ValidationOptions, ValidationResult};

/// Name matching engine with validated configuration.
#[derive(Debug, Clone)]
pub struct NameEngine {
    config: DedupConfig,
    corrector: AutoCorrector,
}

impl Default for NameEngine {
    fn default() -> Self {
        Self {
            config: DedupConfig::default(),
            corrector: AutoCorrector::builtin(),
        }
    }
}

impl NameEngine {
    /// Create an engine, validating the configuration and layering its
    /// corrections over the built-in dictionary.
    pub fn new(config: DedupConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let mut corrector = AutoCorrector::builtin();
        corrector.extend(
            config
                .corrections
                .iter()
                .map(|(variant, canonical)| (variant.as_str(), canonical.as_str())),
        );

        Ok(Self { config, corrector })
    }

    /// Replace the autocorrect dictionary.
    pub fn with_corrector(mut self, corrector: AutoCorrector) -> Self {
        self.corrector = corrector;
        self
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    pub fn corrector(&self) -> &AutoCorrector {
        &self.corrector
    }

    /// Correct a known informal spelling.
    pub fn autocorrect(&self, name: &str) -> String {
        self.corrector.correct(name)
    }

    /// Build review clusters at the configured cluster threshold.
    pub fn clusters<P: Clone>(&self, records: &[NameRecord<P>]) -> Vec<Cluster<P>> {
        build_clusters(records, self.config.cluster_threshold)
    }

    /// Validate a proposed name against existing records and external
    /// candidates, in that order.
    pub fn validate<P: Clone>(
        &self,
        input: &str,
        existing: &[NameRecord<P>],
        external: &[NameRecord<P>],
    ) -> ValidationResult<P> {
        validate_internal(
            input,
            existing.iter().chain(external.iter()),
            &self.validation_options(),
            &self.corrector,
        )
    }

    /// Plan a user-confirmed merge.
    pub fn plan_merge<P: Clone>(
        &self,
        selected: &[NameRecord<P>],
        target_name: &str,
    ) -> Result<MergePlan<P>> {
        plan_merge(selected, target_name)
    }

    /// Plan merges above the configured auto-merge threshold.
    pub fn plan_auto_merge<P: Clone>(&self, clusters: &[Cluster<P>]) -> MergePlan<P> {
        plan_auto_merge(clusters, self.config.auto_merge_threshold)
    }

    fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            warn_threshold: self.config.warn_threshold,
            max_suggestions: self.config.max_suggestions,
            min_name_length: self.config.min_name_length,
        }
    }
}
