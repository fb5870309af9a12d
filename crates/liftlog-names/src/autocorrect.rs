//! Auto-correction of known informal exercise spellings.
//!
//! Lookup is keyed on the trimmed, lower-cased input. Unlike [`crate::normalize()`]
//! the key keeps punctuation, so hyphenation and spacing variants are matched
//! literally and mapped to one display form.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Built-in variant table: (informal spelling, canonical display name).
pub const DEFAULT_CORRECTIONS: &[(&str, &str)] = &[
    // Bench press
    ("bench press", "Bench Press"),
    ("benchpress", "Bench Press"),
    ("bench-press", "Bench Press"),
    ("bench presses", "Bench Press"),
    ("flat bench press", "Bench Press"),
    // Deadlift
    ("deadlift", "Deadlift"),
    ("deadlifts", "Deadlift"),
    ("dead lift", "Deadlift"),
    ("dead lifts", "Deadlift"),
    ("dead-lift", "Deadlift"),
    // Chin-up
    ("chin up", "Chin-up"),
    ("chin ups", "Chin-up"),
    ("chinup", "Chin-up"),
    ("chinups", "Chin-up"),
    ("chin-up", "Chin-up"),
    ("chin-ups", "Chin-up"),
    // Pull-up
    ("pull up", "Pull-up"),
    ("pull ups", "Pull-up"),
    ("pullup", "Pull-up"),
    ("pullups", "Pull-up"),
    ("pull-up", "Pull-up"),
    ("pull-ups", "Pull-up"),
    // Push-up
    ("push up", "Push-up"),
    ("push ups", "Push-up"),
    ("pushup", "Push-up"),
    ("pushups", "Push-up"),
    ("push-up", "Push-up"),
    ("push-ups", "Push-up"),
    // Squat / lunge / dip
    ("squat", "Squat"),
    ("squats", "Squat"),
    ("lunge", "Lunge"),
    ("lunges", "Lunge"),
    ("dip", "Dip"),
    ("dips", "Dip"),
    // Curls
    ("bicep curl", "Bicep Curl"),
    ("bicep curls", "Bicep Curl"),
    ("biceps curl", "Bicep Curl"),
    ("biceps curls", "Bicep Curl"),
    ("hammer curls", "Hammer Curl"),
    ("hammer curl", "Hammer Curl"),
    // Presses
    ("ohp", "Overhead Press"),
    ("overhead press", "Overhead Press"),
    ("over head press", "Overhead Press"),
    ("overhead presses", "Overhead Press"),
    ("shoulder press", "Shoulder Press"),
    ("shoulder presses", "Shoulder Press"),
    ("leg press", "Leg Press"),
    ("leg presses", "Leg Press"),
    // Raises
    ("calf raise", "Calf Raise"),
    ("calf raises", "Calf Raise"),
    ("calve raise", "Calf Raise"),
    ("calve raises", "Calf Raise"),
    ("calf-raise", "Calf Raise"),
    ("lateral raise", "Lateral Raise"),
    ("lateral raises", "Lateral Raise"),
    ("lat raise", "Lateral Raise"),
    ("lat raises", "Lateral Raise"),
    // Pulldown
    ("lat pulldown", "Lat Pulldown"),
    ("lat pulldowns", "Lat Pulldown"),
    ("lat pull down", "Lat Pulldown"),
    ("lat pull-down", "Lat Pulldown"),
    ("lat pull downs", "Lat Pulldown"),
];

lazy_static! {
    pub(crate) static ref BUILTIN: AutoCorrector = AutoCorrector::builtin();
}

/// Correct a name using the built-in dictionary.
///
/// Returns the input unchanged when no entry matches.
pub fn autocorrect(name: &str) -> String {
    BUILTIN.correct(name)
}

/// Dictionary mapping informal spellings to canonical display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoCorrector {
    entries: HashMap<String, String>,
}

impl Default for AutoCorrector {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AutoCorrector {
    /// Create a corrector with no entries.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a corrector loaded with [`DEFAULT_CORRECTIONS`].
    pub fn builtin() -> Self {
        let mut corrector = Self::empty();
        for (variant, canonical) in DEFAULT_CORRECTIONS {
            corrector.add(variant, canonical);
        }
        corrector
    }

    /// Add or replace an entry. The variant is stored under its lookup key.
    pub fn add(&mut self, variant: &str, canonical: &str) {
        self.entries
            .insert(lookup_key(variant), canonical.trim().to_string());
    }

    /// Add every entry from an iterator of (variant, canonical) pairs.
    pub fn extend<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (variant, canonical) in entries {
            self.add(variant, canonical);
        }
    }

    /// Remove an entry.
    pub fn remove(&mut self, variant: &str) -> Option<String> {
        self.entries.remove(&lookup_key(variant))
    }

    /// Canonical form for a known variant.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(&lookup_key(name)).map(|s| s.as_str())
    }

    /// Canonical form for a known variant, or the input unchanged.
    pub fn correct(&self, name: &str) -> String {
        match self.lookup(name) {
            Some(canonical) => canonical.to_string(),
            None => name.to_string(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}
