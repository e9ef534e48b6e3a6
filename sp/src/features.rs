//! Feature list counting
//!
//! `feature_list.json` is a JSON array of feature records written by the
//! coding agent. A record passes when its `passes` field is truthy.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::FEATURE_LIST_FILE;
use crate::artifact::{ArtifactError, ArtifactRead};

/// A single entry of the feature list
///
/// Only `passes` is interpreted; every other field is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRecord {
    fields: Map<String, Value>,
}

impl FeatureRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Whether the `passes` field is truthy (a missing field is not)
    pub fn passes(&self) -> bool {
        self.fields.get("passes").is_some_and(is_truthy)
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.get("description").and_then(Value::as_str)
    }

    pub fn category(&self) -> Option<&str> {
        self.fields.get("category").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// JSON truthiness: false, null, zero, and empty strings/arrays/objects are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Passing and total feature counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureProgress {
    pub passing: usize,
    pub total: usize,
}

impl FeatureProgress {
    pub fn new(passing: usize, total: usize) -> Self {
        Self { passing, total }
    }

    pub fn from_records(records: &[FeatureRecord]) -> Self {
        Self {
            passing: records.iter().filter(|r| r.passes()).count(),
            total: records.len(),
        }
    }

    /// Count features in a project's feature list
    ///
    /// Missing, unreadable and malformed lists all count as `0/0`.
    pub fn load(project_dir: impl AsRef<Path>) -> Self {
        read_feature_list(project_dir)
            .found()
            .map(|records| Self::from_records(&records))
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.passing)
    }

    /// True when at least one feature is tracked and all of them pass
    pub fn all_passing(&self) -> bool {
        self.total > 0 && self.passing == self.total
    }

    /// Percentage of passing features, `None` when nothing is tracked
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.passing as f64 / self.total as f64 * 100.0)
        }
    }
}

/// Path of the feature list for a project
pub fn feature_list_path(project_dir: impl AsRef<Path>) -> PathBuf {
    project_dir.as_ref().join(FEATURE_LIST_FILE)
}

/// Read and parse the feature list
pub fn read_feature_list(project_dir: impl AsRef<Path>) -> ArtifactRead<Vec<FeatureRecord>> {
    let path = feature_list_path(project_dir);
    debug!(path = %path.display(), "read_feature_list: called");
    ArtifactRead::read_text(&path).parse(|content| parse_feature_list(&path, &content))
}

fn parse_feature_list(path: &Path, content: &str) -> Result<Vec<FeatureRecord>, ArtifactError> {
    let value: Value = serde_json::from_str(content).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(entries) = value else {
        return Err(ArtifactError::Shape {
            path: path.to_path_buf(),
            message: "expected a JSON array of feature records".to_string(),
        });
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(FeatureRecord::new(fields)),
            other => Err(ArtifactError::Shape {
                path: path.to_path_buf(),
                message: format!("entry {} is not an object: {}", index, other),
            }),
        })
        .collect()
}

/// Count passing and total features in `feature_list.json`
///
/// Returns `(passing, total)`. Never fails: any problem with the file yields
/// `(0, 0)`.
pub fn count_passing_tests(project_dir: impl AsRef<Path>) -> (usize, usize) {
    let project_dir = project_dir.as_ref();
    debug!(project_dir = %project_dir.display(), "count_passing_tests: called");
    let progress = FeatureProgress::load(project_dir);
    debug!(passing = progress.passing, total = progress.total, "count_passing_tests: counted");
    (progress.passing, progress.total)
}

/// First `limit` features that do not pass yet, in file order
pub fn pending_features(project_dir: impl AsRef<Path>, limit: usize) -> Vec<FeatureRecord> {
    read_feature_list(project_dir)
        .unwrap_or_default()
        .into_iter()
        .filter(|r| !r.passes())
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_features(temp: &TempDir, content: &str) {
        fs::write(temp.path().join(FEATURE_LIST_FILE), content).unwrap();
    }

    #[test]
    fn test_missing_file_is_zero() {
        let temp = TempDir::new().unwrap();
        assert_eq!(count_passing_tests(temp.path()), (0, 0));
    }

    #[test]
    fn test_counts_passing_and_total() {
        let temp = TempDir::new().unwrap();
        write_features(&temp, r#"[{"passes": true}, {"passes": false}, {}]"#);
        assert_eq!(count_passing_tests(temp.path()), (1, 3));
    }

    #[test]
    fn test_empty_array() {
        let temp = TempDir::new().unwrap();
        write_features(&temp, "[]");
        assert_eq!(count_passing_tests(temp.path()), (0, 0));
    }

    #[test]
    fn test_invalid_json_is_zero() {
        let temp = TempDir::new().unwrap();
        write_features(&temp, r#"[{"passes": true},"#);
        assert_eq!(count_passing_tests(temp.path()), (0, 0));
        assert!(matches!(
            read_feature_list(temp.path()),
            ArtifactRead::Malformed(ArtifactError::Json { .. })
        ));
    }

    #[test]
    fn test_top_level_object_is_zero() {
        let temp = TempDir::new().unwrap();
        write_features(&temp, r#"{"features": [{"passes": true}]}"#);
        assert_eq!(count_passing_tests(temp.path()), (0, 0));
        assert!(matches!(
            read_feature_list(temp.path()),
            ArtifactRead::Malformed(ArtifactError::Shape { .. })
        ));
    }

    #[test]
    fn test_non_object_entry_is_zero() {
        let temp = TempDir::new().unwrap();
        write_features(&temp, r#"[{"passes": true}, "oops"]"#);
        assert_eq!(count_passing_tests(temp.path()), (0, 0));
    }

    #[test]
    fn test_non_standard_numbers_are_malformed() {
        let temp = TempDir::new().unwrap();
        for content in [r#"[{"passes": 1e400}]"#, r#"[{"passes": NaN}]"#, r#"[{"passes": Infinity}]"#] {
            write_features(&temp, content);
            assert_eq!(count_passing_tests(temp.path()), (0, 0), "content: {}", content);
            assert!(matches!(
                read_feature_list(temp.path()),
                ArtifactRead::Malformed(ArtifactError::Json { .. })
            ));
        }
    }

    #[test]
    fn test_unreadable_file_is_zero() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(FEATURE_LIST_FILE)).unwrap();
        assert_eq!(count_passing_tests(temp.path()), (0, 0));
        assert!(matches!(read_feature_list(temp.path()), ArtifactRead::Unreadable(_)));
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(-0.5)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!({"a": 1})));

        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
    }

    #[test]
    fn test_record_accessors() {
        let temp = TempDir::new().unwrap();
        write_features(
            &temp,
            r#"[{"category": "functional", "description": "User can log in", "steps": ["a"], "passes": false}]"#,
        );

        let records = read_feature_list(temp.path()).found().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category(), Some("functional"));
        assert_eq!(records[0].description(), Some("User can log in"));
        assert_eq!(records[0].get("steps"), Some(&json!(["a"])));
        assert!(!records[0].passes());
    }

    #[test]
    fn test_progress_derived_values() {
        let progress = FeatureProgress::new(1, 3);
        assert_eq!(progress.remaining(), 2);
        assert!(!progress.all_passing());
        let pct = progress.percentage().unwrap();
        assert!((pct - 33.333).abs() < 0.01);

        assert!(FeatureProgress::new(4, 4).all_passing());
        assert!(!FeatureProgress::new(0, 0).all_passing());
        assert_eq!(FeatureProgress::new(0, 0).percentage(), None);
    }

    #[test]
    fn test_pending_features_in_order_with_limit() {
        let temp = TempDir::new().unwrap();
        write_features(
            &temp,
            r#"[
                {"description": "one", "passes": true},
                {"description": "two", "passes": false},
                {"description": "three"},
                {"description": "four", "passes": false}
            ]"#,
        );

        let pending = pending_features(temp.path(), 2);
        let names: Vec<_> = pending.iter().filter_map(|r| r.description()).collect();
        assert_eq!(names, vec!["two", "three"]);

        assert_eq!(pending_features(temp.path(), 10).len(), 3);
        assert!(pending_features(temp.path(), 0).is_empty());
    }

    #[test]
    fn test_pending_features_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(pending_features(temp.path(), 5).is_empty());
    }

    proptest! {
        #[test]
        fn prop_counts_match_generated_list(flags in proptest::collection::vec(proptest::option::of(any::<bool>()), 0..50)) {
            let temp = TempDir::new().unwrap();
            let entries: Vec<Value> = flags
                .iter()
                .map(|flag| match flag {
                    Some(passes) => json!({"passes": passes}),
                    None => json!({"description": "no passes field"}),
                })
                .collect();
            write_features(&temp, &serde_json::to_string(&entries).unwrap());

            let expected_passing = flags.iter().filter(|f| **f == Some(true)).count();
            prop_assert_eq!(count_passing_tests(temp.path()), (expected_passing, flags.len()));
        }
    }
}
