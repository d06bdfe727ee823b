//! Integration test: evaluation pipeline end-to-end

use baseline_harness::prelude::*;
use std::io::Write;
use std::process::Command;

fn labeled(n: usize, label_of: impl Fn(usize) -> &'static str) -> LabeledDataset {
    let records = (0..n)
        .map(|i| {
            let mut features = Features::new();
            features.insert("f1".to_string(), i as f64);
            features.insert("f2".to_string(), (i as f64 * 0.3).sin());
            LabeledRecord::new(features, label_of(i))
        })
        .collect();
    LabeledDataset::new(vec!["f1".to_string(), "f2".to_string()], "label", records)
}

fn write_dataset(dir: &std::path::Path, contents: &str) -> std::path::PathBuf {
    let data_dir = dir.join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    let path = data_dir.join("train.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", contents).unwrap();
    path
}

#[test]
fn test_three_row_scenario_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path(), "a,b,label\n1,2,X\n3,4,X\n5,6,Y\n");

    let config = EvaluationConfig::new(&path, "label").with_cv_folds(3);
    let engine = EvaluationEngine::new(config);
    let report = engine.run().unwrap();

    assert!((report.training_accuracy - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(report.n_samples, 3);

    let data = engine.load().unwrap();
    let model = MajorityLabelBuilder::new().fit(data.records()).unwrap();
    assert_eq!(model.predicted_label(), "X");
    let preds: Vec<&str> = predict(&model, data.unlabeled().records()).collect::<Vec<_>>();
    assert_eq!(preds, vec!["X", "X", "X"]);
}

#[test]
fn test_accuracy_bounds() {
    let all_same = labeled(25, |_| "A");
    let report = EvaluationEngine::new(EvaluationConfig::default())
        .evaluate(&all_same)
        .unwrap();
    assert_eq!(report.training_accuracy, 1.0);
    assert_eq!(report.cross_validation_accuracy, 1.0);

    // Each fold is a single-label block that the remaining folds outvote
    let blocks = labeled(25, |i| match i / 5 {
        0 => "A",
        1 => "A",
        2 => "B",
        3 => "B",
        _ => "C",
    });
    let report = EvaluationEngine::new(EvaluationConfig::default())
        .evaluate(&blocks)
        .unwrap();
    assert!((0.0..=1.0).contains(&report.training_accuracy));
    assert!((0.0..=1.0).contains(&report.cross_validation_accuracy));
}

#[test]
fn test_held_out_rows_never_trained_on() {
    let data = labeled(25, |i| if i % 2 == 0 { "even" } else { "odd" });
    let outcome = CrossValidator::new(5)
        .cross_validate(&MajorityLabelBuilder, &data)
        .unwrap();

    assert_eq!(outcome.predictions.len(), 25);
    let splits = CrossValidator::new(5).split(25).unwrap();
    for (split, fold) in splits.iter().zip(&outcome.folds) {
        assert_eq!(fold.n_test, 5);
        for idx in &split.test_indices {
            assert!(!split.train_indices.contains(idx));
        }
    }
}

#[test]
fn test_remainder_policies_change_coverage() {
    let data = labeled(23, |i| if i < 15 { "A" } else { "B" });

    let dropped = EvaluationEngine::new(EvaluationConfig::default())
        .evaluate(&data)
        .unwrap();
    assert_eq!(dropped.n_held_out, 20);

    let distributed = EvaluationEngine::new(
        EvaluationConfig::default().with_remainder(RemainderPolicy::Distribute),
    )
    .evaluate(&data)
    .unwrap();
    assert_eq!(distributed.n_held_out, 23);
}

#[test]
fn test_shuffled_runs_are_reproducible_with_seed() {
    let data = labeled(40, |i| if i % 3 == 0 { "A" } else { "B" });
    let config = EvaluationConfig::default()
        .with_shuffle(true)
        .with_random_state(42);

    let a = EvaluationEngine::new(config.clone()).evaluate(&data).unwrap();
    let b = EvaluationEngine::new(config).evaluate(&data).unwrap();
    assert_eq!(a.cross_validation_accuracy, b.cross_validation_accuracy);
    assert_eq!(a.folds, b.folds);
}

#[test]
fn test_mismatched_lengths_rejected() {
    let data = labeled(10, |_| "A");
    let nine: Vec<&str> = data.labels().take(9).collect();
    let err = AccuracyEvaluator::new().evaluate(data.labels(), nine).unwrap_err();
    assert!(matches!(err, HarnessError::LengthMismatch { expected: 10, actual: 9 }));
}

#[test]
fn test_report_serializes_to_json() {
    let data = labeled(10, |i| if i < 6 { "A" } else { "B" });
    let report = EvaluationEngine::new(EvaluationConfig::default())
        .evaluate(&data)
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["training_accuracy"].is_f64());
    assert_eq!(json["folds"].as_array().unwrap().len(), 5);
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn test_binary_reads_default_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut contents = String::from("a,b,label\n");
    for i in 0..10 {
        contents.push_str(&format!("{},{},{}\n", i, 10 - i, if i < 7 { "X" } else { "Y" }));
    }
    write_dataset(dir.path(), &contents);

    let output = Command::new(env!("CARGO_BIN_EXE_baseline"))
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Training Accuracy: 0.70", "Cross-Validation Accuracy: 0.70"]);
}

#[test]
fn test_binary_fails_on_missing_label_column() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), "a,b,class\n1,2,X\n3,4,Y\n5,6,X\n7,8,X\n9,10,Y\n");

    let output = Command::new(env!("CARGO_BIN_EXE_baseline"))
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Column not found: label"));
}
