//! Drives the `linsgd` binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use linsgd::model::{SgdModel, TaskKind};

fn linsgd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linsgd"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn train_then_evaluate_text_classifier() {
    let dir = tempfile::tempdir().unwrap();
    let train = dir.path().join("train.csv");
    let test = dir.path().join("test.csv");
    let model = dir.path().join("model.json");
    fs::write(&train, "sentence,label\ngood,1\nbad,0\n").unwrap();
    fs::write(&test, "sentence,label\ngood,1\nbad,0\n").unwrap();

    let out = linsgd(&[
        "train",
        path_str(&train),
        path_str(&model),
        "--task",
        "classification",
        "--learning-rate",
        "0.1",
        "--epochs",
        "50",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let saved = SgdModel::load_json(&model).unwrap();
    assert_eq!(saved.task(), TaskKind::BinaryClassification);

    let out = linsgd(&["evaluate", path_str(&model), path_str(&test)]);
    assert!(out.status.success());
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("good, 1, "));
    assert!(lines[1].starts_with("bad, 0, "));
    assert_eq!(lines[2], "Accuracy: 1");
}

#[test]
fn train_then_evaluate_dense_regression() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.csv");
    let model = dir.path().join("model.json");
    fs::write(&data, "x,y\n0,0\n5,0.5\n10,1\n").unwrap();

    let out = linsgd(&[
        "train",
        path_str(&data),
        path_str(&model),
        "--learning-rate",
        "0.1",
        "--epochs",
        "2000",
        "--quiet",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let out = linsgd(&["evaluate", path_str(&model), path_str(&data)]);
    assert!(out.status.success());
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("0.5,"));

    let rmse: f64 = lines[3].strip_prefix("RMSE: ").unwrap().parse().unwrap();
    assert!(rmse < 1e-2, "rmse {rmse}");
}

#[test]
fn info_describes_model() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.csv");
    let model = dir.path().join("model.json");
    fs::write(&data, "sentence,label\nnice,1\n").unwrap();

    let out = linsgd(&[
        "train",
        path_str(&data),
        path_str(&model),
        "--task",
        "classification",
        "--table-bits",
        "12",
        "--ngrams",
        "2",
        "--epochs",
        "1",
    ]);
    assert!(out.status.success());

    let out = linsgd(&["info", path_str(&model)]);
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.contains("classification"));
    assert!(text.contains("hashed, table 2^12, ngram order 2"));
}

#[test]
fn bad_arguments_fail() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.csv");
    let model = dir.path().join("model.json");
    fs::write(&data, "x,y\n1,2\n").unwrap();

    let out = linsgd(&["train", path_str(&data), path_str(&model), "--learning-rate", "0"]);
    assert!(!out.status.success());
    assert!(!model.exists());

    let out = linsgd(&["train", path_str(&data), path_str(&model), "--table-bits", "40"]);
    assert!(!out.status.success());

    let out = linsgd(&["evaluate", path_str(&dir.path().join("missing.json")), path_str(&data)]);
    assert!(!out.status.success());
}
