use std::{fs, path::PathBuf};

use tempfile::tempdir;

use nodeweave::NodeweaveError;
use nodeweave_cli::{Args, run};

/// Samples are at workspace root, relative to workspace not the crate
fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
}

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: Option<String>, output: String) -> Args {
    Args {
        input,
        output,
        log_level: "off".to_string(),
        ..Args::default()
    }
}

#[test]
fn e2e_smoke_test_valid_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_samples = collect_toml_files(samples_dir());

    assert!(!valid_samples.is_empty(), "No valid samples found in samples/");

    let mut failed_samples = Vec::new();

    for sample_path in &valid_samples {
        let output_filename = format!(
            "{}.svg",
            sample_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = args_for(
            Some(sample_path.to_string_lossy().to_string()),
            output_path.to_string_lossy().to_string(),
        );

        match run(&args) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).unwrap();
                assert!(svg.contains("</svg>"), "{}", sample_path.display());
            }
            Err(e) => failed_samples.push((sample_path.clone(), e)),
        }
    }

    if !failed_samples.is_empty() {
        eprintln!("\nValid samples that failed:");
        for (path, err) in &failed_samples {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid sample(s) failed unexpectedly", failed_samples.len());
    }
}

#[test]
fn e2e_smoke_test_error_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_samples = collect_toml_files(samples_dir().join("errors"));

    assert!(
        !error_samples.is_empty(),
        "No error samples found in samples/errors/"
    );

    let mut unexpected = Vec::new();

    for sample_path in &error_samples {
        let output_filename = format!(
            "error_{}.svg",
            sample_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = args_for(
            Some(sample_path.to_string_lossy().to_string()),
            output_path.to_string_lossy().to_string(),
        );

        // Every error sample is a malformed graph file, so it must be
        // rejected by the parser, not by a later stage.
        match run(&args) {
            Err(NodeweaveError::Parse { .. }) => {}
            Ok(()) => unexpected.push((sample_path.clone(), "succeeded".to_string())),
            Err(err) => unexpected.push((sample_path.clone(), err.to_string())),
        }
    }

    if !unexpected.is_empty() {
        eprintln!("\nError samples that did not fail to parse:");
        for (path, outcome) in &unexpected {
            eprintln!("  - {}: {}", path.display(), outcome);
        }
        panic!(
            "{} error sample(s) did not fail to parse",
            unexpected.len()
        );
    }
}

#[test]
fn e2e_sample_graph_without_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("sample.svg");

    let args = args_for(None, output_path.to_string_lossy().to_string());
    run(&args).expect("sample graph should render");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert_eq!(svg.matches("<image").count(), 20);
    assert_eq!(svg.matches("<line").count(), 19);
}

#[test]
fn e2e_generations_differ_and_repeat() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let render = |generation: u64, name: &str| {
        let output_path = temp_dir.path().join(name);
        let args = Args {
            generation,
            ..args_for(None, output_path.to_string_lossy().to_string())
        };
        run(&args).unwrap();
        fs::read_to_string(output_path).unwrap()
    };

    let first = render(0, "a.svg");
    let again = render(0, "b.svg");
    let next = render(1, "c.svg");

    assert_eq!(first, again);
    assert_ne!(first, next);
}

#[test]
fn e2e_pan_offset_translates_content() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("panned.svg");
    let args = Args {
        pan_x: 30.0,
        pan_y: -12.0,
        ..args_for(None, output_path.to_string_lossy().to_string())
    };

    run(&args).expect("panned sample graph should render");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("translate(30, -12)"));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(
        Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string()),
        temp_dir.path().join("out.svg").to_string_lossy().to_string(),
    );

    assert!(run(&args).is_err());
}

#[test]
fn e2e_invalid_config_override_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = Args {
        width: Some(-10.0),
        ..args_for(None, temp_dir.path().join("out.svg").to_string_lossy().to_string())
    };

    assert!(run(&args).is_err());
}
