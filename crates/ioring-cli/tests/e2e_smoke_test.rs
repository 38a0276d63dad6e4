use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use ioring::IoRingError;
use ioring_cli::{Args, Command};
use ioring_parser::ErrorCode;

/// Directory holding the demo intent graphs at the workspace root
fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn layout_args(input: &Path, output: &Path) -> Args {
    Args {
        command: Command::Layout {
            input: input.to_string_lossy().to_string(),
            output: output.to_string_lossy().to_string(),
        },
        config: None,
        log_level: "off".to_string(),
    }
}

fn validate_args(input: &Path) -> Args {
    Args {
        command: Command::Validate {
            input: input.to_string_lossy().to_string(),
        },
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_json_files(demos_dir());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_path = temp_dir
            .path()
            .join(demo_path.file_name().expect("demo files have names"));

        if let Err(e) = ioring_cli::run(&layout_args(demo_path, &output_path)) {
            failed_demos.push((demo_path.clone(), e));
            continue;
        }

        let written = fs::read_to_string(&output_path).expect("layout output should exist");
        assert!(
            written.contains("\"instances\""),
            "{} produced no instance list",
            demo_path.display()
        );
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_json_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}",
            demo_path.file_name().expect("demo files have names").to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if ioring_cli::run(&layout_args(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_output_extension_is_json() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("basic_ring.json");
    let requested = temp_dir.path().join("placed.txt");

    ioring_cli::run(&layout_args(&input, &requested)).expect("basic ring should lay out");

    assert!(!requested.exists());
    assert!(temp_dir.path().join("placed.json").exists());
}

#[test]
fn e2e_validate_demo() {
    ioring_cli::run(&validate_args(&demos_dir().join("basic_ring.json")))
        .expect("basic ring should validate");
}

#[test]
fn e2e_missing_input_fails_for_every_command() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("absent.json");
    let output = temp_dir.path().join("placed.json");

    let err = ioring_cli::run(&layout_args(&missing, &output))
        .expect_err("layout of a missing file should fail");
    assert!(matches!(err, IoRingError::Io(_)), "{err:?}");
    assert!(!output.exists());

    let err = ioring_cli::run(&validate_args(&missing))
        .expect_err("validation of a missing file should fail");
    assert!(matches!(err, IoRingError::Io(_)), "{err:?}");
}

#[test]
fn e2e_validate_rejects_bad_intent_graph() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("bad.json");
    fs::write(
        &input,
        r#"{"ring_config": {"width": 400, "height": 300}, "instances": [{"name": "IO1", "device": "PDDW16", "side": "up", "position": 0}]}"#,
    )
    .expect("Failed to write intent graph");

    match ioring_cli::run(&validate_args(&input)) {
        Err(IoRingError::Parse { err, .. }) => {
            assert_eq!(err.error_codes().collect::<Vec<_>>(), vec![ErrorCode::E203]);
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}
