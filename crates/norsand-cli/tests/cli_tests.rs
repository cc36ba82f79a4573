//! Integration tests for norsand-cli.

use std::path::{Path, PathBuf};

use norsand_batch::BatchConfig;
use norsand_classify::{ExtrapolationMode, ResponseType};
use norsand_cli::commands::{classify_dir, generate, process, render_result, validate_path};
use norsand_cli::settings::{
    load_toml, read_config_file, ConfigFile, GenerateConfig, GenerateOverrides, ModeFlag, ProcessOverrides,
};
use norsand_report::ReportLayout;
use norsand_sampling::SamplingMode;
use norsand_types::{NorsandError, RunId};

const PARAMS_ECHO: &str = "{'pref': 100.0, 'Gref': 15000.0, 'ne': 1.0, 'nu': 0.2, 'Gamma': 0.91, \
                           'lambd': 0.014, 'Mtc': 1.0, 'N': 0.3, 'href': 50.0, 'np': 0.0, 'nh': 2.0, 'chitc': 3.0}";

/// Writes a run whose steady-state stress is `q_ss = 100`.
fn write_run(root: &Path, id: RunId, pq: &[(f64, f64)]) -> PathBuf {
    let dir = root.join(id.name());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("saveParams.txt"), PARAMS_ECHO).unwrap();
    let mut data = String::from("p q e0 e1 eps e2 psi0\n");
    for (i, (p, q)) in pq.iter().enumerate() {
        data.push_str(&format!("{p} {q} 0 0 {} 0 0\n", 0.01 * i as f64));
    }
    std::fs::write(dir.join("saveData.txt"), data).unwrap();
    dir
}

const SOFTENING: &[(f64, f64)] = &[(100.0, 200.0), (100.0, 190.0), (100.0, 180.0), (100.0, 170.0)];
const QUASI_STEADY: &[(f64, f64)] = &[(100.0, 0.0), (95.0, 150.0), (90.0, 130.0), (85.0, 120.0), (80.0, 125.0)];

// ─── Settings ─────────────────────────────────────────────────

#[test]
fn missing_config_gives_defaults() {
    let cfg: BatchConfig = load_toml(None).unwrap();
    assert_eq!(cfg, BatchConfig::default());
}

#[test]
fn unreadable_config_is_invalid_config() {
    let err = load_toml::<BatchConfig>(Some(Path::new("/nonexistent/batch.toml"))).unwrap_err();
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
fn process_flags_override_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("batch.toml");
    std::fs::write(&file, "runs = 10\nthreads = 2\n").unwrap();

    let mut cfg: BatchConfig = load_toml(Some(&file)).unwrap();
    ProcessOverrides {
        runs: Some(3),
        no_extrapolation: true,
        extended: true,
        ..Default::default()
    }
    .apply(&mut cfg);

    assert_eq!(cfg.runs, 3);
    assert_eq!(cfg.threads, 2);
    assert_eq!(cfg.classifier.extrapolation, ExtrapolationMode::Disabled);
    assert_eq!(cfg.layout, ReportLayout::Extended);
    assert!(!cfg.figures);
}

#[test]
fn samples_flag_selects_random_mode() {
    let mut cfg = GenerateConfig::default();
    cfg.apply(&GenerateOverrides {
        samples: Some(20),
        seed: Some(5),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(cfg.sampling, SamplingMode::Random { samples: 20, seed: 5 });

    cfg.apply(&GenerateOverrides {
        mode: Some(ModeFlag::Grid),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(cfg.sampling, SamplingMode::Grid);
}

#[test]
fn random_mode_without_count_rejected() {
    let mut cfg = GenerateConfig::default();
    assert!(cfg
        .apply(&GenerateOverrides {
            mode: Some(ModeFlag::Random),
            ..Default::default()
        })
        .is_err());
}

#[test]
fn config_kind_detected_from_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let study = tmp.path().join("space.toml");
    std::fs::write(&study, "[sampling]\nmode = \"random\"\nsamples = 4\nseed = 1\n").unwrap();
    let batch = tmp.path().join("batch.toml");
    std::fs::write(&batch, "runs = 4\n").unwrap();

    assert!(matches!(read_config_file(&study).unwrap(), ConfigFile::Generate(_)));
    assert!(matches!(read_config_file(&batch).unwrap(), ConfigFile::Batch(c) if c.runs == 4));
}

// ─── Commands ─────────────────────────────────────────────────

#[test]
fn generate_writes_random_descriptors() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("json-output");
    generate(
        None,
        &GenerateOverrides {
            output: Some(out.clone()),
            mode: Some(ModeFlag::Random),
            samples: Some(3),
            seed: Some(11),
        },
    )
    .unwrap();
    assert!(out.join("ns-000002.json").exists());
    assert!(!out.join("ns-000003.json").exists());
    assert!(validate_path(&out.join("ns-000000.json")).unwrap().contains("ns-000000/"));
}

#[test]
fn classify_dir_reads_run() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = write_run(tmp.path(), RunId(12), QUASI_STEADY);
    let result = classify_dir(&dir, false).unwrap();
    assert_eq!(result.response, ResponseType::QuasiSteadyState);

    let text = render_result(RunId(12), &result);
    assert!(text.contains("ns-000012"));
    assert!(text.contains("quasi_steady_state (1)"));
}

#[test]
fn classify_dir_rejects_unnamed_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let named = write_run(tmp.path(), RunId(3), QUASI_STEADY);
    let other = tmp.path().join("scratch");
    std::fs::rename(&named, &other).unwrap();

    let err = classify_dir(&other, false).unwrap_err();
    assert!(matches!(err, NorsandError::Input(_)));
    assert!(err.to_string().contains("scratch"));
}

#[test]
fn process_writes_tables_and_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    write_run(&data, RunId(0), SOFTENING);
    write_run(&data, RunId(1), QUASI_STEADY);
    let out = tmp.path().join("out");

    process(
        None,
        &ProcessOverrides {
            data_dir: Some(data),
            runs: Some(3),
            output: Some(out.clone()),
            threads: Some(1),
            figures: true,
            ..Default::default()
        },
    )
    .unwrap();

    let soft = std::fs::read_to_string(out.join("save_0.csv")).unwrap();
    assert_eq!(soft.lines().count(), 2);
    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["failed"], 1);
    assert!(out.join("figures").join("1").join("ns-000001.json").exists());
}

#[test]
fn validate_rejects_bad_descriptor_and_unknown_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, "{\"params\": {}}").unwrap();
    assert!(validate_path(&bad).is_err());
    assert!(validate_path(&tmp.path().join("notes.txt")).is_err());
}

#[test]
fn validate_checks_study_configuration() {
    let tmp = tempfile::tempdir().unwrap();
    let ok = tmp.path().join("space.toml");
    std::fs::write(&ok, "[space.psi0]\nkind = \"fixed\"\nvalue = 0.0\n").unwrap();
    assert!(validate_path(&ok).unwrap().contains(&format!("{} runs", 6 * 11 * 11 * 15)));

    let bad = tmp.path().join("bad.toml");
    std::fs::write(&bad, "[space.href]\nkind = \"logspace\"\nstart = 0.0\nstop = 10.0\nnum = 3\n").unwrap();
    assert!(validate_path(&bad).is_err());
}
