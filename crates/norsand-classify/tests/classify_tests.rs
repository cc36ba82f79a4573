//! Integration tests for norsand-classify.
//!
//! Paths use `Mtc = 1`, `psi0 = 0`, `p0 = 100`, so the steady-state stress
//! is exactly `q_ss = 100` and `qCheck = |q - 100| / 100`. `Ir = 150`.

use norsand_classify::{
    scan, ClassifierConfig, Classify, CriticalSource, LayeredExtrapolation, NormalizedPoint,
    Normalizer, ResponseClassifier, ResponseType, ScanOutcome, ScanState, StressPath,
    StressPathSample, TailPolicy,
};
use norsand_material::MaterialParameters;
use norsand_types::NorsandError;

const IR: f64 = 150.0;

fn params() -> MaterialParameters {
    MaterialParameters {
        pref: 100.0,
        gref: IR * 100.0,
        ne: 1.0,
        nu: 0.2,
        gamma: 0.91,
        lambd: 0.014,
        mtc: 1.0,
        n: 0.3,
        href: 50.0,
        np: 0.0,
        nh: 2.0,
        chitc: 3.0,
    }
}

/// Builds a path from `(p, q)` pairs with strain `0.01 · index`.
fn path(pq: &[(f64, f64)]) -> StressPath {
    let samples = pq
        .iter()
        .enumerate()
        .map(|(i, &(p, q))| StressPathSample::new(p, q, 0.01 * i as f64, 0.0))
        .collect();
    StressPath::new(samples).unwrap()
}

/// Constant `p = 100` path with the given `q` values.
fn q_path(q: &[f64]) -> StressPath {
    let pq: Vec<(f64, f64)> = q.iter().map(|&q| (100.0, q)).collect();
    path(&pq)
}

fn classify(path: &StressPath) -> norsand_classify::ClassificationResult {
    ResponseClassifier::new().classify(&params(), path).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ─── Scan State Machine ───────────────────────────────────────

#[test]
fn transitions_follow_guards() {
    let s = ScanState::Initial.step(3, 1.0, 0.5, 0.01);
    assert_eq!(s, ScanState::Initial);
    let s = s.step(4, -1.0, 0.5, 0.01);
    assert_eq!(s, ScanState::Softened { peak_index: 4 });
    let s = s.step(5, -1.0, 0.5, 0.01);
    assert_eq!(s, ScanState::Softened { peak_index: 4 });
    let s = s.step(6, 1.0, 0.5, 0.01);
    assert_eq!(
        s,
        ScanState::QuasiSteadyFound {
            peak_index: 4,
            qss_index: 6
        }
    );
    assert!(s.is_terminal());
}

#[test]
fn scan_outcome_for_monotone_rise() {
    let p = q_path(&[0.0, 50.0, 80.0, 120.0]);
    let norm = Normalizer::new(&params(), &p).unwrap();
    assert_eq!(scan(&p, &norm, 0.01), ScanOutcome::Monotonic);
}

// ─── Softening ────────────────────────────────────────────────

#[test]
fn monotone_softening_extrapolates() {
    // q falls every step and never comes within 1% of q_ss.
    let p = q_path(&[200.0, 190.0, 180.0, 170.0, 160.0]);
    let r = classify(&p);

    assert_eq!(r.response, ResponseType::Softening);
    assert_eq!(r.peak_index, 1);
    assert!(close(r.peak.p, 1.0));
    assert!(close(r.peak.q, 1.9));
    assert!(close(r.peak.eps, 0.01 * IR));

    assert_eq!(r.critical_source, CriticalSource::Extrapolated);
    assert!(!r.critical.is_unset());
    // eps is linear in q along the tail, so the spline lands on eps = 0.10.
    assert!((r.critical.eps - 0.10 * IR).abs() < 1e-9);
}

#[test]
fn extrapolated_point_sits_on_steady_state_line() {
    let mut prm = params();
    prm.mtc = 1.24;
    let p = q_path(&[300.0, 290.0, 280.0, 270.0]);
    let r = ResponseClassifier::new().classify(&prm, &p).unwrap();

    let q_ss = 1.24 * 100.0;
    assert_eq!(r.critical_source, CriticalSource::Extrapolated);
    assert_eq!(r.critical.p, q_ss / (1.24 * 100.0));
    assert_eq!(r.critical.q, q_ss / 100.0);
}

#[test]
fn proximity_fallback_uses_strict_less_than() {
    // Peak at 2; 99 is exactly on the 1% boundary and is skipped, 99.5 is
    // accepted. The rise to 99.5 is inside the band, so it is no reversal.
    let p = q_path(&[0.0, 150.0, 130.0, 110.0, 99.0, 99.5]);
    let r = classify(&p);

    assert_eq!(r.response, ResponseType::Softening);
    assert_eq!(r.peak_index, 2);
    assert_eq!(r.critical_source, CriticalSource::Proximity(5));
    assert!(close(r.critical.q, 0.995));
    assert!(close(r.critical.eps, 0.05 * IR));
}

#[test]
fn stationarity_fallback_detects_plateau() {
    let p = q_path(&[0.0, 150.0, 130.0, 120.0, 120.0, 120.0]);
    let r = classify(&p);

    assert_eq!(r.response, ResponseType::Softening);
    assert_eq!(r.critical_source, CriticalSource::Stationary(4));
    assert!(close(r.critical.q, 1.2));
}

#[test]
fn single_point_tail_is_extrapolation_error() {
    let p = q_path(&[0.0, 150.0, 130.0]);
    let err = ResponseClassifier::new().classify(&params(), &p).unwrap_err();
    assert!(matches!(err, NorsandError::Extrapolation(_)));
}

#[test]
fn disabled_extrapolation_leaves_sentinel() {
    let classifier = ResponseClassifier::from_config(ClassifierConfig::without_extrapolation()).unwrap();
    let r = classifier
        .classify(&params(), &q_path(&[200.0, 190.0, 180.0]))
        .unwrap();
    assert_eq!(r.response, ResponseType::Softening);
    assert_eq!(r.critical, NormalizedPoint::UNSET);
    assert_eq!(r.critical_source, CriticalSource::Unresolved);
    assert_eq!(classifier.strategy_name(), "sentinel");
}

// ─── Quasi-Steady State ───────────────────────────────────────

#[test]
fn quasi_steady_reversal_short_circuits() {
    // Reversal at index 4; the NaN row after it would poison the result if read.
    let p = path(&[
        (100.0, 0.0),
        (95.0, 150.0),
        (90.0, 130.0),
        (85.0, 120.0),
        (80.0, 125.0),
        (f64::NAN, f64::NAN),
        (1.0, -500.0),
    ]);
    let r = classify(&p);

    assert_eq!(r.response, ResponseType::QuasiSteadyState);
    assert_eq!(r.peak_index, 2);
    assert_eq!(r.critical_source, CriticalSource::Scan(4));
    assert!(close(r.peak.p, 0.9));
    assert!(close(r.peak.q, 1.3));
    assert!(close(r.critical.p, 0.8));
    assert!(close(r.critical.q, 1.25));
    assert!(close(r.critical.eps, 0.04 * IR));
}

#[test]
fn reversal_within_band_is_not_quasi_steady() {
    // 101 is exactly 1% above q_ss: not a reversal.
    let p = q_path(&[0.0, 150.0, 130.0, 99.0, 101.0, 95.0]);
    let classifier = ResponseClassifier::from_config(ClassifierConfig {
        tail_policy: TailPolicy::Prune,
        ..Default::default()
    })
    .unwrap();
    let r = classifier.classify(&params(), &p).unwrap();
    assert_eq!(r.response, ResponseType::Softening);
}

// ─── Hardening ────────────────────────────────────────────────

#[test]
fn pure_hardening_uses_minimum_p() {
    let p = path(&[
        (100.0, 0.0),
        (90.0, 20.0),
        (80.0, 40.0),
        (85.0, 60.0),
        (95.0, 80.0),
        (110.0, 95.0),
    ]);
    let r = classify(&p);

    assert_eq!(r.response, ResponseType::Hardening);
    assert_eq!(r.peak_index, 2);
    assert!(close(r.peak.p, 0.8));
    assert!(close(r.peak.q, 0.4));
    assert!(close(r.peak.eps, 0.02 * IR));

    assert_eq!(r.critical_source, CriticalSource::Extrapolated);
    assert!(close(r.critical.p, 1.0));
    assert!(close(r.critical.q, 1.0));
    assert!(r.critical.eps.is_finite());
    assert!(r.critical.eps > 0.05 * IR);
}

#[test]
fn hardening_min_p_ties_take_first_index() {
    let p = path(&[(100.0, 0.0), (80.0, 20.0), (80.0, 40.0), (90.0, 60.0)]);
    assert_eq!(classify(&p).peak_index, 1);
}

#[test]
fn hardening_with_non_monotone_tail() {
    // The dip to 99.2 is inside the band, so the path stays monotonic.
    let p = path(&[
        (100.0, 0.0),
        (90.0, 50.0),
        (92.0, 99.5),
        (94.0, 99.2),
        (96.0, 105.0),
    ]);

    let strict = ResponseClassifier::new().classify(&params(), &p).unwrap_err();
    assert!(matches!(strict, NorsandError::Extrapolation(_)));

    let pruned = ResponseClassifier::from_config(ClassifierConfig {
        tail_policy: TailPolicy::Prune,
        ..Default::default()
    })
    .unwrap()
    .classify(&params(), &p)
    .unwrap();
    assert_eq!(pruned.response, ResponseType::Hardening);
    assert_eq!(pruned.critical_source, CriticalSource::Extrapolated);
}

#[test]
fn hardening_without_extrapolation_keeps_sentinel() {
    let classifier = ResponseClassifier::from_config(ClassifierConfig::without_extrapolation()).unwrap();
    let r = classifier
        .classify(&params(), &q_path(&[0.0, 50.0, 120.0]))
        .unwrap();
    assert_eq!(r.response, ResponseType::Hardening);
    assert!(!r.peak.is_unset());
    assert!(r.critical.is_unset());
}

// ─── Threshold Boundaries ─────────────────────────────────────

#[test]
fn onset_at_exact_threshold_does_not_trigger() {
    // Drop to 101: qCheck == 0.01 exactly. p bottoms out at the drop so the
    // hardening tail is increasing in q.
    let r = classify(&path(&[
        (100.0, 0.0),
        (95.0, 120.0),
        (90.0, 101.0),
        (92.0, 110.0),
        (94.0, 120.0),
    ]));
    assert_eq!(r.response, ResponseType::Hardening);
}

#[test]
fn onset_just_past_threshold_triggers() {
    let r = classify(&q_path(&[0.0, 120.0, 102.0, 110.0, 120.0]));
    assert_eq!(r.response, ResponseType::QuasiSteadyState);
    assert_eq!(r.peak_index, 2);
    assert_eq!(r.critical_source, CriticalSource::Scan(3));
}

// ─── Degenerate Input ─────────────────────────────────────────

#[test]
fn short_path_rejected() {
    let one = vec![StressPathSample::new(100.0, 0.0, 0.0, 0.0)];
    assert!(matches!(StressPath::new(one), Err(NorsandError::Data(_))));
    assert!(matches!(StressPath::new(Vec::new()), Err(NorsandError::Data(_))));
}

#[test]
fn non_positive_p0_rejected() {
    let p = path(&[(0.0, 0.0), (10.0, 5.0)]);
    let err = ResponseClassifier::new().classify(&params(), &p).unwrap_err();
    assert!(matches!(err, NorsandError::Data(_)));
}

#[test]
fn non_positive_mtc_rejected() {
    let mut prm = params();
    prm.mtc = 0.0;
    let err = ResponseClassifier::new()
        .classify(&prm, &q_path(&[0.0, 10.0]))
        .unwrap_err();
    assert!(matches!(err, NorsandError::Data(_)));
}

#[test]
fn invalid_config_rejected() {
    let config = ClassifierConfig {
        proximity_tolerance: 0.0,
        ..Default::default()
    };
    assert!(ResponseClassifier::from_config(config).is_err());
}

// ─── Determinism & Labeling ───────────────────────────────────

#[test]
fn classification_is_deterministic() {
    let p = q_path(&[200.0, 190.0, 185.0, 170.0, 160.0, 150.0]);
    let a = classify(&p);
    let b = classify(&p);
    assert_eq!(a, b);
    assert_eq!(a.critical.eps.to_bits(), b.critical.eps.to_bits());
}

#[test]
fn every_path_gets_exactly_one_label() {
    let paths = [
        q_path(&[0.0, 50.0, 120.0]),
        q_path(&[200.0, 190.0, 180.0]),
        q_path(&[0.0, 150.0, 130.0, 140.0]),
        q_path(&[0.0, 150.0, 130.0, 120.0, 120.0]),
    ];
    for p in &paths {
        let r = classify(p);
        assert!(ResponseType::all().contains(&r.response));
        assert_eq!(ResponseType::from_code(r.response.code() as i64).unwrap(), r.response);
    }
}

#[test]
fn unknown_code_is_unclassified() {
    assert!(matches!(ResponseType::from_code(3), Err(NorsandError::Unclassified(_))));
    assert!(matches!(ResponseType::from_code(-1), Err(NorsandError::Unclassified(_))));
}

// ─── Strategy & Serialization ─────────────────────────────────

#[test]
fn custom_strategy_still_validates_config() {
    for tolerance in [0.0, f64::NAN] {
        let err = ResponseClassifier::with_strategy(
            ClassifierConfig {
                proximity_tolerance: tolerance,
                ..Default::default()
            },
            Box::new(LayeredExtrapolation::default()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, NorsandError::InvalidConfig(_)));
    }
}

#[test]
fn custom_strategy_is_used() {
    let classifier = ResponseClassifier::with_strategy(
        ClassifierConfig::default(),
        Box::new(LayeredExtrapolation {
            tail_policy: TailPolicy::Prune,
            ..Default::default()
        }),
    )
    .unwrap();
    assert_eq!(classifier.strategy_name(), "layered");
    let r = classifier.classify(&params(), &q_path(&[200.0, 190.0, 180.0])).unwrap();
    assert_eq!(r.critical_source, CriticalSource::Extrapolated);
}

#[test]
fn config_from_toml() {
    let config: ClassifierConfig = toml::from_str(
        r#"
        extrapolation = "disabled"
        tail_policy = "prune"
        "#,
    )
    .unwrap();
    assert_eq!(config.proximity_tolerance, 0.01);
    assert_eq!(config.stationarity_tolerance, 1e-12);
    assert_eq!(config, ClassifierConfig {
        tail_policy: TailPolicy::Prune,
        ..ClassifierConfig::without_extrapolation()
    });
}

#[test]
fn result_json_round_trip() {
    let r = classify(&q_path(&[0.0, 150.0, 130.0, 120.0, 125.0]));
    let json = serde_json::to_string(&r).unwrap();
    assert!(json.contains("\"method\":\"scan\""));
    let recovered: norsand_classify::ClassificationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.response, r.response);
    assert_eq!(recovered.peak_index, r.peak_index);
    assert_eq!(recovered.critical_source, r.critical_source);
    assert!(close(recovered.critical.q, r.critical.q));
}

#[test]
fn stress_path_deserialization_enforces_length() {
    let json = r#"{"samples":[{"p":100.0,"q":0.0,"eps":0.0,"psi0":0.0}]}"#;
    assert!(serde_json::from_str::<StressPath>(json).is_err());
}

#[test]
fn accepted_path_reports_its_length() {
    let p = q_path(&[0.0, 10.0, 20.0]);
    assert_eq!(p.len(), 3);
    assert!(!p.is_empty());
}
