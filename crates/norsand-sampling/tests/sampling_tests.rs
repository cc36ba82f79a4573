//! Integration tests for norsand-sampling.

use norsand_io::RunDescriptor;
use norsand_sampling::{Axis, Generator, ParameterSpace, SamplingMode};
use norsand_types::RunId;

fn small_space() -> ParameterSpace {
    ParameterSpace {
        psi0: Axis::Linspace { start: -0.1, stop: 0.1, num: 3 },
        nu: Axis::Fixed { value: 0.2 },
        n: Axis::Linspace { start: 0.1, stop: 0.2, num: 2 },
        chitc: Axis::Fixed { value: 3.0 },
        href: Axis::Logspace { start: 5.0, stop: 150.0, num: 2 },
        ..Default::default()
    }
}

// ─── Axes ─────────────────────────────────────────────────────

#[test]
fn linspace_includes_both_ends() {
    let v = Axis::Linspace { start: 0.1, stop: 0.35, num: 6 }.values();
    assert_eq!(v.len(), 6);
    assert_eq!(v[0], 0.1);
    assert_eq!(v[5], 0.35);
    assert!((v[1] - 0.15).abs() < 1e-12);
}

#[test]
fn logspace_is_geometric() {
    let v = Axis::Logspace { start: 5.0, stop: 150.0, num: 15 }.values();
    assert_eq!(v.len(), 15);
    assert!((v[0] - 5.0).abs() < 1e-9);
    assert!((v[14] - 150.0).abs() < 1e-9);
    let r0 = v[1] / v[0];
    let r1 = v[8] / v[7];
    assert!((r0 - r1).abs() < 1e-9);
}

#[test]
fn single_point_linspace_is_start() {
    assert_eq!(Axis::Linspace { start: 2.0, stop: 9.0, num: 1 }.values(), vec![2.0]);
}

#[test]
fn invalid_axes_rejected() {
    assert!(Axis::Linspace { start: 0.0, stop: 1.0, num: 0 }.validate("a").is_err());
    assert!(Axis::Logspace { start: 0.0, stop: 1.0, num: 3 }.validate("a").is_err());
    assert!(Axis::Fixed { value: f64::NAN }.validate("a").is_err());
    assert!(Axis::Linspace { start: 0.0, stop: f64::INFINITY, num: 3 }.validate("a").is_err());
    assert!(Axis::Logspace { start: 1.0, stop: 10.0, num: 3 }.validate("a").is_ok());
}

// ─── Grid Mode ────────────────────────────────────────────────

#[test]
fn default_space_reproduces_historical_study_size() {
    assert_eq!(ParameterSpace::default().grid_size(), 119_790);
}

#[test]
fn grid_nesting_order() {
    let g = Generator::new(small_space(), SamplingMode::Grid).unwrap();
    let samples = g.samples();
    assert_eq!(samples.len(), 12);
    assert_eq!(g.total(), 12);
    // href varies fastest, psi0 slowest.
    assert!((samples[0].href - 5.0).abs() < 1e-9);
    assert!((samples[1].href - 150.0).abs() < 1e-9);
    assert_eq!(samples[0].n, samples[1].n);
    assert_eq!(samples[2].n, 0.2);
    assert_eq!(samples[3].psi0, -0.1);
    assert_eq!(samples[4].psi0, 0.0);
    assert_eq!(samples[11].psi0, 0.1);
}

#[test]
fn descriptors_carry_derived_state() {
    let g = Generator::new(small_space(), SamplingMode::Grid).unwrap();
    let descs = g.descriptors().unwrap();
    let (id, d) = &descs[5];
    assert_eq!(*id, RunId(5));
    assert_eq!(d.sim.name, "ns-000005/");
    assert_eq!(d.params.gref, 150.0 * 100.0e3);
    assert_eq!(d.sim.pi0, 58861.0);
    let expected_e0 = 0.0 + (0.91 - 0.014 * (160.0e3f64 / 100.0e3).ln());
    assert!((d.sim.e0 - expected_e0).abs() < 1e-12);
}

// ─── Random Mode ──────────────────────────────────────────────

#[test]
fn random_mode_is_reproducible() {
    let mode = SamplingMode::Random { samples: 50, seed: 7 };
    let a = Generator::new(small_space(), mode).unwrap().samples();
    let b = Generator::new(small_space(), mode).unwrap().samples();
    assert_eq!(a, b);

    let c = Generator::new(small_space(), SamplingMode::Random { samples: 50, seed: 8 })
        .unwrap()
        .samples();
    assert_ne!(a, c);
}

#[test]
fn random_draws_stay_in_range() {
    let g = Generator::new(small_space(), SamplingMode::Random { samples: 200, seed: 1 }).unwrap();
    for s in g.samples() {
        assert!((-0.1..=0.1).contains(&s.psi0));
        assert_eq!(s.nu, 0.2);
        assert!((0.1..=0.2).contains(&s.n));
        assert!((5.0 - 1e-9..=150.0 + 1e-9).contains(&s.href));
    }
}

// ─── Output ───────────────────────────────────────────────────

#[test]
fn write_all_emits_one_file_per_run() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("json-output");
    let g = Generator::new(small_space(), SamplingMode::Grid).unwrap();
    assert_eq!(g.write_all(&out).unwrap(), 12);
    assert!(out.join("ns-000000.json").exists());
    assert!(out.join("ns-000011.json").exists());
    let back = RunDescriptor::read(&out.join("ns-000011.json")).unwrap();
    assert_eq!(back.sim.name, "ns-000011/");
}

#[test]
fn invalid_space_rejected() {
    let mut space = small_space();
    space.constants.lambd = 0.0;
    assert!(Generator::new(space, SamplingMode::Grid).is_err());
}

#[test]
fn space_from_toml() {
    let space: ParameterSpace = toml::from_str(
        r#"
        [constants]
        p0 = 200000.0

        [psi0]
        kind = "linspace"
        start = -0.1
        stop = 0.1
        num = 5

        [href]
        kind = "fixed"
        value = 50.0
        "#,
    )
    .unwrap();
    assert_eq!(space.constants.p0, 200.0e3);
    assert_eq!(space.constants.pref, 100.0e3);
    assert_eq!(space.grid_size(), 5 * 6 * 11 * 11);
}

#[test]
fn sampling_mode_defaults_to_grid() {
    assert_eq!(SamplingMode::default(), SamplingMode::Grid);
}

#[test]
fn sampling_mode_from_toml() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        sampling: SamplingMode,
    }
    let w: Wrapper = toml::from_str(
        r#"
        [sampling]
        mode = "random"
        samples = 10
        seed = 3
        "#,
    )
    .unwrap();
    assert_eq!(w.sampling, SamplingMode::Random { samples: 10, seed: 3 });
}
