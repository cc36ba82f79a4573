//! Descriptor generator — turns a parameter space into per-run input files.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use norsand_io::validator::validate_descriptor;
use norsand_io::RunDescriptor;
use norsand_types::{NorsandResult, RunId};

use crate::space::{ParameterSample, ParameterSpace};

/// Progress is logged every this many descriptors.
const PROGRESS_EVERY: usize = 1000;

/// How points are chosen from the parameter space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SamplingMode {
    /// Every grid point; `psi0` outermost, `href` innermost.
    #[default]
    Grid,
    /// `samples` independent draws from a generator seeded with `seed`.
    Random { samples: usize, seed: u64 },
}

/// Generates run descriptors from a parameter space.
pub struct Generator {
    space: ParameterSpace,
    mode: SamplingMode,
}

impl Generator {
    /// Validates `space` and builds a generator.
    pub fn new(space: ParameterSpace, mode: SamplingMode) -> NorsandResult<Self> {
        space.validate()?;
        Ok(Self { space, mode })
    }

    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    /// Number of runs this generator produces.
    pub fn total(&self) -> usize {
        match self.mode {
            SamplingMode::Grid => self.space.grid_size(),
            SamplingMode::Random { samples, .. } => samples,
        }
    }

    /// All sample points, in run-id order.
    pub fn samples(&self) -> Vec<ParameterSample> {
        match self.mode {
            SamplingMode::Grid => grid(&self.space),
            SamplingMode::Random { samples, seed } => random(&self.space, samples, seed),
        }
    }

    /// Validated descriptors, in run-id order.
    pub fn descriptors(&self) -> NorsandResult<Vec<(RunId, RunDescriptor)>> {
        self.samples()
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let id = RunId(i as u32);
                let desc = self.space.descriptor(id, sample);
                validate_descriptor(&desc)?;
                Ok((id, desc))
            })
            .collect()
    }

    /// Writes `ns-XXXXXX.json` for every run into `dir`, creating it if
    /// needed. Returns the number of descriptors written.
    pub fn write_all(&self, dir: &Path) -> NorsandResult<usize> {
        std::fs::create_dir_all(dir)?;
        let total = self.total();
        let mut count = 0;
        for (id, desc) in self.descriptors()? {
            desc.write_to_dir(dir, id)?;
            if count % PROGRESS_EVERY == 0 {
                info!(count, total, "writing descriptors");
            }
            count += 1;
        }
        info!(count, dir = %dir.display(), "descriptors written");
        Ok(count)
    }
}

fn grid(space: &ParameterSpace) -> Vec<ParameterSample> {
    let psi0 = space.psi0.values();
    let nu = space.nu.values();
    let n = space.n.values();
    let chitc = space.chitc.values();
    let href = space.href.values();

    let mut out = Vec::with_capacity(space.grid_size());
    for &psi0 in &psi0 {
        for &nu in &nu {
            for &n in &n {
                for &chitc in &chitc {
                    for &href in &href {
                        out.push(ParameterSample { psi0, nu, n, chitc, href });
                    }
                }
            }
        }
    }
    out
}

fn random(space: &ParameterSpace, samples: usize, seed: u64) -> Vec<ParameterSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..samples)
        .map(|_| ParameterSample {
            psi0: space.psi0.draw(&mut rng),
            nu: space.nu.draw(&mut rng),
            n: space.n.draw(&mut rng),
            chitc: space.chitc.draw(&mut rng),
            href: space.href.draw(&mut rng),
        })
        .collect()
}
