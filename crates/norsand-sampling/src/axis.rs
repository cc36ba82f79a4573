//! One varied quantity of a parameter space.

use rand::Rng;
use serde::{Deserialize, Serialize};

use norsand_types::{NorsandError, NorsandResult, Scalar};

/// Values an axis takes in grid mode, and the range it is drawn from in
/// random mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Axis {
    /// A single value.
    Fixed { value: Scalar },
    /// `num` evenly spaced values, both ends included.
    Linspace { start: Scalar, stop: Scalar, num: usize },
    /// `num` geometrically spaced values between positive `start` and `stop`.
    Logspace { start: Scalar, stop: Scalar, num: usize },
}

impl Axis {
    pub fn validate(&self, name: &str) -> NorsandResult<()> {
        let problem = match *self {
            Axis::Fixed { value } => (!value.is_finite()).then(|| format!("value {value} is not finite")),
            Axis::Linspace { start, stop, num } => range_problem(start, stop, num),
            Axis::Logspace { start, stop, num } => range_problem(start, stop, num).or_else(|| {
                (start <= 0.0 || stop <= 0.0)
                    .then(|| format!("logspace ends must be positive, got {start}..{stop}"))
            }),
        };
        match problem {
            Some(msg) => Err(NorsandError::InvalidConfig(format!("axis {name}: {msg}"))),
            None => Ok(()),
        }
    }

    /// Number of grid values.
    pub fn len(&self) -> usize {
        match *self {
            Axis::Fixed { .. } => 1,
            Axis::Linspace { num, .. } | Axis::Logspace { num, .. } => num,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid values in ascending index order.
    pub fn values(&self) -> Vec<Scalar> {
        match *self {
            Axis::Fixed { value } => vec![value],
            Axis::Linspace { start, stop, num } => linspace(start, stop, num),
            Axis::Logspace { start, stop, num } => linspace(start.log10(), stop.log10(), num)
                .into_iter()
                .map(|x| 10f64.powf(x))
                .collect(),
        }
    }

    /// Draws one value: uniform for linear axes, log-uniform for log axes.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Scalar {
        match *self {
            Axis::Fixed { value } => value,
            Axis::Linspace { start, stop, .. } => uniform(rng, start, stop),
            Axis::Logspace { start, stop, .. } => uniform(rng, start.ln(), stop.ln()).exp(),
        }
    }
}

fn range_problem(start: Scalar, stop: Scalar, num: usize) -> Option<String> {
    if !(start.is_finite() && stop.is_finite()) {
        Some(format!("range {start}..{stop} is not finite"))
    } else if num == 0 {
        Some("num must be at least 1".into())
    } else {
        None
    }
}

/// `num` evenly spaced values with the last one pinned to `stop`.
fn linspace(start: Scalar, stop: Scalar, num: usize) -> Vec<Scalar> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as Scalar;
            let mut v: Vec<Scalar> = (0..num).map(|i| start + i as Scalar * step).collect();
            v[num - 1] = stop;
            v
        }
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, a: Scalar, b: Scalar) -> Scalar {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}
