//! Piecewise cubic Hermite interpolating polynomial (PCHIP).
//!
//! Knot slopes follow Fritsch–Carlson: interior slopes are the weighted
//! harmonic mean of the neighbouring secants, or zero where the data changes
//! direction. End slopes use the one-sided three-point formula clamped so the
//! interpolant never overshoots. Monotone data therefore gives a monotone
//! interpolant, and linear data is reproduced exactly.
//!
//! Outside the data range the first or last cubic segment is continued.

use norsand_types::{NorsandError, NorsandResult, Scalar};

/// A fitted monotone cubic interpolant `y(x)`.
#[derive(Debug, Clone)]
pub struct Pchip {
    x: Vec<Scalar>,
    y: Vec<Scalar>,
    slopes: Vec<Scalar>,
}

impl Pchip {
    /// Fits the interpolant through `(x[i], y[i])`.
    ///
    /// Requires at least 2 points, finite data, and strictly increasing `x`.
    pub fn fit(x: &[Scalar], y: &[Scalar]) -> NorsandResult<Self> {
        if x.len() != y.len() {
            return Err(NorsandError::Extrapolation(format!(
                "abscissa has {} points but ordinate has {}",
                x.len(),
                y.len()
            )));
        }
        let n = x.len();
        if n < 2 {
            return Err(NorsandError::Extrapolation(format!(
                "interpolant needs at least 2 distinct points, got {n}"
            )));
        }
        if let Some(i) = x.iter().chain(y).position(|v| !v.is_finite()) {
            return Err(NorsandError::Extrapolation(format!(
                "non-finite value at position {} of the {}",
                i % n,
                if i < n { "abscissa" } else { "ordinate" }
            )));
        }
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(NorsandError::Extrapolation(format!(
                "abscissa not strictly increasing at index {}: {} -> {}",
                i + 1,
                x[i],
                x[i + 1]
            )));
        }

        let h: Vec<Scalar> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let secants: Vec<Scalar> = (0..n - 1).map(|k| (y[k + 1] - y[k]) / h[k]).collect();

        let slopes = if n == 2 {
            vec![secants[0]; 2]
        } else {
            let mut d = vec![0.0; n];
            for k in 1..n - 1 {
                let (m0, m1) = (secants[k - 1], secants[k]);
                if sign(m0) == 0 || sign(m1) == 0 || sign(m0) != sign(m1) {
                    continue;
                }
                let w1 = 2.0 * h[k] + h[k - 1];
                let w2 = h[k] + 2.0 * h[k - 1];
                d[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
            }
            d[0] = edge_slope(h[0], h[1], secants[0], secants[1]);
            d[n - 1] = edge_slope(h[n - 2], h[n - 3], secants[n - 2], secants[n - 3]);
            d
        };

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            slopes,
        })
    }

    /// Evaluates the interpolant at `xq`.
    pub fn eval(&self, xq: Scalar) -> Scalar {
        let last = self.x.len() - 2;
        let k = self.x.partition_point(|&xi| xi <= xq).saturating_sub(1).min(last);

        let h = self.x[k + 1] - self.x[k];
        let t = (xq - self.x[k]) / h;
        hermite(t, self.y[k], self.y[k + 1] - self.y[k], self.slopes[k] * h, self.slopes[k + 1] * h)
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false: a fitted interpolant has at least 2 knots.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Data range `(x_min, x_max)`.
    pub fn domain(&self) -> (Scalar, Scalar) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Knot slopes `dy/dx`.
    pub fn slopes(&self) -> &[Scalar] {
        &self.slopes
    }
}

/// Keeps only the points whose abscissa strictly exceeds the last kept one.
///
/// The first point is always kept. Use this to salvage a mostly increasing
/// tail before [`Pchip::fit`].
pub fn prune_increasing(x: &[Scalar], y: &[Scalar]) -> (Vec<Scalar>, Vec<Scalar>) {
    let mut px = Vec::with_capacity(x.len());
    let mut py = Vec::with_capacity(y.len());
    for (&xi, &yi) in x.iter().zip(y) {
        if px.last().map_or(true, |&prev| xi > prev) {
            px.push(xi);
            py.push(yi);
        }
    }
    (px, py)
}

/// Cubic Hermite on the unit interval with endpoint slopes `k0`, `k1`
/// already scaled by the interval width.
#[inline]
fn hermite(t: Scalar, y0: Scalar, dy: Scalar, k0: Scalar, k1: Scalar) -> Scalar {
    let a = k0 - dy;
    let b = -k1 + dy;

    let c1 = dy + a;
    let c2 = b - (a + a);
    let c3 = a - b;

    y0 + t * (c1 + t * (c2 + t * c3))
}

/// Three-point end slope, clamped to keep the end segment shape preserving.
fn edge_slope(h0: Scalar, h1: Scalar, m0: Scalar, m1: Scalar) -> Scalar {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

/// Sign with an explicit zero, unlike `f64::signum`.
#[inline]
fn sign(v: Scalar) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
