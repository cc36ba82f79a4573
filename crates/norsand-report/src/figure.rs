//! JSON figure exporter — writes the two diagnostic panels of each run.
//!
//! Panel 1 is the normalized stress path `(p/p0, q/p0)`, panel 2 the
//! normalized stress-strain curve `(eps·Ir, q/p0)`. The peak point is always
//! marked; the quasi-steady point only for quasi-steady responses.
//! Files land in `<root>/<code>/ns-XXXXXX.json`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use norsand_classify::{ClassificationResult, ResponseType, StressPath};
use norsand_material::MaterialParameters;
use norsand_types::{NorsandError, NorsandResult, RunId, Scalar};

use crate::sink::DiagnosticSink;

/// One panel: a polyline plus marked points.
#[derive(Debug, Serialize)]
struct Panel {
    x_label: &'static str,
    y_label: &'static str,
    x: Vec<Scalar>,
    y: Vec<Scalar>,
    /// Peak marker `[x, y]`.
    peak: [Scalar; 2],
    /// Quasi-steady marker `[x, y]`, present for quasi-steady runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    quasi_steady: Option<[Scalar; 2]>,
}

#[derive(Debug, Serialize)]
struct FigureData<'a> {
    run: String,
    response: ResponseType,
    code: u8,
    psi0: Scalar,
    panels: [Panel; 2],
    result: &'a ClassificationResult,
}

/// Writes one JSON figure per recorded run.
pub struct JsonFigureExporter {
    root: PathBuf,
    count: AtomicUsize,
}

impl JsonFigureExporter {
    /// Creates an exporter writing under `root` (typically `<output>/figures`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            count: AtomicUsize::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the figure for `id` with response `response`.
    pub fn figure_path(&self, id: RunId, response: ResponseType) -> PathBuf {
        self.root
            .join(response.code().to_string())
            .join(format!("{}.json", id.name()))
    }
}

impl DiagnosticSink for JsonFigureExporter {
    fn record(
        &self,
        id: RunId,
        path: &StressPath,
        params: &MaterialParameters,
        result: &ClassificationResult,
    ) -> NorsandResult<()> {
        let p0 = path.p0();
        let ir = params.rigidity();
        let n = path.len();

        let mut p = Vec::with_capacity(n);
        let mut q = Vec::with_capacity(n);
        let mut eps = Vec::with_capacity(n);
        for s in path.samples() {
            p.push(s.p / p0);
            q.push(s.q / p0);
            eps.push(s.eps * ir);
        }

        let pk = result.peak;
        let qss = (result.response == ResponseType::QuasiSteadyState).then_some(result.critical);

        let data = FigureData {
            run: id.name(),
            response: result.response,
            code: result.response.code(),
            psi0: result.psi0,
            panels: [
                Panel {
                    x_label: "p/p0",
                    y_label: "q/p0",
                    x: p,
                    y: q.clone(),
                    peak: [pk.p, pk.q],
                    quasi_steady: qss.map(|c| [c.p, c.q]),
                },
                Panel {
                    x_label: "eps*Ir",
                    y_label: "q/p0",
                    x: eps,
                    y: q,
                    peak: [pk.eps, pk.q],
                    quasi_steady: qss.map(|c| [c.eps, c.q]),
                },
            ],
            result,
        };

        let out = self.figure_path(id, result.response);
        if let Some(dir) = out.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string(&data)
            .map_err(|e| NorsandError::Serialization(format!("figure {id}: {e}")))?;
        std::fs::write(&out, json)?;
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        "json_figure_exporter"
    }

    fn recorded(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}
