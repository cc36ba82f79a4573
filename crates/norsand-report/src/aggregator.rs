//! Report aggregator — buckets classified runs into one CSV table per
//! response type.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use norsand_classify::{ClassificationResult, ResponseType};
use norsand_material::MaterialParameters;
use norsand_types::{NorsandResult, RunId, Scalar};

use crate::format::{fixed, scientific};

/// Which point columns each bucket carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLayout {
    /// Peak only for softening and hardening; peak and quasi-steady point
    /// for quasi-steady runs.
    #[default]
    Standard,
    /// Peak and critical point for every bucket.
    Extended,
}

impl ReportLayout {
    /// Number of point columns for `response`.
    pub fn point_columns(self, response: ResponseType) -> usize {
        match (self, response) {
            (ReportLayout::Standard, ResponseType::Softening | ResponseType::Hardening) => 3,
            _ => 6,
        }
    }
}

/// One table row, kept until the tables are written.
#[derive(Debug, Clone, PartialEq)]
struct ReportRow {
    id: RunId,
    nu: Scalar,
    n: Scalar,
    chitc: Scalar,
    href: Scalar,
    psi0: Scalar,
    points: [Scalar; 6],
}

/// Collects results and renders `save_<code>.csv`.
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    layout: ReportLayout,
    buckets: [Vec<ReportRow>; 3],
}

impl ReportAggregator {
    pub fn new(layout: ReportLayout) -> Self {
        Self {
            layout,
            buckets: Default::default(),
        }
    }

    pub fn layout(&self) -> ReportLayout {
        self.layout
    }

    /// Adds one run to its response bucket.
    pub fn push(&mut self, id: RunId, params: &MaterialParameters, result: &ClassificationResult) {
        self.buckets[result.response.code() as usize].push(ReportRow {
            id,
            nu: params.nu,
            n: params.n,
            chitc: params.chitc,
            href: params.href,
            psi0: result.psi0,
            points: result.point_columns(),
        });
    }

    /// Number of rows in the bucket of `response`.
    pub fn count(&self, response: ResponseType) -> usize {
        self.buckets[response.code() as usize].len()
    }

    /// Total rows across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Header line for the bucket of `response`.
    pub fn header(&self, response: ResponseType) -> String {
        let mut hdr = String::from("psi0,nu,N,chitc,href,id");
        for i in 0..self.layout.point_columns(response) {
            hdr.push_str(&format!(",col{i}"));
        }
        hdr
    }

    /// Complete table for `response`, rows in ascending run order, each line
    /// newline-terminated.
    pub fn to_csv(&self, response: ResponseType) -> String {
        let mut rows: Vec<&ReportRow> = self.buckets[response.code() as usize].iter().collect();
        rows.sort_by_key(|r| r.id);

        let width = self.layout.point_columns(response);
        let mut csv = self.header(response);
        csv.push('\n');
        for row in rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{}",
                fixed(row.psi0, 6),
                fixed(row.nu, 4),
                fixed(row.n, 4),
                fixed(row.chitc, 4),
                fixed(row.href, 4),
                response.code(),
            ));
            for &v in &row.points[..width] {
                csv.push(',');
                csv.push_str(&scientific(v));
            }
            csv.push('\n');
        }
        csv
    }

    /// File name of the table for `response`.
    pub fn file_name(response: ResponseType) -> String {
        format!("save_{}.csv", response.code())
    }

    /// Writes all three tables into `dir`, creating it if needed.
    pub fn write_all(&self, dir: &Path) -> NorsandResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(3);
        for &response in ResponseType::all() {
            let path = dir.join(Self::file_name(response));
            std::fs::write(&path, self.to_csv(response))?;
            info!(
                response = %response,
                rows = self.count(response),
                path = %path.display(),
                "report table written"
            );
            written.push(path);
        }
        Ok(written)
    }
}
