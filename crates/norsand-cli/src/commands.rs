//! CLI command implementations.

use std::path::Path;

use tracing::info;

use norsand_batch::{BatchConfig, BatchRunner};
use norsand_classify::{ClassificationResult, ClassifierConfig, Classify, NormalizedPoint, ResponseClassifier};
use norsand_io::validator::validate_descriptor;
use norsand_io::{DirectoryRunStore, RunDescriptor};
use norsand_report::{DiagnosticSink, HeadlessSink, JsonFigureExporter};
use norsand_sampling::{Generator, SamplingMode};
use norsand_telemetry::{EventBus, TracingSink};
use norsand_types::{NorsandError, NorsandResult, RunId};

use crate::settings::{load_toml, read_config_file, ConfigFile, GenerateConfig, GenerateOverrides, ProcessOverrides};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Writes the descriptors of a study.
pub fn generate(config: Option<&Path>, flags: &GenerateOverrides) -> CmdResult {
    let mut cfg: GenerateConfig = load_toml(config)?;
    cfg.apply(flags)?;

    let generator = Generator::new(cfg.space, cfg.sampling)?;
    info!(runs = generator.total(), output = %cfg.output_dir.display(), mode = ?cfg.sampling, "generating descriptors");
    let count = generator.write_all(&cfg.output_dir)?;

    println!("Wrote {count} descriptors to {}", cfg.output_dir.display());
    Ok(())
}

/// Classifies a range of runs and writes tables, summary and figures.
pub fn process(config: Option<&Path>, flags: &ProcessOverrides) -> CmdResult {
    let mut cfg: BatchConfig = load_toml(config)?;
    flags.apply(&mut cfg);
    cfg.validate()?;

    let classifier = ResponseClassifier::from_config(cfg.classifier.clone())?;
    let store = DirectoryRunStore::new(&cfg.data_dir);
    let sink: Box<dyn DiagnosticSink> = if cfg.figures {
        Box::new(JsonFigureExporter::new(cfg.figures_dir()))
    } else {
        Box::new(HeadlessSink::new())
    };

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));

    let ids = cfg.ids();
    let report = BatchRunner::new(cfg.threads).run_with_bus(&store, &ids, &classifier, sink.as_ref(), &mut bus)?;

    report.aggregate(cfg.layout).write_all(&cfg.output_dir)?;
    let summary_path = report.summary.write_json(&cfg.output_dir)?;

    print!("{}", report.summary.to_table());
    println!("Summary: {}", summary_path.display());
    Ok(())
}

/// Classifies one run directory and prints the result.
pub fn classify(run_dir: &Path, no_extrapolation: bool, json: bool) -> CmdResult {
    let id = run_id_of(run_dir)?;
    let result = classify_dir(run_dir, no_extrapolation)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_result(id, &result));
    }
    Ok(())
}

/// Loads and classifies the run stored in `run_dir`, which must be named
/// after its run id.
pub fn classify_dir(run_dir: &Path, no_extrapolation: bool) -> NorsandResult<ClassificationResult> {
    let record = DirectoryRunStore::load_dir(run_id_of(run_dir)?, run_dir)?;
    let config = if no_extrapolation {
        ClassifierConfig::without_extrapolation()
    } else {
        ClassifierConfig::default()
    };
    ResponseClassifier::from_config(config)?.classify(&record.params, &record.path)
}

/// Human-readable rendering of one result.
pub fn render_result(id: RunId, result: &ClassificationResult) -> String {
    let point = |pt: &NormalizedPoint| format!("p/p0 = {:.6}  q/p0 = {:.6}  eps*Ir = {:.6}", pt.p, pt.q, pt.eps);
    format!(
        "Run:      {id}\nResponse: {} ({})\npsi0:     {:.6}\nPeak:     {}  [index {}]\nCritical: {}  [{:?}]\n",
        result.response,
        result.response.code(),
        result.psi0,
        point(&result.peak),
        result.peak_index,
        point(&result.critical),
        result.critical_source,
    )
}

/// Validates a descriptor or configuration file and prints what it holds.
pub fn validate(path: &Path) -> CmdResult {
    let what = validate_path(path)?;
    println!("{}: ok ({what})", path.display());
    Ok(())
}

/// Validates `path` by extension and describes it.
pub fn validate_path(path: &Path) -> NorsandResult<String> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let desc = RunDescriptor::read(path)?;
            validate_descriptor(&desc)?;
            Ok(format!("run descriptor {}", desc.sim.name))
        }
        Some("toml") => match read_config_file(path)? {
            ConfigFile::Generate(cfg) => {
                if let SamplingMode::Random { samples: 0, .. } = cfg.sampling {
                    return Err(NorsandError::InvalidConfig("random sampling needs at least one sample".into()));
                }
                let generator = Generator::new(cfg.space, cfg.sampling)?;
                Ok(format!("study configuration, {} runs", generator.total()))
            }
            ConfigFile::Batch(cfg) => {
                cfg.validate()?;
                Ok(format!("batch configuration, {} runs", cfg.runs))
            }
        },
        _ => Err(NorsandError::Input(format!(
            "{}: expected a .json descriptor or a .toml configuration",
            path.display()
        ))),
    }
}

/// Run id from a directory named `ns-XXXXXX`.
fn run_id_of(dir: &Path) -> NorsandResult<RunId> {
    dir.file_name()
        .and_then(|n| n.to_str())
        .and_then(RunId::parse_name)
        .ok_or_else(|| {
            NorsandError::Input(format!("{}: run directory must be named ns-XXXXXX", dir.display()))
        })
}
