use crate::{
    config::{CONFIG_FILE, ConfigError, load_config},
    messager::CargoMessager,
    walk::walk_sources,
};
use std::{
    env, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use viewinject_compiler::{
    codegen::{Registration, generate_registry},
    diagnostic::{Diagnostics, Messager},
    element::{ElementId, ElementRef, RoundEnvironment, TypeRef},
    filer::FsFiler,
    options::ProcessorOptions,
    processor::{RoundContext, ViewInjectProcessor},
    writer::ArtifactWriter,
};

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("environment variable `{0}` is not set")]
    MissingEnv(&'static str),

    #[error("{errors} error(s) reported while generating injectors")]
    Reported { errors: usize },

    #[error("unable to read sources under `{}`: {source}", path.display())]
    Sources { path: PathBuf, source: io::Error },
}

///
/// BuildReport
///

#[derive(Clone, Debug, Default)]
pub struct BuildReport {
    /// Artifact names written into the output directory.
    pub written: Vec<String>,

    /// Artifact names whose write failed.
    pub failed: Vec<String>,

    /// Every host in the registration table, generated or derived. Hosts the
    /// crate root cannot name are left out.
    pub hosts: Vec<TypeRef>,

    /// Path of the registration table, when one was written.
    pub registry: Option<PathBuf>,

    /// `Error` level diagnostics printed during the run.
    pub errors: usize,
}

impl BuildReport {
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

///
/// Builder
///
/// Runs injector generation from a build script. Directories default to
/// what cargo passes build scripts: `CARGO_MANIFEST_DIR` (sources under
/// `src/`, options from `viewinject.toml`) and `OUT_DIR`.
///

#[derive(Clone, Debug, Default)]
pub struct Builder {
    manifest_dir: Option<PathBuf>,
    src_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    options: Option<ProcessorOptions>,
}

impl Builder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn manifest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.manifest_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn src_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.src_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Use these options instead of reading `viewinject.toml`.
    #[must_use]
    pub fn options(mut self, options: ProcessorOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Run and print cargo instructions to stdout.
    pub fn run(self) -> Result<BuildReport, BuildError> {
        self.run_with(io::stdout())
    }

    /// Run, printing cargo instructions to `out`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_with<W: io::Write>(self, out: W) -> Result<BuildReport, BuildError> {
        let manifest_dir = resolve_dir(self.manifest_dir, "CARGO_MANIFEST_DIR")?;
        let out_dir = resolve_dir(self.out_dir, "OUT_DIR")?;
        let src_dir = self.src_dir.unwrap_or_else(|| manifest_dir.join("src"));
        let options = match self.options {
            Some(options) => options,
            None => load_config(&manifest_dir)?,
        };

        // the walker reports before locations are complete, so replay after
        let mut walk_diagnostics = Diagnostics::new();
        let sources =
            walk_sources(&src_dir, &mut walk_diagnostics).map_err(|source| BuildError::Sources {
                path: src_dir.clone(),
                source,
            })?;

        let mut messager = CargoMessager::new(&sources, out);
        messager.instruction(&format!("rerun-if-changed={}", src_dir.display()));
        messager.instruction(&format!(
            "rerun-if-changed={}",
            manifest_dir.join(CONFIG_FILE).display()
        ));
        for diagnostic in walk_diagnostics.into_entries() {
            messager.print_message(diagnostic);
        }

        let processor = ViewInjectProcessor::new(options.clone());
        let mut filer = FsFiler::new(&out_dir);
        let mut context = RoundContext::new();

        let round = processor.process_in(&mut context, &sources.round(), &mut filer, &mut messager);
        // nothing new is visible in the final round, so it generates nothing
        let last = processor.process_in(
            &mut context,
            &RoundEnvironment::last(),
            &mut filer,
            &mut messager,
        );

        let mut report = BuildReport {
            written: round
                .written
                .iter()
                .chain(&last.written)
                .map(|artifact| artifact.qualified_name())
                .collect(),
            failed: round.failed.iter().chain(&last.failed).cloned().collect(),
            ..BuildReport::default()
        };

        let mut hosts = round.hosts();
        hosts.extend(sources.derived.iter().cloned());
        hosts.sort();
        hosts.dedup();
        let registrations: Vec<Registration> = hosts
            .iter()
            .filter_map(|host| sources.registration(host).cloned())
            .collect();
        report.hosts = registrations.iter().map(|entry| entry.host.clone()).collect();

        if options.emit_registry {
            let name = registry_name(&options.registry_file);
            let text = generate_registry(&registrations, processor.paths());
            let anchor = ElementRef::new(ElementId(usize::MAX), name);

            let written = ArtifactWriter::new(&mut filer).write_text(
                name,
                &text,
                &anchor,
                &mut messager,
            );
            match written {
                Ok(()) => report.registry = Some(filer.path_for(name)),
                Err(err) => report.failed.push(err.name().to_string()),
            }
        }

        report.errors = messager.errors();
        tracing::debug!(
            written = report.written.len(),
            failed = report.failed.len(),
            errors = report.errors,
            "build finished"
        );

        Ok(report)
    }
}

fn resolve_dir(explicit: Option<PathBuf>, var: &'static str) -> Result<PathBuf, BuildError> {
    match explicit {
        Some(dir) => Ok(dir),
        None => env::var_os(var)
            .map(PathBuf::from)
            .ok_or(BuildError::MissingEnv(var)),
    }
}

// registry_name
// the filer appends `.rs` itself
fn registry_name(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
}

///
/// TESTS
///
