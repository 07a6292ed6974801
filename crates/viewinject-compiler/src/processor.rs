use crate::{
    codegen::GeneratedArtifact,
    diagnostic::{Level, Messager},
    element::{ElementRef, RoundEnvironment, TypeRef},
    filer::Filer,
    model::ClassModelRegistry,
    options::ProcessorOptions,
    paths::CratePaths,
    report,
    scan::scan,
    writer::ArtifactWriter,
};

///
/// SourceVersion
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum SourceVersion {
    Edition2015,
    Edition2018,
    Edition2021,
    Edition2024,
}

impl SourceVersion {
    #[must_use]
    pub const fn latest_supported() -> Self {
        Self::Edition2024
    }
}

///
/// RoundContext
///
/// State owned by exactly one round. Built fresh for each round and dropped
/// when it ends; reusing one goes through [`RoundContext::begin`].
///

#[derive(Debug, Default)]
pub struct RoundContext {
    registry: ClassModelRegistry,
}

impl RoundContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: ClassModelRegistry::new(),
        }
    }

    /// Drop anything a previous round left behind.
    pub fn begin(&mut self) {
        self.registry.clear();
    }

    #[must_use]
    pub const fn registry(&self) -> &ClassModelRegistry {
        &self.registry
    }

    /// Scan `round` and fold every accepted field into its host model.
    pub fn populate(
        &mut self,
        round: &RoundEnvironment,
        messager: &mut dyn Messager,
        deny_duplicate_ids: bool,
    ) {
        let fields: Vec<_> = scan(round, &mut *messager).collect();

        for field in fields {
            let element = ElementRef::new(
                field.element,
                format!("{}::{}", field.owner, field.field_name()),
            );
            let (id, name, owner) = (field.id, field.field_name(), field.owner.clone());

            if let Some(prev) = self.registry.add(field)
                && deny_duplicate_ids
            {
                report!(
                    &mut *messager,
                    Level::Error,
                    element,
                    "bind id {id} on field `{name}` is already used by field `{}` in `{owner}`",
                    prev.field_name()
                );
            }
        }
    }

    fn generate_all(&self, paths: &CratePaths) -> Vec<GeneratedArtifact> {
        self.registry
            .iter()
            .map(|model| GeneratedArtifact::from_model(model, paths))
            .collect()
    }
}

///
/// RoundReport
///

#[derive(Clone, Debug, Default)]
pub struct RoundReport {
    /// Artifacts that were written successfully, in host order.
    pub written: Vec<GeneratedArtifact>,

    /// Qualified names of artifacts whose write failed.
    pub failed: Vec<String>,
}

impl RoundReport {
    /// Hosts that received an injector this round.
    #[must_use]
    pub fn hosts(&self) -> Vec<TypeRef> {
        self.written.iter().map(|a| a.host.clone()).collect()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.written.is_empty() && self.failed.is_empty()
    }
}

///
/// ViewInjectProcessor
///
/// Round entry point. One call runs
/// `clear -> scan -> populate -> generate all -> write all`.
///

#[derive(Clone, Debug)]
pub struct ViewInjectProcessor {
    options: ProcessorOptions,
    paths: CratePaths,
}

impl ViewInjectProcessor {
    #[must_use]
    pub fn new(options: ProcessorOptions) -> Self {
        let paths = CratePaths::resolve(options.runtime_crate.as_deref());

        Self { options, paths }
    }

    #[must_use]
    pub const fn with_paths(options: ProcessorOptions, paths: CratePaths) -> Self {
        Self { options, paths }
    }

    #[must_use]
    pub const fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    #[must_use]
    pub const fn paths(&self) -> &CratePaths {
        &self.paths
    }

    /// The one marker this processor handles.
    #[must_use]
    pub const fn supported_annotation_types() -> &'static [&'static str] {
        &[crate::MARKER]
    }

    #[must_use]
    pub const fn supported_source_version() -> SourceVersion {
        SourceVersion::latest_supported()
    }

    /// Run one round on a fresh context.
    pub fn process(
        &self,
        round: &RoundEnvironment,
        filer: &mut dyn Filer,
        messager: &mut dyn Messager,
    ) -> RoundReport {
        let mut context = RoundContext::new();

        self.process_in(&mut context, round, filer, messager)
    }

    /// Run one round on a caller-owned context, clearing it first.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(elements = round.elements.len(), over = round.processing_over)
    )]
    pub fn process_in(
        &self,
        context: &mut RoundContext,
        round: &RoundEnvironment,
        filer: &mut dyn Filer,
        messager: &mut dyn Messager,
    ) -> RoundReport {
        tracing::debug!("processing round");
        context.begin();
        context.populate(round, &mut *messager, self.options.deny_duplicate_ids);

        let artifacts = context.generate_all(&self.paths);
        tracing::debug!(models = artifacts.len(), "generated injectors");

        let mut report = RoundReport::default();
        let mut writer = ArtifactWriter::new(filer);

        for artifact in artifacts {
            match writer.write(&artifact, &mut *messager) {
                Ok(()) => report.written.push(artifact),
                Err(err) => report.failed.push(err.name().to_string()),
            }
        }

        report
    }
}

impl Default for ViewInjectProcessor {
    fn default() -> Self {
        Self::new(ProcessorOptions::default())
    }
}

///
/// TESTS
///
