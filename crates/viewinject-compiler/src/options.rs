use serde::Deserialize;

/// Default file name of the generated registration table.
pub const DEFAULT_REGISTRY_FILE: &str = "viewinject_registry.rs";

///
/// ProcessorOptions
///
/// Knobs for a processor run. Front ends fill these from their own
/// configuration (derive attributes, `viewinject.toml`).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessorOptions {
    /// Path generated code uses to reach the runtime crate.
    pub runtime_crate: Option<String>,

    /// Report an error when two fields of one host share a bind id.
    /// The later field still wins.
    pub deny_duplicate_ids: bool,

    /// Emit the name -> factory registration table.
    pub emit_registry: bool,

    pub registry_file: String,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            runtime_crate: None,
            deny_duplicate_ids: false,
            emit_registry: true,
            registry_file: DEFAULT_REGISTRY_FILE.to_string(),
        }
    }
}
