//! Build-script front end for viewinject.
//!
//! Walks the crate's sources with `syn`, runs injector generation into
//! `OUT_DIR` and writes the `register_injectors` table:
//!
//! ```ignore
//! // build.rs
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     viewinject_build::build!();
//!     Ok(())
//! }
//!
//! // src/lib.rs
//! include!(concat!(env!("OUT_DIR"), "/viewinject_registry.rs"));
//! ```

mod builder;
mod config;
mod macros;
mod messager;
mod walk;

pub use builder::{BuildError, BuildReport, Builder};
pub use config::{CONFIG_FILE, ConfigError, load_config, parse_config};
pub use messager::CargoMessager;
pub use walk::{Location, SourceSet, module_path, walk_sources};
