//! Output resources for generated source.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

///
/// Filer
///
/// Creates the output resource for a generated file. `name` is the
/// `::`-qualified artifact name (`p::Sample$$ViewInject`). A filer must
/// refuse to create the same name twice in one session; that is what
/// makes a stale round visible.
///

pub trait Filer {
    fn create_source_file(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>>;
}

fn already_created(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("source file `{name}` was already created"),
    )
}

///
/// FsFiler
///
/// Writes `<out_dir>/<package dirs>/<Name>.rs`.
///

#[derive(Debug)]
pub struct FsFiler {
    out_dir: PathBuf,
    created: BTreeSet<PathBuf>,
}

impl FsFiler {
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            created: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Filesystem location for an artifact name.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        let mut path = self.out_dir.clone();
        let mut segments: Vec<&str> = name.split("::").filter(|s| !s.is_empty()).collect();
        let file = segments.pop().unwrap_or(name);

        for segment in segments {
            path.push(segment);
        }
        path.push(format!("{file}.rs"));

        path
    }

    /// Every path created so far, in order.
    pub fn created(&self) -> impl Iterator<Item = &Path> {
        self.created.iter().map(PathBuf::as_path)
    }
}

impl Filer for FsFiler {
    fn create_source_file(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        let path = self.path_for(name);
        if self.created.contains(&path) {
            return Err(already_created(name));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        self.created.insert(path);

        Ok(Box::new(file))
    }
}

///
/// MemoryFiler
///
/// Keeps generated files in memory, keyed by artifact name.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryFiler {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryFiler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .get(name)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Filer for MemoryFiler {
    fn create_source_file(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        if self.files.contains_key(name) {
            return Err(already_created(name));
        }

        Ok(Box::new(self.files.entry(name.to_string()).or_default()))
    }
}

///
/// TESTS
///
