//! Source walker: builds the element model from a crate's `src/` tree.
//!
//! Only marked declarations become elements. Types that derive
//! `ViewInject` get their injector from the derive, so the walker records
//! them for the registration table and leaves their fields alone.
//!
//! Module declarations are tracked as well: a host only gets a registration
//! entry when the crate root can name it, gated by the `#[cfg]`s on the way.

use proc_macro2::Span;
use quote::ToTokens;
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    fs, io,
    path::{Path, PathBuf},
};
use syn::{
    Attribute, ImplItem, Item, ItemEnum, ItemStruct, Path as SynPath, Token,
    punctuated::Punctuated, spanned::Spanned,
};
use viewinject_compiler::{
    attr::bind_annotation,
    codegen::Registration,
    diagnostic::{Level, Messager},
    element::{
        Annotation, Element, ElementId, ElementKind, ElementRef, RoundEnvironment, TypeRef,
        Visibility,
    },
    report,
};

///
/// Location
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    fn new(file: &Path, span: Span) -> Self {
        let start = span.start();

        Self {
            file: file.to_path_buf(),
            line: start.line,
            column: start.column + 1,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

///
/// Reach
///
/// How a declaration looks from its parent module: whether it is private,
/// and the `#[cfg]` attributes gating it.
///

#[derive(Clone, Debug, Default)]
struct Reach {
    private: bool,
    cfg: Vec<Attribute>,
}

impl Reach {
    fn new(vis: &syn::Visibility, attrs: &[Attribute]) -> Self {
        Self {
            private: Visibility::from(vis).is_private(),
            cfg: attrs
                .iter()
                .filter(|attr| attr.path().is_ident("cfg"))
                .cloned()
                .collect(),
        }
    }
}

#[derive(Clone, Debug)]
struct HostDecl {
    id: ElementId,
    reach: Reach,
}

enum Unreachable {
    Undeclared(String),
    Hidden(String),
}

///
/// SourceSet
///
/// Everything the walker found: marked elements, hosts handled by the
/// derive, and the source location behind every element id.
///

#[derive(Debug, Default)]
pub struct SourceSet {
    pub elements: Vec<Element>,
    pub derived: Vec<TypeRef>,
    pub files: Vec<PathBuf>,
    locations: BTreeMap<ElementId, Location>,
    modules: BTreeMap<String, Reach>,
    hosts: BTreeMap<TypeRef, HostDecl>,
    registrations: BTreeMap<TypeRef, Registration>,
}

impl SourceSet {
    #[must_use]
    pub fn location(&self, id: ElementId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Registration table entry for `host`, if the crate root can name it.
    #[must_use]
    pub fn registration(&self, host: &TypeRef) -> Option<&Registration> {
        self.registrations.get(host)
    }

    /// The round these sources make visible.
    #[must_use]
    pub fn round(&self) -> RoundEnvironment {
        RoundEnvironment::new(self.elements.clone())
    }

    fn allocate(&mut self, file: &Path, span: Span) -> ElementId {
        let id = ElementId(self.locations.len());
        self.locations.insert(id, Location::new(file, span));

        id
    }

    fn visit_items(
        &mut self,
        file: &Path,
        module: &str,
        items: &[Item],
        messager: &mut dyn Messager,
    ) {
        for item in items {
            match item {
                Item::Struct(item) => self.visit_struct(file, module, item, messager),
                Item::Enum(item) => self.visit_enum(file, module, item, messager),
                Item::Fn(item) => {
                    let ident = &item.sig.ident;
                    self.visit_marked(file, &item.attrs, ident, ElementKind::Function, messager);
                }
                Item::Const(item) => {
                    self.visit_marked(file, &item.attrs, &item.ident, ElementKind::Const, messager);
                }
                Item::Static(item) => {
                    self.visit_marked(file, &item.attrs, &item.ident, ElementKind::Static, messager);
                }
                Item::Type(item) => {
                    self.visit_marked(file, &item.attrs, &item.ident, ElementKind::Other, messager);
                }
                Item::Impl(item) => {
                    for impl_item in &item.items {
                        match impl_item {
                            ImplItem::Fn(f) => self.visit_marked(
                                file,
                                &f.attrs,
                                &f.sig.ident,
                                ElementKind::Method,
                                messager,
                            ),
                            ImplItem::Const(c) => self.visit_marked(
                                file,
                                &c.attrs,
                                &c.ident,
                                ElementKind::Const,
                                messager,
                            ),
                            _ => {}
                        }
                    }
                }
                Item::Mod(item) => {
                    let inner = join_module(module, &item.ident.to_string());
                    self.modules
                        .insert(inner.clone(), Reach::new(&item.vis, &item.attrs));

                    if let Some((_, content)) = &item.content {
                        self.visit_items(file, &inner, content, messager);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_struct(
        &mut self,
        file: &Path,
        module: &str,
        item: &ItemStruct,
        messager: &mut dyn Messager,
    ) {
        let host = TypeRef::new(module, item.ident.to_string());

        if derives(&item.attrs, "ViewInject") {
            // the registration table refers to the host by path
            let nameable = syn::parse_str::<SynPath>(&host.qualified_name()).is_ok();
            if item.generics.params.is_empty() && nameable {
                self.declare_host(file, &host, item);
                self.derived.push(host);
            }
            return;
        }

        self.visit_marked(file, &item.attrs, &item.ident, ElementKind::Struct, messager);

        let marked: Vec<_> = item
            .fields
            .iter()
            .enumerate()
            .filter_map(|(index, field)| {
                self.marker(file, &field.attrs, messager)
                    .map(|annotation| (index, field, annotation))
            })
            .collect();

        if marked.is_empty() {
            return;
        }

        if !item.generics.params.is_empty() {
            let id = self.allocate(file, item.ident.span());
            report!(
                messager,
                Level::Error,
                ElementRef::new(id, host.qualified_name()),
                "`#[bind]` fields are not supported on generic type `{host}`"
            );
            return;
        }

        self.declare_host(file, &host, item);

        for (index, field, annotation) in marked {
            let name = field
                .ident
                .as_ref()
                .map_or_else(|| index.to_string(), ToString::to_string);
            let declared_type = field.ty.to_token_stream().to_string();
            let id = self.allocate(file, field.span());

            let visibility = Visibility::from(&field.vis);
            let element = Element::field(id, &host, name, declared_type, visibility)
                .with_annotation(annotation);
            self.elements.push(element);
        }
    }

    fn declare_host(&mut self, file: &Path, host: &TypeRef, item: &ItemStruct) {
        let id = self.allocate(file, item.ident.span());
        let reach = Reach::new(&item.vis, &item.attrs);

        self.hosts.insert(host.clone(), HostDecl { id, reach });
    }

    // resolve
    // runs once every file is walked, since parents may be visited after children
    fn resolve(&mut self, messager: &mut dyn Messager) {
        let mut registrations = BTreeMap::new();

        for (host, decl) in &self.hosts {
            match self.reach(host, decl) {
                Ok(cfg) => {
                    let entry = Registration::new(host.clone()).with_cfg(cfg);
                    registrations.insert(host.clone(), entry);
                }
                Err(Unreachable::Undeclared(module)) => {
                    tracing::debug!(
                        %host,
                        %module,
                        "module is never declared, host not registered"
                    );
                }
                Err(Unreachable::Hidden(what)) => report!(
                    messager,
                    Level::Warning,
                    ElementRef::new(decl.id, host.qualified_name()),
                    "`{host}` is left out of the registration table: {what} is not visible from the crate root"
                ),
            }
        }

        self.registrations = registrations;
    }

    // reach
    // the crate root sees its own private items, nothing deeper
    fn reach(&self, host: &TypeRef, decl: &HostDecl) -> Result<Vec<Attribute>, Unreachable> {
        let mut cfg = Vec::new();
        let mut module = String::new();

        let segments = host.package.split("::").filter(|segment| !segment.is_empty());
        for (depth, segment) in segments.enumerate() {
            module = join_module(&module, segment);
            let reach = self
                .modules
                .get(&module)
                .ok_or_else(|| Unreachable::Undeclared(module.clone()))?;

            if depth > 0 && reach.private {
                return Err(Unreachable::Hidden(format!("module `{module}`")));
            }
            cfg.extend(reach.cfg.iter().cloned());
        }

        if !host.package.is_empty() && decl.reach.private {
            return Err(Unreachable::Hidden(format!("type `{host}`")));
        }
        cfg.extend(decl.reach.cfg.iter().cloned());

        Ok(cfg)
    }

    fn visit_enum(
        &mut self,
        file: &Path,
        module: &str,
        item: &ItemEnum,
        messager: &mut dyn Messager,
    ) {
        let host = TypeRef::new(module, item.ident.to_string());

        self.visit_marked(file, &item.attrs, &item.ident, ElementKind::Enum, messager);

        for variant in &item.variants {
            if let Some(annotation) = self.marker(file, &variant.attrs, messager) {
                let id = self.allocate(file, variant.ident.span());
                let element = Element {
                    enclosing: Some(host.clone()),
                    ..Element::new(id, variant.ident.to_string(), ElementKind::Variant)
                };
                self.elements.push(element.with_annotation(annotation));
            }

            // variant fields have no host the injector could assign through
            for (index, field) in variant.fields.iter().enumerate() {
                if let Some(annotation) = self.marker(file, &field.attrs, messager) {
                    let name = field
                        .ident
                        .as_ref()
                        .map_or_else(|| index.to_string(), ToString::to_string);
                    let id = self.allocate(file, field.span());
                    let element = Element {
                        visibility: Visibility::Public,
                        ..Element::new(id, format!("{}::{name}", variant.ident), ElementKind::Field)
                    };
                    self.elements.push(element.with_annotation(annotation));
                }
            }
        }
    }

    fn visit_marked(
        &mut self,
        file: &Path,
        attrs: &[Attribute],
        ident: &syn::Ident,
        kind: ElementKind,
        messager: &mut dyn Messager,
    ) {
        if let Some(annotation) = self.marker(file, attrs, messager) {
            let id = self.allocate(file, ident.span());
            self.elements
                .push(Element::new(id, ident.to_string(), kind).with_annotation(annotation));
        }
    }

    // marker
    // a malformed marker is reported here and the declaration treated as unmarked
    fn marker(
        &mut self,
        file: &Path,
        attrs: &[Attribute],
        messager: &mut dyn Messager,
    ) -> Option<Annotation> {
        match bind_annotation(attrs) {
            Ok(annotation) => annotation,
            Err(err) => {
                let id = self.allocate(file, err.span());
                report!(
                    messager,
                    Level::Error,
                    ElementRef::new(id, file.display().to_string()),
                    "{err}"
                );
                None
            }
        }
    }
}

/// Walk every `.rs` file under `src_dir`.
///
/// Files that do not parse are reported as warnings and skipped; only an IO
/// failure stops the walk.
pub fn walk_sources(src_dir: &Path, messager: &mut dyn Messager) -> io::Result<SourceSet> {
    let mut set = SourceSet::default();

    for file in source_files(src_dir)? {
        let Some(module) = module_path(src_dir, &file) else {
            continue;
        };
        let text = fs::read_to_string(&file)?;

        match syn::parse_file(&text) {
            Ok(parsed) => set.visit_items(&file, &module, &parsed.items, messager),
            Err(err) => {
                let id = set.allocate(&file, err.span());
                report!(
                    messager,
                    Level::Warning,
                    ElementRef::new(id, file.display().to_string()),
                    "skipping source that does not parse: {err}"
                );
            }
        }

        set.files.push(file);
    }

    set.resolve(messager);

    tracing::debug!(
        files = set.files.len(),
        elements = set.elements.len(),
        derived = set.derived.len(),
        registered = set.registrations.len(),
        "walked sources"
    );

    Ok(set)
}

/// Module path of `file` relative to the crate's `src_dir`.
///
/// `lib.rs`/`main.rs` are the crate root and `mod.rs` names its directory.
/// Files under `src/bin` belong to other crates and yield `None`.
#[must_use]
pub fn module_path(src_dir: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(src_dir).ok()?.with_extension("");
    let mut segments: Vec<String> = relative
        .iter()
        .map(|segment| segment.to_string_lossy().into_owned())
        .collect();

    if segments.first().is_some_and(|first| first == "bin") {
        return None;
    }

    match segments.last().map(String::as_str) {
        Some("mod") => {
            segments.pop();
        }
        Some("lib" | "main") if segments.len() == 1 => {
            segments.pop();
        }
        _ => {}
    }

    Some(segments.join("::"))
}

fn join_module(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}::{child}")
    }
}

// source_files
// sorted so element ids and generated output are stable across runs
fn source_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();

            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }

    files.sort();

    Ok(files)
}

fn derives(attrs: &[Attribute], name: &str) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .any(|attr| {
            attr.parse_args_with(Punctuated::<SynPath, Token![,]>::parse_terminated)
                .is_ok_and(|paths| {
                    paths
                        .iter()
                        .any(|path| path.segments.last().is_some_and(|s| s.ident == name))
                })
        })
}

///
/// TESTS
///
