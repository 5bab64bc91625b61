//! The scan engine: depth-bounded, cycle-safe recursive discovery
//!
//! One [`ScanSession`] owns every piece of mutable state — the scheduled
//! set, the per-file import cache, and the ignored-specifier set — so
//! independent scans never observe each other.

use crate::config::{AliasConfig, ScanOptions};
use crate::error::ScanError;
use crate::filter::ScanFilters;
use crate::imports::{self, SourceFlavor};
use crate::info;
use crate::locate;
use crate::resolve;
use crate::tsconfig;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use trellis_core::{EdgeData, Graph, Node, PathObj, dirname, relative_to};

/// Everything one scan produces.
#[derive(Debug)]
pub struct ScanOutcome {
    /// File-to-file dependency graph.
    pub files: Graph,
    /// Folder-to-folder graph, built during the same pass.
    pub folders: Graph,
    /// Import specifiers that resolved to nothing, for diagnostics.
    pub ignored: Vec<String>,
}

/// Run a full scan for `options`.
pub fn start_scan(options: &ScanOptions, filters: &ScanFilters) -> Result<ScanOutcome, ScanError> {
    let single_file_start = Path::new(&options.start).is_file();
    if options.show_path_to.is_some() && !single_file_start {
        return Err(ScanError::PathToNeedsFile);
    }

    let start_files = locate::list_source_files(&options.start, &options.extensions)?;
    tracing::debug!(start = %options.start, files = start_files.len(), "expanded start locator");

    let aliases = if options.aliases.is_empty() {
        let anchor = start_files
            .first()
            .and_then(|f| Path::new(f).parent())
            .unwrap_or_else(|| Path::new("."));
        tsconfig::load_alias_config(anchor).unwrap_or_default()
    } else {
        options.aliases.clone()
    };

    let mut session = ScanSession {
        options,
        filters,
        aliases,
        scheduled: HashSet::new(),
        import_cache: HashMap::new(),
        ignored: BTreeSet::new(),
    };
    let mut files_graph = Graph::new();
    let mut folders_graph = Graph::new();

    let roots: Vec<PathObj> = start_files.into_iter().map(PathObj::new).collect();
    for root in &roots {
        session.scheduled.insert(root.norm.clone());
    }
    for root in &roots {
        session.check_file(root, &mut files_graph, &mut folders_graph, 0)?;
    }

    for specifier in &session.ignored {
        tracing::debug!(specifier = %specifier, "ignored unresolved import");
    }

    Ok(ScanOutcome {
        files: files_graph,
        folders: folders_graph,
        ignored: session.ignored.into_iter().collect(),
    })
}

struct ScanSession<'a> {
    options: &'a ScanOptions,
    filters: &'a ScanFilters,
    aliases: AliasConfig,
    /// Files already scheduled for expansion; first discovery wins.
    scheduled: HashSet<String>,
    /// Resolved imports per normalized file path.
    import_cache: HashMap<String, Vec<PathObj>>,
    /// Specifiers that resolved to nothing.
    ignored: BTreeSet<String>,
}

impl ScanSession<'_> {
    fn check_file(
        &mut self,
        file: &PathObj,
        files: &mut Graph,
        folders: &mut Graph,
        depth: usize,
    ) -> Result<(), ScanError> {
        if self.filters.excludes_node(&file.norm) {
            tracing::debug!(file = %file.norm, "source file excluded by filter");
            return Ok(());
        }

        let source_info = info::folder_info(Path::new(&file.orig));
        let source_rel = relative_to(&self.options.base_path, &file.norm);
        let source_folder = dirname(&source_rel);

        if depth == 0 {
            let idx = files.add_node(Node::new(source_rel.clone(), source_info.layer));
            files.mark_start(idx);
        }

        let imports = self.imports_for(file)?;
        let mut next_level: Vec<PathObj> = Vec::new();
        for import in imports {
            if self.filters.excludes_node(&import.norm) {
                tracing::debug!(import = %import.norm, "import excluded by filter");
                continue;
            }
            if let Some(filter) = self.filters.excluding_edge_filter(&file.norm, &import.norm) {
                tracing::debug!(
                    from = %file.norm,
                    to = %import.norm,
                    filter = %filter,
                    "edge excluded by filter"
                );
                continue;
            }

            let import_info = info::folder_info(Path::new(&import.orig));
            if !self.scheduled.contains(&import.norm) {
                self.scheduled.insert(import.norm.clone());
                next_level.push(import.clone());
            }

            let import_rel = relative_to(&self.options.base_path, &import.norm);
            files.add_edge(
                Node::new(source_rel.clone(), source_info.layer),
                Node::new(import_rel.clone(), import_info.layer),
                EdgeData::default(),
            );

            let import_folder = dirname(&import_rel);
            if source_folder != import_folder {
                let folder_edge = folders.add_edge(
                    Node::new(source_folder.clone(), source_info.layer),
                    Node::new(import_folder, import_info.layer),
                    EdgeData::default(),
                );
                if depth == 0 {
                    if let Some((from, _)) = folders.edge_endpoints(folder_edge) {
                        folders.mark_start(from);
                    }
                }
            }
        }

        if depth + 1 == self.options.max_depth.unwrap_or(usize::MAX) {
            tracing::debug!(file = %file.norm, depth, "reached max depth");
            return Ok(());
        }
        for file in next_level {
            self.check_file(&file, files, folders, depth + 1)?;
        }
        Ok(())
    }

    /// Resolved imports of `file`, computed once per session.
    ///
    /// A read failure here is fatal: a scheduled file is expected to exist.
    fn imports_for(&mut self, file: &PathObj) -> Result<Vec<PathObj>, ScanError> {
        if let Some(cached) = self.import_cache.get(&file.norm) {
            return Ok(cached.clone());
        }
        let content = std::fs::read_to_string(&file.orig).map_err(|source| ScanError::Io {
            path: file.orig.clone(),
            source,
        })?;
        let specifiers = imports::list_import_specifiers(&content, SourceFlavor::from_path(&file.orig));
        tracing::debug!(file = %file.norm, specifiers = specifiers.len(), "listed imports");

        let mut resolved = Vec::new();
        for specifier in specifiers {
            match resolve::resolve(&specifier, &file.orig, &self.aliases, &self.options.extensions) {
                Some(path) => resolved.push(path),
                None => {
                    self.ignored.insert(specifier);
                }
            }
        }
        self.import_cache.insert(file.norm.clone(), resolved.clone());
        Ok(resolved)
    }
}
