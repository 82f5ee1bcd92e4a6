//! Family tree service
//!
//! Owns the loaded relationship graph and answers name-based queries for the
//! CLI. The graph is only replaced by a successful load.

use std::path::{Path, PathBuf};

use termtree::Tree;
use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::domain::{DescendantTree, FamilyGraph, LoadOptions, MemberId, TreeLoader};

/// Query facade over one loaded family tree.
#[derive(Debug, Default)]
pub struct FamilyTree {
    graph: FamilyGraph,
    loader: TreeLoader,
    source: Option<PathBuf>,
    loaded: bool,
}

impl FamilyTree {
    /// Create an empty tree that loads with `options`.
    pub fn new(options: LoadOptions) -> Self {
        Self {
            graph: FamilyGraph::new(),
            loader: TreeLoader::new(options),
            source: None,
            loaded: false,
        }
    }

    /// Load the tree from `path`, replacing any previous contents.
    ///
    /// On failure the tree is left empty.
    #[instrument(level = "debug", skip(self))]
    pub fn initialize(&mut self, path: &Path) -> ApplicationResult<()> {
        self.reset();
        let graph = self.loader.build_from_file(path)?;
        info!(
            "loaded {} family members from {}",
            graph.registry().len(),
            path.display()
        );
        self.graph = graph;
        self.source = Some(path.to_path_buf());
        self.loaded = true;
        Ok(())
    }

    /// Load the tree from in-memory text, replacing any previous contents.
    pub fn load_from_str(&mut self, content: &str) -> ApplicationResult<()> {
        self.reset();
        self.graph = self.loader.build_from_str(content)?;
        self.loaded = true;
        Ok(())
    }

    fn reset(&mut self) {
        self.graph = FamilyGraph::new();
        self.source = None;
        self.loaded = false;
    }

    /// True after a successful load, even when the input declared no members.
    pub fn is_initialized(&self) -> bool {
        self.loaded
    }

    /// File the current tree was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn graph(&self) -> &FamilyGraph {
        &self.graph
    }

    pub fn family_members_name_list(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.graph.all_member_names())
    }

    pub fn count_siblings(&self, name: &str) -> ApplicationResult<usize> {
        Ok(self.graph.siblings_of(name)?.len())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn grandparent_name_list(&self, name: &str) -> ApplicationResult<Vec<String>> {
        let grandparents = self.graph.grandparents_of(name)?;
        debug!("{} has {} grandparent entries", name, grandparents.len());
        Ok(self.names(grandparents))
    }

    pub fn parent_name_list(&self, name: &str) -> ApplicationResult<Vec<String>> {
        Ok(self.names(self.graph.parents_of(name)?))
    }

    pub fn children_name_list(&self, name: &str) -> ApplicationResult<Vec<String>> {
        Ok(self.names(self.graph.children_of(name)?))
    }

    pub fn sibling_name_list(&self, name: &str) -> ApplicationResult<Vec<String>> {
        Ok(self.names(self.graph.siblings_of(name)?))
    }

    pub fn members_with_child_count(&self, count: usize) -> ApplicationResult<Vec<String>> {
        Ok(self.graph.members_with_child_count_equal_to(count))
    }

    pub fn members_with_sibling_count(&self, count: usize) -> ApplicationResult<Vec<String>> {
        Ok(self.graph.members_with_sibling_count_equal_to(count))
    }

    pub fn members_with_most_grandchildren(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.graph.members_with_most_grandchildren())
    }

    /// Descendants of `name` rendered as a tree.
    pub fn descendant_tree(&self, name: &str) -> ApplicationResult<Tree<String>> {
        let root = self.graph.resolve(name)?;
        Ok(self.graph.descendant_tree(root))
    }

    /// Descendants of every member without parents.
    pub fn forest(&self) -> Vec<Tree<String>> {
        self.graph.forest()
    }

    fn names(&self, ids: Vec<MemberId>) -> Vec<String> {
        ids.into_iter()
            .map(|id| self.graph.name_of(id).to_string())
            .collect()
    }
}
