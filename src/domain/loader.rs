//! Tree loader: builds a [`FamilyGraph`] from the line-oriented text format.
//!
//! ```text
//! MEMBERS:Nancy:Carl:Jill:Adam
//! PARENT:Nancy:_:Carl:Jill:Adam
//! SIBLINGS:Carl:Jill:Adam
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::graph::{FamilyGraph, Relationship};

const FIELD_SEPARATOR: char = ':';

/// What the loader does with a relationship between a member and itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfLinkPolicy {
    /// Abort the load with an input format error.
    #[default]
    Reject,
    /// Drop the self link, log a warning and keep loading.
    Skip,
}

impl fmt::Display for SelfLinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelfLinkPolicy::Reject => write!(f, "reject"),
            SelfLinkPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for SelfLinkPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(SelfLinkPolicy::Reject),
            "skip" => Ok(SelfLinkPolicy::Skip),
            other => Err(DomainError::InvalidArgument(format!(
                "unknown self link policy: {other} (expected reject or skip)"
            ))),
        }
    }
}

/// Loader settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub self_links: SelfLinkPolicy,
    /// Lines starting with any of these (after leading whitespace) are ignored.
    pub comment_prefixes: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            self_links: SelfLinkPolicy::default(),
            comment_prefixes: vec!["#".into(), "/".into()],
        }
    }
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Record<'a> {
    Members(Vec<&'a str>),
    Parent {
        parent: &'a str,
        children: Vec<&'a str>,
    },
    Siblings(Vec<&'a str>),
}

impl<'a> Record<'a> {
    fn parse(line: &'a str) -> Result<Self, String> {
        let mut fields = line.split(FIELD_SEPARATOR).map(str::trim);
        let kind = fields.next().unwrap_or_default();
        match kind {
            "MEMBERS" => Ok(Record::Members(fields.collect())),
            // PARENT reserves one unused field between the parent and its children
            "PARENT" => {
                let parent = Self::parent_field(fields.next(), kind)?;
                let children = fields.skip(1).collect();
                Ok(Record::Parent { parent, children })
            }
            "CHILDREN" => {
                let parent = Self::parent_field(fields.next(), kind)?;
                Ok(Record::Parent {
                    parent,
                    children: fields.collect(),
                })
            }
            "SIBLINGS" => Ok(Record::Siblings(fields.collect())),
            other => Err(format!("unrecognized record type: {other:?}")),
        }
    }

    fn parent_field(field: Option<&'a str>, kind: &str) -> Result<&'a str, String> {
        match field {
            Some(parent) if !parent.is_empty() => Ok(parent),
            _ => Err(format!("{kind} record without a parent name")),
        }
    }
}

/// Constructs family graphs from text input.
#[derive(Debug, Default)]
pub struct TreeLoader {
    options: LoadOptions,
}

impl TreeLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Load a graph from a file.
    ///
    /// Fails with [`DomainError::InputFileOpen`] before any parsing when the
    /// file cannot be opened.
    #[instrument(level = "debug", skip(self))]
    pub fn build_from_file(&self, path: &Path) -> DomainResult<FamilyGraph> {
        let file = File::open(path).map_err(|source| DomainError::InputFileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| DomainError::InputRead {
                path: path.to_path_buf(),
                source,
            })?;
        self.build_from_source(lines)
    }

    pub fn build_from_str(&self, content: &str) -> DomainResult<FamilyGraph> {
        self.build_from_source(content.lines())
    }

    /// Build a graph from input lines.
    ///
    /// The first failing line aborts the load; no partially built graph is
    /// returned.
    #[instrument(level = "debug", skip_all)]
    pub fn build_from_source<I, S>(&self, lines: I) -> DomainResult<FamilyGraph>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = FamilyGraph::new();

        for (idx, raw) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            let line = raw.as_ref().trim();
            if line.is_empty() || self.is_comment(line) {
                continue;
            }

            let record = Record::parse(line).map_err(|reason| DomainError::InputFormat {
                line: line_no,
                reason,
            })?;
            self.apply(&mut graph, record, line_no)?;
        }

        debug!(
            "loaded {} members and {} edges",
            graph.registry().len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn is_comment(&self, line: &str) -> bool {
        self.options
            .comment_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && line.starts_with(prefix.as_str()))
    }

    fn apply(
        &self,
        graph: &mut FamilyGraph,
        record: Record<'_>,
        line: usize,
    ) -> DomainResult<()> {
        match record {
            Record::Members(names) => {
                debug!("line {}: adding {} family members", line, names.len());
                for name in names {
                    graph.add_member(name).map_err(|e| at_line(line, e))?;
                }
            }
            Record::Parent { parent, children } => {
                debug!(
                    "line {}: adding {} children of {}",
                    line,
                    children.len(),
                    parent
                );
                graph.resolve(parent).map_err(|e| at_line(line, e))?;
                for child in children {
                    let kind = Relationship::ParentChild;
                    if self.skip_self_link(graph, parent, child, kind, line)? {
                        continue;
                    }
                    graph
                        .link_parent_child(parent, child)
                        .map_err(|e| at_line(line, e))?;
                }
            }
            Record::Siblings(names) => {
                debug!("line {}: adding sibling group of {}", line, names.len());
                for name in &names {
                    graph.resolve(name).map_err(|e| at_line(line, e))?;
                }
                for (i, &from) in names.iter().enumerate() {
                    for (j, &to) in names.iter().enumerate() {
                        let kind = Relationship::Sibling;
                        if i == j || self.skip_self_link(graph, from, to, kind, line)? {
                            continue;
                        }
                        graph
                            .add_edge(from, to, Relationship::Sibling)
                            .map_err(|e| at_line(line, e))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// True when `from == to` and the policy says to drop it. The member must
    /// still exist.
    fn skip_self_link(
        &self,
        graph: &FamilyGraph,
        from: &str,
        to: &str,
        kind: Relationship,
        line: usize,
    ) -> DomainResult<bool> {
        if from != to || self.options.self_links == SelfLinkPolicy::Reject {
            return Ok(false);
        }
        graph.resolve(from).map_err(|e| at_line(line, e))?;
        warn!(
            "line {}: skipping {} relationship of {} with itself",
            line, kind, from
        );
        Ok(true)
    }
}

/// Attach the input line to an error raised while applying a record.
fn at_line(line: usize, err: DomainError) -> DomainError {
    match err {
        DomainError::MemberNotFound(name) => DomainError::TreeConstruction { line, name },
        other => DomainError::InputFormat {
            line,
            reason: other.to_string(),
        },
    }
}
