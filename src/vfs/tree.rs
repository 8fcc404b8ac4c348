//! Directory tree synthesized from flat record paths.
//!
//! Nodes live in an arena and refer to each other by index. The tree is built
//! once and never changes afterwards.

use super::record::{FileRecord, ModTime};
use crate::error::VfsError;
use crate::path::is_canonical;
use std::collections::BTreeMap;

pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

#[derive(Debug)]
pub(crate) enum NodeKind<'a> {
    /// Children keyed by name, which keeps listings lexicographic.
    Dir { children: BTreeMap<&'a str, NodeId> },
    /// Index into the record slice.
    File { record: usize },
}

#[derive(Debug)]
pub(crate) struct Node<'a> {
    pub name: &'a str,
    /// Own time for files, newest time below for directories.
    pub mod_time: ModTime,
    pub kind: NodeKind<'a>,
}

#[derive(Debug)]
pub(crate) struct Tree<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> Tree<'a> {
    pub fn build(records: &'a [FileRecord<'a>]) -> Result<Self, VfsError> {
        let mut tree = Tree {
            nodes: vec![Node {
                name: ".",
                mod_time: ModTime::default(),
                kind: NodeKind::Dir {
                    children: BTreeMap::new(),
                },
            }],
        };
        for (index, record) in records.iter().enumerate() {
            tree.insert(index, record)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, index: usize, record: &'a FileRecord<'a>) -> Result<(), VfsError> {
        if !is_canonical(record.path) {
            return Err(VfsError::CorruptManifest(format!(
                "record {} has non-canonical path {:?}",
                index, record.path
            )));
        }
        record.check_sizes().map_err(VfsError::CorruptManifest)?;

        let mut segments: Vec<&'a str> = record.path.split('/').collect();
        let leaf = match segments.pop() {
            Some(leaf) => leaf,
            None => {
                return Err(VfsError::CorruptManifest(format!(
                    "record {} has an empty path",
                    index
                )))
            }
        };

        let mut parent = ROOT;
        self.touch(parent, record.mod_time);
        for name in segments {
            parent = match self.child(parent, name) {
                Some(id) => match self.nodes[id].kind {
                    NodeKind::Dir { .. } => id,
                    NodeKind::File { .. } => {
                        return Err(VfsError::CorruptManifest(format!(
                            "{} needs {:?} to be a directory but it is a file",
                            record.path, name
                        )))
                    }
                },
                None => self.push(
                    parent,
                    name,
                    NodeKind::Dir {
                        children: BTreeMap::new(),
                    },
                ),
            };
            self.touch(parent, record.mod_time);
        }

        if let Some(existing) = self.child(parent, leaf) {
            let reason = match self.nodes[existing].kind {
                NodeKind::Dir { .. } => "is both a file and a directory",
                NodeKind::File { .. } => "appears more than once",
            };
            return Err(VfsError::CorruptManifest(format!(
                "{} {}",
                record.path, reason
            )));
        }
        let id = self.push(parent, leaf, NodeKind::File { record: index });
        self.nodes[id].mod_time = record.mod_time;
        Ok(())
    }

    fn push(&mut self, parent: NodeId, name: &'a str, kind: NodeKind<'a>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            name,
            mod_time: ModTime::default(),
            kind,
        });
        if let NodeKind::Dir { children } = &mut self.nodes[parent].kind {
            children.insert(name, id);
        }
        id
    }

    fn touch(&mut self, id: NodeId, mod_time: ModTime) {
        let node = &mut self.nodes[id];
        if mod_time > node.mod_time {
            node.mod_time = mod_time;
        }
    }

    fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        match &self.nodes[parent].kind {
            NodeKind::Dir { children } => children.get(name).copied(),
            NodeKind::File { .. } => None,
        }
    }

    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id]
    }

    /// Walk `segments` from the root.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<NodeId> {
        segments
            .iter()
            .try_fold(ROOT, |id, segment| self.child(id, segment.as_ref()))
    }

    /// Immediate children of a directory, ordered by name.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let children = match &self.nodes[id].kind {
            NodeKind::Dir { children } => Some(children.values().copied()),
            NodeKind::File { .. } => None,
        };
        children.into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
