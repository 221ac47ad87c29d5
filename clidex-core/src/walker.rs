//! Depth-first traversal of a host command graph.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    error::{Result, StructuralError},
    host::{Children, CommandKind, HostCommand},
};

/// Controls which parts of the graph [`walk`] visits.
#[derive(Clone, Debug, Default)]
pub struct WalkOptions {
    /// Name used for the root instead of the host's own name.
    pub root_name: Option<String>,
    /// Visit commands the host marks as hidden.
    pub include_hidden: bool,
}

/// A command reached during traversal.
#[derive(Clone, Debug)]
pub struct WalkedNode<C> {
    /// Space-joined path starting with the root name.
    pub path: String,
    /// Distance from the root; the root has depth zero.
    pub depth: usize,
    /// Group or leaf.
    pub kind: CommandKind,
    /// Handle to the host node.
    pub node: C,
}

/// Visits `root` and every descendant in depth-first pre-order.
///
/// The root's path is its resolved name and each child's path appends the
/// child's name. Siblings keep the host's declared order, or are sorted by
/// name when the host reports [`Children::Unordered`].
///
/// # Errors
/// Returns [`StructuralError::MissingRootName`] when neither `options` nor
/// the host names the root, [`StructuralError::UnnamedCommand`] for a child
/// without a name, [`StructuralError::DuplicatePath`] when two commands
/// resolve to the same path and [`StructuralError::Cycle`] when a node is
/// reached twice.
pub fn walk<C: HostCommand>(root: C, options: &WalkOptions) -> Result<Vec<WalkedNode<C>>> {
    let root_name = options
        .root_name
        .clone()
        .and_then(non_blank)
        .or_else(|| root.name().and_then(non_blank))
        .ok_or(StructuralError::MissingRootName)?;

    let mut visited = HashSet::new();
    let mut paths = HashSet::from([root_name.clone()]);
    let mut walked = Vec::new();
    let mut pending = vec![(root_name, 0_usize, root)];

    while let Some((path, depth, node)) = pending.pop() {
        if !visited.insert(node.id()) {
            return Err(StructuralError::Cycle { path });
        }

        let children = ordered(node.children());
        let kind = if children.is_empty() {
            CommandKind::Leaf
        } else {
            CommandKind::Group
        };

        let mut next = Vec::with_capacity(children.len());
        for child in children {
            if child.is_hidden() && !options.include_hidden {
                continue;
            }
            let name = child
                .name()
                .and_then(non_blank)
                .ok_or_else(|| StructuralError::UnnamedCommand {
                    parent: path.clone(),
                })?;
            let child_path = format!("{path} {name}");
            if !paths.insert(child_path.clone()) {
                return Err(StructuralError::DuplicatePath { path: child_path });
            }
            next.push((child_path, depth + 1, child));
        }
        // Reversed so the first declared child is popped first.
        pending.extend(next.into_iter().rev());

        debug!(path = %path, depth, ?kind, "walked command");
        walked.push(WalkedNode {
            path,
            depth,
            kind,
            node,
        });
    }

    Ok(walked)
}

fn ordered<C: HostCommand>(children: Children<C>) -> Vec<C> {
    match children {
        Children::Ordered(children) => children,
        Children::Unordered(mut children) => {
            children.sort_by_cached_key(|child| child.name());
            children
        }
    }
}

fn non_blank(name: String) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
