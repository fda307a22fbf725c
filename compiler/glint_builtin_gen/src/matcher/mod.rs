//! Deterministic name-to-range dispatch.
//!
//! Compiles the finite builtin name set into a decision tree that
//! discriminates first on byte length, then byte-by-byte at the positions
//! where the remaining candidates diverge. Lookup cost is proportional to
//! the query string's length, independent of how many names exist.
//!
//! The same tree both answers lookups in process and renders the generated
//! `lookup_builtin` function, so the dispatch semantics are testable
//! without compiling emitted code. Construction sorts every ordering it
//! introduces (group lengths, branch bytes), making the rendered text
//! byte-for-byte reproducible across runs.

use rustc_hash::FxHashSet;

use crate::writer::{byte_lit, byte_str_lit, SourceWriter};
use crate::GenError;

/// A `(start, count)` window into the emitted builtin table.
///
/// `start` is 1-based; `(0, 0)` is the not-a-builtin sentinel.
pub type Window = (u16, u16);

#[derive(Debug)]
enum Node {
    /// Single candidate left: compare the still-unverified suffix.
    Leaf {
        pos: usize,
        suffix: Vec<u8>,
        window: Window,
    },
    /// Verify the shared bytes `prefix` starting at `pos`, then branch on
    /// the byte where the candidates diverge.
    Branch {
        pos: usize,
        prefix: Vec<u8>,
        arms: Vec<(u8, Node)>,
    },
}

/// Decision tree over a fixed name set.
#[derive(Debug)]
pub struct DispatchTree {
    /// Length groups in ascending length order.
    groups: Vec<(usize, Node)>,
}

impl DispatchTree {
    /// Build the dispatch tree for `names`, given in table order.
    ///
    /// Fails on an empty set (a database with no builtin names is a
    /// configuration error, not a silent no-op) and on repeated names:
    /// duplicates have no divergence point to branch on.
    pub fn build(names: &[(String, Window)]) -> Result<Self, GenError> {
        if names.is_empty() {
            return Err(GenError::NoBuiltins);
        }
        let mut seen = FxHashSet::default();
        for (name, _) in names {
            if !seen.insert(name.as_str()) {
                return Err(GenError::DuplicateName { name: name.clone() });
            }
        }

        let mut by_len: Vec<(usize, Vec<(&[u8], Window)>)> = Vec::new();
        for (name, window) in names {
            let bytes = name.as_bytes();
            match by_len.iter_mut().find(|(len, _)| *len == bytes.len()) {
                Some((_, group)) => group.push((bytes, *window)),
                None => by_len.push((bytes.len(), vec![(bytes, *window)])),
            }
        }
        by_len.sort_by_key(|(len, _)| *len);

        let groups = by_len
            .into_iter()
            .map(|(len, group)| (len, build_node(0, group)))
            .collect();
        Ok(Self { groups })
    }

    /// Resolve `name`, returning the sentinel for unknown names.
    pub fn lookup(&self, name: &str) -> Window {
        let bytes = name.as_bytes();
        match self.groups.iter().find(|(len, _)| *len == bytes.len()) {
            Some((_, node)) => lookup_node(node, bytes),
            None => (0, 0),
        }
    }

    /// Render the generated `lookup_builtin` function into `w`.
    pub fn emit_lookup_fn(&self, w: &mut SourceWriter) {
        w.line("/// Map a builtin name to its `(start, count)` window in `BUILTIN_TABLE`.");
        w.line("///");
        w.line("/// `start` is 1-based; `(0, 0)` means the name is not a builtin.");
        w.line("pub fn lookup_builtin(name: &str) -> (u16, u16) {");
        w.indent();
        w.line("let bytes = name.as_bytes();");
        w.line("match bytes.len() {");
        w.indent();
        for (len, node) in &self.groups {
            w.line(&format!("{len} => {{"));
            w.indent();
            emit_node(node, w);
            w.dedent();
            w.line("}");
        }
        w.line("_ => {}");
        w.dedent();
        w.line("}");
        w.line("(0, 0)");
        w.dedent();
        w.line("}");
        w.blank();
    }
}

/// Build the decision node for `candidates`, all of equal length, with
/// bytes before `pos` already verified by the path leading here.
fn build_node(pos: usize, mut candidates: Vec<(&[u8], Window)>) -> Node {
    debug_assert!(!candidates.is_empty());
    if candidates.len() == 1 {
        let (name, window) = candidates.remove(0);
        return Node::Leaf {
            pos,
            suffix: name[pos..].to_vec(),
            window,
        };
    }

    // Advance to the first position where the candidates diverge. Names
    // are unique and equally long, so divergence comes before the end.
    let mut split = pos;
    while candidates.iter().all(|(n, _)| n[split] == candidates[0].0[split]) {
        split += 1;
    }
    let prefix = candidates[0].0[pos..split].to_vec();

    let mut arms: Vec<(u8, Vec<(&[u8], Window)>)> = Vec::new();
    for (name, window) in candidates {
        let byte = name[split];
        match arms.iter_mut().find(|(b, _)| *b == byte) {
            Some((_, group)) => group.push((name, window)),
            None => arms.push((byte, vec![(name, window)])),
        }
    }
    arms.sort_by_key(|(byte, _)| *byte);

    Node::Branch {
        pos,
        prefix,
        arms: arms
            .into_iter()
            .map(|(byte, group)| (byte, build_node(split + 1, group)))
            .collect(),
    }
}

fn lookup_node(node: &Node, bytes: &[u8]) -> Window {
    match node {
        Node::Leaf { pos, suffix, window } => {
            if &bytes[*pos..] == suffix.as_slice() {
                *window
            } else {
                (0, 0)
            }
        }
        Node::Branch { pos, prefix, arms } => {
            let at = *pos + prefix.len();
            if &bytes[*pos..at] != prefix.as_slice() {
                return (0, 0);
            }
            for (byte, child) in arms {
                if bytes[at] == *byte {
                    return lookup_node(child, bytes);
                }
            }
            (0, 0)
        }
    }
}

fn emit_node(node: &Node, w: &mut SourceWriter) {
    match node {
        Node::Leaf { pos, suffix, window } => {
            if suffix.is_empty() {
                w.line(&format!("return ({}, {});", window.0, window.1));
            } else {
                w.line(&format!(
                    "if bytes[{}..] == *{} {{",
                    pos,
                    byte_str_lit(suffix)
                ));
                w.indent();
                w.line(&format!("return ({}, {});", window.0, window.1));
                w.dedent();
                w.line("}");
            }
        }
        Node::Branch { pos, prefix, arms } => {
            if prefix.is_empty() {
                emit_branch_arms(*pos, arms, w);
            } else {
                let at = *pos + prefix.len();
                w.line(&format!(
                    "if bytes[{}..{}] == *{} {{",
                    pos,
                    at,
                    byte_str_lit(prefix)
                ));
                w.indent();
                emit_branch_arms(at, arms, w);
                w.dedent();
                w.line("}");
            }
        }
    }
}

fn emit_branch_arms(at: usize, arms: &[(u8, Node)], w: &mut SourceWriter) {
    w.line(&format!("match bytes[{at}] {{"));
    w.indent();
    for (byte, child) in arms {
        w.line(&format!("{} => {{", byte_lit(*byte)));
        w.indent();
        emit_node(child, w);
        w.dedent();
        w.line("}");
    }
    w.line("_ => {}");
    w.dedent();
    w.line("}");
}
