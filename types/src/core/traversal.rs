//! Stack-based traversal of type trees.
//!
//! Declarations can nest types arbitrarily deep, so walks use an explicit
//! stack instead of recursion.

use alloc::vec;

use super::ty::Ty;

/// What to do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Visit the node's children next.
    Continue,
    /// Do not descend into this node.
    Skip,
    /// End the traversal.
    Stop,
}

/// Visit `root` and its descendants in pre-order, left to right.
pub fn walk<'t>(root: &'t Ty, mut visit: impl FnMut(&'t Ty) -> Walk) {
    let mut stack = vec![root];

    while let Some(ty) = stack.pop() {
        match visit(ty) {
            Walk::Continue => {
                // Push children in reverse, so they pop in order
                let start = stack.len();
                stack.extend(ty.kind().iter_children());
                stack[start..].reverse();
            }
            Walk::Skip => {}
            Walk::Stop => return,
        }
    }
}
