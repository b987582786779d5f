//! Tail bookkeeping for the list spines of one encoded value.
//!
//! Each `LIST` token introduces a spine: a run of consecutively numbered cells
//! whose last cell is linked to the tail token that follows the heads. A tail
//! may point at any cell introduced so far, including cells of spines that
//! are still open. Linking is only rejected when following the tail would
//! lead back to the spine being closed.
//!
//! Every spine records where its chain of tails ends: at `Nil`, or at the
//! last cell of a spine that is still open. Those links form a forest that is
//! searched with path compression, so closing a spine costs amortized near
//! constant time however long the lists it joins.

use alloc::vec::Vec;

use crate::error::Mismatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    /// The tail has not been read yet.
    Open,
    Nil,
    /// Continues into another spine.
    Into(usize),
}

#[derive(Debug)]
struct Run {
    first: usize,
    len: usize,
    end: End,
}

#[derive(Debug, Default)]
pub(crate) struct Spines {
    runs: Vec<Run>,
}

impl Spines {
    /// Register the cells `first..first + len` as a new open spine.
    pub(crate) fn open(&mut self, first: usize, len: usize) -> usize {
        self.runs.push(Run {
            first,
            len,
            end: End::Open,
        });
        self.runs.len() - 1
    }

    /// The spine owning the object at `index`, if it is a list cell.
    fn owner(&self, index: usize) -> Option<usize> {
        // Runs are opened in object order.
        let spine = self.runs.partition_point(|run| run.first <= index).checked_sub(1)?;
        let run = &self.runs[spine];
        (index < run.first + run.len).then_some(spine)
    }

    /// The open spine the chain starting at `spine` ends in, or `None` when it
    /// ends at `Nil`.
    fn root(&mut self, spine: usize) -> Option<usize> {
        let mut current = spine;
        let root = loop {
            match self.runs[current].end {
                End::Open => break Some(current),
                End::Nil => break None,
                End::Into(next) => current = next,
            }
        };
        let compressed = root.map_or(End::Nil, End::Into);
        let mut current = spine;
        while let End::Into(next) = self.runs[current].end {
            self.runs[current].end = compressed;
            current = next;
        }
        root
    }

    /// Close `spine` with a tail pointing at object `tail`, or at `Nil`.
    pub(crate) fn close(&mut self, spine: usize, tail: Option<u64>) -> Result<(), Mismatch> {
        let end = match tail {
            None => End::Nil,
            Some(index) => {
                let target = usize::try_from(index)
                    .ok()
                    .and_then(|i| self.owner(i))
                    .ok_or(Mismatch::TailTarget { index })?;
                match self.root(target) {
                    Some(root) if root == spine => return Err(Mismatch::CyclicSpine),
                    Some(root) => End::Into(root),
                    None => End::Nil,
                }
            }
        };
        self.runs[spine].end = end;
        Ok(())
    }
}
