//! Native code entries and closure invocation.
//!
//! A closure value is a [`CodeEntry`] plus captured values. Entries live in a
//! [`CodeTable`] whose indices follow registration order, so a program that
//! registers its functions in the same order sees the same indices in every
//! execution.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use ombu_types::{Fingerprinter, Ident};
use smallvec::SmallVec;

use crate::error::{CallError, CodeError};
use crate::heap::Heap;
use crate::object::Closure;
use crate::value::Value;

/// Entry point of a native function: `(heap, captures, args) -> result`.
pub type NativeCode =
    for<'a> fn(&Heap<'a>, &[Value<'a>], &[Value<'a>]) -> Result<Value<'a>, CallError>;

/// Position of an entry in its [`CodeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodeIndex(pub u32);

pub struct CodeEntry {
    index: CodeIndex,
    name: Ident,
    arity: u16,
    captures: u16,
    fingerprint: u64,
    code: NativeCode,
}

impl CodeEntry {
    pub fn index(&self) -> CodeIndex {
        self.index
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn arity(&self) -> u16 {
        self.arity
    }

    pub fn captures(&self) -> u16 {
        self.captures
    }

    /// Fingerprint of the entry's name, arity and capture count.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

impl fmt::Debug for CodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeEntry")
            .field("index", &self.index.0)
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("captures", &self.captures)
            .finish_non_exhaustive()
    }
}

fn fingerprint(name: &str, arity: u16, captures: u16) -> u64 {
    let mut fp = Fingerprinter::new();
    fp.write_u8(b'C');
    fp.write_str(name);
    fp.write_u64(arity.into());
    fp.write_u64(captures.into());
    fp.finish()
}

#[derive(Debug, Default)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
    names: HashMap<Ident, CodeIndex>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub fn register(
        &mut self,
        name: impl Into<Ident>,
        arity: u16,
        captures: u16,
        code: NativeCode,
    ) -> Result<CodeIndex, CodeError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(CodeError::DuplicateName { name });
        }
        let index = u32::try_from(self.entries.len())
            .map(CodeIndex)
            .map_err(|_| CodeError::TableFull)?;

        self.entries.push(CodeEntry {
            index,
            fingerprint: fingerprint(&name, arity, captures),
            name: name.clone(),
            arity,
            captures,
            code,
        });
        self.names.insert(name, index);
        Ok(index)
    }

    pub fn get(&self, index: CodeIndex) -> Option<&CodeEntry> {
        self.entries.get(index.0 as usize)
    }

    pub fn named(&self, name: &str) -> Option<&CodeEntry> {
        self.names
            .get(&Ident::from(name))
            .and_then(|index| self.get(*index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeEntry> {
        self.entries.iter()
    }
}

impl<'a> Closure<'a> {
    /// Invoke the closure's code with its captured environment.
    pub fn call(&self, heap: &Heap<'a>, args: &[Value<'a>]) -> Result<Value<'a>, CallError> {
        let entry = self.entry;
        if args.len() != usize::from(entry.arity) {
            return Err(CallError::Arity {
                name: entry.name.clone(),
                expected: entry.arity,
                found: args.len(),
            });
        }
        let captures: SmallVec<[Value<'a>; 4]> = self.captures().collect();
        (entry.code)(heap, &captures, args)
    }
}
