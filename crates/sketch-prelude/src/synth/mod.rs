//! Declaration synthesis.
//!
//! One pre-order walk over the AST classifies every function and function
//! template as either "signature seen, no body here" or "defined at this
//! location". Classification is deferred: when a function-like node is
//! visited its signature is parked as the pending candidate, and the next
//! node decides its fate. A `CompoundStmt` is its body, a parameter belongs
//! to it, and any other declaration means it had no body.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};

use crate::frontend::{ChildVisit, Cursor, CursorKind, Location, Visitor, visit_children};
use crate::sketch::FileFilter;

/// Signature → definition location, for every signature the walk saw.
///
/// `None` means no qualifying body was found for the signature.
/// Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    records: HashMap<String, Option<Location>>,
}

impl Declarations {
    pub fn get(
        &self,
        signature: &str,
    ) -> Option<&Option<Location>> {
        self.records.get(signature)
    }

    /// Signatures that resolved to a definition, with that definition.
    pub fn defined(&self) -> impl Iterator<Item = (&str, &Location)> {
        self.records.iter().filter_map(|(sig, loc)| loc.as_ref().map(|l| (sig.as_str(), l)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Location>)> {
        self.records.iter().map(|(sig, loc)| (sig.as_str(), loc.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A function-like node whose body has not been seen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingCandidate {
    signature: String,
    location: Option<Location>,
}

/// Traversal state: the records built so far and the pending slot.
pub struct Synthesizer<'f> {
    declarations: Declarations,
    pending: Option<PendingCandidate>,
    filter: Option<&'f FileFilter>,
}

impl<'f> Synthesizer<'f> {
    /// With a filter, only bodies located in one of the filter's files
    /// produce a definition.
    pub fn new(filter: Option<&'f FileFilter>) -> Self {
        Self {
            declarations: Declarations::default(),
            pending: None,
            filter,
        }
    }

    /// Finish the walk. A candidate still pending is dropped.
    pub fn finish(self) -> Declarations {
        if let Some(pending) = self.pending {
            trace!("discarding unresolved candidate `{}`", pending.signature);
        }
        self.declarations
    }

    /// Classify the pending candidate against `kind`.
    ///
    /// Returns `true` when `kind` was the candidate's body, in which case the
    /// node must not be processed any further.
    fn resolve_pending(
        &mut self,
        kind: CursorKind,
    ) -> bool {
        if kind == CursorKind::CompoundStmt {
            if let Some(pending) = self.pending.take() {
                self.record_body(pending);
            }
            return true;
        }
        if kind.is_parameter() || !kind.is_declaration() {
            return false;
        }
        if let Some(pending) = self.pending.take() {
            trace!("`{}` has no body", pending.signature);
            self.declarations.records.insert(pending.signature, None);
        }
        false
    }

    fn record_body(
        &mut self,
        pending: PendingCandidate,
    ) {
        let Some(location) = pending.location else {
            debug!("body of `{}` has no resolvable location", pending.signature);
            return;
        };
        if let Some(filter) = self.filter
            && !filter.contains(&location.file)
        {
            trace!("body of `{}` lives outside the sketch ({location})", pending.signature);
            return;
        }
        match self.declarations.records.entry(pending.signature) {
            Entry::Vacant(slot) => {
                trace!("`{}` defined at {location}", slot.key());
                slot.insert(Some(location));
            },
            Entry::Occupied(slot) => {
                trace!("`{}` already recorded, keeping the first record", slot.key());
            },
        }
    }

    fn arm<C: Cursor>(
        &mut self,
        cursor: &C,
    ) {
        let Some(signature) = cursor.signature() else {
            match cursor.location() {
                Some(location) => debug!("function at {location} has no renderable signature, skipped"),
                None => debug!("function without location has no renderable signature, skipped"),
            }
            return;
        };
        // A bodiless prototype seen earlier already makes the function visible.
        if let Some(None) = self.declarations.records.get(&signature) {
            return;
        }
        self.pending = Some(PendingCandidate {
            signature,
            location: cursor.location(),
        });
    }
}

impl<C: Cursor> Visitor<C> for Synthesizer<'_> {
    fn visit(
        &mut self,
        cursor: &C,
    ) -> ChildVisit {
        let kind = cursor.kind();
        if self.pending.is_some() && self.resolve_pending(kind) {
            return ChildVisit::Continue;
        }

        if kind.is_function_like() {
            self.arm(cursor);
            return ChildVisit::Recurse;
        }
        if kind.is_parameter() {
            return ChildVisit::Recurse;
        }
        ChildVisit::Continue
    }
}

/// Walk the children of `root` and collect declaration records.
pub fn synthesize<C: Cursor>(
    root: &C,
    filter: Option<&FileFilter>,
) -> Declarations {
    let mut synthesizer = Synthesizer::new(filter);
    visit_children(root, &mut synthesizer);
    let declarations = synthesizer.finish();
    debug!(
        "synthesized {} signature(s), {} with a definition",
        declarations.len(),
        declarations.defined().count()
    );
    declarations
}

#[cfg(test)]
#[path = "../../tests/src/synth_tests.rs"]
mod tests;
