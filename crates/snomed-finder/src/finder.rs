//! Concept lookup and assembly.
//!
//! Every public lookup runs a query for matching concept ids, then assembles
//! each concept with two follow-up queries: its descriptions (with their
//! dialect acceptability) and the refsets it belongs to. Each refset is
//! itself looked up and assembled as a concept, recursively.
//!
//! Refset concepts assembled during one lookup are shared through a cache
//! that lives only as long as that lookup, so a repeated refset costs one
//! assembly per call and no state survives between calls.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::sync::Arc;

use snomed_types::{Concept, ConceptBuilder, SctId};
use tracing::{debug, trace, warn};

use crate::queries;
use crate::source::{row_cap, Query, Row, RowSource};
use crate::types::{FinderConfig, FinderError, FinderResult, SourceError};

/// Finds active concepts and assembles them from a [`RowSource`].
///
/// All lookups are read-only. A lookup either returns fully assembled
/// concepts or fails as a whole; storage errors are never turned into empty
/// results.
///
/// # Example
///
/// ```ignore
/// use snomed_finder::{ConceptFinder, SqliteSource};
///
/// let finder = ConceptFinder::new(SqliteSource::open("snomed.db")?);
///
/// if let Some(concept) = finder.find_by_id(301000)? {
///     println!("{}", concept.preferred_term()?);
///     for membership in concept.memberships() {
///         println!("  in {}", membership.refset_concept().id());
///     }
/// }
/// ```
#[derive(Debug)]
pub struct ConceptFinder<S> {
    source: S,
    config: FinderConfig,
}

/// Per-lookup resolution state.
struct Resolution {
    /// Concepts assembled so far in this lookup.
    assembled: HashMap<SctId, Arc<Concept>>,
    /// Concepts currently being assembled, outermost first.
    path: Vec<SctId>,
}

impl Resolution {
    fn new() -> Self {
        Self {
            assembled: HashMap::new(),
            path: Vec::new(),
        }
    }
}

impl<S: RowSource> ConceptFinder<S> {
    /// Creates a finder with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, FinderConfig::default())
    }

    /// Creates a finder with an explicit configuration.
    pub fn with_config(source: S, config: FinderConfig) -> Self {
        Self { source, config }
    }

    /// Returns the underlying row source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the finder configuration.
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// The maximum number of concepts a lookup currently returns, or `None`
    /// when the source does not cap results.
    pub fn result_limit(&self) -> Option<usize> {
        row_cap(self.source.max_rows())
    }

    /// Returns true if a result of `len` concepts reached the current cap and
    /// may therefore have been truncated.
    pub fn is_limited(&self, len: usize) -> bool {
        self.result_limit().is_some_and(|limit| len >= limit)
    }

    /// Finds the active concept with this id.
    ///
    /// Returns `Ok(None)` when no active concept has the id; inactive and
    /// unknown concepts are indistinguishable.
    pub fn find_by_id(&self, id: SctId) -> FinderResult<Option<Concept>> {
        let mut scope = Resolution::new();
        let found = self.lookup(id, &mut scope)?;
        drop(scope);

        debug!(concept_id = id, found = found.is_some(), "find_by_id");
        Ok(found.map(into_owned))
    }

    /// Finds the distinct active concepts having an active description that
    /// contains `fragment`.
    ///
    /// `fragment` is matched literally as a substring using the store's
    /// `LIKE` comparison (ASCII case-insensitive on SQLite). Results are
    /// ordered by descending id and capped at [`ConceptFinder::result_limit`].
    pub fn find_by_term(&self, fragment: &str) -> FinderResult<Vec<Concept>> {
        let query = queries::concepts_by_term(fragment);
        let concepts = self.find_many(query, fragment)?;

        debug!(term = fragment, count = concepts.len(), "find_by_term");
        Ok(concepts)
    }

    /// Finds the active concepts that are members of `refset_id`, ordered by
    /// ascending id and capped at [`ConceptFinder::result_limit`].
    ///
    /// The member rows themselves are not filtered on their active flag.
    pub fn find_refset_members(&self, refset_id: SctId) -> FinderResult<Vec<Concept>> {
        let query = queries::refset_members(refset_id);
        let concepts = self.find_many(query, refset_id)?;

        debug!(refset_id, count = concepts.len(), "find_refset_members");
        Ok(concepts)
    }

    /// Runs a limited id query and assembles every returned concept.
    fn find_many(&self, query: Query, subject: impl Display) -> FinderResult<Vec<Concept>> {
        let rows = self.run(&query, true, &subject)?;
        let ids = rows
            .iter()
            .map(|row| self.decode(row.sctid("id"), &query, &subject))
            .collect::<FinderResult<Vec<_>>>()?;
        let ids = distinct(ids);

        let mut scope = Resolution::new();
        let mut assembled = Vec::with_capacity(ids.len());
        for id in ids {
            assembled.push(self.assemble(id, &mut scope)?);
        }
        drop(scope);

        Ok(assembled.into_iter().map(into_owned).collect())
    }

    /// Looks up an active concept by id and assembles it.
    fn lookup(&self, id: SctId, scope: &mut Resolution) -> FinderResult<Option<Arc<Concept>>> {
        let query = queries::concept_by_id(id);
        let rows = self.run(&query, true, id)?;

        match rows.first() {
            Some(row) => {
                let id = self.decode(row.sctid("id"), &query, id)?;
                self.assemble(id, scope).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Builds a concept from its descriptions and refset memberships.
    fn assemble(&self, id: SctId, scope: &mut Resolution) -> FinderResult<Arc<Concept>> {
        if let Some(concept) = scope.assembled.get(&id) {
            trace!(concept_id = id, "reusing assembled concept");
            return Ok(Arc::clone(concept));
        }
        trace!(concept_id = id, depth = scope.path.len(), "assembling concept");

        let mut builder = ConceptBuilder::new(id);

        let query = queries::concept_descriptions(id);
        for row in self.run(&query, false, id)? {
            let term = self.decode(row.text("term"), &query, id)?;
            // Rows are ordered so the first one for each term wins.
            if builder.has_description(term) {
                continue;
            }
            let acceptability_id = self.decode(row.optional_sctid("valueid"), &query, id)?;
            builder.add_description(term, acceptability_id);
        }

        let query = queries::concept_refsets(id);
        let refset_ids = self
            .run(&query, false, id)?
            .iter()
            .map(|row| self.decode(row.sctid("refsetid"), &query, id))
            .collect::<FinderResult<Vec<_>>>()?;
        let refset_ids = distinct(refset_ids);

        scope.path.push(id);
        let refsets = refset_ids
            .into_iter()
            .map(|refset_id| self.resolve_refset(id, refset_id, scope))
            .collect::<FinderResult<Vec<_>>>();
        scope.path.pop();

        for refset in refsets? {
            builder.add_membership(refset);
        }

        let concept = Arc::new(builder.build());
        if self.config.cache_refsets {
            scope.assembled.insert(id, Arc::clone(&concept));
        }
        Ok(concept)
    }

    /// Resolves the concept representing `refset_id` for a member concept.
    fn resolve_refset(
        &self,
        concept_id: SctId,
        refset_id: SctId,
        scope: &mut Resolution,
    ) -> FinderResult<Arc<Concept>> {
        if let Some(refset) = scope.assembled.get(&refset_id) {
            return Ok(Arc::clone(refset));
        }

        if scope.path.contains(&refset_id) {
            warn!(concept_id, refset_id, path = ?scope.path, "cyclic refset membership");
            return Err(FinderError::MembershipCycle {
                refset_id,
                path: scope.path.clone(),
            });
        }

        if scope.path.len() > self.config.max_depth {
            return Err(FinderError::DepthExceeded {
                concept_id: refset_id,
                max_depth: self.config.max_depth,
            });
        }

        match self.lookup(refset_id, scope)? {
            Some(refset) => Ok(refset),
            None => {
                warn!(concept_id, refset_id, "refset concept is unknown or inactive");
                Err(FinderError::ReferentialIntegrity {
                    concept_id,
                    refset_id,
                })
            }
        }
    }

    fn run(&self, query: &Query, limited: bool, subject: impl Display) -> FinderResult<Vec<Row>> {
        trace!(query = query.label, limited, "running query");
        self.source
            .run_query(query, limited)
            .map_err(|e| FinderError::storage(format!("{}({})", query.label, subject), e))
    }

    fn decode<T>(
        &self,
        value: Result<T, SourceError>,
        query: &Query,
        subject: impl Display,
    ) -> FinderResult<T> {
        value.map_err(|e| FinderError::storage(format!("{}({})", query.label, subject), e))
    }
}

/// Drops repeated ids, keeping the first occurrence of each.
fn distinct(ids: Vec<SctId>) -> Vec<SctId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Takes a concept out of its `Arc`, cloning only if it is still shared.
fn into_owned(concept: Arc<Concept>) -> Concept {
    Arc::try_unwrap(concept).unwrap_or_else(|shared| (*shared).clone())
}
