/// Hierarchy builder: adjacency, nested-set bounds and ancestor chains
///
/// Runs once over a parsed [`TaxonTable`]. Children keep the order in which
/// they appear in the table, which makes the bounds deterministic for a given
/// input file.
use super::ancestry::{AncestryIndex, NestedBounds};
use super::table::TaxonTable;
use cladis_core::{TaxonId, TaxonomyBuildError};
use std::collections::HashMap;
use tracing::debug;

/// Position in the depth-first walk: the node being expanded (`None` for the
/// implicit root) and how many of its children have been entered so far.
struct Frame {
    slot: Option<usize>,
    next_child: usize,
}

pub struct HierarchyBuilder<'a> {
    table: &'a TaxonTable,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(table: &'a TaxonTable) -> Self {
        Self { table }
    }

    /// Parent slot per taxon (`None` = implicit root) and the child slots of
    /// every node, in table order
    fn adjacency(
        &self,
    ) -> Result<(Vec<Option<usize>>, Vec<Vec<usize>>, Vec<usize>), TaxonomyBuildError> {
        let n = self.table.len();
        let mut parents = Vec::with_capacity(n);
        let mut children = vec![Vec::new(); n];
        let mut root_children = Vec::new();

        for (slot, record) in self.table.iter().enumerate() {
            match record.parent_taxon_id {
                None => {
                    parents.push(None);
                    root_children.push(slot);
                }
                Some(parent) => {
                    let parent_slot =
                        self.table
                            .slot(parent)
                            .ok_or(TaxonomyBuildError::DanglingParent {
                                taxon: record.taxon_id,
                                parent,
                            })?;
                    parents.push(Some(parent_slot));
                    children[parent_slot].push(slot);
                }
            }
        }

        Ok((parents, children, root_children))
    }

    pub fn build(self) -> Result<AncestryIndex, TaxonomyBuildError> {
        let n = self.table.len();
        let (parents, child_slots, root_slots) = self.adjacency()?;
        let ids: Vec<TaxonId> = self.table.iter().map(|r| r.taxon_id).collect();

        let mut visited = vec![false; n];
        let mut lefts = vec![0u32; n];
        let mut rights = vec![0u32; n];
        let mut ancestors: Vec<Vec<TaxonId>> = vec![Vec::new(); n];
        let mut counter: u32 = 0;

        let mut stack = vec![Frame {
            slot: None,
            next_child: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let siblings = match frame.slot {
                Some(slot) => &child_slots[slot],
                None => &root_slots,
            };

            if frame.next_child < siblings.len() {
                let child = siblings[frame.next_child];
                frame.next_child += 1;
                let parent = frame.slot;
                visited[child] = true;

                lefts[child] = counter;
                counter += 1;
                if let Some(parent) = parent {
                    let mut chain = Vec::with_capacity(ancestors[parent].len() + 1);
                    chain.extend_from_slice(&ancestors[parent]);
                    chain.push(ids[parent]);
                    ancestors[child] = chain;
                }
                stack.push(Frame {
                    slot: Some(child),
                    next_child: 0,
                });
            } else {
                if let Some(slot) = frame.slot {
                    rights[slot] = counter;
                    counter += 1;
                }
                stack.pop();
            }
        }

        // Every slot sits in exactly one child list, so the walk never meets a
        // slot twice. Cycles show up only as slots it never reached: each one
        // is on a parent loop or hangs below one.
        if let Some(unreached) = visited.iter().position(|&seen| !seen) {
            return Err(cycle_through(unreached, &parents, &ids));
        }

        let bounds = lefts
            .into_iter()
            .zip(rights)
            .map(|(left, right)| NestedBounds::new(left, right))
            .collect();

        let slots: HashMap<TaxonId, usize> =
            ids.iter().enumerate().map(|(slot, &id)| (id, slot)).collect();
        let children = child_slots
            .iter()
            .map(|kids| kids.iter().map(|&k| ids[k]).collect())
            .collect();
        let root_children: Vec<TaxonId> = root_slots.iter().map(|&s| ids[s]).collect();

        debug!(
            "Assigned nested bounds to {} taxa ({} root-level), counter ended at {}",
            n,
            root_children.len(),
            counter
        );

        Ok(AncestryIndex::from_parts(
            slots,
            ids,
            bounds,
            ancestors,
            children,
            root_children,
        ))
    }
}

/// Follow parent links from `start` until a slot repeats and report the loop,
/// rotated so the smallest taxon id comes first.
fn cycle_through(start: usize, parents: &[Option<usize>], ids: &[TaxonId]) -> TaxonomyBuildError {
    let mut order = Vec::new();
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut current = Some(start);

    while let Some(slot) = current {
        if let Some(&first) = position.get(&slot) {
            let mut members: Vec<TaxonId> = order[first..].iter().map(|&s| ids[s]).collect();
            if let Some(min_at) = members
                .iter()
                .enumerate()
                .min_by_key(|(_, id)| **id)
                .map(|(i, _)| i)
            {
                members.rotate_left(min_at);
            }
            return TaxonomyBuildError::Cycle { members };
        }
        position.insert(slot, order.len());
        order.push(slot);
        current = parents[slot];
    }

    // Parent links from a slot the walk missed always end in a loop
    TaxonomyBuildError::Cycle {
        members: vec![ids[start]],
    }
}
