use std::collections::{BTreeMap, BTreeSet, VecDeque};

use modmig_core::{MigrationStep, Version};

/// Directed graph of migration steps keyed by their from-version.
///
/// Edges out of the same version keep the order of the underlying slice,
/// which is registration order; the path search relies on that order for
/// its tie-break, so resolution is reproducible across runs given the same
/// registry contents.
#[derive(Debug)]
pub struct VersionGraph<'a, T> {
    steps: &'a [T],
    edges: BTreeMap<Version, Vec<usize>>,
}

impl<'a, T: MigrationStep> VersionGraph<'a, T> {
    /// Groups the steps by from-version, preserving slice order per bucket.
    pub fn build(steps: &'a [T]) -> Self {
        let mut edges: BTreeMap<Version, Vec<usize>> = BTreeMap::new();
        for (idx, step) in steps.iter().enumerate() {
            edges
                .entry(step.from_version().clone())
                .or_default()
                .push(idx);
        }
        Self { steps, edges }
    }

    /// Indices of the steps leaving `version`, in registration order.
    pub fn outgoing(&self, version: &Version) -> &[usize] {
        self.edges.get(version).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Versions with at least one outgoing step, in ascending order.
    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.edges.keys()
    }

    /// Finds the shortest step sequence bridging `from` to `to`.
    ///
    /// Breadth-first search over the step edges; ties between equal-length
    /// paths resolve to the earliest-registered edge at each branching
    /// point. Equal endpoints return `None`: a zero-length path carries no
    /// edges to reconstruct, and callers special-case equality before
    /// resolving.
    pub fn find_path(&self, from: &Version, to: &Version) -> Option<Vec<&'a T>> {
        if from == to {
            return None;
        }
        let mut visited: BTreeSet<Version> = BTreeSet::new();
        // Step index that first reached each version.
        let mut arrived_by: BTreeMap<Version, usize> = BTreeMap::new();
        let mut queue: VecDeque<Version> = VecDeque::new();
        visited.insert(from.clone());
        queue.push_back(from.clone());
        while let Some(current) = queue.pop_front() {
            for &idx in self.outgoing(&current) {
                let next = self.steps[idx].to_version();
                if !visited.insert(next.clone()) {
                    continue;
                }
                arrived_by.insert(next.clone(), idx);
                if next == to {
                    return Some(self.reconstruct(from, to, &arrived_by));
                }
                queue.push_back(next.clone());
            }
        }
        None
    }

    fn reconstruct(
        &self,
        from: &Version,
        to: &Version,
        arrived_by: &BTreeMap<Version, usize>,
    ) -> Vec<&'a T> {
        let mut path = Vec::new();
        let mut cursor = to.clone();
        while cursor != *from {
            let idx = arrived_by[&cursor];
            let step = &self.steps[idx];
            cursor = step.from_version().clone();
            path.push(step);
        }
        path.reverse();
        path
    }
}
