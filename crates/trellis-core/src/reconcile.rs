//! Keyed three-pass diff of a child list against new widget descriptions.

use crate::collections::map::{HashSet, IndexMap};
use crate::tracking::assert_untracked;
use crate::{Key, NodeError};

/// Operations the reconciler needs from the tree that owns the nodes.
pub trait ReconcileHost {
    type Node;
    type Widget;

    fn widget_key<'w>(&self, widget: &'w Self::Widget) -> Option<&'w Key>;

    fn node_key(&self, node: &Self::Node) -> Option<Key>;

    /// True when `widget` has the node's key (or both have none) and the node's kind.
    fn can_update(&self, node: &Self::Node, widget: &Self::Widget) -> bool;

    fn create(&mut self, widget: Self::Widget) -> Result<Self::Node, NodeError>;

    fn update(&mut self, node: &Self::Node, widget: Self::Widget) -> Result<(), NodeError>;

    /// Destroys `node` and everything below it.
    fn destroy(&mut self, node: Self::Node);
}

/// What one reconciliation pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub reused: usize,
    pub created: usize,
    pub destroyed: usize,
}

/// Matches `new` widgets against the `old` children and returns the new child list.
///
/// Nodes are reused when [`ReconcileHost::can_update`] holds: first along the
/// common head, then along the common tail, then by key through the middle.
/// Unkeyed old nodes in the middle are destroyed, as is every keyed one left
/// unclaimed. The tail updates are applied last.
///
/// # Panics
///
/// Panics when called inside a tracked scope.
pub fn reconcile<H: ReconcileHost>(
    host: &mut H,
    old: Vec<H::Node>,
    new: Vec<H::Widget>,
) -> Result<Vec<H::Node>, NodeError> {
    reconcile_with_stats(host, old, new).map(|(nodes, _)| nodes)
}

/// Same as [`reconcile`] and also reports how many nodes were reused, created and destroyed.
///
/// Duplicate keys among `new` fail the pass before anything is created or
/// updated; the old nodes are destroyed so none is left detached.
pub fn reconcile_with_stats<H: ReconcileHost>(
    host: &mut H,
    old: Vec<H::Node>,
    new: Vec<H::Widget>,
) -> Result<(Vec<H::Node>, ReconcileStats), NodeError> {
    assert_untracked("reconcile");
    if let Err(err) = check_unique_keys(host, &new) {
        for node in old {
            host.destroy(node);
        }
        return Err(err);
    }

    let mut pass = Pass {
        old: old.into_iter().map(Some).collect(),
        new: new.into_iter().map(Some).collect(),
        result: Vec::new(),
        keyed: IndexMap::default(),
        stats: ReconcileStats::default(),
    };
    pass.result.resize_with(pass.new.len(), || None);

    match pass.run(host) {
        Ok(()) => {
            let stats = pass.stats;
            log::debug!(
                "reconcile: {} reused, {} created, {} destroyed",
                stats.reused,
                stats.created,
                stats.destroyed
            );
            let nodes = pass
                .result
                .into_iter()
                .map(|node| node.expect("every new slot is filled by a completed pass"))
                .collect();
            Ok((nodes, stats))
        }
        Err(err) => {
            pass.abandon(host);
            Err(err)
        }
    }
}

/// Fails with [`NodeError::DuplicateKey`] when two of `widgets` share an explicit key.
///
/// [`reconcile`] runs this itself and destroys every old node on failure.
/// Hosts that want to keep their children on that error check first.
pub fn check_unique_keys<H: ReconcileHost>(
    host: &H,
    widgets: &[H::Widget],
) -> Result<(), NodeError> {
    let mut seen = HashSet::default();
    for key in widgets.iter().filter_map(|widget| host.widget_key(widget)) {
        if !seen.insert(key) {
            return Err(NodeError::DuplicateKey { key: key.clone() });
        }
    }
    Ok(())
}

struct Pass<N, W> {
    old: Vec<Option<N>>,
    new: Vec<Option<W>>,
    result: Vec<Option<N>>,
    keyed: IndexMap<Key, N>,
    stats: ReconcileStats,
}

impl<N, W> Pass<N, W> {
    fn run<H>(&mut self, host: &mut H) -> Result<(), NodeError>
    where
        H: ReconcileHost<Node = N, Widget = W>,
    {
        let (mut old_start, mut new_start) = (0, 0);
        let (mut old_end, mut new_end) = (self.old.len(), self.new.len());

        while old_start < old_end
            && new_start < new_end
            && self.matches(host, old_start, new_start)
        {
            self.reuse(host, old_start, new_start)?;
            old_start += 1;
            new_start += 1;
        }

        while old_start < old_end
            && new_start < new_end
            && self.matches(host, old_end - 1, new_end - 1)
        {
            old_end -= 1;
            new_end -= 1;
        }
        let (tail_old, tail_new) = (old_end, new_end);

        for index in old_start..old_end {
            let node = take(&mut self.old[index]);
            match host.node_key(&node) {
                Some(key) => {
                    self.keyed.insert(key, node);
                }
                None => {
                    log::trace!("reconcile: destroying unkeyed node at {index}");
                    host.destroy(node);
                    self.stats.destroyed += 1;
                }
            }
        }

        for index in new_start..new_end {
            let widget = take(&mut self.new[index]);
            let key = host.widget_key(&widget).cloned();
            let reusable = key.as_ref().and_then(|key| {
                self.keyed
                    .get(key)
                    .filter(|node| host.can_update(node, &widget))
                    .map(|_| key)
            });
            let node = match reusable.and_then(|key| self.keyed.shift_remove(key)) {
                Some(node) => {
                    host.update(&node, widget)?;
                    self.stats.reused += 1;
                    node
                }
                None => {
                    let node = host.create(widget)?;
                    self.stats.created += 1;
                    node
                }
            };
            self.result[index] = Some(node);
        }

        for (_, node) in self.keyed.drain(..) {
            host.destroy(node);
            self.stats.destroyed += 1;
        }

        for offset in 0..self.new.len() - tail_new {
            self.reuse(host, tail_old + offset, tail_new + offset)?;
        }
        Ok(())
    }

    fn matches<H>(&self, host: &H, old: usize, new: usize) -> bool
    where
        H: ReconcileHost<Node = N, Widget = W>,
    {
        match (&self.old[old], &self.new[new]) {
            (Some(node), Some(widget)) => host.can_update(node, widget),
            _ => false,
        }
    }

    fn reuse<H>(&mut self, host: &mut H, old: usize, new: usize) -> Result<(), NodeError>
    where
        H: ReconcileHost<Node = N, Widget = W>,
    {
        let node = take(&mut self.old[old]);
        let widget = take(&mut self.new[new]);
        let outcome = host.update(&node, widget);
        self.result[new] = Some(node);
        outcome?;
        self.stats.reused += 1;
        Ok(())
    }

    /// Destroys every node the failed pass still holds so none leaks out of the tree.
    fn abandon<H>(self, host: &mut H)
    where
        H: ReconcileHost<Node = N, Widget = W>,
    {
        let remaining = self
            .old
            .into_iter()
            .chain(self.result)
            .flatten()
            .chain(self.keyed.into_values());
        for node in remaining {
            host.destroy(node);
        }
    }
}

fn take<T>(slot: &mut Option<T>) -> T {
    slot.take().expect("reconcile slot consumed twice")
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
