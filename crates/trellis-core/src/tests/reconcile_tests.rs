use super::*;
use crate::{derived_state_of, untracked};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
struct Node {
    id: usize,
    kind: &'static str,
    key: Option<Key>,
    value: Cell<i32>,
}

#[derive(Clone, Debug)]
struct Widget {
    kind: &'static str,
    key: Option<Key>,
    value: i32,
}

fn keyed(kind: &'static str, key: u64) -> Widget {
    Widget {
        kind,
        key: Some(Key::from(key)),
        value: key as i32,
    }
}

fn plain(kind: &'static str, value: i32) -> Widget {
    Widget {
        kind,
        key: None,
        value,
    }
}

#[derive(Default)]
struct Host {
    next_id: usize,
    updated: Vec<usize>,
    destroyed: Vec<usize>,
}

impl ReconcileHost for Host {
    type Node = Rc<Node>;
    type Widget = Widget;

    fn widget_key<'w>(&self, widget: &'w Widget) -> Option<&'w Key> {
        widget.key.as_ref()
    }

    fn node_key(&self, node: &Rc<Node>) -> Option<Key> {
        node.key.clone()
    }

    fn can_update(&self, node: &Rc<Node>, widget: &Widget) -> bool {
        node.kind == widget.kind && node.key == widget.key
    }

    fn create(&mut self, widget: Widget) -> Result<Rc<Node>, NodeError> {
        self.next_id += 1;
        Ok(Rc::new(Node {
            id: self.next_id,
            kind: widget.kind,
            key: widget.key,
            value: Cell::new(widget.value),
        }))
    }

    fn update(&mut self, node: &Rc<Node>, widget: Widget) -> Result<(), NodeError> {
        node.value.set(widget.value);
        self.updated.push(node.id);
        Ok(())
    }

    fn destroy(&mut self, node: Rc<Node>) {
        self.destroyed.push(node.id);
    }
}

fn ids(nodes: &[Rc<Node>]) -> Vec<usize> {
    nodes.iter().map(|node| node.id).collect()
}

#[test]
fn keyed_reorder_reuses_and_destroys() {
    let mut host = Host::default();
    let old = reconcile(
        &mut host,
        Vec::new(),
        vec![keyed("item", 1), keyed("item", 2), keyed("item", 3)],
    )
    .unwrap();
    let (a, b, c) = (old[0].clone(), old[1].clone(), old[2].clone());

    let result = reconcile(&mut host, old, vec![keyed("item", 3), keyed("item", 1)]).unwrap();

    assert_eq!(result.len(), 2);
    assert!(Rc::ptr_eq(&result[0], &c));
    assert!(Rc::ptr_eq(&result[1], &a));
    assert_eq!(host.destroyed, vec![b.id]);
}

#[test]
fn unchanged_rebuild_is_idempotent() {
    let mut host = Host::default();
    let widgets = vec![plain("text", 1), keyed("row", 7), plain("text", 2)];
    let first = reconcile(&mut host, Vec::new(), widgets.clone()).unwrap();
    let before = ids(&first);

    let (second, stats) = reconcile_with_stats(&mut host, first, widgets).unwrap();

    assert_eq!(ids(&second), before);
    assert_eq!(
        stats,
        ReconcileStats {
            reused: 3,
            created: 0,
            destroyed: 0
        }
    );
    assert!(host.destroyed.is_empty());
}

#[test]
fn kinds_never_cross_even_with_equal_keys() {
    let mut host = Host::default();
    let old = reconcile(&mut host, Vec::new(), vec![keyed("text", 1)]).unwrap();
    let old_id = old[0].id;

    let result = reconcile(&mut host, old, vec![keyed("image", 1)]).unwrap();

    assert_ne!(result[0].id, old_id);
    assert_eq!(result[0].kind, "image");
    assert_eq!(host.destroyed, vec![old_id]);
}

#[test]
fn unkeyed_middle_nodes_are_destroyed_and_recreated() {
    let mut host = Host::default();
    let old = reconcile(
        &mut host,
        Vec::new(),
        vec![keyed("a", 1), plain("b", 0), plain("c", 0), keyed("a", 2)],
    )
    .unwrap();
    let old_ids = ids(&old);

    let result = reconcile(
        &mut host,
        old,
        vec![keyed("a", 1), plain("c", 0), plain("b", 0), keyed("a", 2)],
    )
    .unwrap();

    let new_ids = ids(&result);
    assert_eq!(new_ids[0], old_ids[0]);
    assert_eq!(new_ids[3], old_ids[3]);
    assert!(!old_ids.contains(&new_ids[1]));
    assert!(!old_ids.contains(&new_ids[2]));
    assert_eq!(host.destroyed, vec![old_ids[1], old_ids[2]]);
}

#[test]
fn tail_updates_run_after_the_middle() {
    let mut host = Host::default();
    let old = reconcile(
        &mut host,
        Vec::new(),
        vec![keyed("a", 1), keyed("a", 2), plain("tail", 9)],
    )
    .unwrap();
    let tail_id = old[2].id;
    host.updated.clear();

    let mut tail = plain("tail", 9);
    tail.value = 10;
    let result = reconcile(&mut host, old, vec![keyed("a", 2), keyed("a", 3), tail]).unwrap();

    assert_eq!(host.updated.last(), Some(&tail_id));
    assert_eq!(result[2].value.get(), 10);
}

#[test]
fn unmatched_keys_are_destroyed_exactly_once() {
    let mut host = Host::default();
    let old = reconcile(
        &mut host,
        Vec::new(),
        (1..=6).map(|key| keyed("item", key)).collect(),
    )
    .unwrap();
    let old_ids = ids(&old);

    let result = reconcile(
        &mut host,
        old,
        vec![keyed("item", 6), keyed("item", 2), keyed("item", 4)],
    )
    .unwrap();

    let mut destroyed = host.destroyed.clone();
    destroyed.sort_unstable();
    assert_eq!(destroyed, vec![old_ids[0], old_ids[2], old_ids[4]]);
    assert_eq!(ids(&result), vec![old_ids[5], old_ids[1], old_ids[3]]);
}

#[test]
fn duplicate_sibling_keys_fail_without_leaking_old_nodes() {
    let mut host = Host::default();
    let old = reconcile(&mut host, Vec::new(), vec![keyed("a", 1), plain("b", 2)]).unwrap();
    let old_ids = ids(&old);
    let created_before = host.next_id;

    let err = reconcile(&mut host, old, vec![keyed("a", 1), keyed("other", 1)]).unwrap_err();

    assert_eq!(
        err,
        NodeError::DuplicateKey {
            key: Key::from(1u64)
        }
    );
    assert_eq!(host.next_id, created_before);
    assert!(host.updated.is_empty());
    assert_eq!(host.destroyed, old_ids);
}

#[test]
fn unique_key_check_leaves_the_caller_in_charge() {
    let host = Host::default();
    assert_eq!(
        check_unique_keys(&host, &[keyed("a", 1), plain("b", 1), keyed("c", 2)]),
        Ok(())
    );
    assert!(check_unique_keys(&host, &[keyed("a", 3), keyed("b", 3)]).is_err());
    assert!(host.destroyed.is_empty());
}

#[test]
fn empty_new_list_destroys_everything() {
    let mut host = Host::default();
    let old = reconcile(&mut host, Vec::new(), vec![plain("a", 0), keyed("b", 1)]).unwrap();
    let result = reconcile(&mut host, old, Vec::new()).unwrap();
    assert!(result.is_empty());
    assert_eq!(host.destroyed.len(), 2);
}

#[test]
fn untracked_scope_permits_reconcile_inside_derivation() {
    let derived = derived_state_of(|| {
        untracked(|| {
            let mut host = Host::default();
            reconcile(&mut host, Vec::new(), vec![plain("a", 1)]).map(|nodes| nodes.len())
        })
    });
    assert_eq!(derived.get(), Ok(1));
}

#[test]
#[should_panic(expected = "tracked scope")]
fn reconcile_inside_tracked_scope_panics() {
    let derived = derived_state_of(|| {
        let mut host = Host::default();
        reconcile(&mut host, Vec::new(), vec![plain("a", 1)]).map(|nodes| nodes.len())
    });
    let _ = derived.get();
}
