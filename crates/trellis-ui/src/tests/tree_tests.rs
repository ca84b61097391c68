use super::*;
use crate::widgets::{Builder, Padding, Proxy, Row, SizedBox, Text};
use crate::{clear_callback_error_handler, set_callback_error_handler, WidgetExt};
use std::cell::RefCell;
use trellis_core::{mutable_state_of, Key, Lifecycle};
use trellis_ui_graphics::EdgeInsets;

#[derive(Default)]
struct Recorder {
    changes: RefCell<Vec<(Option<NodeId>, Vec<NodeId>, Vec<NodeId>)>>,
    disposed: RefCell<Vec<NodeId>>,
    fail_disposal: bool,
}

impl VisualBinding for Recorder {
    fn on_children_changed(
        &self,
        parent: Option<NodeId>,
        before: &[NodeId],
        after: &[NodeId],
    ) -> HookResult {
        self.changes
            .borrow_mut()
            .push((parent, before.to_vec(), after.to_vec()));
        Ok(())
    }

    fn on_disposed(&self, node: NodeId) -> HookResult {
        self.disposed.borrow_mut().push(node);
        if self.fail_disposal {
            return Err(format!("cannot release element for {node}").into());
        }
        Ok(())
    }
}

#[test]
fn set_root_reuses_a_matching_root() {
    let tree = StateTree::new();
    let first = tree.set_root(Proxy::default()).expect("root");
    let second = tree.set_root(Proxy::new(SizedBox(1.0, 1.0))).expect("root");

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(first.lifecycle(), Lifecycle::Active);
}

#[test]
fn set_root_replaces_on_kind_or_key_change() {
    let tree = StateTree::new();
    let proxy = tree.set_root(Proxy::default()).expect("root");
    let text = tree.set_root(Text::new("a")).expect("root");
    assert_eq!(proxy.lifecycle(), Lifecycle::Disposed);
    assert_ne!(proxy.id(), text.id());

    let keyed = tree.set_root(Text::new("a").keyed("other")).expect("root");
    assert_eq!(text.lifecycle(), Lifecycle::Disposed);
    assert_eq!(keyed.key(), Some(&Key::from("other")));
}

#[test]
fn builders_rerun_only_when_their_state_changes() {
    let tree = StateTree::new();
    let count = mutable_state_of(1usize);
    let builds = Rc::new(RefCell::new(Vec::new()));

    let reader = count.clone();
    let seen = builds.clone();
    tree.set_root(Builder::new(move |_| {
        let value = reader.get();
        seen.borrow_mut().push(value);
        (0..value).map(|_| SizedBox(1.0, 1.0).into_ref()).collect()
    }))
    .expect("root");

    tree.flush().expect("flush");
    tree.flush().expect("flush");
    assert_eq!(*builds.borrow(), vec![1]);

    count.set(3);
    tree.flush().expect("flush");
    assert_eq!(*builds.borrow(), vec![1, 3]);
    let root = tree.root().expect("root");
    assert_eq!(root.current_children().len(), 3);
}

#[test]
fn host_constraints_reach_builders_reactively() {
    let tree = StateTree::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = seen.clone();
    tree.set_root(Builder::single(move |cx| {
        record.borrow_mut().push(cx.constraints());
        SizedBox(10.0, 10.0).into_ref()
    }))
    .expect("root");

    let small = Constraints::loose(100.0, 100.0);
    let large = Constraints::loose(300.0, 200.0);
    tree.layout(small).expect("layout");
    tree.layout(large).expect("layout");
    tree.layout(large).expect("layout");

    assert_eq!(*seen.borrow(), vec![Some(small), Some(large)]);
    assert_eq!(tree.host_context().constraints(), Some(large));
}

#[test]
fn explicit_constraints_shadow_the_host() {
    let tree = StateTree::new();
    let seen = Rc::new(RefCell::new(None));
    let record = seen.clone();
    let recorder = Builder::single(move |cx| {
        *record.borrow_mut() = cx.constraints();
        SizedBox(10.0, 10.0).into_ref()
    });
    let boxed = crate::widgets::ConstrainedBox::max(50.0, 40.0).child(recorder);
    tree.set_root(boxed).expect("root");
    let bounds = Constraints::loose(500.0, 500.0);
    tree.layout(bounds).expect("layout");

    assert_eq!(*seen.borrow(), Some(Constraints::loose(50.0, 40.0)));
}

#[test]
fn builders_find_ancestor_widgets() {
    let tree = StateTree::new();
    let found = Rc::new(RefCell::new(None));
    let record = found.clone();
    tree.set_root(Padding::new(
        EdgeInsets::uniform(3.0),
        Builder::single(move |cx| {
            *record.borrow_mut() = cx.find_ancestor_widget::<Padding>().map(|p| p.padding);
            SizedBox(1.0, 1.0).into_ref()
        }),
    ))
    .expect("root");
    tree.flush().expect("flush");

    assert_eq!(*found.borrow(), Some(EdgeInsets::uniform(3.0)));
}

#[test]
fn binding_sees_structural_changes() {
    let tree = StateTree::new();
    let recorder = Rc::new(Recorder::default());
    tree.set_binding(recorder.clone());

    let root = tree
        .set_root(Row(vec![
            SizedBox(1.0, 1.0).keyed(1u32),
            SizedBox(1.0, 1.0).keyed(2u32),
        ]))
        .expect("root");
    tree.flush().expect("flush");
    let ids: Vec<NodeId> = root.current_children().iter().map(|c| c.id()).collect();

    tree.set_root(Row(vec![SizedBox(1.0, 1.0).keyed(2u32)]))
        .expect("root");
    tree.flush().expect("flush");

    let changes = recorder.changes.borrow();
    assert_eq!(changes[0], (None, vec![], vec![root.id()]));
    assert_eq!(changes[1], (Some(root.id()), vec![], ids.clone()));
    assert_eq!(changes[2], (Some(root.id()), ids.clone(), vec![ids[1]]));
    assert_eq!(*recorder.disposed.borrow(), vec![ids[0]]);
}

#[test]
fn duplicate_keys_keep_the_current_children() {
    let tree = StateTree::new();
    let recorder = Rc::new(Recorder::default());
    tree.set_binding(recorder.clone());
    let duplicated = mutable_state_of(false);

    let reader = duplicated.clone();
    let root = tree
        .set_root(Builder::new(move |_| {
            if reader.get() {
                vec![Proxy::default().keyed(1i32), Proxy::default().keyed(1i32)]
            } else {
                vec![Proxy::default().keyed(7i32)]
            }
        }))
        .expect("root");
    let before = root.children().expect("children");

    duplicated.set(true);
    let err = root.children().unwrap_err();
    assert_eq!(
        err,
        NodeError::DuplicateKey {
            key: Key::from(1i32)
        }
    );
    let kept = root.current_children();
    assert_eq!(kept.len(), 1);
    assert!(Rc::ptr_eq(&kept[0], &before[0]));
    assert_eq!(kept[0].lifecycle(), Lifecycle::Active);
    assert!(recorder.disposed.borrow().is_empty());

    duplicated.set(false);
    let after = root.children().expect("children");
    assert!(Rc::ptr_eq(&after[0], &before[0]));
    assert!(recorder.disposed.borrow().is_empty());
}

#[test]
fn failing_hooks_are_reported_not_propagated() {
    let tree = StateTree::new();
    tree.set_binding(Rc::new(Recorder {
        fail_disposal: true,
        ..Recorder::default()
    }));
    let failures = Rc::new(RefCell::new(Vec::new()));
    let sink = failures.clone();
    set_callback_error_handler(move |error| {
        sink.borrow_mut().push((error.hook, error.node));
    });

    let root = tree.set_root(Proxy::default()).expect("root");
    tree.clear();
    clear_callback_error_handler();

    assert_eq!(*failures.borrow(), vec![("on_disposed", Some(root.id()))]);
}

#[test]
fn layout_without_root_fails() {
    let tree = StateTree::new();
    assert_eq!(
        tree.layout(Constraints::UNBOUNDED),
        Err(LayoutError::NoRoot)
    );
}

#[test]
fn composite_root_is_laid_out_through() {
    let tree = StateTree::new();
    let root = tree
        .set_root(Builder::single(|_| SizedBox(30.0, 20.0).into_ref()))
        .expect("root");

    let bounds = Constraints::loose(100.0, 100.0);
    let size = tree.layout(bounds).expect("layout");

    assert_eq!(size, Size::new(30.0, 20.0));
    assert!(!root.needs_layout());
    assert!(root.size().is_err());
}
