use super::*;
use crate::widgets::{Builder, Proxy, SizedBox, Text};
use crate::{StateTree, WidgetExt};
use std::cell::{Cell, RefCell};
use trellis_ui_layout::Constraints;

#[test]
fn mounting_twice_is_rejected() {
    let tree = StateTree::new();
    let root = tree.set_root(Proxy::default()).expect("root");
    assert_eq!(root.lifecycle(), Lifecycle::Active);

    let err = root.mount(tree.host_context()).unwrap_err();
    assert_eq!(err, NodeError::AlreadyMounted { id: root.id() });
}

#[test]
fn update_with_another_kind_is_a_type_mismatch() {
    let tree = StateTree::new();
    let root = tree.set_root(Proxy::default()).expect("root");

    let err = root.update(Text::new("x").into_ref()).unwrap_err();
    assert_eq!(
        err,
        NodeError::TypeMismatch {
            id: root.id(),
            expected: std::any::type_name::<Proxy>(),
            found: std::any::type_name::<Text>(),
        }
    );
}

#[test]
fn init_state_runs_once_per_node() {
    let tree = StateTree::new();
    let inits = Rc::new(Cell::new(0));
    let make = |inits: Rc<Cell<usize>>| {
        Builder::new(|_| Vec::new()).on_init(move |_| inits.set(inits.get() + 1))
    };

    let first = tree.set_root(make(inits.clone())).expect("root");
    let second = tree.set_root(make(inits.clone())).expect("root");

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(inits.get(), 1);
}

#[test]
fn dispose_runs_children_before_parents() {
    let tree = StateTree::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let child_log = log.clone();
    let parent_log = log.clone();
    let parent = Builder::new(move |_| {
        let child_log = child_log.clone();
        let child = Builder::new(|_| Vec::new())
            .on_dispose(move |_| child_log.borrow_mut().push("child"));
        vec![child.into_ref()]
    })
    .on_dispose(move |_| parent_log.borrow_mut().push("parent"));
    let root = tree.set_root(parent).expect("root");
    tree.flush().expect("flush");
    let child = root.current_children()[0].clone();

    tree.clear();

    assert_eq!(*log.borrow(), vec!["child", "parent"]);
    assert_eq!(child.lifecycle(), Lifecycle::Disposed);
    assert_eq!(root.lifecycle(), Lifecycle::Disposed);
    assert!(tree.root().is_none());
}

#[test]
fn disposed_nodes_reject_updates() {
    let tree = StateTree::new();
    let root = tree.set_root(Proxy::default()).expect("root");
    tree.clear();

    let err = root.update(Proxy::default().into_ref()).unwrap_err();
    assert_eq!(err, NodeError::Disposed { id: root.id() });
}

#[test]
#[should_panic(expected = "disposed twice")]
fn disposing_twice_panics() {
    let tree = StateTree::new();
    let root = tree.set_root(Proxy::default()).expect("root");
    tree.clear();
    root.dispose();
}

#[test]
fn global_key_is_released_with_its_node() {
    let tree = StateTree::new();
    let key = GlobalKey::labeled("panel");

    let root = tree
        .set_root(Proxy::default().keyed(key.clone()))
        .expect("root");
    let found = tree.find_global(&key).expect("claimed");
    assert!(Rc::ptr_eq(&found, &root));
    let from_context = root.context().find_global(&key).expect("in context");
    assert!(Rc::ptr_eq(&from_context, &root));

    tree.set_root(SizedBox(1.0, 1.0)).expect("replace");
    assert!(tree.find_global(&key).is_none());
}

#[test]
fn reading_layout_outputs_before_layout_fails() {
    let tree = StateTree::new();
    let root = tree.set_root(SizedBox(10.0, 10.0)).expect("root");

    assert_eq!(
        root.size(),
        Err(LayoutError::NotMeasured { node: root.id() })
    );
    assert_eq!(
        root.scroll_to_index(0, ScrollAnchor::Start),
        Err(LayoutError::NotAList { node: root.id() })
    );
}

#[test]
fn children_parent_links_point_back() {
    let tree = StateTree::new();
    let content = Proxy::new(SizedBox(5.0, 5.0));
    let root = tree.set_root(content).expect("root");
    let children = root.children().expect("children");

    assert_eq!(children.len(), 1);
    let parent = children[0].parent().expect("parent");
    assert!(Rc::ptr_eq(&parent, &root));
    assert!(root.parent().is_none());
    assert!(root.context().parent().expect("host").is_host());
}

#[test]
fn nodes_report_their_layout_role_and_liveness() {
    let tree = StateTree::new();
    let header = Builder::single(|_| SizedBox(4.0, 2.0).into_ref()).named("Header");
    let root = tree.set_root(header).expect("root");
    assert!(format!("{:?}", root.widget_untracked().widget()).contains("Header"));
    assert_eq!(root.layout_kind(), None);

    let child = root.children().expect("children")[0].clone();
    assert_eq!(
        child.layout_kind(),
        Some(LayoutKind::ConstrainedBox(Constraints::tight(4.0, 2.0)))
    );
    assert!(child.lifecycle().is_live());

    tree.clear();
    assert!(!child.lifecycle().is_live());
}
