use std::cell::RefCell;
use std::rc::Rc;
use trellis_testing::prelude::*;
use trellis_ui::prelude::*;
use trellis_ui::{clear_callback_error_handler, set_callback_error_handler, Lifecycle};

#[test]
fn keyed_children_survive_reordering() {
    let rule = TreeTestRule::new();
    let root = rule
        .set_content(Column(vec![
            Text::new("A").keyed(1u32),
            Text::new("B").keyed(2u32),
            Text::new("C").keyed(3u32),
        ]))
        .expect("content");
    let before = root.current_children();
    rule.binding().take_events();

    let reordered = vec![Text::new("C").keyed(3u32), Text::new("A").keyed(1u32)];
    rule.set_content(Column(reordered)).expect("content");
    let after = root.current_children();

    assert_eq!(after.len(), 2);
    assert!(Rc::ptr_eq(&after[0], &before[2]));
    assert!(Rc::ptr_eq(&after[1], &before[0]));
    assert_eq!(before[1].lifecycle(), Lifecycle::Disposed);
    assert_eq!(rule.binding().disposed(), vec![before[1].id()]);
    assert!(rule
        .binding()
        .events()
        .contains(&BindingEvent::ChildrenChanged {
            parent: Some(root.id()),
            before: before.iter().map(|node| node.id()).collect(),
            after: vec![before[2].id(), before[0].id()],
        }));
}

#[test]
fn virtual_list_places_only_the_window() {
    let rule = TreeTestRule::new();
    let children = (0..100usize)
        .map(|index| SizedBox(10.0, 50.0).keyed(index))
        .collect();
    let list = rule
        .set_content(VirtualList::new(Axis::Vertical, ScrollState::new(1000.0), children))
        .expect("content");
    rule.pump().expect("pump");

    let items = list.current_children();
    assert_eq!(list.visible_range().expect("range"), 20..32);
    assert_eq!(
        rule.bounds_of(items[21].id()),
        Some(Rect::from_origin_size(Point::new(0.0, 50.0), Size::new(800.0, 50.0)))
    );
    assert_eq!(rule.bounds_of(items[19].id()), None);
    let placed = rule.binding().last_layout(list.id()).expect("laid out");
    assert_eq!(placed.len(), 12);
}

#[test]
fn text_positions_resolve_to_window_space() {
    let rule = TreeTestRule::new();
    rule.set_content(Padding::new(
        EdgeInsets::uniform(10.0),
        Column(vec![Text::new("title").into_ref(), Text::new("body").into_ref()]),
    ))
    .expect("content");
    rule.pump().expect("pump");

    let title = rule.find_text("title").expect("title");
    let body = rule.find_text("body").expect("body");
    assert_eq!(
        rule.bounds_of(title.id()),
        Some(Rect::from_origin_size(Point::new(10.0, 10.0), Size::new(40.0, 20.0)))
    );
    assert_eq!(rule.bounds_of(body.id()).map(|rect| rect.y), Some(30.0));

    let dump = rule.dump_tree();
    assert!(dump.starts_with("Padding#"));
    assert_eq!(dump.matches("Text#").count(), 2);
}

#[test]
fn identical_text_is_measured_once() {
    let rule = TreeTestRule::new();
    let texts = vec![Text::new("same").into_ref(), Text::new("same").into_ref()];
    rule.set_content(Column(texts)).expect("content");

    rule.pump().expect("pump");
    rule.pump().expect("pump");

    assert_eq!(rule.measure_calls(), 1);
    assert_eq!(rule.tree().text_cache_stats().hits, 1);
}

#[test]
fn failing_layout_hooks_do_not_abort_the_pass() {
    let rule = TreeTestRule::new();
    rule.binding().fail_hook("on_layout");
    let failures = Rc::new(RefCell::new(Vec::new()));
    let sink = failures.clone();
    set_callback_error_handler(move |error| sink.borrow_mut().push(error.node));

    let root = rule
        .set_content(Row(vec![
            SizedBox(10.0, 10.0).into_ref(),
            SizedBox(20.0, 10.0).into_ref(),
        ]))
        .expect("content");
    let size = rule.pump();
    clear_callback_error_handler();

    assert_eq!(size, Ok(Size::new(800.0, 600.0)));
    assert_eq!(failures.borrow().len(), 3);
    assert_eq!(failures.borrow()[0], Some(root.id()));
    assert!(root.layout_data().is_ok());
}

#[test]
fn state_writes_flow_through_to_layout() {
    let rule = TreeTestRule::new();
    let items = mutable_state_of(2usize);
    let reader = items.clone();
    let rows = Builder::new(move |_| {
        (0..reader.get())
            .map(|index| SizedBox(10.0, 10.0).keyed(index))
            .collect()
    });
    let root = rule
        .set_content(Column(vec![rows.into_ref()]).main_axis_size(MainAxisSize::Min))
        .expect("content");
    let bounds = Constraints::loose(100.0, 100.0);
    rule.pump_with(bounds).expect("pump");
    assert_eq!(root.size(), Ok(Size::new(10.0, 20.0)));

    items.set(5);
    assert!(root.needs_layout());
    rule.pump_with(bounds).expect("pump");

    assert_eq!(root.size(), Ok(Size::new(10.0, 50.0)));
    assert_eq!(root.layout_data().expect("positioned").len(), 5);
}

#[test]
fn run_test_tree_gives_a_fresh_rule() {
    let size = run_test_tree(|rule| {
        rule.set_viewport(320.0, 240.0);
        let content = Center(SizedBox(20.0, 20.0));
        rule.set_content(content).expect("content");
        rule.pump().expect("pump")
    });

    assert_eq!(size, Size::new(320.0, 240.0));
}
