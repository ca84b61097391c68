use super::*;

#[test]
fn intersect_clamps_inner_box_into_outer() {
    let outer = Constraints::UNBOUNDED;
    let inner = Constraints::loose(100.0, 100.0);
    assert_eq!(outer.intersect(inner), Constraints::loose(100.0, 100.0));

    let tight_outer = Constraints::tight(50.0, 50.0);
    assert_eq!(tight_outer.intersect(inner), Constraints::tight(50.0, 50.0));
}

#[test]
fn intersect_of_disjoint_boxes_stays_inside_outer() {
    let outer = Constraints::new(10.0, 20.0, 10.0, 20.0);
    let inner = Constraints::tight(200.0, 5.0);
    let result = outer.intersect(inner);
    assert_eq!(result, Constraints::tight(20.0, 10.0));
    assert!(result.is_normalized());
}

#[test]
fn deflate_never_goes_negative() {
    let c = Constraints::new(5.0, 30.0, 0.0, f32::INFINITY).deflate(10.0, 4.0);
    assert_eq!(c.min_width, 0.0);
    assert_eq!(c.max_width, 20.0);
    assert_eq!(c.min_height, 0.0);
    assert!(c.max_height.is_infinite());
}

#[test]
fn constrain_clamps_each_axis() {
    let c = Constraints::new(10.0, 100.0, 10.0, 100.0);
    assert_eq!(c.constrain(200.0, 5.0), (100.0, 10.0));
    assert!(c.is_satisfied_by(Size::new(50.0, 50.0)));
    assert!(!c.is_satisfied_by(Size::new(5.0, 50.0)));
}

#[test]
fn unbounded_is_default_and_reports_unbounded_axes() {
    let c = Constraints::default();
    assert!(!c.has_bounded_width());
    assert!(!c.has_bounded_height());
    assert!(!c.is_tight());
    assert!(c.is_normalized());
}
