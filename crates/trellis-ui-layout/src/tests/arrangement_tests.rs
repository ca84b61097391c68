use super::LinearArrangement;

fn positions(arrangement: LinearArrangement, total: f32, sizes: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0; sizes.len()];
    arrangement.arrange(total, sizes, &mut out);
    out
}

#[test]
fn space_between_splits_free_space_between_neighbours() {
    let out = positions(LinearArrangement::SpaceBetween, 100.0, &[10.0, 20.0, 30.0]);
    assert_eq!(out, vec![0.0, 30.0, 70.0]);
}

#[test]
fn space_evenly_distributes_gaps() {
    let out = positions(LinearArrangement::SpaceEvenly, 100.0, &[10.0, 10.0, 10.0]);
    assert_eq!(out, vec![17.5, 45.0, 72.5]);
}

#[test]
fn space_around_uses_half_gap_at_edges() {
    let out = positions(LinearArrangement::SpaceAround, 100.0, &[20.0, 20.0]);
    assert_eq!(out, vec![15.0, 65.0]);
}

#[test]
fn end_and_center_shift_the_block() {
    assert_eq!(
        positions(LinearArrangement::End, 100.0, &[10.0, 20.0]),
        vec![70.0, 80.0]
    );
    assert_eq!(
        positions(LinearArrangement::Center, 100.0, &[10.0, 20.0]),
        vec![35.0, 45.0]
    );
}

#[test]
fn spaced_by_uses_fixed_spacing() {
    let out = positions(LinearArrangement::spaced_by(5.0), 40.0, &[10.0, 10.0]);
    assert_eq!(out, vec![0.0, 15.0]);
    assert_eq!(LinearArrangement::spaced_by(5.0).fixed_spacing(3), 10.0);
}

#[test]
fn overflow_packs_at_start() {
    let out = positions(LinearArrangement::SpaceEvenly, 20.0, &[15.0, 15.0]);
    assert_eq!(out, vec![0.0, 15.0]);
}

#[test]
fn single_child_space_between_stays_at_start() {
    let out = positions(LinearArrangement::SpaceBetween, 100.0, &[10.0]);
    assert_eq!(out, vec![0.0]);
}
