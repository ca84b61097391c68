use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trellis_ui::prelude::*;

const SECTION_COUNT: usize = 4;
const ROWS_PER_SECTION_SAMPLES: &[usize] = &[16, 64];
const LIST_LENGTH: usize = 10_000;
const ROOT: (f32, f32) = (1080.0, 1920.0);

fn ui_object_count(sections: usize, rows_per_section: usize) -> usize {
    // Column + per section (column, title) + per row (row, expanded, 2 texts).
    1 + sections * (2 + rows_per_section * 4)
}

fn pipeline_content(sections: usize, rows_per_section: usize, revision: usize) -> WidgetRef {
    let children: Vec<WidgetRef> = (0..sections)
        .map(|section| {
            let mut rows = vec![Text::new(format!("Section {section}")).into_ref()];
            rows.extend((0..rows_per_section).map(|row| {
                Row(vec![
                    Expanded(Text::new(format!("Item {section}-{row} title"))).into_ref(),
                    Text::new(format!("Detail {}", row + revision)).into_ref(),
                ])
                .keyed(row)
            }));
            Column(rows)
                .main_axis_size(MainAxisSize::Min)
                .keyed(section)
        })
        .collect();
    Column(children).into_ref()
}

fn root_constraints() -> Constraints {
    Constraints::tight(ROOT.0, ROOT.1)
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_rebuild");
    for &rows in ROWS_PER_SECTION_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("ui_objects", ui_object_count(SECTION_COUNT, rows)),
            &rows,
            |b, &rows| {
                let tree = StateTree::new();
                tree.set_root(pipeline_content(SECTION_COUNT, rows, 0))
                    .expect("root");
                tree.flush().expect("flush");
                let mut revision = 0;
                b.iter(|| {
                    revision += 1;
                    tree.set_root(pipeline_content(SECTION_COUNT, rows, revision))
                        .expect("root");
                    tree.flush().expect("flush");
                });
            },
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_layout");
    for &rows in ROWS_PER_SECTION_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("ui_objects", ui_object_count(SECTION_COUNT, rows)),
            &rows,
            |b, &rows| {
                let tree = StateTree::new();
                tree.set_root(pipeline_content(SECTION_COUNT, rows, 0))
                    .expect("root");
                let narrow = Constraints::tight(ROOT.0 / 2.0, ROOT.1);
                let mut flip = false;
                b.iter(|| {
                    flip = !flip;
                    let constraints = if flip { narrow } else { root_constraints() };
                    black_box(tree.layout(constraints).expect("layout"));
                });
            },
        );
    }
    group.finish();
}

fn bench_cached_layout(c: &mut Criterion) {
    let tree = StateTree::new();
    tree.set_root(pipeline_content(SECTION_COUNT, 64, 0))
        .expect("root");
    tree.layout(root_constraints()).expect("layout");

    c.bench_function("pipeline_cached_layout", |b| {
        b.iter(|| black_box(tree.layout(root_constraints()).expect("layout")));
    });
}

fn bench_keyed_reverse(c: &mut Criterion) {
    let forward: Vec<usize> = (0..512).collect();
    let reversed: Vec<usize> = forward.iter().rev().copied().collect();
    let content = |order: &[usize]| {
        Column(
            order
                .iter()
                .map(|&key| SizedBox(10.0, 10.0).keyed(key))
                .collect(),
        )
    };

    let tree = StateTree::new();
    tree.set_root(content(&forward)).expect("root");
    tree.flush().expect("flush");
    let mut flip = false;

    c.bench_function("keyed_reverse_512", |b| {
        b.iter(|| {
            flip = !flip;
            let order = if flip { &reversed } else { &forward };
            tree.set_root(content(order)).expect("root");
            tree.flush().expect("flush");
        });
    });
}

fn bench_virtual_scroll(c: &mut Criterion) {
    let scroll = ScrollState::default();
    let children = (0..LIST_LENGTH)
        .map(|index| Text::new(format!("Row {index}")).keyed(index))
        .collect();
    let tree = StateTree::new();
    tree.set_root(VirtualList::new(Axis::Vertical, scroll.clone(), children).cache_extent(200.0))
        .expect("root");
    tree.layout(root_constraints()).expect("layout");

    c.bench_function("virtual_list_scroll_10k", |b| {
        b.iter(|| {
            scroll.scroll_by(37.0);
            if scroll.offset_untracked() > 150_000.0 {
                scroll.scroll_to(0.0);
            }
            black_box(tree.layout(root_constraints()).expect("layout"));
        });
    });
}

criterion_group!(
    pipeline,
    bench_rebuild,
    bench_layout,
    bench_cached_layout,
    bench_keyed_reverse,
    bench_virtual_scroll
);
criterion_main!(pipeline);
