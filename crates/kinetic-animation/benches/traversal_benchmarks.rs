//! Traversal Benchmarks
//!
//! Per-frame draw traversal and bounds aggregation over full binary mobiles

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Mat4, Vec3};
use kinetic_animation::{Mobile, NodeId};
use kinetic_core::{Face, Mesh};
use kinetic_renderer::{DrawList, Material};

fn tetrahedron() -> Mesh {
    let vertices = vec![
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ];
    let faces = vec![
        Face::from_slice(&[0, 1, 3]),
        Face::from_slice(&[0, 2, 1]),
        Face::from_slice(&[0, 3, 2]),
        Face::from_slice(&[1, 2, 3]),
    ];
    Mesh::new(vertices, faces).unwrap().scaled(0.25)
}

/// Full binary mobile with `levels` levels
fn full_mobile(levels: usize) -> Mobile {
    let mesh = tetrahedron();
    let mut builder = Mobile::builder(mesh.clone());
    builder
        .root()
        .material(Material::default())
        .radius(2f32.powi(levels as i32))
        .parent_height(1.0)
        .child_height(0.5)
        .spin_speed(0.1)
        .arm_speed(0.05);

    let mut frontier: Vec<NodeId> = vec![builder.root().id()];
    for _ in 1..levels {
        let mut next = Vec::with_capacity(frontier.len() * 2);
        for id in frontier {
            next.push(builder.at(id).unwrap().left(mesh.clone()).unwrap().id());
            next.push(builder.at(id).unwrap().right(mesh.clone()).unwrap().id());
        }
        frontier = next;
    }
    builder.build().unwrap()
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("mobile_draw");

    for levels in [3usize, 6, 9].iter() {
        let mut mobile = full_mobile(*levels);
        mobile.start_all(0.0);
        let mut renderer = DrawList::default();
        let mut now = 0.0;

        group.bench_with_input(BenchmarkId::from_parameter(levels), levels, |b, _| {
            b.iter(|| {
                now += 16.0;
                renderer.begin_frame().unwrap();
                mobile.draw(&mut renderer, Mat4::IDENTITY, now).unwrap();
                renderer.end_frame().unwrap();
                black_box(renderer.stats().draw_calls)
            })
        });
    }

    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("mobile_bounds");

    for levels in [3usize, 6, 9].iter() {
        let mobile = full_mobile(*levels);
        group.bench_with_input(BenchmarkId::from_parameter(levels), levels, |b, _| {
            b.iter(|| black_box(mobile.bounds()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_draw, bench_bounds);
criterion_main!(benches);
