use glamx::{Vec2, Vec3};
use lumina::mesh::MeshData;
use lumina::text::{extrude_contours, shapes_from_contours};
use lumina::viewport::{ResizeObserver, Viewport};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

fn square(center: Vec2, half: f32, ccw: bool) -> Vec<Vec2> {
    let mut points = vec![
        center + Vec2::new(-half, -half),
        center + Vec2::new(half, -half),
        center + Vec2::new(half, half),
        center + Vec2::new(-half, half),
    ];
    if !ccw {
        points.reverse();
    }
    points
}

/// Directed edges left without their opposite once vertices at the same position are
/// merged.
fn open_edges(mesh: &MeshData) -> usize {
    let mut ids = HashMap::new();
    let key = |p: Vec3| {
        let q = (p * 1.0e4).round();
        (q.x as i64, q.y as i64, q.z as i64)
    };
    let welded: Vec<usize> = mesh
        .coords
        .iter()
        .map(|p| {
            let next = ids.len();
            *ids.entry(key(*p)).or_insert(next)
        })
        .collect();

    let mut edges: HashMap<(usize, usize), i64> = HashMap::new();
    for face in &mesh.faces {
        for i in 0..3 {
            let a = welded[face[i] as usize];
            let b = welded[face[(i + 1) % 3] as usize];
            if a == b {
                continue;
            }
            *edges.entry((a, b)).or_default() += 1;
        }
    }

    edges
        .iter()
        .filter(|((a, b), count)| edges.get(&(*b, *a)).copied().unwrap_or(0) != **count)
        .count()
}

#[test]
fn extruded_glyph_with_a_hole_is_closed() {
    // An "O"-like glyph: clockwise outer boundary and counter-clockwise hole.
    let contours = [
        square(Vec2::ZERO, 2.0, false),
        square(Vec2::new(0.3, -0.2), 1.0, true),
    ];
    assert_eq!(shapes_from_contours(&contours)[0].holes.len(), 1);

    let mesh = extrude_contours(&contours, 0.5);
    assert_eq!(open_edges(&mesh), 0);

    let (min, max) = mesh.bounds().unwrap();
    assert_eq!(min, Vec3::new(-2.0, -2.0, 0.0));
    assert_eq!(max, Vec3::new(2.0, 2.0, 0.5));
}

#[test]
fn separate_glyphs_are_closed_independently() {
    let contours = [
        square(Vec2::ZERO, 1.0, true),
        square(Vec2::new(5.0, 0.0), 1.0, true),
        square(Vec2::new(5.0, 0.0), 0.5, false),
    ];
    let shapes = shapes_from_contours(&contours);
    assert_eq!(shapes.len(), 2);

    let mesh = extrude_contours(&contours, 1.0);
    assert_eq!(open_edges(&mesh), 0);
}

#[test]
fn resize_guard_detaches_on_drop() {
    let mut observer = ResizeObserver::new();
    let seen = Rc::new(Cell::new(0));

    let counter = seen.clone();
    let guard = observer.subscribe(move |_| counter.set(counter.get() + 1));
    assert!(observer.observe(Viewport::new(800, 600)));
    assert_eq!(seen.get(), 1);

    assert!(!observer.observe(Viewport::new(800, 600)));
    assert_eq!(seen.get(), 1);

    drop(guard);
    assert_eq!(observer.subscriber_count(), 0);
    assert!(observer.observe(Viewport::new(1024, 768)));
    assert_eq!(seen.get(), 1);
}
