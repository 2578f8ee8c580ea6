//! Planar shapes to closed, extruded triangle meshes.

use crate::mesh::MeshData;
use glamx::{Vec2, Vec3};

const EPSILON: f32 = 1.0e-6;

/// A filled region: one outer boundary and the holes punched into it.
///
/// Outer boundaries run counter-clockwise, holes clockwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Silhouette {
    /// Outer boundary.
    pub outer: Vec<Vec2>,
    /// Holes.
    pub holes: Vec<Vec<Vec2>>,
}

/// Signed area of a closed polygon; positive when counter-clockwise.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

fn contains(polygon: &[Vec2], p: Vec2) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);

    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Drops repeated points, the closing duplicate and collinear points.
fn clean(contour: &[Vec2]) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = Vec::with_capacity(contour.len());
    for p in contour {
        if points.last().is_none_or(|last| last.distance_squared(*p) > EPSILON * EPSILON) {
            points.push(*p);
        }
    }
    while points.len() > 1
        && points[0].distance_squared(points[points.len() - 1]) <= EPSILON * EPSILON
    {
        let _ = points.pop();
    }

    let mut changed = true;
    while changed && points.len() >= 3 {
        changed = false;
        let n = points.len();
        for i in 0..n {
            let (a, b, c) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
            if (b - a).perp_dot(c - b).abs() <= EPSILON * (b - a).length().max(1.0) {
                let _ = points.remove(i);
                changed = true;
                break;
            }
        }
    }

    points
}

/// Groups raw outline contours into shapes.
///
/// The winding of the largest contour decides which orientation marks outer boundaries,
/// so both TrueType and PostScript conventions work. Each hole goes to the smallest outer
/// boundary containing it; holes contained by none are dropped.
pub fn shapes_from_contours(contours: &[Vec<Vec2>]) -> Vec<Silhouette> {
    let contours: Vec<(Vec<Vec2>, f32)> = contours
        .iter()
        .map(|c| clean(c))
        .filter(|c| c.len() >= 3)
        .map(|c| {
            let area = signed_area(&c);
            (c, area)
        })
        .filter(|(_, area)| area.abs() > EPSILON)
        .collect();

    let Some(dominant) = contours
        .iter()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .map(|(_, area)| area.signum())
    else {
        return Vec::new();
    };

    let mut shapes: Vec<(Silhouette, f32)> = Vec::new();
    let mut holes = Vec::new();

    for (mut points, area) in contours {
        if area.signum() == dominant {
            if area < 0.0 {
                points.reverse();
            }
            shapes.push((
                Silhouette {
                    outer: points,
                    holes: Vec::new(),
                },
                area.abs(),
            ));
        } else {
            if area > 0.0 {
                points.reverse();
            }
            holes.push(points);
        }
    }

    for hole in holes {
        let owner = shapes
            .iter_mut()
            .filter(|(shape, _)| contains(&shape.outer, hole[0]))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match owner {
            Some((shape, _)) => shape.holes.push(hole),
            None => log::debug!("dropping a hole outside of every outline"),
        }
    }

    shapes.into_iter().map(|(shape, _)| shape).collect()
}

fn segments_cross(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = (p2 - p1).perp_dot(q1 - p1);
    let d2 = (p2 - p1).perp_dot(q2 - p1);
    let d3 = (q2 - q1).perp_dot(p1 - q1);
    let d4 = (q2 - q1).perp_dot(p2 - q1);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// Connects every hole to the outer boundary with a zero-width bridge, producing a single
/// polygon (vertex positions may repeat along bridges).
fn bridge_holes(shape: &Silhouette) -> Vec<Vec2> {
    let mut polygon = shape.outer.clone();
    let mut holes: Vec<&Vec<Vec2>> = shape.holes.iter().collect();
    holes.sort_by(|a, b| {
        let max_x = |h: &Vec<Vec2>| h.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        max_x(b).total_cmp(&max_x(a))
    });

    for (k, hole) in holes.iter().enumerate() {
        let Some(m) = (0..hole.len()).max_by(|a, b| hole[*a].x.total_cmp(&hole[*b].x)) else {
            continue;
        };
        let from = hole[m];

        let blocked = |to: Vec2| {
            let crosses = |ring: &[Vec2]| {
                (0..ring.len())
                    .any(|i| segments_cross(from, to, ring[i], ring[(i + 1) % ring.len()]))
            };
            crosses(&polygon) || holes[k..].iter().any(|h| crosses(h))
        };

        let target = (0..polygon.len())
            .filter(|i| !blocked(polygon[*i]))
            .min_by(|a, b| {
                from.distance_squared(polygon[*a])
                    .total_cmp(&from.distance_squared(polygon[*b]))
            })
            .or_else(|| {
                (0..polygon.len()).min_by(|a, b| {
                    from.distance_squared(polygon[*a])
                        .total_cmp(&from.distance_squared(polygon[*b]))
                })
            });

        let Some(p) = target else {
            continue;
        };

        let mut merged = Vec::with_capacity(polygon.len() + hole.len() + 2);
        merged.extend_from_slice(&polygon[..=p]);
        merged.extend((0..=hole.len()).map(|i| hole[(m + i) % hole.len()]));
        merged.push(polygon[p]);
        merged.extend_from_slice(&polygon[p + 1..]);
        polygon = merged;
    }

    polygon
}

fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).perp_dot(p - a) >= 0.0
        && (c - b).perp_dot(p - b) >= 0.0
        && (a - c).perp_dot(p - c) >= 0.0
}

/// Ear-clips a counter-clockwise polygon into triangles indexing `polygon`.
pub fn triangulate(polygon: &[Vec2]) -> Vec<[u32; 3]> {
    let mut remaining: Vec<usize> = (0..polygon.len()).collect();
    let mut triangles = Vec::with_capacity(polygon.len().saturating_sub(2));

    while remaining.len() > 3 {
        let n = remaining.len();
        let corner = |i: usize| {
            (
                remaining[(i + n - 1) % n],
                remaining[i],
                remaining[(i + 1) % n],
            )
        };

        let is_ear = |i: usize| {
            let (ia, ib, ic) = corner(i);
            let (a, b, c) = (polygon[ia], polygon[ib], polygon[ic]);
            if (b - a).perp_dot(c - b) <= EPSILON {
                return false;
            }

            remaining.iter().all(|&j| {
                let p = polygon[j];
                j == ia
                    || j == ib
                    || j == ic
                    || p == a
                    || p == b
                    || p == c
                    || !in_triangle(p, a, b, c)
            })
        };

        // A polygon always has an ear; numerical trouble is the only way to miss one, and
        // then the most convex corner goes.
        let ear = (0..n).find(|i| is_ear(*i)).unwrap_or_else(|| {
            (0..n)
                .max_by(|x, y| {
                    let turn = |i: usize| {
                        let (a, b, c) = corner(i);
                        (polygon[b] - polygon[a]).perp_dot(polygon[c] - polygon[b])
                    };
                    turn(*x).total_cmp(&turn(*y))
                })
                .unwrap_or(0)
        });

        let (a, b, c) = corner(ear);
        triangles.push([a as u32, b as u32, c as u32]);
        let _ = remaining.remove(ear);
    }

    if let [a, b, c] = remaining[..] {
        triangles.push([a as u32, b as u32, c as u32]);
    }

    triangles
}

fn push_vertex(mesh: &mut MeshData, p: Vec3, n: Vec3) -> u32 {
    mesh.coords.push(p);
    if let Some(normals) = &mut mesh.normals {
        normals.push(n);
    }
    mesh.coords.len() as u32 - 1
}

/// Triangulates `shape` into caps at `z = 0` and `z = depth` joined by side walls.
///
/// With a zero depth only the front cap is produced.
pub fn extrude(shape: &Silhouette, depth: f32) -> MeshData {
    let polygon = bridge_holes(shape);
    let cap = triangulate(&polygon);

    let mut mesh = MeshData {
        normals: Some(Vec::new()),
        ..MeshData::default()
    };

    // Front cap.
    let front: Vec<u32> = polygon
        .iter()
        .map(|p| push_vertex(&mut mesh, p.extend(depth), Vec3::Z))
        .collect();
    mesh.faces.extend(cap.iter().map(|t| {
        [
            front[t[0] as usize],
            front[t[1] as usize],
            front[t[2] as usize],
        ]
    }));

    if depth.abs() <= EPSILON {
        return mesh;
    }

    // Back cap.
    let back: Vec<u32> = polygon
        .iter()
        .map(|p| push_vertex(&mut mesh, p.extend(0.0), -Vec3::Z))
        .collect();
    mesh.faces.extend(cap.iter().map(|t| {
        [
            back[t[0] as usize],
            back[t[2] as usize],
            back[t[1] as usize],
        ]
    }));

    // Side walls, one flat quad per edge.
    for ring in std::iter::once(&shape.outer).chain(shape.holes.iter()) {
        for i in 0..ring.len() {
            let (a, b) = (ring[i], ring[(i + 1) % ring.len()]);
            let edge = b - a;
            let normal = Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero();

            let a0 = push_vertex(&mut mesh, a.extend(0.0), normal);
            let b0 = push_vertex(&mut mesh, b.extend(0.0), normal);
            let b1 = push_vertex(&mut mesh, b.extend(depth), normal);
            let a1 = push_vertex(&mut mesh, a.extend(depth), normal);

            mesh.faces.push([a0, b0, b1]);
            mesh.faces.push([a0, b1, a1]);
        }
    }

    mesh
}

/// Extrudes every shape found in raw outline contours into one mesh.
pub fn extrude_contours(contours: &[Vec<Vec2>], depth: f32) -> MeshData {
    let mut mesh = MeshData::default();
    for shape in shapes_from_contours(contours) {
        mesh.append(&extrude(&shape, depth));
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32, ccw: bool) -> Vec<Vec2> {
        let mut points = vec![
            Vec2::new(-size, -size),
            Vec2::new(size, -size),
            Vec2::new(size, size),
            Vec2::new(-size, size),
        ];
        if !ccw {
            points.reverse();
        }
        points
    }

    #[test]
    fn classifies_holes_by_relative_winding() {
        // Clockwise outer contour, as TrueType glyphs store them.
        let shapes = shapes_from_contours(&[square(2.0, false), square(1.0, true)]);

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].holes.len(), 1);
        assert!(signed_area(&shapes[0].outer) > 0.0);
        assert!(signed_area(&shapes[0].holes[0]) < 0.0);
    }

    #[test]
    fn clean_removes_collinear_and_closing_points() {
        let contour = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(0.0, 0.0),
        ];
        assert_eq!(clean(&contour).len(), 4);
    }

    #[test]
    fn triangulated_area_matches_polygon() {
        let shape = &shapes_from_contours(&[square(2.0, true), square(1.0, false)])[0];
        let polygon = bridge_holes(shape);
        let triangles = triangulate(&polygon);

        let corners = |t: &[u32; 3]| t.map(|i| polygon[i as usize]);
        let area: f32 = triangles.iter().map(|t| signed_area(&corners(t))).sum();
        assert!((area - 12.0).abs() < 1.0e-4);
        assert!(triangles
            .iter()
            .all(|t| signed_area(&corners(t)) >= -1.0e-6));
    }

    #[test]
    fn flat_extrusion_is_a_single_cap() {
        let shape = Silhouette {
            outer: square(1.0, true),
            holes: Vec::new(),
        };
        let mesh = extrude(&shape, 0.0);
        assert_eq!(mesh.num_triangles(), 2);
        assert!(mesh.normals.unwrap().iter().all(|n| *n == Vec3::Z));
    }
}
