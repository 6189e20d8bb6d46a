//! Mesh Geometry
//!
//! Immutable polyhedral meshes with Newell face normals, averaged vertex
//! normals, and per-face vertex duplication for flat shading.

use glam::{Mat4, Vec3};
use smallvec::SmallVec;

use crate::math::{self, Bounds};
use crate::{CoreError, CoreResult};

/// Index list of one polygon, wound counter-clockwise
pub type Face = SmallVec<[u32; 4]>;

/// Construction options for [`Mesh::with_options`]
#[derive(Debug, Clone)]
pub struct MeshOptions {
    /// Precomputed face normals, one per face
    pub face_normals: Option<Vec<Vec3>>,
    /// Precomputed vertex normals, one per input vertex
    pub vertex_normals: Option<Vec<Vec3>>,
    /// Give every face its own copy of its vertices
    pub duplicate: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            face_normals: None,
            vertex_normals: None,
            duplicate: true,
        }
    }
}

impl MeshOptions {
    /// Use precomputed normals as-is, without duplicating vertices
    pub fn precomputed(face_normals: Vec<Vec3>, vertex_normals: Vec<Vec3>) -> Self {
        Self {
            face_normals: Some(face_normals),
            vertex_normals: Some(vertex_normals),
            duplicate: false,
        }
    }
}

/// Immutable polygon mesh.
///
/// After duplication face `i` owns the contiguous vertex block
/// `[offset_i, offset_i + faces[i].len())`, so `vertex_normals` and any
/// per-vertex buffer derived from the mesh line up with `faces`.
/// `face_normals` always holds one entry per face.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    face_normals: Vec<Vec3>,
    vertex_normals: Vec<Vec3>,
    bounds: Option<Bounds>,
}

impl Mesh {
    /// Build a mesh, computing normals and duplicating vertices per face
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> CoreResult<Self> {
        Self::with_options(vertices, faces, MeshOptions::default())
    }

    /// Build a mesh with explicit options.
    ///
    /// Face indices and the lengths of supplied normal arrays are checked.
    pub fn with_options(vertices: Vec<Vec3>, faces: Vec<Face>, options: MeshOptions) -> CoreResult<Self> {
        validate_faces(&vertices, &faces)?;

        if let Some(normals) = &options.face_normals {
            check_count("face", faces.len(), normals.len())?;
        }
        if let Some(normals) = &options.vertex_normals {
            check_count("vertex", vertices.len(), normals.len())?;
        }

        Ok(Self::assemble(vertices, faces, options))
    }

    /// Mesh for a regular polyhedron centered at the origin, whose vertex
    /// normals are its normalized vertices
    pub fn unit_poly(vertices: Vec<Vec3>, faces: Vec<Face>) -> CoreResult<Self> {
        let vertex_normals = vertices.iter().map(|v| v.normalize_or_zero()).collect();
        Self::with_options(
            vertices,
            faces,
            MeshOptions {
                vertex_normals: Some(vertex_normals),
                ..Default::default()
            },
        )
    }

    /// A face-less placeholder anchored at the origin.
    ///
    /// It has zero-height bounds but no drawable vertices.
    pub fn empty() -> Self {
        Self::assemble(vec![Vec3::ZERO], Vec::new(), MeshOptions::default())
    }

    /// Six inward-facing quads enclosing `bounds`
    pub fn walls(bounds: &Bounds) -> Self {
        let b = bounds;
        let vertices = vec![
            // left
            Vec3::new(b.left, b.bottom, b.far),
            Vec3::new(b.left, b.bottom, b.near),
            Vec3::new(b.left, b.top, b.near),
            Vec3::new(b.left, b.top, b.far),
            // bottom
            Vec3::new(b.left, b.bottom, b.far),
            Vec3::new(b.right, b.bottom, b.far),
            Vec3::new(b.right, b.bottom, b.near),
            Vec3::new(b.left, b.bottom, b.near),
            // far
            Vec3::new(b.left, b.bottom, b.far),
            Vec3::new(b.left, b.top, b.far),
            Vec3::new(b.right, b.top, b.far),
            Vec3::new(b.right, b.bottom, b.far),
            // right
            Vec3::new(b.right, b.bottom, b.far),
            Vec3::new(b.right, b.bottom, b.near),
            Vec3::new(b.right, b.top, b.near),
            Vec3::new(b.right, b.top, b.far),
            // top
            Vec3::new(b.left, b.top, b.far),
            Vec3::new(b.right, b.top, b.far),
            Vec3::new(b.right, b.top, b.near),
            Vec3::new(b.left, b.top, b.near),
            // near
            Vec3::new(b.left, b.bottom, b.near),
            Vec3::new(b.left, b.top, b.near),
            Vec3::new(b.right, b.top, b.near),
            Vec3::new(b.right, b.bottom, b.near),
        ];
        let faces = vec![
            Face::from_slice(&[3, 2, 1, 0]),
            Face::from_slice(&[7, 6, 5, 4]),
            Face::from_slice(&[11, 10, 9, 8]),
            Face::from_slice(&[12, 13, 14, 15]),
            Face::from_slice(&[16, 17, 18, 19]),
            Face::from_slice(&[20, 21, 22, 23]),
        ];
        Self::assemble(vertices, faces, MeshOptions::default())
    }

    /// Assemble a mesh from already-validated parts
    fn assemble(vertices: Vec<Vec3>, faces: Vec<Face>, options: MeshOptions) -> Self {
        let bounds = Bounds::from_points(&vertices).ok();

        let raw_face_normals = newell_sums(&vertices, &faces);
        let face_normals = options
            .face_normals
            .unwrap_or_else(|| raw_face_normals.iter().map(|n| n.normalize_or_zero()).collect());
        let vertex_normals = options
            .vertex_normals
            .unwrap_or_else(|| vertex_normal_sums(vertices.len(), &faces, &raw_face_normals));

        if !options.duplicate {
            return Self {
                vertices,
                faces,
                face_normals,
                vertex_normals,
                bounds,
            };
        }

        // Each corner gets its own copy; a face-less mesh keeps no vertices
        let corners = || faces.iter().flat_map(|face| face.iter().map(|&i| i as usize));
        let dup_vertices = corners().map(|i| vertices[i]).collect();
        let dup_vertex_normals = corners().map(|i| vertex_normals[i]).collect();

        let mut offset = 0u32;
        let dup_faces = faces
            .iter()
            .map(|face| {
                let len = face.len() as u32;
                let block = (offset..offset + len).collect::<Face>();
                offset += len;
                block
            })
            .collect();

        Self {
            vertices: dup_vertices,
            faces: dup_faces,
            face_normals,
            vertex_normals: dup_vertex_normals,
            bounds,
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// One unit normal per face (zero for degenerate faces)
    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    /// One unit normal per vertex (zero for vertices touching no face)
    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    /// Bounds of the mesh's vertices; `None` only for a mesh built without vertices
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// Height of the bounds, zero when there are none
    pub fn height(&self) -> f32 {
        self.bounds.map_or(0.0, |b| b.height())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Total number of face indices
    pub fn index_count(&self) -> usize {
        self.faces.iter().map(|f| f.len()).sum()
    }

    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    /// `(offset, len)` of each face's block, for fan or loop draw calls
    pub fn face_ranges(&self) -> Vec<(u32, u32)> {
        let mut offset = 0u32;
        self.faces
            .iter()
            .map(|face| {
                let range = (offset, face.len() as u32);
                offset += face.len() as u32;
                range
            })
            .collect()
    }

    /// Per-vertex copy of the owning face's normal, for flat shading
    pub fn flat_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for (face, normal) in self.faces.iter().zip(&self.face_normals) {
            for &i in face {
                normals[i as usize] = *normal;
            }
        }
        normals
    }

    /// Per-vertex copy of the owning face's centroid, used as the
    /// reflection position under flat shading
    pub fn barycenters(&self) -> Vec<Vec3> {
        let mut centers = vec![Vec3::ZERO; self.vertices.len()];
        for face in &self.faces {
            if face.is_empty() {
                continue;
            }
            let sum: Vec3 = face.iter().map(|&i| self.vertices[i as usize]).sum();
            let center = sum / face.len() as f32;
            for &i in face {
                centers[i as usize] = center;
            }
        }
        centers
    }

    /// Create a mesh like this one with every vertex mapped through `matrix`
    pub fn transformed(&self, matrix: Mat4) -> Self {
        let vertices = self
            .vertices
            .iter()
            .map(|v| matrix.transform_point3(*v))
            .collect();
        let rotate = |normals: &[Vec3]| -> Vec<Vec3> {
            normals
                .iter()
                .map(|n| math::transform_normal(&matrix, *n))
                .collect()
        };
        self.derive(
            vertices,
            rotate(&self.face_normals),
            rotate(&self.vertex_normals),
            &matrix,
        )
    }

    /// Create a mesh like this one, translated by the given amounts
    pub fn translated(&self, dx: f32, dy: f32, dz: f32) -> Self {
        let delta = Vec3::new(dx, dy, dz);
        let vertices = self.vertices.iter().map(|v| *v + delta).collect();
        self.derive(
            vertices,
            self.face_normals.clone(),
            self.vertex_normals.clone(),
            &Mat4::from_translation(delta),
        )
    }

    /// Create a mesh like this one, uniformly scaled about the origin
    ///
    /// A negative scale flips the normals along with the geometry.
    pub fn scaled(&self, scale: f32) -> Self {
        self.transformed(Mat4::from_scale(Vec3::splat(scale)))
    }

    /// Create a mesh like this one, rotated about `axis` by `degrees`
    pub fn deg_rotated(&self, degrees: f32, axis: Vec3) -> Self {
        self.rad_rotated(degrees.to_radians(), axis)
    }

    /// Create a mesh like this one, rotated about `axis` by `radians`
    pub fn rad_rotated(&self, radians: f32, axis: Vec3) -> Self {
        self.transformed(math::rotation_rad(radians, axis))
    }

    /// Create a mesh like this one, centered on the origin
    pub fn at_zero(&self) -> Self {
        match self.bounds {
            Some(bounds) => {
                let mid = bounds.midpoint();
                self.translated(-mid.x, -mid.y, -mid.z)
            }
            None => self.clone(),
        }
    }

    fn derive(
        &self,
        vertices: Vec<Vec3>,
        face_normals: Vec<Vec3>,
        vertex_normals: Vec<Vec3>,
        matrix: &Mat4,
    ) -> Self {
        // A placeholder without vertices carries its anchor through the transform
        let bounds = Bounds::from_points(&vertices)
            .ok()
            .or_else(|| self.bounds.map(|b| b.transformed(matrix)));

        Self {
            vertices,
            faces: self.faces.clone(),
            face_normals,
            vertex_normals,
            bounds,
        }
    }
}

/// Wireframe line segments, used for the arms of a mobile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireMesh {
    points: Vec<Vec3>,
    segments: Vec<[u32; 2]>,
}

impl WireMesh {
    /// Create a wire mesh; every segment must index into `points`
    pub fn new(points: Vec<Vec3>, segments: Vec<[u32; 2]>) -> Self {
        debug_assert!(
            segments
                .iter()
                .flatten()
                .all(|&i| (i as usize) < points.len()),
            "wire segment index out of range"
        );
        Self { points, segments }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn segments(&self) -> &[[u32; 2]] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Endpoints of every segment
    pub fn lines(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.segments
            .iter()
            .map(|[a, b]| (self.points[*a as usize], self.points[*b as usize]))
    }

    /// Create a wire mesh like this one with every point mapped through `matrix`
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            points: self.points.iter().map(|p| matrix.transform_point3(*p)).collect(),
            segments: self.segments.clone(),
        }
    }
}

fn validate_faces(vertices: &[Vec3], faces: &[Face]) -> CoreResult<()> {
    for (face_index, face) in faces.iter().enumerate() {
        if let Some(&index) = face.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(CoreError::IndexOutOfRange {
                face: face_index,
                index,
                vertex_count: vertices.len(),
            });
        }
    }
    Ok(())
}

fn check_count(kind: &'static str, expected: usize, actual: usize) -> CoreResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CoreError::NormalCountMismatch {
            kind,
            expected,
            actual,
        })
    }
}

/// Unnormalized Newell normal of every face.
///
/// The magnitude is twice the polygon's projected area, so summing these
/// weights neighbouring faces by area.
fn newell_sums(vertices: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    faces
        .iter()
        .enumerate()
        .map(|(face_index, face)| {
            let normal = newell_normal(face.iter().map(|&i| vertices[i as usize]));
            if normal == Vec3::ZERO {
                log::warn!("face {} is degenerate and has no normal", face_index);
            }
            normal
        })
        .collect()
}

/// Newell's method over a closed polygon loop; tolerant of non-triangular and
/// slightly non-planar polygons
pub fn newell_normal(points: impl Iterator<Item = Vec3> + Clone) -> Vec3 {
    let successors = points.clone().cycle().skip(1);
    points
        .zip(successors)
        .fold(Vec3::ZERO, |acc, (p1, p2)| {
            acc + Vec3::new(
                (p1.y - p2.y) * (p1.z + p2.z),
                (p1.z - p2.z) * (p1.x + p2.x),
                (p1.x - p2.x) * (p1.y + p2.y),
            )
        })
}

fn vertex_normal_sums(vertex_count: usize, faces: &[Face], face_sums: &[Vec3]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; vertex_count];
    for (face, normal) in faces.iter().zip(face_sums) {
        for &i in face {
            sums[i as usize] += *normal;
        }
    }
    sums.into_iter().map(|n| n.normalize_or_zero()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn face(indices: &[u32]) -> Face {
        Face::from_slice(indices)
    }

    /// Unit cube with outward CCW faces
    fn cube() -> Mesh {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let faces = vec![
            face(&[4, 5, 6, 7]),
            face(&[1, 0, 3, 2]),
            face(&[5, 1, 2, 6]),
            face(&[0, 4, 7, 3]),
            face(&[7, 6, 2, 3]),
            face(&[0, 1, 5, 4]),
        ];
        Mesh::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_newell_ccw_triangle() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let normal = newell_normal(points.iter().copied());
        assert!((normal.normalize() - Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_newell_start_vertex_invariant() {
        let quad = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.1),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, -0.1),
        ];
        let reference = newell_normal(quad.iter().copied()).normalize();
        for start in 1..quad.len() {
            let rotated = quad.iter().cycle().skip(start).take(quad.len()).copied();
            let normal = newell_normal(rotated).normalize();
            assert!((normal - reference).length() < EPS);
        }
        assert!(reference.z > 0.9);
    }

    #[test]
    fn test_cube_face_normals_point_outward() {
        let mesh = cube();
        let expected = [Vec3::Z, Vec3::NEG_Z, Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y];
        for (normal, expected) in mesh.face_normals().iter().zip(expected) {
            assert!((*normal - expected).length() < EPS, "{normal} != {expected}");
        }
    }

    #[test]
    fn test_vertex_normals_are_unit() {
        let mesh = cube();
        for normal in mesh.vertex_normals() {
            assert!((normal.length() - 1.0).abs() < EPS);
        }
        // Corner (1, 1, 1) averages the three adjoining faces
        let corner = mesh
            .vertices()
            .iter()
            .position(|v| *v == Vec3::ONE)
            .unwrap();
        assert!((mesh.vertex_normals()[corner] - Vec3::ONE.normalize()).length() < EPS);
    }

    #[test]
    fn test_isolated_vertex_normal_is_zero() {
        let vertices = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::splat(5.0)];
        let options = MeshOptions {
            duplicate: false,
            ..Default::default()
        };
        let mesh = Mesh::with_options(vertices, vec![face(&[0, 1, 2])], options).unwrap();
        assert_eq!(mesh.vertex_normals()[3], Vec3::ZERO);
        assert!((mesh.vertex_normals()[0].length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_vertex_normals_weight_by_area() {
        // A large face along +Z and a small one along +X share vertex 0
        let vertices = vec![
            Vec3::ZERO,
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![face(&[0, 1, 2]), face(&[0, 3, 4])];
        let options = MeshOptions {
            duplicate: false,
            ..Default::default()
        };
        let mesh = Mesh::with_options(vertices, faces, options).unwrap();
        let n = mesh.vertex_normals()[0];
        assert!(n.z > n.x.abs());
    }

    #[test]
    fn test_duplication_layout() {
        let mesh = cube();
        assert_eq!(mesh.index_count(), mesh.vertex_count());
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.vertex_normals().len(), 24);
        assert_eq!(mesh.face_normals().len(), 6);

        let mut offset = 0u32;
        for face in mesh.faces() {
            let expected: Vec<u32> = (offset..offset + face.len() as u32).collect();
            assert_eq!(face.as_slice(), expected.as_slice());
            offset += face.len() as u32;
        }
    }

    #[test]
    fn test_duplication_keeps_geometry() {
        let mesh = cube();
        // The first face of the input was [4, 5, 6, 7]
        assert_eq!(mesh.vertices()[0], Vec3::new(-1.0, -1.0, 1.0));
        assert_eq!(mesh.vertices()[2], Vec3::ONE);
    }

    #[test]
    fn test_empty_faces_drop_vertices() {
        let mesh = Mesh::new(vec![Vec3::ZERO], Vec::new()).unwrap();
        assert!(mesh.vertices().is_empty());
        assert!(mesh.faces().is_empty());
        assert!(!mesh.has_faces());
        assert_eq!(mesh.height(), 0.0);
        assert!(mesh.bounds().is_some());
    }

    #[test]
    fn test_empty_mesh_survives_translation() {
        let mesh = Mesh::empty().translated(0.0, -3.0, 0.0);
        let bounds = mesh.bounds().unwrap();
        assert!((bounds.midpoint().y + 3.0).abs() < EPS);
        assert_eq!(mesh.height(), 0.0);
    }

    #[test]
    fn test_index_out_of_range() {
        let result = Mesh::new(vec![Vec3::ZERO, Vec3::X], vec![face(&[0, 1, 2])]);
        assert_eq!(
            result,
            Err(CoreError::IndexOutOfRange {
                face: 0,
                index: 2,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn test_normal_count_mismatch() {
        let options = MeshOptions {
            face_normals: Some(vec![Vec3::Z, Vec3::Z]),
            ..Default::default()
        };
        let result = Mesh::with_options(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![face(&[0, 1, 2])], options);
        assert!(matches!(result, Err(CoreError::NormalCountMismatch { kind: "face", .. })));
    }

    #[test]
    fn test_scaled_doubles_width() {
        let mesh = cube();
        let scaled = mesh.scaled(2.0);
        let before = mesh.bounds().unwrap().width();
        let after = scaled.bounds().unwrap().width();
        assert!((after - 2.0 * before).abs() < EPS);
        for (a, b) in scaled.face_normals().iter().zip(mesh.face_normals()) {
            assert!((*a - *b).length() < EPS);
        }
    }

    #[test]
    fn test_negative_scale_flips_normals() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![face(&[0, 1, 2])]).unwrap();
        let scaled = mesh.scaled(-1.0);
        let transformed = mesh.transformed(Mat4::from_scale(Vec3::splat(-1.0)));

        assert!((scaled.face_normals()[0] - Vec3::NEG_Z).length() < EPS);
        assert_eq!(scaled.face_normals(), transformed.face_normals());
        assert_eq!(scaled.vertex_normals(), transformed.vertex_normals());
        assert_eq!(scaled.vertices(), transformed.vertices());
    }

    #[test]
    fn test_translated_moves_midpoint() {
        let mesh = cube();
        let moved = mesh.translated(1.0, 0.0, 0.0);
        let before = mesh.bounds().unwrap().midpoint();
        let after = moved.bounds().unwrap().midpoint();
        assert!((after.x - (before.x + 1.0)).abs() < EPS);
        assert_eq!(moved.vertex_normals(), mesh.vertex_normals());
        assert_eq!(moved.faces(), mesh.faces());
    }

    #[test]
    fn test_rotation_rotates_normals() {
        let mesh = cube().deg_rotated(90.0, Vec3::Y);
        // The +Z face now points along +X
        assert!((mesh.face_normals()[0] - Vec3::X).length() < 1e-4);
        for normal in mesh.vertex_normals() {
            assert!((normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_transformed_does_not_translate_normals() {
        let mesh = cube();
        let matrix = Mat4::from_translation(Vec3::new(10.0, -4.0, 2.0));
        let moved = mesh.transformed(matrix);
        for (a, b) in moved.face_normals().iter().zip(mesh.face_normals()) {
            assert!((*a - *b).length() < EPS);
        }
        assert!((moved.bounds().unwrap().midpoint() - Vec3::new(10.0, -4.0, 2.0)).length() < EPS);
    }

    #[test]
    fn test_at_zero() {
        let mesh = cube().translated(3.0, 4.0, 5.0).at_zero();
        assert!(mesh.bounds().unwrap().midpoint().length() < EPS);
    }

    #[test]
    fn test_unit_poly_normals() {
        let vertices = vec![
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        let faces = vec![face(&[0, 2, 4]), face(&[2, 1, 4])];
        let mesh = Mesh::unit_poly(vertices, faces).unwrap();
        // First duplicated corner is vertex 0 = +X
        assert!((mesh.vertex_normals()[0] - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_barycenters_and_flat_normals() {
        let mesh = cube();
        let centers = mesh.barycenters();
        let flat = mesh.flat_normals();
        assert_eq!(centers.len(), mesh.vertex_count());
        // The first face is the +Z face
        assert!((centers[0] - Vec3::Z).length() < EPS);
        assert!((flat[3] - Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_face_ranges() {
        let mesh = cube();
        let ranges = mesh.face_ranges();
        assert_eq!(ranges.len(), 6);
        assert_eq!(ranges[2], (8, 4));
    }

    #[test]
    fn test_walls_face_inward() {
        let bounds = Bounds::new(-2.0, 2.0, -1.0, 3.0, 2.0, -2.0);
        let walls = Mesh::walls(&bounds);
        let center = bounds.midpoint();
        for (range, normal) in walls.face_ranges().iter().zip(walls.face_normals()) {
            let corner = walls.vertices()[range.0 as usize];
            // The inside of the room lies in front of each wall
            assert!((center - corner).dot(*normal) > 0.0);
        }
    }

    #[test]
    fn test_wire_mesh_lines() {
        let wire = WireMesh::new(vec![Vec3::ZERO, Vec3::Y, Vec3::X], vec![[0, 1], [1, 2]]);
        assert_eq!(wire.segment_count(), 2);
        let lines: Vec<_> = wire.lines().collect();
        assert_eq!(lines[1], (Vec3::Y, Vec3::X));

        let moved = wire.transformed(&Mat4::from_translation(Vec3::Z));
        assert_eq!(moved.points()[0], Vec3::Z);
    }
}
