//! # Kinetic Assets
//!
//! Mesh loading for the Kinetic mobile engine.
//!
//! ## Features
//! - JSON vertex/face models, optionally with precomputed normals
//! - ASCII PLY models
//! - Procedural primitives (cube, octahedron, UV sphere)
//! - Name-keyed mesh library filled from a directory

pub mod ply;
pub mod primitives;

use std::path::Path;

use ahash::AHashMap;
use glam::Vec3;
use kinetic_core::{CoreError, Face, Mesh, MeshOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PLY parse error: {0}")]
    Parse(String),

    #[error("Invalid mesh: {0}")]
    Mesh(#[from] CoreError),

    #[error("Unsupported mesh format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for asset operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Mesh data as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMesh {
    pub vertices: Vec<[f32; 3]>,
    pub faces: Vec<Vec<u32>>,
    #[serde(default, alias = "vertexNormals", skip_serializing_if = "Option::is_none")]
    pub vertex_normals: Option<Vec<[f32; 3]>>,
    #[serde(default, alias = "faceNormals", skip_serializing_if = "Option::is_none")]
    pub face_normals: Option<Vec<[f32; 3]>>,
}

impl RawMesh {
    pub fn new(vertices: Vec<[f32; 3]>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            vertices,
            faces,
            ..Default::default()
        }
    }

    /// Convert to a [`Mesh`].
    ///
    /// When both normal arrays are present they are used as-is and the
    /// vertices are not duplicated; otherwise normals are computed.
    pub fn to_mesh(&self) -> AssetResult<Mesh> {
        let vertices = to_vec3s(&self.vertices);
        let faces = self.faces.iter().map(|f| Face::from_slice(f)).collect();

        let options = match (&self.face_normals, &self.vertex_normals) {
            (Some(face_normals), Some(vertex_normals)) => {
                MeshOptions::precomputed(to_vec3s(face_normals), to_vec3s(vertex_normals))
            }
            _ => MeshOptions::default(),
        };

        Ok(Mesh::with_options(vertices, faces, options)?)
    }

    pub fn from_json_str(json: &str) -> AssetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> AssetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_json(path: impl AsRef<Path>) -> AssetResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> AssetResult<()> {
        std::fs::write(path.as_ref(), self.to_json_string()?)?;
        Ok(())
    }
}

impl From<&Mesh> for RawMesh {
    /// Export a mesh with its normals, so reloading it skips recomputation
    fn from(mesh: &Mesh) -> Self {
        Self {
            vertices: to_arrays(mesh.vertices()),
            faces: mesh.faces().iter().map(|f| f.to_vec()).collect(),
            vertex_normals: Some(to_arrays(mesh.vertex_normals())),
            face_normals: Some(to_arrays(mesh.face_normals())),
        }
    }
}

fn to_vec3s(points: &[[f32; 3]]) -> Vec<Vec3> {
    points.iter().map(|&p| Vec3::from_array(p)).collect()
}

fn to_arrays(points: &[Vec3]) -> Vec<[f32; 3]> {
    points.iter().map(|p| p.to_array()).collect()
}

/// Load a `.json` or `.ply` mesh file
pub fn load_mesh(path: impl AsRef<Path>) -> AssetResult<Mesh> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let raw = match extension.as_str() {
        "json" => RawMesh::load_json(path)?,
        "ply" => ply::load(path)?,
        _ => return Err(AssetError::UnsupportedFormat(path.display().to_string())),
    };

    let mesh = raw.to_mesh()?;
    log::debug!(
        "Loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

fn is_mesh_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(e) if e.eq_ignore_ascii_case("json") || e.eq_ignore_ascii_case("ply")
    )
}

/// Meshes keyed by name
#[derive(Debug, Clone, Default)]
pub struct MeshLibrary {
    meshes: AHashMap<String, Mesh>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding the built-in primitives: `cube`, `octahedron`, `sphere`
    pub fn with_primitives() -> AssetResult<Self> {
        let mut library = Self::new();
        library.insert("cube", primitives::cube(1.0)?);
        library.insert("octahedron", primitives::octahedron(1.0)?);
        library.insert("sphere", primitives::uv_sphere(1.0, 24, 12)?);
        Ok(library)
    }

    /// Load every `.json` and `.ply` file in `dir`, named by file stem.
    ///
    /// Returns the number of meshes loaded. Other files are ignored.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> AssetResult<usize> {
        let dir = dir.as_ref();
        let mut loaded = 0;

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || !is_mesh_file(&path) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("Skipping mesh with a non UTF-8 name: {}", path.display());
                continue;
            };

            let mesh = load_mesh(&path)?;
            if self.insert(name, mesh).is_some() {
                log::warn!("Mesh {name:?} replaced by {}", path.display());
            }
            loaded += 1;
        }

        log::info!("Loaded {loaded} meshes from {}", dir.display());
        Ok(loaded)
    }

    /// Add a mesh, returning any mesh it replaces
    pub fn insert(&mut self, name: impl Into<String>, mesh: Mesh) -> Option<Mesh> {
        self.meshes.insert(name.into(), mesh)
    }

    pub fn get(&self, name: &str) -> Option<&Mesh> {
        self.meshes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    /// Names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.meshes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
