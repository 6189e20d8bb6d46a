//! ASCII PLY reader.
//!
//! Accepts one header layout: a `vertex` element with exactly the `float32`
//! properties `x`, `y`, `z`, followed by a `face` element with a single
//! `list uint8 int32 vertex_indices` property. Keywords are case-insensitive;
//! blank and comment lines are ignored anywhere. Binary encodings and any
//! other header are rejected.

use std::path::Path;

use glam::Vec3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, ElementDef, Encoding, Property, PropertyType, ScalarType};

use crate::{AssetError, AssetResult, RawMesh};

fn parse_error(message: impl Into<String>) -> AssetError {
    let message = message.into();
    log::error!("PLY parse error: {message}");
    AssetError::Parse(message)
}

/// Lowercased, trimmed lines without blanks or comments
fn content_lines(text: &str) -> Vec<String> {
    text.to_ascii_lowercase()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("comment"))
        .map(str::to_string)
        .collect()
}

/// Parse ASCII PLY text into vertices and faces
pub fn parse(text: &str) -> AssetResult<(Vec<Vec3>, Vec<Vec<u32>>)> {
    let first = text.lines().next().map(str::trim).unwrap_or_default();
    if !first.eq_ignore_ascii_case("ply") {
        return Err(parse_error("line 1: expected 'ply'"));
    }

    let lines = content_lines(text);
    let cleaned = lines.join("\n") + "\n";
    let ply = Parser::<DefaultElement>::new()
        .read_ply(&mut cleaned.as_bytes())
        .map_err(|e| parse_error(e.to_string()))?;

    if !matches!(ply.header.encoding, Encoding::Ascii) {
        return Err(parse_error("only ASCII PLY files are supported"));
    }

    let elements: Vec<&ElementDef> = ply.header.elements.values().collect();
    let &[vertex_def, face_def] = elements.as_slice() else {
        return Err(parse_error("expected exactly a vertex and a face element"));
    };
    check_vertex_element(vertex_def)?;
    check_face_element(face_def)?;
    let face_count = face_def.count;

    // Line-level checks the element reader is lenient about
    let body_start = lines
        .iter()
        .position(|line| line == "end_header")
        .map_or(lines.len(), |i| i + 1);
    let body = &lines[body_start..];
    if body.len() != vertex_def.count + face_count {
        return Err(parse_error(format!(
            "expected {} vertex and {} face lines, found {} data lines",
            vertex_def.count,
            face_count,
            body.len()
        )));
    }
    let (vertex_lines, face_lines) = body.split_at(vertex_def.count);
    if vertex_lines
        .iter()
        .any(|line| line.split_whitespace().count() != vertex_def.properties.len())
    {
        return Err(parse_error("wrong number of coordinates in a vertex"));
    }
    if face_lines.iter().any(|line| !face_length_matches(line)) {
        return Err(parse_error("wrong number of vertices in a face"));
    }

    let none = Vec::new();
    let vertices = ply
        .payload
        .get("vertex")
        .unwrap_or(&none)
        .iter()
        .map(vertex_position)
        .collect::<AssetResult<Vec<Vec3>>>()?;
    let faces = ply
        .payload
        .get("face")
        .unwrap_or(&none)
        .iter()
        .map(|face| face_indices(face, vertices.len()))
        .collect::<AssetResult<Vec<Vec<u32>>>>()?;

    log::debug!("Parsed PLY with {} vertices and {} faces", vertices.len(), faces.len());
    Ok((vertices, faces))
}

fn check_vertex_element(element: &ElementDef) -> AssetResult<()> {
    if element.name != "vertex" {
        return Err(parse_error(format!("expected element vertex, found {}", element.name)));
    }
    let names: Vec<&str> = element.properties.keys().map(String::as_str).collect();
    if names != ["x", "y", "z"] {
        return Err(parse_error(format!(
            "vertex properties must be x, y, z; found {}",
            names.join(", ")
        )));
    }
    let all_float = element
        .properties
        .values()
        .all(|p| matches!(p.data_type, PropertyType::Scalar(ScalarType::Float)));
    if !all_float {
        return Err(parse_error("vertex properties must be float32"));
    }
    Ok(())
}

fn check_face_element(element: &ElementDef) -> AssetResult<()> {
    if element.name != "face" {
        return Err(parse_error(format!("expected element face, found {}", element.name)));
    }
    let mut properties = element.properties.values();
    match (properties.next(), properties.next()) {
        (Some(p), None)
            if p.name == "vertex_indices"
                && matches!(
                    p.data_type,
                    PropertyType::List(ScalarType::UChar, ScalarType::Int)
                ) =>
        {
            Ok(())
        }
        _ => Err(parse_error(
            "face must have a single list uint8 int32 vertex_indices property",
        )),
    }
}

/// Whether a face line's leading count matches the indices that follow
fn face_length_matches(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    let declared = tokens.next().and_then(|t| t.parse::<usize>().ok());
    declared == Some(tokens.count())
}

fn float_property(element: &DefaultElement, key: &str) -> AssetResult<f32> {
    let value = match element.get(key) {
        Some(Property::Float(v)) => *v,
        _ => return Err(parse_error(format!("vertex is missing float property {key}"))),
    };
    if value.is_nan() {
        return Err(parse_error(format!("vertex property {key} is not a number")));
    }
    Ok(value)
}

fn vertex_position(vertex: &DefaultElement) -> AssetResult<Vec3> {
    Ok(Vec3::new(
        float_property(vertex, "x")?,
        float_property(vertex, "y")?,
        float_property(vertex, "z")?,
    ))
}

fn face_indices(face: &DefaultElement, vertex_count: usize) -> AssetResult<Vec<u32>> {
    let indices = match face.get("vertex_indices") {
        Some(Property::ListInt(v)) => v
            .iter()
            .map(|&i| u32::try_from(i).map_err(|_| parse_error(format!("negative vertex index {i}"))))
            .collect::<AssetResult<Vec<u32>>>()?,
        _ => return Err(parse_error("face is missing vertex_indices")),
    };

    if indices.len() < 3 {
        return Err(parse_error("a face needs at least three vertices"));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(parse_error(format!(
            "vertex index {bad} out of range for {vertex_count} vertices"
        )));
    }
    Ok(indices)
}

/// Read a PLY file into a [`RawMesh`]
pub fn load(path: impl AsRef<Path>) -> AssetResult<RawMesh> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let (vertices, faces) = parse(&text)?;
    Ok(RawMesh::new(
        vertices.iter().map(|v| v.to_array()).collect(),
        faces,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ply\n\
        format ascii 1.0\n\
        comment made by hand\n\
        element vertex 4\n\
        property float32 x\n\
        property float32 y\n\
        property float32 z\n\
        element face 2\n\
        property list uint8 int32 vertex_indices\n\
        end_header\n";

    const BODY: &str = "0 0 0\n1 0 0\n1 1 0\n0 1 0\n3 0 1 2\n3 0 2 3\n";

    fn document(body: &str) -> String {
        format!("{HEADER}{body}")
    }

    fn is_parse_error<T>(result: AssetResult<T>) -> bool {
        matches!(result, Err(AssetError::Parse(_)))
    }

    #[test]
    fn test_parse_quad_pair() {
        let text = document("0 0 0\n1 0 0\n1 1 0\n\n0 1 0\n3 0 1 2\n3 0 2 3\n");
        let (vertices, faces) = parse(&text).unwrap();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[2], Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
    }

    #[test]
    fn test_short_type_names() {
        let text = "ply\nformat ascii 1.0\nelement vertex 3\n\
            property float x\nproperty float y\nproperty float z\n\
            element face 1\nproperty list uchar int vertex_indices\nend_header\n\
            0 0 1\n1 0 1\n0 1 1\n3 0 1 2\n";
        let (vertices, _) = parse(text).unwrap();
        assert_eq!(vertices[1], Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_rejects_extra_vertex_property() {
        let text = HEADER.replace("property float32 z\n", "property float32 z\nproperty float32 red\n");
        let body = "0 0 0 1\n1 0 0 1\n1 1 0 1\n0 1 0 1\n3 0 1 2\n3 0 2 3\n";
        assert!(is_parse_error(parse(&format!("{text}{body}"))));
    }

    #[test]
    fn test_rejects_other_property_types() {
        let doubles = HEADER.replace("float32", "float64");
        assert!(is_parse_error(parse(&format!("{doubles}{BODY}"))));

        let uint_list = HEADER.replace("list uint8 int32", "list uint32 uint32");
        assert!(is_parse_error(parse(&format!("{uint_list}{BODY}"))));

        let renamed = HEADER.replace("vertex_indices", "vertex_index");
        assert!(is_parse_error(parse(&format!("{renamed}{BODY}"))));
    }

    #[test]
    fn test_rejects_missing_face_element() {
        let text = "ply\nformat ascii 1.0\nelement vertex 1\n\
            property float x\nproperty float y\nproperty float z\nend_header\n0 0 0\n";
        assert!(is_parse_error(parse(text)));
    }

    #[test]
    fn test_keywords_ignore_case() {
        let text = document(BODY).to_uppercase();
        assert_eq!(parse(&text).unwrap().1.len(), 2);
    }

    #[test]
    fn test_rejects_missing_magic() {
        assert!(is_parse_error(parse("format ascii 1.0\n")));
        assert!(is_parse_error(parse(&format!("\n{}", document(BODY)))));
    }

    #[test]
    fn test_rejects_binary() {
        let text = "ply\nformat binary_little_endian 1.0\nend_header\n";
        assert!(is_parse_error(parse(text)));
    }

    #[test]
    fn test_rejects_nan_coordinate() {
        let text = document("0 0 0\n1 nan 0\n1 1 0\n0 1 0\n3 0 1 2\n3 0 2 3\n");
        assert!(is_parse_error(parse(&text)));
    }

    #[test]
    fn test_rejects_wrong_coordinate_count() {
        let text = document("0 0 0\n1 0\n1 1 0\n0 1 0\n3 0 1 2\n3 0 2 3\n");
        assert!(is_parse_error(parse(&text)));

        let text = document("0 0 0\n1 0 0 7\n1 1 0\n0 1 0\n3 0 1 2\n3 0 2 3\n");
        assert!(is_parse_error(parse(&text)));
    }

    #[test]
    fn test_rejects_short_vertex_list() {
        assert!(is_parse_error(parse(&document("0 0 0\n1 0 0\n"))));
    }

    #[test]
    fn test_rejects_wrong_face_length() {
        let text = document("0 0 0\n1 0 0\n1 1 0\n0 1 0\n3 0 1 2 3\n3 0 2 3\n");
        assert!(is_parse_error(parse(&text)));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let text = document("0 0 0\n1 0 0\n1 1 0\n0 1 0\n3 0 1 2\n3 0 2 4\n");
        assert!(is_parse_error(parse(&text)));
    }

    #[test]
    fn test_rejects_trailing_data() {
        let text = document(&format!("{BODY}3 1 2 3\n"));
        assert!(is_parse_error(parse(&text)));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quads.ply");
        std::fs::write(&path, document(BODY)).unwrap();

        let mesh = load(&path).unwrap().to_mesh().unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 6);
    }
}
