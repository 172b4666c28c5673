//! Wavefront OBJ export: one named object per feature so downstream tools
//! can select and highlight regions individually, plus a companion MTL
//! file carrying the fill and side colors.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::ModelGroup;

/// Write a model group as a Wavefront OBJ file.
///
/// When `mtl_name` is given, a `mtllib` reference is emitted and parts use
/// `usemtl` with color-derived material names (see [`write_mtl`]).
pub fn write_obj(path: &Path, group: &ModelGroup, mtl_name: Option<&str>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create OBJ file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# geoplate - GeoJSON 3D mesh export")?;
    if let Some(mtl) = mtl_name {
        writeln!(writer, "mtllib {}", mtl)?;
    }

    // OBJ vertex indices are global and 1-based
    let mut vertex_offset: usize = 1;

    for (i, mesh) in group.meshes.iter().enumerate() {
        let object_name = if mesh.name.is_empty() {
            format!("feature_{}", i)
        } else {
            sanitize_name(&mesh.name)
        };
        writeln!(writer, "o {}", object_name)?;

        for part in &mesh.parts {
            if part.triangles.is_empty() {
                continue;
            }
            if mtl_name.is_some() {
                writeln!(writer, "usemtl {}", material_name(part.color))?;
            }
            for tri in &part.triangles {
                for v in &tri.vertices {
                    writeln!(writer, "v {} {} {}", v[0], v[1], v[2])?;
                }
                writeln!(
                    writer,
                    "f {} {} {}",
                    vertex_offset,
                    vertex_offset + 1,
                    vertex_offset + 2
                )?;
                vertex_offset += 3;
            }
        }
    }

    writer.flush()?;

    Ok(())
}

/// Write the material library for a model group: one diffuse-only entry
/// per distinct part color
pub fn write_mtl(path: &Path, group: &ModelGroup) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create MTL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let colors: BTreeSet<u32> = group
        .meshes
        .iter()
        .flat_map(|m| m.parts.iter().map(|p| p.color))
        .collect();

    for color in colors {
        let r = ((color >> 16) & 0xff) as f32 / 255.0;
        let g = ((color >> 8) & 0xff) as f32 / 255.0;
        let b = (color & 0xff) as f32 / 255.0;
        writeln!(writer, "newmtl {}", material_name(color))?;
        writeln!(writer, "Kd {:.4} {:.4} {:.4}", r, g, b)?;
    }

    writer.flush()?;

    Ok(())
}

fn material_name(color: u32) -> String {
    format!("mat_{:06x}", color & 0xffffff)
}

/// OBJ object names cannot contain whitespace
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeomKind;
    use crate::geometry::{GeoBounds, Projection};
    use crate::mesh::Triangle;
    use crate::model::{FeatureMesh, MeshPart, ModelGroup};
    use std::fs;
    use tempfile::tempdir;

    fn sample_group() -> ModelGroup {
        let tri = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        ModelGroup {
            meshes: vec![FeatureMesh {
                name: "North Region".to_string(),
                kind: GeomKind::Plane,
                shapes: Vec::new(),
                parts: vec![MeshPart {
                    color: 0x00bbdd,
                    triangles: vec![tri],
                }],
            }],
            projection: Projection::new(&GeoBounds::ZERO, 1.0),
        }
    }

    #[test]
    fn test_write_obj_named_objects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plate.obj");

        write_obj(&path, &sample_group(), Some("plate.mtl")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("mtllib plate.mtl"));
        assert!(contents.contains("o North_Region"));
        assert!(contents.contains("usemtl mat_00bbdd"));
        assert!(contents.contains("f 1 2 3"));
    }

    #[test]
    fn test_write_obj_without_materials() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.obj");

        write_obj(&path, &sample_group(), None).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("mtllib"));
        assert!(!contents.contains("usemtl"));
    }

    #[test]
    fn test_write_mtl_colors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plate.mtl");

        write_mtl(&path, &sample_group()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("newmtl mat_00bbdd"));
        assert!(contents.contains("Kd 0.0000 0.7333 0.8667"));
    }
}
