/// A mesh triangle with an outward normal
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// Three vertices: [[x, y, z], [x, y, z], [x, y, z]]
    pub vertices: [[f32; 3]; 3],
    /// Normal vector [nx, ny, nz]
    pub normal: [f32; 3],
}

impl Triangle {
    /// Create a new triangle and calculate its normal
    pub fn new(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Triangle {
        let normal = calculate_normal(v0, v1, v2);
        Triangle {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Build from planar points at a constant height
    pub fn flat(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), z: f64) -> Triangle {
        Triangle::new(
            [p0.0 as f32, p0.1 as f32, z as f32],
            [p1.0 as f32, p1.1 as f32, z as f32],
            [p2.0 as f32, p2.1 as f32, z as f32],
        )
    }
}

/// Calculate the normal vector for a triangle using the cross product
pub(crate) fn calculate_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let u = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let v = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

    let nx = u[1] * v[2] - u[2] * v[1];
    let ny = u[2] * v[0] - u[0] * v[2];
    let nz = u[0] * v[1] - u[1] * v[0];

    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 1e-10 {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 1.0] // degenerate triangles default to up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_normal() {
        // CCW triangle in the XY plane points +Z
        let tri = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);

        assert!(tri.normal[0].abs() < 0.001);
        assert!(tri.normal[1].abs() < 0.001);
        assert!((tri.normal[2] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_flat_triangle_height() {
        let tri = Triangle::flat((0.0, 0.0), (1.0, 0.0), (0.0, 1.0), 2.5);
        assert!(tri.vertices.iter().all(|v| (v[2] - 2.5).abs() < 1e-6));
    }
}
