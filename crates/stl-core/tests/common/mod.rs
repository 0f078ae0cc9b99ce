//! Shared fixtures: the 10-unit cube spanning [0,10] x [0,10] x [-10,0]

#![allow(dead_code)]

use std::io::Cursor;

/// (normal, corners) for the 12 triangles of the cube
pub fn cube_triangles() -> Vec<([f32; 3], [[f32; 3]; 3])> {
    let quads: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, -1.0],
            [[10.0, 0.0, -10.0], [0.0, 0.0, -10.0], [0.0, 10.0, -10.0], [10.0, 10.0, -10.0]],
        ),
        (
            [0.0, 0.0, 1.0],
            [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [10.0, 10.0, 0.0], [0.0, 10.0, 0.0]],
        ),
        (
            [0.0, -1.0, 0.0],
            [[0.0, 0.0, -10.0], [10.0, 0.0, -10.0], [10.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
        ),
        (
            [0.0, 1.0, 0.0],
            [[10.0, 10.0, -10.0], [0.0, 10.0, -10.0], [0.0, 10.0, 0.0], [10.0, 10.0, 0.0]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[0.0, 10.0, -10.0], [0.0, 0.0, -10.0], [0.0, 0.0, 0.0], [0.0, 10.0, 0.0]],
        ),
        (
            [1.0, 0.0, 0.0],
            [[10.0, 0.0, -10.0], [10.0, 10.0, -10.0], [10.0, 10.0, 0.0], [10.0, 0.0, 0.0]],
        ),
    ];

    quads
        .iter()
        .flat_map(|(normal, [a, b, c, d])| [(*normal, [*a, *b, *c]), (*normal, [*a, *c, *d])])
        .collect()
}

/// The cube as ASCII STL text
pub fn cube_ascii() -> String {
    let mut text = String::from("solid cube\n");
    for (n, corners) in cube_triangles() {
        text.push_str(&format!("  facet normal {} {} {}\n    outer loop\n", n[0], n[1], n[2]));
        for v in corners {
            text.push_str(&format!("      vertex {} {} {}\n", v[0], v[1], v[2]));
        }
        text.push_str("    endloop\n  endfacet\n");
    }
    text.push_str("endsolid cube\n");
    text
}

/// The cube as binary STL, written by `stl_io`
pub fn cube_binary() -> Vec<u8> {
    let triangles: Vec<stl_io::Triangle> = cube_triangles()
        .into_iter()
        .map(|(n, [a, b, c])| stl_io::Triangle {
            normal: stl_io::Normal::new(n),
            vertices: [
                stl_io::Vertex::new(a),
                stl_io::Vertex::new(b),
                stl_io::Vertex::new(c),
            ],
        })
        .collect();

    let mut bytes = Cursor::new(Vec::new());
    stl_io::write_stl(&mut bytes, triangles.iter()).unwrap();
    bytes.into_inner()
}

/// Put a `COLOR=rgba` entry into the header and set every record's attribute
pub fn with_header_color(mut bytes: Vec<u8>, rgba: [u8; 4], attribute: u16) -> Vec<u8> {
    bytes[..6].copy_from_slice(b"COLOR=");
    bytes[6..10].copy_from_slice(&rgba);

    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    for i in 0..count {
        let offset = 84 + i * 50 + 48;
        bytes[offset..offset + 2].copy_from_slice(&attribute.to_le_bytes());
    }
    bytes
}
