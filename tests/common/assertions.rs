//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Decoded 8-bit PNG
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub color_type: png::ColorType,
    pub data: Vec<u8>,
}

impl DecodedPng {
    /// Bytes of pixel `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let channels = self.data.len() / (self.width as usize * self.height as usize);
        let start = (y * self.width as usize + x) * channels;
        &self.data[start..start + channels]
    }
}

pub fn read_png(path: &Path) -> DecodedPng {
    let file = File::open(path).unwrap_or_else(|e| panic!("open {}: {e}", path.display()));
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder.read_info().unwrap();
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data).unwrap();
    data.truncate(info.buffer_size());
    DecodedPng {
        width: info.width,
        height: info.height,
        color_type: info.color_type,
        data,
    }
}

/// Assert a PNG file exists with the expected geometry and color type
pub fn assert_png(
    path: &Path,
    width: usize,
    height: usize,
    color_type: png::ColorType,
) -> DecodedPng {
    assert!(path.exists(), "Expected PNG at {}", path.display());
    let png = read_png(path);
    assert_eq!(
        (png.width as usize, png.height as usize),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
    assert_eq!(png.color_type, color_type);
    png
}

/// Parsed ASCII PCD file
pub struct PointCloud {
    pub header: Vec<String>,
    pub points: Vec<[f32; 3]>,
}

pub fn read_pcd(path: &Path) -> PointCloud {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    let mut lines = text.lines();
    let header: Vec<String> = lines
        .by_ref()
        .take(11)
        .map(str::to_string)
        .collect();
    let points = lines
        .map(|line| {
            let v: Vec<f32> = line.split(' ').map(|s| s.parse().unwrap()).collect();
            [v[0], v[1], v[2]]
        })
        .collect();
    PointCloud { header, points }
}

/// Assert the header declares `n` points and the body holds exactly that many
pub fn assert_pcd_points(cloud: &PointCloud, n: usize) {
    assert_eq!(cloud.header[6], format!("WIDTH {n}"));
    assert_eq!(cloud.header[9], format!("POINTS {n}"));
    assert_eq!(cloud.header[10], "DATA ascii");
    assert_eq!(cloud.points.len(), n);
}
