//! ASCII point cloud export (PCD v0.7).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ViewerError;

/// Write the points with a positive `z` as an unorganized ASCII cloud.
///
/// Returns the number of points written.
pub fn write_pcd<W: Write>(mut writer: W, world: &[[f32; 3]]) -> Result<usize, ViewerError> {
    let points: Vec<&[f32; 3]> = world.iter().filter(|p| p[2] > 0.0).collect();
    let n = points.len();

    let io = |e: std::io::Error| ViewerError::PcdWrite(e.to_string());

    write!(
        writer,
        "# .PCD v0.7 - Point Cloud Data file format\n\
         VERSION 0.7\n\
         FIELDS x y z\n\
         SIZE 4 4 4\n\
         TYPE F F F\n\
         COUNT 1 1 1\n\
         WIDTH {n}\n\
         HEIGHT 1\n\
         VIEWPOINT 0 0 0 1 0 0 0\n\
         POINTS {n}\n\
         DATA ascii\n"
    )
    .map_err(io)?;

    for [x, y, z] in points {
        writeln!(writer, "{x} {y} {z}").map_err(io)?;
    }
    writer.flush().map_err(io)?;

    Ok(n)
}

/// Write a cloud file at `path`.
pub fn save_pcd(path: &Path, world: &[[f32; 3]]) -> Result<usize, ViewerError> {
    let file = File::create(path)?;
    let points = write_pcd(BufWriter::new(file), world)?;
    tracing::debug!(path = %path.display(), points, "Wrote point cloud");
    Ok(points)
}
