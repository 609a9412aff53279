//! TSPLIB export of a distance matrix (`EXPLICIT` / `FULL_MATRIX`).

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Matrix rows as space-separated integers, each row prefixed with a space
/// and terminated by a newline.
pub fn distance_matrix_to_string(matrix: &[Vec<i64>]) -> String {
    let mut out = String::new();
    for row in matrix {
        out.push(' ');
        let cells: Vec<String> = row.iter().map(i64::to_string).collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// Full TSPLIB problem text for `matrix`.
pub fn render_tsplib(name: &str, matrix: &[Vec<i64>]) -> String {
    let dimension = matrix.len();
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "NAME: {}", name);
    let _ = writeln!(out, "TYPE: TSP");
    let _ = writeln!(out, "COMMENT: Custom {}-dimension TSP problem.", dimension);
    let _ = writeln!(out, "DIMENSION: {}", dimension);
    let _ = writeln!(out, "EDGE_WEIGHT_TYPE: EXPLICIT");
    let _ = writeln!(out, "EDGE_WEIGHT_FORMAT: FULL_MATRIX");
    let _ = writeln!(out, "EDGE_WEIGHT_SECTION");
    out.push_str(&distance_matrix_to_string(matrix));
    out.push_str("EOF\n");
    out
}

/// Write `<dir>/<name>.tsp` and return its path.
pub fn save_tsplib(name: &str, matrix: &[Vec<i64>], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.tsp", name));
    std::fs::write(&path, render_tsplib(name, matrix))?;
    Ok(path)
}
