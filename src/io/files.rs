//! JSON files exchanged between generation and runtime.
//!
//! | File                      | Shape                                             |
//! |---------------------------|---------------------------------------------------|
//! | `visibility_graph-n-m`    | `{"nodes": [[x,y],…], "edges": [[[x,y],[x,y]],…]}` |
//! | `polygon-n-m`             | `[[[x,y],…],…]`                                   |
//! | `packages-n-m`            | `{"nodes": [[x,y],…]}`                            |
//! | `dimensions`              | `{"robot": {…}, "warehouse": {…}}`                |
//!
//! All coordinates are runtime integers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::config::WorkspaceConfig;
use crate::core::GridPoint;
use crate::error::Result;
use crate::graph::GraphDefinition;
use crate::io::WorkspaceTransform;

/// Obstacle rings in runtime coordinates.
pub type LayoutFile = Vec<Vec<GridPoint>>;

/// Length and width of a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub length: i64,
    pub width: i64,
}

/// Robot footprint and warehouse size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub robot: Extent,
    pub warehouse: Extent,
}

impl Dimensions {
    /// Dimensions for a workspace: the warehouse is the scaled map square.
    pub fn from_config(config: &WorkspaceConfig) -> Self {
        let side = WorkspaceTransform::from_config(config).extent();
        Self {
            robot: Extent {
                length: config.robot_length,
                width: config.robot_width,
            },
            warehouse: Extent {
                length: side,
                width: side,
            },
        }
    }
}

/// Waypoints an operator is expected to visit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaypointsOfInterest {
    pub nodes: Vec<GridPoint>,
}

fn write_json<T: Serialize, W: Write>(value: &T, writer: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned, R: Read>(reader: &mut R) -> Result<T> {
    Ok(serde_json::from_reader(reader)?)
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(value, &mut writer)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let mut reader = BufReader::new(File::open(path)?);
    read_json(&mut reader)
}

/// Save a graph definition.
pub fn save_graph(definition: &GraphDefinition, path: &Path) -> Result<()> {
    save_json(definition, path)
}

/// Write a graph definition to a writer.
pub fn write_graph<W: Write>(definition: &GraphDefinition, writer: &mut W) -> Result<()> {
    write_json(definition, writer)
}

/// Load and validate a graph definition.
pub fn load_graph(path: &Path) -> Result<GraphDefinition> {
    let mut reader = BufReader::new(File::open(path)?);
    read_graph(&mut reader)
}

/// Read and validate a graph definition.
pub fn read_graph<R: Read>(reader: &mut R) -> Result<GraphDefinition> {
    let definition: GraphDefinition = read_json(reader)?;
    definition.validate()?;
    Ok(definition)
}

pub fn save_layout(layout: &LayoutFile, path: &Path) -> Result<()> {
    save_json(layout, path)
}

pub fn write_layout<W: Write>(layout: &LayoutFile, writer: &mut W) -> Result<()> {
    write_json(layout, writer)
}

pub fn load_layout(path: &Path) -> Result<LayoutFile> {
    load_json(path)
}

pub fn read_layout<R: Read>(reader: &mut R) -> Result<LayoutFile> {
    read_json(reader)
}

pub fn save_dimensions(dimensions: &Dimensions, path: &Path) -> Result<()> {
    save_json(dimensions, path)
}

pub fn load_dimensions(path: &Path) -> Result<Dimensions> {
    load_json(path)
}

pub fn save_waypoints(waypoints: &WaypointsOfInterest, path: &Path) -> Result<()> {
    save_json(waypoints, path)
}

pub fn load_waypoints(path: &Path) -> Result<WaypointsOfInterest> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_graph_rejects_dangling_edge() {
        let json = br#"{"nodes": [[0, 0]], "edges": [[[0, 0], [1, 1]]]}"#;
        let result = read_graph(&mut Cursor::new(&json[..]));
        assert!(matches!(
            result,
            Err(crate::error::MargaError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_read_graph_rejects_bad_json() {
        let result = read_graph(&mut Cursor::new(&b"{\"nodes\": 3}"[..]));
        assert!(matches!(result, Err(crate::error::MargaError::Json(_))));
    }

    #[test]
    fn test_layout_shape() {
        let layout: LayoutFile = vec![vec![
            GridPoint::new(0, 0),
            GridPoint::new(10, 0),
            GridPoint::new(0, 10),
        ]];
        let mut buffer = Vec::new();
        write_layout(&layout, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer.clone()).unwrap(),
            "[[[0,0],[10,0],[0,10]]]"
        );
        assert_eq!(read_layout(&mut Cursor::new(buffer)).unwrap(), layout);
    }

    #[test]
    fn test_dimensions_from_config() {
        let dims = Dimensions::from_config(&WorkspaceConfig::default());
        assert_eq!(dims.robot, Extent { length: 10, width: 10 });
        assert_eq!(dims.warehouse, Extent { length: 500, width: 500 });

        let json = serde_json::to_string(&dims).unwrap();
        assert_eq!(
            json,
            r#"{"robot":{"length":10,"width":10},"warehouse":{"length":500,"width":500}}"#
        );
    }

    #[test]
    fn test_save_load_files() {
        let dir = tempfile::tempdir().unwrap();

        let waypoints = WaypointsOfInterest {
            nodes: vec![GridPoint::new(120, 380)],
        };
        let path = dir.path().join("packages-0-0.json");
        save_waypoints(&waypoints, &path).unwrap();
        assert_eq!(load_waypoints(&path).unwrap(), waypoints);

        let dims = Dimensions::from_config(&WorkspaceConfig::default());
        let path = dir.path().join("dimensions.json");
        save_dimensions(&dims, &path).unwrap();
        assert_eq!(load_dimensions(&path).unwrap(), dims);
    }
}
