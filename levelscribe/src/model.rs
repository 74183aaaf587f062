use glam::DVec2;
use log::debug;
use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Couldn't read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid ipe document")]
    Xml(#[from] roxmltree::Error),
    #[error("No paths (lines/polygons) found in ipe file")]
    NoPath,
    #[error("File contains too many paths (lines/polygons), found {0}")]
    TooManyPaths(usize),
    #[error("The path contains no coordinate lines")]
    EmptyPath,
    #[error("Line {line} of the path is not of the form `x y flag`: {record:?}")]
    MalformedRecord { line: usize, record: String },
    #[error("Line {line} of the path has an invalid coordinate")]
    InvalidCoordinate {
        line: usize,
        #[source]
        source: ParseFloatError,
    },
    #[error("Line {line} of the path has a coordinate that is not finite")]
    NonFiniteCoordinate { line: usize },
}

/// A single polygon read from an ipe drawing, in drawing coordinates and in
/// the order the vertices were drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct IpePolygon {
    vertices: Vec<DVec2>,
}

impl IpePolygon {
    pub fn new(vertices: Vec<DVec2>) -> Self {
        Self { vertices }
    }

    // load the polygon from an *.ipe or *.xml file
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let file_path = file_path.as_ref();
        let contents = fs::read_to_string(file_path).map_err(|source| ModelError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        Self::from_ipe_str(&contents)
    }

    /// Parse the contents of an ipe document. The document must hold exactly
    /// one `path` directly below a `page`; paths in the style sheet or inside
    /// groups are not part of the level.
    pub fn from_ipe_str(contents: &str) -> Result<Self, ModelError> {
        // ipe files reference ipe.dtd
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let document = Document::parse_with_options(contents, options)?;

        let paths: Vec<Node> = document
            .root_element()
            .children()
            .filter(|node| node.has_tag_name("page"))
            .flat_map(|page| page.children().filter(|node| node.has_tag_name("path")))
            .collect();

        match paths.len() {
            0 => Err(ModelError::NoPath),
            1 => Self::from_path_body(paths[0].text().unwrap_or_default()),
            n => Err(ModelError::TooManyPaths(n)),
        }
    }

    /// Parse the text body of an ipe path. The first line (empty, right after
    /// the opening tag) and the last line (the `h` closing the path) are not
    /// vertices; every other line reads `x y flag`.
    pub fn from_path_body(body: &str) -> Result<Self, ModelError> {
        let lines: Vec<&str> = body.lines().collect();
        let records = match lines.len() {
            0..=2 => return Err(ModelError::EmptyPath),
            n => &lines[1..n - 1],
        };

        let mut vertices = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            // lines are counted from the start of the path body
            let line = i + 2;
            debug!("{}", record);
            vertices.push(parse_record(line, record)?);
        }

        Ok(Self::new(vertices))
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

fn parse_record(line: usize, record: &str) -> Result<DVec2, ModelError> {
    let tokens: Vec<&str> = record.split_whitespace().collect();
    let (x, y) = match tokens.as_slice() {
        [x, y, _flag] => (*x, *y),
        _ => {
            return Err(ModelError::MalformedRecord {
                line,
                record: record.to_string(),
            })
        }
    };

    Ok(DVec2::new(
        parse_coordinate(line, x)?,
        parse_coordinate(line, y)?,
    ))
}

fn parse_coordinate(line: usize, token: &str) -> Result<f64, ModelError> {
    let value = token
        .parse::<f64>()
        .map_err(|source| ModelError::InvalidCoordinate { line, source })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFiniteCoordinate { line })
    }
}
