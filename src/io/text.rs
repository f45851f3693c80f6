//! Plain-text point-list format.
//!
//! One `x y` pair per line. Lines starting with `//` are comments and also
//! separate sections: in an environment file the first section is the outer
//! boundary and every later section is a hole. Blank lines are ignored.
//!
//! ```text
//! //Environment Model
//! //Outer Boundary
//! 0.0000000000  0.0000000000
//! 10.0000000000  0.0000000000
//! 10.0000000000  10.0000000000
//! 0.0000000000  10.0000000000
//! //Hole
//! 4.0000000000  4.0000000000
//! 4.0000000000  6.0000000000
//! 6.0000000000  6.0000000000
//! 6.0000000000  4.0000000000
//! ```

use crate::error::{Result, VisumError};
use crate::guards::Guards;
use crate::polygon::{Environment, Polygon};
use crate::primitives::Point2;
use num_traits::Float;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Formatting options for the writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Digits after the decimal point. Values below 1 are treated as 1.
    pub precision: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { precision: 10 }
    }
}

fn parse_point<F: Float + FromStr>(line: &str, number: usize) -> Result<Point2<F>> {
    let mut fields = line.split_whitespace();
    let mut coordinate = |name: &str| -> Result<F> {
        let field = fields.next().ok_or_else(|| VisumError::Parse {
            line: number,
            message: format!("missing {name} coordinate"),
        })?;
        field.parse::<F>().map_err(|_| VisumError::Parse {
            line: number,
            message: format!("invalid {name} coordinate '{field}'"),
        })
    };
    let x = coordinate("x")?;
    let y = coordinate("y")?;
    if let Some(extra) = fields.next() {
        return Err(VisumError::Parse {
            line: number,
            message: format!("unexpected trailing field '{extra}'"),
        });
    }
    Ok(Point2::new(x, y))
}

/// Reads comment-separated sections of points. Empty sections are dropped.
fn read_sections<F, R>(reader: R) -> Result<Vec<Vec<Point2<F>>>>
where
    F: Float + FromStr,
    R: BufRead,
{
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else if !trimmed.is_empty() {
            current.push(parse_point(trimmed, i + 1)?);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    Ok(sections)
}

/// Reads a polygon. Comment lines are skipped.
pub fn read_polygon<F, R>(reader: R) -> Result<Polygon<F>>
where
    F: Float + FromStr,
    R: BufRead,
{
    let vertices = read_sections(reader)?.into_iter().flatten().collect();
    Ok(Polygon::new(vertices))
}

/// Reads an environment: the first section is the outer boundary, every
/// later section a hole. The result is checked to be `epsilon`-valid.
///
/// # Errors
///
/// [`VisumError::EmptyGeometry`] if the input holds no points,
/// [`VisumError::InvalidEnvironment`] if the polygons do not form a valid
/// environment, plus the usual parse and I/O errors.
pub fn read_environment<F, R>(reader: R, epsilon: F) -> Result<Environment<F>>
where
    F: Float + FromStr,
    R: BufRead,
{
    let mut polygons = read_sections(reader)?.into_iter().map(Polygon::new);
    let outer = polygons.next().ok_or(VisumError::EmptyGeometry {
        what: "environment file",
    })?;
    Environment::try_new(outer, polygons.collect(), epsilon)
}

/// Reads guard positions. Comment lines are skipped.
pub fn read_guards<F, R>(reader: R) -> Result<Guards<F>>
where
    F: Float + FromStr,
    R: BufRead,
{
    Ok(read_sections(reader)?.into_iter().flatten().collect())
}

fn write_points<F, W>(writer: &mut W, points: &[Point2<F>], options: WriteOptions) -> Result<()>
where
    F: Float + Display,
    W: Write,
{
    let precision = options.precision.max(1);
    for p in points {
        writeln!(writer, "{:.*}  {:.*}", precision, p.x, precision, p.y)?;
    }
    Ok(())
}

/// Writes a polygon's vertices, one per line.
pub fn write_polygon<F, W>(mut writer: W, polygon: &Polygon<F>, options: WriteOptions) -> Result<()>
where
    F: Float + Display,
    W: Write,
{
    write_points(&mut writer, &polygon.vertices, options)?;
    writer.flush()?;
    Ok(())
}

/// Writes an environment with `//Outer Boundary` and `//Hole` headers.
pub fn write_environment<F, W>(mut writer: W, environment: &Environment<F>, options: WriteOptions) -> Result<()>
where
    F: Float + Display,
    W: Write,
{
    writeln!(writer, "//Environment Model")?;
    writeln!(writer, "//Outer Boundary")?;
    write_points(&mut writer, &environment.outer_boundary().vertices, options)?;
    for hole in environment.holes() {
        writeln!(writer, "//Hole")?;
        write_points(&mut writer, &hole.vertices, options)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes guard positions under a `//Guard Positions` header.
pub fn write_guards<F, W>(mut writer: W, guards: &Guards<F>, options: WriteOptions) -> Result<()>
where
    F: Float + Display,
    W: Write,
{
    writeln!(writer, "//Guard Positions")?;
    write_points(&mut writer, &guards.positions, options)?;
    writer.flush()?;
    Ok(())
}

/// Reads a polygon from a file.
pub fn load_polygon<F: Float + FromStr>(path: impl AsRef<Path>) -> Result<Polygon<F>> {
    read_polygon(BufReader::new(File::open(path)?))
}

/// Reads an environment from a file and checks that it is `epsilon`-valid.
pub fn load_environment<F: Float + FromStr>(path: impl AsRef<Path>, epsilon: F) -> Result<Environment<F>> {
    read_environment(BufReader::new(File::open(path)?), epsilon)
}

/// Reads guard positions from a file.
pub fn load_guards<F: Float + FromStr>(path: impl AsRef<Path>) -> Result<Guards<F>> {
    read_guards(BufReader::new(File::open(path)?))
}

/// Writes a polygon to a file, replacing its contents.
pub fn save_polygon<F: Float + Display>(
    path: impl AsRef<Path>,
    polygon: &Polygon<F>,
    options: WriteOptions,
) -> Result<()> {
    write_polygon(BufWriter::new(File::create(path)?), polygon, options)
}

/// Writes an environment to a file, replacing its contents.
pub fn save_environment<F: Float + Display>(
    path: impl AsRef<Path>,
    environment: &Environment<F>,
    options: WriteOptions,
) -> Result<()> {
    write_environment(BufWriter::new(File::create(path)?), environment, options)
}

/// Writes guard positions to a file, replacing its contents.
pub fn save_guards<F: Float + Display>(
    path: impl AsRef<Path>,
    guards: &Guards<F>,
    options: WriteOptions,
) -> Result<()> {
    write_guards(BufWriter::new(File::create(path)?), guards, options)
}
