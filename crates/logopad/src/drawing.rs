//! The `<Drawing>` file format.
//!
//! ```text
//! <Drawing>
//!   <Line x1='300' y1='337.5' x2='400' y2='337.5'/>
//! </Drawing>
//! ```
//!
//! Reading is forgiving: every line that starts like a `<Line .../>` entry with four numbers is
//! kept, and everything else (including the wrapper tags, and lines that aren't valid UTF-8) is
//! skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use nom::{
    bytes::complete::tag,
    character::complete::{char, multispace0},
    combinator::{map, recognize},
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::Segment;

#[derive(Debug, thiserror::Error)]
pub enum DrawingError {
    #[error("couldn't open drawing {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn attr_name<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    recognize(tuple((multispace0, tag(name), tag("='"))))
}

fn value(input: &str) -> IResult<&str, f64> {
    preceded(multispace0, double)(input)
}

fn quoted<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, f64> {
    delimited(attr_name(name), value, char('\''))
}

/// Parses one `<Line .../>` entry.
///
/// Once the fourth number has been read the rest of the line is ignored, closing quote and
/// all.
pub fn line_entry(input: &str) -> IResult<&str, Segment> {
    map(
        preceded(
            tuple((multispace0, tag("<Line"))),
            tuple((
                quoted("x1"),
                quoted("y1"),
                quoted("x2"),
                preceded(attr_name("y2"), value),
            )),
        ),
        |(x1, y1, x2, y2)| Segment { x1, y1, x2, y2 },
    )(input)
}

pub fn write(mut out: impl Write, segments: &[Segment]) -> Result<(), DrawingError> {
    writeln!(out, "<Drawing>")?;
    for s in segments {
        writeln!(
            out,
            "  <Line x1='{}' y1='{}' x2='{}' y2='{}'/>",
            s.x1, s.y1, s.x2, s.y2
        )?;
    }
    writeln!(out, "</Drawing>")?;
    Ok(())
}

pub fn read(input: impl BufRead) -> Result<Vec<Segment>, DrawingError> {
    let mut segments = Vec::new();
    for line in input.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        match line_entry(&line) {
            Ok((_, seg)) => segments.push(seg),
            Err(_) => log::trace!("skipping {line:?}"),
        }
    }
    Ok(segments)
}

pub fn save(path: impl AsRef<Path>, segments: &[Segment]) -> Result<(), DrawingError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| DrawingError::Open {
        path: path.to_owned(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    write(&mut out, segments)?;
    out.flush()?;
    log::info!("saved {} segments to {}", segments.len(), path.display());
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Segment>, DrawingError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DrawingError::Open {
        path: path.to_owned(),
        source,
    })?;
    let segments = read(BufReader::new(file))?;
    log::info!("loaded {} segments from {}", segments.len(), path.display());
    Ok(segments)
}
