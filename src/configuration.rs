//! The text configuration consumed by galaxy.exe.
//!
//! ```text
//! Version=1.1
//! iteration=0
//! theta=<token>
//! G=<token>
//! dt=<token>
//! <x>,<y>,<z>,<mass>,<vx>,<vy>,<vz>
//! ...
//! End
//! ```
//!
//! Every `<token>` is a [`encode`]d float. Body fields are written
//! position first, then mass, then velocity.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::{decode, encode};
use crate::error::ConfigurationError;
use crate::sim::body::Body;
use crate::sim::units::{Float, DIMENSIONALITY};

const FIELDS_PER_BODY: usize = 2 * DIMENSIONALITY + 1;
const HEADER_LINES: usize = 5;
const END: &str = "End";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Configuration {
    pub(crate) version: Float,
    pub(crate) iteration: u64,
    pub(crate) theta: Float, // Barnes-Hut opening angle
    pub(crate) g: Float,     // gravitational constant
    pub(crate) dt: Float,    // integration step
    pub(crate) bodies: Vec<Body>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: 1.1,
            iteration: 0,
            theta: 1.,
            g: 1.,
            dt: 0.1,
            bodies: vec![],
        }
    }
}

fn encode_body(body: &Body) -> String {
    let fields = body
        .position
        .iter()
        .chain(std::iter::once(&body.mass))
        .chain(body.velocity.iter())
        .map(|value| encode(*value))
        .collect::<Vec<String>>();
    fields.join(",")
}

fn decode_body(line: &str, line_number: usize) -> Result<Body, ConfigurationError> {
    let tokens = line.split(',').collect::<Vec<&str>>();
    if tokens.len() != FIELDS_PER_BODY {
        return Err(ConfigurationError::FieldCount {
            line: line_number,
            found: tokens.len(),
        });
    }
    let mut values = [0.; FIELDS_PER_BODY];
    for (value, token) in values.iter_mut().zip(tokens.iter()) {
        *value = decode(token).map_err(|source| ConfigurationError::Token {
            line: line_number,
            source,
        })?;
    }
    let mut position = [0.; DIMENSIONALITY];
    let mut velocity = [0.; DIMENSIONALITY];
    position.copy_from_slice(&values[..DIMENSIONALITY]);
    velocity.copy_from_slice(&values[DIMENSIONALITY + 1..]);
    Ok(Body::new(position, velocity, values[DIMENSIONALITY]))
}

fn header_value<'a>(
    line: Option<&'a str>,
    line_number: usize,
    key: &'static str,
) -> Result<&'a str, ConfigurationError> {
    let line = line.ok_or(ConfigurationError::MissingEnd)?;
    match line.trim_end().split_once('=') {
        Some((found, value)) if found == key => Ok(value),
        _ => Err(ConfigurationError::Header {
            line: line_number,
            expected: key,
        }),
    }
}

fn decode_header(
    line: Option<&str>,
    line_number: usize,
    key: &'static str,
) -> Result<Float, ConfigurationError> {
    let value = header_value(line, line_number, key)?;
    decode(value).map_err(|source| ConfigurationError::Token {
        line: line_number,
        source,
    })
}

impl Configuration {
    pub(crate) fn new(bodies: Vec<Body>) -> Configuration {
        Configuration {
            bodies,
            ..Default::default()
        }
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "Version={}", self.version)?;
        writeln!(writer, "iteration={}", self.iteration)?;
        writeln!(writer, "theta={}", encode(self.theta))?;
        writeln!(writer, "G={}", encode(self.g))?;
        writeln!(writer, "dt={}", encode(self.dt))?;
        for body in self.bodies.iter() {
            writeln!(writer, "{}", encode_body(body))?;
        }
        writeln!(writer, "{}", END)
    }

    /// Reads a whole configuration. Any bad line aborts the read.
    pub(crate) fn read_from<B: BufRead>(reader: B) -> Result<Configuration, ConfigurationError> {
        let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
        let mut lines = lines.iter().map(|line| line.as_str());

        let version = header_value(lines.next(), 1, "Version")?;
        let version = version
            .trim()
            .parse::<Float>()
            .map_err(|source| ConfigurationError::Version { line: 1, source })?;
        let iteration = header_value(lines.next(), 2, "iteration")?;
        let iteration = iteration
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigurationError::Iteration { line: 2, source })?;
        let theta = decode_header(lines.next(), 3, "theta")?;
        let g = decode_header(lines.next(), 4, "G")?;
        let dt = decode_header(lines.next(), 5, "dt")?;

        let mut bodies = vec![];
        for (index, line) in lines.enumerate() {
            let line = line.trim_end();
            if line.starts_with(END) {
                return Ok(Configuration {
                    version,
                    iteration,
                    theta,
                    g,
                    dt,
                    bodies,
                });
            }
            bodies.push(decode_body(line, HEADER_LINES + index + 1)?);
        }
        Err(ConfigurationError::MissingEnd)
    }

    pub(crate) fn load(path: &Path) -> Result<Configuration, ConfigurationError> {
        let file = File::open(path)?;
        let configuration = Self::read_from(BufReader::new(file))?;
        debug!(
            "Loaded {} bodies from {}",
            configuration.bodies.len(),
            path.display()
        );
        Ok(configuration)
    }

    /// Writes the configuration, keeping any previous file as `<path>~`.
    pub(crate) fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        if path.exists() {
            let backup = backup_path(path);
            fs::copy(path, &backup)?;
            info!("Backed up {} to {}", path.display(), backup.display());
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!("Stored configuration in {}", path.display());
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push("~");
    PathBuf::from(name)
}
