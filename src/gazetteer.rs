use std::{
    collections::HashMap,
    fmt,
    io::{self, BufRead},
    path::Path,
};

use geo::Point;
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{Error, Result},
    utils::{file_len, open_tracked, progress_bar},
};

const CHUNK_SIZE: usize = 65535;

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeonameId(pub i64);

impl fmt::Display for GeonameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GazetteerRecord {
    pub id: GeonameId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GazetteerRecord {
    /// Parses one line of a GeoNames dump: id, name, asciiname, alternatenames,
    /// latitude, longitude, then columns we don't care about.
    pub fn parse(line_no: usize, line: &str) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedRecord {
            line: line_no,
            reason,
        };

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < 6 {
            return Err(malformed(format!(
                "expected at least 6 columns, found {}",
                columns.len()
            )));
        }

        let id = columns[0]
            .parse()
            .map_err(|e| malformed(format!("id {:?}: {e}", columns[0])))?;
        let latitude = coordinate(columns[4]).map_err(|e| malformed(format!("latitude {e}")))?;
        let longitude = coordinate(columns[5]).map_err(|e| malformed(format!("longitude {e}")))?;

        Ok(Self {
            id: GeonameId(id),
            name: columns[1].to_string(),
            latitude,
            longitude,
        })
    }
}

fn coordinate(raw: &str) -> std::result::Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        Ok(_) => Err(format!("{raw:?} is not finite")),
        Err(e) => Err(format!("{raw:?}: {e}")),
    }
}

/// Name and coordinate lookup over a whole gazetteer. Built once, then read-only.
#[derive(Debug, Default)]
pub struct GazetteerIndex {
    names: HashMap<String, Vec<GeonameId>>,
    coordinates: HashMap<GeonameId, Point>,
}

impl GazetteerIndex {
    pub fn build(records: impl IntoIterator<Item = GazetteerRecord>) -> Self {
        let mut index = Self::default();
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Later records with an already seen id overwrite its coordinates.
    fn insert(&mut self, record: GazetteerRecord) {
        let GazetteerRecord {
            id,
            name,
            latitude,
            longitude,
        } = record;

        if let Some(ids) = self.names.get_mut(&name) {
            ids.push(id);
        } else {
            self.names.insert(name, vec![id]);
        }
        self.coordinates.insert(id, Point::new(longitude, latitude));
    }

    /// Reads a GeoNames dump, `.zst` compressed or not.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Reading gazetteer from {}", path.display());
        let pb = progress_bar(file_len(path));
        let index = Self::read(open_tracked(path, &pb)?)?;
        pb.finish_and_clear();
        info!(
            "Indexed {} gazetteer entries under {} names",
            index.len(),
            index.names.len()
        );
        Ok(index)
    }

    /// Parses in parallel per chunk, inserts sequentially so ids stay in file order.
    /// Blank or whitespace-only lines are skipped.
    pub fn read(input: impl BufRead) -> Result<Self> {
        let mut index = Self::default();
        for chunk in &input.lines().enumerate().chunks(CHUNK_SIZE) {
            let chunk: Vec<(usize, String)> = chunk
                .map(|(i, line)| line.map(|line| (i + 1, line)))
                .collect::<io::Result<_>>()?;
            let records: Vec<_> = chunk
                .par_iter()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(line_no, line)| GazetteerRecord::parse(*line_no, line))
                .collect();
            for record in records {
                index.insert(record?);
            }
        }
        Ok(index)
    }

    /// Candidate ids for a name in gazetteer order, empty if unknown.
    pub fn lookup(&self, name: &str) -> &[GeonameId] {
        self.names.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn coordinates_of(&self, id: GeonameId) -> Option<Point> {
        self.coordinates.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn names(&self) -> usize {
        self.names.len()
    }
}
