use std::io::{BufRead, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    gazetteer::GeonameId,
    pairing::Axis,
};

pub const HAS_LATITUDE: &str = "hasLatitude";
pub const HAS_LONGITUDE: &str = "hasLongitude";
pub const HAS_GEONAMES_ENTITY_ID: &str = "hasGeonamesEntityId";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub subject: String,
    pub relation: String,
    pub object: String,
}

impl Fact {
    pub fn new(subject: &str, relation: &str, object: &str) -> Self {
        Self {
            subject: subject.to_string(),
            relation: relation.to_string(),
            object: object.to_string(),
        }
    }

    /// Which half of a coordinate this fact carries, if any.
    pub fn axis(&self) -> Option<Axis> {
        match relation_name(&self.relation) {
            HAS_LATITUDE => Some(Axis::Latitude),
            HAS_LONGITUDE => Some(Axis::Longitude),
            _ => None,
        }
    }

    /// The object as a number, e.g. `"48.85"^^<degrees>` is 48.85.
    pub fn coordinate(&self) -> Result<f64> {
        parse_number(&self.object)
            .filter(|x| x.is_finite())
            .ok_or_else(|| Error::MalformedLiteral {
                subject: self.subject.clone(),
                literal: self.object.clone(),
            })
    }
}

/// `<hasLatitude>` and `hasLatitude` name the same relation.
pub fn relation_name(relation: &str) -> &str {
    relation
        .strip_prefix('<')
        .and_then(|x| x.strip_suffix('>'))
        .unwrap_or(relation)
}

fn parse_number(literal: &str) -> Option<f64> {
    let value = match literal.split_once("^^") {
        Some((value, _datatype)) => value,
        None => literal,
    };
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|x| x.strip_suffix('"'))
        .unwrap_or(value);
    value.trim().parse().ok()
}

pub fn number_literal(id: GeonameId) -> String {
    format!("\"{id}\"^^xsd:integer")
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub entity: String,
    pub id: GeonameId,
}

impl ResolvedLink {
    pub fn fact(&self) -> Fact {
        Fact {
            subject: self.entity.clone(),
            relation: format!("<{HAS_GEONAMES_ENTITY_ID}>"),
            object: number_literal(self.id),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// subject, relation, object separated by tabs, with an optional leading fact id
    #[default]
    Tsv,
    /// one `{"subject", "relation", "object"}` object per line
    Jsonl,
}

impl Format {
    pub fn parse(&self, line_no: usize, line: &str) -> Result<Fact> {
        let malformed = |reason: String| Error::MalformedFact {
            line: line_no,
            reason,
        };

        match self {
            Self::Tsv => {
                let columns: Vec<&str> = line.split('\t').collect();
                // a trailing tab is not a column
                let columns = match columns.as_slice() {
                    [rest @ .., ""] => rest,
                    x => x,
                };
                match columns {
                    [subject, relation, object] | [_, subject, relation, object, ..] => {
                        Ok(Fact::new(subject, relation, object))
                    }
                    _ => Err(malformed(format!(
                        "expected at least 3 columns, found {}",
                        columns.len()
                    ))),
                }
            }
            Self::Jsonl => serde_json::from_str(line).map_err(|e| malformed(e.to_string())),
        }
    }

    /// Facts from `input` in order, skipping blank lines.
    pub fn read<'a>(&self, input: impl BufRead + 'a) -> impl Iterator<Item = Result<Fact>> + 'a {
        let format = *self;
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !matches!(line, Ok(x) if x.trim().is_empty()))
            .map(move |(i, line)| format.parse(i + 1, &line?))
    }

    pub fn write(&self, mut output: impl Write, fact: &Fact) -> Result<()> {
        match self {
            Self::Tsv => writeln!(
                output,
                "{}\t{}\t{}",
                fact.subject, fact.relation, fact.object
            )?,
            Self::Jsonl => {
                serde_json::to_writer(&mut output, fact).map_err(std::io::Error::from)?;
                writeln!(output)?;
            }
        }
        Ok(())
    }
}
