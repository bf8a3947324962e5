//! Links place names from extracted facts to GeoNames ids.
//!
//! A [`GazetteerIndex`] is built once from a GeoNames dump. Coordinate facts
//! are then paired per entity and handed to the [`EntityResolver`], which
//! picks the one gazetteer entry that matches by name and, when the name is
//! shared, by proximity.

pub mod distance;
pub mod error;
pub mod facts;
pub mod gazetteer;
pub mod linker;
pub mod pairing;
pub mod resolver;
pub mod utils;

pub use distance::{angular_distance, NEARBY_THRESHOLD_DEGREES};
pub use error::{Error, Result};
pub use facts::{Fact, Format, ResolvedLink};
pub use gazetteer::{GazetteerIndex, GazetteerRecord, GeonameId};
pub use linker::{Linker, Statistics};
pub use pairing::{Axis, CoordinatePair, CoordinatePairAssembler};
pub use resolver::{EntityResolver, Outcome};
