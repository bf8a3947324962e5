use geo::Point;
use tracing::debug;

use crate::{
    distance::{is_nearby, NEARBY_THRESHOLD_DEGREES},
    gazetteer::{GazetteerIndex, GeonameId},
    pairing::CoordinatePair,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Name is not in the gazetteer.
    Unknown,
    /// Only one place has this name.
    Unique(GeonameId),
    /// Several places share the name, coordinates picked one.
    Disambiguated(GeonameId),
    /// Several places share the name and there are no coordinates.
    Ambiguous,
    /// Several places share the name, none within the threshold.
    NotNearby,
}

impl Outcome {
    pub fn id(self) -> Option<GeonameId> {
        match self {
            Self::Unique(x) | Self::Disambiguated(x) => Some(x),
            _ => None,
        }
    }
}

pub struct EntityResolver<'a> {
    index: &'a GazetteerIndex,
    threshold: f64,
}

impl<'a> EntityResolver<'a> {
    pub fn new(index: &'a GazetteerIndex) -> Self {
        Self::with_threshold(index, NEARBY_THRESHOLD_DEGREES)
    }

    pub fn with_threshold(index: &'a GazetteerIndex, threshold: f64) -> Self {
        Self { index, threshold }
    }

    pub fn resolve(&self, name: &str, pair: Option<CoordinatePair>) -> Option<GeonameId> {
        self.classify(name, pair).id()
    }

    pub fn classify(&self, name: &str, pair: Option<CoordinatePair>) -> Outcome {
        match self.index.lookup(name) {
            [] => Outcome::Unknown,
            [id] => Outcome::Unique(*id),
            candidates => {
                let Some(pair) = pair else {
                    return Outcome::Ambiguous;
                };
                let observed = Point::new(pair.longitude, pair.latitude);

                // first candidate in gazetteer order wins, not the nearest
                let found = candidates.iter().copied().find(|id| {
                    self.index
                        .coordinates_of(*id)
                        .is_some_and(|x| is_nearby(&x, &observed, self.threshold))
                });

                match found {
                    Some(id) => {
                        debug!("Disambiguated {name} to {id} out of {}", candidates.len());
                        Outcome::Disambiguated(id)
                    }
                    None => Outcome::NotNearby,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gazetteer::GazetteerRecord;

    use super::*;

    fn index() -> GazetteerIndex {
        GazetteerIndex::build(
            [
                (1, "Paris", 48.8566, 2.3522),
                (2, "Paris", 33.6610, -95.5555),
                (7, "Springfield", 39.78, -89.65),
                (20, "Twin", 10.0, 10.0),
                (21, "Twin", 10.01, 10.0),
                (22, "Twin", 10.0, 10.0),
            ]
            .map(|(id, name, latitude, longitude)| GazetteerRecord {
                id: GeonameId(id),
                name: name.to_string(),
                latitude,
                longitude,
            }),
        )
    }

    fn pair(latitude: f64, longitude: f64) -> Option<CoordinatePair> {
        Some(CoordinatePair {
            latitude,
            longitude,
        })
    }

    #[test]
    fn unique_name_ignores_coordinates() {
        let index = index();
        let resolver = EntityResolver::new(&index);
        for p in [None, pair(39.78, -89.65), pair(0.0, 0.0), pair(-45.0, 170.0)] {
            assert_eq!(resolver.resolve("Springfield", p), Some(GeonameId(7)));
        }
        assert_eq!(
            resolver.classify("Springfield", None),
            Outcome::Unique(GeonameId(7))
        );
    }

    #[test]
    fn ambiguous_without_coordinates() {
        let index = index();
        let resolver = EntityResolver::new(&index);
        assert_eq!(resolver.classify("Paris", None), Outcome::Ambiguous);
        assert_eq!(resolver.resolve("Paris", None), None);
    }

    #[test]
    fn disambiguates_by_coordinates() {
        let index = index();
        let resolver = EntityResolver::new(&index);
        assert_eq!(
            resolver.classify("Paris", pair(48.85, 2.35)),
            Outcome::Disambiguated(GeonameId(1))
        );
        assert_eq!(
            resolver.resolve("Paris", pair(33.66, -95.55)),
            Some(GeonameId(2))
        );
    }

    #[test]
    fn nothing_nearby() {
        let index = index();
        let resolver = EntityResolver::new(&index);
        assert_eq!(resolver.classify("Paris", pair(0.0, 0.0)), Outcome::NotNearby);
        assert_eq!(resolver.resolve("Paris", pair(0.0, 0.0)), None);
    }

    #[test]
    fn unknown_name() {
        let index = index();
        let resolver = EntityResolver::new(&index);
        assert_eq!(resolver.classify("Atlantis", pair(0.0, 0.0)), Outcome::Unknown);
        assert_eq!(resolver.resolve("Atlantis", None), None);
    }

    #[test]
    fn first_match_in_file_order() {
        let index = index();
        let resolver = EntityResolver::new(&index);

        // 21 is closer, but 20 comes first and is within the threshold
        assert_eq!(resolver.resolve("Twin", pair(10.009, 10.0)), Some(GeonameId(20)));
        // 20 is exactly on the point, 22 is identical but later
        assert_eq!(resolver.resolve("Twin", pair(10.0, 10.0)), Some(GeonameId(20)));
    }

    #[test]
    fn threshold_is_strict_and_configurable() {
        let index = index();
        let tight = EntityResolver::with_threshold(&index, 0.001);
        assert_eq!(tight.resolve("Paris", pair(48.85, 2.35)), None);
        assert_eq!(
            tight.resolve("Paris", pair(48.8566, 2.3522)),
            Some(GeonameId(1))
        );

        let zero = EntityResolver::with_threshold(&index, 0.0);
        assert_eq!(zero.resolve("Paris", pair(48.8566, 2.3522)), None);
    }
}
