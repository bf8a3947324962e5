use std::collections::{hash_map::Entry, HashMap};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoordinatePair {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordinatePair {
    fn from_halves(axis: Axis, value: f64, other: f64) -> Self {
        match axis {
            Axis::Latitude => Self {
                latitude: value,
                longitude: other,
            },
            Axis::Longitude => Self {
                latitude: other,
                longitude: value,
            },
        }
    }
}

/// Pairs up latitude and longitude facts per entity name. A name is either
/// absent (nothing pending) or holds the one half seen so far; completing a
/// pair removes it again, so every pair comes from a fresh episode.
#[derive(Debug, Default)]
pub struct CoordinatePairAssembler {
    pending: HashMap<String, (Axis, f64)>,
}

impl CoordinatePairAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the completed pair once both axes have been seen for `name`.
    /// A repeated half on the same axis replaces the pending one.
    pub fn observe(&mut self, name: &str, axis: Axis, value: f64) -> Option<CoordinatePair> {
        match self.pending.entry(name.to_string()) {
            Entry::Vacant(x) => {
                x.insert((axis, value));
                None
            }
            Entry::Occupied(mut x) => {
                let (pending_axis, pending_value) = *x.get();
                if pending_axis == axis {
                    x.insert((axis, value));
                    None
                } else {
                    x.remove();
                    Some(CoordinatePair::from_halves(axis, value, pending_value))
                }
            }
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
