//! The particle record.

/// A single neutron history record.
///
/// Fixed-size and `Copy` so banks move particles by plain memcpy. The
/// engine never interprets these fields; it only counts and copies
/// records; the transport kernel owns their meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    /// Position in problem coordinates.
    pub position: [f64; 3],
    /// Unit direction of flight.
    pub direction: [f64; 3],
    /// Statistical weight.
    pub weight: f64,
    /// Whether the history is still being tracked.
    pub alive: bool,
}

impl Particle {
    /// A live particle at `position` travelling along `direction` with
    /// unit weight.
    pub fn new(position: [f64; 3], direction: [f64; 3]) -> Self {
        Self {
            position,
            direction,
            weight: 1.0,
            alive: true,
        }
    }
}
