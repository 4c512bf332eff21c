//! Fixed-capacity particle banks.
//!
//! [`ParticleBank`] is the fundamental container for both the source
//! population and fission-site harvests. Storage is allocated once at
//! construction and never grows; the live count moves between 0 and
//! capacity. Every write is capacity checked: overflow is a hard error,
//! never a silent truncation.

use crate::error::BankError;
use crate::particle::Particle;

/// An ordered, fixed-capacity sequence of particles with a live count.
///
/// Invariant: `len() <= capacity()` at every observation point. Clearing
/// a bank resets the count without touching storage, so banks are reused
/// across generations with no reallocation.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBank {
    storage: Box<[Particle]>,
    count: usize,
}

impl ParticleBank {
    /// Allocate a bank holding up to `capacity` particles.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::ZeroCapacity`] for a zero capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self, BankError> {
        if capacity == 0 {
            return Err(BankError::ZeroCapacity);
        }
        Ok(Self {
            storage: vec![Particle::default(); capacity].into_boxed_slice(),
            count: 0,
        })
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the bank holds no live particles.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fixed capacity.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Append a particle.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::CapacityExceeded`] when the bank is full.
    pub fn push(&mut self, particle: Particle) -> Result<(), BankError> {
        if self.count == self.storage.len() {
            return Err(BankError::CapacityExceeded {
                capacity: self.storage.len(),
                requested: self.count + 1,
            });
        }
        self.storage[self.count] = particle;
        self.count += 1;
        Ok(())
    }

    /// Append every live particle of `other`, preserving order.
    ///
    /// Used by the ordered fission-bank merge. `other` is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::CapacityExceeded`] when the combined count
    /// would not fit; nothing is copied in that case.
    pub fn append_from(&mut self, other: &ParticleBank) -> Result<(), BankError> {
        let requested = self.count + other.count;
        if requested > self.storage.len() {
            return Err(BankError::CapacityExceeded {
                capacity: self.storage.len(),
                requested,
            });
        }
        self.storage[self.count..requested].copy_from_slice(other.as_slice());
        self.count = requested;
        Ok(())
    }

    /// Reset the live count to zero. Storage is untouched.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// The live particles, in order.
    pub fn as_slice(&self) -> &[Particle] {
        &self.storage[..self.count]
    }

    /// Mutable view of the live particles, in order.
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.storage[..self.count]
    }

    /// The particle at live index `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.as_slice().get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn marker(weight: f64) -> Particle {
        Particle {
            weight,
            ..Particle::new([0.0; 3], [0.0, 0.0, 1.0])
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(ParticleBank::with_capacity(0), Err(BankError::ZeroCapacity));
    }

    #[test]
    fn banks_compare_by_capacity_and_content() {
        let mut a = ParticleBank::with_capacity(2).unwrap();
        let mut b = ParticleBank::with_capacity(2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, ParticleBank::with_capacity(3).unwrap());
        a.push(marker(1.0)).unwrap();
        assert_ne!(a, b);
        b.push(marker(1.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn push_increments_count_in_order() {
        let mut bank = ParticleBank::with_capacity(4).unwrap();
        bank.push(marker(1.0)).unwrap();
        bank.push(marker(2.0)).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.as_slice()[0].weight, 1.0);
        assert_eq!(bank.as_slice()[1].weight, 2.0);
    }

    #[test]
    fn push_past_capacity_fails_loudly() {
        let mut bank = ParticleBank::with_capacity(1).unwrap();
        bank.push(marker(1.0)).unwrap();
        assert_eq!(
            bank.push(marker(2.0)),
            Err(BankError::CapacityExceeded {
                capacity: 1,
                requested: 2
            })
        );
        // Failed push leaves the bank unchanged.
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn append_from_preserves_order() {
        let mut a = ParticleBank::with_capacity(8).unwrap();
        let mut b = ParticleBank::with_capacity(8).unwrap();
        a.push(marker(1.0)).unwrap();
        b.push(marker(2.0)).unwrap();
        b.push(marker(3.0)).unwrap();
        a.append_from(&b).unwrap();
        let weights: Vec<f64> = a.as_slice().iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn append_from_overflow_copies_nothing() {
        let mut a = ParticleBank::with_capacity(2).unwrap();
        let mut b = ParticleBank::with_capacity(4).unwrap();
        a.push(marker(1.0)).unwrap();
        for i in 0..3 {
            b.push(marker(f64::from(i))).unwrap();
        }
        assert_eq!(
            a.append_from(&b),
            Err(BankError::CapacityExceeded {
                capacity: 2,
                requested: 4
            })
        );
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn clear_resets_count_only() {
        let mut bank = ParticleBank::with_capacity(2).unwrap();
        bank.push(marker(1.0)).unwrap();
        bank.clear();
        assert!(bank.is_empty());
        assert_eq!(bank.capacity(), 2);
        // Reusable after clear.
        bank.push(marker(2.0)).unwrap();
        assert_eq!(bank.as_slice()[0].weight, 2.0);
    }

    proptest! {
        #[test]
        fn count_never_exceeds_capacity(
            capacity in 1usize..64,
            pushes in 0usize..128,
        ) {
            let mut bank = ParticleBank::with_capacity(capacity).unwrap();
            let mut accepted = 0usize;
            for i in 0..pushes {
                if bank.push(marker(i as f64)).is_ok() {
                    accepted += 1;
                }
            }
            prop_assert_eq!(bank.len(), accepted.min(capacity));
            prop_assert!(bank.len() <= bank.capacity());
        }
    }
}
