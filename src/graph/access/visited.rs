//! Branded visited set for graph traversals.
//!
//! Membership is keyed by [`VertexId`] (the arena slot), never by payload, so
//! vertices holding equal data are still tracked separately. Storage is a
//! dense word-packed bitset sized to the arena; each query allocates its own.

use crate::graph::vertex::VertexId;
use crate::token::InvariantLifetime;

const WORD_BITS: usize = usize::BITS as usize;

#[inline(always)]
fn bit_word_mask(bit: usize) -> (usize, usize) {
    (bit / WORD_BITS, 1usize << (bit % WORD_BITS))
}

/// A dense, word-packed visited set for one traversal.
pub(crate) struct VisitedSet<'brand> {
    bits: usize,
    words: Vec<usize>,
    count: usize,
    _brand: InvariantLifetime<'brand>,
}

impl<'brand> VisitedSet<'brand> {
    pub(crate) fn new(bits: usize) -> Self {
        Self {
            bits,
            words: vec![0; bits.div_ceil(WORD_BITS)],
            count: 0,
            _brand: InvariantLifetime::new(),
        }
    }

    /// Number of vertices the set can track.
    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.bits
    }

    /// Number of vertices marked so far.
    #[inline(always)]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Marks `vertex` and returns `true` iff it was not visited before.
    ///
    /// # Panics
    /// Panics if `vertex` lies outside the arena the set was sized for.
    #[inline(always)]
    pub(crate) fn try_visit(&mut self, vertex: VertexId<'brand>) -> bool {
        let bit = vertex.index();
        assert!(bit < self.bits, "vertex {bit} out of bounds for visited set of {}", self.bits);
        let (word, mask) = bit_word_mask(bit);
        let fresh = self.words[word] & mask == 0;
        if fresh {
            self.words[word] |= mask;
            self.count += 1;
        }
        fresh
    }

    #[inline(always)]
    pub(crate) fn is_visited(&self, vertex: VertexId<'brand>) -> bool {
        let bit = vertex.index();
        if bit >= self.bits {
            return false;
        }
        let (word, mask) = bit_word_mask(bit);
        self.words[word] & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_visit_marks_once() {
        let mut set = VisitedSet::<'static>::new(130);
        let v = VertexId::from_index(129);
        assert_eq!(set.capacity(), 130);
        assert!(!set.is_visited(v));
        assert!(set.try_visit(v));
        assert!(!set.try_visit(v));
        assert!(set.is_visited(v));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn neighbouring_bits_are_independent() {
        let mut set = VisitedSet::<'static>::new(64);
        assert!(set.try_visit(VertexId::from_index(63)));
        assert!(!set.is_visited(VertexId::from_index(62)));
        assert!(!set.is_visited(VertexId::from_index(0)));
    }

    #[test]
    fn ids_beyond_capacity_are_never_visited() {
        let set = VisitedSet::<'static>::new(0);
        assert!(!set.is_visited(VertexId::from_index(0)));
    }
}
