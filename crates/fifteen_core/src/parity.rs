//! Permutation parity, used for solvability checks.

/// Parity of a permutation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Parity {
    /// Even number of swaps.
    #[default]
    Even = 0,
    /// Odd number of swaps.
    Odd = 1,
}
impl Parity {
    /// Returns the opposite parity.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }

    /// Returns the parity of an integer.
    pub fn of(n: usize) -> Self {
        if n % 2 == 0 { Parity::Even } else { Parity::Odd }
    }

    /// Returns the parity of a permutation of `0..n`, given as the image of
    /// each index. Returns `None` if `perm` is not a permutation.
    ///
    /// Runs in linear time by counting cycles: a permutation of `n` elements
    /// with `c` cycles is a product of `n - c` swaps.
    pub fn of_permutation(perm: &[usize]) -> Option<Self> {
        let mut seen = vec![false; perm.len()];
        let mut cycles = 0;
        for start in 0..perm.len() {
            if seen[start] {
                continue;
            }
            cycles += 1;
            let mut i = start;
            while !*seen.get(i)? {
                seen[i] = true;
                i = *perm.get(i)?;
            }
            if i != start {
                return None; // entered a cycle from the side
            }
        }
        Some(Self::of(perm.len() - cycles))
    }
}
impl std::ops::Add for Parity {
    type Output = Parity;

    fn add(self, rhs: Self) -> Self::Output {
        if rhs == Parity::Odd { self.opposite() } else { self }
    }
}
