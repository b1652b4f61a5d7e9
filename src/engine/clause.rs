use {
    crate::types::*,
    std::{fmt, ops::Index},
};

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ClauseFlag: u8 {
        /// derived at conflict analysis rather than loaded from the input
        const LEARNED = 0b0001;
        /// unregistered from the backend; the arena slot is retired
        const DEAD    = 0b0010;
    }
}

/// A clause in the engine's arena: a fixed ordered sequence of literals,
/// immutable once created, plus bookkeeping flags.
#[derive(Clone, Debug)]
pub struct Clause {
    pub(crate) lits: Vec<Lit>,
    flags: ClauseFlag,
}

impl Clause {
    pub fn new(lits: Vec<Lit>, learned: bool) -> Clause {
        Clause {
            lits,
            flags: if learned {
                ClauseFlag::LEARNED
            } else {
                ClauseFlag::empty()
            },
        }
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.lits.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
    #[inline]
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Lit> {
        self.lits.iter()
    }
    #[inline]
    pub fn is_learned(&self) -> bool {
        self.flags.contains(ClauseFlag::LEARNED)
    }
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.flags.contains(ClauseFlag::DEAD)
    }
    pub(crate) fn kill(&mut self) {
        self.flags.insert(ClauseFlag::DEAD);
    }
}

impl Index<usize> for Clause {
    type Output = Lit;
    #[inline]
    fn index(&self, i: usize) -> &Lit {
        &self.lits[i]
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "C{:?}{}", i32s(&self.lits), if self.is_learned() { "*" } else { "" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_flags() {
        let mut c = Clause::new(vec![Lit::from(1i32), Lit::from(-2i32)], true);
        assert!(c.is_learned());
        assert!(!c.is_dead());
        c.kill();
        assert!(c.is_dead());
        assert_eq!(c.len(), 2);
        assert_eq!(c[1], Lit::from(-2i32));
        assert_eq!(format!("{c}"), "C[1, -2]*");
    }
}
