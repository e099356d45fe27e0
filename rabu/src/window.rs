//! Window / aperture coordinate translation.
//!
//! A [`Window`] maps the caller-visible ("external") coordinate space onto
//! the storage's own ("internal") coordinate space:
//!
//! ```text
//! internal = delta + external
//! ```
//!
//! A window with a positive extent refuses access once the external cursor
//! reaches it; an extent of zero means the window imposes no ceiling and
//! the storage alone limits availability.

use crate::error::{RabuError, Result};

/// Aperture over a shared storage, expressed as a pair of external-space
/// constraints.
///
/// Immutable once constructed; callers wanting a different sub-range of
/// the same storage build a new window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Aperture floor as an index relative to the storage origin.
    delta: usize,
    /// Aperture ceiling as a count from `delta`. Zero means unconstrained.
    extent: usize,
}

impl Window {
    /// A window with no aperture constraint: external coordinates map
    /// straight onto internal ones and the storage limits availability.
    pub fn unconstrained() -> Self {
        Window {
            delta: 0,
            extent: 0,
        }
    }

    /// A constrained window admitting external coordinates `0..extent`,
    /// shifted by `delta` into the storage.
    ///
    /// # Errors
    ///
    /// Returns [`RabuError::InvalidWindow`] when `extent` is zero; a
    /// constrained window must have a positive extent (use
    /// [`Window::unconstrained`] for the no-ceiling form).
    pub fn new(delta: usize, extent: usize) -> Result<Self> {
        if extent == 0 {
            return Err(RabuError::InvalidWindow { delta, extent });
        }
        Ok(Window { delta, extent })
    }

    /// Aperture floor relative to the storage origin.
    pub fn delta(&self) -> usize {
        self.delta
    }

    /// Aperture ceiling as a count from the floor; zero when
    /// unconstrained.
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Whether this window imposes a ceiling of its own.
    pub fn is_constrained(&self) -> bool {
        self.extent > 0
    }

    /// Translate an external coordinate to an internal storage index.
    pub fn internal(&self, external: usize) -> usize {
        self.delta + external
    }

    /// External positions remaining inside the aperture at `cursor`.
    ///
    /// `None` means the window is unconstrained and the storage should be
    /// asked instead.
    pub fn remaining(&self, cursor: usize) -> Option<usize> {
        if self.extent > 0 {
            Some(self.extent.saturating_sub(cursor))
        } else {
            None
        }
    }

    /// Whether the external run `[external, external + count)` lies
    /// inside the aperture.
    pub fn admits(&self, external: usize, count: usize) -> bool {
        match self.remaining(external) {
            Some(r) => count <= r,
            None => true,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::unconstrained()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconstrained_translates_identity() {
        let w = Window::unconstrained();
        assert_eq!(w.internal(0), 0);
        assert_eq!(w.internal(17), 17);
        assert_eq!(w.remaining(0), None);
        assert!(!w.is_constrained());
    }

    #[test]
    fn constrained_translates_with_delta() {
        let w = Window::new(2, 3).unwrap();
        assert_eq!(w.internal(0), 2);
        assert_eq!(w.internal(2), 4);
        assert_eq!(w.remaining(0), Some(3));
        assert_eq!(w.remaining(2), Some(1));
        assert_eq!(w.remaining(3), Some(0));
        assert_eq!(w.remaining(100), Some(0));
    }

    #[test]
    fn zero_extent_is_rejected() {
        assert!(matches!(
            Window::new(4, 0),
            Err(RabuError::InvalidWindow { delta: 4, extent: 0 })
        ));
    }

    #[test]
    fn admits_runs_inside_the_aperture() {
        let w = Window::new(0, 4).unwrap();
        assert!(w.admits(0, 4));
        assert!(w.admits(3, 1));
        assert!(!w.admits(3, 2));
        assert!(!w.admits(4, 1));
        assert!(Window::unconstrained().admits(1000, 1000));
    }
}
