/*!
# Delgado: Spans
*/

use std::fmt;
use super::MARKER;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Axis.
pub(crate) enum Axis {
	/// # Horizontal.
	///
	/// The span is read from row zero and collapses columns.
	Horizontal,

	/// # Vertical.
	///
	/// The span is read from column zero and collapses rows.
	Vertical,
}

impl fmt::Display for Axis {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Axis {
	/// # Both.
	///
	/// Horizontal comes first; the order matters for the collapse.
	pub(crate) const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

	#[must_use]
	/// # As Str.
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Horizontal => "top",
			Self::Vertical => "side",
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Marker Regions.
///
/// The number of disjoint marker runs found along a border.
pub(crate) enum Regions {
	/// # No Markers.
	None,

	/// # Exactly One Run.
	One,

	/// # Two or More Runs.
	Many,
}

impl Regions {
	#[must_use]
	/// # Count.
	///
	/// Walk the whole border, tracking whether a run has started, whether a
	/// gap has followed it, and bailing at the first marker after a gap.
	pub(crate) fn count<I>(border: I) -> Self
	where I: IntoIterator<Item=u32> {
		let mut seen_run = false;
		let mut seen_gap = false;
		for px in border {
			let marker = px == MARKER;
			if marker {
				if seen_gap { return Self::Many; }
				seen_run = true;
			}
			else if seen_run { seen_gap = true; }
		}

		if seen_run { Self::One }
		else { Self::None }
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Span.
///
/// A half-open `[start, end)` run of marker pixels along one border. The
/// end is always greater than the start.
pub(crate) struct Span {
	start: usize,
	end: usize,
}

impl Span {
	#[must_use]
	/// # New.
	pub(crate) const fn new(start: usize, end: usize) -> Self {
		debug_assert!(start < end, "BUG: empty span.");
		Self { start, end }
	}

	#[must_use]
	/// # Locate.
	///
	/// Find the first run of marker pixels in the border, stopping at the
	/// first non-marker pixel after it, or the end of the border.
	///
	/// Returns `None` if there are no markers at all.
	pub(crate) fn locate<I>(border: I) -> Option<Self>
	where I: IntoIterator<Item=u32> {
		let mut start = None;
		let mut len = 0;
		for (k, px) in border.into_iter().enumerate() {
			len = k + 1;
			match (start, px == MARKER) {
				(None, true) => { start = Some(k); },
				(Some(s), false) => return Some(Self::new(s, k)),
				_ => {},
			}
		}

		start.map(|s| Self::new(s, len))
	}

	#[must_use]
	/// # Start.
	pub(crate) const fn start(self) -> usize { self.start }

	#[must_use]
	/// # End.
	pub(crate) const fn end(self) -> usize { self.end }

	#[must_use]
	/// # Length.
	pub(crate) const fn len(self) -> usize { self.end - self.start }

	#[must_use]
	/// # Trivial?
	///
	/// A single-pixel span has nothing to collapse.
	pub(crate) const fn is_trivial(self) -> bool { self.len() == 1 }

	#[must_use]
	/// # Reduction.
	///
	/// The number of pixels a collapse would remove.
	pub(crate) const fn reduction(self) -> usize { self.len() - 1 }
}
