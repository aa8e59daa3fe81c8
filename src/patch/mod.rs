/*!
# Delgado: Nine-Patch Collapsing

A nine-patch marks its stretchable region with a run of opaque black pixels
along row zero (columns) and column zero (rows). If every column (or row)
within that run is identical, all but one of them can be dropped; the
renderer will stretch the survivor back out to the same result.
*/

mod grid;
mod span;

pub(crate) use grid::{
	MARKER,
	PixelGrid,
};
pub(crate) use span::{
	Axis,
	Regions,
	Span,
};
use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Patch Errors.
pub(crate) enum PatchError {
	/// # More Than One Marker Run.
	Multiple(Axis),

	/// # Bad Buffer Dimensions.
	Shape,
}

impl Error for PatchError {}

impl fmt::Display for PatchError {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl PatchError {
	#[must_use]
	/// # As Str.
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Multiple(Axis::Horizontal) => "multiple top regions",
			Self::Multiple(Axis::Vertical) => "multiple side regions",
			Self::Shape => "invalid dimensions",
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Rejected Grid.
///
/// A grid that could not be collapsed at all, handed back exactly as it
/// came in, along with the axis that had too many marker runs.
pub(crate) struct Rejected {
	grid: PixelGrid,
	axis: Axis,
}

impl Error for Rejected {}

impl fmt::Display for Rejected {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} ({}x{})",
			self.error().as_str(),
			self.grid.width(),
			self.grid.height(),
		)
	}
}

impl Rejected {
	#[must_use]
	/// # Error.
	pub(crate) const fn error(&self) -> PatchError { PatchError::Multiple(self.axis) }

	#[cfg(test)]
	#[must_use]
	/// # Into Grid.
	pub(crate) fn into_grid(self) -> PixelGrid { self.grid }
}



#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Notice.
///
/// Non-fatal problems that cost one axis its collapse.
pub(crate) enum Notice {
	/// # No Top Markers.
	MissingTop = 0b0001,

	/// # No Side Markers.
	MissingSide = 0b0010,

	/// # Top Span Isn't Uniform.
	MismatchTop = 0b0100,

	/// # Side Span Isn't Uniform.
	MismatchSide = 0b1000,
}

impl Notice {
	/// # All.
	const ALL: [Self; 4] = [
		Self::MissingTop, Self::MissingSide,
		Self::MismatchTop, Self::MismatchSide,
	];

	#[must_use]
	/// # Missing (Axis).
	const fn missing(axis: Axis) -> Self {
		match axis {
			Axis::Horizontal => Self::MissingTop,
			Axis::Vertical => Self::MissingSide,
		}
	}

	#[must_use]
	/// # Mismatch (Axis).
	const fn mismatch(axis: Axis) -> Self {
		match axis {
			Axis::Horizontal => Self::MismatchTop,
			Axis::Vertical => Self::MismatchSide,
		}
	}

	#[must_use]
	/// # As Str.
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::MissingTop => "no top region",
			Self::MissingSide => "no side region",
			Self::MismatchTop => "top region not uniform",
			Self::MismatchSide => "side region not uniform",
		}
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Notices.
///
/// A set of [`Notice`]s, packed into a byte.
pub(crate) struct Notices(u8);

impl Notices {
	/// # Add.
	fn add(&mut self, notice: Notice) { self.0 |= notice as u8; }

	#[must_use]
	/// # Contains?
	pub(crate) const fn contains(self, notice: Notice) -> bool {
		(notice as u8) == self.0 & (notice as u8)
	}

	#[must_use]
	/// # Is Empty?
	pub(crate) const fn is_empty(self) -> bool { self.0 == 0 }

	/// # Iterate.
	pub(crate) fn iter(self) -> impl Iterator<Item=Notice> {
		Notice::ALL.into_iter().filter(move |n| self.contains(*n))
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Collapse Result.
///
/// The (possibly) smaller grid, along with how much was removed and any
/// notices raised on the way. If neither axis shrank, the grid is the
/// original, untouched.
pub(crate) struct Collapsed {
	grid: PixelGrid,
	columns: usize,
	rows: usize,
	notices: Notices,
}

impl Collapsed {
	#[must_use]
	/// # Changed?
	pub(crate) const fn is_changed(&self) -> bool {
		self.columns != 0 || self.rows != 0
	}

	#[cfg(test)]
	#[must_use]
	/// # Grid.
	pub(crate) const fn grid(&self) -> &PixelGrid { &self.grid }

	#[must_use]
	/// # Into Grid.
	pub(crate) fn into_grid(self) -> PixelGrid { self.grid }

	#[must_use]
	/// # Columns Removed.
	pub(crate) const fn columns(&self) -> usize { self.columns }

	#[must_use]
	/// # Rows Removed.
	pub(crate) const fn rows(&self) -> usize { self.rows }

	#[must_use]
	/// # Final Dimensions.
	pub(crate) const fn dimensions(&self) -> (usize, usize) {
		(self.grid.width(), self.grid.height())
	}

	#[must_use]
	/// # Notices.
	pub(crate) const fn notices(&self) -> Notices { self.notices }
}



/// # Collapse!
///
/// Check the borders, locate the stretch spans, and collapse whichever of
/// them is uniform.
///
/// Both spans are read up front. Collapsing never touches index zero of
/// either axis, so column zero is the same before and after the horizontal
/// pass.
///
/// ## Errors
///
/// If either border has more than one marker run, the whole image is left
/// alone and handed back inside the error.
pub(crate) fn collapse(grid: PixelGrid) -> Result<Collapsed, Rejected> {
	// Multiplicity first; this applies to both axes.
	for axis in Axis::ALL {
		if Regions::Many == Regions::count(grid.border(axis)) {
			return Err(Rejected { grid, axis });
		}
	}

	let spans = Axis::ALL.map(|axis| Span::locate(grid.border(axis)));
	let mut out = Collapsed {
		grid,
		columns: 0,
		rows: 0,
		notices: Notices::default(),
	};

	for (axis, span) in Axis::ALL.into_iter().zip(spans) {
		let Some(span) = span else {
			out.notices.add(Notice::missing(axis));
			continue;
		};
		if span.is_trivial() { continue; }

		if ! out.grid.is_uniform(axis, span) {
			out.notices.add(Notice::mismatch(axis));
			continue;
		}

		out.grid = out.grid.collapse(axis, span);
		match axis {
			Axis::Horizontal => { out.columns = span.reduction(); },
			Axis::Vertical => { out.rows = span.reduction(); },
		}

		debug_assert!(
			axis == Axis::Vertical ||
			Span::locate(out.grid.border(Axis::Vertical)) == spans[1],
			"BUG: column zero moved.",
		);
	}

	Ok(out)
}
