/*!
# Delgado: Pixel Grid
*/

use super::{
	Axis,
	PatchError,
	Span,
};



/// # Marker Color.
///
/// Opaque black, packed as ARGB. Only meaningful along row zero and column
/// zero.
pub(crate) const MARKER: u32 = 0xFF00_0000;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Pixel Grid.
///
/// A row-major buffer of packed ARGB pixels. The buffer is always exactly
/// `width * height` long, and neither dimension is ever zero.
pub(crate) struct PixelGrid {
	width: usize,
	height: usize,
	pixels: Vec<u32>,
}

impl PixelGrid {
	/// # New.
	///
	/// ## Errors
	///
	/// An error is returned if either dimension is zero or the buffer length
	/// does not match them.
	pub(crate) fn new(width: usize, height: usize, pixels: Vec<u32>)
	-> Result<Self, PatchError> {
		if
			width == 0 ||
			height == 0 ||
			width.checked_mul(height).map_or(true, |len| len != pixels.len())
		{
			Err(PatchError::Shape)
		}
		else { Ok(Self { width, height, pixels }) }
	}

	/// # From RGBA Bytes.
	///
	/// Pack straight (non-premultiplied) 8-bit RGBA quads into ARGB words.
	///
	/// ## Errors
	///
	/// Same as [`PixelGrid::new`].
	pub(crate) fn from_rgba(width: usize, height: usize, raw: &[u8])
	-> Result<Self, PatchError> {
		if raw.len() % 4 != 0 { return Err(PatchError::Shape); }
		let pixels = raw.chunks_exact(4)
			.map(|px| u32::from_be_bytes([px[3], px[0], px[1], px[2]]))
			.collect();
		Self::new(width, height, pixels)
	}

	#[must_use]
	/// # Into RGBA Bytes.
	///
	/// The inverse of [`PixelGrid::from_rgba`].
	pub(crate) fn into_rgba(self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.pixels.len() * 4);
		for px in self.pixels {
			let [a, r, g, b] = px.to_be_bytes();
			out.extend_from_slice(&[r, g, b, a]);
		}
		out
	}
}

impl PixelGrid {
	#[must_use]
	/// # Width.
	pub(crate) const fn width(&self) -> usize { self.width }

	#[must_use]
	/// # Height.
	pub(crate) const fn height(&self) -> usize { self.height }

	#[cfg(test)]
	#[must_use]
	/// # Pixels.
	pub(crate) fn pixels(&self) -> &[u32] { &self.pixels }

	#[must_use]
	/// # Row.
	pub(crate) fn row(&self, y: usize) -> &[u32] {
		let start = y * self.width;
		&self.pixels[start..start + self.width]
	}

	#[must_use]
	/// # Axis Length.
	pub(crate) const fn len(&self, axis: Axis) -> usize {
		match axis {
			Axis::Horizontal => self.width,
			Axis::Vertical => self.height,
		}
	}

	/// # Border.
	///
	/// Iterate the pixels of row zero (horizontal) or column zero
	/// (vertical).
	pub(crate) fn border(&self, axis: Axis) -> impl Iterator<Item=u32> + '_ {
		let step = match axis {
			Axis::Horizontal => 1,
			Axis::Vertical => self.width,
		};
		self.pixels.iter().step_by(step).take(self.len(axis)).copied()
	}
}

impl PixelGrid {
	#[must_use]
	/// # Uniform?
	///
	/// Returns `true` if, for every orthogonal index, each pixel inside the
	/// span matches the one at `span.start()`.
	///
	/// Single-pixel spans are always uniform.
	pub(crate) fn is_uniform(&self, axis: Axis, span: Span) -> bool {
		if span.is_trivial() { return true; }
		match axis {
			// Each row must repeat its representative column.
			Axis::Horizontal => (0..self.height).all(|y| {
				let row = &self.row(y)[span.start()..span.end()];
				row.iter().all(|&px| px == row[0])
			}),
			// Each row in the span must equal the representative row.
			Axis::Vertical => {
				let first = self.row(span.start());
				(span.start() + 1..span.end()).all(|y| self.row(y) == first)
			},
		}
	}

	#[must_use]
	/// # Collapse.
	///
	/// Drop everything in `[start + 1, end)` along the axis, keeping the
	/// representative at `start` and shifting the rest down to meet it.
	pub(crate) fn collapse(self, axis: Axis, span: Span) -> Self {
		if span.is_trivial() { return self; }
		match axis {
			Axis::Horizontal => self.collapse_columns(span),
			Axis::Vertical => self.collapse_rows(span),
		}
	}

	/// # Collapse Columns.
	///
	/// Rows are compacted front to back, so the destination never overtakes
	/// the source and `copy_within` is safe.
	fn collapse_columns(mut self, span: Span) -> Self {
		let keep = span.start() + 1;
		let tail = self.width - span.end();
		let mut dst = 0;
		for y in 0..self.height {
			let src = y * self.width;
			self.pixels.copy_within(src..src + keep, dst);
			dst += keep;
			self.pixels.copy_within(src + span.end()..src + self.width, dst);
			dst += tail;
		}

		self.pixels.truncate(dst);
		self.width = keep + tail;
		self
	}

	/// # Collapse Rows.
	fn collapse_rows(mut self, span: Span) -> Self {
		let width = self.width;
		self.pixels.drain((span.start() + 1) * width..span.end() * width);
		self.height -= span.reduction();
		self
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	const W: u32 = 0xFFFF_FFFF;
	const R: u32 = 0xFFFF_0000;
	const T: u32 = 0x0000_0000;

	#[test]
	fn t_new() {
		assert!(PixelGrid::new(2, 2, vec![T; 4]).is_ok());
		assert_eq!(PixelGrid::new(0, 2, Vec::new()), Err(PatchError::Shape));
		assert_eq!(PixelGrid::new(2, 0, Vec::new()), Err(PatchError::Shape));
		assert_eq!(PixelGrid::new(2, 2, vec![T; 3]), Err(PatchError::Shape));
		assert_eq!(PixelGrid::new(usize::MAX, 2, vec![T; 3]), Err(PatchError::Shape));
	}

	#[test]
	fn t_rgba() {
		let raw = [
			0, 0, 0, 255,      255, 0, 0, 255,
			1, 2, 3, 4,        255, 255, 255, 0,
		];
		let grid = PixelGrid::from_rgba(2, 2, &raw).expect("Bad grid.");
		assert_eq!(grid.pixels(), &[MARKER, R, 0x0401_0203, 0x00FF_FFFF]);
		assert_eq!(grid.into_rgba(), raw);

		// Partial pixels are no good.
		assert_eq!(PixelGrid::from_rgba(1, 1, &[0, 0, 0]), Err(PatchError::Shape));
	}

	#[test]
	fn t_border() {
		let grid = PixelGrid::new(3, 2, vec![
			1, 2, 3,
			4, 5, 6,
		]).expect("Bad grid.");
		assert_eq!(grid.border(Axis::Horizontal).collect::<Vec<_>>(), [1, 2, 3]);
		assert_eq!(grid.border(Axis::Vertical).collect::<Vec<_>>(), [1, 4]);
		assert_eq!(grid.len(Axis::Horizontal), 3);
		assert_eq!(grid.len(Axis::Vertical), 2);
	}

	#[test]
	fn t_uniform() {
		let grid = PixelGrid::new(4, 3, vec![
			T, W, W, T,
			R, W, W, R,
			T, W, R, T,
		]).expect("Bad grid.");

		// Columns 1..3 differ on the last row.
		assert!(! grid.is_uniform(Axis::Horizontal, Span::new(1, 3)));
		assert!(grid.is_uniform(Axis::Horizontal, Span::new(1, 2)));

		// Rows 0 and 2 are only the same on their edges.
		assert!(! grid.is_uniform(Axis::Vertical, Span::new(0, 2)));
		assert!(grid.is_uniform(Axis::Vertical, Span::new(2, 3)));

		let grid = PixelGrid::new(2, 3, vec![
			T, R,
			W, R,
			W, R,
		]).expect("Bad grid.");
		assert!(grid.is_uniform(Axis::Vertical, Span::new(1, 3)));
	}

	#[test]
	fn t_collapse_columns() {
		let grid = PixelGrid::new(5, 2, vec![
			1, 2, 2, 2, 3,
			4, 5, 5, 5, 6,
		]).expect("Bad grid.");
		let grid = grid.collapse(Axis::Horizontal, Span::new(1, 4));
		assert_eq!(grid.width(), 3);
		assert_eq!(grid.height(), 2);
		assert_eq!(grid.pixels(), &[1, 2, 3, 4, 5, 6]);

		// A span running to the edge leaves no tail.
		let grid = PixelGrid::new(3, 2, vec![
			1, 2, 2,
			3, 4, 4,
		]).expect("Bad grid.");
		let grid = grid.collapse(Axis::Horizontal, Span::new(1, 3));
		assert_eq!(grid.pixels(), &[1, 2, 3, 4]);
		assert_eq!(grid.width(), 2);
	}

	#[test]
	fn t_collapse_rows() {
		let grid = PixelGrid::new(2, 5, vec![
			1, 2,
			3, 4,
			3, 4,
			3, 4,
			5, 6,
		]).expect("Bad grid.");
		let grid = grid.collapse(Axis::Vertical, Span::new(1, 4));
		assert_eq!(grid.width(), 2);
		assert_eq!(grid.height(), 3);
		assert_eq!(grid.pixels(), &[1, 2, 3, 4, 5, 6]);
	}

	#[test]
	fn t_collapse_trivial() {
		let grid = PixelGrid::new(2, 2, vec![1, 2, 3, 4]).expect("Bad grid.");
		let same = grid.clone()
			.collapse(Axis::Horizontal, Span::new(0, 1))
			.collapse(Axis::Vertical, Span::new(1, 2));
		assert_eq!(grid, same);
	}
}
