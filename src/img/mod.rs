/*!
# Delgado: Images!
*/

pub(super) mod kind;



use crate::{
	EncodingError,
	patch::{
		self,
		Notices,
		PatchError,
		PixelGrid,
	},
	Settings,
};
use std::path::Path;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Outcome.
///
/// The before and after file sizes and dimensions of a processed image,
/// along with any notices raised by the collapse. If nothing could be
/// collapsed, the before and after values will be identical.
pub(super) struct Outcome {
	/// # File Size (Before).
	pub(super) before: u64,

	/// # File Size (After).
	pub(super) after: u64,

	/// # Dimensions (Before).
	pub(super) old_dims: (usize, usize),

	/// # Dimensions (After).
	pub(super) new_dims: (usize, usize),

	/// # Notices.
	pub(super) notices: Notices,
}

impl Outcome {
	#[must_use]
	/// # Changed?
	pub(super) fn is_changed(&self) -> bool { self.old_dims != self.new_dims }
}



/// # Collapse Image.
///
/// Load the nine-patch, collapse whatever can be collapsed, and overwrite
/// the original if it got any smaller.
///
/// ## Errors
///
/// Unreadable, unsupported, or multi-region images are skipped with an
/// error; nothing is written in those cases.
pub(super) fn encode(file: &Path, settings: Settings)
-> Result<Outcome, EncodingError> {
	// Read the file.
	let raw = std::fs::read(file).map_err(|_|
		if file.is_file() { EncodingError::Read }
		else { EncodingError::Vanished }
	)?;
	let before = raw.len() as u64;
	if before == 0 { return Err(EncodingError::Empty); }

	let new = shrink(&raw, settings)?;
	if ! new.is_changed() {
		return Ok(Outcome {
			before,
			after: before,
			old_dims: new.old_dims,
			new_dims: new.old_dims,
			notices: new.notices,
		});
	}

	save_image(file, &new.data, settings)?;
	Ok(Outcome {
		before,
		after: new.data.len() as u64,
		old_dims: new.old_dims,
		new_dims: new.new_dims,
		notices: new.notices,
	})
}



#[derive(Debug)]
/// # Shrunk Image.
///
/// This is the in-memory half of [`encode`]. If the image did not change,
/// `data` is empty.
struct Shrunk {
	data: Vec<u8>,
	old_dims: (usize, usize),
	new_dims: (usize, usize),
	notices: Notices,
}

impl Shrunk {
	/// # Changed?
	fn is_changed(&self) -> bool { self.old_dims != self.new_dims }
}

/// # Shrink (Raw).
///
/// Decode, collapse, and re-encode the PNG. Nothing gets encoded unless the
/// collapse actually removed something.
fn shrink(raw: &[u8], settings: Settings) -> Result<Shrunk, EncodingError> {
	if ! kind::is_png(raw) { return Err(EncodingError::Format); }
	check_resolution(raw, settings)?;

	let grid = decode(raw)?;
	let old_dims = (grid.width(), grid.height());
	let collapsed = patch::collapse(grid).map_err(|e| match e.error() {
		PatchError::Multiple(axis) => EncodingError::Multiple(axis),
		PatchError::Shape => EncodingError::Decode,
	})?;

	let notices = collapsed.notices();
	if ! collapsed.is_changed() {
		return Ok(Shrunk { data: Vec::new(), old_dims, new_dims: old_dims, notices });
	}

	let new_dims = collapsed.dimensions();
	debug_assert_eq!(
		(old_dims.0 - collapsed.columns(), old_dims.1 - collapsed.rows()),
		new_dims,
		"BUG: collapsed dimensions don't add up.",
	);
	let data = encode_png(collapsed.into_grid())?;
	Ok(Shrunk { data, old_dims, new_dims, notices })
}

#[inline(never)]
/// # Check Resolution.
///
/// Parse the image's dimensions and make sure they're within the
/// `--max-resolution` runtime constraint.
fn check_resolution(src: &[u8], settings: Settings) -> Result<(), EncodingError> {
	let (w, h) = kind::png_dimensions(src).ok_or(EncodingError::Format)?;
	if settings.check_resolution(w, h) { Ok(()) }
	else { Err(EncodingError::Resolution) }
}

/// # Decode w/ `image`.
///
/// Expand the PNG, whatever its color type, to straight RGBA and pack it
/// into a grid. Sixteen-bit sources are refused since the round trip would
/// cost them precision.
fn decode(raw: &[u8]) -> Result<PixelGrid, EncodingError> {
	use image::ImageFormat;

	let img = image::load_from_memory_with_format(raw, ImageFormat::Png)
		.map_err(|_| EncodingError::Decode)?;

	let color = img.color();
	if color.channel_count() < color.bytes_per_pixel() {
		return Err(EncodingError::Depth);
	}

	let img = img.into_rgba8();
	let width = usize::try_from(img.width()).map_err(|_| EncodingError::Decode)?;
	let height = usize::try_from(img.height()).map_err(|_| EncodingError::Decode)?;
	PixelGrid::from_rgba(width, height, img.as_raw())
		.map_err(|_| EncodingError::Decode)
}

/// # Encode w/ `image`.
///
/// Pack the grid back into straight RGBA and write a plain PNG. Oxipng
/// takes it from there.
fn encode_png(grid: PixelGrid) -> Result<Vec<u8>, EncodingError> {
	use image::{
		ImageFormat,
		RgbaImage,
	};
	use std::io::Cursor;

	let width = u32::try_from(grid.width()).map_err(|_| EncodingError::Encode)?;
	let height = u32::try_from(grid.height()).map_err(|_| EncodingError::Encode)?;
	let img = RgbaImage::from_raw(width, height, grid.into_rgba())
		.ok_or(EncodingError::Encode)?;

	let mut out = Cursor::new(Vec::new());
	img.write_to(&mut out, ImageFormat::Png).map_err(|_| EncodingError::Encode)?;
	let mut out = out.into_inner();

	encode_oxipng(&mut out);
	if kind::is_png(&out) { Ok(out) }
	else { Err(EncodingError::Encode) }
}

#[inline(never)]
/// # Compress w/ `Oxipng`
///
/// Let Oxipng work out the best (lossless) color type, filters, and
/// compression. Alpha optimization is off; fully transparent pixels keep
/// their color. The result is comparable to calling:
///
/// ```bash
/// oxipng -o 3 -s -i 0 --fix
/// ```
fn encode_oxipng(raw: &mut Vec<u8>) {
	use oxipng::{
		Deflaters,
		IndexSet,
		Interlacing,
		Options,
		RowFilter,
		StripChunks,
	};

	thread_local!(
		static OXI: Options = Options {
			fix_errors: true,
			force: false,
			filter: IndexSet::from([
				RowFilter::None,
				RowFilter::Average,
				RowFilter::BigEnt,
				RowFilter::Bigrams,
				RowFilter::Brute,
				RowFilter::Entropy,
				RowFilter::MinSum,
				RowFilter::Paeth,
				RowFilter::Sub,
				RowFilter::Up,
			]),
			interlace: Some(Interlacing::None),
			optimize_alpha: false,
			bit_depth_reduction: true,
			color_type_reduction: true,
			palette_reduction: true,
			grayscale_reduction: true,
			idat_recoding: true,
			scale_16: false,
			strip: StripChunks::All,
			deflate: Deflaters::Libdeflater { compression: 12 },
			fast_evaluation: false,
			timeout: None,
		}
	);

	if let Ok(mut new) = OXI.with(|opts| oxipng::optimize_from_memory(raw, opts)) {
		if new.len() < raw.len() && kind::is_png(&new) {
			std::mem::swap(raw, &mut new);
		}
	}
}

/// # Save Image!
fn save_image(src: &Path, data: &[u8], settings: Settings)
-> Result<(), EncodingError> {
	use write_atomic::filetime;
	use write_atomic::filetime::FileTime;

	// Grab the (current) metadata before saving in case the user wants to
	// keep the original file times.
	let times =
		if settings.preserve_times() {
			std::fs::metadata(src).ok().map(|meta| (
				FileTime::from_last_access_time(&meta),
				FileTime::from_last_modification_time(&meta),
			))
		}
		else { None };

	// Save it!
	write_atomic::write_file(src, data).map_err(|_| EncodingError::Write)?;

	// If we have metadata, try to sync the times.
	if let Some((atime, mtime)) = times {
		let _res = filetime::set_file_times(src, atime, mtime);
	}

	Ok(())
}
