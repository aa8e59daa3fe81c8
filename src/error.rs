/*!
# Delgado: Errors
*/

use argyle::ArgyleError;
use crate::patch::Axis;
use fyi_msg::ProglessError;
use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Copy, Clone, Eq, PartialEq)]
/// # Encoding Errors.
///
/// These are per-image; they get reported, then the batch moves on.
pub(super) enum EncodingError {
	/// # Decoding Failed.
	Decode,

	/// # Sixteen-Bit Source.
	Depth,

	/// # Empty File.
	Empty,

	/// # Encoding Failed.
	Encode,

	/// # Wrong/Unknown Format.
	Format,

	/// # Too Many Stretch Regions.
	Multiple(Axis),

	/// # Read Error.
	Read,

	/// # Resolution.
	Resolution,

	/// # Vanished.
	Vanished,

	/// # Write Error.
	Write,
}

impl EncodingError {
	#[must_use]
	/// # As Str.
	pub(super) const fn as_str(self) -> &'static str {
		match self {
			Self::Decode => "decode error",
			Self::Depth => "16-bit unsupported",
			Self::Empty => "empty file",
			Self::Encode => "encode error",
			Self::Format => "invalid format",
			Self::Multiple(Axis::Horizontal) => "multiple top regions",
			Self::Multiple(Axis::Vertical) => "multiple side regions",
			Self::Read => "read error",
			Self::Resolution => "too big",
			Self::Vanished => "vanished!",
			Self::Write => "write error",
		}
	}
}



#[derive(Debug, Copy, Clone)]
/// # General/Deal-Breaking Errors.
pub(super) enum DelgadoError {
	/// # Argyle Passthrough.
	Argue(ArgyleError),

	/// # Killed Early.
	Killed,

	/// # Max Resolution.
	MaxResolution,

	/// # No Images.
	NoImages,

	/// # Progress Passthrough.
	Progress(ProglessError),

	/// # Invalid Thread Count.
	Threads,
}

impl AsRef<str> for DelgadoError {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl Error for DelgadoError {}

impl fmt::Display for DelgadoError {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<ArgyleError> for DelgadoError {
	#[inline]
	fn from(err: ArgyleError) -> Self { Self::Argue(err) }
}

impl From<ProglessError> for DelgadoError {
	#[inline]
	fn from(err: ProglessError) -> Self { Self::Progress(err) }
}

impl DelgadoError {
	#[must_use]
	/// # As Str.
	pub(super) const fn as_str(self) -> &'static str {
		match self {
			Self::Argue(e) => e.as_str(),
			Self::Killed => "The process was aborted early.",
			Self::MaxResolution => "Pixel limits must be between 1..=4_294_967_295.",
			Self::NoImages => "No nine-patch images were found.",
			Self::Progress(e) => e.as_str(),
			Self::Threads => "The number of threads (-j) must be a whole number.",
		}
	}
}
