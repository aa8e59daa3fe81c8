/*!
# Delgado: Image Kind
*/

use crate::E_PNG;
use dowser::Extension;
use std::{
	num::NonZeroU32,
	path::Path,
};



#[inline]
/// # Is PNG?
///
/// Check the magic header; the extension alone isn't proof of anything.
pub(crate) fn is_png(src: &[u8]) -> bool {
	12 < src.len() && src[..8] == [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']
}

/// # Width and Height.
///
/// Parse the image's width and height from the IHDR chunk.
pub(crate) fn png_dimensions(raw: &[u8]) -> Option<(NonZeroU32, NonZeroU32)> {
	if raw.len() > 16 + 8 && raw[12..16].eq(b"IHDR") {
		let width = NonZeroU32::new(u32::from_be_bytes([raw[16], raw[17], raw[18], raw[19]]))?;
		let height = NonZeroU32::new(u32::from_be_bytes([raw[20], raw[21], raw[22], raw[23]]))?;
		Some((width, height))
	}
	else { None }
}

/// # Is Nine-Patch (Path)?
///
/// Nine-patches are named `*.9.png`. The `png` part is case-insensitive.
pub(crate) fn is_nine_patch(path: &Path) -> bool {
	Some(E_PNG) == Extension::try_from3(path) &&
	path.file_name().is_some_and(|name| {
		let name = name.as_encoded_bytes();
		5 < name.len() && name[..name.len() - 4].ends_with(b".9")
	})
}



#[cfg(test)]
mod tests {
	use super::*;

	/// # Fake PNG Header.
	fn header(width: u32, height: u32) -> Vec<u8> {
		let mut out = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n', 0, 0, 0, 13];
		out.extend_from_slice(b"IHDR");
		out.extend_from_slice(&width.to_be_bytes());
		out.extend_from_slice(&height.to_be_bytes());
		out.extend_from_slice(&[8, 6, 0, 0, 0]);
		out
	}

	#[test]
	fn t_is_png() {
		assert!(is_png(&header(10, 10)));
		assert!(! is_png(b"GIF89a.........."));
		assert!(! is_png(&[0x89, b'P', b'N', b'G']));
		assert!(! is_png(&[]));
	}

	#[test]
	fn t_png_dimensions() {
		let dims = png_dimensions(&header(640, 9)).map(|(w, h)| (w.get(), h.get()));
		assert_eq!(dims, Some((640, 9)));

		// Zeroes aren't allowed.
		assert!(png_dimensions(&header(0, 9)).is_none());
		assert!(png_dimensions(&header(9, 0)).is_none());

		// Not a header at all.
		assert!(png_dimensions(b"not even close to a png").is_none());
	}

	#[test]
	fn t_is_nine_patch() {
		for (path, expected) in [
			("/tmp/button.9.png", true),
			("button.9.PNG", true),
			("./res/drawable/a.9.png", true),
			("/tmp/button.png", false),
			("/tmp/button.9.jpg", false),
			("/tmp/button9.png", false),
			("/tmp/.9.png", true),
			("/tmp/9.png", false),
			("/tmp/button.9.pngx", false),
		] {
			assert_eq!(is_nine_patch(Path::new(path)), expected, "{path}");
		}
	}
}
