/*!
# Delgado: Settings
*/

use crate::DelgadoError;
use dactyl::traits::BytesToUnsigned;
use std::num::{
	NonZeroU32,
	NonZeroUsize,
};



#[derive(Debug, Clone, Copy)]
/// # Encoding Settings.
pub(crate) struct Settings {
	/// # Maximum Resolution.
	///
	/// Images with more pixels than this will be ignored.
	max_pixels: Option<NonZeroU32>,

	/// # Preserve Times?
	///
	/// If true, the file access and modification times will (try) to be
	/// preserved on re-save.
	preserve_times: bool,
}

impl Settings {
	#[must_use]
	/// # New Instance.
	pub(crate) const fn new() -> Self {
		Self {
			max_pixels: None,
			preserve_times: false,
		}
	}

	/// # Set Max Resolution.
	///
	/// Update the pixel limit from raw bytes (passed via CLI). The value
	/// may or may not contain a `k`/`m`/`g` suffix.
	///
	/// ## Errors
	///
	/// An error is returned if the value is invalid.
	pub(crate) fn set_max_pixels_raw(&mut self, raw: &[u8])
	-> Result<(), DelgadoError> {
		let multiplier: u32 =
		match raw.last() {
			Some(b'k' | b'K') => 1_000,
			Some(b'm' | b'M') => 1_000_000,
			Some(b'g' | b'G') => 1_000_000_000,
			None => return Err(DelgadoError::MaxResolution),
			_ => 1,
		};

		let len = raw.len() - usize::from(multiplier != 1);
		self.max_pixels.replace(
			u32::btou(raw[..len].trim_ascii())
				.and_then(|n| n.checked_mul(multiplier))
				.and_then(NonZeroU32::new)
				.ok_or(DelgadoError::MaxResolution)?
		);

		Ok(())
	}

	/// # Preserve File Times.
	pub(crate) fn set_preserve_times(&mut self) {
		self.preserve_times = true;
	}
}

impl Settings {
	#[must_use]
	/// # Check Resolution.
	///
	/// Check that the width and height are within the limits, if any.
	pub(crate) const fn check_resolution(self, width: NonZeroU32, height: NonZeroU32)
	-> bool {
		if let Some(res) = width.checked_mul(height) {
			if let Some(max) = self.max_pixels { res.get() <= max.get() }
			else { true }
		}
		else { false }
	}

	#[must_use]
	/// # Preserve File Times?
	pub(crate) const fn preserve_times(self) -> bool { self.preserve_times }
}



/// # Thread Count.
///
/// Parse the `-j` value, if any. Without one, every logical core gets a
/// thread. Negative values are subtracted from the core count, and the
/// result is always clamped to `1..=cores`.
///
/// ## Errors
///
/// An error is returned if the value isn't a number.
pub(crate) fn threads(raw: Option<&[u8]>) -> Result<NonZeroUsize, DelgadoError> {
	let max = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
	let Some(raw) = raw else { return Ok(max); };

	let raw = raw.trim_ascii();
	let (neg, raw) = match raw {
		[b'-', rest @ ..] => (true, rest),
		_ => (false, raw),
	};
	let num = usize::btou(raw).ok_or(DelgadoError::Threads)?;

	let num =
		if num == 0 { max.get() }
		else if neg { max.get().saturating_sub(num) }
		else { num.min(max.get()) };

	Ok(NonZeroUsize::new(num).unwrap_or(NonZeroUsize::MIN))
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_max_pixels() {
		let mut settings = Settings::new();
		let w = NonZeroU32::new(100).unwrap();
		let h = NonZeroU32::new(30).unwrap();
		assert!(settings.check_resolution(w, h));

		let cases: &[(&[u8], Option<u32>)] = &[
			(b"3000", Some(3000)),
			(b"3k", Some(3000)),
			(b"2M", Some(2_000_000)),
			(b" 4g", Some(4_000_000_000)),
			(b"5g", None),
			(b"0", None),
			(b"k", None),
			(b"", None),
			(b"-5", None),
			(b"3.5k", None),
			(b"twelve", None),
		];
		for &(raw, expected) in cases {
			let mut s = Settings::new();
			let res = s.set_max_pixels_raw(raw);
			assert_eq!(res.is_ok(), expected.is_some(), "{raw:?}");
			assert_eq!(s.max_pixels.map(NonZeroU32::get), expected, "{raw:?}");
		}

		settings.set_max_pixels_raw(b"2999").unwrap();
		assert!(! settings.check_resolution(w, h));
		settings.set_max_pixels_raw(b"3k").unwrap();
		assert!(settings.check_resolution(w, h));

		// Overflow is always too big.
		let huge = NonZeroU32::new(u32::MAX).unwrap();
		assert!(! Settings::new().check_resolution(huge, h));
	}

	#[test]
	fn t_preserve_times() {
		let mut settings = Settings::new();
		assert!(! settings.preserve_times());
		settings.set_preserve_times();
		assert!(settings.preserve_times());
	}

	#[test]
	fn t_threads() {
		let max = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
		assert_eq!(threads(None).unwrap(), max);
		assert_eq!(threads(Some(b"0")).unwrap(), max);
		assert_eq!(threads(Some(b"1")).unwrap(), NonZeroUsize::MIN);
		assert_eq!(threads(Some(b"100000")).unwrap(), max);
		assert_eq!(threads(Some(b"-100000")).unwrap(), NonZeroUsize::MIN);
		assert_eq!(
			threads(Some(b"-1")).unwrap().get(),
			max.get().saturating_sub(1).max(1),
		);
		assert_eq!(threads(Some(b" 1 ")).unwrap(), NonZeroUsize::MIN);
		assert_eq!(threads(Some(b"-0")).unwrap(), max);
		assert!(threads(Some(b"two")).is_err());
		assert!(threads(Some(b"--1")).is_err());
		assert!(threads(Some(b"-")).is_err());
		assert!(threads(Some(b"")).is_err());
	}
}
