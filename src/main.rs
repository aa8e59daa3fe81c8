/*!
# Delgado

Lossless stretch-region collapsing for nine-patch PNGs.
*/

#![forbid(unsafe_code)]

#![warn(missing_docs)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_import_braces)]

#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::pedantic)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]



mod error;
mod img;
mod jobs;
mod opts;
mod patch;

use argyle::{
	Argue,
	ArgyleError,
	FLAG_HELP,
	FLAG_REQUIRED,
	FLAG_VERSION,
};
use dowser::{
	Dowser,
	Extension,
};
use error::{
	DelgadoError,
	EncodingError,
};
use fyi_msg::Msg;
use opts::Settings;
use std::path::PathBuf;



/// # PNG Extension.
pub(crate) const E_PNG: Extension = Extension::new3(*b"png");



/// # Main.
fn main() {
	match _main() {
		Ok(()) => {},
		Err(DelgadoError::Argue(ArgyleError::WantsVersion)) => {
			println!(concat!("Delgado v", env!("CARGO_PKG_VERSION")));
		},
		Err(DelgadoError::Argue(ArgyleError::WantsHelp)) => { helper(); },
		Err(e) => { Msg::error(e).die(1); },
	}
}

#[inline]
/// # Actual Main.
///
/// This does all the stuff. It returns a `Result` so that errors can be
/// printed in one place.
fn _main() -> Result<(), DelgadoError> {
	// Parse CLI arguments.
	let args = Argue::new(FLAG_HELP | FLAG_REQUIRED | FLAG_VERSION)?
		.with_list();

	// Runtime settings.
	let mut settings = Settings::new();
	if args.switch(b"--preserve-times") { settings.set_preserve_times(); }
	if let Some(raw) = args.option(b"--max-resolution") {
		settings.set_max_pixels_raw(raw)?;
	}

	// Thread count.
	let threads = opts::threads(args.option(b"-j"))?;

	// Find the nine-patches!
	let mut paths: Vec<PathBuf> = Dowser::default()
		.with_paths(args.args_os())
		.filter(|p| img::kind::is_nine_patch(p))
		.collect();
	if paths.is_empty() { return Err(DelgadoError::NoImages); }
	paths.sort_unstable();

	// Process!
	if args.switch2(b"-p", b"--progress") { jobs::exec_pretty(threads, settings, &paths) }
	else { jobs::exec(threads, settings, &paths) }
}

#[cold]
/// # Print Help.
fn helper() {
	println!(concat!(
		"\n",
		"   .-------------------.\n",
		"   |  \x1b[38;5;208m::\x1b[0m   .-----.   \x1b[38;5;208m::\x1b[0m  |\n",
		"   |      |     |      |\n",
		"   |  \x1b[38;5;208m::\x1b[0m   '-----'   \x1b[38;5;208m::\x1b[0m  |\n",
		"   '-------------------'    \x1b[38;5;199mDelgado\x1b[0;38;5;69m v",
		env!("CARGO_PKG_VERSION"),
		"\x1b[0m", r"
                            Lossless stretch-region
                            collapsing for nine-patch
                            PNGs.

USAGE:
    delgado [FLAGS] [OPTIONS] <PATH(S)>...

FLAGS:
    -h, --help        Print help information and exit.
    -p, --progress    Show progress bar while collapsing.
        --preserve-times
                      Preserve the original file access and modification
                      times when saving collapsed images.
    -V, --version     Print version information and exit.

OPTIONS:
    -j <NUM>          Limit parallelization to this many threads (instead of
                      giving each logical core its own image to work on). If
                      negative, the value will be subtracted from the total
                      number of logical cores.
    -l, --list <FILE> Read (absolute) image and/or directory paths from this
                      text file, one entry per line.
        --max-resolution <NUM>
                      Skip images containing more than <NUM> total pixels to
                      avoid potential OOM errors during decompression.
                      [default: ~4 billion]

ARGS:
    <PATH(S)>...      One or more nine-patch images (*.9.png) or directories
                      to crawl and collapse.

NOTES:
    Only the top row and left column are read for stretch markers (opaque
    black, #000000FF). Images with more than one run of markers along either
    edge are skipped entirely. Spans whose rows (or columns) are not all
    identical are left alone. Files are only rewritten when they shrink.
"
	));
}
