/*!
# Delgado: Job Server
*/

use crate::{
	DelgadoError,
	EncodingError,
	img::Outcome,
	Settings,
};
use crossbeam_channel::Receiver;
use dactyl::{
	NiceElapsed,
	NiceU64,
	traits::NiceInflection,
};
use fyi_msg::{
	BeforeAfter,
	Msg,
	Progless,
};
use std::{
	num::NonZeroUsize,
	path::{
		Path,
		PathBuf,
	},
	sync::{
		Arc,
		atomic::{
			AtomicBool,
			AtomicU64,
			Ordering::{
				Acquire,
				Relaxed,
				SeqCst,
			},
		},
	},
	thread,
};



/// # Progress Counters.
static SKIPPED: AtomicU64 = AtomicU64::new(0);
static COLLAPSED: AtomicU64 = AtomicU64::new(0);
static BEFORE: AtomicU64 = AtomicU64::new(0);
static AFTER: AtomicU64 = AtomicU64::new(0);



#[inline(never)]
/// # Collapse Everything!
///
/// This processes each image in `files` in parallel using up to `threads`
/// threads, printing notices and skips to STDERR as they happen.
pub(super) fn exec(mut threads: NonZeroUsize, settings: Settings, files: &[PathBuf])
-> Result<(), DelgadoError> {
	// Sort out the threads and job server.
	let total = NonZeroUsize::new(files.len()).ok_or(DelgadoError::NoImages)?;
	if total < threads { threads = total; }

	// Set up the killswitch.
	let killed = Arc::new(AtomicBool::new(false));
	sigint(Arc::clone(&killed), None);

	// Thread business!
	let (tx, rx) = crossbeam_channel::bounded::<&Path>(threads.get());
	thread::scope(#[inline(always)] |s| {
		// Set up the worker threads.
		let mut workers = Vec::with_capacity(threads.get());
		for _ in 0..threads.get() {
			workers.push(s.spawn(#[inline(always)] ||
				while let Ok(p) = rx.recv() {
					let res = crate::img::encode(p, settings);
					for msg in messages(p, &res) { msg.with_newline(true).eprint(); }
				}
			));
		}

		// Push all the files to it, then drop the sender to disconnect.
		for file in files {
			if killed.load(Acquire) || tx.send(file).is_err() { break; }
		}
		drop(tx);

		// Wait for the threads to finish!
		for worker in workers { let _res = worker.join(); }
	});
	drop(rx);

	// Early abort?
	if killed.load(Acquire) { Err(DelgadoError::Killed) }
	else { Ok(()) }
}

#[inline(never)]
/// # Collapse Everything (with Progress)!
///
/// This is the same as `exec`, but includes a progress bar and summary.
pub(super) fn exec_pretty(mut threads: NonZeroUsize, settings: Settings, files: &[PathBuf])
-> Result<(), DelgadoError> {
	#[inline(never)]
	/// # Worker Business.
	///
	/// This is the worker callback; it listens for image paths, processing
	/// them as they come in.
	fn work(rx: &Receiver::<&Path>, progress: &Progless, settings: Settings) {
		while let Ok(p) = rx.recv() {
			let name = p.to_string_lossy();
			progress.add(&name);

			let res = crate::img::encode(p, settings);
			match res {
				Ok(o) => {
					BEFORE.fetch_add(o.before, Relaxed);
					AFTER.fetch_add(o.after, Relaxed);
					if o.is_changed() { COLLAPSED.fetch_add(1, Relaxed); }
				},
				Err(_) => { SKIPPED.fetch_add(1, Relaxed); },
			}

			for msg in messages(p, &res) { progress.push_msg(msg, true); }
			progress.remove(&name);
		}
	}

	let total = NonZeroUsize::new(files.len()).ok_or(DelgadoError::NoImages)?;
	if total < threads { threads = total; }

	// Boot up a progress bar.
	let progress = Progless::try_from(total.get())?.with_reticulating_splines("Delgado");

	// Set up the killswitch.
	let killed = Arc::new(AtomicBool::new(false));
	sigint(Arc::clone(&killed), Some(progress.clone()));

	// Thread business!
	let (tx, rx) = crossbeam_channel::bounded::<&Path>(threads.get());
	thread::scope(#[inline(always)] |s| {
		// Set up the worker threads.
		let mut workers = Vec::with_capacity(threads.get());
		for _ in 0..threads.get() {
			workers.push(s.spawn(#[inline(always)] ||
				work(&rx, &progress, settings)
			));
		}

		// Push all the files to it, then drop the sender to disconnect.
		for file in files {
			if killed.load(Acquire) || tx.send(file).is_err() { break; }
		}
		drop(tx);

		// Wait for the threads to finish!
		for worker in workers { let _res = worker.join(); }
	});
	drop(rx);

	// Summarize!
	let elapsed = progress.finish();
	let skipped = SKIPPED.load(Acquire);
	let collapsed = COLLAPSED.load(Acquire);
	Msg::crunched(format!(
		"{}\x1b[2m/\x1b[0m{} collapsed in {}.",
		NiceU64::from(collapsed),
		total.nice_inflect("image", "images"),
		NiceElapsed::from(elapsed),
	))
		.with_bytes_saved(BeforeAfter::from((
			BEFORE.load(Acquire),
			AFTER.load(Acquire),
		)))
		.eprint();

	if skipped != 0 {
		Msg::notice(format!(
			"{} could not be processed.",
			skipped.nice_inflect("image", "images"),
		))
			.with_newline(true)
			.eprint();
	}

	// Early abort?
	if killed.load(Acquire) { Err(DelgadoError::Killed) }
	else { Ok(()) }
}



#[inline(never)]
/// # Hook Up CTRL+C.
///
/// Once stops processing new items, twice forces immediate shutdown.
fn sigint(killed: Arc<AtomicBool>, progress: Option<Progless>) {
	let _res = ctrlc::set_handler(move ||
		if killed.compare_exchange(false, true, SeqCst, Relaxed).is_ok() {
			if let Some(p) = &progress { p.sigint(); }
		}
		else { std::process::exit(1); }
	);
}

/// # Messages.
///
/// Build the STDERR lines for one image: what got collapsed, what got
/// skipped (and why), and whatever notices the collapse raised.
fn messages(file: &Path, res: &Result<Outcome, EncodingError>) -> Vec<Msg> {
	let name = file.to_string_lossy();
	match res {
		Ok(o) => {
			let mut out = Vec::new();
			if o.is_changed() {
				out.push(Msg::custom("Collapsed", 10, &format!(
					"{name} \x1b[2m({}x{} \u{2192} {}x{})\x1b[0m",
					NiceU64::from(o.old_dims.0 as u64),
					NiceU64::from(o.old_dims.1 as u64),
					NiceU64::from(o.new_dims.0 as u64),
					NiceU64::from(o.new_dims.1 as u64),
				)));
			}
			for notice in o.notices.iter() {
				out.push(Msg::custom("Notice", 208, &format!(
					"{name} \x1b[2m({})\x1b[0m",
					notice.as_str(),
				)));
			}
			out
		},
		Err(e) => vec![skip_msg(&name, *e)],
	}
}

#[cold]
#[inline(never)]
/// # Skipped File.
fn skip_msg(name: &str, err: EncodingError) -> Msg {
	Msg::custom("Skipped", 11, &format!(
		"{name} \x1b[2m({})\x1b[0m",
		err.as_str(),
	))
}
