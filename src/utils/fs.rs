//! File helpers used when staging resource executables.

use std::{fs::File, io, path::Path};

/// Copies the contents of the file at `src` to the file at `dst`.
///
/// The destination is created if it does not exist and truncated if it does.
/// The copy is synced to disk before returning; the first error encountered,
/// including one from the final sync, is returned.
pub fn copy_file_contents(src: &Path, dst: &Path) -> io::Result<u64> {
	let mut input = File::open(src)?;
	let mut output = File::create(dst)?;
	let copied = io::copy(&mut input, &mut output)?;
	output.sync_all()?;
	Ok(copied)
}
