//! Locating and staging the check/in/out executables.

use std::path::{Path, PathBuf};

use crate::{services::resource::ResourceError, utils::copy_file_contents};

/// Name of the helper the out executable invokes to upload to S3
pub const S3_OUT_NAME: &str = "s3-out";

/// Paths of the three resource executables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceExecutables {
	pub check_path: PathBuf,
	pub in_path: PathBuf,
	pub out_path: PathBuf,
}

impl ResourceExecutables {
	/// Finds `check`, `in` and `out` inside `dir`
	pub fn locate(dir: &Path) -> Result<Self, ResourceError> {
		let find = |name: &str| -> Result<PathBuf, ResourceError> {
			let path = dir.join(name);
			if path.is_file() {
				Ok(path)
			} else {
				Err(ResourceError::missing_executable(&path))
			}
		};

		Ok(Self {
			check_path: find("check")?,
			in_path: find("in")?,
			out_path: find("out")?,
		})
	}

	/// Copies the `s3-out` helper next to the out executable and makes it executable.
	///
	/// # Returns
	/// The path of the installed copy
	pub fn install_s3_out(&self, source: &Path) -> Result<PathBuf, ResourceError> {
		if !source.is_file() {
			return Err(ResourceError::missing_executable(source));
		}

		let target_dir = self.out_path.parent().unwrap_or_else(|| Path::new("."));
		let target = target_dir.join(S3_OUT_NAME);
		copy_file_contents(source, &target)?;
		make_executable(&target)?;

		tracing::debug!(path = %target.display(), "installed s3-out");
		Ok(target)
	}
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
	use std::os::unix::fs::PermissionsExt;
	std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o777))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
	Ok(())
}
