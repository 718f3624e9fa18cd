use std::path::{Path, PathBuf};

/// Output path for a converted file: everything after the last `.` of the
/// file name is replaced by `sr`, dotfiles included (`.bin` becomes `.sr`).
pub fn sr_path(path: &Path) -> PathBuf
{
	match path.file_name().and_then(|n| n.to_str())
	{
		Some(name) =>
		{
			let base = name.rfind('.').map_or(name, |pos| &name[..pos]);
			path.with_file_name(format!("{base}.sr"))
		},
		None => path.with_extension("sr"),
	}
}
