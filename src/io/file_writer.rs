use anyhow::{anyhow, Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Writes a file in a single step, so that no partial content is ever left at its path.
///
/// The content is written by the provided function into a temporary file located in the same directory,
/// which is then renamed to the target path.
/// In case of failure, the temporary file is removed and the target path is left untouched.
///
/// # Example
///
/// ```no_run
/// # use ata::io::write_file_atomically;
/// # use std::io::Write;
/// write_file_atomically("run.lp", |w| {
///     writeln!(w, "min: ;")?;
///     Ok(())
/// })
/// .unwrap();
/// ```
pub fn write_file_atomically<P, F>(path: P, write_content: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    let context = || format!(r#"while writing file "{}""#, path.display());
    let tmp_path = temporary_path(path).with_context(context)?;
    let result = write_to(&tmp_path, write_content).and_then(|()| {
        fs::rename(&tmp_path, path).context("while moving the temporary file")
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result.with_context(context)
}

fn temporary_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("not a file path"))?
        .to_string_lossy();
    Ok(path.with_file_name(format!(".{}.partial", file_name)))
}

fn write_to<F>(tmp_path: &Path, write_content: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let file = File::create(tmp_path).context("while creating the temporary file")?;
    let mut writer = BufWriter::new(file);
    write_content(&mut writer)?;
    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("while flushing the temporary file")?;
    file.sync_all().context("while syncing the temporary file")
}
