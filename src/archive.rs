//! ZIP export of generated packs.

use crate::error::{PackError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip the contents of `src` into `dest`, with entries relative to `src`.
///
/// Entries are added in sorted path order so the same tree always produces
/// the same archive layout. Returns the number of files stored.
pub fn zip_directory<S: AsRef<Path>, D: AsRef<Path>>(src: S, dest: D) -> Result<usize> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    let file = File::create(dest).map_err(|e| PackError::io(dest, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for path in walk(src)? {
        let name = entry_name(src, &path);
        if path.is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
            continue;
        }

        zip.start_file(name, options)?;
        let mut input = File::open(&path).map_err(|e| PackError::io(&path, e))?;
        std::io::copy(&mut input, &mut zip).map_err(|e| PackError::io(&path, e))?;
        count += 1;
    }

    let mut inner = zip.finish()?;
    inner.flush().map_err(|e| PackError::io(dest, e))?;

    log::info!("Zipped {} files into {}", count, dest.display());
    Ok(count)
}

/// Every path below `dir`, depth first, sorted within each directory.
fn walk(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| PackError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| PackError::io(dir, e))?;
    entries.sort();

    let mut paths = Vec::new();
    for path in entries {
        let is_dir = path.is_dir();
        paths.push(path.clone());
        if is_dir {
            paths.extend(walk(&path)?);
        }
    }
    Ok(paths)
}

/// Archive entry name: the path relative to the root, `/`-separated.
fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_zip_directory() {
        let dir = tempfile::tempdir().unwrap();
        let pack = dir.path().join("Gem Pack");
        std::fs::create_dir_all(pack.join("data/gems/function")).unwrap();
        std::fs::write(pack.join("pack.mcmeta"), "{}").unwrap();
        std::fs::write(pack.join("data/gems/function/load.mcfunction"), "say hi\n").unwrap();

        let dest = dir.path().join("Gem Pack.zip");
        let count = zip_directory(&pack, &dest).unwrap();
        assert_eq!(count, 2);

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut contents = String::new();
        archive
            .by_name("data/gems/function/load.mcfunction")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "say hi\n");
        assert!(archive.by_name("pack.mcmeta").is_ok());
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = zip_directory(dir.path().join("absent"), dir.path().join("out.zip"));
        assert!(matches!(result, Err(PackError::Io { .. })));
    }
}
