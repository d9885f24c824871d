//! Atomic file copy implementation

use crate::types::SyncError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Write to a temporary file next to the destination
/// 2. Flush and sync to disk
/// 3. Preserve metadata (permissions, mtime)
/// 4. Rename over the destination
///
/// An interrupted copy leaves at most a stray temporary file; the destination
/// path only ever holds a complete file. Whatever sat at the destination (a
/// file or a link) is replaced, never written through.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path; parent directories are created
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - IO error reading the source or writing the destination
///
/// # Example
/// ```no_run
/// use replika::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.txt"), Path::new("replica/source.txt"))?;
/// # Ok::<(), replika::SyncError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    let copy_error = |source| SyncError::Copy {
        path: dest.to_path_buf(),
        source,
    };

    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(copy_error)?;

    let mut src_file = File::open(src)?;
    let src_metadata = src_file.metadata()?;

    let mut part = tempfile::Builder::new()
        .prefix(".replika-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(copy_error)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;

        if bytes_read == 0 {
            break; // EOF
        }

        part.as_file_mut()
            .write_all(&buffer[0..bytes_read])
            .map_err(copy_error)?;
        total_bytes += bytes_read as u64;
    }

    part.as_file().sync_all().map_err(copy_error)?;

    fs::set_permissions(part.path(), src_metadata.permissions()).map_err(copy_error)?;
    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_mtime(part.path(), mtime).map_err(copy_error)?;

    part.persist(dest).map_err(|e| copy_error(e.error))?;

    Ok(total_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_copy_basic_content() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("source.txt");
        fs::write(&src, b"Hello, replica!").unwrap();
        let dest = temp.path().join("dest.txt");

        let bytes = copy_file_atomic(&src, &dest).unwrap();

        assert_eq!(bytes, 15);
        assert_eq!(fs::read(&dest).unwrap(), b"Hello, replica!");
    }

    #[test]
    fn test_copy_creates_directories() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("source.txt");
        fs::write(&src, b"nested").unwrap();
        let dest = temp.path().join("a/b/c/dest.txt");

        copy_file_atomic(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"nested");
    }

    #[test]
    fn test_copy_overwrites_and_leaves_no_temporaries() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("source.txt");
        fs::write(&src, b"new").unwrap();
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        let dest = out.join("dest.txt");
        fs::write(&dest, b"old and longer").unwrap();

        copy_file_atomic(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new");
        let names: Vec<_> = fs::read_dir(&out).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_copy_preserves_mtime() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("source.txt");
        fs::write(&src, b"dated").unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(3600);
        filetime::set_file_mtime(&src, filetime::FileTime::from_system_time(mtime)).unwrap();
        let dest = temp.path().join("dest.txt");

        copy_file_atomic(&src, &dest).unwrap();

        let src_mtime = fs::metadata(&src).unwrap().modified().unwrap();
        let dest_mtime = fs::metadata(&dest).unwrap().modified().unwrap();
        assert_eq!(src_mtime, dest_mtime);
    }

    #[test]
    fn test_copy_empty_file() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("empty");
        fs::write(&src, b"").unwrap();
        let dest = temp.path().join("copy");

        assert_eq!(copy_file_atomic(&src, &dest).unwrap(), 0);
        assert!(dest.exists());
    }

    #[test]
    fn test_copy_missing_source_fails_without_creating_dest() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("dest.txt");

        let err = copy_file_atomic(&temp.path().join("missing"), &dest).unwrap_err();

        assert!(err.is_not_found());
        assert!(!dest.exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_copy_replaces_symlink_instead_of_writing_through() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("source.txt");
        fs::write(&src, b"fresh").unwrap();
        let victim = temp.path().join("victim.txt");
        fs::write(&victim, b"untouched").unwrap();
        let dest = temp.path().join("dest.txt");
        std::os::unix::fs::symlink(&victim, &dest).unwrap();

        copy_file_atomic(&src, &dest).unwrap();

        assert!(!fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&dest).unwrap(), b"fresh");
        assert_eq!(fs::read(&victim).unwrap(), b"untouched");
    }
}
