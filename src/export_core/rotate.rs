use std::io;
use std::path::Path;
use std::process::Command;

/// Rotates an image in place according to its orientation metadata.
pub trait Rotate {
    fn rotate(&self, path: &Path) -> io::Result<()>;
}

impl<F> Rotate for F
where
    F: Fn(&Path) -> io::Result<()>,
{
    fn rotate(&self, path: &Path) -> io::Result<()> {
        self(path)
    }
}

/// Lossless JPEG rotation through the `exiftran` command line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exiftran;

impl Rotate for Exiftran {
    fn rotate(&self, path: &Path) -> io::Result<()> {
        // -a: rotate by EXIF orientation, -i: in place, -p: preserve timestamps
        let output = Command::new("exiftran")
            .arg("-a")
            .arg("-i")
            .arg("-p")
            .arg(path)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::other(format!(
                "exiftran failed on {}: {}",
                path.display(),
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Check if exiftran is available on the system.
pub fn exiftran_available() -> bool {
    program_on_path("exiftran")
}

// Only checks that the program can be started.
fn program_on_path(program: &str) -> bool {
    Command::new(program).arg("-h").output().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[test]
    fn test_closure_rotator() {
        let seen = RefCell::new(Vec::<PathBuf>::new());
        let rotator = |path: &Path| -> io::Result<()> {
            seen.borrow_mut().push(path.to_path_buf());
            Ok(())
        };

        rotator.rotate(Path::new("/src/a.jpg")).unwrap();
        rotator.rotate(Path::new("/src/b.jpg")).unwrap();

        assert_eq!(
            seen.into_inner(),
            vec![PathBuf::from("/src/a.jpg"), PathBuf::from("/src/b.jpg")]
        );
    }

    #[test]
    fn test_missing_program_is_not_available() {
        assert!(!program_on_path("shotwell-export-no-such-tool"));
    }
}
