//! Filename rules
//!
//! The only sanitizing this service does: drop directory components and read the
//! extension off the final name. Nothing checks content or containment beyond that.

use std::path::{Path, PathBuf};

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Final path segment of `name`, ignoring trailing separators.
///
/// Both `/` and `\` count as separators. The result may be empty
/// (e.g. for `""` or `"/"`) and is otherwise never altered.
///
/// ```
/// use ezupload::handler::paths::basename;
/// assert_eq!(basename("../../etc/passwd"), "passwd");
/// assert_eq!(basename("C:\\Users\\me\\notes.txt"), "notes.txt");
/// assert_eq!(basename("dir/"), "dir");
/// ```
pub fn basename(name: &str) -> &str {
    let trimmed = name.trim_end_matches(is_separator);
    trimmed
        .rsplit_once(is_separator)
        .map_or(trimmed, |(_, last)| last)
}

/// Text after the last `.` of the basename, `None` when there is no dot.
///
/// A leading dot counts, so `.txt` has the extension `txt`.
pub fn extension(name: &str) -> Option<&str> {
    basename(name).rsplit_once('.').map(|(_, ext)| ext)
}

/// Where a file named `name` lands: `<work_dir>/<basename>`
pub fn destination(work_dir: &Path, name: &str) -> PathBuf {
    work_dir.join(basename(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basename() {
        assert_eq!(basename("a.txt"), "a.txt");
        assert_eq!(basename("/var/www/html/shell.php"), "shell.php");
        assert_eq!(basename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(basename("uploads//"), "uploads");
        assert_eq!(basename("/"), "");
        assert_eq!(basename(""), "");
        assert_eq!(basename(".."), "..");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("a.txt"), Some("txt"));
        assert_eq!(extension("a.php.txt"), Some("txt"));
        assert_eq!(extension("a.txt.php"), Some("php"));
        assert_eq!(extension(".txt"), Some("txt"));
        assert_eq!(extension("a.TXT"), Some("TXT"));
        assert_eq!(extension("a."), Some(""));
        assert_eq!(extension("README"), None);
        assert_eq!(extension("dir.d/README"), None);
    }

    #[test]
    fn test_destination_stays_in_work_dir() {
        let work_dir = Path::new("/srv/ctf");
        assert_eq!(
            destination(work_dir, "../../../etc/cron.d/job.txt"),
            PathBuf::from("/srv/ctf/job.txt")
        );
        assert_eq!(
            destination(work_dir, "phpinfo.php"),
            PathBuf::from("/srv/ctf/phpinfo.php")
        );
    }

    proptest! {
        #[test]
        fn prop_basename_has_no_separators_and_is_idempotent(name in "[a-z./\\\\]{0,24}") {
            let base = basename(&name);
            prop_assert!(!base.contains('/') && !base.contains('\\'));
            prop_assert_eq!(basename(base), base);
        }

        #[test]
        fn prop_destination_is_work_dir_plus_last_segment(
            dirs in proptest::collection::vec("[a-z.]{1,8}", 0..4),
            file in "[a-z][a-z0-9]{0,8}\\.[a-z]{1,4}",
        ) {
            let mut name = dirs.join("/");
            if !name.is_empty() {
                name.push('/');
            }
            name.push_str(&file);
            let work_dir = Path::new("/tmp/work");
            prop_assert_eq!(destination(work_dir, &name), work_dir.join(&file));
        }
    }
}
