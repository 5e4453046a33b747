//! Stand-ins for LibreOffice and ImageMagick used by the tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable shell script named `name` into `dir`.
pub(crate) fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A `soffice` that writes `<outdir>/<stem>.pdf` and logs its arguments to `<dir>/soffice.args`.
pub(crate) fn fake_office(dir: &Path) -> PathBuf {
    let body = format!(
        r#"echo "$@" > "{log}"
outdir=""
input=""
while [ $# -gt 0 ]; do
  case "$1" in
    --outdir) outdir="$2"; shift 2 ;;
    --convert-to) shift 2 ;;
    --headless) shift ;;
    *) input="$1"; shift ;;
  esac
done
name=$(basename "$input")
printf '%%PDF-1.4 fake\n' > "$outdir/${{name%.*}}.pdf""#,
        log = dir.join("soffice.args").display()
    );
    script(dir, "soffice", &body)
}

/// A `convert` that renders `pages` pages and logs its arguments to `<dir>/convert.args`.
pub(crate) fn fake_raster(dir: &Path, pages: usize) -> PathBuf {
    let body = format!(
        r#"echo "$@" > "{log}"
pattern="$6"
i=0
while [ $i -lt {pages} ]; do
  printf 'jpeg %d' "$i" > "$(printf "$pattern" "$i")"
  i=$((i + 1))
done"#,
        log = dir.join("convert.args").display(),
        pages = pages
    );
    script(dir, "convert", &body)
}

/// A tool that always fails with `message` on stderr.
pub(crate) fn failing(dir: &Path, name: &str, message: &str) -> PathBuf {
    script(dir, name, &format!("echo '{}' >&2\nexit 1", message))
}
