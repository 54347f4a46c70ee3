use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;

use crate::fetch::date_token;

pub const FILE_MODE: u32 = 0o644;

pub fn puzzle_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.pdf", date_token(date)))
}

/// Write the PDF, replacing any earlier copy. The parent directory must
/// already exist.
pub fn save_puzzle(path: &Path, pdf: &[u8]) -> io::Result<()> {
    info!("Saving PDF to {} (size {})", path.display(), pdf.len());

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(pdf)?;
    file.flush()
}
