use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};

pub fn progress_bar(len: u64) -> ProgressBar {
    ProgressBar::new(len).with_style(
        ProgressStyle::with_template("[{elapsed_precise}] {human_pos} {percent}% ({per_sec})")
            .expect("hardcoded"),
    )
}

/// Opens a file for line reading, decompressing `.zst` files on the fly.
/// `-` reads from stdin.
pub fn open_lines(path: &Path) -> io::Result<Box<dyn BufRead>> {
    open_tracked(path, &ProgressBar::hidden())
}

/// Like [`open_lines`], advancing `pb` by the bytes read from disk.
pub fn open_tracked(path: &Path, pb: &ProgressBar) -> io::Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = pb.wrap_read(File::open(path)?);
    if path.extension().is_some_and(|x| x == "zst") {
        Ok(Box::new(BufReader::new(zstd::Decoder::new(file)?)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Size of the file on disk, used to size progress bars. Zero for stdin.
pub fn file_len(path: &Path) -> u64 {
    if path == Path::new("-") {
        return 0;
    }
    path.metadata().map(|x| x.len()).unwrap_or_default()
}
