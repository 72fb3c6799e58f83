use crate::utils::format_download_bytes;
use colored::Colorize;
use std::{
    io::{self, Write},
    time::Instant,
};

const BAR_WIDTH: u64 = 30;

/// Byte counters for one transfer, owned by the stream copy loop. The
/// downloaded count only ever grows; `total` is the server-declared content
/// length, 0 when the header was absent.
#[derive(Debug)]
pub struct TransferProgress {
    downloaded: u64,
    total: u64,
}

impl TransferProgress {
    pub fn new(total: u64) -> Self {
        Self {
            downloaded: 0,
            total,
        }
    }

    pub fn advance(&mut self, bytes: u64) {
        self.downloaded += bytes;
    }

    pub fn downloaded(&self) -> u64 {
        self.downloaded
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// None when the server never declared a total.
    pub fn percent(&self) -> Option<u64> {
        (self.total > 0).then(|| self.downloaded * 100 / self.total)
    }
}

/// Live single-line renderer on stderr. Hides the cursor while active and
/// restores it on drop.
pub struct ProgressLine {
    last_stat_time: Instant,
    last_stat_bytes: u64,
    speed: f64,
}

impl ProgressLine {
    pub fn new() -> Self {
        let mut handle = io::stderr().lock();
        let _ = write!(handle, "\x1B[?25l");
        let _ = handle.flush();

        Self {
            last_stat_time: Instant::now(),
            last_stat_bytes: 0,
            speed: 0.0,
        }
    }

    pub fn render(&mut self, progress: &TransferProgress) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_stat_time).as_secs_f64();

        if elapsed > 0.0 {
            self.speed =
                (progress.downloaded().saturating_sub(self.last_stat_bytes)) as f64 / elapsed;
            self.last_stat_time = now;
            self.last_stat_bytes = progress.downloaded();
        }

        let sizes = format_download_bytes(progress.downloaded(), progress.total());
        let speed = format!("{}/s", crate::utils::format_bytes(self.speed as u64));

        let mut handle = io::stderr().lock();

        // \x1B[2K clears the previous render before rewriting the line.
        let _ = match progress.percent() {
            Some(percent) => {
                let remaining = progress.total().saturating_sub(progress.downloaded());
                let eta = if self.speed > 0.0 {
                    Eta((remaining as f64 / self.speed) as u64).to_string()
                } else {
                    "?".to_owned()
                };

                write!(
                    handle,
                    "\r\x1B[2K{} {} {} DL:{} ETA:{}",
                    bar(percent),
                    format!("{percent}%").cyan(),
                    sizes,
                    speed.green(),
                    eta.yellow(),
                )
            }
            None => write!(handle, "\r\x1B[2K{} DL:{}", sizes, speed.green()),
        };
        let _ = handle.flush();
    }
}

impl Default for ProgressLine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        let mut handle = io::stderr().lock();
        let _ = writeln!(handle, "\x1B[?25h");
        let _ = handle.flush();
    }
}

fn bar(percent: u64) -> String {
    let filled = (percent.min(100) * BAR_WIDTH / 100) as usize;
    format!(
        "[{}{}]",
        "=".repeat(filled),
        " ".repeat(BAR_WIDTH as usize - filled)
    )
}

struct Eta(u64);

impl std::fmt::Display for Eta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;

        if hours > 0 {
            write!(f, "{hours}h{minutes}m{seconds}s")
        } else if minutes > 0 {
            write!(f, "{minutes}m{seconds}s")
        } else {
            write!(f, "{seconds}s")
        }
    }
}
