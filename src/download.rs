use crate::{
    capture::{Capture, CaptureResult},
    error::{Error, Result},
    progress::{ProgressLine, TransferProgress},
    target::DownloadTarget,
};
use log::info;
use reqwest::{
    blocking::{Client, Response},
    header,
};
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

/// Runs the whole pipeline for one target: capture the session, replay the
/// form, stream the body to disk. Returns the number of bytes written.
pub fn run(capturer: &impl Capture, client: &Client, target: &DownloadTarget) -> Result<u64> {
    let session = capturer.capture(&target.url)?;
    info!(
        "Captured {} cookies and {} form fields",
        session.cookies.len(),
        session.form_fields.len()
    );

    let (response, total) = request_stream(client, &target.url, &session)?;
    let written = write_stream(response, total, &target.output_path)?;

    info!("File saved to {}", target.output_path.display());
    Ok(written)
}

/// Replays the captured session as a url-encoded POST against the landing
/// page url and hands back the live body stream plus the declared total
/// size (0 when the content-length header is absent).
pub fn request_stream(
    client: &Client,
    url: &str,
    session: &CaptureResult,
) -> Result<(Response, u64)> {
    let response = client
        .post(url)
        .header(header::COOKIE, session.cookie_header())
        .form(&session.form_fields)
        .send()?;

    let status = response.status();

    if !status.is_success() {
        return Err(Error::Status(status));
    }

    let total = response.content_length().unwrap_or(0);
    Ok((response, total))
}

/// Copies the body to `path` in arrival order, truncating any existing
/// file, and renders progress after every chunk. The total only feeds the
/// display, completion is governed by the stream alone.
pub fn write_stream(mut body: impl Read, total: u64, path: &Path) -> Result<u64> {
    let mut file = File::create(path)?;
    let mut progress = TransferProgress::new(total);
    let mut line = ProgressLine::new();
    let mut chunk = [0_u8; 64 * 1024];

    loop {
        let read = body.read(&mut chunk)?;

        if read == 0 {
            break;
        }

        file.write_all(&chunk[..read])?;
        progress.advance(read as u64);
        line.render(&progress);
    }

    file.flush()?;
    Ok(progress.downloaded())
}
