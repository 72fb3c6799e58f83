use crate::{capture::ChromeCapture, download, error::Result, target::DownloadTarget};
use clap::{ArgAction, ColorChoice, Parser};
use log::info;
use reqwest::{Proxy, blocking::Client};

/// Download files hosted behind dosya.co slow download pages.
#[derive(Debug, Parser)]
#[command(version, about, long_about = "Download files hosted behind dosya.co slow download pages.\n\n\
Requires any one of these browser to be installed:\n\
1. chrome - https://www.google.com/chrome\n\
2. chromium - https://www.chromium.org/getting-involved/download-chromium\n\n\
The landing page is rendered in the browser so its client-side logic can\n\
populate the hidden download form, then the form is replayed as a direct\n\
POST and the file stream is written to disk.")]
pub struct Options {
    /// https://dosya.co/xxxxxxxxxxxx/name.html
    pub url: String,

    /// Output file base name, without an extension.
    /// By default the name embedded in the url is used as is.
    pub output: Option<String>,

    /// When to output colored text.
    #[arg(long, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Launch browser without a window.
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub headless: bool,

    /// Set http(s) proxy address for the browser and the download request.
    #[arg(long)]
    pub proxy: Option<String>,

    /// Update and set user agent header for the download request.
    #[arg(
        long,
        default_value = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36"
    )]
    pub user_agent: String,

    /// Print debug logs.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Options {
    fn client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(&self.user_agent);

        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Ok(builder.build()?)
    }

    pub fn execute(self) -> Result<()> {
        let target = DownloadTarget::parse(&self.url, self.output.as_deref())?;

        info!(
            "Launching browser in {} mode",
            if self.headless { "headless" } else { "headful" }
        );
        let capturer = ChromeCapture::new(self.headless, self.proxy.clone());
        let client = self.client()?;

        download::run(&capturer, &client, &target)?;
        Ok(())
    }
}
