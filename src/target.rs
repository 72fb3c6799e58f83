use crate::error::{Error, Result};
use regex::Regex;
use std::path::PathBuf;

/// Resolved download destination, derived once from the CLI input and read
/// by every later stage.
#[derive(Clone, Debug)]
pub struct DownloadTarget {
    pub url: String,
    pub output_path: PathBuf,
    pub detected_extension: String,
}

impl DownloadTarget {
    /// Validates the landing page url and derives the output file name.
    ///
    /// The only accepted shape is
    /// `https://dosya.co/<12 lowercase alphanumerics>/<name>.html`.
    /// `name` keeps its original extension, so `.../movie.mp4.html` resolves
    /// to `movie.mp4`. When `base_name` is given the resolved path is
    /// `<base_name>.<detected extension>` instead.
    pub fn parse(url: &str, base_name: Option<&str>) -> Result<Self> {
        let grammar =
            Regex::new(r"^https://dosya\.co/(?P<id>[a-z0-9]{12})/(?P<name>[^/]+)\.html$").unwrap();

        let captures = grammar
            .captures(url)
            .ok_or_else(|| Error::InvalidUrl(url.to_owned()))?;
        let filename = captures["name"].to_owned();

        // "movie.mp4" -> "mp4". A name without any dot is treated as its own
        // extension, which is how the site labels extensionless uploads.
        let detected_extension = match filename.rsplit_once('.') {
            Some((_, ext)) => ext.to_owned(),
            None => filename.clone(),
        };

        let output_path = match base_name {
            Some(base) => PathBuf::from(format!("{base}.{detected_extension}")),
            None => PathBuf::from(&filename),
        };

        Ok(Self {
            url: url.to_owned(),
            output_path,
            detected_extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_name_from_url() {
        let target =
            DownloadTarget::parse("https://dosya.co/abcdefabcdef/report.pdf.html", None).unwrap();

        assert_eq!(target.output_path, PathBuf::from("report.pdf"));
        assert_eq!(target.detected_extension, "pdf");
    }

    #[test]
    fn base_name_keeps_detected_extension() {
        let target = DownloadTarget::parse(
            "https://dosya.co/abcdefabcdef/report.pdf.html",
            Some("result"),
        )
        .unwrap();

        assert_eq!(target.output_path, PathBuf::from("result.pdf"));

        let target =
            DownloadTarget::parse("https://dosya.co/a1b2c3d4e5f6/name.js.html", Some("foo"))
                .unwrap();

        assert_eq!(target.output_path, PathBuf::from("foo.js"));
        assert_eq!(target.detected_extension, "js");
    }

    #[test]
    fn multiple_dots_keep_everything_but_the_last_extension() {
        let target =
            DownloadTarget::parse("https://dosya.co/abcdefabcdef/movie.tar.gz.html", None).unwrap();

        assert_eq!(target.output_path, PathBuf::from("movie.tar.gz"));
        assert_eq!(target.detected_extension, "gz");
    }

    #[test]
    fn extensionless_name_is_its_own_extension() {
        let target =
            DownloadTarget::parse("https://dosya.co/abcdefabcdef/readme.html", Some("out"))
                .unwrap();

        assert_eq!(target.detected_extension, "readme");
        assert_eq!(target.output_path, PathBuf::from("out.readme"));
    }

    #[test]
    fn rejects_foreign_hosts() {
        assert!(matches!(
            DownloadTarget::parse("https://example.com/x/y.html", None),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn rejects_bad_identifiers() {
        // too short
        assert!(DownloadTarget::parse("https://dosya.co/abcdef/name.html", None).is_err());
        // uppercase
        assert!(DownloadTarget::parse("https://dosya.co/ABCDEFABCDEF/name.html", None).is_err());
        // too long
        assert!(
            DownloadTarget::parse("https://dosya.co/abcdefabcdef0/name.html", None).is_err()
        );
    }

    #[test]
    fn rejects_plain_http_and_missing_html_suffix() {
        assert!(DownloadTarget::parse("http://dosya.co/abcdefabcdef/name.html", None).is_err());
        assert!(DownloadTarget::parse("https://dosya.co/abcdefabcdef/name.pdf", None).is_err());
        assert!(DownloadTarget::parse("https://dosya.co/abcdefabcdef/.html", None).is_err());
    }
}
