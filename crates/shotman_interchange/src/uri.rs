// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conversions between media URLs and filesystem paths.

use std::path::{Path, PathBuf};
use url::Url;

/// Filesystem path of a media `target_url`.
///
/// Accepts `file://` URLs (percent-encoded, with or without a Windows drive
/// letter) as well as plain paths.
pub fn file_path_from_uri(uri: &str) -> PathBuf {
    let Ok(url) = Url::parse(uri) else {
        return PathBuf::from(uri);
    };

    // Single letter schemes are Windows drive letters, not URLs
    if url.scheme().len() == 1 {
        return PathBuf::from(uri);
    }
    if url.scheme() != "file" {
        return PathBuf::from(url.path());
    }

    let decoded = url
        .to_file_path()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|()| url.path().to_string());

    // "/C:/media/clip.mov" -> "C:/media/clip.mov"
    let bytes = decoded.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
        return PathBuf::from(&decoded[1..]);
    }

    PathBuf::from(decoded)
}

/// `file://` URL for a path, or the path itself when it is not absolute
pub fn uri_from_file_path(path: &Path) -> String {
    Url::from_file_path(path)
        .map(String::from)
        .unwrap_or_else(|()| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encoded_file_url() {
        assert_eq!(
            file_path_from_uri("file:///shots/SEQ%20010/sh010.mov"),
            PathBuf::from("/shots/SEQ 010/sh010.mov")
        );
    }

    #[test]
    fn test_plain_path_passes_through() {
        assert_eq!(file_path_from_uri("/shots/sh010.mov"), PathBuf::from("/shots/sh010.mov"));
        assert_eq!(file_path_from_uri("C:/shots/sh010.mov"), PathBuf::from("C:/shots/sh010.mov"));
    }

    #[cfg(unix)]
    #[test]
    fn test_round_trip_absolute_path() {
        let path = Path::new("/renders/Main Take/Sh010.mp4");
        let uri = uri_from_file_path(path);
        assert!(uri.starts_with("file:///renders/Main%20Take"));
        assert_eq!(file_path_from_uri(&uri), path);
    }

    #[test]
    fn test_relative_path_is_not_a_url() {
        assert_eq!(uri_from_file_path(Path::new("renders/sh010.mp4")), "renders/sh010.mp4");
    }
}
