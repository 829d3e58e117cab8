// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recovering shot names from editorial clip names.
//!
//! Editing tools name clips after their media, e.g. `SEQ010_SH0040_v003.mov`.
//! The shot name is the `SH0040` part.

use regex::Regex;
use std::sync::LazyLock;

static MEDIA_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(mov|mp4|m4v|avi|mkv|mxf|webm|wav|mp3|aif|aiff|png|jpe?g|exr|tiff?)$")
        .expect("media extension pattern is valid")
});

static DUPLICATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d{3}$").expect("duplicate suffix pattern is valid"));

static SHOT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[_\-\s.])(sh(?:ot)?_?\d+[a-z]?)(?:$|[_\-\s.])")
        .expect("shot token pattern is valid")
});

static VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[_\-\s.]v\d+$").expect("version suffix pattern is valid"));

/// Strip editorial decoration from a clip name to get the shot name
pub fn reformat_shot_name(clip_name: &str) -> String {
    let name = clip_name.trim();
    let name = MEDIA_EXTENSION.replace(name, "");
    let name = DUPLICATE_SUFFIX.replace(&name, "");

    if let Some(token) = SHOT_TOKEN.captures(&name).and_then(|c| c.get(1)) {
        return token.as_str().to_string();
    }

    let name = VERSION_SUFFIX.replace(&name, "");
    if name.is_empty() {
        clip_name.trim().to_string()
    } else {
        name.into_owned()
    }
}
