//! Entry path helpers: normalization, root prefix detection, and the small
//! case-insensitive string checks the section parsers share.

/// Forward slashes only, no leading slash.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Common wrapping folder (with trailing `/`) shared by the first
/// `sample_size` entries that contain a `/`, or `""` if any two differ.
///
/// Paths are compared after [`normalize_path`]; entries sitting at the
/// archive root carry no folder and are not sampled.
pub fn detect_root_prefix<'a, I>(paths: I, sample_size: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut common: Option<String> = None;
    let mut sampled = 0;

    for raw in paths {
        if sampled >= sample_size {
            break;
        }
        let path = normalize_path(raw);
        let Some(slash) = path.find('/') else {
            continue;
        };
        let prefix = &path[..=slash];

        if let Some(existing) = &common {
            if existing != prefix {
                return String::new();
            }
        } else {
            common = Some(prefix.to_string());
        }
        sampled += 1;
    }

    common.unwrap_or_default()
}

/// `path` without `prefix`, compared ASCII case-insensitively.
pub fn strip_prefix_ci<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &path[prefix.len()..])
}

pub fn ends_with_ci(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.get(s.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

/// Split `"folder/rest..."` into `("folder", "rest...")`; `None` when there
/// is no folder component.
pub fn split_folder(path: &str) -> Option<(&str, &str)> {
    match path.split_once('/') {
        Some((folder, rest)) if !folder.is_empty() => Some((folder, rest)),
        _ => None,
    }
}

/// Stem and extension of the last path component (`"a/icon.PNG"` gives `("icon", "PNG")`).
pub fn stem_and_extension(path: &str) -> (&str, Option<&str>) {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file, None),
    }
}

/// MIME type of an accepted image extension (case-insensitive).
pub fn image_mime(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// MIME type for `<stem>.<image ext>` when the stem matches `expected_stem`.
pub fn named_image(path: &str, expected_stem: &str) -> Option<&'static str> {
    match stem_and_extension(path) {
        (stem, Some(ext)) if stem.eq_ignore_ascii_case(expected_stem) => image_mime(ext),
        _ => None,
    }
}
