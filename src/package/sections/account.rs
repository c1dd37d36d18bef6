use crate::models::{Avatar, DataExportEnvelope, PackageData, UserProfile};
use crate::package::path::{ends_with_ci, named_image, strip_prefix_ci};
use crate::package::router::Target;

use super::{DecodeResult, decode};

/// `rest` is the path below `Account/`.
pub(crate) fn classify(rest: &str) -> Option<Target<'_>> {
    if rest.eq_ignore_ascii_case("user.json") {
        return Some(Target::UserProfile);
    }
    if !rest.contains('/') {
        return named_image(rest, "avatar").map(|mime| Target::Avatar { mime });
    }
    let export = strip_prefix_ci(rest, "user_data_exports/")?;
    ends_with_ci(export, ".json").then_some(Target::DataExport)
}

/// Later copies replace earlier ones.
pub(crate) fn apply_profile(content: &[u8], data: &mut PackageData) -> DecodeResult {
    data.user_profile = Some(decode::<UserProfile>(content)?);
    Ok(())
}

pub(crate) fn apply_avatar(content: Vec<u8>, mime: &'static str, data: &mut PackageData) {
    data.avatar = Some(Avatar {
        bytes: content,
        mime,
    });
}

pub(crate) fn apply_data_export(content: &[u8], data: &mut PackageData) -> DecodeResult {
    data.data_exports.push(decode::<DataExportEnvelope>(content)?);
    Ok(())
}
