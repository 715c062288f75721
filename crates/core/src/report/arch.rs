//! Architecture detection over canonical (legacy text) report content.
//!
//! The header's `Code Type:` line is authoritative unless it only names a
//! family (`ARM`); in that case the first `Binary Images:` row decides.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Architecture;

fn re_code_type() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^Code Type:(.*?)(\(.*\))?$")
            .expect("re_code_type: pattern is valid and should always compile")
    })
}

fn re_first_image_arch() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?ims)Binary Images:.*?\s+([^\s]+)\s+<")
            .expect("re_first_image_arch: pattern is valid and should always compile")
    })
}

/// Architecture named on the `Code Type:` header line, without any
/// parenthesized detail (`X86-64 (Native)` yields `X86-64`).
pub fn header_architecture(content: &str) -> Option<Architecture> {
    let caps = re_code_type().captures(content)?;
    let token = caps.get(1)?.as_str().split_whitespace().next()?;
    Architecture::from_token(token)
}

/// Architecture token printed just before the first `<uuid>` after the
/// `Binary Images:` header.
pub fn binary_images_architecture(content: &str) -> Option<Architecture> {
    let caps = re_first_image_arch().captures(content)?;
    Architecture::from_token(caps.get(1)?.as_str().trim())
}

/// Header architecture, replaced by the image-table architecture when the
/// header only names an incomplete family.
///
/// Once the fallback runs its result always wins, including `None`.
pub fn resolve_architecture(content: &str) -> Option<Architecture> {
    match header_architecture(content) {
        Some(arch) if arch.is_incomplete() => {
            let resolved = binary_images_architecture(content);
            tracing::debug!(header = %arch, ?resolved, "header architecture is incomplete");
            resolved
        }
        other => other,
    }
}
