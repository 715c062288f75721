use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::ImageCatalog;
use crate::model::{Architecture, BinaryImage, BinaryUuid};

fn re_section_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*Binary Images:")
            .expect("re_section_header: pattern is valid and should always compile")
    })
}

fn re_image_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\s*(0x[0-9a-fA-F]+)\s*-\s*(0x[0-9a-fA-F]+|\?\?\?)\s+(.*?)\s*<([0-9a-fA-F-]{32,36})>\s*(.*?)\s*$",
        )
        .expect("re_image_line: pattern is valid and should always compile")
    })
}

/// Parses rows of the `Binary Images:` section.
///
/// Accepts both the older `start - end +name arch <uuid> path` rows and the
/// newer `start - end name (version) <uuid> path` rows. Rows whose UUID does
/// not parse are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextImageCatalog;

impl ImageCatalog for TextImageCatalog {
    fn find(&self, content: &str) -> Vec<BinaryImage> {
        let mut images = Vec::new();
        let mut in_section = false;

        for line in content.lines() {
            if !in_section {
                in_section = re_section_header().is_match(line);
                continue;
            }
            if let Some(image) = parse_image_line(line) {
                images.push(image);
            }
        }

        images
    }
}

/// Parse a single `Binary Images:` row.
pub fn parse_image_line(line: &str) -> Option<BinaryImage> {
    let caps = re_image_line().captures(line)?;
    let uuid = match BinaryUuid::parse(&caps[4]) {
        Ok(uuid) => uuid,
        Err(err) => {
            tracing::trace!(%err, line, "skipping image row");
            return None;
        }
    };
    let (name, version, architecture) = split_description(&caps[3]);

    Some(
        BinaryImage::new(&caps[1], uuid, &caps[5])
            .with_name(name)
            .with_end_address(Some(caps[2].to_string()))
            .with_version(version)
            .with_architecture(architecture),
    )
}

/// Split the text between the address range and the UUID into
/// `(name, version, architecture)`.
fn split_description(text: &str) -> (String, Option<String>, Option<Architecture>) {
    let mut rest = text.trim().trim_start_matches('+').trim_start();

    let mut architecture = None;
    if let Some((head, last)) = rest.rsplit_once(char::is_whitespace) {
        if let Some(arch) = Architecture::from_token(last) {
            architecture = Some(arch);
            rest = head.trim_end();
        }
    }

    let mut version = None;
    if rest.ends_with(')') {
        if let Some(open) = rest.rfind(" (") {
            version = Some(rest[open + 2..rest.len() - 1].trim().to_string());
            rest = rest[..open].trim_end();
        }
    }

    (rest.to_string(), version, architecture)
}
