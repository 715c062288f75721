use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Processor architecture named by a crash report.
///
/// Serialized (and displayed) using the spelling symbolication tools accept
/// for their `-arch` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    #[serde(rename = "i386")]
    I386,
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "x86_64h")]
    X86_64h,
    /// Bare ARM family token; the width is only known from the image list.
    #[serde(rename = "arm")]
    Arm,
    #[serde(rename = "armv7")]
    Armv7,
    #[serde(rename = "armv7s")]
    Armv7s,
    #[serde(rename = "armv7k")]
    Armv7k,
    #[serde(rename = "arm64")]
    Arm64,
    #[serde(rename = "arm64e")]
    Arm64e,
    #[serde(rename = "arm64_32")]
    Arm64_32,
    #[serde(rename = "ppc")]
    Ppc,
    #[serde(rename = "ppc64")]
    Ppc64,
    /// The report explicitly says it could not tell (`???`).
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized architecture token '{0}'")]
pub struct ArchitectureParseError(pub String);

impl Architecture {
    /// Map a report token (header spelling or `-arch` spelling) to a variant.
    ///
    /// Matching is case-insensitive. Returns `None` for tokens that name no
    /// known architecture; `???`/`unknown` map to [`Architecture::Unknown`].
    pub fn from_token(token: &str) -> Option<Self> {
        let arch = match token.trim().to_ascii_lowercase().as_str() {
            "i386" | "i686" | "x86" => Architecture::I386,
            "x86_64" | "x86-64" | "amd64" => Architecture::X86_64,
            "x86_64h" | "x86-64h" => Architecture::X86_64h,
            "arm" => Architecture::Arm,
            "armv7" => Architecture::Armv7,
            "armv7s" => Architecture::Armv7s,
            "armv7k" => Architecture::Armv7k,
            "arm64" | "arm-64" | "aarch64" => Architecture::Arm64,
            "arm64e" | "arm-64e" => Architecture::Arm64e,
            "arm64_32" | "arm-64_32" | "arm64-32" => Architecture::Arm64_32,
            "ppc" | "powerpc" => Architecture::Ppc,
            "ppc64" | "ppc-64" | "powerpc-64" | "powerpc64" => Architecture::Ppc64,
            "???" | "unknown" => Architecture::Unknown,
            _ => return None,
        };
        Some(arch)
    }

    /// A family name without a width qualifier.
    pub fn is_incomplete(self) -> bool {
        matches!(self, Architecture::Arm)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::I386 => "i386",
            Architecture::X86_64 => "x86_64",
            Architecture::X86_64h => "x86_64h",
            Architecture::Arm => "arm",
            Architecture::Armv7 => "armv7",
            Architecture::Armv7s => "armv7s",
            Architecture::Armv7k => "armv7k",
            Architecture::Arm64 => "arm64",
            Architecture::Arm64e => "arm64e",
            Architecture::Arm64_32 => "arm64_32",
            Architecture::Ppc => "ppc",
            Architecture::Ppc64 => "ppc64",
            Architecture::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = ArchitectureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Architecture::from_token(s).ok_or_else(|| ArchitectureParseError(s.to_string()))
    }
}
