//! Section-header classification for the AWS shared config file.
//!
//! Headers come in three shapes: `profile <name>`, `sso-session <name>`,
//! `service <name>`, plus the bare `default` profile which carries no
//! `profile ` prefix. Keys stored before any header (the general block)
//! carry global defaults and are not modeled as an entity.

/// The kind of entity a section header denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Profile,
    SsoSession,
    Service,
    /// The general (sectionless) block; skipped during load.
    Unused,
    /// A section kind this tool does not know about; skipped during load.
    Other,
}

/// Split a raw section header into its kind and entity name.
///
/// The text before the first space selects the kind; the remainder is the
/// entity name, with any further spaces rejoined by commas. A header with
/// no space is the bare `default` profile, except for the empty string,
/// which marks the general block.
pub fn classify(raw: &str) -> (SectionKind, String) {
    match raw.split_once(' ') {
        None => {
            if raw.is_empty() {
                (SectionKind::Unused, String::new())
            } else {
                // Bare header, e.g. [default]
                (SectionKind::Profile, raw.to_string())
            }
        }
        Some((kind, rest)) => {
            let kind = match kind {
                "profile" => SectionKind::Profile,
                "sso-session" => SectionKind::SsoSession,
                "service" => SectionKind::Service,
                _ => SectionKind::Other,
            };
            (kind, rest.split(' ').collect::<Vec<_>>().join(","))
        }
    }
}
