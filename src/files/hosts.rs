//! Hosts file model
//!
//! Parses the `<address> <alias> [alias...]` table format into an
//! ordered list of tagged lines, so blank lines, comments and anything
//! else that is not a mapping survive a rewrite verbatim. The parser is
//! permissive: a line that does not match the mapping shape is kept as
//! passthrough rather than rejected.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::FileError;

/// Matches `<address> <alias> [alias...] [#comment]`. The address must
/// not start a comment, and at least one alias token is required.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^#\s]+)[ \t]+([^#]+?)[ \t]*(?:#(.*))?$").unwrap());

/// One address-to-aliases mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsEntry {
    /// Address the aliases resolve to.
    pub address: String,
    /// Hostnames mapped to the address, in declaration order.
    pub aliases: Vec<String>,
    /// Trailing `#` comment text, preserved verbatim.
    pub comment: Option<String>,
}

/// A line of the original file: either a structured mapping or an
/// opaque passthrough payload kept at its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostsLine {
    Entry(HostsEntry),
    Raw(String),
}

/// In-memory hosts file, file order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsFile {
    lines: Vec<HostsLine>,
}

impl HostsFile {
    /// Parse raw hosts file text.
    pub fn parse(text: &str) -> Result<Self, FileError> {
        let mut lines = Vec::new();

        for line in text.lines() {
            match ENTRY_RE.captures(line) {
                Some(caps) => {
                    let aliases = caps[2].split_whitespace().map(str::to_string).collect();
                    lines.push(HostsLine::Entry(HostsEntry {
                        address: caps[1].to_string(),
                        aliases,
                        comment: caps.get(3).map(|m| m.as_str().to_string()),
                    }));
                }
                None => lines.push(HostsLine::Raw(line.to_string())),
            }
        }

        Ok(Self { lines })
    }

    /// Load and parse the hosts file at `path`.
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let text = super::read_text(path)?;
        Self::parse(&text)
    }

    /// Add a mapping from `aliases` to `address`.
    ///
    /// If an entry for `address` already exists, aliases not already
    /// present (exact match) are appended to that entry; otherwise a
    /// new entry is appended at the end. Never removes or reorders
    /// existing lines.
    pub fn add_host(&mut self, aliases: &[String], address: &str) {
        for line in &mut self.lines {
            if let HostsLine::Entry(entry) = line
                && entry.address == address
            {
                for alias in aliases {
                    if !entry.aliases.contains(alias) {
                        entry.aliases.push(alias.clone());
                    }
                }
                return;
            }
        }

        let mut unique: Vec<String> = Vec::new();
        for alias in aliases {
            if !unique.contains(alias) {
                unique.push(alias.clone());
            }
        }
        self.lines.push(HostsLine::Entry(HostsEntry {
            address: address.to_string(),
            aliases: unique,
            comment: None,
        }));
    }

    /// Render the file back to text. Passthrough lines are emitted
    /// verbatim; entries as `<address>\t<alias> <alias> ...[ #comment]`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();

        for line in &self.lines {
            match line {
                HostsLine::Raw(raw) => out.push_str(raw),
                HostsLine::Entry(entry) => {
                    out.push_str(&entry.address);
                    out.push('\t');
                    out.push_str(&entry.aliases.join(" "));
                    if let Some(comment) = &entry.comment {
                        out.push_str(" #");
                        out.push_str(comment);
                    }
                }
            }
            out.push('\n');
        }

        out
    }

    /// Persist the serialized file to `path`.
    pub fn write(&self, path: &Path) -> Result<(), FileError> {
        super::write_text(path, &self.serialize())
    }

    /// Structured entries, in file order.
    pub fn entries(&self) -> impl Iterator<Item = &HostsEntry> {
        self.lines.iter().filter_map(|line| match line {
            HostsLine::Entry(entry) => Some(entry),
            HostsLine::Raw(_) => None,
        })
    }

    /// All lines, tagged, in file order.
    pub fn lines(&self) -> &[HostsLine] {
        &self.lines
    }
}

impl fmt::Display for HostsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
