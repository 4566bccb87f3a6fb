//! SSH client config model
//!
//! Parses the block-structured format: a `Host` header line with one
//! or more patterns, followed by `Key Value` option lines until the
//! next header. Blank lines, comments and anything before the first
//! `Host` line are passthrough. Option keys keep their written casing
//! and are compared case-insensitively, per the format's convention.

use std::fmt;
use std::path::Path;

use super::FileError;

/// One `Key Value` option of a host block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshOption {
    pub key: String,
    pub value: String,
}

/// A `Host` header plus its option lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBlock {
    /// Alias patterns following the `Host` keyword. Never empty.
    pub patterns: Vec<String>,
    /// Options in insertion order, keys unique within the block.
    pub options: Vec<SshOption>,
}

impl HostBlock {
    /// Look up an option value, key compared case-insensitively.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.key.eq_ignore_ascii_case(key))
            .map(|opt| opt.value.as_str())
    }

    /// Set or overwrite an option. An existing key keeps its written
    /// casing and position; a new key is appended.
    pub fn set_option(&mut self, key: &str, value: &str) {
        if let Some(opt) = self
            .options
            .iter_mut()
            .find(|opt| opt.key.eq_ignore_ascii_case(key))
        {
            opt.value = value.to_string();
        } else {
            self.options.push(SshOption {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    /// Whether any pattern equals `alias` exactly.
    pub fn matches(&self, alias: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern == alias)
    }
}

/// An item of the original file: a host block or an opaque
/// passthrough line kept at its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SshItem {
    Block(HostBlock),
    Raw(String),
}

/// In-memory SSH client config, file order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshConfigFile {
    items: Vec<SshItem>,
}

impl SshConfigFile {
    /// Parse raw SSH config text.
    pub fn parse(text: &str) -> Result<Self, FileError> {
        let mut items: Vec<SshItem> = Vec::new();
        // Index of the block option lines currently attach to. Blank
        // and comment lines do not close a block.
        let mut open_block: Option<usize> = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                items.push(SshItem::Raw(line.to_string()));
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields[0].eq_ignore_ascii_case("host") && fields.len() > 1 {
                items.push(SshItem::Block(HostBlock {
                    patterns: fields[1..].iter().map(|s| s.to_string()).collect(),
                    options: Vec::new(),
                }));
                open_block = Some(items.len() - 1);
                continue;
            }

            if fields.len() >= 2
                && let Some(index) = open_block
                && let SshItem::Block(block) = &mut items[index]
                && block.option(fields[0]).is_none()
            {
                block.options.push(SshOption {
                    key: fields[0].to_string(),
                    value: fields[1..].join(" "),
                });
                continue;
            }

            // Global options before the first Host line, headers with
            // no pattern, duplicate keys and bare words all fall
            // through to passthrough.
            items.push(SshItem::Raw(line.to_string()));
        }

        Ok(Self { items })
    }

    /// Load and parse the SSH config at `path`.
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let text = super::read_text(path)?;
        Self::parse(&text)
    }

    /// Point `aliases` at `address`.
    ///
    /// The first block (in file order) whose patterns contain any of
    /// the requested aliases gets its `HostName` overwritten, and its
    /// `User` set when `user` is non-empty. With no matching block a
    /// new one is appended. Later blocks matching other aliases are
    /// left alone.
    pub fn add_host(&mut self, aliases: &[String], address: &str, user: Option<&str>) {
        let user = user.filter(|u| !u.is_empty());

        for item in &mut self.items {
            if let SshItem::Block(block) = item
                && aliases.iter().any(|alias| block.matches(alias))
            {
                block.set_option("HostName", address);
                if let Some(user) = user {
                    block.set_option("User", user);
                }
                return;
            }
        }

        let mut patterns: Vec<String> = Vec::new();
        for alias in aliases {
            if !patterns.contains(alias) {
                patterns.push(alias.clone());
            }
        }
        let mut block = HostBlock {
            patterns,
            options: vec![SshOption {
                key: "HostName".to_string(),
                value: address.to_string(),
            }],
        };
        if let Some(user) = user {
            block.options.push(SshOption {
                key: "User".to_string(),
                value: user.to_string(),
            });
        }
        self.items.push(SshItem::Block(block));
    }

    /// Render the file back to text. Passthrough lines are emitted
    /// verbatim; blocks as `Host <pattern>...` followed by two-space
    /// indented option lines in insertion order.
    pub fn serialize(&self) -> String {
        let mut out = String::new();

        for item in &self.items {
            match item {
                SshItem::Raw(raw) => {
                    out.push_str(raw);
                    out.push('\n');
                }
                SshItem::Block(block) => {
                    out.push_str("Host ");
                    out.push_str(&block.patterns.join(" "));
                    out.push('\n');
                    for opt in &block.options {
                        out.push_str("  ");
                        out.push_str(&opt.key);
                        out.push(' ');
                        out.push_str(&opt.value);
                        out.push('\n');
                    }
                }
            }
        }

        out
    }

    /// Persist the serialized file to `path`.
    pub fn write(&self, path: &Path) -> Result<(), FileError> {
        super::write_text(path, &self.serialize())
    }

    /// Host blocks, in file order.
    pub fn blocks(&self) -> impl Iterator<Item = &HostBlock> {
        self.items.iter().filter_map(|item| match item {
            SshItem::Block(block) => Some(block),
            SshItem::Raw(_) => None,
        })
    }

    /// All items, tagged, in file order.
    pub fn items(&self) -> &[SshItem] {
        &self.items
    }
}

impl fmt::Display for SshConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
