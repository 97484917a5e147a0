use tracing::warn;

/// One alias under which a lockfile entry is addressable: the requested
/// `name@range` as it appeared in some manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YarnLockEntryId {
    pub name: String,
    pub version: String,
}

/// A child requirement declared by a lockfile entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YarnLockDependency {
    pub name: String,
    pub version: String,
    pub optional: bool,
}

/// A resolved lockfile entry: several alias ids may map to one installed
/// version (e.g., `lib@^1.0` and `lib@~1.1` both resolving to `1.2.0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YarnLockEntry {
    pub ids: Vec<YarnLockEntryId>,
    pub version: String,
    pub dependencies: Vec<YarnLockDependency>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YarnLock {
    pub entries: Vec<YarnLockEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Dependencies { optional: bool },
}

/// Parse a v1 yarn.lock. Line-oriented and forgiving: a malformed line or
/// entry is logged and skipped, never fatal to the whole parse.
pub fn parse_yarn_lock(content: &str) -> YarnLock {
    let mut entries = Vec::new();
    let mut current: Option<YarnLockEntry> = None;
    let mut section = Section::None;

    for line in content.lines() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        if !line.starts_with(' ') {
            // New entry header; close out the previous one.
            finish_entry(&mut entries, current.take());
            section = Section::None;
            current = parse_entry_header(line);
            continue;
        }

        let Some(entry) = current.as_mut() else {
            warn!(line, "Indented line outside any lockfile entry; skipping");
            continue;
        };

        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        match indent {
            2 => {
                section = Section::None;
                if let Some(version) = trimmed.strip_prefix("version ") {
                    entry.version = unquote(version).to_string();
                } else if trimmed == "dependencies:" {
                    section = Section::Dependencies { optional: false };
                } else if trimmed == "optionalDependencies:" {
                    section = Section::Dependencies { optional: true };
                }
                // resolved, integrity, etc. carry no graph information
            }
            4 => match section {
                Section::Dependencies { optional } => {
                    match parse_dependency_line(trimmed, optional) {
                        Some(dependency) => entry.dependencies.push(dependency),
                        None => warn!(line, "Malformed lockfile dependency line; skipping"),
                    }
                }
                Section::None => {}
            },
            _ => warn!(line, "Unexpected indentation in lockfile; skipping"),
        }
    }

    finish_entry(&mut entries, current.take());
    YarnLock { entries }
}

fn finish_entry(entries: &mut Vec<YarnLockEntry>, entry: Option<YarnLockEntry>) {
    let Some(entry) = entry else { return };
    if entry.version.is_empty() {
        warn!(
            ids = ?entry.ids.iter().map(|id| format!("{}@{}", id.name, id.version)).collect::<Vec<_>>(),
            "Lockfile entry has no resolved version; skipping"
        );
        return;
    }
    entries.push(entry);
}

fn parse_entry_header(line: &str) -> Option<YarnLockEntry> {
    let Some(header) = line.trim_end().strip_suffix(':') else {
        warn!(line, "Malformed lockfile entry header; skipping entry");
        return None;
    };

    let mut ids = Vec::new();
    for alias in header.split(", ") {
        let alias = unquote(alias.trim());
        // Split on the last `@` so scoped names keep their scope.
        match alias.rfind('@') {
            Some(idx) if idx > 0 => ids.push(YarnLockEntryId {
                name: alias[..idx].to_string(),
                version: alias[idx + 1..].to_string(),
            }),
            _ => warn!(alias, "Lockfile alias has no version range; skipping alias"),
        }
    }

    if ids.is_empty() {
        warn!(line, "Lockfile entry header yielded no usable aliases; skipping entry");
        return None;
    }
    Some(YarnLockEntry {
        ids,
        version: String::new(),
        dependencies: Vec::new(),
    })
}

fn parse_dependency_line(trimmed: &str, optional: bool) -> Option<YarnLockDependency> {
    let (name, rest) = if let Some(quoted) = trimmed.strip_prefix('"') {
        let end = quoted.find('"')?;
        (&quoted[..end], quoted[end + 1..].trim_start())
    } else {
        let (name, rest) = trimmed.split_once(' ')?;
        (name, rest.trim_start())
    };

    if name.is_empty() || rest.is_empty() {
        return None;
    }
    Some(YarnLockDependency {
        name: name.to_string(),
        version: unquote(rest).to_string(),
        optional,
    })
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_entry() {
        let content = r#"
# yarn lockfile v1

lib-a@^1.0:
  version "1.2.0"
  resolved "https://registry.yarnpkg.com/lib-a"
"#;
        let lock = parse_yarn_lock(content);
        assert_eq!(lock.entries.len(), 1);
        let entry = &lock.entries[0];
        assert_eq!(entry.ids, vec![YarnLockEntryId { name: "lib-a".into(), version: "^1.0".into() }]);
        assert_eq!(entry.version, "1.2.0");
        assert!(entry.dependencies.is_empty());
    }

    #[test]
    fn test_parse_multiple_aliases() {
        let content = r#"
"lib-a@^1.0", "lib-a@~1.1":
  version "1.2.0"
"#;
        let lock = parse_yarn_lock(content);
        assert_eq!(lock.entries[0].ids.len(), 2);
        assert_eq!(lock.entries[0].ids[1].version, "~1.1");
    }

    #[test]
    fn test_parse_scoped_package_alias() {
        let content = r#"
"@babel/core@^7.0.0":
  version "7.5.5"
"#;
        let lock = parse_yarn_lock(content);
        assert_eq!(lock.entries[0].ids[0].name, "@babel/core");
        assert_eq!(lock.entries[0].ids[0].version, "^7.0.0");
    }

    #[test]
    fn test_parse_dependencies_and_optional_dependencies() {
        let content = r#"
lib-a@^1.0:
  version "1.2.0"
  dependencies:
    child-a "^2.0"
    "@scope/child-b" "~3.0"
  optionalDependencies:
    fsevents "^1.2.7"
"#;
        let lock = parse_yarn_lock(content);
        let deps = &lock.entries[0].dependencies;
        assert_eq!(deps.len(), 3);
        assert_eq!(deps[0], YarnLockDependency { name: "child-a".into(), version: "^2.0".into(), optional: false });
        assert_eq!(deps[1].name, "@scope/child-b");
        assert!(!deps[1].optional);
        assert_eq!(deps[2], YarnLockDependency { name: "fsevents".into(), version: "^1.2.7".into(), optional: true });
    }

    #[test]
    fn test_entry_without_version_is_skipped() {
        let content = r#"
broken@^1.0:
  resolved "https://registry.yarnpkg.com/broken"

fine@^2.0:
  version "2.1.0"
"#;
        let lock = parse_yarn_lock(content);
        assert_eq!(lock.entries.len(), 1);
        assert_eq!(lock.entries[0].ids[0].name, "fine");
    }

    #[test]
    fn test_malformed_lines_do_not_abort_the_parse() {
        let content = r#"
garbage without colon
lib-a@^1.0:
  version "1.2.0"
  dependencies:
    justonename
"#;
        let lock = parse_yarn_lock(content);
        assert_eq!(lock.entries.len(), 1);
        assert!(lock.entries[0].dependencies.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_yarn_lock(""), YarnLock::default());
    }
}
