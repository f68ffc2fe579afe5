use std::{collections::HashSet, path::PathBuf};

use tokio::fs;

/// A subcommand backed by a script file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredCommand {
    pub name: String,
    pub path: PathBuf,
}

/// loads the command scripts of a directory
pub struct ScriptLoader {
    base_path: PathBuf,
    prefix: String,
}

impl ScriptLoader {
    pub fn new(base_path: PathBuf, prefix: impl Into<String>) -> Self {
        Self {
            base_path,
            prefix: prefix.into(),
        }
    }

    /// Lists all command scripts in file name order. A directory that can't
    /// be read has no commands.
    #[tracing::instrument(level = "trace", skip(self), fields(path = ?self.base_path))]
    pub async fn read_commands(&self) -> Vec<DiscoveredCommand> {
        let mut read_dir = match fs::read_dir(&self.base_path).await {
            Ok(read_dir) => read_dir,
            Err(e) => {
                tracing::debug!("No scripts directory at {:?}: {e}", self.base_path);
                return Vec::new();
            }
        };
        tracing::debug!("Found scripts directory {:?}", self.base_path);

        let mut file_names = Vec::new();

        loop {
            match read_dir.next_entry().await {
                Ok(Some(entry)) => {
                    let is_dir = match entry.file_type().await {
                        Ok(file_type) => file_type.is_dir(),
                        Err(e) => {
                            tracing::debug!("Skipping {:?}: {e}", entry.path());
                            continue;
                        }
                    };
                    if is_dir {
                        continue;
                    }
                    file_names.push(entry.file_name());
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!("Stopped reading {:?}: {e}", self.base_path);
                    break;
                }
            }
        }
        file_names.sort();

        let mut seen = HashSet::new();
        let mut commands = Vec::new();

        for file_name in file_names {
            let lossy_name = file_name.to_string_lossy();
            let Some(name) = command_name(&lossy_name, &self.prefix) else {
                continue;
            };
            let path = self.base_path.join(&file_name);

            if name.is_empty() {
                tracing::warn!("Ignoring {path:?}: the command name is empty");
                continue;
            }
            if !seen.insert(name.to_owned()) {
                tracing::warn!("Ignoring {path:?}: command `{name}` is already defined");
                continue;
            }
            tracing::trace!("Discovered command `{name}` at {path:?}");
            commands.push(DiscoveredCommand {
                name: name.to_owned(),
                path,
            });
        }

        commands
    }
}

/// Strips the prefix and everything from the first `.` on.
/// Returns `None` for files without the prefix.
pub fn command_name<'a>(file_name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = file_name.strip_prefix(prefix)?;

    Some(rest.split('.').next().unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "#!/bin/sh\n").unwrap();
    }

    fn names(commands: &[DiscoveredCommand]) -> Vec<&str> {
        commands.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn it_strips_prefix_and_extension() {
        assert_eq!(command_name("command-build.sh", "command-"), Some("build"));
        assert_eq!(command_name("command-test", "command-"), Some("test"));
        assert_eq!(command_name("command-a.b.c", "command-"), Some("a"));
        assert_eq!(command_name("command-.sh", "command-"), Some(""));
        assert_eq!(command_name("notacommand-x", "command-"), None);
    }

    #[tokio::test]
    async fn it_discovers_matching_files_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "command-build.sh");
        touch(dir.path(), "command-test");
        touch(dir.path(), "notacommand-x");
        std::fs::create_dir(dir.path().join("command-dir")).unwrap();

        let commands = ScriptLoader::new(dir.path().to_owned(), "command-")
            .read_commands()
            .await;

        assert_eq!(names(&commands), vec!["build", "test"]);
        assert_eq!(commands[0].path, dir.path().join("command-build.sh"));
        assert_eq!(commands[1].path, dir.path().join("command-test"));
    }

    #[tokio::test]
    async fn a_missing_directory_has_no_commands() {
        let dir = tempfile::tempdir().unwrap();
        let commands = ScriptLoader::new(dir.path().join("scripts"), "command-")
            .read_commands()
            .await;

        assert!(commands.is_empty());
    }

    #[tokio::test]
    async fn the_first_duplicate_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "command-build.sh");
        touch(dir.path(), "command-build");
        touch(dir.path(), "command-.sh");

        let commands = ScriptLoader::new(dir.path().to_owned(), "command-")
            .read_commands()
            .await;

        assert_eq!(
            commands,
            vec![DiscoveredCommand {
                name: "build".into(),
                path: dir.path().join("command-build"),
            }]
        );
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn it_keeps_non_utf8_script_paths() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = tempfile::tempdir().unwrap();
        let file_name = OsStr::from_bytes(b"command-b\xffd.sh");
        std::fs::write(dir.path().join(file_name), "#!/bin/sh\n").unwrap();

        let commands = ScriptLoader::new(dir.path().to_owned(), "command-")
            .read_commands()
            .await;

        assert_eq!(
            commands,
            vec![DiscoveredCommand {
                name: "b\u{FFFD}d".into(),
                path: dir.path().join(file_name),
            }]
        );
    }

    #[tokio::test]
    async fn it_uses_a_custom_prefix() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "task-lint.py");
        touch(dir.path(), "command-build");

        let commands = ScriptLoader::new(dir.path().to_owned(), "task-")
            .read_commands()
            .await;

        assert_eq!(names(&commands), vec!["lint"]);
    }
}
