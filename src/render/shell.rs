use crate::synth::CreateCommand;
use std::borrow::Cow;

/// Quote `token` for a POSIX shell. Tokens made only of safe characters are left as-is.
pub fn quote(token: &str) -> Cow<'_, str> {
    shell_escape::unix::escape(Cow::Borrowed(token))
}

/// Render one command, breaking the line before every property flag and before
/// the final name.
pub fn render_command(argv: &[String]) -> String {
    let last = argv.len().saturating_sub(1);
    argv.iter()
        .enumerate()
        .map(|(i, token)| {
            let quoted = quote(token);
            if i == last || quoted == "-o" || quoted == "-O" {
                format!("\\\n  {quoted}")
            } else {
                quoted.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One stderr line per requested name that matched nothing.
pub fn render_unmatched<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(|name| format!("filesystem not found: {name}\n"))
        .collect()
}

/// All commands, separated by blank lines.
pub fn render_shell(commands: &[CreateCommand]) -> String {
    let mut out = commands
        .iter()
        .map(|c| render_command(&c.argv))
        .collect::<Vec<_>>()
        .join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::CommandKind;
    use pretty_assertions::assert_eq;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn quoting() {
        assert_eq!(quote("compression=lz4"), "compression=lz4");
        assert_eq!(quote("-o"), "-o");
        assert_eq!(quote("feature@async_destroy=enabled"), "'feature@async_destroy=enabled'");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("comment=a b"), "'comment=a b'");
        assert_eq!(quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn quoted_flags_still_break_lines() {
        assert_eq!(
            render_command(&argv(&["zfs", "create", "-o", "comment=a b", "tank/a"])),
            "zfs create \\\n  -o 'comment=a b' \\\n  tank/a"
        );
    }

    #[test]
    fn unmatched_names_one_per_line() {
        assert_eq!(
            render_unmatched(["tank/x", "pool"]),
            "filesystem not found: tank/x\nfilesystem not found: pool\n"
        );
        assert_eq!(render_unmatched(Vec::<&str>::new()), "");
    }

    #[test]
    fn breaks_before_flags_and_name() {
        assert_eq!(
            render_command(&argv(&["zfs", "create", "-o", "atime=off", "tank/a"])),
            "zfs create \\\n  -o atime=off \\\n  tank/a"
        );
        assert_eq!(
            render_command(&argv(&["zpool", "create", "-d", "-O", "x=y", "tank"])),
            "zpool create -d \\\n  -O x=y \\\n  tank"
        );
    }

    #[test]
    fn commands_separated_by_blank_line() {
        let commands = vec![
            CreateCommand {
                name: "tank".to_string(),
                kind: CommandKind::Pool,
                argv: argv(&["zpool", "create", "-d", "tank"]),
            },
            CreateCommand {
                name: "tank/a".to_string(),
                kind: CommandKind::Dataset,
                argv: argv(&["zfs", "create", "tank/a"]),
            },
        ];
        assert_eq!(
            render_shell(&commands),
            "zpool create -d \\\n  tank\n\nzfs create \\\n  tank/a\n"
        );
        assert_eq!(render_shell(&[]), "");
    }
}
