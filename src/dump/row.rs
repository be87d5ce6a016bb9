use crate::error::{ZinferError, ZinferResult};
use regex::Regex;
use std::iter::Enumerate;
use std::str::Lines;

const HEADER_RE: &str = r"^NAME\s+PROPERTY\s+VALUE\s+SOURCE$";

// Capture:
// 1) entity name
// 2) property name
// 3) value: may contain spaces, so match as little as possible
// 4) source tag
// 5) parent dataset, only meaningful after "inherited from "
const ROW_RE: &str =
    r"^(\S+)\s+(\S+)\s+(.*?)\s+(-|default|local|temporary|inherited from )(\S+)?$";

/// The `SOURCE` column, before it is checked against the entity it appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTag {
    ReadOnly,
    Default,
    Local,
    Temporary,
    InheritedFrom,
}

impl SourceTag {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "-" => Some(SourceTag::ReadOnly),
            "default" => Some(SourceTag::Default),
            "local" => Some(SourceTag::Local),
            "temporary" => Some(SourceTag::Temporary),
            "inherited from " => Some(SourceTag::InheritedFrom),
            _ => None,
        }
    }
}

/// One property line of a `get all` dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub line: usize,
    pub entity: &'a str,
    pub property: &'a str,
    pub value: &'a str,
    pub tag: SourceTag,
    raw_tag: &'a str,
    pub parent: Option<&'a str>,
}

impl Row<'_> {
    /// The source column as it appeared, for error messages.
    pub fn source_text(&self) -> String {
        format!("{}{}", self.raw_tag, self.parent.unwrap_or_default())
    }
}

/// Iterates the property rows of a dump, after checking its header.
///
/// Blank lines are skipped, as are snapshots (`@`) and bookmarks (`#`), which
/// have no create command of their own.
pub struct RowReader<'a> {
    lines: Enumerate<Lines<'a>>,
    re: Regex,
}

impl<'a> RowReader<'a> {
    pub fn new(text: &'a str) -> ZinferResult<Self> {
        let mut lines = text.lines().enumerate();
        let header = lines.next().map(|(_, l)| l.trim()).unwrap_or_default();
        if !Regex::new(HEADER_RE)?.is_match(header) {
            return Err(ZinferError::UnexpectedHeader(header.to_string()));
        }
        Ok(Self {
            lines,
            re: Regex::new(ROW_RE)?,
        })
    }

    pub fn next_row(&mut self) -> ZinferResult<Option<Row<'a>>> {
        for (lineno, line) in self.lines.by_ref() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let unparseable = || ZinferError::Unparseable {
                line: lineno + 1,
                text: line.to_string(),
            };
            let caps = self.re.captures(line).ok_or_else(unparseable)?;

            let entity = caps.get(1).ok_or_else(unparseable)?.as_str();
            if entity.contains('@') || entity.contains('#') {
                continue;
            }
            let raw_tag = caps.get(4).ok_or_else(unparseable)?.as_str();

            return Ok(Some(Row {
                line: lineno + 1,
                entity,
                property: caps.get(2).ok_or_else(unparseable)?.as_str(),
                value: caps.get(3).ok_or_else(unparseable)?.as_str(),
                tag: SourceTag::parse(raw_tag).ok_or_else(unparseable)?,
                raw_tag,
                parent: caps.get(5).map(|m| m.as_str()),
            }));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(body: &str) -> ZinferResult<Vec<Row<'_>>> {
        let mut reader = RowReader::new(body)?;
        let mut out = Vec::new();
        while let Some(row) = reader.next_row()? {
            out.push(row);
        }
        Ok(out)
    }

    #[test]
    fn header_is_whitespace_insensitive() {
        assert!(RowReader::new("  NAME\tPROPERTY   VALUE  SOURCE  \n").is_ok());
        assert_eq!(
            RowReader::new("foo").err(),
            Some(ZinferError::UnexpectedHeader("foo".to_string()))
        );
        assert_eq!(
            RowReader::new("").err(),
            Some(ZinferError::UnexpectedHeader(String::new()))
        );
    }

    #[test]
    fn value_may_contain_spaces() {
        let rows = rows("NAME PROPERTY VALUE SOURCE\ntank  comment  a - b  local\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "a - b");
        assert_eq!(rows[0].tag, SourceTag::Local);
        assert_eq!(rows[0].parent, None);
    }

    #[test]
    fn inherited_rows_carry_parent() {
        let rows =
            rows("NAME PROPERTY VALUE SOURCE\ntank/a  atime  off  inherited from tank\n").unwrap();
        assert_eq!(rows[0].tag, SourceTag::InheritedFrom);
        assert_eq!(rows[0].parent, Some("tank"));
        assert_eq!(rows[0].source_text(), "inherited from tank");
    }

    #[test]
    fn readonly_dash_value() {
        let rows = rows("NAME PROPERTY VALUE SOURCE\ntank  keyformat  -  -\n").unwrap();
        assert_eq!(rows[0].value, "-");
        assert_eq!(rows[0].tag, SourceTag::ReadOnly);
    }

    #[test]
    fn skips_blank_snapshot_and_bookmark_lines() {
        let rows = rows(
            "NAME PROPERTY VALUE SOURCE\n\n   \ntank@now  used  0  -\ntank/a#mark  guid  1  -\ntank  used  1G  -\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity, "tank");
        assert_eq!(rows[0].line, 6);
    }

    #[test]
    fn unparseable_line() {
        assert_eq!(
            rows("NAME  PROPERTY  VALUE  SOURCE\nxyz").unwrap_err(),
            ZinferError::Unparseable {
                line: 2,
                text: "xyz".to_string(),
            }
        );
    }
}
