//! Front matter splitting and parsing.
//!
//! Two header styles are accepted at the very top of a post:
//!
//! ```text
//! ---                          +++
//! title: Hello World           title = "Hello World"
//! date: "2015-05-01"           date = 2015-05-01
//! description: First post      draft = true
//! ---                          +++
//! ```
//!
//! The `---` style is parsed as YAML and the `+++` style as TOML. Either way
//! the header must be a mapping; scalar values are kept as strings, while
//! lists, nested mappings and nulls are dropped, since only scalar fields are
//! consumed.
//!
//! A file without a header has empty front matter and its whole content is
//! the body.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("front matter opened with '{0}' is never closed")]
    Unterminated(&'static str),
    #[error("YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("YAML front matter must be a mapping of keys to values")]
    NotAMapping,
    #[error("TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("front matter field '{field}' has invalid value '{value}'")]
    InvalidValue { field: String, value: String },
}

/// Scalar front matter fields, stringified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    /// `draft: true` marks a post as unpublished. Absent means published.
    pub fn draft(&self) -> Result<bool, FrontmatterError> {
        match self.get("draft") {
            None => Ok(false),
            Some("true" | "yes") => Ok(true),
            Some("false" | "no") => Ok(false),
            Some(other) => Err(FrontmatterError::InvalidValue {
                field: "draft".into(),
                value: other.into(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split `content` into front matter and body.
pub fn parse(content: &str) -> Result<(FrontMatter, &str), FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let delimiter = match content.lines().next().map(str::trim_end) {
        Some("---") => "---",
        Some("+++") => "+++",
        _ => return Ok((FrontMatter::default(), content)),
    };

    // Byte offsets of the header text and of the body after the closing line.
    let mut offset = 0;
    let mut header_end = None;
    for (idx, line) in content.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += line.len();
        if idx > 0 && line.trim_end() == delimiter {
            header_end = Some((start, offset));
            break;
        }
    }
    let (header_end, body_start) = header_end.ok_or(FrontmatterError::Unterminated(delimiter))?;

    let first_line_len = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
    let header = &content[first_line_len..header_end];
    let body = &content[body_start..];

    let front = match delimiter {
        "+++" => parse_toml(header)?,
        _ => parse_yaml(header)?,
    };
    Ok((front, body))
}

fn parse_toml(header: &str) -> Result<FrontMatter, FrontmatterError> {
    let table: toml::Table = toml::from_str(header)?;
    let fields = table
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(d) => d.to_string(),
                toml::Value::Array(_) | toml::Value::Table(_) => return None,
            };
            Some((key, value))
        })
        .collect();
    Ok(FrontMatter { fields })
}

fn parse_yaml(header: &str) -> Result<FrontMatter, FrontmatterError> {
    let blank = header.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    });
    if blank {
        return Ok(FrontMatter::default());
    }

    let mapping = match serde_yaml::from_str::<serde_yaml::Value>(header)? {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => return Ok(FrontMatter::default()),
        _ => return Err(FrontmatterError::NotAMapping),
    };

    let fields = mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let serde_yaml::Value::String(key) = key else {
                return None;
            };
            let value = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Null
                | serde_yaml::Value::Sequence(_)
                | serde_yaml::Value::Mapping(_)
                | serde_yaml::Value::Tagged(_) => return None,
            };
            Some((key, value))
        })
        .collect();
    Ok(FrontMatter { fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_is_all_body() {
        let (front, body) = parse("# Hello\n\nText").unwrap();
        assert!(front.is_empty());
        assert_eq!(body, "# Hello\n\nText");
    }

    #[test]
    fn yaml_style_scalars() {
        let src = "---\ntitle: Hello World\ndate: \"2015-05-01T22:12:03.284Z\"\ndescription: 'First one'\n---\nBody here\n";
        let (front, body) = parse(src).unwrap();
        assert_eq!(front.title(), Some("Hello World"));
        assert_eq!(front.date(), Some("2015-05-01T22:12:03.284Z"));
        assert_eq!(front.description(), Some("First one"));
        assert_eq!(body, "Body here\n");
    }

    #[test]
    fn yaml_value_may_contain_colons() {
        let (front, _) = parse("---\ntitle: \"Rust: a retrospective\"\n---\n").unwrap();
        assert_eq!(front.title(), Some("Rust: a retrospective"));
    }

    #[test]
    fn yaml_skips_comments_and_nested_values() {
        let src = "---\n# comment\ntitle: T\ntags:\n  - rust\n  - blog\nauthor:\n  name: x\n---\n";
        let (front, _) = parse(src).unwrap();
        assert_eq!(front.title(), Some("T"));
        assert_eq!(front.get("tags"), None);
        assert_eq!(front.get("name"), None);
    }

    #[test]
    fn yaml_syntax_error_is_error() {
        let err = parse("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn yaml_scalar_header_is_not_a_mapping() {
        let err = parse("---\njust some words\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::NotAMapping));
    }

    #[test]
    fn yaml_inline_comment_is_stripped() {
        let (front, _) = parse("---\ndate: 2020-01-01 # published\ntitle: T # note\n---\n").unwrap();
        assert_eq!(front.date(), Some("2020-01-01"));
        assert_eq!(front.title(), Some("T"));
    }

    #[test]
    fn yaml_block_scalars() {
        let src = "---\ndescription: >-\n  Folded long\n  text\nnotes: |\n  line one\n  line two\n---\n";
        let (front, _) = parse(src).unwrap();
        assert_eq!(front.description(), Some("Folded long text"));
        assert_eq!(front.get("notes"), Some("line one\nline two\n"));
    }

    #[test]
    fn yaml_escapes_are_unescaped() {
        let (front, _) = parse("---\ntitle: \"Say \\\"hi\\\"\"\n---\n").unwrap();
        assert_eq!(front.title(), Some("Say \"hi\""));
    }

    #[test]
    fn yaml_numbers_and_nulls() {
        let (front, _) = parse("---\ntitle: 2048\ndescription:\n---\n").unwrap();
        assert_eq!(front.title(), Some("2048"));
        assert_eq!(front.description(), None);
    }

    #[test]
    fn blank_header_is_empty() {
        let (front, body) = parse("---\n# only a comment\n---\nBody").unwrap();
        assert!(front.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn crlf_line_endings() {
        let (front, body) = parse("---\r\ntitle: Win\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(front.title(), Some("Win"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn unterminated_header_is_error() {
        let err = parse("---\ntitle: Oops\nno closing\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated("---")));
    }

    #[test]
    fn toml_header() {
        let src = "+++\ntitle = \"Toml Post\"\ndate = 2019-03-04\ndraft = true\ntags = [\"a\"]\n+++\nBody";
        let (front, body) = parse(src).unwrap();
        assert_eq!(front.title(), Some("Toml Post"));
        assert_eq!(front.date(), Some("2019-03-04"));
        assert!(front.draft().unwrap());
        assert_eq!(front.get("tags"), None);
        assert_eq!(body, "Body");
    }

    #[test]
    fn toml_syntax_error_is_error() {
        assert!(matches!(
            parse("+++\ntitle = \n+++\n"),
            Err(FrontmatterError::Toml(_))
        ));
    }

    #[test]
    fn draft_values() {
        let (front, _) = parse("---\ndraft: false\n---\n").unwrap();
        assert!(!front.draft().unwrap());
        let (front, _) = parse("---\ntitle: x\n---\n").unwrap();
        assert!(!front.draft().unwrap());
        let (front, _) = parse("---\ndraft: maybe\n---\n").unwrap();
        assert!(front.draft().is_err());
    }

    #[test]
    fn empty_value_reads_as_absent() {
        let (front, _) = parse("---\ntitle: \"\"\n---\n").unwrap();
        assert_eq!(front.title(), None);
    }

    #[test]
    fn horizontal_rule_later_in_body_is_not_a_header() {
        let (front, body) = parse("Intro\n---\nMore").unwrap();
        assert!(front.is_empty());
        assert_eq!(body, "Intro\n---\nMore");
    }
}
