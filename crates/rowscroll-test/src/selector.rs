//! Selector parsing for widget queries.
//!
//! Supports:
//! - `"row-3"` or `"#row-3"` - by test ID
//! - `"[data-testid='panel-1']"` - by test ID
//! - `"[aria-label='Gojira (1954)']"` - by accessible name
//! - `"[role='listitem']"` - by accessible role

use rowscroll_core::{AccessibleRole, Widget};

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by test ID
    TestId(String),
    /// Match by accessible name
    Label(String),
    /// Match by accessible role
    Role(AccessibleRole),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        if let Some(attr) = input.strip_prefix('[') {
            let attr = attr.strip_suffix(']').ok_or(SelectorError::UnclosedAttribute)?;
            let (name, value) = attr.split_once('=').ok_or(SelectorError::InvalidAttribute)?;
            let value = unquote(value.trim());
            return match name.trim() {
                "data-testid" => Ok(Self::TestId(value.to_string())),
                "aria-label" => Ok(Self::Label(value.to_string())),
                "role" => role(value).map(Self::Role),
                other => Err(SelectorError::UnknownAttribute(other.to_string())),
            };
        }

        let id = input.strip_prefix('#').unwrap_or(input);
        match id.chars().find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '_')) {
            Some(c) => Err(SelectorError::UnexpectedChar(c)),
            None if id.is_empty() => Err(SelectorError::ExpectedIdentifier),
            None => Ok(Self::TestId(id.to_string())),
        }
    }

    /// Check if this selector matches a widget.
    #[must_use]
    pub fn matches(&self, widget: &dyn Widget) -> bool {
        match self {
            Self::TestId(id) => widget.test_id() == Some(id.as_str()),
            Self::Label(label) => widget.accessible_name() == Some(label.as_str()),
            Self::Role(role) => widget.accessible_role() == *role,
        }
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix(['\'', '"'])
        .and_then(|v| v.strip_suffix(['\'', '"']))
        .unwrap_or(value)
}

fn role(value: &str) -> Result<AccessibleRole, SelectorError> {
    Ok(match value {
        "generic" => AccessibleRole::Generic,
        "button" => AccessibleRole::Button,
        "link" => AccessibleRole::Link,
        "heading" => AccessibleRole::Heading,
        "list" => AccessibleRole::List,
        "listitem" => AccessibleRole::ListItem,
        "region" => AccessibleRole::Region,
        "video" => AccessibleRole::Video,
        other => return Err(SelectorError::UnknownRole(other.to_string())),
    })
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Empty selector
    Empty,
    /// Unexpected character
    UnexpectedChar(char),
    /// Expected identifier
    ExpectedIdentifier,
    /// Invalid attribute syntax
    InvalidAttribute,
    /// Unclosed attribute bracket
    UnclosedAttribute,
    /// Attribute other than data-testid, aria-label or role
    UnknownAttribute(String),
    /// Role name not known
    UnknownRole(String),
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character: '{c}'"),
            Self::ExpectedIdentifier => write!(f, "expected identifier"),
            Self::InvalidAttribute => write!(f, "invalid attribute syntax"),
            Self::UnclosedAttribute => write!(f, "unclosed attribute bracket"),
            Self::UnknownAttribute(name) => write!(f, "unknown attribute: '{name}'"),
            Self::UnknownRole(name) => write!(f, "unknown role: '{name}'"),
        }
    }
}

impl std::error::Error for SelectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_and_hash_ids() {
        assert_eq!(Selector::parse("row-3").unwrap(), Selector::TestId("row-3".into()));
        assert_eq!(Selector::parse("#header").unwrap(), Selector::TestId("header".into()));
    }

    #[test]
    fn test_parse_attributes() {
        assert_eq!(
            Selector::parse("[data-testid='panel-1']").unwrap(),
            Selector::TestId("panel-1".into())
        );
        assert_eq!(
            Selector::parse("[aria-label=\"Gojira (1954)\"]").unwrap(),
            Selector::Label("Gojira (1954)".into())
        );
        assert_eq!(
            Selector::parse("[role=listitem]").unwrap(),
            Selector::Role(AccessibleRole::ListItem)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("#"), Err(SelectorError::ExpectedIdentifier));
        assert_eq!(Selector::parse("row 3"), Err(SelectorError::UnexpectedChar(' ')));
        assert_eq!(
            Selector::parse("[data-testid='x'"),
            Err(SelectorError::UnclosedAttribute)
        );
        assert_eq!(Selector::parse("[data-testid]"), Err(SelectorError::InvalidAttribute));
        assert!(matches!(
            Selector::parse("[class='x']"),
            Err(SelectorError::UnknownAttribute(_))
        ));
        assert!(matches!(
            Selector::parse("[role='slider']"),
            Err(SelectorError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(SelectorError::Empty.to_string(), "empty selector");
        assert_eq!(
            SelectorError::UnknownRole("slider".into()).to_string(),
            "unknown role: 'slider'"
        );
    }
}
