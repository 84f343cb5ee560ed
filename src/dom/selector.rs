use std::fmt;

/// The subset of CSS selectors the page scripts rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag[attr="value"]`
    Attribute {
        tag: String,
        name: String,
        value: String,
    },
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }

    pub fn attribute(
        tag: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Selector::Attribute {
            tag: tag.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{}", id),
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Attribute { tag, name, value } => {
                write!(f, "{}[{}=\"{}\"]", tag, name, value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rendering() {
        assert_eq!(Selector::id("loggingLevel").to_string(), "#loggingLevel");
        assert_eq!(Selector::class("notifications").to_string(), ".notifications");
        assert_eq!(
            Selector::attribute("tr", "data-mac", "aa:bb:cc:dd:ee:ff").to_string(),
            "tr[data-mac=\"aa:bb:cc:dd:ee:ff\"]"
        );
    }
}
