//! The static table of security rule categories.

use std::fmt;

/// Topic group a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Access,
    Data,
    Input,
    Platform,
    Operations,
}

impl Group {
    /// Short prefix used to build display codes such as `AC-01`.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Access => "AC",
            Self::Data => "DA",
            Self::Input => "IN",
            Self::Platform => "PL",
            Self::Operations => "OP",
        }
    }

    /// Human readable group name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Access => "Access",
            Self::Data => "Data",
            Self::Input => "Input",
            Self::Platform => "Platform",
            Self::Operations => "Operations",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One security rule topic.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Category {
    pub id: &'static str,
    pub number: u8,
    pub title: &'static str,
    pub group: Group,
}

impl Category {
    const fn new(id: &'static str, group: Group, number: u8, title: &'static str) -> Self {
        Self {
            id,
            number,
            title,
            group,
        }
    }

    /// Short label combining the group prefix and number, e.g. `IN-01`.
    pub fn display_code(&self) -> String {
        format!("{}-{:02}", self.group.prefix(), self.number)
    }
}

/// Every category known to the tool, in presentation order.
pub static CATEGORIES: &[Category] = &[
    Category::new("access-control", Group::Access, 1, "Broken Access Control"),
    Category::new(
        "authentication",
        Group::Access,
        2,
        "Identification and Authentication Failures",
    ),
    Category::new("cryptography", Group::Data, 1, "Cryptographic Failures"),
    Category::new(
        "data-integrity",
        Group::Data,
        2,
        "Software and Data Integrity Failures",
    ),
    Category::new("injection", Group::Input, 1, "Injection"),
    Category::new("ssrf", Group::Input, 2, "Server-Side Request Forgery"),
    Category::new("insecure-design", Group::Platform, 1, "Insecure Design"),
    Category::new(
        "misconfiguration",
        Group::Platform,
        2,
        "Security Misconfiguration",
    ),
    Category::new(
        "vulnerable-components",
        Group::Platform,
        3,
        "Vulnerable and Outdated Components",
    ),
    Category::new(
        "logging-monitoring",
        Group::Operations,
        1,
        "Security Logging and Monitoring Failures",
    ),
];

/// Looks up a category by id.
pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Ids of every known category, in presentation order.
pub fn all_category_ids() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.id.to_string()).collect()
}
