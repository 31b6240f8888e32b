/// Data models for portfolio content
///
/// Records are loaded once and never mutated afterwards. Field names follow
/// the content file's camelCase convention.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    pub year: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub content: Option<String>,
    pub date: String, // "Dec 2025"
    pub read_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl BlogPost {
    /// Parse the display date into the first day of that month
    ///
    /// Accepts "Dec 2025" and "December 2025". Returns None for anything else.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let with_day = format!("1 {}", self.date.trim());
        NaiveDate::parse_from_str(&with_day, "%d %b %Y")
            .or_else(|_| NaiveDate::parse_from_str(&with_day, "%d %B %Y"))
            .ok()
    }

    /// The post body, trimmed, if there is one worth showing
    pub fn body(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|body| !body.is_empty())
    }
}

/// One titled block of a project's long description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String, // still includes the bullet lines
    pub bullets: Option<Vec<String>>,
}

/// How a section is meant to be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionBody<'a> {
    Bullets(&'a [String]),
    Paragraph(&'a str),
}

impl Section {
    /// Bullets when any were found, the plain content otherwise
    pub fn body(&self) -> SectionBody<'_> {
        match &self.bullets {
            Some(bullets) => SectionBody::Bullets(bullets),
            None => SectionBody::Paragraph(&self.content),
        }
    }
}
