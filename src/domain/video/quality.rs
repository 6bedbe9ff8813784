// SPDX-License-Identifier: MPL-2.0
//! Quality options and source resolution.
//!
//! A player is fed either a single URL or a set of quality variants. Both are
//! resolved into a [`QualityList`] ordered highest level first, whose head is
//! the source the player starts with.

use crate::config::{SINGLE_SOURCE_LABEL, SINGLE_SOURCE_LEVEL};

/// One selectable source variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualityOption {
    /// Display label (e.g. "1080p").
    pub label: String,
    /// Direct URL to the media file.
    pub url: String,
    /// Numeric level used for ordering; higher is better.
    pub level: i32,
}

impl QualityOption {
    pub fn new(label: impl Into<String>, url: impl Into<String>, level: i32) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            level,
        }
    }
}

/// Source specification handed to the player by its host.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    /// A single URL, exposed as one "Auto" quality.
    Single(String),
    /// Quality variants in any order.
    Qualities(Vec<QualityOption>),
}

impl From<&str> for SourceSpec {
    fn from(url: &str) -> Self {
        SourceSpec::Single(url.to_string())
    }
}

impl From<Vec<QualityOption>> for SourceSpec {
    fn from(options: Vec<QualityOption>) -> Self {
        SourceSpec::Qualities(options)
    }
}

/// Canonically ordered quality options (level descending).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityList {
    options: Vec<QualityOption>,
}

impl QualityList {
    /// Resolves a source specification. The sort is stable, so options sharing
    /// a level keep the order the host supplied.
    #[must_use]
    pub fn resolve(source: &SourceSpec) -> Self {
        let mut options = match source {
            SourceSpec::Single(url) => vec![QualityOption::new(
                SINGLE_SOURCE_LABEL,
                url.clone(),
                SINGLE_SOURCE_LEVEL,
            )],
            SourceSpec::Qualities(options) => options.clone(),
        };
        options.sort_by(|a, b| b.level.cmp(&a.level));
        Self { options }
    }

    /// The highest quality, used as the initial source.
    #[must_use]
    pub fn preferred(&self) -> Option<&QualityOption> {
        self.options.first()
    }

    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&QualityOption> {
        self.options.iter().find(|o| o.label == label)
    }

    #[must_use]
    pub fn contains(&self, option: &QualityOption) -> bool {
        self.options.contains(option)
    }

    /// Whether a quality menu is worth showing.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.options.len() > 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QualityOption> {
        self.options.iter()
    }
}
