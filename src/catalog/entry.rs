//! Catalog entry definitions
//!
//! An [`Entry`] is built once per matching catalog link, fully populated,
//! and never mutated afterwards.

use crate::url::is_absolute;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Detail-page link shape: `.../cards/<author_id>/card<title_id>.html`
const CARD_LINK_PATTERN: &str = r"^.*/cards/([0-9]+)/card([0-9]+)\.html$";

fn card_link_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(CARD_LINK_PATTERN).expect("card link pattern is valid"))
}

/// Author and title identifiers taken from one detail-page link
///
/// Both identifiers come from a single pattern match, so a `CardLink` always
/// carries both or does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardLink {
    author_id: String,
    title_id: String,
}

impl CardLink {
    /// Matches an href against the detail-page link pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use aozora_collector::CardLink;
    ///
    /// let link = CardLink::parse("../cards/000879/card127.html").unwrap();
    /// assert_eq!(link.author_id(), "000879");
    /// assert_eq!(link.title_id(), "127");
    ///
    /// assert!(CardLink::parse("../index_pages/person879.html").is_none());
    /// ```
    pub fn parse(href: &str) -> Option<Self> {
        let captures = card_link_regex().captures(href)?;
        Some(Self {
            author_id: captures.get(1)?.as_str().to_string(),
            title_id: captures.get(2)?.as_str().to_string(),
        })
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// Builds the canonical detail-page URL under `site_root`
    ///
    /// Raw hrefs differ in case and path depth, so the location is always
    /// rebuilt from the identifiers.
    pub fn detail_url(&self, site_root: &str) -> String {
        format!(
            "{}/cards/{}/card{}.html",
            site_root.trim_end_matches('/'),
            self.author_id,
            self.title_id
        )
    }
}

/// Outcome of fetching a work's detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The detail page was fetched and inspected
    Resolved,
    /// The detail page could not be fetched
    Failed { reason: String },
}

impl Resolution {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What the resolver found on a detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDetail {
    /// Author display name, empty if the page layout was not recognized
    pub author: String,
    /// Absolute archive URL, if the page links one
    pub archive_location: Option<String>,
}

/// One resolved catalog work
///
/// Entries are only built during discovery, so the archive location is
/// always absolute when present:
///
/// ```compile_fail
/// use aozora_collector::catalog::ResolvedDetail;
/// use aozora_collector::{CardLink, Entry};
///
/// let entry = Entry::resolved(
///     CardLink::parse("../cards/000879/card127.html").unwrap(),
///     "羅生門",
///     "https://www.aozora.gr.jp/cards/000879/card127.html".to_string(),
///     ResolvedDetail::default(),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    author_id: String,
    author: String,
    title_id: String,
    title: String,
    detail_page_location: String,
    archive_location: Option<String>,
    resolution: Resolution,
}

impl Entry {
    /// Creates an entry from a successfully resolved detail page
    ///
    /// An archive location that is not an absolute HTTP(S) URL is dropped.
    pub(crate) fn resolved(
        link: CardLink,
        title: impl Into<String>,
        detail_page_location: String,
        detail: ResolvedDetail,
    ) -> Self {
        let archive_location = detail.archive_location.filter(|location| {
            let absolute = is_absolute(location);
            if !absolute {
                tracing::warn!("Ignoring relative archive location '{}'", location);
            }
            absolute
        });

        Self {
            author_id: link.author_id,
            author: detail.author,
            title_id: link.title_id,
            title: title.into(),
            detail_page_location,
            archive_location,
            resolution: Resolution::Resolved,
        }
    }

    /// Creates an entry whose detail page could not be resolved
    ///
    /// The entry keeps its identifiers and title; author and archive stay empty.
    pub(crate) fn unresolved(
        link: CardLink,
        title: impl Into<String>,
        detail_page_location: String,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            author_id: link.author_id,
            author: String::new(),
            title_id: link.title_id,
            title: title.into(),
            detail_page_location,
            archive_location: None,
            resolution: Resolution::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail_page_location(&self) -> &str {
        &self.detail_page_location
    }

    pub fn archive_location(&self) -> Option<&str> {
        self.archive_location.as_deref()
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} [{}-{}] {}",
            self.author,
            self.title,
            self.author_id,
            self.title_id,
            self.archive_location.as_deref().unwrap_or("(no archive)")
        )
    }
}
