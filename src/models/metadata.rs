// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Site-wide head metadata: titles, Open Graph preview and crawler directives.

/// Default and templated page titles.
#[derive(Debug, Clone)]
pub struct TitleConfig {
    pub default: String,
    /// `%s` is replaced by the page title.
    pub template: String,
}

#[derive(Debug, Clone)]
pub struct OpenGraphImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub images: Vec<OpenGraphImage>,
    pub locale: String,
    pub kind: String,
}

/// Googlebot-specific limits. `-1` means unlimited.
#[derive(Debug, Clone)]
pub struct GoogleBotDirectives {
    pub index: bool,
    pub follow: bool,
    pub noimageindex: bool,
    pub max_snippet: i32,
    pub max_image_preview: String,
    pub max_video_preview: i32,
}

#[derive(Debug, Clone)]
pub struct RobotsDirectives {
    pub index: bool,
    pub follow: bool,
    pub nocache: bool,
    pub google_bot: GoogleBotDirectives,
}

#[derive(Debug, Clone)]
pub struct Author {
    pub name: String,
    pub url: String,
}

/// Static metadata block rendered into every page head.
#[derive(Debug, Clone)]
pub struct SiteMetadata {
    pub title: TitleConfig,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub open_graph: OpenGraph,
    pub robots: RobotsDirectives,
    pub authors: Vec<Author>,
    pub publisher: String,
}

const SITE_NAME: &str = "PaperHearts";
const DEFAULT_TITLE: &str = "PaperHearts | Handmade Art for Every Heart & Community";
const DESCRIPTION: &str = "PaperHearts creates unique handmade art and fosters community \
     through engaging activities like origami, rock painting, and more. Join us and make a \
     difference with handmade gifts!";
const KEYWORDS: [&str; 13] = [
    "PaperHearts",
    "handmade art",
    "community art",
    "origami",
    "crafts",
    "art workshops",
    "local community",
    "creative activities",
    "non-profit art",
    "volunteer art",
    "foster care activities",
    "elderly art programs",
    "youth art initiatives",
];

impl SiteMetadata {
    /// The PaperHearts metadata with canonical URLs rooted at `site_url`.
    pub fn paperhearts(site_url: &str) -> Self {
        let canonical = format!("{}/", site_url.trim_end_matches('/'));

        Self {
            title: TitleConfig {
                default: DEFAULT_TITLE.to_string(),
                template: format!("%s | {SITE_NAME}"),
            },
            description: DESCRIPTION.to_string(),
            keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
            canonical: canonical.clone(),
            open_graph: OpenGraph {
                title: DEFAULT_TITLE.to_string(),
                description: DESCRIPTION.to_string(),
                url: canonical.clone(),
                site_name: SITE_NAME.to_string(),
                images: vec![OpenGraphImage {
                    url: "https://placehold.co/1200x630/A0BBE0/FFFFFF?text=Public+Image"
                        .to_string(),
                    width: 1200,
                    height: 630,
                    alt: "PaperHearts Community Art & Connection - Bringing joy through \
                          handmade crafts"
                        .to_string(),
                }],
                locale: "en_US".to_string(),
                kind: "website".to_string(),
            },
            robots: RobotsDirectives {
                index: true,
                follow: true,
                nocache: true,
                google_bot: GoogleBotDirectives {
                    index: true,
                    follow: true,
                    noimageindex: false,
                    max_snippet: -1,
                    max_image_preview: "large".to_string(),
                    max_video_preview: -1,
                },
            },
            authors: vec![Author {
                name: SITE_NAME.to_string(),
                url: canonical,
            }],
            publisher: SITE_NAME.to_string(),
        }
    }

    /// Document title for a page, or the site default when the page has none.
    pub fn resolve_title(&self, page_title: Option<&str>) -> String {
        match page_title {
            Some(title) if !title.is_empty() => self.title.template.replace("%s", title),
            _ => self.title.default.clone(),
        }
    }

    pub fn keywords_content(&self) -> String {
        self.keywords.join(", ")
    }
}

impl RobotsDirectives {
    /// Value of the `robots` meta tag.
    pub fn content(&self) -> String {
        let mut parts = vec![index_flag(self.index), follow_flag(self.follow)];
        if self.nocache {
            parts.push("nocache".to_string());
        }
        parts.join(", ")
    }
}

impl GoogleBotDirectives {
    /// Value of the `googlebot` meta tag.
    pub fn content(&self) -> String {
        let mut parts = vec![index_flag(self.index), follow_flag(self.follow)];
        if self.noimageindex {
            parts.push("noimageindex".to_string());
        }
        parts.push(format!("max-video-preview:{}", self.max_video_preview));
        parts.push(format!("max-image-preview:{}", self.max_image_preview));
        parts.push(format!("max-snippet:{}", self.max_snippet));
        parts.join(", ")
    }
}

fn index_flag(index: bool) -> String {
    let flag = if index { "index" } else { "noindex" };
    flag.to_string()
}

fn follow_flag(follow: bool) -> String {
    let flag = if follow { "follow" } else { "nofollow" };
    flag.to_string()
}
