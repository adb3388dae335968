//! Article lookup for WikiSearch.
//!
//! `ArticleStore` is the seam between the search controller and the remote
//! encyclopedia. `WikipediaClient` implements it against the MediaWiki Action API.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::types::article::ArticleResult;
use crate::types::errors::LookupError;
use crate::types::language::Language;

/// Trait defining the remote article lookup.
pub trait ArticleStore {
    /// Looks up the article for `query` in the given wiki edition.
    ///
    /// "No such article" and "ambiguous title" are `Ok` results; only
    /// transport problems and unusable responses are errors.
    fn lookup(&self, query: &str, language_code: &str) -> Result<ArticleResult, LookupError>;
}

/// What a single page query said about a title.
#[derive(Debug, Clone, PartialEq)]
pub enum PageProbe {
    Missing,
    Disambiguation { title: String },
    Article { title: String, text: String },
}

// --- MediaWiki response shapes (formatversion=2) ---

#[derive(Debug, Deserialize)]
struct ApiResponse<Q> {
    query: Option<Q>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Link {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

fn decode<Q: for<'de> Deserialize<'de>>(body: &str) -> Result<Q, LookupError> {
    let response: ApiResponse<Q> = serde_json::from_str(body).map_err(|e| {
        LookupError::MalformedResponse(format!(
            "{} (first 200 chars: {})",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })?;

    if let Some(err) = response.error {
        return Err(LookupError::MalformedResponse(format!(
            "API error {}: {}",
            err.code, err.info
        )));
    }

    response
        .query
        .ok_or_else(|| LookupError::MalformedResponse("response has no query object".to_string()))
}

/// Parses the answer to a `prop=extracts|pageprops` query for one title.
pub fn parse_page_response(body: &str) -> Result<PageProbe, LookupError> {
    let query: PagesQuery = decode(body)?;
    let Some(page) = query.pages.into_iter().next() else {
        return Ok(PageProbe::Missing);
    };

    if page.missing || page.invalid {
        return Ok(PageProbe::Missing);
    }

    let is_disambiguation = page
        .pageprops
        .as_ref()
        .map_or(false, |props| props.disambiguation.is_some());
    if is_disambiguation {
        return Ok(PageProbe::Disambiguation { title: page.title });
    }

    Ok(PageProbe::Article {
        title: page.title,
        text: page.extract.unwrap_or_default(),
    })
}

/// Parses a `list=search` answer into the best-matching title, if any.
pub fn parse_search_response(body: &str) -> Result<Option<String>, LookupError> {
    let query: SearchQuery = decode(body)?;
    Ok(query.search.into_iter().next().map(|hit| hit.title))
}

/// Parses a `prop=links` answer into link titles, in the order received.
pub fn parse_links_response(body: &str) -> Result<Vec<String>, LookupError> {
    let query: PagesQuery = decode(body)?;
    Ok(query
        .pages
        .into_iter()
        .flat_map(|page| page.links)
        .map(|link| link.title)
        .collect())
}

/// `ArticleStore` backed by the public Wikipedia API.
pub struct WikipediaClient {
    client: Client,
    service_domain: String,
    api_base: Option<String>,
}

impl WikipediaClient {
    /// Creates a client for `https://<code>.<service_domain>/w/api.php`.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(service_domain: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent(concat!("wikisearch/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            service_domain: service_domain.to_string(),
            api_base: None,
        })
    }

    /// Sends requests to `<base>/<code>/api.php` instead of the public wikis.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into().trim_end_matches('/').to_string());
        self
    }

    /// API endpoint for one wiki edition.
    pub fn api_url(&self, language: Language) -> String {
        match &self.api_base {
            Some(base) => format!("{}/{}/api.php", base, language.code()),
            None => format!("https://{}.{}/w/api.php", language.code(), self.service_domain),
        }
    }

    fn get(&self, language: Language, params: &[(&str, &str)]) -> Result<String, LookupError> {
        let url = self.api_url(language);
        let response = self
            .client
            .get(&url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .map_err(|e| LookupError::Transport(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!("{}: HTTP {}", url, status)));
        }

        response
            .text()
            .map_err(|e| LookupError::Transport(format!("{}: {}", url, e)))
    }

    fn probe(&self, language: Language, title: &str) -> Result<PageProbe, LookupError> {
        let body = self.get(
            language,
            &[
                ("prop", "extracts|pageprops"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("ppprop", "disambiguation"),
                ("titles", title),
            ],
        )?;
        parse_page_response(&body)
    }

    fn suggest(&self, language: Language, query: &str) -> Result<Option<String>, LookupError> {
        let body = self.get(
            language,
            &[("list", "search"), ("srsearch", query), ("srlimit", "1")],
        )?;
        parse_search_response(&body)
    }

    fn disambiguation_options(
        &self,
        language: Language,
        title: &str,
    ) -> Result<Vec<String>, LookupError> {
        let body = self.get(
            language,
            &[
                ("prop", "links"),
                ("plnamespace", "0"),
                ("pllimit", "max"),
                ("titles", title),
            ],
        )?;
        parse_links_response(&body)
    }

    fn resolve(&self, language: Language, probe: PageProbe) -> Result<ArticleResult, LookupError> {
        match probe {
            PageProbe::Missing => Ok(ArticleResult::NotFound),
            PageProbe::Article { title, text } => {
                tracing::debug!("found article {:?} ({} bytes)", title, text.len());
                Ok(ArticleResult::Found { text })
            }
            PageProbe::Disambiguation { title } => {
                let options = self.disambiguation_options(language, &title)?;
                tracing::debug!("{:?} is ambiguous: {} options", title, options.len());
                if options.is_empty() {
                    Ok(ArticleResult::NotFound)
                } else {
                    Ok(ArticleResult::Ambiguous { options })
                }
            }
        }
    }
}

impl ArticleStore for WikipediaClient {
    fn lookup(&self, query: &str, language_code: &str) -> Result<ArticleResult, LookupError> {
        let language = Language::parse(language_code)
            .ok_or_else(|| LookupError::UnsupportedLanguage(language_code.to_string()))?;

        let probe = self.probe(language, query)?;
        if probe != PageProbe::Missing {
            return self.resolve(language, probe);
        }

        // No exact title: fall back to the search engine's best match.
        match self.suggest(language, query)? {
            Some(suggestion) if suggestion != query => {
                tracing::debug!("{:?} not found, trying suggestion {:?}", query, suggestion);
                let probe = self.probe(language, &suggestion)?;
                self.resolve(language, probe)
            }
            _ => Ok(ArticleResult::NotFound),
        }
    }
}
