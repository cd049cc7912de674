//! Best-effort scrape of public Teamlyzer company pages.
//!
//! The markup changes without notice, so every extraction walks a fallback
//! selector chain and degrades to nothing instead of failing the command.
//! Only transport failures propagate.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, warn};

const TEAMLYZER_BASE: &str = "https://pt.teamlyzer.com/companies";
const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const RATING_SELECTORS: &[&str] = &[
    ".company-rating",
    ".rating-value",
    "span.rating",
    ".score",
];
const DESCRIPTION_SELECTORS: &[&str] = &[
    ".company-description",
    ".description",
    "section.about p",
];
const BENEFIT_SELECTORS: &[&str] = &[
    ".benefits li",
    ".company-benefits li",
    "ul.benefits-list li",
];

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

/// Review data for one company, with every field best-effort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyReviews {
    pub company: String,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub benefits: Vec<String>,
}

/// Fetch and parse the public review page for `company`.
pub fn fetch_company_reviews(company: &str, timeout_secs: u64) -> Result<CompanyReviews> {
    let url = format!("{TEAMLYZER_BASE}/{}", slugify(company));
    debug!(%url, "fetching reviews page");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(DESKTOP_UA)
        .build()?;
    let html = client
        .get(&url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .with_context(|| format!("fetching {url}"))?;
    Ok(extract_reviews(company, &html))
}

/// Company names become URL slugs the way the review site builds them:
/// lowercased, Portuguese accents folded, anything else collapsed to
/// single dashes.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.to_lowercase().chars().map(fold_accent) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ã' | 'â' => 'a',
        'é' | 'ê' => 'e',
        'í' => 'i',
        'ó' | 'õ' | 'ô' => 'o',
        'ú' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}

fn extract_reviews(company: &str, html: &str) -> CompanyReviews {
    let document = Html::parse_document(html);
    let rating = extract_rating(&document);
    if rating.is_none() {
        warn!(company, "no rating found on the reviews page");
    }
    let description = first_text(&document, DESCRIPTION_SELECTORS);
    if description.is_none() {
        warn!(company, "no description found on the reviews page");
    }
    let benefits = collect_texts(&document, BENEFIT_SELECTORS);
    if benefits.is_empty() {
        warn!(company, "no benefits found on the reviews page");
    }
    CompanyReviews {
        company: company.to_string(),
        rating,
        description,
        benefits,
    }
}

fn extract_rating(document: &Html) -> Option<f64> {
    let text = first_text(document, RATING_SELECTORS)?;
    let token = RATING_RE.find(&text)?;
    token.as_str().replace(',', ".").parse().ok()
}

/// First non-empty text match across a fallback selector chain.
fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector in selectors {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        if let Some(element) = document.select(&parsed).next() {
            let text = clean_text(&element.text().collect::<String>());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// All non-empty text matches of the first selector that yields any.
fn collect_texts(document: &Html, selectors: &[&str]) -> Vec<String> {
    for selector in selectors {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        let items: Vec<String> = document
            .select(&parsed)
            .map(|element| clean_text(&element.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect();
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Tests ──
