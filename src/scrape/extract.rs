//! Per-field lookups over a single pinned-item fragment of a profile page.
//!
//! Every lookup is independent and returns `None` when its sub-element or
//! attribute is missing, so one absent field never hides the others.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector must parse")
}

static PINNED_ITEM: Lazy<Selector> = Lazy::new(|| selector(".pinned-item-list-item.public"));
static OWNER: Lazy<Selector> = Lazy::new(|| selector(".owner"));
static REPO: Lazy<Selector> = Lazy::new(|| selector(".repo"));
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector(".pinned-item-desc"));
static LANGUAGE: Lazy<Selector> = Lazy::new(|| selector(r#"[itemprop="programmingLanguage"]"#));
static LANGUAGE_COLOR: Lazy<Selector> = Lazy::new(|| selector(".repo-language-color"));
static STARGAZERS: Lazy<Selector> = Lazy::new(|| selector(r#"a[href$="/stargazers"]"#));
static FORKS: Lazy<Selector> =
    Lazy::new(|| selector(r#"a[href$="/network/members"], a[href$="/forks"]"#));

/// Raw fields of one pinned item, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub language_color: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
}

/// Extract the fields of every public pinned item in `html`, in page order.
pub fn extract_pinned(html: &str) -> Vec<EntryFields> {
    let document = Html::parse_document(html);
    let items: Vec<EntryFields> = document.select(&PINNED_ITEM).map(extract_fields).collect();
    items
}

pub fn extract_fields(item: ElementRef<'_>) -> EntryFields {
    EntryFields {
        owner: owner(item),
        repo: repo(item),
        description: description(item),
        language: language(item),
        language_color: language_color(item),
        stars: stars(item),
        forks: forks(item),
    }
}

pub fn owner(item: ElementRef<'_>) -> Option<String> {
    scoped_text(item, &OWNER)
}

pub fn repo(item: ElementRef<'_>) -> Option<String> {
    scoped_text(item, &REPO)
}

pub fn description(item: ElementRef<'_>) -> Option<String> {
    scoped_text(item, &DESCRIPTION)
}

pub fn language(item: ElementRef<'_>) -> Option<String> {
    scoped_text(item, &LANGUAGE)
}

/// The swatch colour is declared inline, e.g. `style="background-color: #00ADD8"`.
pub fn language_color(item: ElementRef<'_>) -> Option<String> {
    let style = item.select(&LANGUAGE_COLOR).next()?.value().attr("style")?;
    style_property(style, "background-color")
}

pub fn stars(item: ElementRef<'_>) -> Option<u64> {
    scoped_text(item, &STARGAZERS).and_then(|text| parse_count(&text))
}

pub fn forks(item: ElementRef<'_>) -> Option<u64> {
    scoped_text(item, &FORKS).and_then(|text| parse_count(&text))
}

fn scoped_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Value of one declaration in an inline `style` attribute.
pub fn style_property(style: &str, property: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a displayed counter such as `12`, `1,024` or `1.2k`.
pub fn parse_count(text: &str) -> Option<u64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect::<String>()
        .to_ascii_lowercase();

    let (number, scale) = match cleaned.strip_suffix('k') {
        Some(n) => (n, 1_000.0),
        None => match cleaned.strip_suffix('m') {
            Some(n) => (n, 1_000_000.0),
            None => return cleaned.parse().ok(),
        },
    };

    let value: f64 = number.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * scale).round() as u64)
}
