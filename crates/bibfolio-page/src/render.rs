//! HTML page rendering
//!
//! Builds the publications page as one self-contained document: embedded
//! CSS, a sticky topic filter bar, a searchable sidebar year index, one
//! collapsible section per year, and (in the default mode) the
//! card-filtering script. Markup is assembled with plain string building;
//! every dynamic value passes through [`escape_html`].
//!
//! The filter checkboxes are emitted as top-level siblings of `<main>`, so
//! the no-JS mode can drive card visibility with CSS sibling rules alone.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use bibfolio_bibtex::UNKNOWN_YEAR;
use regex::Regex;

use crate::category::Category;
use crate::classify::Publication;

/// Presentation options for [`render_page`].
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Document title.
    pub title: String,
    /// Author name bolded in author lines ("First Last" or "Last, First").
    pub highlight_author: Option<String>,
    /// Filter cards with a script (default) or with CSS sibling rules only.
    pub js_filters: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Publications".to_string(),
            highlight_author: None,
            js_filters: true,
        }
    }
}

/// A rendered page plus the counts reported to the caller.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    /// Retained entries on the page (preprints already removed).
    pub entry_count: usize,
    /// Year sections, including `Unknown` if present.
    pub year_count: usize,
}

/// Group publications by normalized year, newest first, `Unknown` last.
pub fn group_by_year(publications: &[Publication]) -> Vec<(String, Vec<&Publication>)> {
    let mut by_year: BTreeMap<String, Vec<&Publication>> = BTreeMap::new();
    for publication in publications {
        by_year
            .entry(publication.entry.year.clone())
            .or_default()
            .push(publication);
    }
    let mut groups: Vec<(String, Vec<&Publication>)> = by_year.into_iter().collect();
    groups.sort_by_key(|(year, _)| year_sort_key(year));
    groups
}

fn year_sort_key(year: &str) -> (bool, Reverse<i32>) {
    (
        year == UNKNOWN_YEAR,
        Reverse(year.parse::<i32>().unwrap_or(0)),
    )
}

/// Render the full page.
pub fn render_page(publications: &[Publication], options: &PageOptions) -> RenderedPage {
    let groups = group_by_year(publications);
    let highlight = options
        .highlight_author
        .as_deref()
        .and_then(highlight_pattern);

    let mut css = String::new();
    css.push_str(BASE_CSS);
    css.push_str(&topic_button_css());
    css.push_str(&topic_card_css());
    if !options.js_filters {
        css.push_str(&css_sibling_filter_rules());
    }

    let mut sections = String::new();
    let mut counter = 0usize;
    for (year, group) in &groups {
        let mut sorted = group.clone();
        sorted.sort_by_key(|publication| {
            publication.entry.title().unwrap_or("").to_lowercase()
        });

        let mut cards = String::new();
        for publication in sorted {
            counter += 1;
            cards.push_str(&render_card(publication, year, counter, highlight.as_ref()));
        }
        sections.push_str(&render_year_section(year, &cards, group.len()));
    }

    let actions = if options.js_filters {
        concat!(
            "    <span class=\"actions\">\n",
            "      <button id=\"btnAll\">All</button>\n",
            "      <button id=\"btnNone\">None</button>\n",
            "    </span>\n"
        )
        .to_string()
    } else {
        String::new()
    };

    let search = if options.js_filters {
        "      <input id=\"yearSearch\" class=\"year-search\" type=\"search\" placeholder=\"Filter years…\" aria-label=\"Filter years\" />\n"
            .to_string()
    } else {
        String::new()
    };

    let script = if options.js_filters {
        format!("<script>\n{}</script>\n", filter_script())
    } else {
        String::new()
    };

    let html = format!(
        r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>
{css}
  </style>
</head>
<body id="top">
{inputs}<header>
  <div class="wrap">
    <strong>Topic filters</strong>
{actions}  </div>
</header>
<div class="filters" aria-label="Topic filters">
{labels}</div>
<main>
  <aside>
    <div class="aside-card">
      <h3>Jump to year</h3>
{search}      <div class="years-list">
{links}      </div>
    </div>
  </aside>
  <div>
{sections}  </div>
</main>
<a href="#top" id="toTop" title="Back to top">Top</a>
<div class="footer">Auto-generated from BibTeX.</div>
{script}</body>
</html>
"##,
        title = escape_html(&options.title),
        css = css,
        inputs = filter_inputs(),
        actions = actions,
        labels = filter_labels(),
        search = search,
        links = year_links(&groups),
        sections = sections,
        script = script,
    );

    RenderedPage {
        html,
        entry_count: publications.len(),
        year_count: groups.len(),
    }
}

/// Escape text for HTML element and attribute positions.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build the pattern that bolds the highlighted author inside an escaped
/// author line. Accepts "Last, First" or "First Last" and matches both
/// written forms.
fn highlight_pattern(name: &str) -> Option<Regex> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let (first, last) = if let Some((last, first)) = name.split_once(',') {
        (first.trim(), last.trim())
    } else if let Some((first, last)) = name.rsplit_once(' ') {
        (first.trim(), last.trim())
    } else {
        return Regex::new(&format!("({})", regex::escape(name))).ok();
    };
    if first.is_empty() || last.is_empty() {
        return None;
    }

    Regex::new(&format!(
        r"({last},\s*{first}|{first}\s+{last})",
        first = regex::escape(first),
        last = regex::escape(last),
    ))
    .ok()
}

fn author_line(author: &str, highlight: Option<&Regex>) -> String {
    if author.is_empty() {
        return String::new();
    }
    let escaped = escape_html(author);
    match highlight {
        Some(pattern) => pattern.replace_all(&escaped, "<b>$1</b>").to_string(),
        None => escaped,
    }
}

fn render_card(
    publication: &Publication,
    year: &str,
    counter: usize,
    highlight: Option<&Regex>,
) -> String {
    let entry = &publication.entry;
    let category = publication.category;

    let title = escape_html(entry.title().unwrap_or("Untitled"));
    let authors = author_line(entry.author().unwrap_or(""), highlight);

    let venue = [
        entry.journal(),
        entry.booktitle(),
        entry.institution(),
        entry.publisher(),
        entry.organization(),
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.is_empty())
    .unwrap_or("");

    let mut meta_parts: Vec<String> = Vec::new();
    if !venue.is_empty() {
        meta_parts.push(escape_html(venue));
    }
    if let Some(volume) = entry.volume().filter(|v| !v.is_empty()) {
        meta_parts.push(format!("Vol. {}", escape_html(volume)));
    }
    if let Some(number) = entry.number().filter(|v| !v.is_empty()) {
        meta_parts.push(format!("No. {}", escape_html(number)));
    }
    if let Some(pages) = entry.pages().filter(|v| !v.is_empty()) {
        meta_parts.push(format!("pp. {}", escape_html(pages)));
    }
    let meta = meta_parts.join(" • ");

    let mut meta_line = authors;
    if !meta.is_empty() {
        meta_line.push_str(" • ");
        meta_line.push_str(&meta);
    }

    let key = if entry.key.is_empty() {
        format!("k{}", counter)
    } else {
        entry.key.clone()
    };
    let bib_id = format!("bib-{}-{}", escape_html(year), counter);

    format!(
        r#"<div class="cat-{cls}">
<article class="card" data-year="{year}" data-type="{etype}" data-category="{cat}">
  <div class="title">{title}</div>
  <div class="meta">{meta_line}</div>
  <div class="chips">
    <span class="chip cat">{cat}</span>
    <span class="chip">Key: {key}</span>
    <span class="chip">{etype}</span>
  </div>
  <input type="checkbox" id="{bib_id}" class="bib" />
  <label for="{bib_id}" class="biblabel">Show BibTeX</label>
  <pre class="bib">{raw}</pre>
</article>
</div>
"#,
        cls = category.css_class(),
        year = escape_html(year),
        etype = escape_html(&entry.entry_type),
        cat = category.as_str(),
        title = title,
        meta_line = meta_line,
        key = escape_html(&key),
        bib_id = bib_id,
        raw = escape_html(&entry.raw_bibtex),
    )
}

fn render_year_section(year: &str, cards: &str, count: usize) -> String {
    let year = escape_html(year);
    format!(
        r#"<section class="section" id="y-{year}">
  <input type="checkbox" id="cb-{year}" class="year" checked>
  <label for="cb-{year}" class="year-toggle">{year} <span class="badge">{count}</span></label>
  <div class="content">
{cards}  </div>
</section>
"#,
        year = year,
        cards = cards,
        count = count,
    )
}

/// Hidden filter state checkboxes, emitted before `<main>` so both the
/// per-category button styling and the no-JS card rules can reach their
/// targets with sibling selectors.
fn filter_inputs() -> String {
    let mut html = String::new();
    for category in Category::DISPLAY_ORDER {
        html.push_str(&format!(
            "<input type=\"checkbox\" id=\"filter-{}\" class=\"filter-state\" checked>\n",
            category.css_class()
        ));
    }
    html
}

fn filter_labels() -> String {
    let mut html = String::new();
    for category in Category::DISPLAY_ORDER {
        html.push_str(&format!(
            "  <span class=\"filter\"><label for=\"filter-{cls}\" data-cat=\"{name}\">{name}</label></span>\n",
            cls = category.css_class(),
            name = category.as_str(),
        ));
    }
    html
}

fn year_links(groups: &[(String, Vec<&Publication>)]) -> String {
    let mut html = String::new();
    for (year, group) in groups {
        let year = escape_html(year);
        html.push_str(&format!(
            "        <a href=\"#y-{year}\" data-year=\"{year}\">{year} <span class=\"badge\">{count}</span></a>\n",
            year = year,
            count = group.len(),
        ));
    }
    html
}

// Sticky offsets assume the default header and filter bar heights.
const BASE_CSS: &str = r#"
:root{--bg:#ffffff;--fg:#111827;--muted:#6b7280;--border:#e5e7eb;--header-h:64px;--filters-h:120px}
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Helvetica,Arial,sans-serif;background:#fff;color:#111827}

header{position:sticky;top:0;background:#fff;border-bottom:1px solid var(--border);z-index:1000}
header .wrap{display:flex;flex-wrap:wrap;gap:12px;align-items:center;padding:12px 16px}

.filter-state{position:absolute;left:-9999px;top:-9999px}
.filters{position:sticky;top:var(--header-h);z-index:999;display:flex;flex-wrap:wrap;gap:10px;align-items:center;padding:10px 16px;border-bottom:1px solid var(--border);background:#fff}
.filter{display:inline-flex;align-items:center;gap:6px;margin:4px}
.filter label{display:inline-block;padding:8px 12px;border:2px solid var(--border);border-radius:999px;background:#fff;color:#111827;cursor:pointer;font-weight:600}
.actions{display:inline-flex;gap:8px;margin-left:auto}
.actions button{padding:8px 12px;border:1px solid var(--border);border-radius:8px;background:#fff;color:#111827;cursor:pointer}
.actions button:hover{background:#f9fafb}

main{display:grid;grid-template-columns:280px 1fr;gap:20px;padding:20px}
@media(max-width:900px){main{grid-template-columns:1fr}aside{order:2}}

aside{position:sticky;top:calc(var(--header-h) + var(--filters-h));align-self:start}
.aside-card{background:#fff;border:1px solid var(--border);border-radius:12px;padding:12px}
.aside-card h3{margin:8px 0;font-size:14px;color:#6b7280}
.year-search{width:100%;padding:8px 10px;border:1px solid var(--border);border-radius:8px;margin-bottom:8px}
.years-list{max-height:calc(100vh - var(--header-h) - var(--filters-h) - 140px); overflow-y:auto; padding-right:6px}
.years-list a{display:flex;align-items:center;justify-content:space-between;padding:6px 8px;color:#111827;text-decoration:none;border-radius:6px}
.years-list a:hover{background:#f9fafb}
.years-list .badge{margin-left:10px}

.section{border:1px solid var(--border);border-radius:12px;background:#fff;margin-bottom:16px}
.section label.year-toggle{display:flex;align-items:center;justify-content:space-between;padding:10px 12px;font-weight:600;font-size:18px;border-bottom:1px dashed var(--border);cursor:pointer}
.section .content{padding:6px 12px}
.section input[type=checkbox].year{display:none}
.section input.year:not(:checked) ~ .content{display:none}

.card{border:1px solid var(--border);border-radius:12px;padding:12px;margin:12px 0;box-shadow:0 1px 2px rgba(0,0,0,0.04);background:#fff}
.card .title{font-weight:600;font-size:16px}
.card .meta{font-size:13px;color:#6b7280;margin-top:6px}
.chips{margin-top:6px;display:flex;gap:8px;flex-wrap:wrap}
.chip{font-size:12px;background:#f3f4f6;border:1px solid var(--border);color:#374151;padding:4px 8px;border-radius:999px}

.card input.bib{display:none}
.card input.bib + label.biblabel{font-size:12px;color:#111827;text-decoration:underline;cursor:pointer}
.card input.bib:not(:checked) + label.biblabel + pre.bib{display:none}
.card input.bib:checked + label.biblabel + pre.bib{display:block}
pre.bib{background:#f9fafb;color:#1f2937;border-radius:8px;padding:10px;overflow:auto;border:1px solid var(--border)}

.badge{background:#f3f4f6;border:1px solid var(--border);padding:2px 6px;border-radius:6px;font-size:12px;margin-left:6px}
#toTop{position:fixed;bottom:20px;right:20px;background:#111827;color:#fff;border:none;border-radius:999px;padding:10px 14px;box-shadow:0 2px 6px rgba(0,0,0,0.2);}
#toTop:hover{opacity:.9}
.hidden{display:none !important}
"#;

fn topic_button_css() -> String {
    let mut css = String::new();
    for category in Category::DISPLAY_ORDER {
        let color = category.color();
        let cls = category.css_class();
        let name = category.as_str();
        css.push_str(&format!(
            ".filter label[data-cat=\"{name}\"]{{border-color:{color}; color:{color}; background:#fff;}}\n",
        ));
        css.push_str(&format!(
            "#filter-{cls}:checked ~ .filters label[data-cat=\"{name}\"]{{background:{color}; border-color:{color}; color:#fff;}}\n",
        ));
    }
    css
}

fn topic_card_css() -> String {
    let mut css = String::new();
    for category in Category::DISPLAY_ORDER {
        let color = category.color();
        let tint = category.tint();
        let cls = category.css_class();
        css.push_str(&format!(
            ".cat-{cls} .chip.cat{{border-color:{color}; color:{color};}}\n",
        ));
        css.push_str(&format!(
            ".cat-{cls} .card{{border-left:6px solid {color}; background:{tint};}}\n",
        ));
    }
    css
}

/// Per-category visibility rules used when the page carries no script.
fn css_sibling_filter_rules() -> String {
    let mut css = String::new();
    for category in Category::DISPLAY_ORDER {
        css.push_str(&format!(
            "#filter-{cls}:not(:checked) ~ main .card[data-category='{name}']{{display:none}}\n",
            cls = category.css_class(),
            name = category.as_str(),
        ));
    }
    css
}

const FILTER_SCRIPT: &str = r#"(function(){
  const cats = [__CATS__];
  const idFor = c => 'filter-' + c.toLowerCase().replace(/[^a-z0-9]/g,'-');

  function applyFilters(){
    const states = {};
    cats.forEach(c=>{
      const cb = document.getElementById(idFor(c));
      states[c] = cb ? cb.checked : true;
    });
    document.querySelectorAll('.card').forEach(card=>{
      const cat = card.getAttribute('data-category');
      const show = (cat && states[cat] !== false);
      card.classList.toggle('hidden', !show);
    });
  }

  cats.forEach(c=>{
    const cb = document.getElementById(idFor(c));
    if(cb){ cb.addEventListener('change', applyFilters); }
  });

  const allBtn = document.getElementById('btnAll');
  const noneBtn = document.getElementById('btnNone');
  if(allBtn) allBtn.addEventListener('click', ()=>{ cats.forEach(c=>{ const cb=document.getElementById(idFor(c)); if(cb){ cb.checked=true; } }); applyFilters(); });
  if(noneBtn) noneBtn.addEventListener('click', ()=>{ cats.forEach(c=>{ const cb=document.getElementById(idFor(c)); if(cb){ cb.checked=false; } }); applyFilters(); });

  applyFilters();

  const ySearch = document.getElementById('yearSearch');
  const yLinks = Array.from(document.querySelectorAll('.years-list a'));
  function filterYears(){
    const q = (ySearch && ySearch.value || '').trim().toLowerCase();
    yLinks.forEach(a=>{
      const txt = a.getAttribute('data-year') || a.textContent || '';
      a.style.display = (!q || txt.toLowerCase().indexOf(q) !== -1) ? '' : 'none';
    });
  }
  if(ySearch){ ySearch.addEventListener('input', filterYears); }
})();
"#;

fn filter_script() -> String {
    let cats = Category::DISPLAY_ORDER
        .iter()
        .map(|category| format!("'{}'", category.as_str()))
        .collect::<Vec<String>>()
        .join(",");
    FILTER_SCRIPT.replace("__CATS__", &cats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibfolio_bibtex::parse;
    use crate::classify::classify_entries;

    fn publications(source: &str) -> Vec<Publication> {
        classify_entries(parse(source))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("AT&T <rocks>"), "AT&amp;T &lt;rocks&gt;");
        assert_eq!(escape_html("\"it's\""), "&quot;it&#x27;s&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_group_by_year_orders_newest_first_unknown_last() {
        let source = "@article{A,\n  title = {Old},\n  year = {1999},\n}\n@article{B,\n  title = {New},\n  year = {2024},\n}\n@article{C,\n  title = {Undated},\n}\n";
        let publications = publications(source);
        let groups = group_by_year(&publications);
        let years: Vec<&str> = groups.iter().map(|(y, _)| y.as_str()).collect();
        assert_eq!(years, ["2024", "1999", UNKNOWN_YEAR]);
    }

    #[test]
    fn test_highlight_pattern_matches_both_name_orders() {
        let pattern = highlight_pattern("Martin Schulz").unwrap();
        assert!(pattern.is_match("Schulz, Martin and Doe, Jane"));
        assert!(pattern.is_match("Jane Doe and Martin Schulz"));
        assert!(!pattern.is_match("Martina Schulze"));

        let comma_form = highlight_pattern("Schulz, Martin").unwrap();
        assert!(comma_form.is_match("Schulz, Martin"));
        assert!(comma_form.is_match("Martin Schulz"));
    }

    #[test]
    fn test_author_line_bolds_highlight() {
        let pattern = highlight_pattern("Martin Schulz");
        let line = author_line("Schulz, Martin and Doe, Jane", pattern.as_ref());
        assert_eq!(line, "<b>Schulz, Martin</b> and Doe, Jane");
    }

    #[test]
    fn test_render_page_contains_sections_filters_and_cards() {
        let source = "@article{Q1,\n  title = {Qubit Control},\n  journal = {Quantum Journal},\n  year = {2022},\n}\n";
        let page = render_page(&publications(source), &PageOptions::default());
        assert_eq!(page.entry_count, 1);
        assert_eq!(page.year_count, 1);
        assert!(page.html.contains("id=\"y-2022\""));
        assert!(page.html.contains("data-category=\"Quantum\""));
        assert!(page.html.contains("Show BibTeX"));
        assert!(page.html.contains("id=\"filter-programming-model\""));
        assert!(page.html.contains("<script>"));
        assert!(page.html.contains("id=\"yearSearch\""));
    }

    #[test]
    fn test_no_js_mode_uses_css_rules_instead_of_script() {
        let source = "@article{A,\n  title = {Something},\n  year = {2020},\n}\n";
        let options = PageOptions {
            js_filters: false,
            ..PageOptions::default()
        };
        let page = render_page(&publications(source), &options);
        assert!(!page.html.contains("<script>"));
        assert!(!page.html.contains("id=\"yearSearch\""));
        assert!(page
            .html
            .contains("#filter-applications:not(:checked) ~ main .card[data-category='Applications']"));
    }

    #[test]
    fn test_missing_key_falls_back_to_counter() {
        let source = "@misc{broken}\n";
        let page = render_page(&publications(source), &PageOptions::default());
        assert!(page.html.contains("Key: k1"));
    }

    #[test]
    fn test_raw_bibtex_is_escaped_in_card() {
        let source = "@article{Esc,\n  title = {Ampersand \\& Co},\n  year = {2021},\n}\n";
        let page = render_page(&publications(source), &PageOptions::default());
        // Decoded title in the card, escaped raw block in the toggle.
        assert!(page.html.contains("Ampersand &amp; Co"));
        assert!(page.html.contains("Ampersand \\&amp; Co"));
    }

    #[test]
    fn test_entries_within_a_year_sort_by_title() {
        let source = "@article{Z,\n  title = {Zebra Patterns},\n  year = {2020},\n}\n@article{A,\n  title = {aardvark habits},\n  year = {2020},\n}\n";
        let page = render_page(&publications(source), &PageOptions::default());
        let first = page.html.find("aardvark habits").unwrap();
        let second = page.html.find("Zebra Patterns").unwrap();
        assert!(first < second);
    }
}
