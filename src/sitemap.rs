//! Sitemap hierarchy resolution.
//!
//! A sitemap root is either a URL set (`<urlset>` listing pages directly) or
//! a sitemap index (`<sitemapindex>` listing further sitemap documents).
//! [`resolve`] walks the hierarchy with an explicit worklist, collecting
//! every URL-set entry it encounters.
//!
//! # Robustness
//!
//! - Child sitemap URLs are tracked in a visited set, so a cycle between
//!   index documents terminates and contributes each entry once.
//! - The number of distinct child documents followed is capped; once the cap
//!   is reached newly discovered sitemap URLs are dropped silently while
//!   already-queued documents still complete.
//! - A document that fails to fetch or parse is logged and contributes zero
//!   entries; resolution continues with the rest of the worklist.
//!
//! Element names are matched by local name, so documents under the sitemap
//! XML namespace (prefixed or default) parse the same as bare ones.

use crate::fetch::{FetchText, SITEMAP_TIMEOUT};
use crate::models::SitemapEntry;
use crate::utils::parse_iso_datetime;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, instrument, warn};

/// One parsed sitemap document: the child sitemaps it references and the
/// page entries it lists. A well-formed document has one or the other.
struct SitemapDocument {
    child_sitemaps: Vec<String>,
    entries: Vec<SitemapEntry>,
}

/// Expand a sitemap hierarchy into a flat list of page entries.
///
/// Fetches `root_url`, recurses through any referenced child sitemaps (at
/// most `max_docs` distinct ones; the root does not count), and returns the
/// concatenated URL-set entries in discovery order. Entries are not
/// deduplicated here; that is the orchestrator's job.
#[instrument(level = "info", skip_all, fields(%root_url, max_docs))]
pub async fn resolve<F: FetchText>(
    fetcher: &F,
    root_url: &str,
    max_docs: usize,
) -> Vec<SitemapEntry> {
    let mut entries = Vec::new();
    let mut visited: HashSet<String> = HashSet::from([root_url.to_string()]);
    let mut queued_docs = 0usize;
    let mut worklist: VecDeque<String> = VecDeque::from([root_url.to_string()]);

    while let Some(doc_url) = worklist.pop_front() {
        let body = match fetcher.fetch_text(&doc_url, SITEMAP_TIMEOUT).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %doc_url, error = %e, "sitemap fetch failed; skipping document");
                continue;
            }
        };

        let document = match parse_document(&body) {
            Ok(document) => document,
            Err(e) => {
                warn!(url = %doc_url, error = %e, "sitemap parse failed; skipping document");
                continue;
            }
        };

        for child in document.child_sitemaps {
            if visited.contains(&child) {
                continue;
            }
            if queued_docs >= max_docs {
                debug!(url = %child, "sitemap document cap reached; dropping");
                continue;
            }
            visited.insert(child.clone());
            queued_docs += 1;
            worklist.push_back(child);
        }

        if !document.entries.is_empty() {
            debug!(url = %doc_url, count = document.entries.len(), "collected url-set entries");
        }
        entries.extend(document.entries);
    }

    info!(
        count = entries.len(),
        documents = queued_docs + 1,
        "sitemap resolution complete"
    );
    entries
}

/// Parse one sitemap XML document.
///
/// Walks the event stream tracking whether a `<sitemap>` or `<url>` element
/// is open and which leaf tag the current text belongs to. `<lastmod>`
/// values that fail ISO-8601 parsing become `None` rather than errors.
fn parse_document(xml: &str) -> Result<SitemapDocument, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut child_sitemaps = Vec::new();
    let mut entries = Vec::new();

    // At most one of these is open at a time in a well-formed document.
    let mut in_sitemap = false;
    let mut in_url = false;
    let mut current_tag = String::new();
    let mut loc = String::new();
    let mut lastmod = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "sitemap" => {
                        in_sitemap = true;
                        loc.clear();
                        lastmod.clear();
                    }
                    "url" => {
                        in_url = true;
                        loc.clear();
                        lastmod.clear();
                    }
                    _ => {}
                }
                current_tag = name;
            }
            Event::Text(ref e) => {
                if in_sitemap || in_url {
                    let text = e.xml_content().unwrap_or_default();
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        match current_tag.as_str() {
                            "loc" => loc.push_str(trimmed),
                            "lastmod" => lastmod.push_str(trimmed),
                            _ => {}
                        }
                    }
                }
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "sitemap" if in_sitemap => {
                        if !loc.is_empty() {
                            child_sitemaps.push(loc.clone());
                        }
                        in_sitemap = false;
                    }
                    "url" if in_url => {
                        if !loc.is_empty() {
                            entries.push(SitemapEntry {
                                location: loc.clone(),
                                last_modified: parse_iso_datetime(&lastmod),
                            });
                        }
                        in_url = false;
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(SitemapDocument {
        child_sitemaps,
        entries,
    })
}
