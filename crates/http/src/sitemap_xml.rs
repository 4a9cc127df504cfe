//! Sitemap protocol rendering.
//!
//! Every entry in one response shares the same `lastmod`: the day the file
//! was rendered.

use std::fmt::Write as _;

use chrono::NaiveDate;
use postakod_service::SitemapUrl;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub const CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

/// Escape the five XML special characters.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// `<urlset>` document for one sitemap file.
pub fn render_urlset(urls: &[SitemapUrl], lastmod: NaiveDate) -> String {
    let mut xml = String::with_capacity(128 + urls.len() * 160);
    xml.push_str(XML_HEADER);
    let _ = writeln!(xml, "<urlset xmlns=\"{SITEMAP_NS}\">");
    for url in urls {
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>{}</changefreq>\n    \
             <priority>{}</priority>\n  </url>\n",
            escape(&url.loc),
            url.changefreq,
            url.priority,
        );
    }
    xml.push_str("</urlset>");
    xml
}

/// `<sitemapindex>` document pointing at every sitemap file.
pub fn render_index(locations: &[String], lastmod: NaiveDate) -> String {
    let mut xml = String::with_capacity(128 + locations.len() * 120);
    xml.push_str(XML_HEADER);
    let _ = writeln!(xml, "<sitemapindex xmlns=\"{SITEMAP_NS}\">");
    for loc in locations {
        let _ = write!(
            xml,
            "  <sitemap>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n  </sitemap>\n",
            escape(loc)
        );
    }
    xml.push_str("</sitemapindex>");
    xml
}

pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\n\
         Allow: /\n\
         Allow: /ara\n\
         Allow: /hakkimizda\n\
         Allow: /iletisim\n\
         Allow: /gizlilik-politikasi\n\
         Allow: /kullanim-sartlari\n\
         Allow: /cerez-politikasi\n\
         \n\
         # Disallow admin pages\n\
         Disallow: /admin\n\
         Disallow: /admin/*\n\
         \n\
         # Disallow API endpoints\n\
         Disallow: /api/*\n\
         \n\
         Sitemap: {base_url}/sitemap.xml\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default()
    }

    #[test]
    fn urlset_escapes_locations() {
        let urls =
            [SitemapUrl { loc: "https://example.test/a?b=1&c=<2>".to_owned(), changefreq: "weekly", priority: "0.8" }];
        let xml = render_urlset(&urls, day());
        assert!(xml.starts_with(XML_HEADER));
        assert!(xml.contains("<loc>https://example.test/a?b=1&amp;c=&lt;2&gt;</loc>"));
        assert!(xml.contains("<lastmod>2024-05-01</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn empty_urlset_is_well_formed() {
        let xml = render_urlset(&[], day());
        assert!(!xml.contains("<url>"));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn index_lists_each_location_once() {
        let locations = vec!["https://example.test/sitemaps/static.xml".to_owned()];
        let xml = render_index(&locations, day());
        assert_eq!(xml.matches("<sitemap>").count(), 1);
        assert!(xml.contains("<loc>https://example.test/sitemaps/static.xml</loc>"));
    }

    #[test]
    fn robots_points_at_sitemap_index() {
        let robots = robots_txt("https://example.test");
        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.contains("\n\n# Disallow admin pages\n"));
        assert!(robots.ends_with("Sitemap: https://example.test/sitemap.xml\n"));
    }
}
