use std::sync::OnceLock;

use scraper::{Html, Selector};

use crate::model::ExtractedLink;

fn anchor_selector() -> Option<&'static Selector> {
    static SELECTOR: OnceLock<Option<Selector>> = OnceLock::new();
    SELECTOR
        .get_or_init(|| Selector::parse("a[href]").ok())
        .as_ref()
}

/// Collect every `<a href>` in document order.
///
/// `text_contains` and `href_contains` are case-sensitive substring filters;
/// an anchor must pass every filter that is set. The href comes back with
/// HTML entities decoded and is otherwise untouched.
pub fn extract_links(
    html: &str,
    text_contains: Option<&str>,
    href_contains: Option<&str>,
) -> Vec<ExtractedLink> {
    if html.is_empty() {
        return Vec::new();
    }
    let Some(selector) = anchor_selector() else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let text: String = anchor.text().collect();
            let text = text.trim();

            if let Some(needle) = text_contains
                && !text.contains(needle)
            {
                return None;
            }
            if let Some(needle) = href_contains
                && !href.contains(needle)
            {
                return None;
            }
            Some(ExtractedLink::new(text, href))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VERIFY_HTML: &str = r#"
<html><body>
  <p>Someone asked to update your household.</p>
  <a href="https://www.example.com/account/travel/verify?nftoken=abc&amp;lnktrk=EVO">
     <b>Yes, it's me</b>
  </a>
  <a name="anchor-only">no href here</a>
  <a href="https://help.example.com/">Get help</a>
  <a href="https://www.example.com/img"><img src="x.png"></a>
</body></html>
"#;

    #[test]
    fn empty_input_has_no_links() {
        assert!(extract_links("", None, None).is_empty());
    }

    #[test]
    fn html_without_anchors_has_no_links() {
        assert!(extract_links("<p>nothing <b>to</b> see</p>", None, None).is_empty());
    }

    #[test]
    fn collects_anchors_in_document_order() {
        let links = extract_links(VERIFY_HTML, None, None);
        assert_eq!(
            links,
            vec![
                ExtractedLink::new(
                    "Yes, it's me",
                    "https://www.example.com/account/travel/verify?nftoken=abc&lnktrk=EVO"
                ),
                ExtractedLink::new("Get help", "https://help.example.com/"),
                ExtractedLink::new("", "https://www.example.com/img"),
            ]
        );
    }

    #[test]
    fn entities_are_decoded_exactly_once() {
        let html = r#"<a href="https://example.com/v?a=1&amp;amp;b=2">Go</a>"#;
        let links = extract_links(html, None, None);
        assert_eq!(links, vec![ExtractedLink::new("Go", "https://example.com/v?a=1&amp;b=2")]);
    }

    #[test]
    fn anchors_without_href_are_excluded() {
        let links = extract_links(VERIFY_HTML, Some("no href"), None);
        assert!(links.is_empty());
    }

    #[test]
    fn text_filter_is_case_sensitive_substring() {
        let hits = extract_links(VERIFY_HTML, Some("it's"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "Yes, it's me");

        assert!(extract_links(VERIFY_HTML, Some("ITS"), None).is_empty());
    }

    #[test]
    fn href_filter_is_substring() {
        let hits = extract_links(VERIFY_HTML, None, Some("www.example.com"));
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|l| l.href.contains("www.example.com")));
    }

    #[test]
    fn both_filters_must_match() {
        assert_eq!(
            extract_links(VERIFY_HTML, Some("help"), Some("www.example.com")).len(),
            0
        );
        assert_eq!(
            extract_links(VERIFY_HTML, Some("help"), Some("help.example.com")).len(),
            1
        );
    }

    #[test]
    fn non_ascii_button_text() {
        let html = r#"<a href="https://example.com/yes">  네, 본인입니다 </a><a href="https://example.com/code">코드 받기</a>"#;
        let links = extract_links(html, Some("본인"), None);
        assert_eq!(links, vec![ExtractedLink::new("네, 본인입니다", "https://example.com/yes")]);
    }
}
