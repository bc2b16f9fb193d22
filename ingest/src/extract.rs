use lazy_static::lazy_static;
use scraper::{Html, Selector};

lazy_static! {
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("valid selector");
}

/// Text of every `<p>` element, joined by single spaces.
pub fn extract_paragraph_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_paragraphs() {
        let html = "<html><head><title>T</title></head><body><h1>Head</h1>\
                    <p>First <b>bold</b> para.</p><div>skip</div><p>Second</p></body></html>";
        assert_eq!(extract_paragraph_text(html), "First bold para. Second");
    }

    #[test]
    fn no_paragraphs_is_empty() {
        assert_eq!(extract_paragraph_text("<div>nothing</div>"), "");
    }
}
