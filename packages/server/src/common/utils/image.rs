use regex::Regex;
use std::sync::LazyLock;

/// Fallback when the URL path carries no recognisable image extension.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

// First `<img ... src="...">`, tag name matched case-insensitively.
static RE_IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]+src="([^">]+)""#).expect("valid img regex")
});

/// Extract the `src` of the first `<img>` tag in post HTML.
pub fn extract_first_image(html: &str) -> Option<String> {
    RE_IMG_SRC
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Guess an image MIME type from the URL's path extension.
pub fn guess_image_mime(image_url: &str) -> String {
    let path = url::Url::parse(image_url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| image_url.split(['?', '#']).next().unwrap_or_default().to_string());

    mime_guess::from_path(&path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_image() {
        let html = r#"<p>intro</p><img alt="a" src="http://x/first.png"><img src="http://x/second.png">"#;
        assert_eq!(extract_first_image(html).as_deref(), Some("http://x/first.png"));
    }

    #[test]
    fn tag_name_is_case_insensitive() {
        let html = r#"<IMG SRC="http://x/upper.gif">"#;
        assert_eq!(extract_first_image(html).as_deref(), Some("http://x/upper.gif"));
    }

    #[test]
    fn no_image_yields_none() {
        assert_eq!(extract_first_image("<p>hi</p>"), None);
        assert_eq!(extract_first_image(""), None);
    }

    #[test]
    fn single_quoted_src_is_not_matched() {
        assert_eq!(extract_first_image("<img src='http://x/y.jpg'>"), None);
    }

    #[test]
    fn bare_img_tag_is_skipped_for_later_match() {
        let html = r#"<img><p>text</p><img src="http://x/y.jpg">"#;
        assert_eq!(extract_first_image(html).as_deref(), Some("http://x/y.jpg"));
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(guess_image_mime("http://x/y.jpg"), "image/jpeg");
        assert_eq!(guess_image_mime("https://cdn.example.org/a/b.PNG?w=640"), "image/png");
        assert_eq!(guess_image_mime("https://cdn.example.org/anim.gif#frag"), "image/gif");
    }

    #[test]
    fn unknown_extension_defaults_to_jpeg() {
        assert_eq!(guess_image_mime("https://blogger.googleusercontent.com/img/b/R29v/s1600"), "image/jpeg");
        assert_eq!(guess_image_mime("https://example.org/page.html"), "image/jpeg");
    }
}
