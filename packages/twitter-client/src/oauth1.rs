//! OAuth 1.0a user-context request signing (HMAC-SHA1).
//!
//! Only query/form parameters take part in the signature. JSON and multipart
//! bodies are not signed, which is why the tweet and media endpoints pass no
//! extra parameters.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// App and user credentials for OAuth 1.0a.
#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

/// RFC 3986 percent-encoding; everything but `A-Z a-z 0-9 - . _ ~` is escaped.
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the `Authorization` header value for a request.
///
/// `url` must not carry a query string; pass query parameters in `params`.
pub fn authorization_header(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    credentials: &TwitterCredentials,
) -> String {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    authorization_header_with(method, url, params, credentials, &nonce, &timestamp)
}

pub(crate) fn authorization_header_with(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    credentials: &TwitterCredentials,
    nonce: &str,
    timestamp: &str,
) -> String {
    let oauth_params = [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let base = signature_base_string(method, url, params, &oauth_params);
    let signature = sign(&base, &credentials.consumer_secret, &credentials.access_secret);

    let mut header_params: Vec<(String, String)> = oauth_params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    header_params.push(("oauth_signature".to_string(), signature));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {fields}")
}

fn signature_base_string(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .chain(oauth_params.iter())
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    pairs.sort();

    let parameter_string = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&parameter_string)
    )
}

fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from Twitter's "Creating a signature" documentation.
    fn doc_credentials() -> TwitterCredentials {
        TwitterCredentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".into(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".into(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".into(),
            access_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".into(),
        }
    }

    const DOC_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const DOC_NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const DOC_TIMESTAMP: &str = "1318622958";

    fn doc_params() -> Vec<(&'static str, &'static str)> {
        vec![
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
        ]
    }

    #[test]
    fn signature_base_string_matches_documentation() {
        let creds = doc_credentials();
        let oauth = [
            ("oauth_consumer_key", creds.consumer_key.as_str()),
            ("oauth_nonce", DOC_NONCE),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", DOC_TIMESTAMP),
            ("oauth_token", creds.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let base = signature_base_string("post", DOC_URL, &doc_params(), &oauth);

        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen\
             %252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn header_carries_documented_signature() {
        let header = authorization_header_with(
            "POST",
            DOC_URL,
            &doc_params(),
            &doc_credentials(),
            DOC_NONCE,
            DOC_TIMESTAMP,
        );

        assert!(header.starts_with("OAuth "));
        // "hCtSmYh+iHYCEqBWrE7C7hYmtUk=" percent-encoded
        assert!(header.contains(r#"oauth_signature="hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D""#));
        assert!(header.contains(r#"oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog""#));
        assert!(!header.contains("status="));
    }

    #[test]
    fn fresh_headers_use_distinct_nonces() {
        let creds = doc_credentials();
        let a = authorization_header("POST", DOC_URL, &[], &creds);
        let b = authorization_header("POST", DOC_URL, &[], &creds);
        assert_ne!(a, b);
    }
}
