//! Request shape and the pure classifier predicates over it
//!
//! `Request` is a transport-agnostic stand-in for whatever the embedding HTTP framework hands
//! the provider. The caller is responsible for populating it from the real request; the provider
//! only reads these fields and, transiently, rewrites `authorization`.

use serde_json::Value;

/// The inbound request fields the provider reads, and the one field (`authorization`) it may
/// transiently rewrite while a backend call is in flight.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub authorization: Option<String>,
    /// Request body, when it is a mapping (e.g. a form-encoded ACS POST). `None` if the request
    /// has no body or the body is not a mapping.
    pub payload: Option<Value>,
    /// Request query string, when it is a mapping. `None` if there is no query or it is not a
    /// mapping.
    pub query: Option<Value>,
    /// Path portion of the request URL, e.g. `/app/home`.
    pub path: String,
    /// Raw query string, without the leading `?`, e.g. `SAMLRequest=...&SigAlg=...`.
    pub search: String,
    /// Path prefix the embedding application is mounted under, e.g. `/kbn`.
    pub base_path: String,
    /// Whether this request can be redirected (i.e. is not an XHR/AJAX probe). Determining this
    /// from real request headers is delegated to the embedding application; this provider only
    /// consumes the resulting boolean.
    pub can_redirect: bool,
}

/// Result of classifying the `Authorization` header's scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationHeader<'a> {
    /// No `Authorization` header was present.
    Absent,
    /// `Authorization: Bearer <token>` (scheme matched case-insensitively).
    Bearer(&'a str),
    /// An `Authorization` header was present with some other scheme.
    Unrecognized,
}

impl Request {
    /// Classify the `Authorization` header per §4.C.1: the first whitespace-separated token,
    /// compared case-insensitively to `bearer`.
    pub fn authorization_header(&self) -> AuthorizationHeader<'_> {
        let Some(value) = self.authorization.as_deref() else {
            return AuthorizationHeader::Absent;
        };

        let mut parts = value.splitn(2, char::is_whitespace);
        let scheme = parts.next().unwrap_or("");
        let token = parts.next().unwrap_or("").trim();

        if scheme.eq_ignore_ascii_case("bearer") {
            AuthorizationHeader::Bearer(token)
        } else {
            AuthorizationHeader::Unrecognized
        }
    }

    /// The `SAMLResponse` field of the request body, if the body is a mapping carrying a
    /// non-empty value for it. `RelayState` is not inspected here — the provider does not use it.
    pub fn saml_response(&self) -> Option<&str> {
        self.payload
            .as_ref()?
            .as_object()?
            .get("SAMLResponse")?
            .as_str()
            .filter(|s| !s.is_empty())
    }

    /// The `SAMLRequest` field of the request query, if the query is a mapping carrying a
    /// non-empty value for it.
    pub fn saml_request(&self) -> Option<&str> {
        self.query
            .as_ref()?
            .as_object()?
            .get("SAMLRequest")?
            .as_str()
            .filter(|s| !s.is_empty())
    }

    /// Whether this request is redirect-capable (not an XHR/AJAX probe).
    pub fn can_redirect(&self) -> bool {
        self.can_redirect
    }

    /// The search string with any leading `?` stripped, as required by `samlInvalidate`'s
    /// `queryString` field.
    pub fn search_without_leading_question_mark(&self) -> &str {
        self.search.strip_prefix('?').unwrap_or(&self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_request() -> Request {
        Request {
            base_path: "/kbn".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn absent_header() {
        let request = base_request();
        assert_eq!(request.authorization_header(), AuthorizationHeader::Absent);
    }

    #[test]
    fn bearer_header_case_insensitive() {
        let mut request = base_request();
        request.authorization = Some("BeArEr abc123".to_string());
        assert_eq!(
            request.authorization_header(),
            AuthorizationHeader::Bearer("abc123")
        );
    }

    #[test]
    fn unrecognized_scheme() {
        let mut request = base_request();
        request.authorization = Some("Basic dXNlcjpwYXNz".to_string());
        assert_eq!(
            request.authorization_header(),
            AuthorizationHeader::Unrecognized
        );
    }

    #[test]
    fn saml_response_requires_non_empty_value() {
        let mut request = base_request();
        request.payload = Some(json!({"SAMLResponse": ""}));
        assert_eq!(request.saml_response(), None);

        request.payload = Some(json!({"SAMLResponse": "<base64>", "RelayState": "/x"}));
        assert_eq!(request.saml_response(), Some("<base64>"));
    }

    #[test]
    fn saml_request_query() {
        let mut request = base_request();
        request.query = Some(json!({"SAMLRequest": "<base64>"}));
        assert_eq!(request.saml_request(), Some("<base64>"));
    }

    #[test]
    fn strips_leading_question_mark() {
        let mut request = base_request();
        request.search = "?SAMLRequest=abc&SigAlg=xyz".to_string();
        assert_eq!(
            request.search_without_leading_question_mark(),
            "SAMLRequest=abc&SigAlg=xyz"
        );
    }
}
