//! Request headers and authentication.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Build the default headers sent with every request.
///
/// The set mirrors what the desktop client sends, plus the raw account
/// token on `authorization`.
pub fn build_headers(token: &SecretString, user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(
        HeaderName::from_static("authority"),
        HeaderValue::from_static("discord.com"),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_str(user_agent)
            .map_err(|e| Error::Config(format!("Invalid user agent: {}", e)))?,
    );

    let mut authorization = HeaderValue::from_str(token.expose_secret())
        .map_err(|_| Error::Authentication("Token contains invalid header characters".into()))?;
    authorization.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, authorization);

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_headers() {
        let token = SecretString::from("abc.def.ghi".to_string());
        let headers = build_headers(&token, "test-agent/1.0").unwrap();

        assert_eq!(headers["authority"], "discord.com");
        assert_eq!(headers[header::ACCEPT_LANGUAGE], "en-US");
        assert_eq!(headers[header::ACCEPT], "*/*");
        assert_eq!(headers[header::USER_AGENT], "test-agent/1.0");
        assert_eq!(headers[header::AUTHORIZATION], "abc.def.ghi");
        assert!(headers[header::AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_build_headers_rejects_control_chars() {
        let token = SecretString::from("abc\ndef".to_string());
        assert!(matches!(
            build_headers(&token, "agent"),
            Err(Error::Authentication(_))
        ));
    }
}
