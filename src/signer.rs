// Request signing for the VWS API. The service recomputes the same
// HMAC-SHA1 over the same string to sign, so every byte here matters.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Format of the `Date` header, e.g. `Sun, 18 Oct 2026 08:00:00 GMT`.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Lowercase hex MD5 of the request body.
pub fn content_md5_hex(body: &[u8]) -> String {
    format!("{:x}", md5::compute(body))
}

/// Newline-joined canonical form of the fields the signature covers.
pub fn string_to_sign(
    method: &str,
    body: &[u8],
    content_type: &str,
    date: &str,
    path: &str,
) -> String {
    [method, &content_md5_hex(body), content_type, date, path].join("\n")
}

/// Value of the `Authorization` header: `VWS <access_key>:<base64 hmac>`.
pub fn authorization_header(
    access_key: &str,
    secret_key: &[u8],
    method: &str,
    body: &[u8],
    content_type: &str,
    date: &str,
    path: &str,
) -> String {
    let to_sign = string_to_sign(method, body, content_type, date, path);
    tracing::trace!(string_to_sign = %to_sign.escape_default(), "signing request");

    let mut mac = HmacSha1::new_from_slice(secret_key).expect("HMAC can take key of any size");
    mac.update(to_sign.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    format!("VWS {}:{}", access_key, signature)
}

/// RFC 1123 date in GMT, as the `Date` header expects it.
pub fn http_date(now: DateTime<Utc>) -> String {
    now.format(HTTP_DATE_FORMAT).to_string()
}
