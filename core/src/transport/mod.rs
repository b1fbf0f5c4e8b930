//! Transports that execute an `HttpRequest` and return an `HttpResponse`.
//!
//! Both transports treat every status code as data: a 404 or 500 comes back
//! as an `HttpResponse`, never as an error. Errors mean the exchange itself
//! failed.

pub mod blocking;
pub mod nonblocking;

/// Flatten a header map into owned pairs. Bytes that are not valid UTF-8
/// are replaced with U+FFFD so no header is lost.
pub(crate) fn header_pairs<'a, I>(headers: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    headers
        .into_iter()
        .map(|(name, value)| (name.to_string(), String::from_utf8_lossy(value).into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_utf8_header_values_are_kept() {
        let raw: [(&str, &[u8]); 2] = [
            ("content-type", b"text/plain"),
            ("x-filename", b"caf\xe9.txt"),
        ];
        let pairs = header_pairs(raw);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("content-type".to_string(), "text/plain".to_string()));
        assert_eq!(pairs[1], ("x-filename".to_string(), "caf\u{fffd}.txt".to_string()));
    }
}
