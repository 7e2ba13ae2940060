//! Core HTTP protocol types shared by the parser, the range resolver
//! and the response composer.

/// Parses an ASCII decimal number, rejecting anything that is not a digit.
///
/// Overflow is treated as malformed rather than wrapped.
#[inline(always)]
pub(crate) fn slice_to_u64(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }

    let mut result: u64 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return None;
        }

        result = result
            .checked_mul(10)?
            .checked_add(u64::from(byte - b'0'))?;
    }

    Some(result)
}

macro_rules! set_status_codes {
    ($(
        $(#[$docs:meta])+
        $name:ident = ($num:expr, $str:expr);
    )+) => {
        /// HTTP status codes handlers compose responses with.
        ///
        /// The `400`/`413` rejection paths are not listed here; their
        /// status lines ship inside the canned responses of
        /// [`RequestError::as_http`](crate::errors::RequestError::as_http).
        /// The reason phrase is fixed per code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StatusCode { $(
            $(#[$docs])+
            $name = $num,
        )+ }

        impl StatusCode {
            /// Returns the complete status line (e.g. `b"HTTP/1.1 200 OK\r\n"`).
            #[inline]
            pub const fn to_first_line(self) -> &'static [u8] {
                match self { $(
                    StatusCode::$name => {
                        concat!("HTTP/1.1 ", $num, " ", $str, "\r\n").as_bytes()
                    },
                )+ }
            }

            /// Returns the reason phrase paired with this code.
            #[inline]
            pub const fn reason(self) -> &'static str {
                match self { $(
                    StatusCode::$name => $str,
                )+ }
            }

            /// Returns the numeric code.
            #[inline(always)]
            pub const fn code(self) -> u16 {
                self as u16
            }
        }
    }
}

set_status_codes! {
    /// [RFC 9110, 15.3.1](https://datatracker.ietf.org/doc/html/rfc9110#section-15.3.1)
    Ok = (200, "OK");
    /// [RFC 9110, 15.3.7](https://datatracker.ietf.org/doc/html/rfc9110#section-15.3.7)
    PartialContent = (206, "Partial Content");
    /// [RFC 9110, 15.4.2](https://datatracker.ietf.org/doc/html/rfc9110#section-15.4.2)
    MovedPermanently = (301, "Moved Permanently");
    /// [RFC 9110, 15.5.5](https://datatracker.ietf.org/doc/html/rfc9110#section-15.5.5)
    NotFound = (404, "Not Found");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_lines() {
        let cases = [
            (StatusCode::Ok, "HTTP/1.1 200 OK\r\n"),
            (StatusCode::PartialContent, "HTTP/1.1 206 Partial Content\r\n"),
            (StatusCode::MovedPermanently, "HTTP/1.1 301 Moved Permanently\r\n"),
            (StatusCode::NotFound, "HTTP/1.1 404 Not Found\r\n"),
        ];

        for (status, line) in cases {
            assert_eq!(status.to_first_line(), line.as_bytes());
        }
    }

    #[test]
    fn numeric_parsing() {
        let cases: [(&[u8], Option<u64>); 7] = [
            (b"0", Some(0)),
            (b"42", Some(42)),
            (b"0099", Some(99)),
            (b"", None),
            (b"12a", None),
            (b"-1", None),
            (b"99999999999999999999999", None),
        ];

        for (input, expected) in cases {
            assert_eq!(slice_to_u64(input), expected, "input {input:?}");
        }
    }
}
