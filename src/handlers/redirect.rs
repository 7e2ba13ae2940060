//! The plaintext listener's handler: everything moves to HTTPS.

use crate::{
    errors::RequestError,
    http::{request::ParsedRequest, response::HttpMessage, types::StatusCode},
    server::server_impl::RequestHandler,
};

/// Answers every GET with a `301` to the same host and path over
/// `https`, with an empty body. Other methods get no response at all.
///
/// The `Location` value is rebuilt from the request verbatim: the host
/// exactly as the client sent it, the path exactly as requested (the
/// slash the parser stripped is put back).
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectHandler;

impl RequestHandler for RedirectHandler {
    async fn handle(&self, head: &[u8]) -> Result<Option<Vec<u8>>, RequestError> {
        let req = ParsedRequest::parse(head)?;
        if !req.is_get() {
            return Ok(None);
        }

        let message = HttpMessage::new(StatusCode::MovedPermanently)
            .header(format!("Location: https://{}/{}", req.host(), req.path()));

        Ok(Some(message.compose()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_is_redirected_byte_exact() {
        let head = b"GET /dir/movie.mp4?t=42 HTTP/1.1\r\nHost: cnlab.example:80\r\n\r\n";
        let wire = RedirectHandler.handle(head).await.unwrap().unwrap();

        assert_eq!(
            wire,
            b"HTTP/1.1 301 Moved Permanently\r\n\
              content-length: 0\r\n\
              Location: https://cnlab.example:80/dir/movie.mp4?t=42\r\n\
              \r\n",
        );
    }

    #[tokio::test]
    async fn root_path_keeps_single_slash() {
        let head = b"GET / HTTP/1.1\r\nHost: h\r\n\r\n";
        let wire = RedirectHandler.handle(head).await.unwrap().unwrap();

        let text = String::from_utf8(wire).unwrap();
        assert!(text.contains("Location: https://h/\r\n"), "{text}");
    }

    #[tokio::test]
    async fn non_get_gets_nothing() {
        for head in [
            &b"POST /form HTTP/1.1\r\nHost: h\r\n\r\n"[..],
            &b"HEAD /x HTTP/1.1\r\nHost: h\r\n\r\n"[..],
        ] {
            assert_eq!(RedirectHandler.handle(head).await, Ok(None));
        }
    }

    #[tokio::test]
    async fn parse_failures_propagate() {
        let head = b"GET /x HTTP/1.1\r\n\r\n";
        assert_eq!(
            RedirectHandler.handle(head).await,
            Err(RequestError::MissingHost),
        );
    }
}
