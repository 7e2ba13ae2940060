//! The TLS listener's handler: static file content, whole or sliced.

use crate::{
    errors::RequestError,
    files::ResourceStore,
    http::{request::ParsedRequest, response::HttpMessage, types::StatusCode},
    server::server_impl::RequestHandler,
};

/// Serves GET requests out of a [`ResourceStore`].
///
/// - No such resource: `404`, empty body, whether or not a range was
///   requested.
/// - Resource found, no range: `200` with the full content.
/// - Resource found, range sent: `206` with exactly the resolved slice,
///   which may be empty when the range lies past the resource.
///
/// Other methods get no response. The store is only ever consulted for
/// requests that parsed, so a head without a `Host` header can never
/// trigger a lookup.
#[derive(Debug, Clone)]
pub struct StaticFileHandler<S> {
    store: S,
}

impl<S: ResourceStore> StaticFileHandler<S> {
    pub fn new(store: S) -> Self {
        StaticFileHandler { store }
    }
}

impl<S: ResourceStore> RequestHandler for StaticFileHandler<S> {
    async fn handle(&self, head: &[u8]) -> Result<Option<Vec<u8>>, RequestError> {
        let req = ParsedRequest::parse(head)?;
        if !req.is_get() {
            return Ok(None);
        }

        let content = match self.store.fetch(req.path()).await {
            Some(content) => content,
            None => return Ok(Some(HttpMessage::new(StatusCode::NotFound).compose())),
        };

        let message = match req.range() {
            Some(range) => {
                let slice = range.resolve(content.len());
                let body = content[slice.offset..slice.offset + slice.length].to_vec();
                HttpMessage::new(StatusCode::PartialContent).body(body)
            }
            None => HttpMessage::new(StatusCode::Ok).body(content),
        };

        Ok(Some(message.compose()))
    }
}
