use std::future::Future;

use crate::error::Error;
use http_body_util::Full;
use hyper::{body::Bytes, header::CONTENT_TYPE, Method, Request, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use mime::APPLICATION_WWW_FORM_URLENCODED;
use once_cell::sync::Lazy;
use url::Url;

pub static CLIENT: Lazy<Client<HttpsConnector<HttpConnector>, Full<Bytes>>> = Lazy::new(|| {
    let connector = HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new()).build(connector)
});

/// Performs the single outbound write of a form submission.
pub trait Submitter {
    fn submit(&self, body: String) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Posts url-encoded bodies to `/` on the site origin.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    endpoint: Uri,
}

impl HttpSubmitter {
    pub fn new(site: &Url) -> Result<Self, Error> {
        let endpoint = site.join("/")?.as_str().parse()?;
        Ok(HttpSubmitter { endpoint })
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }
}

impl Submitter for HttpSubmitter {
    async fn submit(&self, body: String) -> Result<(), Error> {
        let req = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(CONTENT_TYPE, APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .body(Full::new(Bytes::from(body)))?;

        let resp = CLIENT.request(req).await?;
        let status = resp.status();
        if status.is_success() {
            log::debug!("submission accepted by {} with {}", self.endpoint, status);
            Ok(())
        } else {
            log::warn!("submission rejected by {} with {}", self.endpoint, status);
            Err(Error::SubmitStatus(status))
        }
    }
}
