use crate::{
    error::Error,
    form::surface::SUCCESS_MESSAGE,
    form::URL,
    notify::{Notifier, Toasts},
    pages::{self, PageContext},
    req::{self, Resource},
    state::SharedState,
};
use http_body_util::Full;
use hyper::{
    body::{Body, Bytes},
    header::{CACHE_CONTROL, CONTENT_TYPE, LAST_MODIFIED},
    Request, Response, StatusCode,
};
use mime::{TEXT_CSS_UTF_8, TEXT_HTML_UTF_8, TEXT_PLAIN_UTF_8};
use std::{convert::Infallible, sync::Arc, time::Instant};

const CSS_LAST_MODIFIED: &str = "2026-10-01 07:53:03 UTC";
const ROBOTS_LAST_MODIFIED: &str = "2026-10-01 07:53:03 UTC";

type ResponseBody = Full<Bytes>;

pub async fn route<B>(req: Request<B>, state: Arc<SharedState>) -> Result<Response<ResponseBody>, Error>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let now = Instant::now();
    let uri = req.uri().clone();
    let parsed_req = req::parse(req).await?;
    let mut toasts = Toasts::new();

    let resp = match parsed_req.resource {
        Resource::Home => {
            let ctx = PageContext {
                path: &parsed_req.path,
                address: &parsed_req.address,
                toasts: &toasts,
            };
            html_response(pages::home::page(&ctx).into_string(), "public, max-age=3600")?
        }

        Resource::About => {
            let ctx = PageContext {
                path: &parsed_req.path,
                address: &parsed_req.address,
                toasts: &toasts,
            };
            html_response(pages::about::page(&ctx).into_string(), "public, max-age=3600")?
        }

        Resource::Submissions => {
            let received = state.recent().await;
            let ctx = PageContext {
                path: &parsed_req.path,
                address: &parsed_req.address,
                toasts: &toasts,
            };
            html_response(
                pages::submissions::page(&received, &ctx).into_string(),
                "no-store",
            )?
        }

        Resource::Submit(submission) => {
            let received = state.receive(submission).await;
            let back = received
                .fields
                .iter()
                .find(|(k, _)| k == URL)
                .map(|(_, v)| v.as_str());
            toasts.success(SUCCESS_MESSAGE);
            let ctx = PageContext {
                path: &parsed_req.path,
                address: &parsed_req.address,
                toasts: &toasts,
            };
            html_response(pages::thanks::page(back, &ctx).into_string(), "no-store")?
        }

        Resource::Head => Response::new(Full::new(Bytes::new())),

        Resource::Css => Response::builder()
            .header(LAST_MODIFIED, CSS_LAST_MODIFIED)
            .header(CACHE_CONTROL, "public, max-age=31536000")
            .header(CONTENT_TYPE, TEXT_CSS_UTF_8.as_ref())
            .body(Full::new(Bytes::from_static(
                include_str!("css/site.css").as_bytes(),
            )))?,

        Resource::Robots => Response::builder()
            .header(LAST_MODIFIED, ROBOTS_LAST_MODIFIED)
            .header(CACHE_CONTROL, "public, max-age=3600")
            .header(CONTENT_TYPE, TEXT_PLAIN_UTF_8.as_ref())
            .body(Full::new(Bytes::from_static(include_bytes!("robots.txt"))))?,
    };

    log::debug!("{:?} executed in {:?}", uri, now.elapsed());

    Ok(resp)
}

fn html_response(page: String, cache_control: &str) -> Result<Response<ResponseBody>, Error> {
    Ok(Response::builder()
        .header(CACHE_CONTROL, cache_control)
        .header(CONTENT_TYPE, TEXT_HTML_UTF_8.as_ref())
        .body(Full::new(Bytes::from(page)))?)
}

pub async fn route_infallible<B>(
    req: Request<B>,
    state: Arc<SharedState>,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let resp = route(req, state).await.unwrap_or_else(|e| {
        log::debug!("request failed: {}", e);
        let body = format!("{}", e);
        let mut resp = Response::new(Full::new(Bytes::from(body)));
        *resp.status_mut() = StatusCode::from(e);
        resp
    });
    Ok(resp)
}
