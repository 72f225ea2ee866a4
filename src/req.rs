use crate::{
    error::Error,
    form::{encode, FieldSet, FORM_NAME_KEY},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::{body::Body, header::CONTENT_TYPE, http::request::Parts, Method, Request};
use mime::{Mime, APPLICATION_WWW_FORM_URLENCODED};

/// Form bodies are a few short fields, anything bigger is refused.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug)]
pub struct ParsedRequest {
    pub resource: Resource,
    pub path: String,
    /// Path and query, the address recorded with feedback sent from this page.
    pub address: String,
}

#[derive(Debug)]
pub enum Resource {
    Home,
    About,
    Submissions,
    Css,
    Robots,
    Head,
    Submit(Submission),
}

/// A decoded form post, reduced to the fields the form declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub form: &'static FieldSet,
    pub fields: Vec<(String, String)>,
    /// Names present in the body but not declared for the form.
    pub dropped: Vec<String>,
}

impl Submission {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, Error> {
        let form_name = pairs
            .iter()
            .find(|(k, _)| k == FORM_NAME_KEY)
            .map(|(_, v)| v.as_str())
            .ok_or(Error::BadRequest)?;
        let form = FieldSet::find(form_name).ok_or_else(|| Error::UnknownForm(form_name.into()))?;

        let mut fields = Vec::with_capacity(form.fields.len());
        let mut dropped = Vec::new();
        for (k, v) in pairs {
            if k == FORM_NAME_KEY {
                continue;
            }
            if form.get(&k).is_some() {
                // repeated keys keep their first position, the last value wins
                match fields.iter_mut().find(|(name, _): &&mut (String, String)| *name == k) {
                    Some((_, value)) => *value = v,
                    None => fields.push((k, v)),
                }
            } else {
                dropped.push(k);
            }
        }
        Ok(Submission {
            form,
            fields,
            dropped,
        })
    }
}

pub async fn parse<B>(req: Request<B>) -> Result<ParsedRequest, Error>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();
    let address = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let mut segments = path.split('/').skip(1);
    let is_head = parts.method == Method::HEAD;
    let method = if is_head { &Method::GET } else { &parts.method };

    let resource = match (
        method,
        parts.uri.query(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (&Method::GET, _, Some(""), None, None) => Resource::Home,
        (&Method::GET, None, Some("about"), None, None) => Resource::About,
        (&Method::GET, None, Some("submissions"), None, None) => Resource::Submissions,
        (&Method::GET, None, Some("css"), Some("site.css"), None) => Resource::Css,
        (&Method::GET, None, Some("robots.txt"), None, None) => Resource::Robots,
        (&Method::POST, None, Some(""), None, None) => {
            check_form_content_type(&parts)?;
            let bytes = Limited::new(body, MAX_BODY_BYTES)
                .collect()
                .await
                .map_err(|e| {
                    if e.is::<LengthLimitError>() {
                        Error::BodyTooLarge(MAX_BODY_BYTES)
                    } else {
                        log::debug!("failed reading body: {}", e);
                        Error::BadRequest
                    }
                })?
                .to_bytes();
            Resource::Submit(Submission::from_pairs(encode::decode(&bytes))?)
        }
        _ => return Err(Error::NotFound),
    };

    let resource = if is_head { Resource::Head } else { resource };
    Ok(ParsedRequest {
        resource,
        path,
        address,
    })
}

fn check_form_content_type(parts: &Parts) -> Result<(), Error> {
    let mime = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Mime>().ok())
        .ok_or(Error::BadRequest)?;
    if mime.essence_str() == APPLICATION_WWW_FORM_URLENCODED.essence_str() {
        Ok(())
    } else {
        Err(Error::BadRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;

    fn post(content_type: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    fn get(method: Method, uri: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    fn pairs(body: &str) -> Vec<(String, String)> {
        encode::decode(body.as_bytes())
    }

    #[tokio::test]
    async fn routes() {
        let parsed = parse(get(Method::GET, "/")).await.unwrap();
        assert!(matches!(parsed.resource, Resource::Home));
        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.address, "/");

        let parsed = parse(get(Method::GET, "/?ref=news")).await.unwrap();
        assert!(matches!(parsed.resource, Resource::Home));
        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.address, "/?ref=news");

        let parsed = parse(get(Method::GET, "/about")).await.unwrap();
        assert!(matches!(parsed.resource, Resource::About));

        let parsed = parse(get(Method::HEAD, "/css/site.css")).await.unwrap();
        assert!(matches!(parsed.resource, Resource::Head));

        assert!(matches!(
            parse(get(Method::GET, "/forms.html")).await,
            Err(Error::NotFound)
        ));
        assert!(matches!(
            parse(get(Method::POST, "/about")).await,
            Err(Error::NotFound)
        ));
    }

    #[tokio::test]
    async fn post_requires_form_content_type() {
        let body = "form-name=FeedbackForm&email=a%40b.c";
        let parsed = parse(post("application/x-www-form-urlencoded; charset=UTF-8", body))
            .await
            .unwrap();
        match parsed.resource {
            Resource::Submit(s) => {
                assert_eq!(s.fields, vec![("email".to_string(), "a@b.c".to_string())])
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(
            parse(post("application/json", body)).await,
            Err(Error::BadRequest)
        ));
    }

    #[tokio::test]
    async fn oversized_body_is_refused() {
        let body = format!("form-name=FeedbackForm&email={}", "a".repeat(MAX_BODY_BYTES));
        assert!(matches!(
            parse(post("application/x-www-form-urlencoded", &body)).await,
            Err(Error::BodyTooLarge(_))
        ));
    }

    #[test]
    fn undeclared_fields_are_dropped() {
        let s = Submission::from_pairs(pairs(
            "form-name=FeedbackForm&helpful=yes&favouriteColour=blue&url=%2F",
        ))
        .unwrap();
        assert_eq!(s.form.form_name, "FeedbackForm");
        assert_eq!(
            s.fields,
            vec![
                ("helpful".to_string(), "yes".to_string()),
                ("url".to_string(), "/".to_string())
            ]
        );
        assert_eq!(s.dropped, vec!["favouriteColour"]);
    }

    #[test]
    fn repeated_fields_keep_the_last_value() {
        let s = Submission::from_pairs(pairs(
            "form-name=FeedbackForm&helpful=yes&email=a%40b.c&helpful=no",
        ))
        .unwrap();
        assert_eq!(
            s.fields,
            vec![
                ("helpful".to_string(), "no".to_string()),
                ("email".to_string(), "a@b.c".to_string())
            ]
        );
    }

    #[test]
    fn form_name_is_required_and_exact() {
        assert!(matches!(
            Submission::from_pairs(pairs("helpful=yes")),
            Err(Error::BadRequest)
        ));
        assert!(matches!(
            Submission::from_pairs(pairs("form-name=feedbackform")),
            Err(Error::UnknownForm(name)) if name == "feedbackform"
        ));
    }
}
