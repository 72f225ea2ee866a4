use hyper::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Hyper(#[from] hyper::Error),

    #[error(transparent)]
    HyperHttp(#[from] hyper::http::Error),

    #[error(transparent)]
    Uri(#[from] hyper::http::uri::InvalidUri),

    #[error(transparent)]
    Client(#[from] hyper_util::client::legacy::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Bad request")]
    BadRequest,

    #[error("Page not found")]
    NotFound,

    #[error("Request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("Form {0:?} is not known")]
    UnknownForm(String),

    #[error("Submission rejected with status {0}")]
    SubmitStatus(StatusCode),

    #[error("Manifest does not declare form {0:?}")]
    MissingForm(String),

    #[error("Manifest form {form:?} is missing fields {missing:?}")]
    ManifestMismatch { form: String, missing: Vec<String> },
}

impl From<Error> for StatusCode {
    fn from(e: Error) -> Self {
        match e {
            Error::BadRequest | Error::BodyTooLarge(_) => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::UnknownForm(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
