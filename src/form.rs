use axum::body::{Bytes, HttpBody};
use axum::extract::{Form, FromRequest, Multipart};
use axum::http::{header, Request};
use axum::BoxError;

use crate::error::ApiError;

/// The fields of a submitted form, in the order they were sent.
///
/// Accepts `application/x-www-form-urlencoded` and `multipart/form-data`
/// bodies. Any other content type yields no fields at all.
#[derive(Debug, Default)]
pub struct PasteForm {
    fields: Vec<(String, String)>,
}

impl PasteForm {
    /// All values submitted for `name`, concatenated in order.
    pub fn value(&self, name: &str) -> Option<String> {
        let mut values = self
            .fields
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .peekable();
        values.peek()?;
        Some(values.collect())
    }
}

#[axum::async_trait]
impl<S, B> FromRequest<S, B> for PasteForm
where
    B: HttpBody + Send + 'static,
    B::Data: Into<Bytes> + Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let fields = match mime.as_str() {
            "multipart/form-data" => {
                let mut multipart = Multipart::from_request(req, state).await?;
                let mut fields = Vec::new();
                while let Some(field) = multipart.next_field().await? {
                    let Some(name) = field.name().map(ToOwned::to_owned) else {
                        continue;
                    };
                    fields.push((name, field.text().await?));
                }
                fields
            }
            "application/x-www-form-urlencoded" => {
                let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
                fields
            }
            _ => Vec::new(),
        };

        Ok(PasteForm { fields })
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Method;

    use super::*;

    async fn parse(content_type: Option<&str>, body: &'static str) -> Result<PasteForm, ApiError> {
        let mut builder = Request::builder().method(Method::POST).uri("/x");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body)).unwrap();
        PasteForm::from_request(req, &()).await
    }

    #[tokio::test]
    async fn urlencoded_values_are_decoded() {
        let form = parse(
            Some("application/x-www-form-urlencoded"),
            "paste=hello+world%21%0A%3C%2Fb%3E&other=1",
        )
        .await
        .unwrap();

        assert_eq!(form.value("paste").as_deref(), Some("hello world!\n</b>"));
        assert_eq!(form.value("other").as_deref(), Some("1"));
        assert_eq!(form.value("missing"), None);
    }

    #[tokio::test]
    async fn repeated_values_are_concatenated() {
        let form = parse(
            Some("application/x-www-form-urlencoded; charset=UTF-8"),
            "paste=one&x=y&paste=two&paste=three",
        )
        .await
        .unwrap();

        assert_eq!(form.value("paste").as_deref(), Some("onetwothree"));
    }

    #[tokio::test]
    async fn blank_values_are_kept() {
        let form = parse(Some("application/x-www-form-urlencoded"), "paste=")
            .await
            .unwrap();

        assert_eq!(form.value("paste").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn multipart_fields_are_read() {
        let body = "--XyZ\r\n\
                    Content-Disposition: form-data; name=\"paste\"\r\n\
                    \r\n\
                    first\r\n\
                    --XyZ\r\n\
                    Content-Disposition: form-data; name=\"paste\"\r\n\
                    \r\n\
                    second\r\n\
                    --XyZ--\r\n";
        let form = parse(Some("multipart/form-data; boundary=XyZ"), body)
            .await
            .unwrap();

        assert_eq!(form.value("paste").as_deref(), Some("firstsecond"));
    }

    #[tokio::test]
    async fn unknown_content_type_has_no_fields() {
        let form = parse(Some("text/plain"), "paste=hello").await.unwrap();
        assert_eq!(form.value("paste"), None);

        let form = parse(None, "paste=hello").await.unwrap();
        assert_eq!(form.value("paste"), None);
    }

    #[tokio::test]
    async fn broken_multipart_is_rejected() {
        let result = parse(Some("multipart/form-data"), "garbage").await;
        assert!(matches!(result, Err(ApiError::Multipart { .. })));
    }
}
