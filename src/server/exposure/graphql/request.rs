//! Adapts axum requests into raw GraphQL parameter sources

use crate::core::error::RequestError;
use crate::core::value::{Params, UploadedFile, Value};
use crate::routing::RawRequest;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};

/// Read query string, body fields, raw body and uploads of a request
pub async fn read_raw_request(request: Request, body_limit: usize) -> Result<RawRequest, RequestError> {
    let mut raw = RawRequest::new();

    if let Some(query) = request.uri().query() {
        raw.query = parse_urlencoded(query.as_bytes()).map_err(RequestError::QueryString)?;
    }

    if let Some(length) = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
    {
        if length > body_limit {
            return Err(RequestError::TooLarge { limit: body_limit });
        }
    }

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        read_multipart(request, &mut raw).await?;
        return Ok(raw);
    }

    let bytes = axum::body::to_bytes(request.into_body(), body_limit)
        .await
        .map_err(|e| RequestError::Body(e.to_string()))?;

    if content_type.starts_with("application/x-www-form-urlencoded") {
        raw.body_fields = parse_urlencoded(&bytes).map_err(RequestError::Body)?;
    } else if !bytes.is_empty() {
        // Undecodable content counts as no body, like malformed JSON
        match String::from_utf8(bytes.to_vec()) {
            Ok(body) => raw.raw_body = Some(body),
            Err(err) => tracing::debug!(error = %err, "Ignoring request body that is not UTF-8"),
        }
    }

    Ok(raw)
}

fn parse_urlencoded(input: &[u8]) -> Result<Params, String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(input).map_err(|e| e.to_string())?;
    Ok(pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect())
}

async fn read_multipart(request: Request, raw: &mut RawRequest) -> Result<(), RequestError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| RequestError::Multipart(e.to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RequestError::Multipart(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            tracing::warn!("Skipping multipart part without a name");
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| RequestError::Multipart(e.to_string()))?;

                let mut file = UploadedFile::new(name.clone(), bytes).with_file_name(file_name);
                file.content_type = content_type;
                raw.files.insert(name, file);
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| RequestError::Multipart(e.to_string()))?;
                raw.body_fields.insert(name, Value::String(text));
            }
        }
    }

    Ok(())
}
