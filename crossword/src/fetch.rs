use chrono::NaiveDate;
use log::info;
use reqwest::header::CONTENT_TYPE;

use crate::auth::Session;
use crate::error::FetchError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// The provider's name for a day's puzzle, e.g. `Mar0521`.
///
/// Also used as the local file stem.
pub fn date_token(date: NaiveDate) -> String {
    date.format("%b%d%y").to_string()
}

pub fn puzzle_url(base_url: &str, date: NaiveDate) -> String {
    format!("{}/{}.pdf", base_url.trim_end_matches('/'), date_token(date))
}

/// Only a 200 carrying exactly `application/pdf` is a puzzle
pub fn validate_response(status: u16, content_type: Option<&str>) -> Result<(), FetchError> {
    if status != 200 {
        return Err(FetchError::Status(status));
    }
    match content_type {
        Some(PDF_CONTENT_TYPE) => Ok(()),
        other => Err(FetchError::ContentType(other.map(str::to_string))),
    }
}

pub fn fetch_puzzle(
    session: &Session,
    base_url: &str,
    date: NaiveDate,
) -> Result<Vec<u8>, FetchError> {
    let url = puzzle_url(base_url, date);
    info!("Fetching {}", url);

    let response = session.client().get(&url).send()?;
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    validate_response(status, content_type.as_deref())?;
    Ok(response.bytes()?.to_vec())
}
