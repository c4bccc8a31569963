use thiserror::Error;

use guess_types::Airport;

#[derive(Debug, Error)]
pub enum AirportFetchError {
    #[error("failed to load the airport list: {0}")]
    Request(#[from] reqwest::Error),
    #[error("the airport service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Retrieve the full airport list for the selection UI. Any non-200 response
/// is a failed-to-load condition; filtering happens downstream.
pub async fn fetch_airports(
    http: &reqwest::Client,
    endpoint: &str,
) -> Result<Vec<Airport>, AirportFetchError> {
    let response = http.get(endpoint).send().await?;

    if !response.status().is_success() {
        return Err(AirportFetchError::Status(response.status()));
    }

    Ok(response.json::<Vec<Airport>>().await?)
}
