//! Shared HTTP client

use reqwest::Client;
use std::time::Duration;

pub fn create_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}
