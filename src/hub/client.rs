use crate::app_config::AppConfig;
use reqwest::Client;
use thiserror::Error;

pub fn new_client(config: &AppConfig) -> Result<Client, HubClientError> {
    let client = Client::builder().timeout(config.hub().timeout()).build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum HubClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;

    #[tokio::test]
    async fn new_client_reaches_the_hub() -> Result<(), HubClientError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/json.htm")
            .with_status(200)
            .with_body(r#"{"status": "OK"}"#)
            .create_async()
            .await;

        let config = AppConfigBuilder::new().hub_url(server.url()).build();
        let client = new_client(&config)?;

        let response = client.get(format!("{}/json.htm", config.hub().url())).send().await?;

        mock.assert_async().await;
        assert!(response.status().is_success());

        Ok(())
    }
}
