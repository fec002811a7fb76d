use std::{error::Error, str::FromStr};

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

pub struct ApiClient {
    pub url: &'static str,
}

impl ApiClient {
    fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
    ) -> Result<T, Box<dyn Error>> {
        let url = Url::from_str(&self.path(endpoint))?;
        let response = client.get(url).send().await?.text().await?;
        Ok(serde_json::from_str(&response)?)
    }

    pub async fn get_status(&self, client: &reqwest::Client, endpoint: &str) -> StatusCode {
        let url = Url::from_str(&self.path(endpoint)).unwrap();
        client
            .get(url)
            .send()
            .await
            .expect("Failed to send get request")
            .status()
    }

    pub async fn post<T: Into<reqwest::Body>, U: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: T,
    ) -> Result<U, Box<dyn Error>> {
        let url = Url::from_str(&self.path(endpoint))?;

        let response = client
            .post(url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?
            .text()
            .await?;

        Ok(serde_json::from_str(&response)?)
    }

    pub async fn post_status<T: Into<reqwest::Body>>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: T,
    ) -> StatusCode {
        let url = Url::from_str(&self.path(endpoint)).unwrap();
        client
            .post(url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send post request")
            .status()
    }

    pub async fn patch<T: Into<reqwest::Body>, U: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: T,
    ) -> Result<U, Box<dyn Error>> {
        let url = Url::from_str(&self.path(endpoint))?;

        let response = client
            .patch(url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?
            .text()
            .await?;

        Ok(serde_json::from_str(&response)?)
    }

    pub async fn delete(&self, client: &reqwest::Client, endpoint: &str) -> StatusCode {
        let url = Url::from_str(&self.path(endpoint)).unwrap();
        client
            .delete(url)
            .send()
            .await
            .expect("Failed to send delete request")
            .status()
    }
}
