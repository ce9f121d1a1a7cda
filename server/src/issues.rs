//! GitHub issue glue for the resource-request endpoint. Each requested
//! keyword maps to one open issue; repeat requests bump the existing issue
//! with a comment instead of filing duplicates.

use reqwest::{
    Client,
    header::{ACCEPT, USER_AGENT},
};
use serde::Deserialize;
use serde_json::json;

use crate::{config::Config, error::AppError};

const GITHUB_API: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const AGENT: &str = "hotwords-api";

#[derive(Deserialize)]
struct Issue {
    title: String,
    comments_url: String,
}

pub enum RequestOutcome {
    Bumped,
    Created,
}

pub async fn submit_request(
    client: &Client,
    config: &Config,
    keyword: &str,
) -> Result<RequestOutcome, AppError> {
    let title = format!("Resource request: {keyword}");

    let issues: Vec<Issue> = client
        .get(format!(
            "{GITHUB_API}/repos/{}/{}/issues?state=open&per_page=100",
            config.github_owner, config.github_repo
        ))
        .bearer_auth(&config.github_token)
        .header(ACCEPT, GITHUB_ACCEPT)
        .header(USER_AGENT, AGENT)
        .send()
        .await
        .map_err(internal)?
        .json()
        .await
        .map_err(internal)?;

    if let Some(existing) = issues.iter().find(|issue| issue.title == title) {
        client
            .post(&existing.comments_url)
            .bearer_auth(&config.github_token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, AGENT)
            .json(&json!({ "body": "Another user asked for this resource" }))
            .send()
            .await
            .map_err(internal)?;

        return Ok(RequestOutcome::Bumped);
    }

    client
        .post(format!(
            "{GITHUB_API}/repos/{}/{}/issues",
            config.github_owner, config.github_repo
        ))
        .bearer_auth(&config.github_token)
        .header(ACCEPT, GITHUB_ACCEPT)
        .header(USER_AGENT, AGENT)
        .json(&json!({
            "title": title,
            "body": format!("Requested keyword: {keyword}"),
        }))
        .send()
        .await
        .map_err(internal)?;

    Ok(RequestOutcome::Created)
}

fn internal(e: reqwest::Error) -> AppError {
    AppError::Internal(e.into())
}
