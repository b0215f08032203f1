//! This module provides a client to connect to the planning service

use std::error::Error;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::feed::{Developer, HolidayLeaveFeed, OptimizationSummary, SprintAssignment, SprintWindow, TeamMembers};
use crate::traits::PlanningSource;

static TEAM_MEMBERS_PATH: &str = "api/team/members";
static HOLIDAYS_LEAVES_PATH: &str = "api/holidays-leaves";
static OPTIMIZE_PATH: &str = "api/sprint/optimize";

#[derive(Serialize)]
struct OptimizeRequest {
    start_date: String,
    end_date: String,
}

/// A [`PlanningSource`] that fetches its data from the planning service.
///
/// Every call issues a new request: nothing is cached here (see [`Cache`](crate::cache::Cache) for that), and nothing is retried.
pub struct Client {
    url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self, Box<dyn Error>> {
        let mut url = Url::parse(url.as_ref())?;
        // Without a trailing slash, joining would replace the last path segment
        if url.path().ends_with('/') == false {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client to [`SERVICE_URL`](crate::config::SERVICE_URL)
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::service_url())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL of an endpoint of the service
    pub fn endpoint(&self, path: &str) -> Result<Url, Box<dyn Error>> {
        Ok(self.url.join(path)?)
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Box<dyn Error>> {
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), response.url()).into());
        }
        Ok(response)
    }

    /// Run the optimizer for a sprint, and return its whole summary
    pub async fn optimize(&self, window: &SprintWindow) -> Result<OptimizationSummary, Box<dyn Error>> {
        let url = self.endpoint(OPTIMIZE_PATH)?;
        let body = OptimizeRequest {
            start_date: window.start.format("%Y-%m-%d").to_string(),
            end_date: window.end.format("%Y-%m-%d").to_string(),
        };
        log::debug!("Requesting an optimized plan for {} from {}", window, url);

        let response = self.http.post(url)
            .json(&body)
            .send()
            .await?;
        let response = Self::check_status(response)?;
        let summary: OptimizationSummary = response.json().await?;

        log::info!("Optimizer selected {} out of {} tasks for {}",
            summary.total_tasks_selected, summary.total_tasks_considered, window);
        Ok(summary)
    }
}

#[async_trait]
impl PlanningSource for Client {
    // The service serves the current team and every known holiday and leave, whatever the sprint
    async fn get_roster(&self, _window: &SprintWindow) -> Result<Vec<Developer>, Box<dyn Error>> {
        let url = self.endpoint(TEAM_MEMBERS_PATH)?;
        let response = self.http.get(url).send().await?;
        let response = Self::check_status(response)?;
        let team: TeamMembers = response.json().await?;
        log::debug!("Fetched {} team members", team.members.len());
        Ok(team.members)
    }

    async fn get_holidays_and_leaves(&self, _window: &SprintWindow) -> Result<HolidayLeaveFeed, Box<dyn Error>> {
        let url = self.endpoint(HOLIDAYS_LEAVES_PATH)?;
        let response = self.http.get(url).send().await?;
        let response = Self::check_status(response)?;
        let feed: HolidayLeaveFeed = response.json().await?;
        log::debug!("Fetched {} holidays and {} leaves", feed.holidays.len(), feed.leaves.len());
        Ok(feed)
    }

    async fn get_sprint_assignment(&self, window: &SprintWindow) -> Result<SprintAssignment, Box<dyn Error>> {
        Ok(self.optimize(window).await?.developer_daily_schedule)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let client = Client::new("http://localhost:8000").unwrap();
        assert_eq!(client.endpoint(HOLIDAYS_LEAVES_PATH).unwrap().as_str(), "http://localhost:8000/api/holidays-leaves");

        let client = Client::new("https://planning.example.com/v2").unwrap();
        assert_eq!(client.endpoint(TEAM_MEMBERS_PATH).unwrap().as_str(), "https://planning.example.com/v2/api/team/members");
    }

    #[test]
    fn invalid_url() {
        assert!(Client::new("not a url").is_err());
    }
}
