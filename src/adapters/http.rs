use crate::domain::model::{CollegeRecord, Enrichment};
use crate::domain::ports::Enricher;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::validate_url_template;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_LOGO_ENDPOINT: &str = "https://logo.clearbit.com/{domain}";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves a logo URL per college by probing `{domain}` in an endpoint template.
pub struct HttpLogoEnricher {
    client: Client,
    endpoint_template: String,
    timeout: Duration,
}

impl HttpLogoEnricher {
    pub fn new(endpoint_template: &str) -> Result<Self> {
        validate_url_template("enrichment.logo_endpoint", endpoint_template)?;
        Ok(Self {
            client: Client::new(),
            endpoint_template: endpoint_template.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn logo_url_for(&self, domain: &str) -> String {
        self.endpoint_template.replace("{domain}", domain)
    }
}

#[async_trait]
impl Enricher for HttpLogoEnricher {
    async fn enrich(&self, college: &CollegeRecord) -> Result<Enrichment> {
        if !college.has_domain() {
            return Err(FinderError::MissingDomain {
                name: college.name.clone(),
            });
        }

        let url = self.logo_url_for(&college.domain);
        tracing::debug!("📡 Probing logo for {}: {}", college.name, url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(Enrichment {
                logo_url: Some(url),
                description: None,
            })
        } else {
            Err(FinderError::EnrichmentError {
                name: college.name.clone(),
                message: format!("logo endpoint returned status {}", response.status()),
            })
        }
    }
}
