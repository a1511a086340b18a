use crate::analysis::AnalysisStore;
use crate::config::Config;
use crate::scoring::ScoringClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub scoring: ScoringClient,
    pub analyses: AnalysisStore,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let scoring = ScoringClient::new(&config.scoring_url, config.scoring_timeout)?;
        Ok(Self {
            config,
            scoring,
            analyses: AnalysisStore::new(),
        })
    }

    pub fn report_url(&self, id: &uuid::Uuid) -> String {
        format!("{}/report/{}", self.config.base_url, id)
    }
}
