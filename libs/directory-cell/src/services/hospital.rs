use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::Hospital;

pub struct HospitalService {
    supabase: SupabaseClient,
}

impl HospitalService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Fetch every registered hospital.
    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>> {
        debug!("Fetching hospital list");

        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            "/rest/v1/hospital?select=*",
            None,
        ).await?;

        let hospitals: Vec<Hospital> = result.into_iter()
            .map(|row| serde_json::from_value(row))
            .collect::<std::result::Result<Vec<Hospital>, _>>()?;

        debug!("Fetched {} hospitals", hospitals.len());
        Ok(hospitals)
    }
}
