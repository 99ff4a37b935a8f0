use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::Doctor;

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Fetch the doctors attached to a hospital, ordered by name.
    pub async fn list_doctors(&self, hospital_code: &str) -> Result<Vec<Doctor>> {
        debug!("Fetching doctors for hospital: {}", hospital_code);

        let path = format!(
            "/rest/v1/doctors?hospital_id=eq.{}&select=*&order=name.asc",
            hospital_code
        );
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await?;

        let doctors: Vec<Doctor> = result.into_iter()
            .map(|row| serde_json::from_value(row))
            .collect::<std::result::Result<Vec<Doctor>, _>>()?;

        debug!("Fetched {} doctors", doctors.len());
        Ok(doctors)
    }
}
