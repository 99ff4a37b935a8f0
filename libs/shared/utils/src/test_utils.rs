use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub default_patient_id: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            default_patient_id: "patient-0001".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            default_patient_id: self.default_patient_id.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned Supabase rows for wiremock fixtures, matching the live table
/// shapes of `hospital`, `doctors` and `appointments`.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn hospital_response(id: i64, hospital_code: &str, name: &str) -> Value {
        json!({
            "id": id,
            "hospital_id": hospital_code,
            "name": name,
            "location": "Talap, Kannur, Kerala",
            "city": "Kannur",
            "state": "Kerala",
            "address": "Talap",
            "pincode": "670002",
            "contact_no": "+91 497 2700000",
            "email_id": "frontdesk@example.com",
            "status": "24 hours open",
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn doctor_response(id: i64, name: &str, speciality: &str, hospital_code: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "speciality": speciality,
            "qualification": "MBBS, MD",
            "consultation_fee": "₹ 300",
            "hospital_id": hospital_code,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn appointment_response(
        id: i64,
        hospital_id: i64,
        doctor_id: i64,
        date: &str,
        time: &str,
        patient_id: &str,
    ) -> Value {
        json!({
            "id": id,
            "hospital_id": hospital_id,
            "doctor_id": doctor_id,
            "appointment_date": date,
            "appointment_time": time,
            "patient_id": patient_id,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }
}
