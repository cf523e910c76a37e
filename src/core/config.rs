use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub processing_queue_url: String,
    pub base_url: String,
    pub storage_path: String,
    pub phone_param_prefix: String,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_from_number: Option<String>,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            processing_queue_url: env::var("PROCESSING_QUEUE_URL")
                .map_err(|e| format!("PROCESSING_QUEUE_URL: {}", e))?,
            base_url: env::var("BASE_URL").map_err(|e| format!("BASE_URL: {}", e))?,
            storage_path: env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "/tmp/newsletters".to_string()),
            phone_param_prefix: env::var("PHONE_PARAM_PREFIX")
                .unwrap_or_else(|_| "/kochi/phones/".to_string()),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").ok(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").ok(),
            twilio_from_number: env::var("TWILIO_PHONE_NUMBER").ok(),
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
        })
    }
}
