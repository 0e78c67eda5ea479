use std::env;
use std::string::String;

/// Environment-derived settings, resolved once at cold start and passed by
/// reference into the handler.
#[derive(Debug)]
pub struct Config {
    pub archive_bucket: String,
    pub record_table: String,
    pub work_queue_url: String,
}

impl Config {
    pub fn load_from_env() -> Result<Config, String> {
        let conf = Config {
            archive_bucket: env::var("ARCHIVE_BUCKET")
                .map_err(|e| format!("ARCHIVE_BUCKET not set - {}", e))?,
            record_table: env::var("RECORD_TABLE")
                .map_err(|e| format!("RECORD_TABLE not set - {}", e))?,
            work_queue_url: env::var("WORK_QUEUE_URL")
                .map_err(|e| format!("WORK_QUEUE_URL not set - {}", e))?,
        };

        Ok(conf)
    }
}
