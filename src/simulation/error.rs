use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("country {country} has no nodes; demographic update skipped")]
    DataIntegrity { country: String },

    #[error("alliance {alliance} lists unknown member {member}")]
    ReferenceGap { alliance: String, member: String },

    #[error("escalation from tier {current} to tier {requested} refused (cohesion {cohesion:.2})")]
    PolicyViolation {
        current: u8,
        requested: u8,
        cohesion: f64,
    },

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
