use serde::Serialize;

/// Liveness payload for `GET /health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
