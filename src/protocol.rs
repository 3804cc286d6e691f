//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Distractor, Game};

//
// HTTP request DTOs
//

#[derive(Debug, Deserialize)]
pub struct GameCreateIn {
    pub title: String,
    pub original_text: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub grade_level: Option<i32>,
}

//
// HTTP response DTOs
//

#[derive(Debug, Serialize)]
pub struct DistractorOut {
    pub id: String,
    pub distractor_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GameOut {
    pub id: String,
    pub title: String,
    pub original_text: String,
    pub host: Option<String>,
    pub category: Option<String>,
    pub grade_level: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub distractors: Vec<DistractorOut>,
}

/// Convert full `Game` (internal) to the public DTO.
pub fn to_out(g: &Game) -> GameOut {
    GameOut {
        id: g.id.clone(),
        title: g.title.clone(),
        original_text: g.original_text.clone(),
        host: g.host.clone(),
        category: g.category.clone(),
        grade_level: g.grade_level,
        created_at: g.created_at,
        updated_at: g.updated_at,
        distractors: g.distractors.iter().map(distractor_out).collect(),
    }
}

fn distractor_out(d: &Distractor) -> DistractorOut {
    DistractorOut {
        id: d.id.clone(),
        distractor_text: d.distractor_text.clone(),
        created_at: d.created_at,
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct RootOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub detail: String,
}
