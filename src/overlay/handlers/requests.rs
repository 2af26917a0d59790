use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct NavigationRequest {
    pub href: String,
}
