use polyplan::io::ext_repr::{ExtPlan, ExtPlanRequest};
use serde::{Deserialize, Serialize};

use crate::config::GSFConfig;

#[derive(Serialize, Deserialize, Clone)]
pub struct GSFOutput {
    #[serde(flatten)]
    pub request: ExtPlanRequest,
    pub solution: ExtPlan,
    #[serde(rename = "optimizer_config")]
    pub config: GSFConfig,
}
