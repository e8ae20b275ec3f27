use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{AlertCondition, Metal};

/// In-memory price alert. Nothing here is persisted.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct PriceAlert {
    pub id: Uuid,
    pub metal: Metal,
    pub target_price: f64,
    pub condition: AlertCondition,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl PriceAlert {
    pub fn new(metal: Metal, target_price: f64, condition: AlertCondition) -> Self {
        Self {
            id: Uuid::new_v4(),
            metal,
            target_price,
            condition,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn is_triggered(&self, price: f64) -> bool {
        self.is_active
            && match self.condition {
                AlertCondition::Above => price >= self.target_price,
                AlertCondition::Below => price <= self.target_price,
            }
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
