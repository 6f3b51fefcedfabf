//! Service (catalog item) entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,

    #[sea_orm(nullable)]
    pub photo_url: Option<String>,
    #[sea_orm(nullable)]
    pub photo_key: Option<String>,

    pub barbershop_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::barbershop::Entity",
        from = "Column::BarbershopId",
        to = "super::barbershop::Column::Id"
    )]
    Barbershop,
    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,
}

impl Related<super::barbershop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Barbershop.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
