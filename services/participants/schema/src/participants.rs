use sea_orm::entity::prelude::*;

/// A registration. `id` is the 6-character code printed on the pass.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub gotra: Option<String>,
    pub birthdate: Date,
    pub age: i32,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_relation: String,
    pub emergency_contact_phone: String,
    pub distance: String,
    pub tshirt_size: String,
    pub medical_conditions: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub accepted_declaration: bool,
    pub bib_num: Option<String>,
    pub is_bib_given: bool,
    pub is_tshirt_given: bool,
    pub counter_no: Option<String>,
    pub pass_link: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::scan_logs::Entity")]
    ScanLogs,
}

impl Related<super::scan_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScanLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
