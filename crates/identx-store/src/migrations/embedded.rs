//! Migrations embedded at compile time

pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations, oldest first
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_tenants",
        sql: include_str!("../../migrations/001_tenants.sql"),
    }]
}
