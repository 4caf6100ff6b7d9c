pub mod command {
    pub mod add_patron_cmd;
    pub mod change_tier_cmd;
    pub mod find_patrons_cmd;
    pub mod get_patron_cmd;
    pub mod remove_patron_cmd;
    pub mod update_patron_cmd;
}
pub mod domain;
pub mod dto;
pub mod factory;
pub mod controller;
