//! Loan lifecycle engine for a small lending library: a catalog of books, the member
//! register and a ledger of loans, served as three lambdas (`catalog`, `patrons`, `checkout`).

pub mod books {
    pub mod domain;
    pub mod dto;
    pub mod factory;
    pub mod repository;
}
pub mod catalog {
    pub mod command {
        pub mod add_book_cmd;
        pub mod book_availability_cmd;
        pub mod category_breakdown_cmd;
        pub mod find_books_cmd;
        pub mod get_book_cmd;
        pub mod remove_book_cmd;
        pub mod update_book_cmd;
    }
    pub mod controller;
    pub mod domain;
    pub mod factory;
}
pub mod checkout;
pub mod core {
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod events;
    pub mod library;
    pub mod memory;
    pub mod repository;
}
pub mod gateway;
pub mod loans {
    pub mod domain {
        pub mod model;
    }
    pub mod factory;
    pub mod repository;
}
pub mod members {
    pub mod domain {
        pub mod model;
    }
    pub mod factory;
    pub mod repository;
}
pub mod patrons;
pub mod utils {
    pub mod date;
    pub mod ddb;
    pub mod logs;
}
