pub mod domain;
pub mod command {
    pub mod borrow_book_cmd;
    pub mod delete_loan_cmd;
    pub mod due_soon_loans_cmd;
    pub mod find_loans_cmd;
    pub mod fines_report_cmd;
    pub mod get_loan_cmd;
    pub mod library_stats_cmd;
    pub mod loan_fine_cmd;
    pub mod overdue_loans_cmd;
    pub mod return_book_cmd;
    #[cfg(test)]
    pub(crate) mod fixtures;
}
pub mod dto;
pub mod factory;
pub mod locks;
pub mod controller;
