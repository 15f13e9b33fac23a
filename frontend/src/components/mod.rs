pub mod error_boundary;
pub mod filter_components;
pub(crate) mod page_shell;
pub mod suspend_boundary;
