pub mod accounts;
pub mod clients;
pub mod commands;
pub mod facade;
pub mod ledger;
pub mod menu;
pub mod notify;
