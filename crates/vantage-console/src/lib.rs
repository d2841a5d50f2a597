//! Vantage Console - command-line admin console
//!
//! Wires the permission evaluator and the typed API client together:
//! configuration and logging bootstrap, the built-in route table, and one
//! handler per console command.

pub mod command;
pub mod model;
pub mod routes;
pub mod startup;

pub use command::Console;
pub use model::config::{Cli, Command, Configuration, OrdersCommand};
