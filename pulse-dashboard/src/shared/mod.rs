/// Shared modules for the Market Pulse binaries
pub mod calc;
pub mod config;
pub mod controls;
pub mod logging;
pub mod report;
pub mod sections;
pub mod sentiment;
pub mod state;
pub mod widgets;

#[cfg(test)]
pub mod testing;
