/// Callback data for inline keyboards
pub mod callbacks;
/// Chat commands and their handlers
pub mod commands;
/// Update routing and transport glue
pub mod handlers;
/// Texts and keyboards
pub mod menu;
