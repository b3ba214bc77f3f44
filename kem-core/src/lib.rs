pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod fmt;
pub mod session;
pub mod utils;
