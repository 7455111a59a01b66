pub mod audit;
pub mod cat;
pub mod clear;
pub mod git;
pub mod help;
pub mod history;
pub mod ls;
pub mod npm;
pub mod solc;
pub mod theme;
pub mod whoami;
